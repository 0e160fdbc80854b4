use dioxus::prelude::*;
use ui::use_session;

use crate::Route;

#[component]
pub fn Home() -> Element {
    let session = use_session();
    let signed_in = session().session.is_some();

    rsx! {
        section {
            class: "hero",
            h1 { "Find your people on campus" }
            p { "Browse student clubs, join the ones you like and see where your friends are." }
            div {
                class: "hero-actions",
                Link { class: "btn btn-primary", to: Route::ClubList {}, "Browse clubs" }
                if !signed_in {
                    Link { class: "btn btn-outline", to: Route::Register {}, "Create an account" }
                }
            }
        }
    }
}

#[component]
pub fn About() -> Element {
    rsx! {
        section {
            class: "about",
            h1 { "About ClubHub" }
            p {
                "ClubHub is a directory of campus clubs. Anyone can browse; signed-in "
                "students can create clubs, join and follow them, add friends and keep "
                "a personal calendar of events."
            }
            p {
                "Each club card shows how many of your friends have joined, so it is "
                "easy to pick something to try with people you know."
            }
        }
    }
}
