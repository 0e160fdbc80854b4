use dioxus::prelude::*;
use ui::{use_session, LogoutButton, Navbar};

use crate::Route;

/// Navigation bar above every page.
#[component]
pub fn NavLayout() -> Element {
    let session = use_session();
    let nav = use_navigator();
    let signed_in = session().session.is_some();

    let actions = if signed_in {
        rsx! {
            LogoutButton {
                class: "btn btn-ghost",
                on_signed_out: move |_| {
                    nav.push(Route::Login {});
                },
            }
        }
    } else {
        rsx! {
            Link { class: "btn btn-ghost", to: Route::Login {}, "Log in" }
            Link { class: "btn btn-primary", to: Route::Register {}, "Sign up" }
        }
    };

    rsx! {
        Navbar {
            actions,
            Link { to: Route::Home {}, "Home" }
            Link { to: Route::ClubList {}, "Clubs" }
            if signed_in {
                Link { to: Route::JoinedClubs {}, "My clubs" }
                Link { to: Route::Friends {}, "Friends" }
                Link { to: Route::CalendarPage {}, "Calendar" }
                Link { to: Route::ProfilePage {}, "Profile" }
            }
            Link { to: Route::About {}, "About" }
        }
        main {
            class: "page",
            Outlet::<Route> {}
        }
    }
}
