use dioxus::prelude::*;
use ui::use_session;

use crate::Route;

mod layout;
pub use layout::NavLayout;

mod home;
pub use home::{About, Home};

mod login;
pub use login::Login;

mod register;
pub use register::Register;

mod club_list;
pub use club_list::ClubList;

mod club_form;
pub use club_form::{CreateClub, EditClub};

mod club_detail;
pub use club_detail::ClubDetail;

mod joined;
pub use joined::JoinedClubs;

mod friends;
pub use friends::Friends;

mod profile;
pub use profile::ProfilePage;

mod calendar;
pub use calendar::CalendarPage;

/// Renders `children` only for a signed-in user.
#[component]
fn RequireSession(children: Element) -> Element {
    let session = use_session();
    let state = session();

    if state.loading {
        return rsx! {
            p { class: "muted", "Loading..." }
        };
    }
    if state.session.is_none() {
        return rsx! {
            div {
                class: "sign-in-prompt",
                p { "You need to be signed in to see this page." }
                Link { class: "btn btn-primary", to: Route::Login {}, "Log in" }
            }
        };
    }

    rsx! {
        {children}
    }
}
