//! Shared UI for the ClubHub web app.
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`ClientProvider`] | Builds the backend client and provides it as context |
//! | [`SessionProvider`] | Restores, persists and re-checks the signed-in session |
//! | [`hooks`] | One view-model hook per screen |
//! | [`components`] | Presentational components |

pub mod components;
pub mod hooks;

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

mod client;
pub use client::{use_directory, AppDirectory, ClientProvider};

mod session;
pub use session::{remember_session, use_session, LogoutButton, SessionProvider, SessionState};

mod navbar;
pub use navbar::Navbar;

mod timer;
