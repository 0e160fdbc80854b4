//! # View-model hooks
//!
//! One hook per screen. Each keeps its state in signals, re-fetches when an
//! input changes, and exposes mutations that patch local state only after the
//! backend accepted the write. Failed writes are logged and change nothing.
//!
//! | Hook | Inputs | Fetch | Mutations |
//! |------|--------|-------|-----------|
//! | [`use_club_directory`] | sort key, session | all clubs | delete |
//! | [`use_club_relations`] | visible club ids, session | joined/following/friends-joined | join, follow |
//! | [`use_club_detail`] | club id | one club | none |
//! | [`use_joined_clubs`] | session | joined clubs, newest first | none |
//! | [`use_friends`] | session, search text | friends, profile search | add, remove |
//! | [`use_profile`] | session | own profile (created when missing) | save, avatar |
//! | [`use_calendar`] | none | none | add event |
//!
//! Overlapping fetches are not sequenced; the last response wins. List hooks
//! also re-fetch every `refresh_interval_secs` so local patches cannot drift
//! from the backend for long.

use std::future::Future;

use dioxus::prelude::*;
use store::Loadable;

mod calendar;
mod club_detail;
mod club_directory;
mod club_relations;
mod friends;
mod joined_clubs;
mod profile;

pub use calendar::{use_calendar, CalendarHandle};
pub use club_detail::use_club_detail;
pub use club_directory::{use_club_directory, ClubDirectory};
pub use club_relations::{use_club_relations, ClubRelationsHandle};
pub use friends::{use_friends, FriendsHandle};
pub use joined_clubs::{use_joined_clubs, JoinedClubs};
pub use profile::{use_profile, ProfileHandle};

/// Move `target` through `Loading` into the outcome of `fetch`, logging a failure.
pub(crate) async fn load_into<T: 'static>(
    mut target: Signal<Loadable<T>>,
    message: &'static str,
    fetch: impl Future<Output = store::Result<T>>,
) {
    target.set(Loadable::Loading);
    let result = fetch.await;
    if let Err(e) = &result {
        tracing::error!("{message} {e}");
    }
    target.set(Loadable::from_result(result, message));
}

/// Replace the data in `target` on success; keep what is shown on failure.
pub(crate) async fn refresh_into<T: 'static>(
    mut target: Signal<Loadable<T>>,
    what: &str,
    fetch: impl Future<Output = store::Result<T>>,
) {
    match fetch.await {
        Ok(data) => target.set(Loadable::Ready(data)),
        Err(e) => tracing::warn!("Background refresh of {what} failed: {e}"),
    }
}
