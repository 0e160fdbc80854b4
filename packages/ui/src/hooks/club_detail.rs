use dioxus::prelude::*;
use store::{Club, Loadable};

use crate::client::use_directory;

/// Load one club. A missing row ends in [`Loadable::NotFound`].
pub fn use_club_detail(club_id: i64) -> Signal<Loadable<Club>> {
    let directory = use_directory();

    // Track the id in a signal so use_resource re-runs on route param change
    let mut id_signal = use_signal(|| club_id);
    if *id_signal.peek() != club_id {
        id_signal.set(club_id);
    }

    let mut club = use_signal(|| Loadable::Idle);

    let _ = use_resource(move || {
        let id = id_signal();
        async move {
            club.set(Loadable::Loading);
            let dir = directory.peek().clone();
            let result = dir.club(id).await;
            if let Err(e) = &result {
                tracing::error!("Failed to load club {id}: {e}");
            }
            club.set(Loadable::from_optional(result, "Could not load that club."));
        }
    });

    club
}
