use dioxus::prelude::*;
use store::{Club, Loadable};

use crate::client::{use_directory, AppDirectory};
use crate::hooks::{load_into, refresh_into};
use crate::session::{use_session, SessionState};
use crate::timer::use_interval;

/// Clubs the signed-in user has joined.
#[derive(Clone, Copy, PartialEq)]
pub struct JoinedClubs {
    pub clubs: Signal<Loadable<Vec<Club>>>,
    directory: Signal<AppDirectory>,
    session: Signal<SessionState>,
}

/// Load the user's joined clubs, newest first. `Idle` while signed out.
pub fn use_joined_clubs() -> JoinedClubs {
    let directory = use_directory();
    let session = use_session();
    let mut clubs = use_signal(|| Loadable::Idle);
    let refresh_secs = directory.peek().config().directory.refresh_interval_secs;

    let _ = use_resource(move || {
        let user = session().user_id();
        async move {
            let Some(user) = user else {
                clubs.set(Loadable::Idle);
                return;
            };
            let dir = directory.peek().clone();
            load_into(clubs, "Could not load your joined clubs.", dir.joined_clubs(&user)).await;
        }
    });

    let handle = JoinedClubs {
        clubs,
        directory,
        session,
    };
    use_interval(refresh_secs, move || handle.refresh());
    handle
}

impl JoinedClubs {
    pub fn ids(&self) -> Vec<i64> {
        self.clubs
            .read()
            .data()
            .map(|clubs| clubs.iter().map(|c| c.id).collect())
            .unwrap_or_default()
    }

    pub fn refresh(&self) {
        let Some(user) = self.session.peek().user_id() else {
            return;
        };
        let dir = self.directory.peek().clone();
        let clubs = self.clubs;
        spawn(async move {
            refresh_into(clubs, "joined clubs", dir.joined_clubs(&user)).await;
        });
    }
}
