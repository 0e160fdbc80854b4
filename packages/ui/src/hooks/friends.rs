use std::time::Duration;

use dioxus::prelude::*;
use store::{Loadable, PendingSet, Profile};

use crate::client::{use_directory, AppDirectory};
use crate::hooks::{load_into, refresh_into};
use crate::session::{use_session, SessionState};
use crate::timer::{sleep, use_interval};

/// Friends list plus the add-friend search.
#[derive(Clone, Copy, PartialEq)]
pub struct FriendsHandle {
    pub friends: Signal<Loadable<Vec<Profile>>>,
    pub search_input: Signal<String>,
    /// `Idle` until a long enough term has been entered.
    pub results: Signal<Loadable<Vec<Profile>>>,
    pub pending: Signal<PendingSet>,
    directory: Signal<AppDirectory>,
    session: Signal<SessionState>,
}

pub fn use_friends() -> FriendsHandle {
    let directory = use_directory();
    let session = use_session();
    let mut friends = use_signal(|| Loadable::Idle);
    let search_input = use_signal(String::new);
    let results = use_signal(|| Loadable::Idle);
    let pending = use_signal(PendingSet::default);
    let refresh_secs = directory.peek().config().directory.refresh_interval_secs;

    let _ = use_resource(move || {
        let user = session().user_id();
        async move {
            let Some(user) = user else {
                friends.set(Loadable::Idle);
                return;
            };
            let dir = directory.peek().clone();
            load_into(friends, "Could not load friends.", dir.friends(&user)).await;
        }
    });

    let handle = FriendsHandle {
        friends,
        search_input,
        results,
        pending,
        directory,
        session,
    };
    use_interval(refresh_secs, move || handle.refresh());
    handle
}

impl FriendsHandle {
    fn friend_ids(&self) -> Vec<String> {
        self.friends
            .peek()
            .data()
            .map(|list| list.iter().map(|p| p.id.clone()).collect())
            .unwrap_or_default()
    }

    /// Re-fetch the list quietly, unless an add or remove is in flight.
    pub fn refresh(&self) {
        let Some(user) = self.session.peek().user_id() else {
            return;
        };
        if !self.pending.peek().is_empty() {
            return;
        }
        let dir = self.directory.peek().clone();
        let friends = self.friends;
        spawn(async move {
            refresh_into(friends, "friends", dir.friends(&user)).await;
        });
    }

    /// Update the search box; the search runs once typing pauses.
    pub fn set_search(&self, text: String) {
        let Some(user) = self.session.peek().user_id() else {
            return;
        };
        let mut input = self.search_input;
        input.set(text.clone());

        let dir = self.directory.peek().clone();
        let config = dir.config().clone();
        let mut results = self.results;
        let handle = *self;
        spawn(async move {
            sleep(Duration::from_millis(u64::from(config.directory.search_debounce_ms))).await;
            if *input.peek() != text {
                return;
            }
            if text.trim().chars().count() < config.friends.min_search_len {
                results.set(Loadable::Idle);
                return;
            }
            let exclude = handle.friend_ids();
            load_into(
                results,
                "Could not search profiles.",
                dir.search_profiles(&user, &text, &exclude),
            )
            .await;
        });
    }

    pub fn is_busy(&self, profile_id: &str) -> bool {
        let pending = self.pending.read();
        pending.contains(&format!("add:{profile_id}")) || pending.contains(&format!("remove:{profile_id}"))
    }

    /// Befriend `profile`; on success it moves from the results to the list.
    pub fn add(&self, profile: Profile) {
        let Some(user) = self.session.peek().user_id() else {
            return;
        };
        let key = format!("add:{}", profile.id);
        let mut pending = self.pending;
        if !pending.write().begin(key.clone()) {
            return;
        }
        let dir = self.directory.peek().clone();
        let mut friends = self.friends;
        let mut results = self.results;
        spawn(async move {
            match dir.add_friend(&user, &profile.id).await {
                Ok(()) => {
                    results.write().patch(|list| list.retain(|p| p.id != profile.id));
                    friends.write().patch(|list| {
                        if !list.iter().any(|p| p.id == profile.id) {
                            list.push(profile);
                        }
                    });
                }
                Err(e) => tracing::error!("Failed to add friend {}: {e}", profile.id),
            }
            pending.write().finish(&key);
        });
    }

    pub fn remove(&self, friend_id: String) {
        let Some(user) = self.session.peek().user_id() else {
            return;
        };
        let key = format!("remove:{friend_id}");
        let mut pending = self.pending;
        if !pending.write().begin(key.clone()) {
            return;
        }
        let dir = self.directory.peek().clone();
        let mut friends = self.friends;
        spawn(async move {
            match dir.remove_friend(&user, &friend_id).await {
                Ok(()) => {
                    friends.write().patch(|list| list.retain(|p| p.id != friend_id));
                }
                Err(e) => tracing::error!("Failed to remove friend {friend_id}: {e}"),
            }
            pending.write().finish(&key);
        });
    }
}
