use dioxus::prelude::*;
use store::{ClubRelations, Loadable, PendingSet};

use crate::client::{use_directory, AppDirectory};
use crate::hooks::{load_into, refresh_into};
use crate::session::{use_session, SessionState};
use crate::timer::use_interval;

#[derive(Clone, Copy, PartialEq)]
enum Edge {
    Join,
    Follow,
}

impl Edge {
    fn key(self, club_id: i64) -> String {
        match self {
            Edge::Join => format!("join:{club_id}"),
            Edge::Follow => format!("follow:{club_id}"),
        }
    }
}

/// Joined/following flags and friends-joined counts for a set of clubs.
#[derive(Clone, Copy, PartialEq)]
pub struct ClubRelationsHandle {
    pub state: Signal<Loadable<ClubRelations>>,
    pub pending: Signal<PendingSet>,
    ids: Signal<Vec<i64>>,
    directory: Signal<AppDirectory>,
    session: Signal<SessionState>,
}

/// Ids in `loaded` that are missing from `next`, or `None` when `next`
/// names a club `loaded` does not cover.
fn removed_only(loaded: &[i64], next: &[i64]) -> Option<Vec<i64>> {
    if next.iter().any(|id| !loaded.contains(id)) {
        return None;
    }
    Some(loaded.iter().copied().filter(|id| !next.contains(id)).collect())
}

/// Load the viewer's relations to `club_ids` in one batch. Nothing is
/// fetched while signed out. Shrinking the id set (a club was deleted)
/// drops the missing clubs locally instead of reloading.
pub fn use_club_relations(club_ids: Vec<i64>) -> ClubRelationsHandle {
    let directory = use_directory();
    let session = use_session();
    let refresh_secs = directory.peek().config().directory.refresh_interval_secs;

    // Track ids in a signal so use_resource re-runs when the set changes
    let mut ids = use_signal(|| club_ids.clone());
    if *ids.peek() != club_ids {
        ids.set(club_ids);
    }

    let mut state = use_signal(|| Loadable::<ClubRelations>::Idle);
    let pending = use_signal(PendingSet::default);
    // Ids the current `Ready` state was fetched for
    let mut loaded_for = use_signal(Vec::<i64>::new);

    let _ = use_resource(move || {
        let ids = ids();
        let user = session().user_id();
        async move {
            let Some(user) = user else {
                state.set(Loadable::Idle);
                return;
            };
            if state.peek().data().is_some() {
                let removed = removed_only(&loaded_for.peek(), &ids);
                if let Some(removed) = removed {
                    state.write().patch(|r| {
                        for id in &removed {
                            r.forget(*id);
                        }
                    });
                    loaded_for.set(ids);
                    return;
                }
            }
            let dir = directory.peek().clone();
            loaded_for.set(ids.clone());
            load_into(state, "Could not load club memberships.", dir.relations(&user, &ids)).await;
        }
    });

    let handle = ClubRelationsHandle {
        state,
        pending,
        ids,
        directory,
        session,
    };
    use_interval(refresh_secs, move || handle.refresh());
    handle
}

impl ClubRelationsHandle {
    /// Current relations; empty until loaded.
    pub fn current(&self) -> ClubRelations {
        self.state.read().data().cloned().unwrap_or_default()
    }

    pub fn is_busy(&self, club_id: i64) -> bool {
        let pending = self.pending.read();
        pending.contains(&Edge::Join.key(club_id)) || pending.contains(&Edge::Follow.key(club_id))
    }

    pub fn toggle_join(&self, club_id: i64) {
        self.toggle(Edge::Join, club_id);
    }

    pub fn toggle_follow(&self, club_id: i64) {
        self.toggle(Edge::Follow, club_id);
    }

    /// Re-fetch quietly. Skipped while a join or follow is in flight so the
    /// tick cannot overwrite a write the backend has not answered yet.
    pub fn refresh(&self) {
        let Some(user) = self.session.peek().user_id() else {
            return;
        };
        if !self.pending.peek().is_empty() {
            return;
        }
        let ids = self.ids.peek().clone();
        let dir = self.directory.peek().clone();
        let state = self.state;
        spawn(async move {
            refresh_into(state, "club memberships", dir.relations(&user, &ids)).await;
        });
    }

    fn toggle(&self, edge: Edge, club_id: i64) {
        let Some(user) = self.session.peek().user_id() else {
            return;
        };
        let key = edge.key(club_id);
        let mut pending = self.pending;
        if !pending.write().begin(key.clone()) {
            return;
        }

        let relations = self.state.peek().data().cloned().unwrap_or_default();
        let target = match edge {
            Edge::Join => !relations.is_joined(club_id),
            Edge::Follow => !relations.is_following(club_id),
        };
        let dir = self.directory.peek().clone();
        let mut state = self.state;
        spawn(async move {
            let result = match edge {
                Edge::Join => dir.set_joined(&user, club_id, target).await,
                Edge::Follow => dir.set_following(&user, club_id, target).await,
            };
            match result {
                Ok(()) => {
                    state.write().patch(|r| match edge {
                        Edge::Join => r.set_joined(club_id, target),
                        Edge::Follow => r.set_following(club_id, target),
                    });
                }
                Err(e) => tracing::error!("Failed to update club {club_id}: {e}"),
            }
            pending.write().finish(&key);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_removed_only_reports_deleted_clubs() {
        assert_eq!(removed_only(&[1, 2, 3], &[1, 3]), Some(vec![2]));
        assert_eq!(removed_only(&[1, 2], &[2, 1]), Some(vec![]));
        assert_eq!(removed_only(&[1], &[]), Some(vec![1]));
    }

    #[test]
    fn test_removed_only_needs_reload_for_new_clubs() {
        assert_eq!(removed_only(&[1, 2], &[1, 2, 4]), None);
        assert_eq!(removed_only(&[], &[7]), None);
    }

    #[test]
    fn test_forgetting_removed_clubs_keeps_the_rest() {
        let mut relations = ClubRelations::default();
        relations.set_joined(1, true);
        relations.set_following(2, true);
        relations.set_joined(3, true);

        let mut state = Loadable::Ready(relations);
        let removed = removed_only(&[1, 2, 3], &[1, 3]).unwrap_or_default();
        state.patch(|r| {
            for id in &removed {
                r.forget(*id);
            }
        });

        let relations = state.data().cloned().unwrap_or_default();
        assert!(relations.is_joined(1));
        assert!(!relations.is_following(2));
        assert!(relations.is_joined(3));
    }
}
