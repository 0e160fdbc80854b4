//! # View state shared by every screen
//!
//! Plain data types the UI hooks keep inside signals. They carry no async
//! code, so the transitions the screens rely on are tested here directly.
//!
//! - [`Loadable`]: the loading/data/error state of one fetch. Starting a
//!   load always replaces whatever was shown before with
//!   [`Loadable::Loading`]; the response then moves it to `Ready`,
//!   `NotFound` or `Failed`. A stale error never survives a new load.
//! - [`PendingSet`]: keys of mutations in flight, used to disable the
//!   control that started them until the request settles.
//! - [`ClubRelations`]: the viewer's joined/following flags and the
//!   friends-joined counts for the clubs on screen.

use std::collections::{HashMap, HashSet};
use std::fmt::Display;

/// State of one remote fetch.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Loadable<T> {
    /// Nothing requested yet (e.g. no session).
    #[default]
    Idle,
    Loading,
    Ready(T),
    /// A single-row fetch found no row.
    NotFound,
    /// User-facing message; the cause has already been logged.
    Failed(String),
}

impl<T> Loadable<T> {
    /// `Ok` → `Ready`, `Err` → `Failed(message)`.
    pub fn from_result<E: Display>(result: Result<T, E>, message: &str) -> Self {
        match result {
            Ok(data) => Loadable::Ready(data),
            Err(_) => Loadable::Failed(message.to_string()),
        }
    }

    /// Like [`from_result`](Self::from_result) but `Ok(None)` → `NotFound`.
    pub fn from_optional<E: Display>(result: Result<Option<T>, E>, message: &str) -> Self {
        match result {
            Ok(Some(data)) => Loadable::Ready(data),
            Ok(None) => Loadable::NotFound,
            Err(_) => Loadable::Failed(message.to_string()),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Loadable::Loading)
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Loadable::NotFound)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Loadable::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn data_mut(&mut self) -> Option<&mut T> {
        match self {
            Loadable::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Loadable::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Apply `patch` to the data if loaded. Returns whether it ran.
    pub fn patch(&mut self, patch: impl FnOnce(&mut T)) -> bool {
        match self.data_mut() {
            Some(data) => {
                patch(data);
                true
            }
            None => false,
        }
    }
}

/// Keys of mutations currently in flight.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PendingSet {
    keys: HashSet<String>,
}

impl PendingSet {
    /// Mark `key` in flight. `false` if it already was; the caller should
    /// then drop the duplicate request.
    pub fn begin(&mut self, key: impl Into<String>) -> bool {
        self.keys.insert(key.into())
    }

    pub fn finish(&mut self, key: &str) {
        self.keys.remove(key);
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Raise a single-flight flag such as a form's `saving`. `false` if it was
/// already raised; the caller should then drop the duplicate submit.
pub fn claim(flag: &mut bool) -> bool {
    !std::mem::replace(flag, true)
}

/// Viewer-relative state of a set of clubs.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ClubRelations {
    joined: HashSet<i64>,
    following: HashSet<i64>,
    friends_joined: HashMap<i64, usize>,
}

impl ClubRelations {
    pub fn new(
        joined: impl IntoIterator<Item = i64>,
        following: impl IntoIterator<Item = i64>,
        friends_joined: HashMap<i64, usize>,
    ) -> Self {
        Self {
            joined: joined.into_iter().collect(),
            following: following.into_iter().collect(),
            friends_joined,
        }
    }

    pub fn is_joined(&self, club_id: i64) -> bool {
        self.joined.contains(&club_id)
    }

    pub fn is_following(&self, club_id: i64) -> bool {
        self.following.contains(&club_id)
    }

    pub fn friends_joined(&self, club_id: i64) -> usize {
        self.friends_joined.get(&club_id).copied().unwrap_or(0)
    }

    pub fn set_joined(&mut self, club_id: i64, joined: bool) {
        if joined {
            self.joined.insert(club_id);
        } else {
            self.joined.remove(&club_id);
        }
    }

    pub fn set_following(&mut self, club_id: i64, following: bool) {
        if following {
            self.following.insert(club_id);
        } else {
            self.following.remove(&club_id);
        }
    }

    /// Drop everything known about a deleted club.
    pub fn forget(&mut self, club_id: i64) {
        self.joined.remove(&club_id);
        self.following.remove(&club_id);
        self.friends_joined.remove(&club_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_load_replaces_stale_error() {
        let mut state: Loadable<Vec<i32>> = Loadable::from_result(Err::<Vec<i32>, _>("boom"), "Could not load clubs.");
        assert_eq!(state.error(), Some("Could not load clubs."));
        assert!(state.data().is_none());

        state = Loadable::Loading;
        assert!(state.is_loading());
        assert!(state.error().is_none());

        state = Loadable::from_result(Ok::<_, String>(vec![1, 2]), "Could not load clubs.");
        assert_eq!(state.data(), Some(&vec![1, 2]));
        assert!(state.error().is_none());
    }

    #[test]
    fn test_failed_load_exposes_no_data() {
        let state: Loadable<Vec<i32>> = Loadable::from_result(Err::<Vec<i32>, _>("x"), "msg");
        assert!(state.data().is_none());
        assert!(!state.is_loading());
    }

    #[test]
    fn test_from_optional_distinguishes_not_found() {
        let found = Loadable::from_optional(Ok::<_, String>(Some(5)), "msg");
        assert_eq!(found, Loadable::Ready(5));
        let missing = Loadable::<i32>::from_optional(Ok::<_, String>(None), "msg");
        assert!(missing.is_not_found());
        assert!(missing.error().is_none());
        let failed = Loadable::<i32>::from_optional(Err::<Option<i32>, _>("x"), "msg");
        assert_eq!(failed.error(), Some("msg"));
    }

    #[test]
    fn test_patch_only_applies_to_loaded_data() {
        let mut ready = Loadable::Ready(vec![1, 2, 3]);
        assert!(ready.patch(|v| v.retain(|&x| x != 2)));
        assert_eq!(ready, Loadable::Ready(vec![1, 3]));

        let mut loading: Loadable<Vec<i32>> = Loadable::Loading;
        assert!(!loading.patch(|v| v.push(9)));
        assert_eq!(loading, Loadable::Loading);
    }

    #[test]
    fn test_claim_lets_one_submit_through() {
        let mut saving = false;
        assert!(claim(&mut saving));
        assert!(saving);
        // second click before the first request resolves
        assert!(!claim(&mut saving));
        assert!(saving);

        saving = false;
        assert!(claim(&mut saving));
    }

    #[test]
    fn test_pending_set_rejects_duplicate_submission() {
        let mut pending = PendingSet::default();
        assert!(pending.begin("join:7"));
        assert!(!pending.begin("join:7"));
        assert!(pending.begin("follow:7"));
        assert!(pending.contains("join:7"));

        pending.finish("join:7");
        assert!(!pending.contains("join:7"));
        assert!(pending.begin("join:7"));
    }

    #[test]
    fn test_join_then_leave_restores_state() {
        let original = ClubRelations::new([1], [2], HashMap::from([(1, 3)]));
        let mut relations = original.clone();

        relations.set_joined(5, !relations.is_joined(5));
        assert!(relations.is_joined(5));
        relations.set_joined(5, !relations.is_joined(5));
        assert_eq!(relations, original);

        relations.set_following(2, !relations.is_following(2));
        relations.set_following(2, !relations.is_following(2));
        assert_eq!(relations, original);
    }

    #[test]
    fn test_forget_clears_club() {
        let mut relations = ClubRelations::new([1], [1], HashMap::from([(1, 2)]));
        relations.forget(1);
        assert!(!relations.is_joined(1));
        assert!(!relations.is_following(1));
        assert_eq!(relations.friends_joined(1), 0);
    }
}
