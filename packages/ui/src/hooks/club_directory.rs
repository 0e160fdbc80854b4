use std::time::Duration;

use dioxus::prelude::*;
use store::{filter_clubs, unique_tags, Club, ClubFilter, Loadable, PendingSet, SortKey};

use crate::client::{use_directory, AppDirectory};
use crate::hooks::{load_into, refresh_into};
use crate::session::use_session;
use crate::timer::{sleep, use_interval};

const LOAD_ERROR: &str = "Could not load clubs.";

/// State of the club directory screen.
#[derive(Clone, Copy, PartialEq)]
pub struct ClubDirectory {
    pub clubs: Signal<Loadable<Vec<Club>>>,
    pub sort: Signal<SortKey>,
    /// Text in the search box.
    pub search_input: Signal<String>,
    /// Filter applied to the list. Its `search` trails `search_input` by the
    /// debounce delay.
    pub filter: Signal<ClubFilter>,
    pub pending: Signal<PendingSet>,
    directory: Signal<AppDirectory>,
    debounce_ms: u32,
}

/// Load every club, ordered by the current sort key. Re-fetches when the
/// sort key or the signed-in user changes, and on the refresh interval.
pub fn use_club_directory() -> ClubDirectory {
    let directory = use_directory();
    let session = use_session();
    let clubs = use_signal(|| Loadable::Idle);
    let sort = use_signal(SortKey::default);
    let search_input = use_signal(String::new);
    let filter = use_signal(ClubFilter::default);
    let pending = use_signal(PendingSet::default);
    let config = directory.peek().config().directory.clone();

    let _ = use_resource(move || {
        let sort = sort();
        let _user = session().user_id();
        async move {
            let dir = directory.peek().clone();
            load_into(clubs, LOAD_ERROR, dir.list_clubs(sort)).await;
        }
    });

    let handle = ClubDirectory {
        clubs,
        sort,
        search_input,
        filter,
        pending,
        directory,
        debounce_ms: config.search_debounce_ms,
    };
    use_interval(config.refresh_interval_secs, move || handle.refresh());
    handle
}

fn delete_key(club_id: i64) -> String {
    format!("delete:{club_id}")
}

impl ClubDirectory {
    /// Loaded clubs that pass the current filter, in backend order.
    pub fn visible(&self) -> Vec<Club> {
        let filter = self.filter.read();
        self.clubs
            .read()
            .data()
            .map(|clubs| filter_clubs(clubs, &filter))
            .unwrap_or_default()
    }

    /// Ids of every loaded club, filtered or not.
    pub fn loaded_ids(&self) -> Vec<i64> {
        self.clubs
            .read()
            .data()
            .map(|clubs| clubs.iter().map(|c| c.id).collect())
            .unwrap_or_default()
    }

    /// Distinct tags across the loaded clubs.
    pub fn tags(&self) -> Vec<String> {
        self.clubs
            .read()
            .data()
            .map(|clubs| unique_tags(clubs.iter().map(|c| c.tags.as_str())))
            .unwrap_or_default()
    }

    /// Distinct meeting formats and hosts across the loaded clubs, sorted.
    pub fn categories(&self) -> (Vec<String>, Vec<String>) {
        let clubs = self.clubs.read();
        let Some(clubs) = clubs.data() else {
            return (Vec::new(), Vec::new());
        };
        let collect = |field: fn(&Club) -> Option<&String>| {
            let mut values: Vec<String> = clubs.iter().filter_map(field).cloned().collect();
            values.sort();
            values.dedup();
            values
        };
        (collect(|c| c.format.as_ref()), collect(|c| c.host.as_ref()))
    }

    pub fn set_search(&self, text: String) {
        let mut input = self.search_input;
        let mut filter = self.filter;
        let delay = Duration::from_millis(u64::from(self.debounce_ms));
        input.set(text.clone());
        spawn(async move {
            sleep(delay).await;
            // a later keystroke supersedes this one
            if *input.peek() == text {
                filter.write().search = text;
            }
        });
    }

    /// Select a tag chip; the empty string clears the tag filter.
    pub fn set_tag(&self, tag: String) {
        let mut filter = self.filter;
        filter.write().tag = tag;
    }

    /// Empty clears the format filter.
    pub fn set_format(&self, format: String) {
        let mut filter = self.filter;
        filter.write().format = format;
    }

    pub fn set_host(&self, host: String) {
        let mut filter = self.filter;
        filter.write().host = host;
    }

    pub fn set_sort(&self, key: SortKey) {
        let mut sort = self.sort;
        if *sort.peek() != key {
            sort.set(key);
        }
    }

    /// Re-fetch without passing through `Loading`.
    pub fn refresh(&self) {
        let dir = self.directory.peek().clone();
        let sort = *self.sort.peek();
        let clubs = self.clubs;
        spawn(async move {
            refresh_into(clubs, "clubs", dir.list_clubs(sort)).await;
        });
    }

    pub fn is_deleting(&self, club_id: i64) -> bool {
        self.pending.read().contains(&delete_key(club_id))
    }

    /// Delete a club and drop it from the loaded list once the backend agrees.
    pub fn delete(&self, club_id: i64) {
        let key = delete_key(club_id);
        let mut pending = self.pending;
        if !pending.write().begin(key.clone()) {
            return;
        }
        let dir = self.directory.peek().clone();
        let mut clubs = self.clubs;
        spawn(async move {
            match dir.delete_club(club_id).await {
                Ok(()) => {
                    clubs.write().patch(|list| list.retain(|c| c.id != club_id));
                }
                Err(e) => tracing::error!("Failed to delete club {club_id}: {e}"),
            }
            pending.write().finish(&key);
        });
    }
}
