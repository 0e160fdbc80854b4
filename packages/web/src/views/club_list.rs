use dioxus::prelude::*;
use store::Loadable;
use ui::components::{ClubGrid, ErrorBanner, FilterBar, SortToggle};
use ui::hooks::{use_club_directory, use_club_relations};
use ui::use_session;

use crate::Route;

/// The club directory: search, tag and category filters, sort, and a card
/// per club.
#[component]
pub fn ClubList() -> Element {
    let directory = use_club_directory();
    let relations = use_club_relations(directory.loaded_ids());
    let session = use_session();
    let signed_in = session().session.is_some();

    let (formats, hosts) = directory.categories();
    let body = match &*directory.clubs.read() {
        Loadable::Idle | Loadable::Loading => rsx! {
            p { class: "muted", "Loading clubs..." }
        },
        Loadable::Failed(message) => rsx! {
            ErrorBanner { message: Some(message.clone()) }
        },
        Loadable::NotFound => rsx! {
            p { class: "empty-state", "No clubs found." }
        },
        Loadable::Ready(_) => {
            let clubs = directory.visible();
            let busy: Vec<i64> = clubs.iter().map(|c| c.id).filter(|id| relations.is_busy(*id)).collect();
            let deleting: Vec<i64> = clubs.iter().map(|c| c.id).filter(|id| directory.is_deleting(*id)).collect();
            rsx! {
                ClubGrid {
                    clubs,
                    relations: relations.current(),
                    signed_in,
                    busy,
                    deleting,
                    on_join: move |id| relations.toggle_join(id),
                    on_follow: move |id| relations.toggle_follow(id),
                    on_delete: move |id| directory.delete(id),
                    on_tag: move |tag| directory.set_tag(tag),
                }
            }
        }
    };

    rsx! {
        div {
            class: "page-header",
            h1 { "Clubs" }
            SortToggle {
                value: (directory.sort)(),
                on_change: move |key| directory.set_sort(key),
            }
            if signed_in {
                Link { class: "btn btn-primary", to: Route::CreateClub {}, "Create club" }
            }
        }
        FilterBar {
            search: (directory.search_input)(),
            filter: (directory.filter)(),
            tags: directory.tags(),
            formats,
            hosts,
            on_search: move |text| directory.set_search(text),
            on_tag: move |tag| directory.set_tag(tag),
            on_format: move |format| directory.set_format(format),
            on_host: move |host| directory.set_host(host),
        }
        {body}
    }
}
