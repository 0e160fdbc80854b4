use dioxus::prelude::*;
use store::Loadable;
use ui::components::{ClubGrid, ErrorBanner};
use ui::hooks::{use_club_relations, use_joined_clubs};

use super::RequireSession;

#[component]
pub fn JoinedClubs() -> Element {
    rsx! {
        RequireSession { JoinedClubList {} }
    }
}

#[component]
fn JoinedClubList() -> Element {
    let joined = use_joined_clubs();
    let relations = use_club_relations(joined.ids());

    let body = match &*joined.clubs.read() {
        Loadable::Ready(clubs) => {
            let busy: Vec<i64> = clubs.iter().map(|c| c.id).filter(|id| relations.is_busy(*id)).collect();
            rsx! {
                ClubGrid {
                    clubs: clubs.clone(),
                    relations: relations.current(),
                    signed_in: true,
                    busy,
                    empty_text: "You have not joined any clubs yet.",
                    on_join: move |id| relations.toggle_join(id),
                    on_follow: move |id| relations.toggle_follow(id),
                }
            }
        }
        Loadable::Failed(message) => rsx! {
            ErrorBanner { message: Some(message.clone()) }
        },
        _ => rsx! {
            p { class: "muted", "Loading your clubs..." }
        },
    };

    rsx! {
        h1 { "My clubs" }
        {body}
    }
}
