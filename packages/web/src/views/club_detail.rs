use dioxus::prelude::*;
use store::{Club, Loadable};
use ui::components::{friends_label, Button, ButtonVariant, ErrorBanner, TagChips};
use ui::hooks::{use_club_detail, use_club_relations, ClubRelationsHandle};
use ui::{use_directory, use_session};

use crate::Route;

#[component]
pub fn ClubDetail(id: i64) -> Element {
    let club = use_club_detail(id);
    let relations = use_club_relations(vec![id]);

    let view = match &*club.read() {
        Loadable::Idle | Loadable::Loading => rsx! {
            p { class: "muted", "Loading..." }
        },
        Loadable::NotFound => rsx! {
            div {
                class: "not-found",
                h1 { "Club not found" }
                Link { to: Route::ClubList {}, "Back to clubs" }
            }
        },
        Loadable::Failed(message) => rsx! {
            ErrorBanner { message: Some(message.clone()) }
        },
        Loadable::Ready(c) => rsx! {
            ClubInfo { club: c.clone(), relations }
        },
    };
    view
}

#[component]
fn ClubInfo(club: Club, relations: ClubRelationsHandle) -> Element {
    let directory = use_directory();
    let session = use_session();
    let nav = use_navigator();
    let mut deleting = use_signal(|| false);
    let id = club.id;

    let signed_in = session().session.is_some();
    let current = relations.current();
    let joined = current.is_joined(id);
    let following = current.is_following(id);
    let busy = relations.is_busy(id);
    let friends = friends_label(current.friends_joined(id));

    let delete = move |_| {
        if deleting() {
            return;
        }
        deleting.set(true);
        spawn(async move {
            let dir = directory.peek().clone();
            match dir.delete_club(id).await {
                Ok(()) => {
                    nav.push(Route::ClubList {});
                }
                Err(e) => {
                    tracing::error!("Failed to delete club {id}: {e}");
                    deleting.set(false);
                }
            }
        });
    };

    rsx! {
        article {
            class: "club-detail",
            if !club.image_url.is_empty() {
                img { class: "club-detail-image", src: "{club.image_url}", alt: "{club.name}" }
            }
            h1 { "{club.name}" }
            p { class: "club-detail-description", "{club.description}" }
            TagChips { tags: club.tag_list() }
            if let Some(format) = club.format.clone() {
                p { class: "muted", "Format: {format}" }
            }
            if let Some(host) = club.host.clone() {
                p { class: "muted", "Hosted by {host}" }
            }
            if let Some(label) = friends {
                p { class: "club-card-friends", "{label}" }
            }
            if signed_in {
                div {
                    class: "club-card-actions",
                    Button {
                        variant: if joined { ButtonVariant::Outline } else { ButtonVariant::Primary },
                        disabled: busy,
                        onclick: move |_| relations.toggle_join(id),
                        if joined { "Leave" } else { "Join" }
                    }
                    Button {
                        variant: ButtonVariant::Ghost,
                        disabled: busy,
                        onclick: move |_| relations.toggle_follow(id),
                        if following { "Following" } else { "Follow" }
                    }
                    Link { class: "btn btn-outline", to: Route::EditClub { id }, "Edit" }
                    Button {
                        variant: ButtonVariant::Destructive,
                        disabled: deleting(),
                        onclick: delete,
                        if deleting() { "Deleting..." } else { "Delete" }
                    }
                }
            }
        }
    }
}
