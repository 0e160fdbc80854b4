use dioxus::prelude::*;
use dioxus_free_icons::icons::fa_solid_icons::{FaBookmark, FaUsers};
use dioxus_free_icons::Icon;
use store::{Club, ClubRelations};

use super::{Button, ButtonVariant};

/// "1 Friend" / "N Friends", or nothing when no friend has joined.
pub fn friends_label(count: usize) -> Option<String> {
    match count {
        0 => None,
        1 => Some("1 Friend".to_string()),
        n => Some(format!("{n} Friends")),
    }
}

/// Clickable tag tokens. The `selected` chip is highlighted; clicking it
/// again clears the selection.
#[component]
pub fn TagChips(
    tags: Vec<String>,
    #[props(default)] selected: String,
    on_select: Option<EventHandler<String>>,
) -> Element {
    rsx! {
        div {
            class: "tag-chips",
            for tag in tags {
                {
                    let active = tag.eq_ignore_ascii_case(&selected);
                    let value = if active { String::new() } else { tag.clone() };
                    rsx! {
                        button {
                            key: "{tag}",
                            r#type: "button",
                            class: if active { "tag-chip active" } else { "tag-chip" },
                            disabled: on_select.is_none(),
                            onclick: move |_| {
                                if let Some(handler) = &on_select {
                                    handler.call(value.clone());
                                }
                            },
                            "{tag}"
                        }
                    }
                }
            }
        }
    }
}

/// One club with its membership controls.
///
/// Join/follow buttons only render for a signed-in viewer. `busy` disables
/// both while one of their requests is in flight.
#[component]
pub fn ClubCard(
    club: Club,
    #[props(default)] joined: bool,
    #[props(default)] following: bool,
    #[props(default)] friends_joined: usize,
    #[props(default)] signed_in: bool,
    #[props(default)] busy: bool,
    #[props(default)] deleting: bool,
    on_join: Option<EventHandler<i64>>,
    on_follow: Option<EventHandler<i64>>,
    on_delete: Option<EventHandler<i64>>,
    on_tag: Option<EventHandler<String>>,
) -> Element {
    let id = club.id;
    let tags = club.tag_list();
    let friends = friends_label(friends_joined);

    rsx! {
        article {
            class: "club-card",
            if !club.image_url.is_empty() {
                img { class: "club-card-image", src: "{club.image_url}", alt: "{club.name}" }
            }
            div {
                class: "club-card-body",
                Link {
                    class: "club-card-title",
                    to: format!("/clubs/{id}"),
                    "{club.name}"
                }
                p { class: "club-card-description", "{club.description}" }
                TagChips { tags, on_select: on_tag }
                if let Some(label) = friends {
                    p {
                        class: "club-card-friends",
                        Icon { icon: FaUsers, width: 12, height: 12 }
                        " {label}"
                    }
                }
            }
            if signed_in {
                div {
                    class: "club-card-actions",
                    Button {
                        variant: if joined { ButtonVariant::Outline } else { ButtonVariant::Primary },
                        disabled: busy,
                        onclick: move |_| {
                            if let Some(handler) = &on_join {
                                handler.call(id);
                            }
                        },
                        if joined { "Leave" } else { "Join" }
                    }
                    Button {
                        variant: ButtonVariant::Ghost,
                        disabled: busy,
                        onclick: move |_| {
                            if let Some(handler) = &on_follow {
                                handler.call(id);
                            }
                        },
                        Icon { icon: FaBookmark, width: 12, height: 12 }
                        if following { " Following" } else { " Follow" }
                    }
                    if let Some(handler) = on_delete {
                        Button {
                            variant: ButtonVariant::Destructive,
                            disabled: deleting,
                            onclick: move |_| handler.call(id),
                            if deleting { "Deleting..." } else { "Delete" }
                        }
                    }
                }
            }
        }
    }
}

/// A grid of [`ClubCard`]s backed by one batched relations lookup.
#[component]
pub fn ClubGrid(
    clubs: Vec<Club>,
    relations: ClubRelations,
    #[props(default)] signed_in: bool,
    /// Club ids with a join/follow request in flight.
    #[props(default)] busy: Vec<i64>,
    #[props(default)] deleting: Vec<i64>,
    #[props(default = "No clubs found.".to_string())] empty_text: String,
    on_join: Option<EventHandler<i64>>,
    on_follow: Option<EventHandler<i64>>,
    on_delete: Option<EventHandler<i64>>,
    on_tag: Option<EventHandler<String>>,
) -> Element {
    if clubs.is_empty() {
        return rsx! {
            p { class: "empty-state", "{empty_text}" }
        };
    }

    rsx! {
        div {
            class: "club-grid",
            for club in clubs {
                ClubCard {
                    key: "{club.id}",
                    joined: relations.is_joined(club.id),
                    following: relations.is_following(club.id),
                    friends_joined: relations.friends_joined(club.id),
                    busy: busy.contains(&club.id),
                    deleting: deleting.contains(&club.id),
                    signed_in,
                    on_join,
                    on_follow,
                    on_delete,
                    on_tag,
                    club: club.clone(),
                }
            }
        }
    }
}
