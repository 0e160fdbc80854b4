use dioxus::prelude::*;
use store::Loadable;
use ui::components::{ErrorBanner, FriendRow, Input};
use ui::hooks::use_friends;

use super::RequireSession;

#[component]
pub fn Friends() -> Element {
    rsx! {
        RequireSession { FriendsPanel {} }
    }
}

#[component]
fn FriendsPanel() -> Element {
    let friends = use_friends();

    let results = match &*friends.results.read() {
        Loadable::Idle => rsx! {},
        Loadable::Loading => rsx! {
            p { class: "muted", "Searching..." }
        },
        Loadable::Failed(message) => rsx! {
            ErrorBanner { message: Some(message.clone()) }
        },
        Loadable::NotFound => rsx! {
            p { class: "muted", "No matches." }
        },
        Loadable::Ready(found) if found.is_empty() => rsx! {
            p { class: "muted", "No matches." }
        },
        Loadable::Ready(found) => rsx! {
            ul {
                class: "friend-list",
                for profile in found.clone() {
                    FriendRow {
                        key: "{profile.id}",
                        busy: friends.is_busy(&profile.id),
                        action_label: "Add friend",
                        on_action: move |p| friends.add(p),
                        profile: profile.clone(),
                    }
                }
            }
        },
    };

    let list = match &*friends.friends.read() {
        Loadable::Ready(list) if list.is_empty() => rsx! {
            p { class: "empty-state", "No friends yet. Search above to add some." }
        },
        Loadable::Ready(list) => rsx! {
            ul {
                class: "friend-list",
                for profile in list.clone() {
                    FriendRow {
                        key: "{profile.id}",
                        busy: friends.is_busy(&profile.id),
                        destructive: true,
                        action_label: "Remove",
                        on_action: move |p: store::Profile| friends.remove(p.id),
                        profile: profile.clone(),
                    }
                }
            }
        },
        Loadable::Failed(message) => rsx! {
            ErrorBanner { message: Some(message.clone()) }
        },
        _ => rsx! {
            p { class: "muted", "Loading friends..." }
        },
    };

    rsx! {
        h1 { "Friends" }
        section {
            class: "friend-search",
            h2 { "Add friends" }
            Input {
                r#type: "search",
                placeholder: "Search by name or email",
                value: (friends.search_input)(),
                oninput: move |evt: FormEvent| friends.set_search(evt.value()),
            }
            {results}
        }
        section {
            h2 { "Your friends" }
            {list}
        }
    }
}
