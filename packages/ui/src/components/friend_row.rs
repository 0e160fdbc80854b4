use dioxus::prelude::*;
use store::Profile;

use super::{Button, ButtonVariant};

/// A profile in the friends list or in search results, with one action.
#[component]
pub fn FriendRow(
    profile: Profile,
    action_label: String,
    #[props(default)] busy: bool,
    #[props(default)] destructive: bool,
    on_action: EventHandler<Profile>,
) -> Element {
    let name = profile.display_name().to_string();
    let email = profile.email.clone().unwrap_or_default();
    let initial = name.chars().next().unwrap_or('?').to_uppercase().to_string();
    let avatar = profile.avatar_url.clone();

    rsx! {
        li {
            class: "friend-row",
            if let Some(url) = avatar {
                img { class: "avatar small", src: "{url}", alt: "{name}" }
            } else {
                span { class: "avatar small placeholder", "{initial}" }
            }
            div {
                class: "friend-row-text",
                span { class: "friend-name", "{name}" }
                if !email.is_empty() && email != name {
                    span { class: "friend-email", "{email}" }
                }
            }
            Button {
                variant: if destructive { ButtonVariant::Outline } else { ButtonVariant::Primary },
                disabled: busy,
                onclick: move |_| on_action.call(profile.clone()),
                "{action_label}"
            }
        }
    }
}
