use dioxus::prelude::*;
use store::Loadable;
use ui::components::{Button, ButtonVariant, ErrorBanner, ImageInput, Input, Label, ProfileCard, Textarea};
use ui::hooks::use_profile;

use super::RequireSession;

#[component]
pub fn ProfilePage() -> Element {
    rsx! {
        RequireSession { ProfileEditor {} }
    }
}

#[component]
fn ProfileEditor() -> Element {
    let handle = use_profile();
    let mut full_name = use_signal(String::new);
    let mut bio = use_signal(String::new);
    let mut prefilled = use_signal(|| false);

    use_effect(move || {
        if let Loadable::Ready(p) = &*handle.profile.read() {
            if !*prefilled.peek() {
                full_name.set(p.full_name.clone().unwrap_or_default());
                bio.set(p.bio.clone().unwrap_or_default());
                prefilled.set(true);
            }
        }
    });

    let profile = match &*handle.profile.read() {
        Loadable::Ready(p) => p.clone(),
        Loadable::Failed(message) => {
            return rsx! {
                ErrorBanner { message: Some(message.clone()) }
            };
        }
        _ => {
            return rsx! {
                p { class: "muted", "Loading your profile..." }
            };
        }
    };
    let saving = (handle.saving)();

    rsx! {
        h1 { "Profile" }
        ProfileCard { profile }
        if let Some(notice) = (handle.notice)() {
            p { class: "notice", "{notice}" }
        }
        form {
            class: "profile-form",
            onsubmit: move |evt: FormEvent| {
                evt.prevent_default();
                handle.save(full_name(), bio());
            },
            div {
                class: "field",
                Label { html_for: "profile-avatar", "Avatar" }
                ImageInput {
                    id: "profile-avatar",
                    disabled: saving,
                    on_pick: move |file| handle.upload_avatar(file),
                }
            }
            div {
                class: "field",
                Label { html_for: "profile-name", "Display name" }
                Input {
                    id: "profile-name",
                    value: full_name(),
                    oninput: move |evt: FormEvent| full_name.set(evt.value()),
                }
            }
            div {
                class: "field",
                Label { html_for: "profile-bio", "Bio" }
                Textarea {
                    id: "profile-bio",
                    value: bio(),
                    oninput: move |evt: FormEvent| bio.set(evt.value()),
                }
            }
            Button {
                variant: ButtonVariant::Primary,
                r#type: "submit",
                disabled: saving,
                if saving { "Saving..." } else { "Save profile" }
            }
        }
    }
}
