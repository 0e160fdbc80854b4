//! Create and edit forms for a club.

use dioxus::prelude::*;
use store::{claim, ClubForm, ClubSaveError, ImageFile, Loadable};
use ui::components::{Button, ButtonVariant, ErrorBanner, ImageInput, Input, Label, Textarea};
use ui::hooks::use_club_detail;
use ui::use_directory;

use super::RequireSession;
use crate::Route;

/// Name, description and tags inputs shared by both forms.
#[component]
fn ClubFields(name: Signal<String>, description: Signal<String>, tags: Signal<String>) -> Element {
    rsx! {
        div {
            class: "field",
            Label { html_for: "club-name", "Name" }
            Input {
                id: "club-name",
                value: name(),
                oninput: move |evt: FormEvent| name.set(evt.value()),
            }
        }
        div {
            class: "field",
            Label { html_for: "club-description", "Description" }
            Textarea {
                id: "club-description",
                value: description(),
                oninput: move |evt: FormEvent| description.set(evt.value()),
            }
        }
        div {
            class: "field",
            Label { html_for: "club-tags", "Tags" }
            Input {
                id: "club-tags",
                placeholder: "games, strategy",
                value: tags(),
                oninput: move |evt: FormEvent| tags.set(evt.value()),
            }
        }
    }
}

fn log_save_error(e: &ClubSaveError) {
    if !matches!(e, ClubSaveError::Invalid(_)) {
        tracing::error!("Saving club failed: {e:?}");
    }
}

#[component]
pub fn CreateClub() -> Element {
    rsx! {
        RequireSession { CreateClubForm {} }
    }
}

#[component]
fn CreateClubForm() -> Element {
    let directory = use_directory();
    let nav = use_navigator();
    let name = use_signal(String::new);
    let description = use_signal(String::new);
    let tags = use_signal(String::new);
    let mut image = use_signal(|| Option::<ImageFile>::None);
    let mut error = use_signal(|| Option::<String>::None);
    let mut saving = use_signal(|| false);

    let submit = move |evt: FormEvent| {
        evt.prevent_default();
        if !claim(&mut saving.write()) {
            return;
        }
        error.set(None);
        let form = ClubForm::new(&name(), &description(), &tags());
        let picked = image();
        spawn(async move {
            let dir = directory.peek().clone();
            match dir.create_club(&form, picked.as_ref()).await {
                Ok(club) => {
                    nav.push(Route::ClubDetail { id: club.id });
                }
                Err(e) => {
                    log_save_error(&e);
                    error.set(Some(e.to_string()));
                    saving.set(false);
                }
            }
        });
    };

    rsx! {
        h1 { "Create a club" }
        form {
            class: "club-form",
            onsubmit: submit,
            ErrorBanner { message: error() }
            ClubFields { name, description, tags }
            div {
                class: "field",
                Label { html_for: "club-image", "Image" }
                ImageInput {
                    id: "club-image",
                    disabled: saving(),
                    on_pick: move |file| image.set(Some(file)),
                }
            }
            Button {
                variant: ButtonVariant::Primary,
                r#type: "submit",
                disabled: saving(),
                if saving() { "Creating..." } else { "Create club" }
            }
        }
    }
}

#[component]
pub fn EditClub(id: i64) -> Element {
    rsx! {
        RequireSession { EditClubForm { id } }
    }
}

#[component]
fn EditClubForm(id: i64) -> Element {
    let directory = use_directory();
    let nav = use_navigator();
    let club = use_club_detail(id);
    let mut name = use_signal(String::new);
    let mut description = use_signal(String::new);
    let mut tags = use_signal(String::new);
    let mut image_url = use_signal(String::new);
    let mut prefilled = use_signal(|| Option::<i64>::None);
    let mut error = use_signal(|| Option::<String>::None);
    let mut saving = use_signal(|| false);

    // Fill the form once per loaded club; a missing club goes back to the list
    use_effect(move || match &*club.read() {
        Loadable::Ready(c) if *prefilled.peek() != Some(c.id) => {
            name.set(c.name.clone());
            description.set(c.description.clone());
            tags.set(c.tags.clone());
            image_url.set(c.image_url.clone());
            prefilled.set(Some(c.id));
        }
        Loadable::NotFound => {
            nav.replace(Route::ClubList {});
        }
        _ => {}
    });

    let submit = move |evt: FormEvent| {
        evt.prevent_default();
        if !claim(&mut saving.write()) {
            return;
        }
        error.set(None);
        let form = ClubForm::new(&name(), &description(), &tags());
        let url = image_url();
        spawn(async move {
            let dir = directory.peek().clone();
            match dir.update_club(id, &form, &url).await {
                Ok(()) => {
                    nav.push(Route::ClubDetail { id });
                }
                Err(e) => {
                    log_save_error(&e);
                    error.set(Some(e.to_string()));
                    saving.set(false);
                }
            }
        });
    };

    if let Some(message) = club.read().error() {
        return rsx! {
            ErrorBanner { message: Some(message.to_string()) }
        };
    }
    if club.read().data().is_none() {
        return rsx! {
            p { class: "muted", "Loading..." }
        };
    }

    rsx! {
        h1 { "Edit club" }
        form {
            class: "club-form",
            onsubmit: submit,
            ErrorBanner { message: error() }
            ClubFields { name, description, tags }
            div {
                class: "field",
                Label { html_for: "club-image-url", "Image URL" }
                Input {
                    id: "club-image-url",
                    value: image_url(),
                    oninput: move |evt: FormEvent| image_url.set(evt.value()),
                }
            }
            div {
                class: "form-actions",
                Button {
                    variant: ButtonVariant::Primary,
                    r#type: "submit",
                    disabled: saving(),
                    if saving() { "Saving..." } else { "Save changes" }
                }
                Button {
                    variant: ButtonVariant::Outline,
                    onclick: move |_| {
                        nav.push(Route::ClubDetail { id });
                    },
                    "Cancel"
                }
            }
        }
    }
}
