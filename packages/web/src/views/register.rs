//! Registration page view with email/password form.

use dioxus::prelude::*;
use store::{claim, Registration};
use ui::components::{Button, ButtonVariant, ErrorBanner, Input};
use ui::use_directory;

use crate::Route;

#[component]
pub fn Register() -> Element {
    let directory = use_directory();
    let nav = use_navigator();
    let mut name = use_signal(String::new);
    let mut username = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    let handle_register = move |evt: FormEvent| {
        evt.prevent_default();
        if *loading.peek() {
            return;
        }
        error.set(None);
        let form = Registration {
            name: name(),
            username: username(),
            email: email(),
            password: password(),
        };
        if let Err(e) = form.validate() {
            error.set(Some(e.to_string()));
            return;
        }
        if !claim(&mut loading.write()) {
            return;
        }
        spawn(async move {
            let dir = directory.peek().clone();
            match dir.sign_up(&form).await {
                Ok(_) => {
                    nav.push(Route::Login {});
                }
                Err(e) => {
                    loading.set(false);
                    error.set(Some(e.to_string()));
                }
            }
        });
    };

    rsx! {
        div {
            class: "auth-page",
            h1 { "Create Account" }
            p { class: "muted", "Sign up for ClubHub" }

            form {
                class: "auth-form",
                onsubmit: handle_register,

                ErrorBanner { message: error() }

                Input {
                    placeholder: "Name",
                    value: name(),
                    oninput: move |evt: FormEvent| name.set(evt.value()),
                }
                Input {
                    placeholder: "Username",
                    value: username(),
                    oninput: move |evt: FormEvent| username.set(evt.value()),
                }
                Input {
                    r#type: "email",
                    placeholder: "Email",
                    value: email(),
                    oninput: move |evt: FormEvent| email.set(evt.value()),
                }
                Input {
                    r#type: "password",
                    placeholder: "Password (min 6 characters)",
                    value: password(),
                    oninput: move |evt: FormEvent| password.set(evt.value()),
                }
                Button {
                    variant: ButtonVariant::Primary,
                    r#type: "submit",
                    disabled: loading(),
                    if loading() { "Creating account..." } else { "Sign up" }
                }
            }

            p {
                class: "muted",
                "Already have an account? "
                Link { to: Route::Login {}, "Log in" }
            }
        }
    }
}
