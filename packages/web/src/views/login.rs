//! Login page view with email/password form.

use dioxus::prelude::*;
use store::claim;
use ui::components::{Button, ButtonVariant, ErrorBanner, Input};
use ui::{remember_session, use_directory, use_session};

use crate::Route;

#[component]
pub fn Login() -> Element {
    let directory = use_directory();
    let mut session = use_session();
    let nav = use_navigator();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    // If already logged in, go to the directory
    if !session().loading && session().session.is_some() {
        nav.replace(Route::ClubList {});
    }

    let handle_login = move |evt: FormEvent| {
        evt.prevent_default();
        if !claim(&mut loading.write()) {
            return;
        }
        error.set(None);
        spawn(async move {
            let dir = directory.peek().clone();
            match dir.sign_in(&email(), &password()).await {
                Ok(signed_in) => {
                    tracing::info!("Signed in as {}", signed_in.user_id());
                    remember_session(&mut session, Some(signed_in));
                    nav.push(Route::ClubList {});
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
            h1 { "Welcome back" }
            p { class: "muted", "Log in to ClubHub" }

            form {
                class: "auth-form",
                onsubmit: handle_login,

                ErrorBanner { message: error() }

                Input {
                    r#type: "email",
                    placeholder: "Email",
                    value: email(),
                    oninput: move |evt: FormEvent| email.set(evt.value()),
                }
                Input {
                    r#type: "password",
                    placeholder: "Password",
                    value: password(),
                    oninput: move |evt: FormEvent| password.set(evt.value()),
                }
                Button {
                    variant: ButtonVariant::Primary,
                    r#type: "submit",
                    disabled: loading(),
                    if loading() { "Logging in..." } else { "Log in" }
                }
            }

            p {
                class: "muted",
                "No account yet? "
                Link { to: Route::Register {}, "Sign up" }
            }
        }
    }
}
