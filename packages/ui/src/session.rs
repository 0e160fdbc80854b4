//! Session context and hooks for the UI.
//!
//! On the web the session is kept in `localStorage` under
//! [`SESSION_STORAGE_KEY`] so a reload does not sign the user out.

use dioxus::prelude::*;
use store::Session;

use crate::client::use_directory;
use crate::timer::sleep;

pub const SESSION_STORAGE_KEY: &str = "clubhub.session";

/// Seconds between checks that the stored session is still valid.
const SESSION_CHECK_SECS: u64 = 60;

/// Session state for the application.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub session: Option<Session>,
    pub loading: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            session: None,
            loading: true,
        }
    }
}

impl SessionState {
    pub fn user_id(&self) -> Option<String> {
        self.session.as_ref().map(|s| s.user_id().to_string())
    }
}

/// Get the current session state.
/// Returns a signal that updates when the user signs in or out.
pub fn use_session() -> Signal<SessionState> {
    use_context::<Signal<SessionState>>()
}

/// Replace the session in `state` and persist it.
pub fn remember_session(state: &mut Signal<SessionState>, session: Option<Session>) {
    save_session(session.as_ref());
    state.set(SessionState {
        session,
        loading: false,
    });
}

/// Provider component that restores and tracks the session.
/// Must sit inside `ClientProvider`.
#[component]
pub fn SessionProvider(children: Element) -> Element {
    let directory = use_directory();
    let mut state = use_signal(SessionState::default);

    // Restore the persisted session on mount
    let _ = use_resource(move || async move {
        let dir = directory.peek().clone();
        if let Some(saved) = load_session() {
            dir.restore_session(saved);
        }
        let session = dir.session().await;
        remember_session(&mut state, session);
    });

    // Periodic check so an expired session signs the user out
    use_effect(move || {
        spawn(async move {
            loop {
                sleep(std::time::Duration::from_secs(SESSION_CHECK_SECS)).await;

                if state.peek().loading {
                    continue;
                }
                let dir = directory.peek().clone();
                let session = dir.session().await;
                if state.peek().session != session {
                    remember_session(&mut state, session);
                }
            }
        });
    });

    use_context_provider(|| state);

    rsx! {
        {children}
    }
}

/// Button to sign the current user out.
#[component]
pub fn LogoutButton(
    #[props(default = "Log out".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
    /// Called once the session is cleared, e.g. to navigate to the login page.
    on_signed_out: EventHandler<()>,
) -> Element {
    let directory = use_directory();
    let mut state = use_session();
    let mut busy = use_signal(|| false);

    let onclick = move |_| async move {
        busy.set(true);
        let dir = directory.peek().clone();
        if let Err(e) = dir.sign_out().await {
            tracing::error!("Sign-out request failed: {e}");
        }
        remember_session(&mut state, None);
        busy.set(false);
        on_signed_out.call(());
    };

    rsx! {
        button {
            class: "{class}",
            disabled: busy(),
            onclick: onclick,
            "{label}"
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

#[cfg(target_arch = "wasm32")]
fn load_session() -> Option<Session> {
    let raw = local_storage()?.get_item(SESSION_STORAGE_KEY).ok().flatten()?;
    match serde_json::from_str(&raw) {
        Ok(session) => Some(session),
        Err(e) => {
            tracing::warn!("Discarding unreadable stored session: {e}");
            None
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn save_session(session: Option<&Session>) {
    let Some(storage) = local_storage() else {
        return;
    };
    let result = match session.map(serde_json::to_string) {
        Some(Ok(raw)) => storage.set_item(SESSION_STORAGE_KEY, &raw),
        Some(Err(e)) => {
            tracing::warn!("Could not serialize session: {e}");
            return;
        }
        None => storage.remove_item(SESSION_STORAGE_KEY),
    };
    if result.is_err() {
        tracing::warn!("Could not update the stored session");
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn load_session() -> Option<Session> {
    None
}

#[cfg(not(target_arch = "wasm32"))]
fn save_session(_session: Option<&Session>) {}
