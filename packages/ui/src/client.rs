//! The backend client, built once and shared through context.

use api::{BackendConfig, RestBackend};
use dioxus::prelude::*;
use store::{ClubHubConfig, Directory};

/// The directory every hook talks to.
pub type AppDirectory = Directory<RestBackend>;

/// Get the shared directory. Panics outside a [`ClientProvider`].
pub fn use_directory() -> Signal<AppDirectory> {
    use_context::<Signal<AppDirectory>>()
}

/// Builds the [`AppDirectory`] from the environment and provides it to
/// `children`. Renders a configuration error instead when the backend URL
/// or key is missing.
#[component]
pub fn ClientProvider(config: ClubHubConfig, children: Element) -> Element {
    let configured = use_hook(move || match BackendConfig::from_env() {
        Ok(backend_config) => {
            tracing::info!("Using backend at {}", backend_config.url);
            let backend = RestBackend::new(backend_config);
            provide_context(Signal::new(Directory::with_config(backend, config)));
            Ok(())
        }
        Err(e) => {
            tracing::error!("Backend is not configured: {e}");
            Err(e)
        }
    });

    match configured {
        Ok(()) => rsx! {
            {children}
        },
        Err(message) => rsx! {
            div {
                class: "config-error",
                h1 { "ClubHub is not configured" }
                p { "{message}" }
            }
        },
    }
}
