//! Platform timers for debouncing and periodic re-fetching.

use std::time::Duration;

use dioxus::prelude::*;

pub(crate) async fn sleep(duration: Duration) {
    #[cfg(target_arch = "wasm32")]
    gloo_timers::future::sleep(duration).await;
    #[cfg(not(target_arch = "wasm32"))]
    tokio::time::sleep(duration).await;
}

/// Call `tick` every `secs` seconds for the lifetime of the calling
/// component. `0` disables.
pub(crate) fn use_interval(secs: u32, mut tick: impl FnMut() + 'static) {
    use_hook(move || {
        if secs == 0 {
            return;
        }
        spawn(async move {
            loop {
                sleep(Duration::from_secs(u64::from(secs))).await;
                tick();
            }
        });
    });
}
