use dioxus::prelude::*;
use store::{ImageFile, Loadable, Profile, ProfileUpdate};

use crate::client::{use_directory, AppDirectory};
use crate::hooks::load_into;
use crate::session::{use_session, SessionState};

/// The signed-in user's own profile.
#[derive(Clone, Copy, PartialEq)]
pub struct ProfileHandle {
    pub profile: Signal<Loadable<Profile>>,
    pub saving: Signal<bool>,
    /// Outcome of the last save or upload.
    pub notice: Signal<Option<String>>,
    directory: Signal<AppDirectory>,
    session: Signal<SessionState>,
}

/// Load the profile, inserting a default row the first time.
pub fn use_profile() -> ProfileHandle {
    let directory = use_directory();
    let session = use_session();
    let mut profile = use_signal(|| Loadable::Idle);
    let saving = use_signal(|| false);
    let notice = use_signal(|| None);

    let _ = use_resource(move || {
        let current = session().session;
        async move {
            let Some(current) = current else {
                profile.set(Loadable::Idle);
                return;
            };
            let dir = directory.peek().clone();
            load_into(
                profile,
                "Could not load your profile.",
                dir.load_or_create_profile(&current),
            )
            .await;
        }
    });

    ProfileHandle {
        profile,
        saving,
        notice,
        directory,
        session,
    }
}

impl ProfileHandle {
    /// Save display name and bio.
    pub fn save(&self, full_name: String, bio: String) {
        let Some(user) = self.session.peek().user_id() else {
            return;
        };
        let mut saving = self.saving;
        if *saving.peek() {
            return;
        }
        saving.set(true);

        let update = ProfileUpdate {
            full_name: Some(full_name.trim().to_string()),
            bio: Some(bio.trim().to_string()),
            avatar_url: None,
        };
        let dir = self.directory.peek().clone();
        let mut profile = self.profile;
        let mut notice = self.notice;
        spawn(async move {
            match dir.update_profile(&user, &update).await {
                Ok(updated) => {
                    profile.set(Loadable::Ready(updated));
                    notice.set(Some("Profile saved.".to_string()));
                }
                Err(e) => {
                    tracing::error!("Failed to save profile: {e}");
                    notice.set(Some("Could not save your profile.".to_string()));
                }
            }
            saving.set(false);
        });
    }

    pub fn upload_avatar(&self, image: ImageFile) {
        let Some(user) = self.session.peek().user_id() else {
            return;
        };
        let mut saving = self.saving;
        if *saving.peek() {
            return;
        }
        saving.set(true);

        let dir = self.directory.peek().clone();
        let mut profile = self.profile;
        let mut notice = self.notice;
        spawn(async move {
            match dir.upload_avatar(&user, &image).await {
                Ok(url) => {
                    profile.write().patch(|p| p.avatar_url = Some(url));
                    notice.set(None);
                }
                Err(e) => {
                    tracing::error!("Avatar upload failed: {e}");
                    notice.set(Some("Image upload failed.".to_string()));
                }
            }
            saving.set(false);
        });
    }
}
