use dioxus::prelude::*;
use store::Profile;

/// Avatar, name, email and bio of a profile.
#[component]
pub fn ProfileCard(profile: Profile) -> Element {
    let name = profile.display_name().to_string();
    let initial = name.chars().next().unwrap_or('?').to_uppercase().to_string();

    rsx! {
        div {
            class: "profile-card",
            if let Some(url) = profile.avatar_url.clone() {
                img { class: "avatar large", src: "{url}", alt: "{name}" }
            } else {
                span { class: "avatar large placeholder", "{initial}" }
            }
            h2 { "{name}" }
            if let Some(email) = profile.email.clone() {
                p { class: "profile-email", "{email}" }
            }
            if let Some(bio) = profile.bio.clone().filter(|b| !b.trim().is_empty()) {
                p { class: "profile-bio", "{bio}" }
            }
        }
    }
}
