use dioxus::prelude::*;

use store::ClubHubConfig;
use ui::{ClientProvider, SessionProvider};
use views::{
    About, CalendarPage, ClubDetail, ClubList, CreateClub, EditClub, Friends, Home, JoinedClubs,
    Login, NavLayout, ProfilePage, Register,
};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(NavLayout)]
        #[route("/")]
        Home {},
        #[route("/login")]
        Login {},
        #[route("/register")]
        Register {},
        #[route("/clubs")]
        ClubList {},
        #[route("/clubs/new")]
        CreateClub {},
        #[route("/clubs/:id")]
        ClubDetail { id: i64 },
        #[route("/clubs/:id/edit")]
        EditClub { id: i64 },
        #[route("/joined")]
        JoinedClubs {},
        #[route("/friends")]
        Friends {},
        #[route("/profile")]
        ProfilePage {},
        #[route("/calendar")]
        CalendarPage {},
        #[route("/about")]
        About {},
}

const FAVICON: Asset = asset!("/assets/favicon.svg");
const MAIN_CSS: Asset = asset!("/assets/main.css");
const CONFIG_TOML: &str = include_str!("../clubhub.toml");

fn main() {
    dioxus::launch(App);
}

/// Settings bundled at build time; defaults when the file does not parse.
fn app_config() -> ClubHubConfig {
    ClubHubConfig::from_toml(CONFIG_TOML).unwrap_or_else(|e| {
        tracing::error!("Ignoring invalid clubhub.toml: {e}");
        ClubHubConfig::default()
    })
}

#[component]
fn App() -> Element {
    let config = use_hook(app_config);

    rsx! {
        // Global app resources
        document::Link { rel: "icon", href: FAVICON }
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        ClientProvider {
            config,
            SessionProvider {
                Router::<Route> {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_config_parses() {
        let config = ClubHubConfig::from_toml(CONFIG_TOML).unwrap();
        assert_eq!(config, ClubHubConfig::default());
    }
}
