//! # Application configuration: `clubhub.toml`
//!
//! Tunables for the client that are not secrets. The backend URL and key
//! live in the environment instead (see `api::BackendConfig`).
//!
//! ## Structure
//!
//! ```toml
//! [directory]
//! search_debounce_ms = 200      # delay before a search box hits the list
//! refresh_interval_secs = 30    # re-fetch period for list screens, 0 disables
//!
//! [friends]
//! min_search_len = 2
//! search_limit = 10
//!
//! [storage]
//! club_images_bucket = "club-images"
//! avatars_bucket = "avatars"
//! cache_control_secs = 3600
//! ```
//!
//! ## Types
//!
//! | Struct | Purpose |
//! |--------|---------|
//! | [`ClubHubConfig`] | Top-level config with builder helpers, TOML (de)serialisation and the canonical filename. |
//! | [`DirectoryConfig`] | Search debounce and the reconciliation re-fetch interval. |
//! | [`FriendsConfig`] | Profile-search thresholds. |
//! | [`StorageConfig`] | Bucket names and the cache-control sent with club images. |
//!
//! Every field has a serde default, so a missing or empty file is the
//! default configuration.

use serde::{Deserialize, Serialize};

/// Top-level configuration stored in `clubhub.toml`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ClubHubConfig {
    #[serde(default)]
    pub directory: DirectoryConfig,
    #[serde(default)]
    pub friends: FriendsConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DirectoryConfig {
    #[serde(default = "default_search_debounce")]
    pub search_debounce_ms: u32,
    /// Re-fetch period in seconds. 0 disables.
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_secs: u32,
}

fn default_search_debounce() -> u32 {
    200
}

fn default_refresh_interval() -> u32 {
    30
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            search_debounce_ms: default_search_debounce(),
            refresh_interval_secs: default_refresh_interval(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FriendsConfig {
    /// Shorter search terms return no results without a request.
    #[serde(default = "default_min_search_len")]
    pub min_search_len: usize,
    #[serde(default = "default_search_limit")]
    pub search_limit: usize,
}

fn default_min_search_len() -> usize {
    2
}

fn default_search_limit() -> usize {
    10
}

impl Default for FriendsConfig {
    fn default() -> Self {
        Self {
            min_search_len: default_min_search_len(),
            search_limit: default_search_limit(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_club_images_bucket")]
    pub club_images_bucket: String,
    #[serde(default = "default_avatars_bucket")]
    pub avatars_bucket: String,
    #[serde(default = "default_cache_control")]
    pub cache_control_secs: u32,
}

fn default_club_images_bucket() -> String {
    "club-images".to_string()
}

fn default_avatars_bucket() -> String {
    "avatars".to_string()
}

fn default_cache_control() -> u32 {
    3600
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            club_images_bucket: default_club_images_bucket(),
            avatars_bucket: default_avatars_bucket(),
            cache_control_secs: default_cache_control(),
        }
    }
}

impl ClubHubConfig {
    /// Builder method to set the list re-fetch interval.
    pub fn with_refresh_interval(mut self, secs: u32) -> Self {
        self.directory.refresh_interval_secs = secs;
        self
    }

    /// Builder method to set the search debounce.
    pub fn with_search_debounce(mut self, ms: u32) -> Self {
        self.directory.search_debounce_ms = ms;
        self
    }

    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "clubhub.toml"
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClubHubConfig::default();
        assert_eq!(config.directory.search_debounce_ms, 200);
        assert_eq!(config.directory.refresh_interval_secs, 30);
        assert_eq!(config.friends.min_search_len, 2);
        assert_eq!(config.friends.search_limit, 10);
        assert_eq!(config.storage.club_images_bucket, "club-images");
        assert_eq!(config.storage.avatars_bucket, "avatars");
        assert_eq!(config.storage.cache_control_secs, 3600);
    }

    #[test]
    fn test_roundtrip_toml() {
        let config = ClubHubConfig::default()
            .with_refresh_interval(60)
            .with_search_debounce(300);
        let toml_str = config.to_toml().unwrap();
        let parsed = ClubHubConfig::from_toml(&toml_str).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_partial_toml() {
        let toml_str = r#"
[directory]
refresh_interval_secs = 0
"#;
        let config = ClubHubConfig::from_toml(toml_str).unwrap();
        assert_eq!(config.directory.refresh_interval_secs, 0);
        assert_eq!(config.directory.search_debounce_ms, 200);
        assert_eq!(config.storage, StorageConfig::default());
    }

    #[test]
    fn test_empty_toml() {
        let config = ClubHubConfig::from_toml("").unwrap();
        assert_eq!(config, ClubHubConfig::default());
    }

    #[test]
    fn test_filename() {
        assert_eq!(ClubHubConfig::filename(), "clubhub.toml");
    }
}
