//! Backend endpoint configuration from environment variables.

pub const URL_VAR: &str = "CLUBHUB_BACKEND_URL";
pub const ANON_KEY_VAR: &str = "CLUBHUB_ANON_KEY";

/// Where the hosted backend lives and the public key sent with every request.
#[derive(Debug, Clone, PartialEq)]
pub struct BackendConfig {
    /// Project URL without a trailing slash, e.g. `https://xyz.supabase.co`.
    pub url: String,
    /// Anonymous (publishable) API key.
    pub anon_key: String,
}

impl BackendConfig {
    pub fn new(url: &str, anon_key: &str) -> Self {
        Self {
            url: url.trim().trim_end_matches('/').to_string(),
            anon_key: anon_key.trim().to_string(),
        }
    }

    /// Read from the process environment (and `.env`), falling back to the
    /// values present when the crate was built. WASM builds only have the
    /// latter.
    pub fn from_env() -> Result<Self, String> {
        dotenvy::dotenv().ok();

        Self::from_lookup(|name| {
            std::env::var(name).ok().or_else(|| {
                match name {
                    URL_VAR => option_env!("CLUBHUB_BACKEND_URL"),
                    ANON_KEY_VAR => option_env!("CLUBHUB_ANON_KEY"),
                    _ => None,
                }
                .map(str::to_string)
            })
        })
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let url = lookup(URL_VAR)
            .filter(|v| !v.trim().is_empty())
            .ok_or("CLUBHUB_BACKEND_URL not set")?;
        let anon_key = lookup(ANON_KEY_VAR)
            .filter(|v| !v.trim().is_empty())
            .ok_or("CLUBHUB_ANON_KEY not set")?;
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(format!("CLUBHUB_BACKEND_URL is not an http(s) URL: {url}"));
        }

        Ok(Self::new(&url, &anon_key))
    }

    pub fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{table}", self.url)
    }

    pub fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{path}", self.url)
    }

    pub fn object_url(&self, bucket: &str, path: &str) -> String {
        format!("{}/storage/v1/object/{bucket}/{path}", self.url)
    }

    pub fn public_object_url(&self, bucket: &str, path: &str) -> String {
        format!("{}/storage/v1/object/public/{bucket}/{path}", self.url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_from_lookup() {
        let config = BackendConfig::from_lookup(lookup(&[
            (URL_VAR, "https://clubs.example.co/"),
            (ANON_KEY_VAR, " anon "),
        ]))
        .unwrap();
        assert_eq!(config.url, "https://clubs.example.co");
        assert_eq!(config.anon_key, "anon");
    }

    #[test]
    fn test_missing_vars() {
        let err = BackendConfig::from_lookup(lookup(&[(ANON_KEY_VAR, "k")])).unwrap_err();
        assert_eq!(err, "CLUBHUB_BACKEND_URL not set");
        let err = BackendConfig::from_lookup(lookup(&[(URL_VAR, "https://x.co"), (ANON_KEY_VAR, "")]))
            .unwrap_err();
        assert_eq!(err, "CLUBHUB_ANON_KEY not set");
    }

    #[test]
    fn test_rejects_non_http_url() {
        assert!(BackendConfig::from_lookup(lookup(&[(URL_VAR, "clubs.co"), (ANON_KEY_VAR, "k")])).is_err());
    }

    #[test]
    fn test_endpoint_urls() {
        let config = BackendConfig::new("https://x.co", "k");
        assert_eq!(config.rest_url("clublists"), "https://x.co/rest/v1/clublists");
        assert_eq!(config.auth_url("signup"), "https://x.co/auth/v1/signup");
        assert_eq!(
            config.object_url("avatars", "u1.png"),
            "https://x.co/storage/v1/object/avatars/u1.png"
        );
        assert_eq!(
            config.public_object_url("club-images", "public/1.png"),
            "https://x.co/storage/v1/object/public/club-images/public/1.png"
        );
    }
}
