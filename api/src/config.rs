use secrecy::SecretString;
use types::{Result, err};
use url::Url;

const DEFAULT_BASE_URL: &str = "http://localhost/smart_campus_api/";

#[derive(Clone)]
pub struct ApiConfig {
    pub base_url: Url,
    pub token: Option<SecretString>,
    pub demo_mode: bool,
}

impl ApiConfig {
    /// Read the build-time environment. The browser has no process
    /// environment, so values are baked in when the bundle is built.
    pub fn from_env() -> Result<Self> {
        Self::from_values(
            option_env!("CAMPUS_API_BASE_URL"),
            option_env!("CAMPUS_DEMO_MODE"),
        )
    }

    pub fn from_values(base_url: Option<&str>, demo_mode: Option<&str>) -> Result<Self> {
        let raw = base_url
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_BASE_URL);
        let base_url =
            Url::parse(raw).map_err(|e| err!("invalid CAMPUS_API_BASE_URL {raw:?}: {e}"))?;
        if base_url.cannot_be_a_base() {
            return Err(err!("CAMPUS_API_BASE_URL {raw:?} cannot hold a path"));
        }

        Ok(Self {
            base_url,
            token: None,
            demo_mode: demo_mode.is_some_and(is_truthy),
        })
    }

    /// Attach the bearer token found in browser storage, ignoring blanks.
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token
            .filter(|t| !t.trim().is_empty())
            .map(SecretString::from);
        self
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
