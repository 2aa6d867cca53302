//! Upstream credential resolution
//!
//! The adapter never reads the process environment itself. It is handed a
//! [`CredentialSource`] at construction and asks it for credentials at the
//! start of every call, so configuration changes apply on the next call.

use std::fmt;

/// Environment variable holding the ActiveCampaign account URL
pub const URL_VAR: &str = "ACTIVECAMPAIGN_URL";

/// Environment variable holding the ActiveCampaign API key
pub const API_KEY_VAR: &str = "ACTIVECAMPAIGN_API_KEY";

/// Path of the legacy admin API, relative to the account URL
pub const ADMIN_API_PATH: &str = "/admin/api.php";

/// Base URL and API key for one upstream call
#[derive(Clone, PartialEq, Eq)]
pub struct UpstreamCredentials {
    pub base_url: String,
    pub api_key: String,
}

impl UpstreamCredentials {
    /// Build credentials, treating empty values as absent.
    pub fn from_parts(base_url: Option<String>, api_key: Option<String>) -> Option<Self> {
        let base_url = base_url.filter(|v| !v.is_empty())?;
        let api_key = api_key.filter(|v| !v.is_empty())?;
        Some(Self { base_url, api_key })
    }

    /// Full URL of the admin API endpoint
    pub fn endpoint(&self) -> String {
        let base = self.base_url.strip_suffix('/').unwrap_or(&self.base_url);
        format!("{base}{ADMIN_API_PATH}")
    }
}

impl fmt::Debug for UpstreamCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpstreamCredentials")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// Something that can produce credentials on demand
#[cfg_attr(test, mockall::automock)]
pub trait CredentialSource: Send + Sync {
    /// Resolve credentials for the current call, `None` if either value is missing
    fn resolve(&self) -> Option<UpstreamCredentials>;
}

/// Reads [`URL_VAR`] and [`API_KEY_VAR`] from the process environment on every call
#[derive(Debug, Clone, Default)]
pub struct EnvCredentials;

impl CredentialSource for EnvCredentials {
    fn resolve(&self) -> Option<UpstreamCredentials> {
        UpstreamCredentials::from_parts(std::env::var(URL_VAR).ok(), std::env::var(API_KEY_VAR).ok())
    }
}

/// Credentials fixed at construction
#[derive(Debug, Clone, Default)]
pub struct StaticCredentials {
    credentials: Option<UpstreamCredentials>,
}

impl StaticCredentials {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            credentials: UpstreamCredentials::from_parts(
                Some(base_url.into()),
                Some(api_key.into()),
            ),
        }
    }

    /// A source that never resolves
    pub fn missing() -> Self {
        Self { credentials: None }
    }
}

impl CredentialSource for StaticCredentials {
    fn resolve(&self) -> Option<UpstreamCredentials> {
        self.credentials.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_appends_admin_path() {
        let creds = StaticCredentials::new("https://acme.api-us1.com", "key")
            .resolve()
            .unwrap();
        assert_eq!(creds.endpoint(), "https://acme.api-us1.com/admin/api.php");
    }

    #[test]
    fn test_endpoint_drops_trailing_slash() {
        let creds = StaticCredentials::new("https://acme.api-us1.com/", "key")
            .resolve()
            .unwrap();
        assert_eq!(creds.endpoint(), "https://acme.api-us1.com/admin/api.php");
    }

    #[test]
    fn test_empty_values_are_absent() {
        assert!(StaticCredentials::new("", "key").resolve().is_none());
        assert!(StaticCredentials::new("https://acme.api-us1.com", "").resolve().is_none());
        assert!(StaticCredentials::missing().resolve().is_none());
        assert!(UpstreamCredentials::from_parts(None, Some("key".into())).is_none());
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let creds = StaticCredentials::new("https://acme.api-us1.com", "super-secret")
            .resolve()
            .unwrap();
        let debug = format!("{creds:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("acme.api-us1.com"));
    }
}
