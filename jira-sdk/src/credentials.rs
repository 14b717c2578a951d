// ABOUTME: Resolves the effective Jira credentials from environment and stored settings
// ABOUTME: Environment variables win over persisted settings; username is optional

use secrecy::{ExposeSecret, SecretString};
use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;
use url::Url;

use crate::constants::env;
use crate::error::{JiraError, Result};

pub const CONFIGURATION_GUIDANCE: &str = "Set configuration using:
  jira config --server <url> --token <token>
For Basic auth, also provide:
  jira config --username <email>
Or use environment variables:
  Bearer auth: JIRA_HOST, JIRA_API_TOKEN
  Basic auth: JIRA_HOST, JIRA_API_TOKEN, JIRA_USERNAME";

/// Read access to environment variables
pub trait Environment {
    fn var(&self, key: &str) -> Option<String>;

    /// Like `var`, but empty values count as unset
    fn non_empty(&self, key: &str) -> Option<String> {
        self.var(key).filter(|value| !value.trim().is_empty())
    }
}

/// The real process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl Environment for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl<K, V> Environment for HashMap<K, V>
where
    K: Borrow<str> + Hash + Eq,
    V: AsRef<str>,
{
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).map(|value| value.as_ref().to_string())
    }
}

/// Values read from the local settings store
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersistedSettings {
    pub server: Option<String>,
    pub username: Option<String>,
    pub token: Option<String>,
}

/// Where a credential set came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSource {
    Environment,
    LegacyEnvironment,
    Settings,
    Explicit,
}

#[derive(Debug, Clone)]
pub struct CredentialSet {
    server: String,
    username: String,
    token: SecretString,
    source: CredentialSource,
}

impl CredentialSet {
    pub fn new(server: &str, username: &str, token: &str) -> Result<Self> {
        Self::with_source(server, username, token, CredentialSource::Explicit)
    }

    fn with_source(
        server: &str,
        username: &str,
        token: &str,
        source: CredentialSource,
    ) -> Result<Self> {
        if server.trim().is_empty() {
            return Err(JiraError::InvalidInput {
                message: "Server URL cannot be empty".to_string(),
            });
        }
        if token.trim().is_empty() {
            return Err(JiraError::InvalidInput {
                message: "API token cannot be empty".to_string(),
            });
        }

        let server = validate_server(server)?;

        Ok(Self {
            server,
            username: username.trim().to_string(),
            token: SecretString::new(token.to_string().into_boxed_str()),
            source,
        })
    }

    pub fn server(&self) -> &str {
        &self.server
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn token(&self) -> &SecretString {
        &self.token
    }

    pub fn source(&self) -> CredentialSource {
        self.source
    }

    /// Empty username means token-only (Bearer) authentication
    pub fn is_bearer(&self) -> bool {
        self.username.is_empty()
    }
}

impl PartialEq for CredentialSet {
    fn eq(&self, other: &Self) -> bool {
        self.server == other.server
            && self.username == other.username
            && self.token.expose_secret() == other.token.expose_secret()
    }
}

/// Prefix `https://` when no scheme is given and drop trailing slashes
pub fn normalize_server(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    }
}

/// Normalize a server URL and reject values that do not parse
pub fn validate_server(raw: &str) -> Result<String> {
    let server = normalize_server(raw);
    Url::parse(&server).map_err(|e| JiraError::InvalidInput {
        message: format!("Invalid server URL '{}': {}", server, e),
    })?;
    Ok(server)
}

/// Resolve credentials, highest precedence first:
/// `JIRA_HOST` + `JIRA_API_TOKEN`, then `JIRA_DOMAIN` + `JIRA_USERNAME` +
/// `JIRA_API_TOKEN`, then the persisted settings.
pub fn resolve<E>(environment: &E, persisted: &PersistedSettings) -> Result<CredentialSet>
where
    E: Environment + ?Sized,
{
    let token = environment.non_empty(env::API_TOKEN);

    if let (Some(host), Some(token)) = (environment.non_empty(env::HOST), token.as_deref()) {
        let username = environment.non_empty(env::USERNAME).unwrap_or_default();
        log::debug!("Using credentials from {}", env::HOST);
        return CredentialSet::with_source(&host, &username, token, CredentialSource::Environment);
    }

    if let (Some(domain), Some(username), Some(token)) = (
        environment.non_empty(env::DOMAIN),
        environment.non_empty(env::USERNAME),
        token.as_deref(),
    ) {
        log::debug!("Using credentials from {}", env::DOMAIN);
        return CredentialSet::with_source(
            &domain,
            &username,
            token,
            CredentialSource::LegacyEnvironment,
        );
    }

    let server = persisted.server.as_deref().filter(|s| !s.trim().is_empty());
    let token = persisted.token.as_deref().filter(|t| !t.trim().is_empty());
    match (server, token) {
        (Some(server), Some(token)) => {
            let username = persisted.username.as_deref().unwrap_or_default();
            log::debug!("Using credentials from stored settings");
            CredentialSet::with_source(server, username, token, CredentialSource::Settings)
        }
        _ => Err(JiraError::ConfigurationMissing {
            guidance: CONFIGURATION_GUIDANCE.to_string(),
        }),
    }
}

/// Whether `resolve` would produce a usable credential set
pub fn is_configured<E>(environment: &E, persisted: &PersistedSettings) -> bool
where
    E: Environment + ?Sized,
{
    resolve(environment, persisted).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&'static str, &'static str)]) -> HashMap<&'static str, &'static str> {
        pairs.iter().copied().collect()
    }

    fn stored(server: &str, username: Option<&str>, token: &str) -> PersistedSettings {
        PersistedSettings {
            server: Some(server.to_string()),
            username: username.map(str::to_string),
            token: Some(token.to_string()),
        }
    }

    #[test]
    fn test_primary_environment_wins_over_legacy() {
        let environment = env(&[
            ("JIRA_HOST", "primary.atlassian.net"),
            ("JIRA_DOMAIN", "legacy.atlassian.net"),
            ("JIRA_USERNAME", "me@example.com"),
            ("JIRA_API_TOKEN", "secret"),
        ]);

        let creds = resolve(&environment, &PersistedSettings::default()).unwrap();
        assert_eq!(creds.server(), "https://primary.atlassian.net");
        assert_eq!(creds.username(), "me@example.com");
        assert_eq!(creds.source(), CredentialSource::Environment);
    }

    #[test]
    fn test_primary_environment_defaults_to_bearer() {
        let environment = env(&[
            ("JIRA_HOST", "https://x.atlassian.net"),
            ("JIRA_API_TOKEN", "abc"),
        ]);

        let creds = resolve(&environment, &stored("https://other", Some("u"), "t")).unwrap();
        assert_eq!(creds.server(), "https://x.atlassian.net");
        assert!(creds.is_bearer());
        assert_eq!(creds.token().expose_secret(), "abc");
    }

    #[test]
    fn test_legacy_environment_requires_all_three() {
        let partial = env(&[
            ("JIRA_DOMAIN", "legacy.atlassian.net"),
            ("JIRA_API_TOKEN", "secret"),
        ]);
        let result = resolve(&partial, &PersistedSettings::default());
        assert!(matches!(result, Err(JiraError::ConfigurationMissing { .. })));

        let complete = env(&[
            ("JIRA_DOMAIN", "legacy.atlassian.net"),
            ("JIRA_USERNAME", "me@example.com"),
            ("JIRA_API_TOKEN", "secret"),
        ]);
        let creds = resolve(&complete, &PersistedSettings::default()).unwrap();
        assert_eq!(creds.server(), "https://legacy.atlassian.net");
        assert_eq!(creds.source(), CredentialSource::LegacyEnvironment);
        assert!(!creds.is_bearer());
    }

    #[test]
    fn test_persisted_settings_used_without_environment() {
        let creds = resolve(
            &env(&[]),
            &stored("https://x.atlassian.net/", None, "abc"),
        )
        .unwrap();

        assert_eq!(creds.server(), "https://x.atlassian.net");
        assert_eq!(creds.username(), "");
        assert!(creds.is_bearer());
        assert_eq!(creds.source(), CredentialSource::Settings);
    }

    #[test]
    fn test_nothing_configured() {
        let result = resolve(&env(&[]), &PersistedSettings::default());
        match result {
            Err(JiraError::ConfigurationMissing { guidance }) => {
                assert!(guidance.contains("jira config --server <url> --token <token>"));
                assert!(guidance.contains("JIRA_HOST"));
            }
            other => panic!("Expected ConfigurationMissing, got {:?}", other),
        }
    }

    #[test]
    fn test_persisted_settings_require_token() {
        let settings = PersistedSettings {
            server: Some("https://x.atlassian.net".to_string()),
            username: Some("me".to_string()),
            token: None,
        };
        assert!(!is_configured(&env(&[]), &settings));
    }

    #[test]
    fn test_empty_variables_count_as_unset() {
        let environment = env(&[("JIRA_HOST", ""), ("JIRA_API_TOKEN", "abc")]);
        let result = resolve(&environment, &PersistedSettings::default());
        assert!(matches!(result, Err(JiraError::ConfigurationMissing { .. })));
    }

    #[test]
    fn test_normalize_server() {
        assert_eq!(normalize_server("x.atlassian.net"), "https://x.atlassian.net");
        assert_eq!(normalize_server("https://x.atlassian.net/"), "https://x.atlassian.net");
        assert_eq!(normalize_server("http://localhost:8080"), "http://localhost:8080");
        assert_eq!(normalize_server("  jira.corp.local//  "), "https://jira.corp.local");
    }

    #[test]
    fn test_credential_set_rejects_empty_token() {
        let result = CredentialSet::new("https://x.atlassian.net", "", "  ");
        assert!(matches!(result, Err(JiraError::InvalidInput { .. })));
    }

    #[test]
    fn test_validate_server() {
        assert_eq!(
            validate_server("x.atlassian.net/").unwrap(),
            "https://x.atlassian.net"
        );
        assert!(validate_server("jira .example.com").is_err());
    }

    #[test]
    fn test_credential_set_rejects_unparsable_server() {
        let result = CredentialSet::new("https://exa mple.com", "", "abc");
        assert!(matches!(result, Err(JiraError::InvalidInput { .. })));
    }

    #[test]
    fn test_debug_hides_token() {
        let creds = CredentialSet::new("https://x.atlassian.net", "", "super-secret").unwrap();
        let debug = format!("{:?}", creds);
        assert!(!debug.contains("super-secret"));
    }
}
