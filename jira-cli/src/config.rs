// ABOUTME: Settings file loading, editing, and saving for the Jira CLI
// ABOUTME: Stores server, username, token, and API version as TOML under the XDG config dir

use anyhow::{Context, Result};
use clap::ValueEnum;
use jira_sdk::{ApiVersionMode, Environment, PersistedSettings};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::constants::settings;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SettingKey {
    Server,
    Username,
    Token,
    #[value(name = "api_version", alias = "api-version")]
    ApiVersion,
}

impl SettingKey {
    pub fn all() -> [SettingKey; 4] {
        [
            SettingKey::Server,
            SettingKey::Username,
            SettingKey::Token,
            SettingKey::ApiVersion,
        ]
    }

    pub fn is_secret(self) -> bool {
        matches!(self, SettingKey::Token)
    }

    /// Whether changing this key can change the outcome of a connection test
    pub fn affects_connection(self) -> bool {
        !matches!(self, SettingKey::ApiVersion)
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SettingKey::Server => "server",
            SettingKey::Username => "username",
            SettingKey::Token => "token",
            SettingKey::ApiVersion => "api_version",
        };
        write!(f, "{}", name)
    }
}

/// The settings file plus its location
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
    settings: Settings,
}

impl SettingsStore {
    /// Settings path, highest precedence first: `JIRA_CLI_CONFIG_PATH`,
    /// `$XDG_CONFIG_HOME/jira-cli/config.toml`, `~/.config/jira-cli/config.toml`
    pub fn default_path(environment: &dyn Environment) -> Result<PathBuf> {
        if let Some(path) = environment.non_empty(settings::CONFIG_PATH_ENV) {
            return Ok(PathBuf::from(path));
        }

        if let Some(config_home) = environment.non_empty(settings::XDG_CONFIG_HOME_ENV) {
            return Ok(PathBuf::from(config_home)
                .join(settings::CONFIG_DIR)
                .join(settings::CONFIG_FILE));
        }

        let home = dirs::home_dir().context("Could not determine the home directory")?;
        Ok(home
            .join(".config")
            .join(settings::CONFIG_DIR)
            .join(settings::CONFIG_FILE))
    }

    pub fn load(environment: &dyn Environment) -> Result<Self> {
        let path = Self::default_path(environment)?;
        Self::open(path)
    }

    /// Open the settings at `path`; a missing file yields empty settings
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        let settings = if path.exists() {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            toml::from_str(&content).with_context(|| {
                format!("Failed to parse TOML config file: {}", path.display())
            })?
        } else {
            log::debug!("No settings file at {}", path.display());
            Settings::default()
        };

        Ok(Self { path, settings })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn is_empty(&self) -> bool {
        self.settings == Settings::default()
    }

    pub fn get(&self, key: SettingKey) -> Option<&str> {
        let value = match key {
            SettingKey::Server => &self.settings.server,
            SettingKey::Username => &self.settings.username,
            SettingKey::Token => &self.settings.token,
            SettingKey::ApiVersion => &self.settings.api_version,
        };
        value.as_deref()
    }

    /// The subset the credential resolver reads
    pub fn persisted(&self) -> PersistedSettings {
        PersistedSettings {
            server: self.settings.server.clone(),
            username: self.settings.username.clone(),
            token: self.settings.token.clone(),
        }
    }

    pub fn api_version(&self) -> Result<Option<ApiVersionMode>> {
        self.settings
            .api_version
            .as_deref()
            .map(|raw| {
                raw.parse::<ApiVersionMode>()
                    .with_context(|| format!("Invalid api_version in {}", self.path.display()))
            })
            .transpose()
    }

    /// Validate, store, and save one value
    pub fn set(&mut self, key: SettingKey, value: &str) -> Result<()> {
        let value = match key {
            SettingKey::Server => jira_sdk::credentials::validate_server(value)?,
            SettingKey::ApiVersion => value.parse::<ApiVersionMode>()?.to_string(),
            SettingKey::Username | SettingKey::Token => value.trim().to_string(),
        };

        *self.slot(key) = Some(value);
        self.save()
    }

    pub fn unset(&mut self, key: SettingKey) -> Result<()> {
        *self.slot(key) = None;
        self.save()
    }

    pub fn clear(&mut self) -> Result<()> {
        self.settings = Settings::default();
        self.save()
    }

    fn slot(&mut self, key: SettingKey) -> &mut Option<String> {
        match key {
            SettingKey::Server => &mut self.settings.server,
            SettingKey::Username => &mut self.settings.username,
            SettingKey::Token => &mut self.settings.token,
            SettingKey::ApiVersion => &mut self.settings.api_version,
        }
    }

    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let content =
            toml::to_string_pretty(&self.settings).context("Failed to serialize settings")?;
        let mut options = std::fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        let mut file = options
            .open(&self.path)
            .with_context(|| format!("Failed to open config file: {}", self.path.display()))?;

        // `mode` only applies to new files
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(std::fs::Permissions::from_mode(0o600))
                .with_context(|| {
                    format!("Failed to restrict permissions on {}", self.path.display())
                })?;
        }

        file.write_all(content.as_bytes())
            .with_context(|| format!("Failed to write config file: {}", self.path.display()))?;

        log::debug!("Saved settings to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> SettingsStore {
        SettingsStore::open(dir.path().join("jira-cli").join("config.toml")).unwrap()
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        assert!(store.is_empty());
        assert!(store.get(SettingKey::Server).is_none());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_set_normalizes_and_persists() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);

        store.set(SettingKey::Server, "example.atlassian.net/").unwrap();
        store.set(SettingKey::Token, "  secret  ").unwrap();
        store.set(SettingKey::ApiVersion, "V3").unwrap();

        let reopened = SettingsStore::open(store.path()).unwrap();
        assert_eq!(
            reopened.get(SettingKey::Server),
            Some("https://example.atlassian.net")
        );
        assert_eq!(reopened.get(SettingKey::Token), Some("secret"));
        assert_eq!(reopened.get(SettingKey::ApiVersion), Some("3"));
        assert_eq!(reopened.api_version().unwrap(), Some(ApiVersionMode::V3));
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);

        assert!(store.set(SettingKey::ApiVersion, "4").is_err());
        assert!(store.set(SettingKey::Server, "jira .example.com").is_err());
        assert!(store.is_empty());
    }

    #[test]
    fn test_unset_and_clear() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        store.set(SettingKey::Server, "https://jira.example.com").unwrap();
        store.set(SettingKey::Username, "me@example.com").unwrap();

        store.unset(SettingKey::Username).unwrap();
        assert!(store.get(SettingKey::Username).is_none());
        assert!(store.get(SettingKey::Server).is_some());

        store.clear().unwrap();
        assert!(SettingsStore::open(store.path()).unwrap().is_empty());
    }

    #[test]
    fn test_file_format() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        store.set(SettingKey::Server, "https://jira.example.com").unwrap();

        let content = std::fs::read_to_string(store.path()).unwrap();
        assert_eq!(content.trim(), r#"server = "https://jira.example.com""#);
    }

    #[cfg(unix)]
    #[test]
    fn test_saved_file_is_private() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        store.set(SettingKey::Token, "secret").unwrap();

        let mode = std::fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[cfg(unix)]
    #[test]
    fn test_existing_readable_file_is_tightened() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "server = \"https://old.example.com\"\n").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o644)).unwrap();

        let mut store = SettingsStore::open(&path).unwrap();
        store.set(SettingKey::Token, "secret").unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);

        let reopened = SettingsStore::open(&path).unwrap();
        assert_eq!(reopened.get(SettingKey::Server), Some("https://old.example.com"));
        assert_eq!(reopened.get(SettingKey::Token), Some("secret"));
    }

    #[test]
    fn test_invalid_toml_is_reported() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "server = [").unwrap();

        let err = SettingsStore::open(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse TOML config file"));
    }

    #[test]
    fn test_persisted_subset() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        store.set(SettingKey::Server, "https://jira.example.com").unwrap();
        store.set(SettingKey::Token, "secret").unwrap();

        let persisted = store.persisted();
        assert_eq!(persisted.server.as_deref(), Some("https://jira.example.com"));
        assert_eq!(persisted.token.as_deref(), Some("secret"));
        assert!(persisted.username.is_none());
    }

    #[test]
    fn test_default_path_precedence() {
        let explicit: HashMap<&str, &str> = [
            ("JIRA_CLI_CONFIG_PATH", "/tmp/custom.toml"),
            ("XDG_CONFIG_HOME", "/tmp/xdg"),
        ]
        .into_iter()
        .collect();
        assert_eq!(
            SettingsStore::default_path(&explicit).unwrap(),
            PathBuf::from("/tmp/custom.toml")
        );

        let xdg: HashMap<&str, &str> = [("XDG_CONFIG_HOME", "/tmp/xdg")].into_iter().collect();
        assert_eq!(
            SettingsStore::default_path(&xdg).unwrap(),
            PathBuf::from("/tmp/xdg/jira-cli/config.toml")
        );
    }

    #[test]
    fn test_setting_key_names() {
        assert_eq!(SettingKey::ApiVersion.to_string(), "api_version");
        assert_eq!(
            SettingKey::from_str("api-version", true).unwrap(),
            SettingKey::ApiVersion
        );
        assert!(SettingKey::Token.is_secret());
        assert!(!SettingKey::ApiVersion.affects_connection());
    }
}
