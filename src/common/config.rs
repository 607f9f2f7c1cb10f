//! Configuration file handling

use serde::Deserialize;
use std::path::Path;

use super::paths::config_path;
use super::{Error, Result};
use crate::api::auth::AuthCredentials;
use crate::api::types::StoryPayload;

/// Main configuration structure
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// API under test
    #[serde(default)]
    pub target: TargetConfig,

    /// Login credentials used by the authentication bootstrap
    #[serde(default)]
    pub credentials: CredentialsConfig,

    /// Request payloads and identifiers used by the scenario
    #[serde(default)]
    pub fixtures: StoryFixtures,

    /// Optional extra checks
    #[serde(default)]
    pub checks: ChecksConfig,
}

/// Target API settings
#[derive(Debug, Deserialize)]
pub struct TargetConfig {
    /// Base URL every request path is appended to
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

fn default_base_url() -> String {
    "https://d3s5nxhwblsjbi.cloudfront.net".to_string()
}

/// Credentials section. Both fields are required before a run starts,
/// but may come from flags or the environment instead of the file.
#[derive(Deserialize, Default)]
pub struct CredentialsConfig {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl std::fmt::Debug for CredentialsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialsConfig")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Payloads sent by the scenario steps
#[derive(Debug, Clone, Deserialize)]
pub struct StoryFixtures {
    /// Body of the create step
    #[serde(default = "default_create")]
    pub create: StoryPayload,

    /// Body of the edit step
    #[serde(default = "default_edit")]
    pub edit: StoryPayload,

    /// Body sent when editing a story that does not exist
    #[serde(default = "default_missing_edit")]
    pub missing_edit: StoryPayload,

    /// Identifier that the server must not know about
    #[serde(default = "default_missing_story_id")]
    pub missing_story_id: String,
}

impl Default for StoryFixtures {
    fn default() -> Self {
        Self {
            create: default_create(),
            edit: default_edit(),
            missing_edit: default_missing_edit(),
            missing_story_id: default_missing_story_id(),
        }
    }
}

fn default_create() -> StoryPayload {
    StoryPayload::new("TestStory312312", "TestDescription", "")
}
fn default_edit() -> StoryPayload {
    StoryPayload::new("TestStory312312_Updated", "pew", "")
}
fn default_missing_edit() -> StoryPayload {
    StoryPayload::new("NonExistentStoryTitle", "NonExistentStoryDescription", "")
}
fn default_missing_story_id() -> String {
    "NonExistentStoryIdASDASD".to_string()
}

/// Optional checks that go beyond the acknowledgment messages
#[derive(Debug, Deserialize, Default)]
pub struct ChecksConfig {
    /// After a successful edit, require the listing to contain the updated title
    #[serde(default)]
    pub verify_listing_reflects_edit: bool,
}

impl Config {
    /// Load configuration
    ///
    /// An explicit path must exist. Without one, the default config file is
    /// used if present, otherwise defaults are returned.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_file(path);
        }
        if let Some(path) = config_path() {
            if path.exists() {
                return Self::load_file(&path);
            }
        }
        Ok(Self::default())
    }

    fn load_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::FileRead {
            path: path.display().to_string(),
            error: e.to_string(),
        })?;
        tracing::debug!(path = %path.display(), "loaded configuration file");
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::ConfigParse(e.to_string()))
    }

    /// Apply command-line (or environment) overrides on top of the file
    pub fn apply_overrides(
        &mut self,
        base_url: Option<String>,
        username: Option<String>,
        password: Option<String>,
    ) {
        if let Some(url) = base_url {
            self.target.base_url = url;
        }
        if username.is_some() {
            self.credentials.username = username;
        }
        if password.is_some() {
            self.credentials.password = password;
        }
    }

    /// Resolve the credentials, failing if either part is missing or empty
    pub fn auth_credentials(&self) -> Result<AuthCredentials> {
        let username = self.credentials.username.clone().unwrap_or_default();
        let password = self.credentials.password.clone().unwrap_or_default();
        AuthCredentials::new(username, password)
    }

    /// Validated base URL without a trailing slash
    pub fn base_url(&self) -> Result<String> {
        let url = self.target.base_url.trim().trim_end_matches('/');
        if url.is_empty() {
            return Err(Error::Config("base_url must not be empty".to_string()));
        }
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(Error::Config(format!(
                "base_url '{}' must start with http:// or https://",
                url
            )));
        }
        Ok(url.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_story_suite() {
        let config = Config::default();
        assert_eq!(config.fixtures.create.title, "TestStory312312");
        assert_eq!(config.fixtures.edit.title, "TestStory312312_Updated");
        assert_eq!(config.fixtures.missing_story_id, "NonExistentStoryIdASDASD");
        assert!(!config.checks.verify_listing_reflects_edit);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let config = Config::from_toml_str(
            r#"
            [target]
            base_url = "http://localhost:8080/"

            [fixtures]
            missing_story_id = "nope"

            [fixtures.create]
            title = "Mine"
            description = "Desc"
            url = "https://example.com"
            "#,
        )
        .unwrap();

        assert_eq!(config.base_url().unwrap(), "http://localhost:8080");
        assert_eq!(config.fixtures.missing_story_id, "nope");
        assert_eq!(config.fixtures.create.title, "Mine");
        assert_eq!(config.fixtures.edit.description, "pew");
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let err = Config::from_toml_str("[target\nbase_url =").unwrap_err();
        assert!(matches!(err, Error::ConfigParse(_)));
    }

    #[test]
    fn test_overrides_win_over_file() {
        let mut config = Config::from_toml_str(
            r#"
            [credentials]
            username = "file-user"
            password = "file-pass"
            "#,
        )
        .unwrap();
        config.apply_overrides(None, Some("flag-user".to_string()), None);

        let creds = config.auth_credentials().unwrap();
        assert_eq!(creds.username(), "flag-user");
        assert_eq!(creds.password(), "file-pass");
    }

    #[test]
    fn test_missing_credentials_rejected() {
        let config = Config::default();
        assert!(matches!(config.auth_credentials(), Err(Error::Config(_))));
    }

    #[test]
    fn test_base_url_requires_scheme() {
        let mut config = Config::default();
        config.apply_overrides(Some("localhost:1234".to_string()), None, None);
        assert!(matches!(config.base_url(), Err(Error::Config(_))));
    }

    #[test]
    fn test_debug_redacts_password() {
        let creds = CredentialsConfig {
            username: Some("user".to_string()),
            password: Some("hunter2".to_string()),
        };
        let rendered = format!("{:?}", creds);
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("user"));
    }

    #[test]
    fn test_load_explicit_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        assert!(matches!(
            Config::load(Some(&path)),
            Err(Error::FileRead { .. })
        ));
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[checks]\nverify_listing_reflects_edit = true\n").unwrap();
        let config = Config::load(Some(&path)).unwrap();
        assert!(config.checks.verify_listing_reflects_edit);
    }
}
