//! Configuration loading.
//!
//! Priority (highest to lowest):
//! 1. Environment variables
//! 2. `octosync.toml` in the working directory
//! 3. `~/.config/octosync/config.toml` (global defaults)
//! 4. Built-in defaults
//!
//! GitHub settings are required to process events; Jira settings are
//! optional and their absence disables issue sync, not the whole run.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::constants;
use crate::env::Env;

/// Errors during config loading and resolution.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    ParseFile {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("missing required setting `{setting}` (set {env_var} or add it to {file})", file = constants::CONFIG_FILENAME)]
    MissingSetting {
        setting: &'static str,
        env_var: &'static str,
    },
}

/// Top-level configuration as written in files; every field optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub github: GithubSection,
    pub jira: JiraSection,
    pub webhook: WebhookSection,
}

/// `[github]` section.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GithubSection {
    pub token: Option<String>,
    pub org: Option<String>,
    pub api_url: String,
}

impl Default for GithubSection {
    fn default() -> Self {
        Self {
            token: None,
            org: None,
            api_url: constants::GITHUB_API_URL.to_string(),
        }
    }
}

impl std::fmt::Debug for GithubSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GithubSection")
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("org", &self.org)
            .field("api_url", &self.api_url)
            .finish()
    }
}

/// `[jira]` section.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct JiraSection {
    pub base_url: Option<String>,
    pub email: Option<String>,
    pub api_token: Option<String>,
    pub project_key: String,
}

impl Default for JiraSection {
    fn default() -> Self {
        Self {
            base_url: None,
            email: None,
            api_token: None,
            project_key: constants::DEFAULT_PROJECT_KEY.to_string(),
        }
    }
}

impl std::fmt::Debug for JiraSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JiraSection")
            .field("base_url", &self.base_url)
            .field("email", &self.email)
            .field("api_token", &self.api_token.as_ref().map(|_| "[REDACTED]"))
            .field("project_key", &self.project_key)
            .finish()
    }
}

/// `[webhook]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WebhookSection {
    /// Public URL GitHub should deliver webhooks to; used when installing
    /// hooks on repositories.
    pub callback_url: Option<String>,
}

/// Fully resolved GitHub settings, ready to build a client from.
#[derive(Debug, Clone)]
pub struct GithubConfig {
    pub token: String,
    pub org: String,
    pub api_url: String,
}

/// Fully resolved Jira settings, ready to build a client from.
#[derive(Debug, Clone)]
pub struct JiraConfig {
    pub base_url: String,
    pub email: String,
    pub api_token: String,
    pub project_key: String,
}

impl Config {
    /// Load configuration with layering.
    pub fn load(local_dir: Option<&Path>, env: &Env) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                config.merge(Self::load_file(&global_path)?);
            }
        }

        if let Some(dir) = local_dir {
            let local_path = dir.join(constants::CONFIG_FILENAME);
            if local_path.exists() {
                config.merge(Self::load_file(&local_path)?);
            }
        }

        config.apply_env(env);

        Ok(config)
    }

    fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseFile {
            path: path.to_path_buf(),
            source: e,
        })
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(constants::CONFIG_DIR).join("config.toml"))
    }

    /// Merge another config into this one; `other`'s explicit values win.
    fn merge(&mut self, other: Config) {
        if other.github.token.is_some() {
            self.github.token = other.github.token;
        }
        if other.github.org.is_some() {
            self.github.org = other.github.org;
        }
        if other.github.api_url != GithubSection::default().api_url {
            self.github.api_url = other.github.api_url;
        }

        if other.jira.base_url.is_some() {
            self.jira.base_url = other.jira.base_url;
        }
        if other.jira.email.is_some() {
            self.jira.email = other.jira.email;
        }
        if other.jira.api_token.is_some() {
            self.jira.api_token = other.jira.api_token;
        }
        if other.jira.project_key != JiraSection::default().project_key {
            self.jira.project_key = other.jira.project_key;
        }

        if other.webhook.callback_url.is_some() {
            self.webhook.callback_url = other.webhook.callback_url;
        }
    }

    /// Apply environment variable overrides.
    fn apply_env(&mut self, env: &Env) {
        if let Some(v) = env.get(constants::ENV_GITHUB_TOKEN) {
            self.github.token = Some(v);
        }
        if let Some(v) = env.get(constants::ENV_GITHUB_ORG) {
            self.github.org = Some(v);
        }
        if let Some(v) = env.get(constants::ENV_GITHUB_API_URL) {
            self.github.api_url = v;
        }
        if let Some(v) = env.get(constants::ENV_JIRA_BASE_URL) {
            self.jira.base_url = Some(v);
        }
        if let Some(v) = env.get(constants::ENV_JIRA_EMAIL) {
            self.jira.email = Some(v);
        }
        if let Some(v) = env.get(constants::ENV_JIRA_API_TOKEN) {
            self.jira.api_token = Some(v);
        }
        if let Some(v) = env.get(constants::ENV_JIRA_PROJECT_KEY) {
            self.jira.project_key = v;
        }
        if let Some(v) = env.get(constants::ENV_CALLBACK_URL) {
            self.webhook.callback_url = Some(v);
        }
    }

    /// Resolve the required GitHub settings or report which one is missing.
    pub fn github(&self) -> Result<GithubConfig, ConfigError> {
        let token = self
            .github
            .token
            .clone()
            .ok_or(ConfigError::MissingSetting {
                setting: "github.token",
                env_var: constants::ENV_GITHUB_TOKEN,
            })?;
        let org = self.github.org.clone().ok_or(ConfigError::MissingSetting {
            setting: "github.org",
            env_var: constants::ENV_GITHUB_ORG,
        })?;

        Ok(GithubConfig {
            token,
            org,
            api_url: self.github.api_url.clone(),
        })
    }

    /// Resolve the Jira settings, or `None` when sync is not configured.
    pub fn jira(&self) -> Option<JiraConfig> {
        match (&self.jira.base_url, &self.jira.email, &self.jira.api_token) {
            (Some(base_url), Some(email), Some(api_token)) => Some(JiraConfig {
                base_url: base_url.clone(),
                email: email.clone(),
                api_token: api_token.clone(),
                project_key: self.jira.project_key.clone(),
            }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.github.api_url, "https://api.github.com");
        assert_eq!(config.jira.project_key, "REP");
        assert!(config.github.token.is_none());
        assert!(config.webhook.callback_url.is_none());
    }

    #[test]
    fn parse_toml_config() {
        let config: Config = toml::from_str(
            r#"
[github]
token = "ghp_abc"
org = "acme"

[jira]
base_url = "https://acme.atlassian.net"
email = "bot@acme.dev"
api_token = "jira-token"
project_key = "ENG"

[webhook]
callback_url = "https://hooks.acme.dev/github"
"#,
        )
        .unwrap();

        assert_eq!(config.github.org.as_deref(), Some("acme"));
        assert_eq!(config.jira.project_key, "ENG");
        assert_eq!(
            config.webhook.callback_url.as_deref(),
            Some("https://hooks.acme.dev/github")
        );
    }

    #[test]
    fn merge_prefers_explicit_values() {
        let mut base = Config::default();
        base.github.token = Some("from-global".to_string());
        base.github.org = Some("globalorg".to_string());

        let other: Config = toml::from_str(
            r#"
[github]
token = "from-local"
"#,
        )
        .unwrap();

        base.merge(other);
        assert_eq!(base.github.token.as_deref(), Some("from-local"));
        assert_eq!(base.github.org.as_deref(), Some("globalorg"));
    }

    #[test]
    fn env_overrides_files() {
        let env = Env::fixed(&[
            ("GITHUB_TOKEN", "env-token"),
            ("GITHUB_ORG", "env-org"),
            ("JIRA_PROJECT_KEY", "OPS"),
            ("OCTOSYNC_CALLBACK_URL", "https://tunnel.example.com/hook"),
        ]);

        let mut config = Config::default();
        config.github.token = Some("file-token".to_string());
        config.apply_env(&env);

        assert_eq!(config.github.token.as_deref(), Some("env-token"));
        assert_eq!(config.github.org.as_deref(), Some("env-org"));
        assert_eq!(config.jira.project_key, "OPS");
        assert_eq!(
            config.webhook.callback_url.as_deref(),
            Some("https://tunnel.example.com/hook")
        );
    }

    #[test]
    fn github_resolution_reports_missing_token() {
        let config = Config::default();
        let err = config.github().unwrap_err();
        assert!(err.to_string().contains("github.token"));
        assert!(err.to_string().contains("GITHUB_TOKEN"));
    }

    #[test]
    fn github_resolution_reports_missing_org() {
        let mut config = Config::default();
        config.github.token = Some("t".to_string());
        let err = config.github().unwrap_err();
        assert!(err.to_string().contains("github.org"));
    }

    #[test]
    fn jira_resolution_requires_all_three_settings() {
        let mut config = Config::default();
        assert!(config.jira().is_none());

        config.jira.base_url = Some("https://acme.atlassian.net".to_string());
        config.jira.email = Some("bot@acme.dev".to_string());
        assert!(config.jira().is_none(), "missing token should disable sync");

        config.jira.api_token = Some("secret".to_string());
        let jira = config.jira().unwrap();
        assert_eq!(jira.project_key, "REP");
    }

    #[test]
    fn load_reads_local_file() {
        let env = Env::fixed(&[]);
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("octosync.toml"),
            r#"
[github]
token = "ghp_local"
org = "acme"
"#,
        )
        .unwrap();

        let config = Config::load(Some(dir.path()), &env).unwrap();
        assert_eq!(config.github.token.as_deref(), Some("ghp_local"));
    }

    #[test]
    fn load_with_invalid_local_file() {
        let env = Env::fixed(&[]);
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("octosync.toml"), "not {{ toml").unwrap();

        let result = Config::load(Some(dir.path()), &env);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("parse"));
    }

    #[test]
    fn load_without_files_gives_defaults() {
        let env = Env::fixed(&[]);
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(Some(dir.path()), &env).unwrap();
        assert!(config.github.token.is_none());
        assert_eq!(config.github.api_url, "https://api.github.com");
    }

    #[test]
    fn debug_redacts_secrets() {
        let mut config = Config::default();
        config.github.token = Some("ghp_secret".to_string());
        config.jira.api_token = Some("jira_secret".to_string());

        let rendered = format!("{config:?}");
        assert!(!rendered.contains("ghp_secret"));
        assert!(!rendered.contains("jira_secret"));
        assert!(rendered.contains("[REDACTED]"));
    }
}
