use std::env;
use std::fs;

use serde::Deserialize;

use crate::constants;
use crate::error::Error;

/// Settings for one reminder run: Bitbucket credentials, the project
/// allow-list, reviewer exclusions and the Slack webhook.
///
/// Loaded once at startup from the config file with `REMINDER_*`
/// environment variables taking precedence, read-only afterwards.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReminderConfig {
    #[serde(default)]
    pub bitbucket: BitbucketConfig,
    #[serde(default)]
    pub projects: Vec<ProjectSelection>,
    #[serde(default, rename = "filterReviewers")]
    pub filter_reviewers: Vec<String>,
    #[serde(default)]
    pub slack: SlackConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BitbucketConfig {
    #[serde(default)]
    pub host: String,
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectSelection {
    #[serde(default)]
    pub key: String,
    /// Parsed but not consulted downstream; selection is project-granular.
    #[serde(default)]
    pub repos: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SlackConfig {
    #[serde(default, rename = "webhookURL")]
    pub webhook_url: String,
}

impl ReminderConfig {
    /// Read the config file, overlay the environment, validate and
    /// normalize the host. Any failure here aborts the run before any
    /// network activity.
    pub fn load() -> Result<Self, Error> {
        let text = fs::read_to_string(constants::CONFIG_FILE_PATH).map_err(|e| {
            Error::Config(format!("cannot read {}: {}", constants::CONFIG_FILE_PATH, e))
        })?;
        Self::parse(&text)
    }

    fn parse(text: &str) -> Result<Self, Error> {
        let mut cfg: Self = serde_yaml::from_str(text).map_err(|e| {
            Error::Config(format!(
                "cannot parse {}: {}",
                constants::CONFIG_FILE_PATH,
                e
            ))
        })?;

        cfg.overlay_env();
        cfg.validate()?;
        cfg.bitbucket.host = normalize_host(&cfg.bitbucket.host);
        Ok(cfg)
    }

    /// Environment variables win over file values when set.
    fn overlay_env(&mut self) {
        if let Ok(host) = env::var(constants::ENV_BITBUCKET_HOST) {
            self.bitbucket.host = host;
        }
        if let Ok(user) = env::var(constants::ENV_BITBUCKET_USER) {
            self.bitbucket.user = user;
        }
        if let Ok(password) = env::var(constants::ENV_BITBUCKET_PASSWORD) {
            self.bitbucket.password = password;
        }
        if let Ok(url) = env::var(constants::ENV_SLACK_URL) {
            self.slack.webhook_url = url;
        }
    }

    fn validate(&self) -> Result<(), Error> {
        if self.slack.webhook_url.is_empty() {
            return Err(Error::Config(format!(
                "webhookURL must be set in {} or via {}",
                constants::CONFIG_FILE_PATH,
                constants::ENV_SLACK_URL
            )));
        }
        Ok(())
    }
}

/// Hosts may be configured without a scheme; default to https.
fn normalize_host(host: &str) -> String {
    if host.contains("https://") {
        host.to_string()
    } else {
        format!("https://{}/", host)
    }
}
