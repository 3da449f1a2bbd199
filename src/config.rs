use std::collections::HashMap;
use std::env;

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use url::Url;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub watcher: WatcherConfig,
    pub scraper: ScraperConfig,
    pub smtp: SmtpConfig,
    pub sites: HashMap<String, SiteConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatcherConfig {
    pub email_subject: String,
    pub to_address: String,
    pub poll_interval_minutes: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScraperConfig {
    pub user_agent: String,
    pub request_timeout: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub from_name: String,
}

/// Per-site settings. A site with no URL stays registered but is skipped
/// every cycle; keywords restrict which product names are considered.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteConfig {
    pub url: Option<String>,
    pub keywords: Option<Vec<String>>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = Config::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default"))
            // Add environment-specific config
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Add local config (ignored by git)
            .add_source(File::with_name("config/local").required(false))
            // Add environment variables with prefix "STOCKWATCH_"
            .add_source(Environment::with_prefix("STOCKWATCH").separator("__"))
            .build()?;

        let config: AppConfig = s.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Startup validation; the watcher must not enter its polling loop with
    /// an incomplete site or delivery definition.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.watcher.poll_interval_minutes == 0 {
            return Err(ConfigError::Message(
                "watcher.poll_interval_minutes must be greater than 0".into(),
            ));
        }

        if self.watcher.to_address.is_empty() || !self.watcher.to_address.contains('@') {
            return Err(ConfigError::Message(
                "watcher.to_address must be a valid email address".into(),
            ));
        }

        if self.watcher.email_subject.is_empty() {
            return Err(ConfigError::Message(
                "watcher.email_subject must not be empty".into(),
            ));
        }

        if self.smtp.host.is_empty() {
            return Err(ConfigError::Message("smtp.host must not be empty".into()));
        }

        if self.smtp.port == 0 {
            return Err(ConfigError::Message(
                "smtp.port must be greater than 0".into(),
            ));
        }

        if self.smtp.username.is_empty() || self.smtp.password.is_empty() {
            return Err(ConfigError::Message(
                "smtp.username and smtp.password are required".into(),
            ));
        }

        if self.scraper.request_timeout == 0 {
            return Err(ConfigError::Message(
                "scraper.request_timeout must be greater than 0".into(),
            ));
        }

        if self.sites.is_empty() {
            return Err(ConfigError::Message(
                "at least one site must be configured under [sites]".into(),
            ));
        }

        for (site, site_config) in &self.sites {
            if let Some(url) = &site_config.url {
                if Url::parse(url).is_err() {
                    return Err(ConfigError::Message(format!(
                        "invalid URL for site '{}': {}",
                        site, url
                    )));
                }
            }

            if let Some(keywords) = &site_config.keywords {
                if keywords.iter().any(|k| k.trim().is_empty()) {
                    return Err(ConfigError::Message(format!(
                        "site '{}' has an empty keyword",
                        site
                    )));
                }
            }
        }

        Ok(())
    }
}
