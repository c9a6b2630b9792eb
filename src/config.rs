//! Process configuration: TOML file plus environment overrides.
//!
//! The config file is optional — defaults cover everything except the bot
//! token, which must arrive via the file or `TELEGRAM_BOT_TOKEN` and is a
//! fatal startup error when absent.

use serde::Deserialize;
use std::path::Path;
use tracing_subscriber::{fmt, EnvFilter};

use crate::error::{ConfigError, Result};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// SQLite database path.
    pub database: String,
    pub telegram: TelegramConfig,
    pub fetcher: FetcherConfig,
    pub scheduler: SchedulerConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TelegramConfig {
    /// Bot API token obtained from BotFather.
    pub bot_token: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetcherConfig {
    /// Page load timeout in seconds.
    pub load_timeout_secs: u64,
    /// Concurrent page loads allowed against the marketplaces.
    pub max_pages: usize,
    pub user_agent: String,
    /// Proxy in `http://host:port` form.
    pub proxy_server: Option<String>,
    pub proxy_username: Option<String>,
    pub proxy_password: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Global tick period; per-user intervals layer on top of it.
    pub tick_minutes: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

impl Config {
    /// Load configuration from a TOML file and the environment.
    ///
    /// A missing file is not an error; environment variables
    /// (`TELEGRAM_BOT_TOKEN`, `PROXY_SERVER`, `PROXY_USERNAME`,
    /// `PROXY_PASSWORD`) override file values.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = if path.as_ref().exists() {
            let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
            toml::from_str(&content).map_err(ConfigError::Parse)?
        } else {
            Self::default()
        };

        config.apply_env();
        config.validate()?;

        Ok(config)
    }

    fn apply_env(&mut self) {
        if let Ok(token) = std::env::var("TELEGRAM_BOT_TOKEN") {
            if !token.is_empty() {
                self.telegram.bot_token = token;
            }
        }
        if let Ok(server) = std::env::var("PROXY_SERVER") {
            if !server.is_empty() {
                self.fetcher.proxy_server = Some(server);
            }
        }
        if let Ok(user) = std::env::var("PROXY_USERNAME") {
            if !user.is_empty() {
                self.fetcher.proxy_username = Some(user);
            }
        }
        if let Ok(password) = std::env::var("PROXY_PASSWORD") {
            if !password.is_empty() {
                self.fetcher.proxy_password = Some(password);
            }
        }
    }

    fn validate(&self) -> Result<()> {
        if self.telegram.bot_token.is_empty() {
            return Err(ConfigError::MissingField {
                field: "telegram.bot_token",
            }
            .into());
        }
        if self.database.is_empty() {
            return Err(ConfigError::MissingField { field: "database" }.into());
        }
        if self.scheduler.tick_minutes == 0 {
            return Err(ConfigError::InvalidValue {
                field: "scheduler.tick_minutes",
                reason: "must be positive".into(),
            }
            .into());
        }
        if self.fetcher.load_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "fetcher.load_timeout_secs",
                reason: "must be positive".into(),
            }
            .into());
        }
        if self.fetcher.max_pages == 0 {
            return Err(ConfigError::InvalidValue {
                field: "fetcher.max_pages",
                reason: "must be positive".into(),
            }
            .into());
        }
        Ok(())
    }

    pub fn init_logging(&self) {
        self.logging.init();
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: "pricewatch.db".into(),
            telegram: TelegramConfig::default(),
            fetcher: FetcherConfig::default(),
            scheduler: SchedulerConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            bot_token: String::new(),
        }
    }
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            load_timeout_secs: 45,
            max_pages: 1,
            user_agent: DEFAULT_USER_AGENT.into(),
            proxy_server: None,
            proxy_username: None,
            proxy_password: None,
        }
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self { tick_minutes: 5 }
    }
}

impl LoggingConfig {
    /// Initialize the tracing subscriber with this logging configuration.
    pub fn init(&self) {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level));

        match self.format.as_str() {
            "json" => {
                fmt().json().with_env_filter(filter).init();
            }
            _ => {
                fmt().with_env_filter(filter).init();
            }
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: "pretty".into(),
        }
    }
}
