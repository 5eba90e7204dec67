//! Configuration loading: TOML file with environment variable overrides.
//!
//! Looks for `offhours.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.
//!
//! The rules themselves live in a separate schedule document (see
//! [`parse_schedule`]) whose path is `scheduler.schedule_path`.

use std::time::Duration;

use offhours_adapter_virtual::FleetSeed;
use offhours_app::scheduler::SchedulerSettings;
use offhours_domain::error::OffhoursError;
use offhours_domain::rule::Rule;
use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Database settings.
    pub database: DatabaseConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Evaluation and dispatch settings.
    pub scheduler: SchedulerConfig,
    /// Remote holiday calendar.
    pub holidays: HolidaysConfig,
    /// Seed for the virtual provider. Empty means the demo fleet.
    pub fleet: FleetSeed,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
}

/// `SQLite` database configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// `SQLite` connection URL or file path.
    pub url: String,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// IANA name of the operating timezone (e.g. `Asia/Tokyo`).
    pub timezone: String,
    /// Path of the TOML schedule document.
    pub schedule_path: String,
    /// Seconds between two periodic invocations.
    pub tick_seconds: u64,
    /// Upper bound for a single start/stop command.
    pub dispatch_timeout_secs: u64,
    /// Evaluate and log without dispatching.
    pub dry_run: bool,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct HolidaysConfig {
    /// URL template; `{year}` is replaced with the requested year.
    pub url: String,
    pub timeout_secs: u64,
}

/// Shape of the schedule document.
#[derive(Debug, Deserialize)]
struct ScheduleDocument {
    #[serde(default)]
    rules: Vec<Rule>,
}

impl Config {
    /// Load configuration from `offhours.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("offhours.toml")?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("OFFHOURS_HOST") {
            self.server.host = val;
        }
        if let Ok(val) = std::env::var("OFFHOURS_PORT") {
            if let Ok(port) = val.parse() {
                self.server.port = port;
            }
        }
        if let Ok(val) = std::env::var("OFFHOURS_BIND") {
            if let Some((host, port)) = val.rsplit_once(':') {
                self.server.host = host.to_string();
                if let Ok(port) = port.parse() {
                    self.server.port = port;
                }
            }
        }
        if let Ok(val) = std::env::var("OFFHOURS_DATABASE_URL") {
            self.database.url = val;
        }
        if let Ok(val) = std::env::var("OFFHOURS_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("OFFHOURS_TIMEZONE") {
            self.scheduler.timezone = val;
        }
        if let Ok(val) = std::env::var("OFFHOURS_SCHEDULE") {
            self.scheduler.schedule_path = val;
        }
        if let Ok(val) = std::env::var("OFFHOURS_HOLIDAYS_URL") {
            self.holidays.url = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        if self.scheduler.tick_seconds == 0 {
            return Err(ConfigError::Validation(
                "scheduler.tick_seconds must be non-zero".to_string(),
            ));
        }
        if self.scheduler.dispatch_timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "scheduler.dispatch_timeout_secs must be non-zero".to_string(),
            ));
        }
        if self.holidays.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "holidays.timeout_secs must be non-zero".to_string(),
            ));
        }
        if !self.holidays.url.contains(offhours_adapter_holidays_http::YEAR_PLACEHOLDER) {
            return Err(ConfigError::Validation(format!(
                "holidays.url must contain {}",
                offhours_adapter_holidays_http::YEAR_PLACEHOLDER
            )));
        }
        self.timezone()?;
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Return the database URL in `sqlx`-compatible format.
    #[must_use]
    pub fn database_url(&self) -> &str {
        &self.database.url
    }

    /// The operating timezone.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] for names unknown to the tz database.
    pub fn timezone(&self) -> Result<chrono_tz::Tz, ConfigError> {
        self.scheduler
            .timezone
            .parse::<chrono_tz::Tz>()
            .map_err(|_| {
                ConfigError::Validation(format!(
                    "unknown timezone {:?}",
                    self.scheduler.timezone
                ))
            })
    }

    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(self.scheduler.tick_seconds)
    }

    #[must_use]
    pub fn scheduler_settings(&self) -> SchedulerSettings {
        SchedulerSettings {
            dispatch_timeout: Duration::from_secs(self.scheduler.dispatch_timeout_secs),
            dry_run: self.scheduler.dry_run,
        }
    }

    #[must_use]
    pub fn holiday_client(&self) -> offhours_adapter_holidays_http::Config {
        offhours_adapter_holidays_http::Config {
            url_template: self.holidays.url.clone(),
            timeout: Duration::from_secs(self.holidays.timeout_secs),
        }
    }

    /// Read and validate the schedule document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Schedule`] if the document cannot be read or
    /// parsed, or [`ConfigError::InvalidRule`] for the first invalid rule.
    pub fn load_rules(&self) -> Result<Vec<Rule>, ConfigError> {
        let path = &self.scheduler.schedule_path;
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Schedule {
            path: path.clone(),
            source: Box::new(source),
        })?;
        parse_schedule(&content).map_err(|err| match err {
            ConfigError::Parse(source) => ConfigError::Schedule {
                path: path.clone(),
                source: Box::new(source),
            },
            other => other,
        })
    }
}

/// Parse a schedule document:
///
/// ```toml
/// [[rules]]
/// name = "office hours"
/// kind = "ec2"
/// resource_id = "i-0a1b2c3d4e5f60718"
/// action = "start"
/// hour = 8
/// minute = 0
/// weekdays = [1, 2, 3, 4, 5]
/// holiday_policy = "cancel_on_holiday"
/// ```
///
/// An unrecognised `kind` or `action` is kept and reported at evaluation
/// time; out-of-range times and weekdays are rejected here.
///
/// # Errors
///
/// Returns [`ConfigError::Parse`] for malformed documents and
/// [`ConfigError::InvalidRule`] for the first rule violating an invariant.
pub fn parse_schedule(content: &str) -> Result<Vec<Rule>, ConfigError> {
    let document: ScheduleDocument = toml::from_str(content)?;
    for rule in &document.rules {
        rule.validate().map_err(|source| ConfigError::InvalidRule {
            name: rule.name.clone(),
            source,
        })?;
    }
    Ok(document.rules)
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite:offhours.db?mode=rwc".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "offhoursd=info,offhours=info,tower_http=debug".to_string(),
        }
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            timezone: "Asia/Tokyo".to_string(),
            schedule_path: "schedule.toml".to_string(),
            tick_seconds: 300,
            dispatch_timeout_secs: 30,
            dry_run: false,
        }
    }
}

impl Default for HolidaysConfig {
    fn default() -> Self {
        Self {
            url: offhours_adapter_holidays_http::DEFAULT_URL_TEMPLATE.to_string(),
            timeout_secs: 10,
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
    /// The schedule document is missing or malformed.
    #[error("failed to load schedule {path}")]
    Schedule {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// A rule violates a domain invariant.
    #[error("invalid rule {name:?}")]
    InvalidRule {
        name: String,
        #[source]
        source: OffhoursError,
    },
}
