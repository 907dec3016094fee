use crate::domain::feed::classifier::DEFAULT_TEST_SOURCE_PATTERNS;
use crate::domain::feed::DEFAULT_FEEDS;
use crate::infrastructure::fetcher::DEFAULT_MAX_BODY_BYTES;
use std::env;
use std::time::Duration;

pub const DEFAULT_FETCH_INTERVAL_SECS: u64 = 60;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
    #[error("invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    pub log_format: LogFormat,
    /// Bearer token required on `/api/*`; the admin API is open when unset
    pub admin_token: Option<String>,
    pub background_fetch_enabled: bool,
    pub background_fetch_interval: Duration,
    pub fetch_timeout: Duration,
    pub fetch_concurrency: usize,
    /// Feed bodies larger than this are rejected
    pub fetch_max_bytes: usize,
    pub request_timeout: Duration,
    pub test_source_patterns: Vec<String>,
    pub default_feeds: Vec<String>,
    pub user_agent: String,
    /// Non-fatal problems found while parsing, logged once tracing is up
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let mut warnings = Vec::new();

        let database_url = var("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let port = match var("PORT") {
            Some(value) => value
                .parse()
                .map_err(|_| ConfigError::Invalid { name: "PORT", value })?,
            None => 8080,
        };

        let background_fetch_interval = match var("BACKGROUND_FETCH_INTERVAL") {
            None => DEFAULT_FETCH_INTERVAL_SECS,
            Some(value) => match value.parse::<i64>() {
                Ok(secs) if secs > 0 => secs as u64,
                _ => {
                    warnings.push(format!(
                        "Invalid BACKGROUND_FETCH_INTERVAL {:?}, using {}s",
                        value, DEFAULT_FETCH_INTERVAL_SECS
                    ));
                    DEFAULT_FETCH_INTERVAL_SECS
                }
            },
        };

        let config = Config {
            database_url,
            host: var("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            environment: match var("ENVIRONMENT").as_deref() {
                Some("production") => Environment::Production,
                _ => Environment::Development,
            },
            log_format: match var("LOG_FORMAT").as_deref() {
                Some("json") => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
            admin_token: var("ADMIN_TOKEN"),
            background_fetch_enabled: var("BACKGROUND_FETCH_ENABLED")
                .map(|v| parse_flag(&v))
                .unwrap_or(true),
            background_fetch_interval: Duration::from_secs(background_fetch_interval),
            fetch_timeout: Duration::from_secs(positive(&var, "FETCH_TIMEOUT_SECS", 30)?),
            fetch_concurrency: positive(&var, "FETCH_CONCURRENCY", 10)? as usize,
            fetch_max_bytes: positive(&var, "FETCH_MAX_BYTES", DEFAULT_MAX_BODY_BYTES as u64)?
                as usize,
            request_timeout: Duration::from_secs(positive(&var, "REQUEST_TIMEOUT_SECS", 60)?),
            test_source_patterns: var("TEST_SOURCE_PATTERNS")
                .map(|v| split_list(&v))
                .unwrap_or_else(|| {
                    DEFAULT_TEST_SOURCE_PATTERNS
                        .iter()
                        .map(|p| regex::escape(p))
                        .collect()
                }),
            default_feeds: var("DEFAULT_FEEDS")
                .map(|v| split_list(&v))
                .unwrap_or_else(|| DEFAULT_FEEDS.iter().map(|s| s.to_string()).collect()),
            user_agent: var("USER_AGENT").unwrap_or_else(|| {
                format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
            }),
            warnings,
        };

        Ok(config)
    }

    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(value.to_lowercase().as_str(), "true" | "1" | "yes" | "on")
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn positive<F>(var: &F, name: &'static str, default: u64) -> Result<u64, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match var(name) {
        None => Ok(default),
        Some(value) => match value.parse::<u64>() {
            Ok(n) if n > 0 => Ok(n),
            _ => Err(ConfigError::Invalid { name, value }),
        },
    }
}
