use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use crate::telemetry::LogFormat;
use crate::valuation::{Locale, ValuationConfig};

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub data: DataConfig,
    pub valuation: ValuationConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        let log_format = match env::var("APP_LOG_FORMAT") {
            Ok(raw) => {
                LogFormat::parse(&raw).ok_or_else(|| ConfigError::InvalidLogFormat(raw.clone()))?
            }
            Err(_) => LogFormat::default(),
        };
        let log_ansi = match env::var("APP_LOG_ANSI") {
            Ok(raw) => parse_flag("APP_LOG_ANSI", &raw)?,
            Err(_) => false,
        };

        let listings_csv = env::var("APP_LISTINGS_CSV")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);

        let mut valuation = ValuationConfig::default();
        if let Ok(raw) = env::var("APP_LOCALE") {
            valuation.locale =
                Locale::parse(&raw).ok_or_else(|| ConfigError::InvalidLocale(raw.clone()))?;
        }
        if let Ok(raw) = env::var("APP_NARRATIVE_EMOJI") {
            valuation.narrative.use_emoji = parse_flag("APP_NARRATIVE_EMOJI", &raw)?;
        }
        if let Ok(raw) = env::var("APP_NARRATIVE_MAX_POINTS") {
            valuation.narrative.max_points = raw
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|points| *points > 0)
                .ok_or(ConfigError::InvalidMaxPoints)?;
        }

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig {
                log_level,
                format: log_format,
                ansi: log_ansi,
            },
            data: DataConfig { listings_csv },
            valuation,
        })
    }
}

fn parse_flag(name: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "" | "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidFlag {
            name,
            value: raw.to_string(),
        }),
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing and metrics controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
    pub format: LogFormat,
    pub ansi: bool,
}

/// Where the in-memory listing source is hydrated from.
#[derive(Debug, Clone, Default)]
pub struct DataConfig {
    pub listings_csv: Option<PathBuf>,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidLocale(String),
    InvalidLogFormat(String),
    InvalidFlag { name: &'static str, value: String },
    InvalidMaxPoints,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidLocale(value) => {
                write!(f, "APP_LOCALE must be one of 'en' or 'zh' (got '{value}')")
            }
            ConfigError::InvalidLogFormat(value) => {
                write!(f, "APP_LOG_FORMAT must be 'compact' or 'json' (got '{value}')")
            }
            ConfigError::InvalidFlag { name, value } => {
                write!(f, "{name} must be a boolean flag (got '{value}')")
            }
            ConfigError::InvalidMaxPoints => {
                write!(f, "APP_NARRATIVE_MAX_POINTS must be a positive integer")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidLocale(_)
            | ConfigError::InvalidLogFormat(_)
            | ConfigError::InvalidFlag { .. }
            | ConfigError::InvalidMaxPoints => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        for key in [
            "APP_ENV",
            "APP_HOST",
            "APP_PORT",
            "APP_LOG_LEVEL",
            "APP_LOG_FORMAT",
            "APP_LOG_ANSI",
            "APP_LISTINGS_CSV",
            "APP_LOCALE",
            "APP_NARRATIVE_EMOJI",
            "APP_NARRATIVE_MAX_POINTS",
        ] {
            env::remove_var(key);
        }
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.telemetry.format, LogFormat::Compact);
        assert!(!config.telemetry.ansi);
        assert!(config.data.listings_csv.is_none());
        assert_eq!(config.valuation, ValuationConfig::default());
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
        reset_env();
    }

    #[test]
    fn narrative_overrides_are_applied() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_LOCALE", "zh");
        env::set_var("APP_NARRATIVE_EMOJI", "1");
        env::set_var("APP_NARRATIVE_MAX_POINTS", "2");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.valuation.locale, Locale::Zh);
        assert!(config.valuation.narrative.use_emoji);
        assert_eq!(config.valuation.narrative.max_points, 2);
        reset_env();
    }

    #[test]
    fn rejects_unknown_locale_and_zero_points() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_LOCALE", "fr");
        assert!(matches!(
            AppConfig::load(),
            Err(ConfigError::InvalidLocale(value)) if value == "fr"
        ));
        reset_env();
        env::set_var("APP_NARRATIVE_MAX_POINTS", "0");
        assert!(matches!(
            AppConfig::load(),
            Err(ConfigError::InvalidMaxPoints)
        ));
        reset_env();
    }

    #[test]
    fn log_format_and_ansi_are_configurable() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_LOG_FORMAT", "json");
        env::set_var("APP_LOG_ANSI", "yes");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.telemetry.format, LogFormat::Json);
        assert!(config.telemetry.ansi);

        env::set_var("APP_LOG_FORMAT", "pretty");
        assert!(matches!(
            AppConfig::load(),
            Err(ConfigError::InvalidLogFormat(value)) if value == "pretty"
        ));
        reset_env();
    }
}
