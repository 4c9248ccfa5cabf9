use crate::readiness::policy::{
    Normalization, ReadinessPolicy, ScoreWeights, DEFAULT_GENDER_TARGET_FEMALE,
    DEFAULT_GENDER_TOLERANCE, DEFAULT_TARGET_MIN,
};
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;

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
    pub readiness: ReadinessConfig,
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

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            readiness: ReadinessConfig::from_env()?,
        })
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
}

/// Scoring policy and roster defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct ReadinessConfig {
    pub target_min: u32,
    pub gender_target_female: f64,
    pub gender_tolerance: f64,
    pub weights: ScoreWeights,
    pub normalization: Normalization,
    pub rules_path: Option<PathBuf>,
}

impl ReadinessConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            target_min: env_number("READINESS_TARGET_MIN", defaults.target_min)?,
            gender_target_female: env_number(
                "READINESS_GENDER_TARGET",
                defaults.gender_target_female,
            )?,
            gender_tolerance: env_number("READINESS_GENDER_TOLERANCE", defaults.gender_tolerance)?,
            weights: ScoreWeights::new(
                env_number("READINESS_W_MIN", defaults.weights.w_min)?,
                env_number("READINESS_W_GENDER", defaults.weights.w_gender)?,
                env_number("READINESS_W_BUFFER", defaults.weights.w_buffer)?,
            ),
            normalization: Normalization::new(
                env_number(
                    "READINESS_MIN_GAP_SCALE",
                    defaults.normalization.min_gap_scale(),
                )?,
                env_number(
                    "READINESS_GENDER_GAP_SCALE",
                    defaults.normalization.gender_gap_scale(),
                )?,
                env_number("READINESS_BUFFER_SCALE", defaults.normalization.buffer_scale())?,
            ),
            rules_path: env::var("ELIGIBILITY_RULES_PATH")
                .ok()
                .filter(|value| !value.trim().is_empty())
                .map(PathBuf::from),
        })
    }

    pub fn policy(&self) -> ReadinessPolicy {
        ReadinessPolicy::new(
            self.gender_target_female,
            self.gender_tolerance,
            self.normalization,
            self.weights,
        )
    }
}

impl Default for ReadinessConfig {
    fn default() -> Self {
        Self {
            target_min: DEFAULT_TARGET_MIN,
            gender_target_female: DEFAULT_GENDER_TARGET_FEMALE,
            gender_tolerance: DEFAULT_GENDER_TOLERANCE,
            weights: ScoreWeights::default(),
            normalization: Normalization::default(),
            rules_path: None,
        }
    }
}

fn env_number<T: FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => {
            raw.trim()
                .parse::<T>()
                .map_err(|_| ConfigError::InvalidNumber { key, value: raw })
        }
        _ => Ok(default),
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidNumber { key: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidNumber { key, value } => {
                write!(f, "{} must be numeric (found '{}')", key, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::InvalidNumber { .. } => None,
            ConfigError::InvalidHost { source } => Some(source),
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
            "READINESS_TARGET_MIN",
            "READINESS_GENDER_TARGET",
            "READINESS_GENDER_TOLERANCE",
            "READINESS_W_MIN",
            "READINESS_W_GENDER",
            "READINESS_W_BUFFER",
            "READINESS_MIN_GAP_SCALE",
            "READINESS_GENDER_GAP_SCALE",
            "READINESS_BUFFER_SCALE",
            "ELIGIBILITY_RULES_PATH",
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
        assert_eq!(config.readiness, ReadinessConfig::default());
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
    fn reads_readiness_overrides() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("READINESS_TARGET_MIN", "4");
        env::set_var("READINESS_GENDER_TARGET", "0.4");
        env::set_var("READINESS_W_BUFFER", "0.1");
        env::set_var("ELIGIBILITY_RULES_PATH", "rules/rules.json");

        let config = AppConfig::load().expect("config loads");
        reset_env();

        assert_eq!(config.readiness.target_min, 4);
        assert_eq!(config.readiness.gender_target_female, 0.4);
        assert_eq!(config.readiness.weights.w_buffer, 0.1);
        assert_eq!(config.readiness.weights.w_min, 0.5);
        assert_eq!(
            config.readiness.rules_path,
            Some(PathBuf::from("rules/rules.json"))
        );
        assert_eq!(config.readiness.policy().gender_target_female(), 0.4);
    }

    #[test]
    fn rejects_non_numeric_readiness_values() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("READINESS_GENDER_TOLERANCE", "five percent");

        let result = AppConfig::load();
        reset_env();

        match result {
            Err(ConfigError::InvalidNumber { key, .. }) => {
                assert_eq!(key, "READINESS_GENDER_TOLERANCE")
            }
            other => panic!("expected invalid number error, got {other:?}"),
        }
    }
}
