use crate::workflows::pricing::DEFAULT_WARNING_RATIO;
use std::env;
use std::net::{IpAddr, SocketAddr};

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub pricing: PricingConfig,
}

impl AppConfig {
    /// Reads `.env` (when present) and the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::parse(&env_or("APP_ENV", "development"));
        let host = env_or("APP_HOST", "127.0.0.1");
        let port = env_or("APP_PORT", "3000")
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;
        let log_level = env_or("APP_LOG_LEVEL", "info");
        let pricing = PricingConfig::from_env()?;

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            pricing,
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

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

        let ip: IpAddr = self.host.parse()?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Tunables for the pricing engine.
#[derive(Debug, Clone, PartialEq)]
pub struct PricingConfig {
    /// Share of a month's expiration cap above which a term is flagged
    /// `warning`. Independent of the hard cap.
    pub risk_warning_ratio: f64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            risk_warning_ratio: DEFAULT_WARNING_RATIO,
        }
    }
}

impl PricingConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let raw = match env::var("PRICING_RISK_WARNING_RATIO") {
            Ok(raw) => raw,
            Err(_) => return Ok(Self::default()),
        };

        let ratio = raw
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|ratio| *ratio > 0.0 && *ratio <= 1.0)
            .ok_or(ConfigError::InvalidRiskWarningRatio(raw))?;

        Ok(Self {
            risk_warning_ratio: ratio,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("APP_PORT must be a valid u16")]
    InvalidPort,
    #[error("APP_HOST must parse to an IPv4 or IPv6 address")]
    InvalidHost(#[from] std::net::AddrParseError),
    #[error("PRICING_RISK_WARNING_RATIO must be a number in (0, 1], got '{0}'")]
    InvalidRiskWarningRatio(String),
}
