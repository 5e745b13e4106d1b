//! Process configuration read from `APP_*` variables, with `.env` support.

use std::env;
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    /// Unknown names fall back to development.
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
    pub assessment: AssessmentConfig,
}

impl AppConfig {
    /// Read the process environment after loading any `.env` file.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let environment = read("APP_ENV")
            .map(|value| AppEnvironment::parse(&value))
            .unwrap_or(AppEnvironment::Development);

        let server = ServerConfig {
            host: read("APP_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: parse_optional("APP_PORT", read("APP_PORT"))?.unwrap_or(DEFAULT_PORT),
        };
        server.socket_addr()?;

        Ok(Self {
            environment,
            server,
            telemetry: TelemetryConfig {
                log_level: read("APP_LOG_LEVEL").unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
            },
            assessment: AssessmentConfig {
                question_seed: parse_optional("APP_QUESTION_SEED", read("APP_QUESTION_SEED"))?,
            },
        })
    }
}

fn parse_optional<T: FromStr>(
    key: &'static str,
    raw: Option<String>,
) -> Result<Option<T>, ConfigError> {
    raw.map(|value| {
        value
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::InvalidNumber { key, value })
    })
    .transpose()
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip = if self.host.eq_ignore_ascii_case("localhost") {
            IpAddr::V4(Ipv4Addr::LOCALHOST)
        } else {
            self.host
                .parse()
                .map_err(|source| ConfigError::InvalidHost {
                    value: self.host.clone(),
                    source,
                })?
        };
        Ok(SocketAddr::new(ip, self.port))
    }
}

#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Engine dials. A fixed seed pins the follow-up question shuffle.
#[derive(Debug, Clone, Default)]
pub struct AssessmentConfig {
    pub question_seed: Option<u64>,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidNumber {
        key: &'static str,
        value: String,
    },
    InvalidHost {
        value: String,
        source: std::net::AddrParseError,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidNumber { key, value } => {
                write!(f, "{key} must be an unsigned integer in range (got '{value}')")
            }
            ConfigError::InvalidHost { value, .. } => {
                write!(f, "APP_HOST must be localhost or an IP address (got '{value}')")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidNumber { .. } => None,
            ConfigError::InvalidHost { source, .. } => Some(source),
        }
    }
}
