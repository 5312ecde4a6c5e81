use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

const DEFAULT_ALLOY_BASE_URL: &str = "https://sandbox.alloy.co/v1";
const DEFAULT_METADATA_TIMEOUT_SECS: u64 = 10;
const DEFAULT_EVALUATION_TIMEOUT_SECS: u64 = 30;

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
    pub alloy: AlloyConfig,
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
            alloy: AlloyConfig::read()?,
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

/// Connection settings for the Alloy sandbox workflow.
///
/// The metadata timeout bounds the lightweight `GET /parameters` preflight;
/// the evaluation timeout bounds the full `POST /evaluations` submission.
#[derive(Clone)]
pub struct AlloyConfig {
    pub base_url: String,
    pub workflow_token: String,
    pub workflow_secret: String,
    pub metadata_timeout: Duration,
    pub evaluation_timeout: Duration,
}

impl AlloyConfig {
    /// Load only the screening settings, for flows that never bind a server.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::read()
    }

    fn read() -> Result<Self, ConfigError> {
        let base_url = env::var("ALLOY_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_ALLOY_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            base_url,
            workflow_token: required_credential("ALLOY_WORKFLOW_TOKEN")?,
            workflow_secret: required_credential("ALLOY_WORKFLOW_SECRET")?,
            metadata_timeout: timeout_secs(
                "ALLOY_METADATA_TIMEOUT_SECS",
                DEFAULT_METADATA_TIMEOUT_SECS,
            )?,
            evaluation_timeout: timeout_secs(
                "ALLOY_EVALUATION_TIMEOUT_SECS",
                DEFAULT_EVALUATION_TIMEOUT_SECS,
            )?,
        })
    }
}

// Credentials must never surface in logs or error chains.
impl fmt::Debug for AlloyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlloyConfig")
            .field("base_url", &self.base_url)
            .field("workflow_token", &"<redacted>")
            .field("workflow_secret", &"<redacted>")
            .field("metadata_timeout", &self.metadata_timeout)
            .field("evaluation_timeout", &self.evaluation_timeout)
            .finish()
    }
}

fn required_credential(name: &'static str) -> Result<String, ConfigError> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::MissingCredential { name }),
    }
}

fn timeout_secs(name: &'static str, default_secs: u64) -> Result<Duration, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<u64>()
            .map(Duration::from_secs)
            .map_err(|_| ConfigError::InvalidTimeout { name }),
        Err(_) => Ok(Duration::from_secs(default_secs)),
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    MissingCredential { name: &'static str },
    InvalidTimeout { name: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::MissingCredential { name } => {
                write!(f, "missing {name}; set it in the environment or .env")
            }
            ConfigError::InvalidTimeout { name } => {
                write!(f, "{name} must be a whole number of seconds")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::MissingCredential { .. }
            | ConfigError::InvalidTimeout { .. } => None,
        }
    }
}
