//! Configuration loaded from environment variables.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use site_core::{DelayPolicy, PaymentPolicy};

const DEFAULT_ADDR: &str = "127.0.0.1:8790";
const DEFAULT_DATABASE_URL: &str = "sqlite:nactax.db?mode=rwc";
const DEFAULT_SUCCESS_PROBABILITY: f64 = 0.9;
const DEFAULT_PAYMENT_DELAY_MS: u64 = 2_000;
const DEFAULT_SESSION_MAX: usize = 10_000;

/// Site server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address.
    pub addr: SocketAddr,
    /// SQLite database URL.
    pub database_url: String,
    /// Outcome policy of the payment simulator.
    pub payment_policy: PaymentPolicy,
    /// Visitor sessions kept before the least recently used is evicted.
    pub session_max: usize,
    /// Directory served under `/static`.
    pub static_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 8790)),
            database_url: DEFAULT_DATABASE_URL.to_string(),
            payment_policy: PaymentPolicy::default(),
            session_max: DEFAULT_SESSION_MAX,
            static_dir: PathBuf::from("static"),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Description | Default |
    /// |----------|-------------|---------|
    /// | `SITE_ADDR` | Server bind address | `127.0.0.1:8790` |
    /// | `SQLITE_PATH` | SQLite database URL | `sqlite:nactax.db?mode=rwc` |
    /// | `PAYMENT_SUCCESS_PROBABILITY` | Chance a simulated payment succeeds | `0.9` |
    /// | `PAYMENT_DELAY_MS` | Simulated processing time | `2000` |
    /// | `SESSION_MAX` | Visitor sessions kept in memory | `10000` |
    /// | `STATIC_DIR` | Stylesheet and asset directory | `static` |
    ///
    /// The admin secret (`ADMIN_PASSWORD`) is read by the authenticator, and
    /// the chat backend reads its own `GEMINI_*` variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let addr = env::var("SITE_ADDR")
            .unwrap_or_else(|_| DEFAULT_ADDR.to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidAddr)?;

        let database_url =
            env::var("SQLITE_PATH").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());

        let success_probability: f64 =
            parse_var("PAYMENT_SUCCESS_PROBABILITY", DEFAULT_SUCCESS_PROBABILITY)?;
        if !(0.0..=1.0).contains(&success_probability) {
            return Err(ConfigError::OutOfRange {
                var: "PAYMENT_SUCCESS_PROBABILITY",
            });
        }

        let delay_ms: u64 = parse_var("PAYMENT_DELAY_MS", DEFAULT_PAYMENT_DELAY_MS)?;
        let session_max: usize = parse_var("SESSION_MAX", DEFAULT_SESSION_MAX)?;
        if session_max == 0 {
            return Err(ConfigError::OutOfRange { var: "SESSION_MAX" });
        }

        let static_dir = env::var("STATIC_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("static"));

        Ok(Self {
            addr,
            database_url,
            payment_policy: PaymentPolicy::new(
                success_probability,
                DelayPolicy::Fixed(Duration::from_millis(delay_ms)),
            ),
            session_max,
            static_dir,
        })
    }
}

fn parse_var<T: std::str::FromStr>(var: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(var) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidNumber { var, value: raw }),
        Err(_) => Ok(default),
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid SITE_ADDR format")]
    InvalidAddr,

    #[error("{var} is not a valid number: {value:?}")]
    InvalidNumber { var: &'static str, value: String },

    #[error("{var} is out of range")]
    OutOfRange { var: &'static str },
}
