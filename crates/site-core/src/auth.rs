//! Admin authentication.
//!
//! The panel never sees a secret directly. It asks an [`Authenticator`]
//! whether an attempt is valid. [`SharedSecretAuthenticator`] keeps only the
//! SHA-256 digest of the configured secret and compares digests in constant time.

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;
use thiserror::Error;
use tracing::warn;

/// Environment variable holding the admin secret.
pub const ADMIN_PASSWORD_ENV: &str = "ADMIN_PASSWORD";

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("authenticator unavailable: {0}")]
    Unavailable(String),
}

/// Decides whether a password attempt unlocks the admin panel.
#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn verify(&self, attempt: &str) -> Result<bool, AuthError>;
}

/// Checks attempts against one shared secret.
///
/// With no secret configured every attempt fails.
#[derive(Clone)]
pub struct SharedSecretAuthenticator {
    digest: Option<[u8; 32]>,
}

impl std::fmt::Debug for SharedSecretAuthenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedSecretAuthenticator")
            .field("configured", &self.digest.is_some())
            .finish()
    }
}

impl SharedSecretAuthenticator {
    /// Use `secret`. An empty secret leaves the authenticator disabled.
    pub fn new(secret: &str) -> Self {
        if secret.is_empty() {
            return Self::disabled();
        }
        Self {
            digest: Some(digest(secret)),
        }
    }

    /// Rejects every attempt.
    pub fn disabled() -> Self {
        Self { digest: None }
    }

    /// Read the secret from `ADMIN_PASSWORD`.
    pub fn from_env() -> Self {
        match std::env::var(ADMIN_PASSWORD_ENV) {
            Ok(secret) if !secret.is_empty() => Self::new(&secret),
            _ => {
                warn!("{} not set; admin login is disabled", ADMIN_PASSWORD_ENV);
                Self::disabled()
            }
        }
    }

    pub fn is_configured(&self) -> bool {
        self.digest.is_some()
    }
}

#[async_trait]
impl Authenticator for SharedSecretAuthenticator {
    async fn verify(&self, attempt: &str) -> Result<bool, AuthError> {
        let Some(expected) = &self.digest else {
            return Ok(false);
        };
        Ok(bool::from(digest(attempt)[..].ct_eq(&expected[..])))
    }
}

fn digest(value: &str) -> [u8; 32] {
    Sha256::digest(value.as_bytes()).into()
}
