//! Secret configuration for the CarerConnect security core.
//!
//! All secret material is read from the environment exactly once at startup
//! and threaded into the Field Cipher and Credential Manager as an immutable
//! value. Missing or malformed secrets abort startup; the process never
//! serves traffic with a weak or absent key.

use std::env;
use std::fmt;

use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Environment variable holding the master encryption secret.
pub const ENV_MASTER_SECRET: &str = "ENCRYPTION_KEY";

/// Environment variable holding the key-derivation salt.
pub const ENV_KDF_SALT: &str = "ENCRYPTION_SALT";

/// Environment variable holding the session-token signing secret.
pub const ENV_TOKEN_SECRET: &str = "JWT_SECRET";

/// Required byte length of the master secret (256 bits).
pub const MASTER_SECRET_LENGTH: usize = 32;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    MissingVar(&'static str),

    #[error("{0} must not be empty")]
    EmptyVar(&'static str),

    #[error("{var} must be exactly {expected} bytes, got {got}")]
    InvalidSecretLength {
        var: &'static str,
        expected: usize,
        got: usize,
    },
}

/// Immutable secret material for the process lifetime.
///
/// Built once at startup via [`SecretConfig::from_env`] (or
/// [`SecretConfig::new`] in tests and embedders) and shared by reference.
/// Zeroized on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecretConfig {
    master_secret: String,
    kdf_salt: String,
    token_secret: String,
}

impl SecretConfig {
    /// Build a config from explicit values, validating them the same way
    /// [`SecretConfig::from_env`] does.
    pub fn new(
        master_secret: impl Into<String>,
        kdf_salt: impl Into<String>,
        token_secret: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let config = Self {
            master_secret: master_secret.into(),
            kdf_salt: kdf_salt.into(),
            token_secret: token_secret.into(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Read and validate the three secret variables from the environment.
    ///
    /// Fails fast: callers are expected to abort startup on any error.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::new(
            read_var(ENV_MASTER_SECRET)?,
            read_var(ENV_KDF_SALT)?,
            read_var(ENV_TOKEN_SECRET)?,
        )
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.master_secret.is_empty() {
            return Err(ConfigError::EmptyVar(ENV_MASTER_SECRET));
        }
        if self.master_secret.len() != MASTER_SECRET_LENGTH {
            return Err(ConfigError::InvalidSecretLength {
                var: ENV_MASTER_SECRET,
                expected: MASTER_SECRET_LENGTH,
                got: self.master_secret.len(),
            });
        }
        if self.kdf_salt.is_empty() {
            return Err(ConfigError::EmptyVar(ENV_KDF_SALT));
        }
        if self.token_secret.is_empty() {
            return Err(ConfigError::EmptyVar(ENV_TOKEN_SECRET));
        }
        Ok(())
    }

    /// Raw master secret bytes (exactly [`MASTER_SECRET_LENGTH`]).
    pub fn master_secret(&self) -> &[u8] {
        self.master_secret.as_bytes()
    }

    /// Salt bytes for key derivation.
    pub fn kdf_salt(&self) -> &[u8] {
        self.kdf_salt.as_bytes()
    }

    /// Signing secret for session tokens.
    pub fn token_secret(&self) -> &[u8] {
        self.token_secret.as_bytes()
    }
}

// Secrets never appear in logs or debug output.
impl fmt::Debug for SecretConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretConfig").finish_non_exhaustive()
    }
}

fn read_var(name: &'static str) -> Result<String, ConfigError> {
    env::var(name).map_err(|_| ConfigError::MissingVar(name))
}
