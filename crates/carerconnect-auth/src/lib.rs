//! Credential management for CarerConnect.
//!
//! Password lifecycle (Argon2id), stateless session tokens (JWT/HS256,
//! 7-day validity), per-request identity resolution, and optional TOTP
//! two-factor enrollment. Pure CPU-bound functions over an immutable
//! signing secret; no I/O and no shared mutable state.

pub mod error;
pub mod identity;
pub mod password;
pub mod token;
pub mod totp;

pub use error::AuthError;
pub use identity::{bearer_token, Identity};
pub use password::{check_credentials, hash_password, verify_password};
pub use token::{Claims, TokenSigner, UserClaims, TOKEN_TTL_SECS};
pub use totp::{
    generate_totp_secret, provisioning_uri, totp_code, verify_totp, TOTP_DIGITS,
    TOTP_SECRET_LENGTH, TOTP_STEP_SECS,
};
