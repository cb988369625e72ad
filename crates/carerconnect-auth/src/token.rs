//! Stateless session tokens (JWT, HS256).
//!
//! Validity is purely a function of the token and the signing secret: no
//! server-side session store, no revocation list. Claims are copied by value
//! at issuance and returned unchanged on verification.

use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use carerconnect_config::SecretConfig;

use crate::error::AuthError;

/// Session lifetime: 7 days from issuance.
pub const TOKEN_TTL_SECS: i64 = 7 * 24 * 60 * 60;

/// Identity claims supplied by the caller at issuance, copied verbatim from
/// the authenticated user record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserClaims {
    pub subject_id: String,
    pub email: String,
    pub role: String,
}

/// Claims embedded in a session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject identifier (user id).
    pub sub: String,
    pub email: String,
    pub role: String,
    /// Issued-at, seconds since the Unix epoch.
    pub iat: i64,
    /// Expiry, seconds since the Unix epoch.
    pub exp: i64,
}

/// Issues and verifies session tokens. Immutable after construction.
pub struct TokenSigner {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl TokenSigner {
    pub fn new(config: &SecretConfig) -> Self {
        Self {
            encoding: EncodingKey::from_secret(config.token_secret()),
            decoding: DecodingKey::from_secret(config.token_secret()),
        }
    }

    /// Sign a session token for the given user, valid for
    /// [`TOKEN_TTL_SECS`] from now.
    pub fn issue(&self, user: &UserClaims) -> Result<String, AuthError> {
        self.issue_at(user, Utc::now().timestamp())
    }

    pub(crate) fn issue_at(&self, user: &UserClaims, issued_at: i64) -> Result<String, AuthError> {
        let claims = Claims {
            sub: user.subject_id.clone(),
            email: user.email.clone(),
            role: user.role.clone(),
            iat: issued_at,
            exp: issued_at + TOKEN_TTL_SECS,
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AuthError::SigningFailed(e.to_string()))
    }

    /// Verify signature and expiry; no external store is consulted.
    ///
    /// Returns [`AuthError::Expired`] past `exp` and
    /// [`AuthError::Malformed`] for any structural or signature problem.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;
        decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::Expired,
                _ => AuthError::Malformed,
            })
    }
}
