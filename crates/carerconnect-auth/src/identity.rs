//! Per-request identity resolution from a bearer credential.
//!
//! Protected operations require a verified token; operations that merely
//! accept optional identity swallow verification failures and continue
//! anonymously. Nothing here is persisted between requests.

use crate::error::AuthError;
use crate::token::{Claims, TokenSigner};

/// Outcome of resolving an optional bearer credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identity {
    Anonymous,
    Authenticated(Claims),
}

impl Identity {
    pub fn claims(&self) -> Option<&Claims> {
        match self {
            Identity::Authenticated(claims) => Some(claims),
            Identity::Anonymous => None,
        }
    }
}

/// Extract the token from an `Authorization: Bearer <token>` header value.
pub fn bearer_token(header: &str) -> Option<&str> {
    let token = header.strip_prefix("Bearer ")?.trim();
    (!token.is_empty()).then_some(token)
}

impl TokenSigner {
    /// Resolve identity for a protected operation.
    ///
    /// An absent or non-bearer credential is [`AuthError::Missing`]; a
    /// present one is verified and any failure propagates. Route handlers
    /// map all three failure variants to an authentication-required
    /// response.
    pub fn require_bearer(&self, authorization: Option<&str>) -> Result<Claims, AuthError> {
        let token = authorization
            .and_then(bearer_token)
            .ok_or(AuthError::Missing)?;
        self.verify(token)
    }

    /// Resolve identity for an operation that accepts optional identity.
    ///
    /// Verification failures are logged and the request proceeds as
    /// [`Identity::Anonymous`]; they are never surfaced to the caller.
    pub fn optional_bearer(&self, authorization: Option<&str>) -> Identity {
        let Some(token) = authorization.and_then(bearer_token) else {
            return Identity::Anonymous;
        };
        match self.verify(token) {
            Ok(claims) => Identity::Authenticated(claims),
            Err(err) => {
                tracing::debug!(error = %err, "optional bearer credential rejected");
                Identity::Anonymous
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use carerconnect_config::SecretConfig;

    use super::*;
    use crate::token::UserClaims;

    fn signer() -> TokenSigner {
        let config = SecretConfig::new(
            "s3cret-master-key-32-bytes-long!",
            "pepper",
            "signing-secret",
        )
        .unwrap();
        TokenSigner::new(&config)
    }

    fn issue(signer: &TokenSigner) -> String {
        signer
            .issue(&UserClaims {
                subject_id: "user-42".to_string(),
                email: "alice@example.org".to_string(),
                role: "member".to_string(),
            })
            .unwrap()
    }

    #[test]
    fn bearer_token_parsing() {
        assert_eq!(bearer_token("Bearer abc.def.ghi"), Some("abc.def.ghi"));
        assert_eq!(bearer_token("Bearer "), None);
        assert_eq!(bearer_token("Basic dXNlcjpwYXNz"), None);
        assert_eq!(bearer_token("abc.def.ghi"), None);
    }

    #[test]
    fn protected_route_requires_credential() {
        let signer = signer();
        assert_eq!(
            signer.require_bearer(None).unwrap_err(),
            AuthError::Missing
        );
        assert_eq!(
            signer.require_bearer(Some("Basic foo")).unwrap_err(),
            AuthError::Missing
        );
    }

    #[test]
    fn protected_route_accepts_valid_token() {
        let signer = signer();
        let header = format!("Bearer {}", issue(&signer));
        let claims = signer.require_bearer(Some(&header)).unwrap();
        assert_eq!(claims.sub, "user-42");
    }

    #[test]
    fn protected_route_rejects_bad_token() {
        let signer = signer();
        assert_eq!(
            signer.require_bearer(Some("Bearer junk")).unwrap_err(),
            AuthError::Malformed
        );
    }

    #[test]
    fn optional_route_continues_anonymously() {
        let signer = signer();
        assert_eq!(signer.optional_bearer(None), Identity::Anonymous);
        assert_eq!(
            signer.optional_bearer(Some("Bearer junk")),
            Identity::Anonymous
        );
    }

    #[test]
    fn optional_route_attaches_identity_when_valid() {
        let signer = signer();
        let header = format!("Bearer {}", issue(&signer));
        let identity = signer.optional_bearer(Some(&header));
        assert_eq!(identity.claims().unwrap().email, "alice@example.org");
    }
}
