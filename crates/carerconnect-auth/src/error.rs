use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    /// No bearer credential was presented on a protected operation.
    #[error("Authentication required")]
    Missing,

    /// Token signature and structure are valid but the token has expired.
    #[error("Session token expired")]
    Expired,

    /// Token is structurally invalid or its signature does not verify.
    #[error("Session token invalid")]
    Malformed,

    /// Wrong password or unknown user. One message for both, so responses
    /// cannot be used to enumerate accounts.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Token signing failed: {0}")]
    SigningFailed(String),

    #[error("Two-factor secret error: {0}")]
    TotpFailed(String),

    #[error("Random number generation failed: {0}")]
    RngFailed(String),
}
