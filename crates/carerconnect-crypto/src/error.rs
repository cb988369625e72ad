use thiserror::Error;

#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("Invalid key length: expected {expected} bytes, got {got}")]
    InvalidKeyLength { expected: usize, got: usize },

    #[error("Key-derivation salt must not be empty")]
    EmptySalt,

    #[error("Key derivation failed: {0}")]
    KeyDerivationFailed(String),

    #[error("Invalid field format: expected 3 segments (or 2 for legacy), got {0}")]
    InvalidFieldFormat(usize),

    #[error("Invalid hex in encrypted field: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    #[error("Invalid IV length: expected {expected} bytes, got {got}")]
    InvalidIvLength { expected: usize, got: usize },

    #[error("Invalid tag length: expected {expected} bytes, got {got}")]
    InvalidTagLength { expected: usize, got: usize },

    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Decryption failed: {0}")]
    DecryptionFailed(String),

    #[error("Decrypted field is not valid UTF-8")]
    NotUtf8,

    #[error("Random number generation failed: {0}")]
    RngFailed(String),
}
