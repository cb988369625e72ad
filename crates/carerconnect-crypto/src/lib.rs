//! Field-level encryption for CarerConnect.
//!
//! Sensitive text columns (display name, status) are encrypted before they
//! reach the data store and decrypted on the way out. The key is derived
//! once at startup from the configured master secret and salt; everything
//! else in the stored record stays plaintext.

pub mod error;
pub mod field;
pub mod kdf;
pub mod types;

pub use error::CryptoError;
pub use field::FieldCipher;
pub use kdf::derive_field_key;
pub use types::{
    AES_KEY_LENGTH, FIELD_ERROR_PLACEHOLDER, FIELD_IV_LENGTH, FIELD_SEGMENTS, FIELD_TAG_LENGTH,
    LEGACY_FIELD_SEGMENTS,
};
