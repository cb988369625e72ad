//! AES-256-GCM encryption of sensitive text fields at rest.
//!
//! Stored form: `hex(iv):hex(ciphertext):hex(tag)` with a 16-byte IV and a
//! 16-byte tag. Two-segment `hex(iv):hex(ciphertext)` values written by the
//! old AES-256-CBC code path are accepted for decryption only.

use aes::Aes256;
use aes_gcm::aead::consts::U16;
use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{AesGcm, Nonce};
use cbc::cipher::block_padding::Pkcs7;
use cbc::cipher::{BlockDecryptMut, KeyIvInit};
use zeroize::Zeroizing;

use carerconnect_config::SecretConfig;

use crate::error::CryptoError;
use crate::kdf::derive_field_key;
use crate::types::{
    AES_KEY_LENGTH, FIELD_ERROR_PLACEHOLDER, FIELD_IV_LENGTH, FIELD_SEGMENTS, FIELD_TAG_LENGTH,
    LEGACY_FIELD_SEGMENTS,
};

// The stored-field format carries a 16-byte IV, so the GCM instance is
// parameterized over a 16-byte nonce rather than the usual 12.
type FieldGcm = AesGcm<Aes256, U16>;
type LegacyCbcDec = cbc::Decryptor<Aes256>;

/// Reversible, authenticated protection of sensitive text fields.
///
/// Immutable after construction; `&self` methods are safe to call from any
/// number of concurrent tasks.
pub struct FieldCipher {
    cipher: FieldGcm,
    // Raw master-secret bytes, kept only for the legacy CBC decode path.
    legacy_key: Zeroizing<[u8; AES_KEY_LENGTH]>,
}

impl FieldCipher {
    /// Derive the field key and build the cipher. Runs once at startup.
    pub fn new(config: &SecretConfig) -> Result<Self, CryptoError> {
        let legacy_key: [u8; AES_KEY_LENGTH] =
            config.master_secret().try_into().map_err(|_| {
                CryptoError::InvalidKeyLength {
                    expected: AES_KEY_LENGTH,
                    got: config.master_secret().len(),
                }
            })?;
        let key = derive_field_key(config.master_secret(), config.kdf_salt())?;
        let cipher = FieldGcm::new_from_slice(&key[..])
            .map_err(|e| CryptoError::EncryptionFailed(e.to_string()))?;
        Ok(Self {
            cipher,
            legacy_key: Zeroizing::new(legacy_key),
        })
    }

    /// Encrypt a plaintext field for storage.
    ///
    /// A fresh random IV is generated on every call, so encrypting the same
    /// plaintext twice yields two different stored values. The empty string
    /// encrypts to a field that decrypts back to the empty string.
    pub fn encrypt(&self, plaintext: &str) -> Result<String, CryptoError> {
        let iv = generate_iv()?;
        let nonce = Nonce::<U16>::from_slice(&iv);
        let sealed = self
            .cipher
            .encrypt(nonce, plaintext.as_bytes())
            .map_err(|e| CryptoError::EncryptionFailed(e.to_string()))?;

        let tag_start = sealed.len() - FIELD_TAG_LENGTH;
        Ok(format!(
            "{}:{}:{}",
            hex::encode(iv),
            hex::encode(&sealed[..tag_start]),
            hex::encode(&sealed[tag_start..])
        ))
    }

    /// Decrypt a stored field.
    ///
    /// The empty string means "no value stored" and returns `Ok("")`.
    /// Anything that is not a well-formed three-segment (or legacy
    /// two-segment) value, or whose tag fails authentication, is an error;
    /// callers decide whether to surface it or render a placeholder.
    pub fn decrypt(&self, stored: &str) -> Result<String, CryptoError> {
        if stored.is_empty() {
            return Ok(String::new());
        }
        let segments: Vec<&str> = stored.split(':').collect();
        match segments.len() {
            FIELD_SEGMENTS => self.decrypt_gcm(segments[0], segments[1], segments[2]),
            LEGACY_FIELD_SEGMENTS => self.decrypt_legacy(segments[0], segments[1]),
            n => Err(CryptoError::InvalidFieldFormat(n)),
        }
    }

    /// Decrypt an optional stored field; `None` behaves as "no value stored".
    pub fn decrypt_opt(&self, stored: Option<&str>) -> Result<String, CryptoError> {
        match stored {
            Some(value) => self.decrypt(value),
            None => Ok(String::new()),
        }
    }

    /// Decrypt for display, mapping any failure to
    /// [`FIELD_ERROR_PLACEHOLDER`].
    ///
    /// Bulk list responses use this so one corrupted field degrades to a
    /// placeholder instead of failing the request. The failure is logged
    /// server-side; no ciphertext or key material reaches the caller.
    pub fn decrypt_lossy(&self, stored: Option<&str>) -> String {
        match self.decrypt_opt(stored) {
            Ok(plaintext) => plaintext,
            Err(err) => {
                tracing::warn!(error = %err, "field decryption failed");
                FIELD_ERROR_PLACEHOLDER.to_string()
            }
        }
    }

    fn decrypt_gcm(&self, iv_hex: &str, ct_hex: &str, tag_hex: &str) -> Result<String, CryptoError> {
        let iv = decode_iv(iv_hex)?;
        let tag = hex::decode(tag_hex)?;
        if tag.len() != FIELD_TAG_LENGTH {
            return Err(CryptoError::InvalidTagLength {
                expected: FIELD_TAG_LENGTH,
                got: tag.len(),
            });
        }

        let mut sealed = hex::decode(ct_hex)?;
        sealed.extend_from_slice(&tag);

        let nonce = Nonce::<U16>::from_slice(&iv);
        let plaintext = self
            .cipher
            .decrypt(nonce, sealed.as_slice())
            .map_err(|e| CryptoError::DecryptionFailed(e.to_string()))?;
        String::from_utf8(plaintext).map_err(|_| CryptoError::NotUtf8)
    }

    // Legacy values were written with AES-256-CBC under the raw master
    // secret, before the derived-key GCM format existed.
    fn decrypt_legacy(&self, iv_hex: &str, ct_hex: &str) -> Result<String, CryptoError> {
        let iv = decode_iv(iv_hex)?;
        let ciphertext = hex::decode(ct_hex)?;

        let decryptor = LegacyCbcDec::new_from_slices(&self.legacy_key[..], &iv)
            .map_err(|e| CryptoError::DecryptionFailed(e.to_string()))?;
        let plaintext = decryptor
            .decrypt_padded_vec_mut::<Pkcs7>(&ciphertext)
            .map_err(|_| CryptoError::DecryptionFailed("CBC padding check failed".to_string()))?;
        String::from_utf8(plaintext).map_err(|_| CryptoError::NotUtf8)
    }
}

fn decode_iv(iv_hex: &str) -> Result<[u8; FIELD_IV_LENGTH], CryptoError> {
    let iv = hex::decode(iv_hex)?;
    iv.as_slice()
        .try_into()
        .map_err(|_| CryptoError::InvalidIvLength {
            expected: FIELD_IV_LENGTH,
            got: iv.len(),
        })
}

fn generate_iv() -> Result<[u8; FIELD_IV_LENGTH], CryptoError> {
    let mut iv = [0u8; FIELD_IV_LENGTH];
    getrandom::getrandom(&mut iv).map_err(|e| CryptoError::RngFailed(e.to_string()))?;
    Ok(iv)
}
