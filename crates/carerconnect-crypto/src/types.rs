/// Field IV length in bytes (128 bits, fixed by the stored-field format).
pub const FIELD_IV_LENGTH: usize = 16;

/// AES-GCM tag length in bytes (128 bits).
pub const FIELD_TAG_LENGTH: usize = 16;

/// AES key length in bytes (256 bits).
pub const AES_KEY_LENGTH: usize = 32;

/// Segment count of the authenticated field format: `iv:ciphertext:tag`.
pub const FIELD_SEGMENTS: usize = 3;

/// Segment count of the legacy unauthenticated format: `iv:ciphertext`.
pub const LEGACY_FIELD_SEGMENTS: usize = 2;

/// Placeholder rendered in place of a field that failed to decrypt.
///
/// Bulk reads substitute this for corrupted or tampered values instead of
/// failing the whole response.
pub const FIELD_ERROR_PLACEHOLDER: &str = "Error";
