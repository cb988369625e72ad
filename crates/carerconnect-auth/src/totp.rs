//! TOTP two-factor authentication (RFC 6238, HMAC-SHA-1).
//!
//! Enrollment: generate a secret, hand the base32 form (or the
//! `otpauth://` URL as a QR code) to the user's authenticator app, then
//! require one valid code before marking two-factor as enabled.

use hmac::{Hmac, Mac};
use sha1::Sha1;

use crate::error::AuthError;

/// Shared-secret length in bytes (160 bits, matching the SHA-1 block output).
pub const TOTP_SECRET_LENGTH: usize = 20;

/// Time-step size in seconds.
pub const TOTP_STEP_SECS: u64 = 30;

/// Code length in digits.
pub const TOTP_DIGITS: u32 = 6;

// Accept codes from the adjacent time steps to tolerate clock drift.
const TOTP_WINDOW: i64 = 1;

const BASE32_ALPHABET: &[u8; 32] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";

/// Generate a fresh random TOTP secret.
pub fn generate_totp_secret() -> Result<[u8; TOTP_SECRET_LENGTH], AuthError> {
    let mut secret = [0u8; TOTP_SECRET_LENGTH];
    getrandom::getrandom(&mut secret).map_err(|e| AuthError::RngFailed(e.to_string()))?;
    Ok(secret)
}

/// The `otpauth://` provisioning URL encoded into the enrollment QR code.
pub fn provisioning_uri(secret: &[u8], account: &str) -> String {
    format!(
        "otpauth://totp/CarerConnect:{account}?secret={}&issuer=CarerConnect\
         &algorithm=SHA1&digits={TOTP_DIGITS}&period={TOTP_STEP_SECS}",
        base32_encode(secret)
    )
}

/// The code a correct authenticator shows at `unix_time`.
pub fn totp_code(secret: &[u8], unix_time: u64) -> Result<String, AuthError> {
    hotp(secret, unix_time / TOTP_STEP_SECS)
}

/// Check a user-supplied code against the secret at `unix_time`.
///
/// Codes from the previous and next time step are accepted; anything else,
/// including non-numeric input, is simply `false`.
pub fn verify_totp(secret: &[u8], code: &str, unix_time: u64) -> bool {
    let code = code.trim();
    if code.len() != TOTP_DIGITS as usize || !code.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    let step = (unix_time / TOTP_STEP_SECS) as i64;
    for delta in -TOTP_WINDOW..=TOTP_WINDOW {
        let Ok(counter) = u64::try_from(step + delta) else {
            continue;
        };
        if hotp(secret, counter).is_ok_and(|expected| expected == code) {
            return true;
        }
    }
    false
}

// HOTP (RFC 4226): HMAC-SHA-1 over the big-endian counter, dynamic
// truncation to 31 bits, reduced to TOTP_DIGITS decimal digits.
fn hotp(secret: &[u8], counter: u64) -> Result<String, AuthError> {
    let mut mac = Hmac::<Sha1>::new_from_slice(secret)
        .map_err(|e| AuthError::TotpFailed(e.to_string()))?;
    mac.update(&counter.to_be_bytes());
    let digest = mac.finalize().into_bytes();

    let offset = (digest[digest.len() - 1] & 0x0f) as usize;
    let binary = u32::from_be_bytes([
        digest[offset] & 0x7f,
        digest[offset + 1],
        digest[offset + 2],
        digest[offset + 3],
    ]);
    Ok(format!(
        "{:0width$}",
        binary % 10u32.pow(TOTP_DIGITS),
        width = TOTP_DIGITS as usize
    ))
}

// RFC 4648 base32, no padding. Authenticator apps expect this form for
// manually entered secrets.
fn base32_encode(data: &[u8]) -> String {
    let mut out = String::with_capacity(data.len().div_ceil(5) * 8);
    let mut buffer: u64 = 0;
    let mut bits: u32 = 0;
    for &byte in data {
        buffer = (buffer << 8) | u64::from(byte);
        bits += 8;
        while bits >= 5 {
            bits -= 5;
            out.push(BASE32_ALPHABET[((buffer >> bits) & 0x1f) as usize] as char);
        }
    }
    if bits > 0 {
        out.push(BASE32_ALPHABET[((buffer << (5 - bits)) & 0x1f) as usize] as char);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    // RFC 6238 appendix B vectors (SHA-1 secret, 6 low-order digits of the
    // published 8-digit codes).
    const RFC_SECRET: &[u8] = b"12345678901234567890";

    #[test]
    fn rfc6238_vectors() {
        assert_eq!(totp_code(RFC_SECRET, 59).unwrap(), "287082");
        assert_eq!(totp_code(RFC_SECRET, 1_111_111_109).unwrap(), "081804");
        assert_eq!(totp_code(RFC_SECRET, 1_234_567_890).unwrap(), "005924");
        assert_eq!(totp_code(RFC_SECRET, 2_000_000_000).unwrap(), "279037");
    }

    #[test]
    fn verify_accepts_current_code() {
        let now = 1_111_111_109;
        let code = totp_code(RFC_SECRET, now).unwrap();
        assert!(verify_totp(RFC_SECRET, &code, now));
    }

    #[test]
    fn verify_accepts_adjacent_steps() {
        let now = 1_111_111_109;
        let previous = totp_code(RFC_SECRET, now - TOTP_STEP_SECS).unwrap();
        let next = totp_code(RFC_SECRET, now + TOTP_STEP_SECS).unwrap();
        assert!(verify_totp(RFC_SECRET, &previous, now));
        assert!(verify_totp(RFC_SECRET, &next, now));
    }

    #[test]
    fn verify_rejects_stale_code() {
        let now = 1_111_111_109;
        let stale = totp_code(RFC_SECRET, now - 3 * TOTP_STEP_SECS).unwrap();
        assert!(!verify_totp(RFC_SECRET, &stale, now));
    }

    #[test]
    fn verify_rejects_garbage() {
        assert!(!verify_totp(RFC_SECRET, "", 59));
        assert!(!verify_totp(RFC_SECRET, "abc123", 59));
        assert!(!verify_totp(RFC_SECRET, "12345", 59));
        assert!(!verify_totp(RFC_SECRET, "1234567", 59));
    }

    #[test]
    fn verify_tolerates_surrounding_whitespace() {
        let code = totp_code(RFC_SECRET, 59).unwrap();
        assert!(verify_totp(RFC_SECRET, &format!(" {code} "), 59));
    }

    #[test]
    fn secrets_are_unique() {
        let a = generate_totp_secret().unwrap();
        let b = generate_totp_secret().unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn base32_matches_rfc4648() {
        assert_eq!(base32_encode(b""), "");
        assert_eq!(base32_encode(b"f"), "MY");
        assert_eq!(base32_encode(b"fo"), "MZXQ");
        assert_eq!(base32_encode(b"foo"), "MZXW6");
        assert_eq!(base32_encode(b"foob"), "MZXW6YQ");
        assert_eq!(base32_encode(b"fooba"), "MZXW6YTB");
        assert_eq!(base32_encode(b"foobar"), "MZXW6YTBOI");
    }

    #[test]
    fn provisioning_uri_contains_secret_and_issuer() {
        let uri = provisioning_uri(RFC_SECRET, "alice@example.org");
        assert!(uri.starts_with("otpauth://totp/CarerConnect:alice@example.org?"));
        assert!(uri.contains(&format!("secret={}", base32_encode(RFC_SECRET))));
        assert!(uri.contains("issuer=CarerConnect"));
        assert!(uri.contains("digits=6"));
        assert!(uri.contains("period=30"));
    }
}
