//! Browser session id generation and validation.
//!
//! Session ids travel in the `sid` cookie and identify one browser session to
//! the session store.

use base64::Engine as _;

/// Length of random bytes before base64 encoding.
const SESSION_ID_BYTES: usize = 32;

/// Encoded length of a session id (32 bytes, URL-safe base64, no padding).
pub const SESSION_ID_LEN: usize = 43;

/// Generates a cryptographically secure random session id.
///
/// Uses `getrandom` for 256 bits of entropy and encodes the result as URL-safe
/// base64 without padding, producing a 43-character cookie-safe string.
///
/// # Panics
///
/// Panics if the system random number generator fails (extremely rare).
pub fn generate_session_id() -> String {
    let mut buffer = [0u8; SESSION_ID_BYTES];

    getrandom::fill(&mut buffer).expect("Failed to generate random bytes");

    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(buffer)
}

/// Returns true if `value` has the shape of a generated session id.
///
/// Cookies failing this check are ignored instead of being hashed and looked up.
pub fn is_well_formed(value: &str) -> bool {
    value.len() == SESSION_ID_LEN
        && value
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}
