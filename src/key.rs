//! Catalog key generation.
//!
//! Keys are derived from the extracted text itself, so the same text always
//! maps to the same key regardless of which file it was found in or how
//! often the tool runs.

use sha2::{Digest, Sha256};

/// Width of generated keys in hex characters (16 bytes of the digest).
const KEY_WIDTH: usize = 32;

/// Derive a stable catalog key from extracted text.
///
/// The key is a truncated SHA-256 of the exact UTF-8 bytes. Callers decide
/// whether to trim the text first; trimming changes the key.
///
/// # Examples
///
/// ```
/// use hanex::key::key_for;
///
/// assert_eq!(key_for("你好"), key_for("你好"));
/// assert_ne!(key_for("你好"), key_for("你好 "));
/// assert_eq!(key_for("你好").len(), 32);
/// ```
pub fn key_for(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    let hash = hasher.finalize();
    format!("{:x}", hash)[..KEY_WIDTH].to_string()
}
