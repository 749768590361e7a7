//! Cryptographic Utilities

use base64::{Engine, engine::general_purpose};
use rand::{RngCore, rngs::OsRng};

/// Generate cryptographically secure random bytes
pub fn random_bytes(len: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; len];
    OsRng.fill_bytes(&mut bytes);
    bytes
}

/// Encode bytes as URL-safe base64 (padded)
pub fn to_base64_url(bytes: &[u8]) -> String {
    general_purpose::URL_SAFE.encode(bytes)
}

/// `len` random bytes as a cookie-safe string
pub fn random_token(len: usize) -> String {
    to_base64_url(&random_bytes(len))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_bytes() {
        let bytes = random_bytes(32);
        assert_eq!(bytes.len(), 32);
        // Should not be all zeros (statistically)
        assert!(bytes.iter().any(|&b| b != 0));
    }

    #[test]
    fn test_url_safe_alphabet() {
        assert_eq!(to_base64_url(&[0xfb, 0xff]), "-_8=");
    }

    #[test]
    fn test_random_token_length() {
        // 32 bytes -> 44 padded base64 characters
        let token = random_token(32);
        assert_eq!(token.len(), 44);
        assert!(!token.contains('+'));
        assert!(!token.contains('/'));
        assert_ne!(token, random_token(32));
    }
}
