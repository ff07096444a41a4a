//! OTP code generation and digesting.

use rand::rngs::OsRng;
use rand::Rng;
use sha2::{Digest, Sha256};

/// Generates a random numeric code of the given length using the OS
/// CSPRNG. Each digit is drawn independently, so the distribution is
/// uniform and leading zeros are preserved.
pub fn generate_code(length: usize) -> String {
    let mut rng = OsRng;
    (0..length)
        .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
        .collect()
}

/// SHA-256 hex digest of a code. Only digests are ever persisted; the
/// raw code exists in memory just long enough to be dispatched.
pub fn digest(code: &str) -> String {
    hex::encode(Sha256::digest(code.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_code_length_and_alphabet() {
        for _ in 0..100 {
            let code = generate_code(6);
            assert_eq!(code.len(), 6);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn test_generate_code_preserves_leading_zeros() {
        // With 200 four-digit draws a leading zero is overwhelmingly
        // likely; the assertion is on length, not on hitting a zero.
        for _ in 0..200 {
            assert_eq!(generate_code(4).len(), 4);
        }
    }

    #[test]
    fn test_codes_are_not_constant() {
        let codes: std::collections::HashSet<String> =
            (0..100).map(|_| generate_code(6)).collect();
        assert!(codes.len() > 1);
    }

    #[test]
    fn test_digest_is_deterministic_sha256_hex() {
        let a = digest("482913");
        let b = digest("482913");
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
        assert_ne!(a, digest("482914"));
        // Known vector
        assert_eq!(
            digest("123456"),
            "8d969eef6ecad3c29a3a629280e686cf0c3f5d5a86aff3ca12020c923adc6c92"
        );
    }
}
