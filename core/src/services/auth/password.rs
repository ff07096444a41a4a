//! bcrypt credential hashing.

use crate::errors::{DomainError, DomainResult};

pub fn hash_password(password: &str) -> DomainResult<String> {
    bcrypt::hash(password, bcrypt::DEFAULT_COST).map_err(|e| DomainError::Internal {
        message: format!("password hashing failed: {e}"),
    })
}

/// A malformed stored hash is an internal fault, not a wrong password.
pub fn verify_password(password: &str, hash: &str) -> DomainResult<bool> {
    bcrypt::verify(password, hash).map_err(|e| DomainError::Internal {
        message: format!("password verification failed: {e}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify_roundtrip() {
        let hash = hash_password("correct-horse-battery").unwrap();
        assert!(verify_password("correct-horse-battery", &hash).unwrap());
        assert!(!verify_password("wrong-password", &hash).unwrap());
    }

    #[test]
    fn test_malformed_hash_is_internal_error() {
        let result = verify_password("anything", "not-a-bcrypt-hash");
        assert!(matches!(result, Err(DomainError::Internal { .. })));
    }
}
