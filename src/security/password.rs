use actix_web::rt::task::spawn_blocking;
use bcrypt::{hash, verify};

use crate::errors::{AppError, DomainError};

/// One-way bcrypt hash of an account password. Blocking; call from a worker thread.
pub fn hash_credential(password: &str, cost: u32) -> Result<String, DomainError> {
    hash(password, cost).map_err(|e| {
        log::error!("bcrypt hashing failed: {}", e);
        DomainError::CredentialHashing
    })
}

/// Check a password against a stored bcrypt hash off the async executor.
pub async fn verify_password(password: String, password_hash: String) -> Result<bool, AppError> {
    spawn_blocking(move || verify(password.as_str(), &password_hash))
        .await
        .map_err(|_| AppError::InternalServerError("Password verification error".to_string()))?
        .map_err(|e| AppError::InternalServerError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    // Lowest cost bcrypt accepts, keeps the tests quick
    const TEST_COST: u32 = 4;

    #[actix_web::test]
    async fn hash_and_verify() {
        let hashed = hash_credential("Str0ng!pw", TEST_COST).unwrap();
        assert!(hashed.starts_with("$2"));
        assert!(verify_password("Str0ng!pw".to_string(), hashed.clone()).await.unwrap());
        assert!(!verify_password("wrong".to_string(), hashed).await.unwrap());
    }

    #[test]
    fn hashes_are_salted() {
        let a = hash_credential("Str0ng!pw", TEST_COST).unwrap();
        let b = hash_credential("Str0ng!pw", TEST_COST).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn invalid_cost_is_an_error() {
        assert_eq!(hash_credential("Str0ng!pw", 1), Err(DomainError::CredentialHashing));
    }

    #[actix_web::test]
    async fn malformed_hash_is_an_error() {
        assert!(verify_password("pw".to_string(), "not-a-hash".to_string()).await.is_err());
    }
}
