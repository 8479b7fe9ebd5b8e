//! bcrypt helpers. Hashing runs on the blocking pool so request workers stay free.

use crate::errors::AuthError;

pub async fn hash_password(password: &str, cost: u32) -> Result<String, AuthError> {
    let password = password.to_owned();
    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| AuthError::PasswordHashing { reason: e.to_string() })?
        .map_err(|e| AuthError::PasswordHashing { reason: e.to_string() })
}

/// `Ok(false)` for a wrong password; `Err` only when the stored hash is unreadable
pub async fn verify_password(password: &str, hash: &str) -> Result<bool, AuthError> {
    let password = password.to_owned();
    let hash = hash.to_owned();
    tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| AuthError::PasswordHashing { reason: e.to_string() })?
        .map_err(|e| AuthError::PasswordHashing { reason: e.to_string() })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_hash_and_verify() {
        let hash = hash_password("secret1", 4).await.unwrap();
        assert_ne!(hash, "secret1");
        assert!(verify_password("secret1", &hash).await.unwrap());
        assert!(!verify_password("secret2", &hash).await.unwrap());
    }

    #[tokio::test]
    async fn test_garbage_hash_is_error() {
        assert!(verify_password("secret1", "not-a-hash").await.is_err());
    }
}
