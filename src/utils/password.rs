use crate::error::{AppError, Result};

/// Bcrypt is CPU-bound, so both operations run on the blocking pool to
/// keep the async workers free.
pub async fn hash(plaintext: &str) -> Result<String> {
    let plaintext = plaintext.to_owned();

    tokio::task::spawn_blocking(move || bcrypt::hash(&plaintext, bcrypt::DEFAULT_COST))
        .await
        .map_err(|e| AppError::InternalError(format!("Hashing task failed: {}", e)))?
        .map_err(|e| AppError::InternalError(format!("Password hashing failed: {}", e)))
}

/// Fails closed: a malformed stored credential verifies as false rather
/// than surfacing an error.
pub async fn verify(plaintext: &str, credential: &str) -> bool {
    let plaintext = plaintext.to_owned();
    let credential = credential.to_owned();

    tokio::task::spawn_blocking(move || bcrypt::verify(&plaintext, &credential).unwrap_or(false))
        .await
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn hash_then_verify() {
        let credential = hash("hunter2").await.unwrap();

        assert!(verify("hunter2", &credential).await);
        assert!(!verify("hunter3", &credential).await);
    }

    #[tokio::test]
    async fn hashes_are_salted() {
        let a = hash("same-input").await.unwrap();
        let b = hash("same-input").await.unwrap();

        assert_ne!(a, b);
        assert!(verify("same-input", &a).await);
        assert!(verify("same-input", &b).await);
    }

    #[tokio::test]
    async fn malformed_credential_fails_closed() {
        assert!(!verify("anything", "not-a-bcrypt-hash").await);
        assert!(!verify("anything", "").await);
    }
}
