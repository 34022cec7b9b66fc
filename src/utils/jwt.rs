use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub email: String,
    pub exp: usize,
}

pub fn generate_token(secret: &str, user_id: i32, email: &str, ttl_hours: i64) -> Result<String> {
    let expiration = chrono::Utc::now()
        .checked_add_signed(chrono::Duration::hours(ttl_hours))
        .ok_or_else(|| AppError::InternalError("Failed to calculate expiration".to_string()))?
        .timestamp() as usize;

    let claims = Claims {
        sub: user_id.to_string(),
        email: email.to_string(),
        exp: expiration,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::InternalError(format!("Token generation failed: {}", e)))
}

pub fn verify_token(secret: &str, token: &str) -> Result<Claims> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| AppError::Unauthorized(format!("Invalid token: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn roundtrip_preserves_claims() {
        let token = generate_token(SECRET, 42, "user@example.com", 24).unwrap();
        let claims = verify_token(SECRET, &token).unwrap();

        assert_eq!(claims.sub, "42");
        assert_eq!(claims.email, "user@example.com");
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = generate_token(SECRET, 1, "user@example.com", 24).unwrap();

        assert!(verify_token("other-secret", &token).is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let claims = Claims {
            sub: "1".to_string(),
            email: "user@example.com".to_string(),
            exp: (chrono::Utc::now().timestamp() - 3600) as usize,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        assert!(verify_token(SECRET, &token).is_err());
    }
}
