//! JWT token handling

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum JwtError {
    #[error("Token creation failed: {0}")]
    CreationError(String),
    #[error("Token validation failed: {0}")]
    ValidationError(String),
}

/// Token claims. `sub` is the user id; `email` and `name` ride along so the
/// auth extractor can reconstruct the identity without a database lookup.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub email: String,
    pub name: String,
    pub iat: i64,
    pub exp: i64,
}

pub struct JwtService {
    secret: String,
    token_expiry: i64,
}

impl JwtService {
    pub fn new(secret: String, token_expiry: i64) -> Self {
        Self {
            secret,
            token_expiry,
        }
    }

    pub fn generate_token(&self, user_id: &Uuid, email: &str, name: &str) -> Result<String, JwtError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            email: email.to_string(),
            name: name.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(self.token_expiry)).timestamp(),
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| JwtError::CreationError(e.to_string()))
    }

    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|e| JwtError::ValidationError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> JwtService {
        JwtService::new("test-secret".to_string(), 3600)
    }

    #[test]
    fn test_generate_and_validate_roundtrip() {
        let user_id = Uuid::new_v4();
        let token = service()
            .generate_token(&user_id, "a@b.com", "Alice")
            .unwrap();
        let claims = service().validate_token(&token).unwrap();
        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.email, "a@b.com");
        assert_eq!(claims.name, "Alice");
    }

    #[test]
    fn test_validate_rejects_wrong_secret() {
        let token = service()
            .generate_token(&Uuid::new_v4(), "a@b.com", "Alice")
            .unwrap();
        let other = JwtService::new("other-secret".to_string(), 3600);
        assert!(other.validate_token(&token).is_err());
    }

    #[test]
    fn test_validate_rejects_expired_token() {
        let expired = JwtService::new("test-secret".to_string(), -60);
        let token = expired
            .generate_token(&Uuid::new_v4(), "a@b.com", "Alice")
            .unwrap();
        assert!(expired.validate_token(&token).is_err());
    }
}
