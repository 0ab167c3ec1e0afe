//! User domain entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::error::DomainError;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct User {
    pub id: Uuid,

    #[validate(email)]
    pub email: String,
    pub password_hash: String,

    #[validate(length(min = 1, max = 100))]
    pub name: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a user with a lowercased email. The password must already
    /// be hashed by the caller.
    pub fn new(email: &str, password_hash: String, name: &str) -> Result<Self, DomainError> {
        let now = Utc::now();
        let user = Self {
            id: Uuid::new_v4(),
            email: email.trim().to_lowercase(),
            password_hash,
            name: name.trim().to_string(),
            created_at: now,
            updated_at: now,
        };
        user.validate()
            .map_err(|e| DomainError::Validation(e.to_string()))?;
        Ok(user)
    }
}
