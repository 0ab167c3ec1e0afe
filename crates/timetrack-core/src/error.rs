//! Domain errors

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("You already have an active timer session")]
    ActiveSessionExists,

    #[error("Session not found")]
    SessionNotFound,

    #[error("Session is already stopped")]
    SessionAlreadyStopped,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("User with this email already exists: {0}")]
    EmailAlreadyExists(String),

    #[error("Password hash error: {0}")]
    PasswordHashError(String),

    #[error("Token generation error: {0}")]
    TokenGenerationError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
