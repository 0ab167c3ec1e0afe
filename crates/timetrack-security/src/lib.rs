//! # Timetrack Security
//!
//! Security utilities: JWT issuing/verification and password hashing.

pub mod jwt;
pub mod password;

pub use jwt::JwtService;
pub use password::PasswordService;
