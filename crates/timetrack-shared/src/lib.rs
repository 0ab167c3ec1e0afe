//! # Timetrack Shared
//!
//! Shared configuration, constants, types, and telemetry for the
//! timetrack application.

pub mod config;
pub mod constants;
pub mod error;
pub mod telemetry;
pub mod types;

pub use error::AppError;
pub use types::*;
