//! # Timetrack Infrastructure
//!
//! PostgreSQL implementations of the core repository ports.

pub mod database;
