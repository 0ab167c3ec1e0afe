//! # Timetrack Core
//!
//! Domain entities, services, and repository traits for the timetrack
//! application. The services are stateless: every operation reads and
//! writes through the repository ports, so concurrency correctness
//! reduces to the storage layer's guarantees.

pub mod domain;
pub mod error;
pub mod repositories;
pub mod services;

pub use domain::*;
pub use error::DomainError;
