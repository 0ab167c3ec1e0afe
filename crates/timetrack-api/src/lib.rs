//! # Timetrack API
//!
//! HTTP handlers, auth middleware, response envelope, and router.

pub mod handlers;
pub mod middleware;
pub mod response;
pub mod state;
