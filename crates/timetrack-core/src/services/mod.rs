//! Application services

pub mod auth_service;
pub mod calendar_service;
pub mod timer_service;

pub use auth_service::{AuthService, AuthUser, AuthenticatedUser};
pub use calendar_service::CalendarService;
pub use timer_service::TimerService;
