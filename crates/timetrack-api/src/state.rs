use std::sync::Arc;

use timetrack_core::services::{AuthService, CalendarService, TimerService};
use timetrack_infrastructure::database::postgres::{PgSessionRepository, PgUserRepository};
use timetrack_security::JwtService;
use timetrack_shared::config::AppConfig;

/// Shared application state. Services and repositories are constructed
/// once at startup and injected here; nothing is lazily materialized.
#[derive(Clone)]
pub struct AppState {
    pub timer: Arc<TimerService<PgSessionRepository>>,
    pub calendar: Arc<CalendarService<PgSessionRepository>>,
    pub auth: Arc<AuthService<PgUserRepository>>,
    pub jwt: Arc<JwtService>,
    pub config: AppConfig,
}
