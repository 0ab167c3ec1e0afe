//! Domain entities and derived aggregates.

pub mod session;
pub mod stats;
pub mod user;

pub use session::TimerSession;
pub use stats::{contribution_level, day_key, ContributionData, ContributionDay, DailyStats};
pub use user::User;
