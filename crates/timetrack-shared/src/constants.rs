//! Application-wide constants

pub const DEFAULT_PAGE_SIZE: i64 = 20;
pub const MAX_PAGE_SIZE: i64 = 200;

/// Token lifetime in seconds (7 days).
pub const DEFAULT_TOKEN_EXPIRY: i64 = 604_800;

/// Days covered by the contribution window, not counting today.
pub const CONTRIBUTION_WINDOW_DAYS: i64 = 365;

pub const BCRYPT_COST: u32 = 10;
