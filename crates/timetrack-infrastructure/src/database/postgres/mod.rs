pub mod session_repo_impl;
pub mod user_repo_impl;

pub use session_repo_impl::PgSessionRepository;
pub use user_repo_impl::PgUserRepository;
