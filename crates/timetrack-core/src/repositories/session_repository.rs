//! Session repository trait (port)

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::TimerSession;
use crate::error::DomainError;
use timetrack_shared::Pagination;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Inserts a new session. Implementations must map a violation of the
    /// one-active-session-per-user uniqueness constraint to
    /// `DomainError::ActiveSessionExists`; the constraint, not the
    /// service-level pre-check, is the real guard against concurrent
    /// starts.
    async fn insert(&self, session: &TimerSession) -> Result<TimerSession, DomainError>;

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<TimerSession>, DomainError>;

    /// The active session for a user, if any. In the degenerate case of
    /// multiple active rows, implementations return the most recently
    /// started.
    async fn find_active_by_user(&self, user_id: &Uuid)
        -> Result<Option<TimerSession>, DomainError>;

    /// Sessions for a user, `start_time` descending, limit/offset paged.
    async fn find_by_user(
        &self,
        user_id: &Uuid,
        pagination: Pagination,
    ) -> Result<Vec<TimerSession>, DomainError>;

    /// Sessions whose `start_time` falls in `[start, end]` inclusive,
    /// `start_time` descending.
    async fn find_by_user_in_range(
        &self,
        user_id: &Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<TimerSession>, DomainError>;

    async fn update(&self, session: &TimerSession) -> Result<TimerSession, DomainError>;

    /// Hard delete. Fails with `DomainError::SessionNotFound` if the row
    /// is already gone.
    async fn delete(&self, id: &Uuid) -> Result<(), DomainError>;
}
