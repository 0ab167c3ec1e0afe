//! Timer session lifecycle service

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::TimerSession;
use crate::error::DomainError;
use crate::repositories::SessionRepository;
use timetrack_shared::Pagination;

/// Owns the session lifecycle: start, stop, notes updates, listing, and
/// deletion. Enforces the single-active-session invariant and uniform
/// not-found responses for missing and foreign sessions alike, so
/// existence never leaks across users.
pub struct TimerService<R: SessionRepository> {
    sessions: Arc<R>,
}

impl<R: SessionRepository> TimerService<R> {
    pub fn new(sessions: Arc<R>) -> Self {
        Self { sessions }
    }

    /// Starts a new session. The pre-check gives a friendly conflict
    /// error; the storage-level partial unique index is the actual guard
    /// under concurrent starts.
    pub async fn start(
        &self,
        user_id: &Uuid,
        notes: Option<String>,
    ) -> Result<TimerSession, DomainError> {
        if self.sessions.find_active_by_user(user_id).await?.is_some() {
            warn!("Start rejected: active session exists for user {}", user_id);
            return Err(DomainError::ActiveSessionExists);
        }

        let session = TimerSession::new(*user_id, notes);
        let created = self.sessions.insert(&session).await?;
        info!("Started session {} for user {}", created.id, user_id);
        Ok(created)
    }

    /// Stops an owned, active session, materializing its duration.
    pub async fn stop(
        &self,
        user_id: &Uuid,
        session_id: &Uuid,
    ) -> Result<TimerSession, DomainError> {
        let mut session = self.find_owned(user_id, session_id).await?;
        session.stop(Utc::now())?;
        let updated = self.sessions.update(&session).await?;
        info!(
            "Stopped session {} for user {} ({}s)",
            updated.id,
            user_id,
            updated.duration.unwrap_or(0)
        );
        Ok(updated)
    }

    /// The user's active session, if any. None is a normal outcome, not
    /// an error.
    pub async fn get_active(&self, user_id: &Uuid) -> Result<Option<TimerSession>, DomainError> {
        self.sessions.find_active_by_user(user_id).await
    }

    /// Sessions for the user, most recent first, limit/offset paged.
    pub async fn list_sessions(
        &self,
        user_id: &Uuid,
        pagination: Pagination,
    ) -> Result<Vec<TimerSession>, DomainError> {
        self.sessions
            .find_by_user(user_id, pagination.clamped())
            .await
    }

    /// Replaces the notes on an owned session, active or closed.
    pub async fn update_notes(
        &self,
        user_id: &Uuid,
        session_id: &Uuid,
        notes: Option<String>,
    ) -> Result<TimerSession, DomainError> {
        let mut session = self.find_owned(user_id, session_id).await?;
        session.notes = notes;
        self.sessions.update(&session).await
    }

    /// Deletes an owned session, active or closed. A second delete of the
    /// same id fails with `SessionNotFound`.
    pub async fn delete(&self, user_id: &Uuid, session_id: &Uuid) -> Result<(), DomainError> {
        let session = self.find_owned(user_id, session_id).await?;
        self.sessions.delete(&session.id).await?;
        info!("Deleted session {} for user {}", session_id, user_id);
        Ok(())
    }

    /// Ownership-checked lookup. Missing and foreign sessions both yield
    /// `SessionNotFound`.
    async fn find_owned(
        &self,
        user_id: &Uuid,
        session_id: &Uuid,
    ) -> Result<TimerSession, DomainError> {
        match self.sessions.find_by_id(session_id).await? {
            Some(s) if s.user_id == *user_id => Ok(s),
            _ => Err(DomainError::SessionNotFound),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::session_repository::MockSessionRepository;
    use chrono::Duration;
    use mockall::predicate::eq;

    fn closed_session(user_id: Uuid, secs: i64) -> TimerSession {
        let mut s = TimerSession::new(user_id, None);
        s.stop(s.start_time + Duration::seconds(secs)).unwrap();
        s
    }

    #[tokio::test]
    async fn test_start_conflicts_when_active_exists() {
        let user_id = Uuid::new_v4();
        let mut repo = MockSessionRepository::new();
        repo.expect_find_active_by_user()
            .with(eq(user_id))
            .returning(move |_| Ok(Some(TimerSession::new(user_id, None))));

        let svc = TimerService::new(Arc::new(repo));
        let err = svc.start(&user_id, None).await.unwrap_err();
        assert!(matches!(err, DomainError::ActiveSessionExists));
    }

    #[tokio::test]
    async fn test_start_inserts_when_no_active() {
        let user_id = Uuid::new_v4();
        let mut repo = MockSessionRepository::new();
        repo.expect_find_active_by_user().returning(|_| Ok(None));
        repo.expect_insert()
            .returning(|s| Ok(s.clone()));

        let svc = TimerService::new(Arc::new(repo));
        let session = svc.start(&user_id, Some("focus".to_string())).await.unwrap();
        assert_eq!(session.user_id, user_id);
        assert!(session.is_active());
        assert_eq!(session.notes.as_deref(), Some("focus"));
    }

    #[tokio::test]
    async fn test_stop_computes_duration_and_persists() {
        let user_id = Uuid::new_v4();
        let mut session = TimerSession::new(user_id, None);
        session.start_time = Utc::now() - Duration::seconds(90);
        let session_id = session.id;

        let mut repo = MockSessionRepository::new();
        let found = session.clone();
        repo.expect_find_by_id()
            .with(eq(session_id))
            .returning(move |_| Ok(Some(found.clone())));
        repo.expect_update().returning(|s| Ok(s.clone()));

        let svc = TimerService::new(Arc::new(repo));
        let stopped = svc.stop(&user_id, &session_id).await.unwrap();
        assert!(stopped.end_time.is_some());
        let d = stopped.duration.unwrap();
        assert!((90..=91).contains(&d), "duration {} out of range", d);
    }

    #[tokio::test]
    async fn test_stop_already_stopped_fails() {
        let user_id = Uuid::new_v4();
        let session = closed_session(user_id, 60);
        let session_id = session.id;

        let mut repo = MockSessionRepository::new();
        repo.expect_find_by_id()
            .returning(move |_| Ok(Some(session.clone())));

        let svc = TimerService::new(Arc::new(repo));
        let err = svc.stop(&user_id, &session_id).await.unwrap_err();
        assert!(matches!(err, DomainError::SessionAlreadyStopped));
    }

    #[tokio::test]
    async fn test_stop_foreign_session_is_not_found() {
        let owner = Uuid::new_v4();
        let intruder = Uuid::new_v4();
        let session = TimerSession::new(owner, None);
        let session_id = session.id;

        let mut repo = MockSessionRepository::new();
        repo.expect_find_by_id()
            .returning(move |_| Ok(Some(session.clone())));
        // No update expected: the ownership check fails first.

        let svc = TimerService::new(Arc::new(repo));
        let err = svc.stop(&intruder, &session_id).await.unwrap_err();
        assert!(matches!(err, DomainError::SessionNotFound));
    }

    #[tokio::test]
    async fn test_update_notes_works_on_closed_sessions() {
        let user_id = Uuid::new_v4();
        let session = closed_session(user_id, 120);
        let session_id = session.id;

        let mut repo = MockSessionRepository::new();
        repo.expect_find_by_id()
            .returning(move |_| Ok(Some(session.clone())));
        repo.expect_update().returning(|s| Ok(s.clone()));

        let svc = TimerService::new(Arc::new(repo));
        let updated = svc
            .update_notes(&user_id, &session_id, Some("retro".to_string()))
            .await
            .unwrap();
        assert_eq!(updated.notes.as_deref(), Some("retro"));
        // Stop-time fields untouched.
        assert_eq!(updated.duration, Some(120));
    }

    #[tokio::test]
    async fn test_update_notes_foreign_session_is_not_found() {
        let session = TimerSession::new(Uuid::new_v4(), None);
        let session_id = session.id;

        let mut repo = MockSessionRepository::new();
        repo.expect_find_by_id()
            .returning(move |_| Ok(Some(session.clone())));

        let svc = TimerService::new(Arc::new(repo));
        let err = svc
            .update_notes(&Uuid::new_v4(), &session_id, Some("nope".to_string()))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::SessionNotFound));
    }

    #[tokio::test]
    async fn test_delete_missing_session_is_not_found() {
        let mut repo = MockSessionRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));

        let svc = TimerService::new(Arc::new(repo));
        let err = svc
            .delete(&Uuid::new_v4(), &Uuid::new_v4())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::SessionNotFound));
    }

    #[tokio::test]
    async fn test_get_active_none_is_ok() {
        let mut repo = MockSessionRepository::new();
        repo.expect_find_active_by_user().returning(|_| Ok(None));

        let svc = TimerService::new(Arc::new(repo));
        assert!(svc.get_active(&Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_sessions_clamps_pagination() {
        let user_id = Uuid::new_v4();
        let mut repo = MockSessionRepository::new();
        repo.expect_find_by_user()
            .withf(|_, p| p.limit == 200 && p.offset == 0)
            .returning(|_, _| Ok(vec![]));

        let svc = TimerService::new(Arc::new(repo));
        let page = Pagination {
            limit: 10_000,
            offset: -5,
        };
        assert!(svc.list_sessions(&user_id, page).await.unwrap().is_empty());
    }
}
