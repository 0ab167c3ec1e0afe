//! PostgreSQL session repository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::error;
use uuid::Uuid;

use timetrack_core::domain::TimerSession;
use timetrack_core::error::DomainError;
use timetrack_core::repositories::SessionRepository;
use timetrack_shared::Pagination;

pub struct PgSessionRepository {
    pool: PgPool,
}

impl PgSessionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
struct TimerSessionRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub duration: Option<i32>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<TimerSessionRow> for TimerSession {
    fn from(row: TimerSessionRow) -> Self {
        TimerSession {
            id: row.id,
            user_id: row.user_id,
            start_time: row.start_time,
            end_time: row.end_time,
            duration: row.duration,
            notes: row.notes,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl SessionRepository for PgSessionRepository {
    async fn insert(&self, session: &TimerSession) -> Result<TimerSession, DomainError> {
        let row: TimerSessionRow = sqlx::query_as(
            r#"
            INSERT INTO timer_sessions (id, user_id, start_time, end_time, duration, notes, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, user_id, start_time, end_time, duration, notes, created_at
            "#,
        )
        .bind(session.id)
        .bind(session.user_id)
        .bind(session.start_time)
        .bind(session.end_time)
        .bind(session.duration)
        .bind(&session.notes)
        .bind(session.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            // The partial unique index on (user_id) WHERE end_time IS NULL
            // is the real single-active-session guard; a violation means a
            // concurrent start won the race.
            let msg = e.to_string();
            if msg.contains("unique") || msg.contains("duplicate") {
                DomainError::ActiveSessionExists
            } else {
                error!("Database error inserting session: {}", e);
                DomainError::DatabaseError(msg)
            }
        })?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<TimerSession>, DomainError> {
        let row: Option<TimerSessionRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, start_time, end_time, duration, notes, created_at
            FROM timer_sessions
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error finding session by id: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(row.map(|r| r.into()))
    }

    async fn find_active_by_user(
        &self,
        user_id: &Uuid,
    ) -> Result<Option<TimerSession>, DomainError> {
        // LIMIT 1 on descending start_time keeps the degenerate
        // multiple-active case deterministic: the most recent wins.
        let row: Option<TimerSessionRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, start_time, end_time, duration, notes, created_at
            FROM timer_sessions
            WHERE user_id = $1 AND end_time IS NULL
            ORDER BY start_time DESC
            LIMIT 1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error finding active session: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(row.map(|r| r.into()))
    }

    async fn find_by_user(
        &self,
        user_id: &Uuid,
        pagination: Pagination,
    ) -> Result<Vec<TimerSession>, DomainError> {
        let rows: Vec<TimerSessionRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, start_time, end_time, duration, notes, created_at
            FROM timer_sessions
            WHERE user_id = $1
            ORDER BY start_time DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(user_id)
        .bind(pagination.limit)
        .bind(pagination.offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error listing sessions: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    async fn find_by_user_in_range(
        &self,
        user_id: &Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<TimerSession>, DomainError> {
        let rows: Vec<TimerSessionRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, start_time, end_time, duration, notes, created_at
            FROM timer_sessions
            WHERE user_id = $1 AND start_time >= $2 AND start_time <= $3
            ORDER BY start_time DESC
            "#,
        )
        .bind(user_id)
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error querying session range: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    async fn update(&self, session: &TimerSession) -> Result<TimerSession, DomainError> {
        // user_id, start_time, and created_at are immutable after creation.
        let row: TimerSessionRow = sqlx::query_as(
            r#"
            UPDATE timer_sessions
            SET end_time = $2, duration = $3, notes = $4
            WHERE id = $1
            RETURNING id, user_id, start_time, end_time, duration, notes, created_at
            "#,
        )
        .bind(session.id)
        .bind(session.end_time)
        .bind(session.duration)
        .bind(&session.notes)
        .fetch_one(&self.pool)
        .await
        .map_err(|e: sqlx::Error| match e {
            sqlx::Error::RowNotFound => DomainError::SessionNotFound,
            other => {
                error!("Database error updating session: {}", other);
                DomainError::DatabaseError(other.to_string())
            }
        })?;

        Ok(row.into())
    }

    async fn delete(&self, id: &Uuid) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM timer_sessions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e: sqlx::Error| {
                error!("Database error deleting session: {}", e);
                DomainError::DatabaseError(e.to_string())
            })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::SessionNotFound);
        }
        Ok(())
    }
}
