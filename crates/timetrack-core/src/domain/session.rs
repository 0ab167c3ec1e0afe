//! Timer session entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// A single work session. `end_time` absent means the session is active;
/// `duration` is set exactly once, at stop, and holds whole seconds of
/// `end_time - start_time`.
///
/// Field names serialize in camelCase with explicit nulls; they are part
/// of the API compatibility surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerSession {
    pub id: Uuid,
    pub user_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub duration: Option<i32>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl TimerSession {
    pub fn new(user_id: Uuid, notes: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            start_time: now,
            end_time: None,
            duration: None,
            notes,
            created_at: now,
        }
    }

    pub fn is_active(&self) -> bool {
        self.end_time.is_none()
    }

    /// Closes the session at `at`, materializing the duration in whole
    /// seconds. Fails if the session is already stopped; `end_time` is
    /// never overwritten.
    pub fn stop(&mut self, at: DateTime<Utc>) -> Result<(), DomainError> {
        if self.end_time.is_some() {
            return Err(DomainError::SessionAlreadyStopped);
        }
        self.end_time = Some(at);
        self.duration = Some((at - self.start_time).num_seconds() as i32);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_new_session_is_active() {
        let s = TimerSession::new(Uuid::new_v4(), Some("deep work".to_string()));
        assert!(s.is_active());
        assert!(s.end_time.is_none());
        assert!(s.duration.is_none());
        assert_eq!(s.notes.as_deref(), Some("deep work"));
    }

    #[test]
    fn test_stop_computes_whole_seconds() {
        let mut s = TimerSession::new(Uuid::new_v4(), None);
        let at = s.start_time + Duration::seconds(3600) + Duration::milliseconds(900);
        s.stop(at).unwrap();
        assert!(!s.is_active());
        assert_eq!(s.duration, Some(3600));
        assert_eq!(s.end_time, Some(at));
    }

    #[test]
    fn test_stop_twice_fails() {
        let mut s = TimerSession::new(Uuid::new_v4(), None);
        let at = s.start_time + Duration::seconds(10);
        s.stop(at).unwrap();
        let err = s.stop(at + Duration::seconds(5)).unwrap_err();
        assert!(matches!(err, DomainError::SessionAlreadyStopped));
        // First stop sticks.
        assert_eq!(s.duration, Some(10));
    }

    #[test]
    fn test_serializes_camel_case_with_explicit_nulls() {
        let s = TimerSession::new(Uuid::new_v4(), None);
        let json = serde_json::to_value(&s).unwrap();
        assert!(json.get("userId").is_some());
        assert!(json.get("startTime").is_some());
        assert!(json.get("createdAt").is_some());
        assert!(json["endTime"].is_null());
        assert!(json["duration"].is_null());
        assert!(json["notes"].is_null());
    }
}
