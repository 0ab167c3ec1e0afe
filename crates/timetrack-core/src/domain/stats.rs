//! Derived, non-persisted aggregates for the calendar views, plus the
//! contribution level calculation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::TimerSession;

/// One calendar day's sessions and their summed duration. Sessions are
/// ordered most-recent-first; an active session counts 0 toward the
/// total because duration is only materialized at stop.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyStats {
    pub date: String,
    pub total_duration: i64,
    pub sessions: Vec<TimerSession>,
}

impl DailyStats {
    pub fn new(date: String) -> Self {
        Self {
            date,
            total_duration: 0,
            sessions: Vec::new(),
        }
    }

    pub fn push(&mut self, session: TimerSession) {
        self.total_duration += i64::from(session.duration.unwrap_or(0));
        self.sessions.push(session);
    }
}

/// One cell of the contribution heatmap.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContributionDay {
    pub date: String,
    pub count: i64,
    pub duration: i64,
    pub level: u8,
}

/// The full heatmap window: one entry per calendar day, no gaps, plus
/// window-wide totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionData {
    pub days: Vec<ContributionDay>,
    pub total_sessions: i64,
    pub total_duration: i64,
}

/// Maps a day's total duration to a 0-4 intensity level relative to the
/// maximum single-day duration in the window. Thresholds are strictly
/// greater-than: a day at exactly 75% of the max gets level 3, not 4.
pub fn contribution_level(duration: i64, window_max: i64) -> u8 {
    let ratio = duration as f64 / window_max.max(1) as f64;
    if ratio > 0.75 {
        4
    } else if ratio > 0.5 {
        3
    } else if ratio > 0.25 {
        2
    } else if ratio > 0.0 {
        1
    } else {
        0
    }
}

/// Calendar-day bucket key: the UTC date of `start_time` as `YYYY-MM-DD`.
/// UTC-only by design; a session started late in a local evening buckets
/// into the UTC day it maps to.
pub fn day_key(t: &DateTime<Utc>) -> String {
    t.format("%Y-%m-%d").to_string()
}
