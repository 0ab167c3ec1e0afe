//! Calendar aggregation service: daily stats, date ranges, monthly
//! summaries, and the 365-day contribution heatmap.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use chrono::{DateTime, Days, Duration, NaiveDate, Utc};
use uuid::Uuid;

use crate::domain::{contribution_level, day_key, ContributionData, ContributionDay, DailyStats};
use crate::domain::TimerSession;
use crate::error::DomainError;
use crate::repositories::SessionRepository;
use timetrack_shared::constants::CONTRIBUTION_WINDOW_DAYS;

/// Pure transforms over repository query results; holds no state of its
/// own. All bucketing is by the UTC calendar date of `start_time`.
pub struct CalendarService<R: SessionRepository> {
    sessions: Arc<R>,
}

impl<R: SessionRepository> CalendarService<R> {
    pub fn new(sessions: Arc<R>) -> Self {
        Self { sessions }
    }

    /// Sessions started on the given `YYYY-MM-DD` UTC date, most recent
    /// first, with their summed duration.
    pub async fn daily_stats(
        &self,
        user_id: &Uuid,
        date_str: &str,
    ) -> Result<DailyStats, DomainError> {
        let date = parse_date(date_str)?;
        let (start, end) = day_bounds(date);
        let sessions = self
            .sessions
            .find_by_user_in_range(user_id, start, end)
            .await?;

        let mut stats = DailyStats::new(date_str.to_string());
        for session in sessions {
            stats.push(session);
        }
        Ok(stats)
    }

    /// Sessions started within `[start 00:00, end 23:59:59.999]` UTC,
    /// most recent first. No limit on range width; year-long ranges are
    /// expected.
    pub async fn range_sessions(
        &self,
        user_id: &Uuid,
        start_str: &str,
        end_str: &str,
    ) -> Result<Vec<TimerSession>, DomainError> {
        let start_date = parse_date(start_str)?;
        let end_date = parse_date(end_str)?;
        let (start, _) = day_bounds(start_date);
        let (_, end) = day_bounds(end_date);
        self.sessions
            .find_by_user_in_range(user_id, start, end)
            .await
    }

    /// Per-day stats for a calendar month, keyed by `YYYY-MM-DD`. Days
    /// without sessions are absent; a month with no sessions yields an
    /// empty map.
    pub async fn monthly_summary(
        &self,
        user_id: &Uuid,
        year: i32,
        month: u32,
    ) -> Result<BTreeMap<String, DailyStats>, DomainError> {
        let (start, end) = month_bounds(year, month)?;
        let sessions = self
            .sessions
            .find_by_user_in_range(user_id, start, end)
            .await?;

        let mut daily: BTreeMap<String, DailyStats> = BTreeMap::new();
        for session in sessions {
            let key = day_key(&session.start_time);
            daily
                .entry(key.clone())
                .or_insert_with(|| DailyStats::new(key))
                .push(session);
        }
        Ok(daily)
    }

    /// The contribution heatmap over `[now - 365 days, now]`, computed
    /// per call. Always exactly one entry per calendar day in the window,
    /// zero-activity days included at level 0.
    pub async fn contributions(&self, user_id: &Uuid) -> Result<ContributionData, DomainError> {
        let end = Utc::now();
        let start = end - Duration::days(CONTRIBUTION_WINDOW_DAYS);
        let sessions = self
            .sessions
            .find_by_user_in_range(user_id, start, end)
            .await?;

        // (count, duration) per UTC calendar date. Active sessions count
        // toward `count` but contribute 0 duration until stopped.
        let mut daily: HashMap<NaiveDate, (i64, i64)> = HashMap::new();
        for session in &sessions {
            let entry = daily.entry(session.start_time.date_naive()).or_insert((0, 0));
            entry.0 += 1;
            entry.1 += i64::from(session.duration.unwrap_or(0));
        }

        let window_max = daily.values().map(|&(_, d)| d).max().unwrap_or(0).max(1);

        let mut days = Vec::new();
        let mut total_sessions = 0;
        let mut total_duration = 0;
        let mut date = start.date_naive();
        let last = end.date_naive();
        while date <= last {
            let (count, duration) = daily.get(&date).copied().unwrap_or((0, 0));
            total_sessions += count;
            total_duration += duration;
            days.push(ContributionDay {
                date: date.format("%Y-%m-%d").to_string(),
                count,
                duration,
                level: contribution_level(duration, window_max),
            });
            date = date + Days::new(1);
        }

        Ok(ContributionData {
            days,
            total_sessions,
            total_duration,
        })
    }
}

fn parse_date(s: &str) -> Result<NaiveDate, DomainError> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| DomainError::Validation(format!("Invalid date: {}", s)))
}

/// Inclusive UTC bounds of a calendar day: `[00:00:00.000, 23:59:59.999]`.
fn day_bounds(date: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = date.and_hms_opt(0, 0, 0).unwrap_or_default().and_utc();
    let end = date
        .and_hms_milli_opt(23, 59, 59, 999)
        .unwrap_or_default()
        .and_utc();
    (start, end)
}

/// Inclusive UTC bounds of a calendar month, ending at the last
/// millisecond before the next month begins.
fn month_bounds(year: i32, month: u32) -> Result<(DateTime<Utc>, DateTime<Utc>), DomainError> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| DomainError::Validation(format!("Invalid month: {}-{}", year, month)))?;
    let next_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .ok_or_else(|| DomainError::Validation(format!("Invalid month: {}-{}", year, month)))?;

    let start = first.and_hms_opt(0, 0, 0).unwrap_or_default().and_utc();
    let end = next_first.and_hms_opt(0, 0, 0).unwrap_or_default().and_utc()
        - Duration::milliseconds(1);
    Ok((start, end))
}
