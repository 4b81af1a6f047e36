//! Point-in-time reminder classification.
//!
//! Only tasks with a `due_datetime` take part. A task is overdue when its
//! due datetime is before "now", and upcoming when it falls within the
//! next `window_hours` hours (inclusive on both ends). The two sets are
//! disjoint for a single "now". All times are naive local time.

use chrono::{Duration, Local, NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::error::{Error, Result};
use crate::task::Task;
use crate::validate::{validate_due_date, validate_due_datetime};

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M";
pub const DEFAULT_WINDOW_HOURS: u32 = 24;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Reminders {
    pub overdue: Vec<Task>,
    pub upcoming: Vec<Task>,
}

impl Reminders {
    pub fn is_empty(&self) -> bool {
        self.overdue.is_empty() && self.upcoming.is_empty()
    }
}

/// Current naive local time
pub fn now_local() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Parse a `YYYY-MM-DD` date that is also a real calendar date.
pub fn parse_date(date: &str) -> Result<NaiveDate> {
    validate_due_date(Some(date))?;
    NaiveDate::parse_from_str(date, DATE_FORMAT).map_err(|_| {
        Error::invalid(format!(
            "Unable to parse date string: {date}. Expected format: YYYY-MM-DD"
        ))
    })
}

/// Parse a `YYYY-MM-DD HH:MM` datetime that is also a real calendar time.
pub fn parse_datetime(datetime: &str) -> Result<NaiveDateTime> {
    validate_due_datetime(Some(datetime))?;
    NaiveDateTime::parse_from_str(datetime, DATETIME_FORMAT).map_err(|_| {
        Error::invalid(format!(
            "Unable to parse datetime string: {datetime}. Expected format: YYYY-MM-DD HH:MM"
        ))
    })
}

pub fn is_overdue(due_datetime: &str, now: NaiveDateTime) -> Result<bool> {
    Ok(parse_datetime(due_datetime)? < now)
}

pub fn is_upcoming(due_datetime: &str, hours_ahead: u32, now: NaiveDateTime) -> Result<bool> {
    let delta = parse_datetime(due_datetime)? - now;
    Ok(delta >= Duration::zero() && delta <= Duration::hours(hours_ahead.into()))
}

/// Split `tasks` into overdue and upcoming relative to a single `now`.
///
/// Tasks whose stored datetime is not a real calendar time (for example
/// month 13, which passes the syntactic check) are skipped.
pub fn classify<'a, I>(tasks: I, now: NaiveDateTime, window_hours: u32) -> Reminders
where
    I: IntoIterator<Item = &'a Task>,
{
    let window = Duration::hours(window_hours.into());
    let mut reminders = Reminders::default();
    for task in tasks {
        let Some(raw) = task.due_datetime() else {
            continue;
        };
        let due = match parse_datetime(raw) {
            Ok(due) => due,
            Err(err) => {
                tracing::warn!(task_id = task.id(), due_datetime = raw, error = %err, "skipping reminder check");
                continue;
            }
        };
        let delta = due - now;
        if delta < Duration::zero() {
            reminders.overdue.push(task.clone());
        } else if delta <= window {
            reminders.upcoming.push(task.clone());
        }
    }
    reminders
}
