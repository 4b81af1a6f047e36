//! Recurrence patterns and due-date advancement
//!
//! When a recurring task is completed through
//! [`TaskStore::handle_completion`](crate::store::TaskStore::handle_completion),
//! its successor is due one interval later:
//!
//! - `daily`: +1 day
//! - `weekly`: +7 days
//! - `monthly`: +30 days, a fixed interval rather than calendar months
//!
//! Date-only and date+time fields are advanced independently.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Duration};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::reminder::{parse_date, parse_datetime, DATETIME_FORMAT, DATE_FORMAT};
use crate::task::{Task, TaskDraft};

/// Largest year that still fits the four-digit date format
const MAX_YEAR: i32 = 9999;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Recurrence {
    Daily,
    Weekly,
    Monthly,
}

impl Recurrence {
    /// Distance between one occurrence and the next
    pub fn interval(&self) -> Duration {
        match self {
            Recurrence::Daily => Duration::days(1),
            Recurrence::Weekly => Duration::weeks(1),
            Recurrence::Monthly => Duration::days(30),
        }
    }
}

impl fmt::Display for Recurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Recurrence::Daily => write!(f, "daily"),
            Recurrence::Weekly => write!(f, "weekly"),
            Recurrence::Monthly => write!(f, "monthly"),
        }
    }
}

impl FromStr for Recurrence {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "daily" => Ok(Recurrence::Daily),
            "weekly" => Ok(Recurrence::Weekly),
            "monthly" => Ok(Recurrence::Monthly),
            _ => Err(Error::invalid(format!(
                "Invalid recurrence pattern: {s}. Must be 'daily', 'weekly', or 'monthly'"
            ))),
        }
    }
}

/// Advance a `YYYY-MM-DD` date by one recurrence interval.
pub fn calculate_next_date(date: &str, pattern: Recurrence) -> Result<String> {
    let current = parse_date(date)?;
    let next = current
        .checked_add_signed(pattern.interval())
        .filter(|next| next.year() <= MAX_YEAR)
        .ok_or_else(|| Error::invalid(format!("Next occurrence after {date} is out of range")))?;
    Ok(next.format(DATE_FORMAT).to_string())
}

/// Advance a `YYYY-MM-DD HH:MM` datetime by one recurrence interval.
pub fn calculate_next_occurrence(datetime: &str, pattern: Recurrence) -> Result<String> {
    let current = parse_datetime(datetime)?;
    let next = current
        .checked_add_signed(pattern.interval())
        .filter(|next| next.year() <= MAX_YEAR)
        .ok_or_else(|| {
            Error::invalid(format!("Next occurrence after {datetime} is out of range"))
        })?;
    Ok(next.format(DATETIME_FORMAT).to_string())
}

/// Draft for the task that follows `task`, or `None` if it does not recur.
///
/// The successor keeps title, description, priority, recurrence and its own
/// copy of the tags. Due fields that are absent stay absent.
pub(crate) fn successor(task: &Task) -> Result<Option<TaskDraft>> {
    let Some(pattern) = task.recurrence() else {
        return Ok(None);
    };

    let due_date = task
        .due_date()
        .map(|date| calculate_next_date(date, pattern))
        .transpose()?;
    let due_datetime = task
        .due_datetime()
        .map(|datetime| calculate_next_occurrence(datetime, pattern))
        .transpose()?;

    Ok(Some(TaskDraft {
        title: task.title().to_string(),
        description: task.description().to_string(),
        priority: Some(task.priority()),
        tags: task.tags().to_vec(),
        due_date,
        due_datetime,
        recurrence: Some(pattern),
    }))
}
