use super::item::Item;
use crate::id::next_id;
use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Unique integer id for calendar entries
pub type EntryId = i64;

/// Minutes spent on the activity an entry records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSpent {
    /// Total time in minutes
    pub elapsed: i64,
}

/// A timestamped snapshot of an item, appended to the calendar log.
///
/// `todo` is a deep copy taken at logging time; later edits to the live
/// item never reach it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEntry {
    pub id: EntryId,
    pub todo: Item,
    pub printed_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_spent: Option<TimeSpent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timer_completed: Option<bool>,
}

impl CalendarEntry {
    /// Snapshot `item` with the current timestamp
    pub fn snapshot(item: &Item) -> Self {
        Self {
            id: next_id(),
            todo: item.clone(),
            printed_at: Utc::now(),
            time_spent: None,
            timer_completed: None,
        }
    }

    /// The local calendar day this entry belongs to.
    ///
    /// Bucketing is by wall-clock day, not the UTC date of `printed_at`.
    pub fn local_date(&self) -> NaiveDate {
        self.printed_at.with_timezone(&Local).date_naive()
    }
}
