use super::enums::{ItemColor, NoteType, RestoredKind};
use crate::id::next_id;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unique integer id, derived from creation time plus a random offset
pub type ItemId = i64;

/// Countdown configuration attached to a specific item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerSetting {
    pub hours: u32,
    pub minutes: u32,
    pub is_active: bool,
}

impl TimerSetting {
    /// Total configured duration in minutes
    pub fn total_minutes(&self) -> i64 {
        i64::from(self.hours) * 60 + i64::from(self.minutes)
    }
}

/// Provenance marker for items recreated from a calendar entry or the archive
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestoredFrom {
    #[serde(rename = "type")]
    pub kind: RestoredKind,
    pub original_id: ItemId,
    pub timestamp: DateTime<Utc>,
}

/// A task/note record
///
/// `is_editing` is persisted with the rest of the record but treated as
/// ephemeral UI state; every path that re-materializes an item (archive,
/// unarchive, restore) clears it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: ItemId,
    /// Short title, may be empty
    pub text: String,
    /// Free-form body; a single string with embedded newlines and optional
    /// `• ` / `[ ] ` / `[x] ` line prefixes depending on `note_type`
    pub note: String,
    pub color: ItemColor,
    pub is_editing: bool,
    pub note_type: NoteType,
    /// Absent on records saved before the field existed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restored_from: Option<RestoredFrom>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timer: Option<TimerSetting>,
}

impl Item {
    /// Create a fresh, empty item in editing state
    pub fn new() -> Self {
        Self {
            id: next_id(),
            text: String::new(),
            note: String::new(),
            color: ItemColor::default(),
            is_editing: true,
            note_type: NoteType::default(),
            created_at: Some(Utc::now()),
            restored_from: None,
            timer: None,
        }
    }

    /// Merge a partial update into this item
    pub fn apply(&mut self, patch: ItemPatch) {
        if let Some(text) = patch.text {
            self.text = text;
        }
        if let Some(note) = patch.note {
            self.note = note;
        }
        if let Some(note_type) = patch.note_type {
            self.note_type = note_type;
        }
        if let Some(color) = patch.color {
            self.color = color;
        }
        if let Some(is_editing) = patch.is_editing {
            self.is_editing = is_editing;
        }
        if let Some(timer) = patch.timer {
            self.timer = timer;
        }
    }
}

impl Default for Item {
    fn default() -> Self {
        Self::new()
    }
}

/// Partial update for an item; `None` fields are left untouched.
///
/// `timer` is doubly optional so a patch can distinguish "leave the timer
/// alone" (`None`) from "clear it" (`Some(None)`).
#[derive(Debug, Clone, Default)]
pub struct ItemPatch {
    pub text: Option<String>,
    pub note: Option<String>,
    pub note_type: Option<NoteType>,
    pub color: Option<ItemColor>,
    pub is_editing: Option<bool>,
    pub timer: Option<Option<TimerSetting>>,
}

impl ItemPatch {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn note(note: impl Into<String>) -> Self {
        Self {
            note: Some(note.into()),
            ..Self::default()
        }
    }
}
