use super::bundle::SCHEMA_VERSION;
use super::kv::atomic_write;
use crate::domain::{CalendarEntry, Item};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Import rejections surfaced to the user.
///
/// The one failure that gets an explicit user-visible notice; everything
/// else in the core degrades silently.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ImportError {
    #[error("incompatible data format")]
    IncompatibleFormat,
}

/// The full-state backup document: one JSON file holding both item lists
/// and the calendar log
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ExportBundle {
    pub version: u32,
    pub todos: Vec<Item>,
    pub archived_todos: Vec<Item>,
    #[serde(default)]
    pub calendar_entries: Vec<CalendarEntry>,
}

impl ExportBundle {
    pub fn new(
        todos: Vec<Item>,
        archived_todos: Vec<Item>,
        calendar_entries: Vec<CalendarEntry>,
    ) -> Self {
        Self {
            version: SCHEMA_VERSION,
            todos,
            archived_todos,
            calendar_entries,
        }
    }
}

/// Parse and validate a backup document.
///
/// Version mismatch is a hard rejection with no partial import; an
/// unparseable document is indistinguishable from a wrong version as far
/// as the user is concerned.
pub fn import_from_str(raw: &str) -> Result<ExportBundle, ImportError> {
    let bundle: ExportBundle =
        serde_json::from_str(raw).map_err(|_| ImportError::IncompatibleFormat)?;
    if bundle.version != SCHEMA_VERSION {
        return Err(ImportError::IncompatibleFormat);
    }
    Ok(bundle)
}

/// Read and validate a backup file
pub fn import_from_file<P: AsRef<Path>>(path: P) -> Result<ExportBundle> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read backup file: {}", path.display()))?;
    Ok(import_from_str(&raw)?)
}

/// Write a backup file as pretty-printed JSON.
///
/// The write itself is atomic; sharing the resulting file is the host's
/// concern.
pub fn export_to_file<P: AsRef<Path>>(path: P, bundle: &ExportBundle) -> Result<()> {
    let json = serde_json::to_string_pretty(bundle).context("Failed to serialize backup")?;
    atomic_write(path, &json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ItemPatch, RestoredFrom, RestoredKind, TimerSetting};
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    fn populated_bundle() -> ExportBundle {
        let mut item = Item::new();
        item.apply(ItemPatch::text("exported"));
        item.timer = Some(TimerSetting {
            hours: 0,
            minutes: 25,
            is_active: false,
        });
        item.restored_from = Some(RestoredFrom {
            kind: RestoredKind::Calendar,
            original_id: 7,
            timestamp: Utc::now(),
        });

        let entry = CalendarEntry::snapshot(&item);
        ExportBundle::new(vec![item], Vec::new(), vec![entry])
    }

    #[test]
    fn test_export_then_import_file_round_trip() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("daybook_backup.json");
        let bundle = populated_bundle();

        export_to_file(&path, &bundle).unwrap();
        let imported = import_from_file(&path).unwrap();

        assert_eq!(imported, bundle);
    }

    #[test]
    fn test_import_rejects_version_mismatch() {
        let mut bundle = populated_bundle();
        bundle.version = 2;
        let raw = serde_json::to_string(&bundle).unwrap();

        assert_eq!(
            import_from_str(&raw).unwrap_err(),
            ImportError::IncompatibleFormat
        );
    }

    #[test]
    fn test_import_rejects_garbage() {
        assert_eq!(
            import_from_str("{]").unwrap_err(),
            ImportError::IncompatibleFormat
        );
    }

    #[test]
    fn test_import_accepts_missing_calendar_entries() {
        let raw = r#"{"version": 1, "todos": [], "archivedTodos": []}"#;
        let bundle = import_from_str(raw).unwrap();
        assert!(bundle.calendar_entries.is_empty());
    }

    #[test]
    fn test_import_error_message_is_user_facing() {
        assert_eq!(
            ImportError::IncompatibleFormat.to_string(),
            "incompatible data format"
        );
    }
}
