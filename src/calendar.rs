use crate::domain::{CalendarEntry, EntryId, Item, ItemId, ItemPatch, RestoredFrom, RestoredKind};
use crate::id::next_id;
use crate::persistence::{KvStore, CALENDAR_KEY};
use crate::store::ItemStore;
use chrono::{Local, NaiveDate, Utc};
use log::warn;

/// Append-only log of item snapshots, bucketed by local calendar day.
///
/// Entries leave the log through exactly two explicit user actions:
/// delete, and restore-to-active of a today-or-future entry.
pub struct CalendarLog {
    entries: Vec<CalendarEntry>,
    kv: Box<dyn KvStore>,
}

impl CalendarLog {
    /// Load the log from the key-value store
    pub fn load(kv: Box<dyn KvStore>) -> Self {
        let entries = match kv.get(CALENDAR_KEY) {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(entries) => entries,
                Err(e) => {
                    warn!("unreadable calendar entries, starting empty: {}", e);
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("failed to read calendar entries: {}", e);
                Vec::new()
            }
        };
        Self { entries, kv }
    }

    pub fn entries(&self) -> &[CalendarEntry] {
        &self.entries
    }

    /// Append an entry to the end of the log
    pub fn append(&mut self, entry: CalendarEntry) {
        self.entries.push(entry);
        self.save();
    }

    /// The direct "print to calendar" action: snapshot the item now
    pub fn print_item(&mut self, item: &Item) -> EntryId {
        let entry = CalendarEntry::snapshot(item);
        let id = entry.id;
        self.append(entry);
        id
    }

    /// Entries whose local calendar day equals `date`, in insertion order
    pub fn query_by_date(&self, date: NaiveDate) -> Vec<&CalendarEntry> {
        self.entries
            .iter()
            .filter(|entry| entry.local_date() == date)
            .collect()
    }

    /// Per-date subsets for a 7-day window, used by the week grid
    pub fn query_by_week(&self, dates: &[NaiveDate; 7]) -> Vec<Vec<&CalendarEntry>> {
        dates.iter().map(|date| self.query_by_date(*date)).collect()
    }

    /// Patch the embedded snapshot of the entry with `id`.
    ///
    /// `printed_at` and the timer bookkeeping never change; missing ids
    /// are ignored.
    pub fn update(&mut self, id: EntryId, patch: ItemPatch) {
        if let Some(entry) = self.entries.iter_mut().find(|entry| entry.id == id) {
            entry.todo.apply(patch);
            self.save();
        }
    }

    /// Permanently delete the entry with `id`
    pub fn remove(&mut self, id: EntryId) {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        if self.entries.len() != before {
            self.save();
        }
    }

    /// Copy the entry's snapshot back into the active list.
    ///
    /// The new item gets a fresh id, `is_editing` cleared and provenance
    /// stamped. The entry itself is deleted only when its date is today
    /// or later; past entries stay as history. A repeated invocation
    /// within a second is suppressed by the duplicate guard.
    pub fn restore_to_active(&mut self, id: EntryId, store: &mut ItemStore) -> Option<ItemId> {
        let entry = self.entries.iter().find(|entry| entry.id == id)?.clone();
        let now = Utc::now();

        // Guard against double-invocation (e.g. a repeated long-press):
        // an active item with the same text and note created within the
        // last second is taken to be this same restore.
        let duplicate = store.todos().iter().any(|item| {
            item.text == entry.todo.text
                && item.note == entry.todo.note
                && item
                    .created_at
                    .map_or(false, |created| (now - created).num_milliseconds().abs() <= 1000)
        });
        if duplicate {
            return None;
        }

        let mut item = entry.todo.clone();
        item.id = next_id();
        item.is_editing = false;
        item.created_at = Some(now);
        item.restored_from = Some(RestoredFrom {
            kind: RestoredKind::Calendar,
            original_id: entry.todo.id,
            timestamp: now,
        });
        if let Some(timer) = &mut item.timer {
            timer.is_active = false;
        }
        let new_id = item.id;
        store.append_item(item);

        if entry.local_date() >= Local::now().date_naive() {
            self.remove(id);
        }

        Some(new_id)
    }

    /// Case-insensitive substring search over snapshot titles and notes
    pub fn search(&self, query: &str) -> Vec<&CalendarEntry> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        self.entries
            .iter()
            .filter(|entry| {
                entry.todo.text.to_lowercase().contains(&needle)
                    || entry.todo.note.to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// Replace the whole log (import path)
    pub fn replace_all(&mut self, entries: Vec<CalendarEntry>) {
        self.entries = entries;
        self.save();
    }

    fn save(&self) {
        match serde_json::to_string(&self.entries) {
            Ok(raw) => {
                if let Err(e) = self.kv.set(CALENDAR_KEY, &raw) {
                    warn!("failed to persist calendar entries: {}", e);
                }
            }
            Err(e) => warn!("failed to serialize calendar entries: {}", e),
        }
    }
}
