use crate::calendar::CalendarLog;
use crate::domain::{Item, ItemId, ItemPatch};
use crate::persistence::{decode_items, encode_items, ExportBundle, KvStore, ITEMS_KEY};
use log::warn;

/// Authoritative owner of the active and archived item lists.
///
/// The store is the sole writer of the items key; every mutation writes
/// through. A failed write is logged and the in-memory state stays the
/// source of truth for the rest of the session.
pub struct ItemStore {
    todos: Vec<Item>,
    archived: Vec<Item>,
    kv: Box<dyn KvStore>,
}

impl ItemStore {
    /// Load the store from the key-value store, migrating legacy data
    pub fn load(kv: Box<dyn KvStore>) -> Self {
        let (todos, archived) = match kv.get(ITEMS_KEY) {
            Ok(Some(raw)) => decode_items(&raw),
            Ok(None) => (Vec::new(), Vec::new()),
            Err(e) => {
                warn!("failed to read items: {}", e);
                (Vec::new(), Vec::new())
            }
        };
        Self {
            todos,
            archived,
            kv,
        }
    }

    pub fn todos(&self) -> &[Item] {
        &self.todos
    }

    pub fn archived(&self) -> &[Item] {
        &self.archived
    }

    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.todos.iter().find(|item| item.id == id)
    }

    pub fn get_archived(&self, id: ItemId) -> Option<&Item> {
        self.archived.iter().find(|item| item.id == id)
    }

    /// Create a new empty item in editing state and append it.
    ///
    /// Returns the new id so the caller can focus it.
    pub fn add(&mut self) -> ItemId {
        let item = Item::new();
        let id = item.id;
        self.todos.push(item);
        self.save();
        id
    }

    /// Append an already-built item (import, restore-from-log)
    pub fn append_item(&mut self, item: Item) {
        self.todos.push(item);
        self.save();
    }

    /// Merge a partial update into the active item with `id`.
    ///
    /// Missing ids are ignored; list order is preserved.
    pub fn update(&mut self, id: ItemId, patch: ItemPatch) {
        if let Some(item) = self.todos.iter_mut().find(|item| item.id == id) {
            item.apply(patch);
            self.save();
        }
    }

    /// Same as `update`, for the archived list
    pub fn update_archived(&mut self, id: ItemId, patch: ItemPatch) {
        if let Some(item) = self.archived.iter_mut().find(|item| item.id == id) {
            item.apply(patch);
            self.save();
        }
    }

    /// Delete the active item with `id`, permanently.
    ///
    /// Returns the id the caller should select next: the item now
    /// occupying the removed slot, the new last item when the removed one
    /// was last, or nothing when the list is now empty.
    pub fn remove(&mut self, id: ItemId) -> Option<ItemId> {
        let index = self.todos.iter().position(|item| item.id == id)?;
        self.todos.remove(index);
        self.save();

        if self.todos.is_empty() {
            None
        } else if index < self.todos.len() {
            Some(self.todos[index].id)
        } else {
            self.todos.last().map(|item| item.id)
        }
    }

    /// Move an active item to the archived list, clearing its edit flag
    pub fn archive(&mut self, id: ItemId) {
        if let Some(index) = self.todos.iter().position(|item| item.id == id) {
            let mut item = self.todos.remove(index);
            item.is_editing = false;
            self.archived.push(item);
            self.save();
        }
    }

    /// Move an archived item back to the active list
    pub fn unarchive(&mut self, id: ItemId) {
        if let Some(index) = self.archived.iter().position(|item| item.id == id) {
            let mut item = self.archived.remove(index);
            item.is_editing = false;
            self.todos.push(item);
            self.save();
        }
    }

    /// Splice the active list: remove at `from`, insert at `to`.
    ///
    /// This is the commit point for the drag engine; out-of-range indices
    /// and `from == to` are no-ops.
    pub fn reorder(&mut self, from: usize, to: usize) {
        if from == to || from >= self.todos.len() || to > self.todos.len().saturating_sub(1) {
            return;
        }
        let item = self.todos.remove(from);
        self.todos.insert(to, item);
        self.save();
    }

    /// Produce the versioned full-state backup bundle
    pub fn export_snapshot(&self, log: &CalendarLog) -> ExportBundle {
        ExportBundle::new(
            self.todos.clone(),
            self.archived.clone(),
            log.entries().to_vec(),
        )
    }

    /// Replace all state with an imported bundle.
    ///
    /// The caller has already validated the bundle version; this replaces
    /// in-memory and persisted state wholesale.
    pub fn import_snapshot(&mut self, log: &mut CalendarLog, bundle: ExportBundle) {
        self.todos = bundle.todos;
        self.archived = bundle.archived_todos;
        self.save();
        log.replace_all(bundle.calendar_entries);
    }

    fn save(&self) {
        match encode_items(&self.todos, &self.archived) {
            Ok(raw) => {
                if let Err(e) = self.kv.set(ITEMS_KEY, &raw) {
                    warn!("failed to persist items: {}", e);
                }
            }
            Err(e) => warn!("failed to serialize items: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryKvStore;

    fn empty_store() -> (ItemStore, MemoryKvStore) {
        let kv = MemoryKvStore::new();
        (ItemStore::load(Box::new(kv.clone())), kv)
    }

    fn ids(items: &[Item]) -> Vec<ItemId> {
        items.iter().map(|item| item.id).collect()
    }

    #[test]
    fn test_add_starts_editing_and_returns_focusable_id() {
        let (mut store, _kv) = empty_store();
        let id = store.add();
        let item = store.get(id).unwrap();
        assert!(item.is_editing);
        assert!(item.text.is_empty());
    }

    #[test]
    fn test_update_missing_id_is_a_no_op() {
        let (mut store, _kv) = empty_store();
        store.add();
        store.update(999, ItemPatch::text("ghost"));
        assert!(store.todos().iter().all(|item| item.text.is_empty()));
    }

    #[test]
    fn test_update_preserves_insertion_order() {
        let (mut store, _kv) = empty_store();
        let a = store.add();
        let b = store.add();
        let c = store.add();
        store.update(b, ItemPatch::text("middle"));
        assert_eq!(ids(store.todos()), vec![a, b, c]);
    }

    #[test]
    fn test_remove_selects_item_at_former_index() {
        let (mut store, _kv) = empty_store();
        let a = store.add();
        let b = store.add();
        let c = store.add();

        assert_eq!(store.remove(b), Some(c));
        assert_eq!(ids(store.todos()), vec![a, c]);
    }

    #[test]
    fn test_remove_last_selects_new_last() {
        let (mut store, _kv) = empty_store();
        let a = store.add();
        let b = store.add();
        assert_eq!(store.remove(b), Some(a));
    }

    #[test]
    fn test_remove_only_item_selects_none() {
        let (mut store, _kv) = empty_store();
        let a = store.add();
        assert_eq!(store.remove(a), None);
        assert!(store.todos().is_empty());
    }

    #[test]
    fn test_id_never_in_both_lists() {
        let (mut store, _kv) = empty_store();
        let a = store.add();
        let b = store.add();

        store.archive(a);
        store.archive(b);
        store.unarchive(a);
        store.archive(a);
        store.unarchive(b);

        for item in store.todos() {
            assert!(store.get_archived(item.id).is_none());
        }
        for item in store.archived() {
            assert!(store.get(item.id).is_none());
        }
    }

    #[test]
    fn test_archive_then_unarchive_clears_editing() {
        let (mut store, _kv) = empty_store();
        let id = store.add();
        assert!(store.get(id).unwrap().is_editing);

        store.archive(id);
        store.unarchive(id);

        let item = store.get(id).unwrap();
        assert!(!item.is_editing);
    }

    #[test]
    fn test_archive_missing_id_is_harmless() {
        let (mut store, _kv) = empty_store();
        store.archive(123);
        store.unarchive(456);
        assert!(store.todos().is_empty());
        assert!(store.archived().is_empty());
    }

    #[test]
    fn test_edit_archive_unarchive_scenario() {
        let (mut store, _kv) = empty_store();
        let id = store.add();
        store.update(id, ItemPatch::text("Buy milk"));
        store.archive(id);
        store.unarchive(id);

        let item = store.get(id).unwrap();
        assert_eq!(item.text, "Buy milk");
        assert!(!item.is_editing);
    }

    #[test]
    fn test_reorder_splices() {
        let (mut store, _kv) = empty_store();
        let a = store.add();
        let b = store.add();
        let c = store.add();

        store.reorder(0, 2);
        assert_eq!(ids(store.todos()), vec![b, c, a]);

        // Same-index and out-of-range reorders change nothing
        store.reorder(1, 1);
        store.reorder(5, 0);
        assert_eq!(ids(store.todos()), vec![b, c, a]);
    }

    #[test]
    fn test_mutations_write_through_to_storage() {
        let kv = MemoryKvStore::new();
        let mut store = ItemStore::load(Box::new(kv.clone()));
        let id = store.add();
        store.update(id, ItemPatch::text("persisted"));
        store.archive(id);

        // A fresh store over the same kv sees the mutated state
        let reloaded = ItemStore::load(Box::new(kv));
        assert!(reloaded.todos().is_empty());
        assert_eq!(reloaded.archived().len(), 1);
        assert_eq!(reloaded.archived()[0].text, "persisted");
        assert!(!reloaded.archived()[0].is_editing);
    }

    #[test]
    fn test_load_migrates_legacy_bare_array() {
        let kv = MemoryKvStore::new();
        let legacy = serde_json::to_string(&vec![Item::new()]).unwrap();
        kv.set(ITEMS_KEY, &legacy).unwrap();

        let store = ItemStore::load(Box::new(kv));
        assert_eq!(store.todos().len(), 1);
        assert!(store.archived().is_empty());
    }
}
