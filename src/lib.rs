//! Core of a personal notes/todo application: the item store, the
//! drag-reorder engine, the countdown timer and the calendar log, plus
//! their persistence wrappers around a generic key-value store.
//!
//! Rendering, gesture recognition and OS scheduling live in the host
//! application; this crate owns the state machines and the data.

pub mod calendar;
pub mod domain;
pub mod id;
pub mod notifications;
pub mod persistence;
pub mod reorder;
pub mod store;
pub mod ticker;
pub mod timer;

pub use calendar::CalendarLog;
pub use domain::{
    CalendarEntry, EntryId, Item, ItemColor, ItemId, ItemPatch, NoteType, RestoredFrom,
    RestoredKind, TimeSpent, TimerSetting,
};
pub use notifications::{DesktopNotifier, NullNotifier, TimerNotifier};
pub use persistence::{
    export_to_file, import_from_file, import_from_str, ExportBundle, FileKvStore, ImportError,
    KvStore, MemoryKvStore,
};
pub use reorder::{DragReorder, LayoutRect, Reorder, ITEM_GAP};
pub use store::ItemStore;
pub use timer::{Clock, DurationPreset, SystemClock, TimerEngine, TimerStateRecord};
