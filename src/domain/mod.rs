pub mod entry;
pub mod enums;
pub mod item;
pub mod note;

pub use entry::{CalendarEntry, EntryId, TimeSpent};
pub use enums::{ItemColor, NoteType, RestoredKind};
pub use item::{Item, ItemId, ItemPatch, RestoredFrom, TimerSetting};
pub use note::{convert_note, note_lines, toggle_checkbox, NoteLine};
