pub mod bundle;
pub mod export;
pub mod kv;

pub use bundle::{decode_items, encode_items, ItemsBundle, SCHEMA_VERSION};
pub use export::{export_to_file, import_from_file, import_from_str, ExportBundle, ImportError};
pub use kv::{
    default_data_dir, FileKvStore, KvStore, MemoryKvStore, CALENDAR_KEY, ITEMS_KEY,
    TIMER_PRESET_KEY, TIMER_STATE_KEY,
};
