use crate::domain::Item;
use anyhow::Result;
use log::warn;
use serde::{Deserialize, Serialize};

/// Current on-disk schema version for the items bundle and export file
pub const SCHEMA_VERSION: u32 = 1;

/// The versioned shape stored under the items key
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemsBundle {
    pub version: u32,
    pub todos: Vec<Item>,
    #[serde(default)]
    pub archived_todos: Vec<Item>,
}

/// Every shape ever written under the items key.
///
/// The bare array predates the active/archived split; it is recognized and
/// migrated once at load time.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StoredItems {
    Versioned(ItemsBundle),
    Legacy(Vec<Item>),
}

/// Decode a stored items value into (active, archived).
///
/// A legacy bare array becomes "all active, no archived". Any other
/// unrecognized or version-mismatched shape is treated as absent data and
/// yields empty collections; corrupt local state must not crash the app.
pub fn decode_items(raw: &str) -> (Vec<Item>, Vec<Item>) {
    match serde_json::from_str::<StoredItems>(raw) {
        Ok(StoredItems::Versioned(bundle)) => {
            if bundle.version == SCHEMA_VERSION {
                (bundle.todos, bundle.archived_todos)
            } else {
                warn!(
                    "items bundle version {} does not match {}, starting empty",
                    bundle.version, SCHEMA_VERSION
                );
                (Vec::new(), Vec::new())
            }
        }
        Ok(StoredItems::Legacy(todos)) => {
            warn!("migrating legacy bare-array items format ({} items)", todos.len());
            (todos, Vec::new())
        }
        Err(e) => {
            warn!("unreadable items bundle, starting empty: {}", e);
            (Vec::new(), Vec::new())
        }
    }
}

/// Encode (active, archived) as the current versioned bundle
pub fn encode_items(todos: &[Item], archived: &[Item]) -> Result<String> {
    let bundle = ItemsBundle {
        version: SCHEMA_VERSION,
        todos: todos.to_vec(),
        archived_todos: archived.to_vec(),
    };
    Ok(serde_json::to_string(&bundle)?)
}
