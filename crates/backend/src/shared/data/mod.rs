pub mod memory_store;
pub mod record_store;
pub mod sqlite_store;

pub use memory_store::MemoryRecordStore;
pub use record_store::{keys, RecordStore};
pub use sqlite_store::SqliteRecordStore;

/// Decode a stored JSON value. Corrupt payloads are logged and treated as absent.
pub fn decode_or_warn<T: serde::de::DeserializeOwned>(key: &str, raw: &str) -> Option<T> {
    match serde_json::from_str(raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!("Ignoring malformed record at {}: {}", key, e);
            None
        }
    }
}
