pub mod atomic_writer;
pub mod json_file_storage;
pub mod memory_storage;

pub use atomic_writer::AtomicWriter;
pub use json_file_storage::{JsonEnvelope, JsonFileStorage};
pub use memory_storage::MemoryStorage;

use std::collections::BTreeMap;
use todo_core::{TodoError, TodoResult};

/// Bytes an entry map occupies when measured the way browsers measure
/// local storage: key length plus value length for every entry.
pub(crate) fn entries_size(entries: &BTreeMap<String, String>) -> usize {
    entries.iter().map(|(k, v)| k.len() + v.len()).sum()
}

/// Reject a write that would grow the entries past `quota`.
pub(crate) fn check_quota(
    entries: &BTreeMap<String, String>,
    key: &str,
    value: &str,
    quota: Option<usize>,
) -> TodoResult<()> {
    let Some(quota) = quota else {
        return Ok(());
    };
    let current = entries_size(entries);
    let replaced = entries.get(key).map(|v| key.len() + v.len()).unwrap_or(0);
    let needed = current - replaced + key.len() + value.len();
    if needed > quota {
        return Err(TodoError::QuotaExceeded { needed, quota });
    }
    Ok(())
}
