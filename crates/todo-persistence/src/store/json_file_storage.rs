use crate::store::atomic_writer::AtomicWriter;
use crate::store::check_quota;
use crate::traits::PersistenceMetadata;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use todo_core::{KeyValueStore, TodoError, TodoResult};
use uuid::Uuid;

const FORMAT_VERSION: u32 = 1;

/// JSON file-based key-value storage
///
/// All entries live in one file so a save from another instance is visible
/// on the next read. Every read goes to disk; every write replaces the whole
/// file atomically.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
    instance_id: Uuid,
    quota: Option<usize>,
}

/// Wrapper structure for the storage file
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonEnvelope {
    pub version: u32,
    pub metadata: PersistenceMetadata,
    #[serde(default)]
    pub entries: BTreeMap<String, String>,
}

impl JsonEnvelope {
    pub fn empty(instance_id: Uuid) -> Self {
        Self {
            version: FORMAT_VERSION,
            metadata: PersistenceMetadata::new(instance_id),
            entries: BTreeMap::new(),
        }
    }

    pub fn to_json_bytes(&self) -> TodoResult<Vec<u8>> {
        serde_json::to_vec_pretty(self).map_err(|e| TodoError::Serialization(e.to_string()))
    }
}

impl JsonFileStorage {
    /// Create a new JSON file storage
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            instance_id: Uuid::new_v4(),
            quota: None,
        }
    }

    /// Create a new JSON file storage with a specific instance ID
    /// (useful for testing or coordinating across instances)
    pub fn with_instance_id(path: impl AsRef<Path>, instance_id: Uuid) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            instance_id,
            quota: None,
        }
    }

    /// Cap the total size of all entries, in bytes
    pub fn with_quota(mut self, quota: Option<usize>) -> Self {
        self.quota = quota;
        self
    }

    pub fn instance_id(&self) -> Uuid {
        self.instance_id
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Write an empty envelope if the file does not exist yet
    pub fn ensure_exists(&self) -> TodoResult<()> {
        if self.exists() {
            return Ok(());
        }
        let envelope = JsonEnvelope::empty(self.instance_id);
        AtomicWriter::write_atomic(&self.path, &envelope.to_json_bytes()?)?;
        tracing::info!("Created new storage file: {}", self.path.display());
        Ok(())
    }

    /// Read the current envelope; a missing file reads as empty
    pub fn load_envelope(&self) -> TodoResult<JsonEnvelope> {
        let Some(bytes) = AtomicWriter::read_all(&self.path)? else {
            return Ok(JsonEnvelope::empty(self.instance_id));
        };

        let envelope: JsonEnvelope = serde_json::from_slice(&bytes)
            .map_err(|e| TodoError::Serialization(e.to_string()))?;

        if envelope.version != FORMAT_VERSION {
            return Err(TodoError::Serialization(format!(
                "Unsupported format version: {}",
                envelope.version
            )));
        }

        Ok(envelope)
    }

    fn save_entries(&self, entries: BTreeMap<String, String>) -> TodoResult<PersistenceMetadata> {
        let envelope = JsonEnvelope {
            version: FORMAT_VERSION,
            metadata: PersistenceMetadata::new(self.instance_id),
            entries,
        };
        let json_bytes = envelope.to_json_bytes()?;

        AtomicWriter::write_atomic(&self.path, &json_bytes)?;

        tracing::info!(
            "Saved {} bytes to {}",
            json_bytes.len(),
            self.path.display()
        );

        Ok(envelope.metadata)
    }
}

impl KeyValueStore for JsonFileStorage {
    fn get(&self, key: &str) -> TodoResult<Option<String>> {
        let mut envelope = self.load_envelope()?;
        Ok(envelope.entries.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> TodoResult<()> {
        let mut envelope = self.load_envelope()?;
        check_quota(&envelope.entries, key, value, self.quota)?;
        envelope.entries.insert(key.to_string(), value.to_string());
        self.save_entries(envelope.entries)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> TodoResult<()> {
        let mut envelope = self.load_envelope()?;
        if envelope.entries.remove(key).is_some() {
            self.save_entries(envelope.entries)?;
        }
        Ok(())
    }
}
