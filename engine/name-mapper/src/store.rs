use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::MappingError;

/// Persistent store for confirmed name mappings
///
/// Keys are source-platform names exactly as supplied; values are the
/// matched rankings-list names. `insert` must make the mapping durable
/// before returning so a crash never loses a confirmed match.
pub trait MappingStore: Send + Sync {
    /// Look up the mapped name for a source name
    fn get(&self, source_name: &str) -> Option<String>;

    /// Record a confirmed mapping and persist it
    fn insert(&mut self, source_name: &str, mapped_name: &str) -> Result<(), MappingError>;

    /// Number of stored mappings
    fn len(&self) -> usize;

    /// Check if the store is empty
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// JSON-file backed mapping store
///
/// The whole file is read once at open and rewritten in full on every
/// insert. Writes go through a temp file and rename so a crash mid-write
/// leaves the previous file intact. Keys are stored sorted, which keeps
/// rewrites deterministic.
pub struct JsonMappingStore {
    path: PathBuf,
    mappings: BTreeMap<String, String>,
}

impl JsonMappingStore {
    /// Open the store at `path`, loading any existing mappings.
    ///
    /// A missing file is an empty store; a present-but-unreadable file is
    /// an error so a corrupt cache does not silently discard history.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, MappingError> {
        let path = path.as_ref().to_path_buf();

        let mappings = match fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str::<BTreeMap<String, String>>(&raw)
                .map_err(|source| MappingError::Format { path: path.clone(), source })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(source) => return Err(MappingError::Io { path, source }),
        };

        info!("Loaded {} name mappings from {:?}", mappings.len(), path);
        Ok(Self { path, mappings })
    }

    /// Snapshot of all stored mappings
    pub fn mappings(&self) -> &BTreeMap<String, String> {
        &self.mappings
    }

    fn flush(&self) -> Result<(), MappingError> {
        let json = serde_json::to_string_pretty(&self.mappings)
            .map_err(|source| MappingError::Format { path: self.path.clone(), source })?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)
            .map_err(|source| MappingError::Io { path: tmp.clone(), source })?;
        fs::rename(&tmp, &self.path)
            .map_err(|source| MappingError::Io { path: self.path.clone(), source })?;

        Ok(())
    }
}

impl MappingStore for JsonMappingStore {
    fn get(&self, source_name: &str) -> Option<String> {
        self.mappings.get(source_name).cloned()
    }

    fn insert(&mut self, source_name: &str, mapped_name: &str) -> Result<(), MappingError> {
        self.mappings.insert(source_name.to_string(), mapped_name.to_string());
        self.flush()
    }

    fn len(&self) -> usize {
        self.mappings.len()
    }
}

/// In-memory mapping store with no durability
///
/// Used by unit tests and callers that opt out of the on-disk cache.
#[derive(Default)]
pub struct MemoryMappingStore {
    mappings: BTreeMap<String, String>,
}

impl MemoryMappingStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MappingStore for MemoryMappingStore {
    fn get(&self, source_name: &str) -> Option<String> {
        self.mappings.get(source_name).cloned()
    }

    fn insert(&mut self, source_name: &str, mapped_name: &str) -> Result<(), MappingError> {
        self.mappings.insert(source_name.to_string(), mapped_name.to_string());
        Ok(())
    }

    fn len(&self) -> usize {
        self.mappings.len()
    }
}
