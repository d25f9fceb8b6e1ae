//! Key-value persistence for board data.
//!
//! A store holds named JSON blobs. The file-backed store keeps one
//! `<key>.json` file per key inside the data directory; the in-memory store
//! backs tests.

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::BoardError;

/// Storage key of the project list (`p1 -> name`).
pub const PROJECTS_LIST_TEXT_KEY: &str = "projectsListText";
/// Storage key of the project mapping (`Project1 -> project`).
pub const PROJECT_MAPPING_KEY: &str = "projectMapping";

/// A store for JSON blobs keyed by name.
pub trait KeyValueStore {
    /// Write (create or overwrite) a value.
    fn put(&mut self, key: &str, value: &Value) -> Result<(), BoardError>;

    /// Read a value. Absent keys read as an empty JSON object.
    fn get(&self, key: &str) -> Result<Value, BoardError>;
}

/// Serialize `data` and store it under `key`.
pub fn save<T, S>(store: &mut S, key: &str, data: &T) -> Result<(), BoardError>
where
    T: Serialize + ?Sized,
    S: KeyValueStore + ?Sized,
{
    let value = serde_json::to_value(data)?;
    store.put(key, &value)
}

/// Read and deserialize the value under `key`.
pub fn load<T, S>(store: &S, key: &str) -> Result<T, BoardError>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    let value = store.get(key)?;
    Ok(serde_json::from_value(value)?)
}

/// File-backed store rooted at a data directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open a store, creating the directory if needed.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, BoardError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(FileStore { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn resolve(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn put(&mut self, key: &str, value: &Value) -> Result<(), BoardError> {
        // Atomic-ish write via temp + rename.
        let path = self.resolve(key);
        let tmp = path.with_extension("json.tmp");
        let data = serde_json::to_string_pretty(value)?;
        let mut f = File::create(&tmp)?;
        f.write_all(data.as_bytes())?;
        f.flush()?;
        fs::rename(&tmp, &path)?;
        tracing::debug!(key, path = %path.display(), "stored blob");
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Value, BoardError> {
        let path = self.resolve(key);
        match fs::read_to_string(&path) {
            Ok(buf) if buf.trim().is_empty() => Ok(Value::Object(Default::default())),
            Ok(buf) => Ok(serde_json::from_str(&buf)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Value::Object(Default::default())),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory store. Every `put` is counted so tests can assert persistence.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    blobs: HashMap<String, Value>,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `put` calls so far.
    pub fn writes(&self) -> usize {
        self.writes
    }

    pub fn raw(&self, key: &str) -> Option<&Value> {
        self.blobs.get(key)
    }
}

impl KeyValueStore for MemoryStore {
    fn put(&mut self, key: &str, value: &Value) -> Result<(), BoardError> {
        self.blobs.insert(key.to_string(), value.clone());
        self.writes += 1;
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Value, BoardError> {
        Ok(self
            .blobs
            .get(key)
            .cloned()
            .unwrap_or_else(|| Value::Object(Default::default())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn file_store_missing_key_reads_empty_object() {
        let tmp = tempfile::tempdir().unwrap();
        let store = FileStore::open(tmp.path()).unwrap();
        assert_eq!(store.get("projectsListText").unwrap(), json!({}));
    }

    #[test]
    fn file_store_put_then_get() {
        let tmp = tempfile::tempdir().unwrap();
        let mut store = FileStore::open(tmp.path().join("nested")).unwrap();
        store.put("projectsListText", &json!({"p1": "Home"})).unwrap();
        assert!(tmp.path().join("nested/projectsListText.json").exists());
        assert!(!tmp.path().join("nested/projectsListText.json.tmp").exists());
        assert_eq!(store.get("projectsListText").unwrap(), json!({"p1": "Home"}));
    }

    #[test]
    fn file_store_reports_corrupt_json() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("projectMapping.json"), "{not json").unwrap();
        let store = FileStore::open(tmp.path()).unwrap();
        assert!(matches!(store.get("projectMapping"), Err(BoardError::Json(_))));
    }

    #[test]
    fn typed_helpers() {
        let mut store = MemoryStore::new();
        let names = vec!["a".to_string(), "b".to_string()];
        save(&mut store, "names", &names).unwrap();
        let back: Vec<String> = load(&store, "names").unwrap();
        assert_eq!(back, names);
        assert_eq!(store.writes(), 1);
    }
}
