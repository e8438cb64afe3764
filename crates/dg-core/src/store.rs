//! String-keyed blob storage.
//!
//! The repository layer only needs get/set/remove/list over string keys, the
//! same surface a browser's local storage offers. [`MemoryStore`] keeps
//! everything in a map; [`DirStore`] keeps one file per key in a directory.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::CoreResult;

/// File extension used by [`DirStore`] entries.
const ENTRY_EXTENSION: &str = "json";

/// A synchronous string key to string value store.
pub trait KeyValueStore {
    /// Read the value under `key`, if any.
    fn get(&self, key: &str) -> CoreResult<Option<String>>;

    /// Write `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> CoreResult<()>;

    /// Remove `key`. Returns true if it existed.
    fn remove(&mut self, key: &str) -> CoreResult<bool>;

    /// All keys currently stored, in no particular order.
    fn keys(&self) -> CoreResult<Vec<String>>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &mut S {
    fn get(&self, key: &str) -> CoreResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> CoreResult<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> CoreResult<bool> {
        (**self).remove(key)
    }

    fn keys(&self) -> CoreResult<Vec<String>> {
        (**self).keys()
    }
}

/// An in-memory store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> CoreResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> CoreResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> CoreResult<bool> {
        Ok(self.entries.remove(key).is_some())
    }

    fn keys(&self) -> CoreResult<Vec<String>> {
        Ok(self.entries.keys().cloned().collect())
    }
}

/// A store that keeps each key as `<dir>/<key>.json`.
///
/// Keys are percent-style escaped so any sheet name maps to a safe file name;
/// [`KeyValueStore::keys`] reverses the escaping.
#[derive(Debug, Clone)]
pub struct DirStore {
    root: PathBuf,
}

impl DirStore {
    /// Use `root` as the storage directory. It is created on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The storage directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root
            .join(format!("{}.{ENTRY_EXTENSION}", encode_key(key)))
    }
}

impl KeyValueStore for DirStore {
    fn get(&self, key: &str) -> CoreResult<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> CoreResult<()> {
        fs::create_dir_all(&self.root)?;
        let path = self.path_for(key);
        fs::write(&path, value)?;
        tracing::debug!(key, path = %path.display(), "stored entry");
        Ok(())
    }

    fn remove(&mut self, key: &str) -> CoreResult<bool> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    fn keys(&self) -> CoreResult<Vec<String>> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut keys = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().is_none_or(|ext| ext != ENTRY_EXTENSION) {
                continue;
            }
            if let Some(key) = path
                .file_stem()
                .and_then(|s| s.to_str())
                .and_then(decode_key)
            {
                keys.push(key);
            }
        }
        Ok(keys)
    }
}

/// Escape everything outside `[A-Za-z0-9_-]` as `%XX` per UTF-8 byte.
fn encode_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    for byte in key.bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'_' || byte == b'-' {
            out.push(byte as char);
        } else {
            out.push_str(&format!("%{byte:02X}"));
        }
    }
    out
}

fn decode_key(encoded: &str) -> Option<String> {
    let mut bytes = Vec::with_capacity(encoded.len());
    let mut iter = encoded.bytes();
    while let Some(byte) = iter.next() {
        if byte == b'%' {
            let hi = iter.next()?;
            let lo = iter.next()?;
            let hex = [hi, lo];
            let text = std::str::from_utf8(&hex).ok()?;
            bytes.push(u8::from_str_radix(text, 16).ok()?);
        } else {
            bytes.push(byte);
        }
    }
    String::from_utf8(bytes).ok()
}
