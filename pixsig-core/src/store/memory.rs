//! In-memory metadata store for testing and embedding.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::MetadataStore;
use crate::error::Result;

/// Metadata store backed by a process-local map keyed by `(path, tag)`.
///
/// Stands in for the external tool in tests. Semantics match
/// [`super::ExifToolStore`]: writes replace, reads of absent or empty tags
/// yield `None`. The image file itself is never touched.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tags: Mutex<HashMap<(PathBuf, String), String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<(PathBuf, String), String>> {
        self.tags.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl MetadataStore for MemoryStore {
    fn write_tag(&self, path: &Path, tag: &str, value: &str) -> Result<()> {
        self.lock()
            .insert((path.to_path_buf(), tag.to_string()), value.to_string());
        Ok(())
    }

    fn read_tag(&self, path: &Path, tag: &str) -> Result<Option<Vec<u8>>> {
        let tags = self.lock();
        let value = tags
            .get(&(path.to_path_buf(), tag.to_string()))
            .filter(|v| !v.is_empty())
            .map(|v| v.as_bytes().to_vec());
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_tag_reads_none() {
        let store = MemoryStore::new();
        let value = store.read_tag(Path::new("a.png"), "Comment").unwrap();
        assert!(value.is_none());
    }

    #[test]
    fn test_write_then_read() {
        let store = MemoryStore::new();
        store
            .write_tag(Path::new("a.png"), "Comment", "hello")
            .unwrap();

        let value = store.read_tag(Path::new("a.png"), "Comment").unwrap();
        assert_eq!(value.as_deref(), Some(b"hello".as_slice()));
    }

    #[test]
    fn test_write_replaces_prior_value() {
        let store = MemoryStore::new();
        store
            .write_tag(Path::new("a.png"), "Comment", "first")
            .unwrap();
        store
            .write_tag(Path::new("a.png"), "Comment", "second")
            .unwrap();

        let value = store.read_tag(Path::new("a.png"), "Comment").unwrap();
        assert_eq!(value.as_deref(), Some(b"second".as_slice()));
    }

    #[test]
    fn test_tags_are_scoped_per_path_and_name() {
        let store = MemoryStore::new();
        store
            .write_tag(Path::new("a.png"), "Comment", "value")
            .unwrap();

        assert!(store
            .read_tag(Path::new("b.png"), "Comment")
            .unwrap()
            .is_none());
        assert!(store
            .read_tag(Path::new("a.png"), "Description")
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_empty_value_reads_none() {
        let store = MemoryStore::new();
        store.write_tag(Path::new("a.png"), "Comment", "").unwrap();

        let value = store.read_tag(Path::new("a.png"), "Comment").unwrap();
        assert!(value.is_none());
    }
}
