//! Index (staging area)
//!
//! The index records which workspace files go into the next commit, as an ordered list of
//! `(path, blob id)` entries unique by path. Staging a path that is already staged replaces
//! its blob id in place, so entries keep their first-insertion order. The index is cleared
//! after every successful commit.
//!
//! The file is rewritten as a whole on every change (see [`crate::artifacts::index`] for the
//! line format). A missing file reads as an empty index.

use crate::artifacts::core::atomic_file::write_atomically;
use crate::artifacts::index::index_entry::IndexEntry;
use crate::errors::{RepositoryError, Result};
use std::path::Path;

/// Index (staging area)
#[derive(Debug)]
pub struct Index {
    path: Box<Path>,
    entries: Vec<IndexEntry>,
    changed: bool,
}

impl Index {
    pub fn new(path: Box<Path>) -> Self {
        Index {
            path,
            entries: Vec::new(),
            changed: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reload entries from disk, discarding unsaved changes
    pub fn rehydrate(&mut self) -> Result<()> {
        self.entries.clear();
        self.changed = false;

        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(()),
            Err(err) => return Err(RepositoryError::io(&self.path, err)),
        };

        for line in content.lines().filter(|line| !line.trim().is_empty()) {
            let entry = IndexEntry::parse_line(line)?;
            self.upsert(entry);
        }

        Ok(())
    }

    pub fn entries(&self) -> impl Iterator<Item = &IndexEntry> {
        self.entries.iter()
    }

    pub fn into_entries(self) -> Vec<IndexEntry> {
        self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn entry_by_path(&self, path: &str) -> Option<&IndexEntry> {
        self.entries.iter().find(|entry| entry.path == path)
    }

    /// Stage an entry, replacing the blob id of an already staged path
    pub fn add(&mut self, entry: IndexEntry) {
        self.upsert(entry);
        self.changed = true;
    }

    pub fn remove(&mut self, path: &str) -> Result<IndexEntry> {
        let position = self
            .entries
            .iter()
            .position(|entry| entry.path == path)
            .ok_or_else(|| RepositoryError::NotStaged(path.to_string()))?;

        self.changed = true;
        Ok(self.entries.remove(position))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.changed = true;
    }

    /// Swap in a whole new entry list; a repeated path keeps its first position and last id
    pub fn replace(&mut self, entries: Vec<IndexEntry>) {
        self.entries.clear();
        for entry in entries {
            self.upsert(entry);
        }
        self.changed = true;
    }

    /// Persist the entries if anything changed since the last load or write
    pub fn write_updates(&mut self) -> Result<()> {
        if !self.changed {
            return Ok(());
        }

        let content: String = self
            .entries
            .iter()
            .map(|entry| entry.to_line() + "\n")
            .collect();
        write_atomically(&self.path, content.as_bytes())?;

        self.changed = false;
        Ok(())
    }

    fn upsert(&mut self, entry: IndexEntry) {
        match self.entries.iter_mut().find(|e| e.path == entry.path) {
            Some(existing) => existing.oid = entry.oid,
            None => self.entries.push(entry),
        }
    }
}
