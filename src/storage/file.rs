//! File-backed preference storage.
//!
//! Preferences are kept as a flat TOML table of string values, one file per
//! user. Every write rewrites the whole file through a temp file + rename so a
//! crash never leaves a half-written store behind.

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;

use super::PreferenceStorage;

/// Preference storage persisted to a TOML file.
///
/// The file is read on every access so several handles (or processes) see
/// each other's writes; the last write wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    /// Creates storage backed by `path`. The file is created on first write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the raw file, `None` when it does not exist.
    fn read_content(&self) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }

        fs::read_to_string(&self.path)
            .map(Some)
            .context(format!(
                "Failed to read preferences file: {}",
                self.path.display()
            ))
    }

    /// Loads all entries. A missing file is an empty store.
    fn load(&self) -> Result<BTreeMap<String, String>> {
        let Some(content) = self.read_content()? else {
            return Ok(BTreeMap::new());
        };

        toml::from_str(&content).context(format!(
            "Failed to parse preferences file: {}",
            self.path.display()
        ))
    }

    /// Loads entries ahead of a write, flagging whether the file was discarded.
    ///
    /// An unparsable file is treated as empty so the write replaces it; I/O
    /// errors still fail.
    fn load_for_update(&self) -> Result<(BTreeMap<String, String>, bool)> {
        let Some(content) = self.read_content()? else {
            return Ok((BTreeMap::new(), false));
        };

        match toml::from_str(&content) {
            Ok(entries) => Ok((entries, false)),
            Err(e) => {
                warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Discarding corrupt preferences file"
                );
                Ok((BTreeMap::new(), true))
            }
        }
    }

    /// Writes all entries atomically.
    fn store(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).context(format!(
                    "Failed to create preferences directory: {}",
                    parent.display()
                ))?;
            }
        }

        let content =
            toml::to_string_pretty(entries).context("Failed to serialize preferences")?;
        let temp_path = self.path.with_extension("toml.tmp");

        fs::write(&temp_path, content).context(format!(
            "Failed to write temp preferences file: {}",
            temp_path.display()
        ))?;

        fs::rename(&temp_path, &self.path).context(format!(
            "Failed to rename temp preferences file to: {}",
            self.path.display()
        ))?;

        Ok(())
    }
}

impl PreferenceStorage for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.load()?.remove(key))
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        let (mut entries, _) = self.load_for_update()?;
        entries.insert(key.to_string(), value.to_string());
        self.store(&entries)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let (mut entries, discarded) = self.load_for_update()?;
        if entries.remove(key).is_some() || discarded {
            self.store(&entries)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_reads_as_empty() {
        let temp = TempDir::new().unwrap();
        let storage = FileStorage::new(temp.path().join("preferences.toml"));
        assert_eq!(storage.read("accent").unwrap(), None);
    }

    #[test]
    fn test_write_then_read() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("preferences.toml");
        let mut storage = FileStorage::new(&path);

        storage.write("accent", "emerald").unwrap();
        assert!(path.exists());
        assert!(!path.with_extension("toml.tmp").exists());

        let reopened = FileStorage::new(&path);
        assert_eq!(reopened.read("accent").unwrap().as_deref(), Some("emerald"));
    }

    #[test]
    fn test_write_keeps_other_keys() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("preferences.toml");
        fs::write(&path, "greeting = \"hello\"\n").unwrap();

        let mut storage = FileStorage::new(&path);
        storage.write("accent", "rose").unwrap();

        assert_eq!(storage.read("greeting").unwrap().as_deref(), Some("hello"));
        assert_eq!(storage.read("accent").unwrap().as_deref(), Some("rose"));
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("preferences.toml");
        fs::write(&path, "accent = [not toml").unwrap();

        let storage = FileStorage::new(&path);
        assert!(storage.read("accent").is_err());
    }

    #[test]
    fn test_write_replaces_corrupt_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("preferences.toml");
        fs::write(&path, "accent = [not toml").unwrap();

        let mut storage = FileStorage::new(&path);
        storage.write("accent", "cyan").unwrap();
        assert_eq!(storage.read("accent").unwrap().as_deref(), Some("cyan"));
    }

    #[test]
    fn test_remove_clears_corrupt_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("preferences.toml");
        fs::write(&path, "accent = [not toml").unwrap();

        let mut storage = FileStorage::new(&path);
        storage.remove("accent").unwrap();
        assert_eq!(storage.read("accent").unwrap(), None);
    }

    #[cfg(unix)]
    #[test]
    fn test_write_still_fails_on_unreadable_file() {
        let temp = TempDir::new().unwrap();
        // A directory at the file's path cannot be read as text
        let path = temp.path().join("preferences.toml");
        fs::create_dir(&path).unwrap();

        let mut storage = FileStorage::new(&path);
        assert!(storage.write("accent", "cyan").is_err());
    }

    #[test]
    fn test_remove_key() {
        let temp = TempDir::new().unwrap();
        let mut storage = FileStorage::new(temp.path().join("preferences.toml"));
        storage.write("accent", "cyan").unwrap();
        storage.remove("accent").unwrap();
        assert_eq!(storage.read("accent").unwrap(), None);
        storage.remove("accent").unwrap();
    }
}
