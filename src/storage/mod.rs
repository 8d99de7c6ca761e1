//! Persistent preference storage.
//!
//! A string key/value store scoped to one user. The accent store reads and
//! writes a single key through the [`PreferenceStorage`] trait so the backing
//! medium can be swapped: a TOML file for the CLI, an in-memory map for tests
//! and embedders, or an always-failing store that models a disabled backend.

pub mod file;
pub mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use anyhow::Result;

/// Key/value string storage for user preferences.
///
/// Both operations may fail; callers decide how to degrade.
pub trait PreferenceStorage {
    /// Reads the value stored under `key`, `Ok(None)` when absent.
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn write(&mut self, key: &str, value: &str) -> Result<()>;

    /// Removes `key`. Removing an absent key is not an error.
    fn remove(&mut self, key: &str) -> Result<()>;
}

impl<S: PreferenceStorage + ?Sized> PreferenceStorage for Box<S> {
    fn read(&self, key: &str) -> Result<Option<String>> {
        (**self).read(key)
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).write(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}

/// Storage that is never available.
///
/// Every call fails, the way browser storage does when it is disabled or
/// blocked. Useful for exercising degraded mode.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableStorage;

impl PreferenceStorage for UnavailableStorage {
    fn read(&self, key: &str) -> Result<Option<String>> {
        anyhow::bail!("Preference storage unavailable (read '{key}')")
    }

    fn write(&mut self, key: &str, _value: &str) -> Result<()> {
        anyhow::bail!("Preference storage unavailable (write '{key}')")
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        anyhow::bail!("Preference storage unavailable (remove '{key}')")
    }
}
