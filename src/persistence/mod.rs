//! Key-value persistence for player preferences
//!
//! Only two scalars are persisted: the high score and the selected bird theme.
//! Values are stored as decimal integer text. Reads never fail: a missing or
//! unparseable value reads as 0. Writes are best-effort.

use std::collections::HashMap;
use std::fmt;

#[cfg(target_arch = "wasm32")]
mod local;

#[cfg(target_arch = "wasm32")]
pub use local::LocalStore;

/// Storage failures. Callers log these and carry on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No backing storage (e.g. LocalStorage disabled)
    Unavailable,
    /// The backend refused the write (quota, private mode)
    WriteRejected(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Unavailable => write!(f, "storage unavailable"),
            StoreError::WriteRejected(msg) => write!(f, "storage write rejected: {msg}"),
        }
    }
}

impl std::error::Error for StoreError {}

/// A string key-value store
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// In-memory store for native runs and tests
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    /// Number of successful writes (lets tests count persistence)
    pub writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        self.writes += 1;
        Ok(())
    }
}

/// Read a non-negative integer, defaulting to 0 when absent or malformed
pub fn read_int(store: &dyn KeyValueStore, key: &str) -> u32 {
    match store.get(key) {
        Some(raw) => match parse_int(&raw) {
            Some(value) => value,
            None => {
                log::warn!("Ignoring malformed stored value for {key}: {raw:?}");
                0
            }
        },
        None => 0,
    }
}

/// Write an integer, logging instead of failing
pub fn write_int(store: &mut dyn KeyValueStore, key: &str, value: u32) {
    if let Err(e) = store.set(key, &value.to_string()) {
        log::warn!("Failed to persist {key}: {e}");
    }
}

/// Leading-digits parse: `"42"` and `"42abc"` both read as 42, like the
/// browser's integer parsing of stored text
fn parse_int(raw: &str) -> Option<u32> {
    let trimmed = raw.trim_start();
    let end = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());
    trimmed[..end].parse().ok()
}
