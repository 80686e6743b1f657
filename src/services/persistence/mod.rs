//! Persistence collaborator for the event store.
//! The whole collection lives as one serialized value in a key-value slot;
//! the slot implementations only move strings around.

mod json_file;
mod snapshot;
mod sqlite;

pub use json_file::JsonFileSlot;
pub use snapshot::{decode_snapshot, encode_snapshot, StoredEvent};
pub use sqlite::SqliteSlot;

use anyhow::Result;
use std::cell::RefCell;
use std::rc::Rc;

/// A single key-value slot holding the serialized event collection.
#[cfg_attr(test, mockall::automock)]
pub trait StorageSlot {
    /// Current contents, or `None` when nothing was ever written.
    fn read(&self) -> Result<Option<String>>;

    /// Replace the contents.
    fn write(&mut self, data: &str) -> Result<()>;

    /// Human-readable location for log lines.
    fn describe(&self) -> String;
}

/// Slot kept in process memory.
///
/// Clones share the same cell, so a test can keep a handle and inspect what
/// the store wrote.
#[derive(Debug, Clone, Default)]
pub struct MemorySlot {
    contents: Rc<RefCell<Option<String>>>,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_contents(data: impl Into<String>) -> Self {
        Self {
            contents: Rc::new(RefCell::new(Some(data.into()))),
        }
    }

    pub fn contents(&self) -> Option<String> {
        self.contents.borrow().clone()
    }
}

impl StorageSlot for MemorySlot {
    fn read(&self) -> Result<Option<String>> {
        Ok(self.contents())
    }

    fn write(&mut self, data: &str) -> Result<()> {
        *self.contents.borrow_mut() = Some(data.to_string());
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_slot_clones_share_contents() {
        let slot = MemorySlot::new();
        let mut writer = slot.clone();

        assert_eq!(slot.read().unwrap(), None);
        writer.write("[]").unwrap();
        assert_eq!(slot.contents(), Some("[]".to_string()));
    }
}
