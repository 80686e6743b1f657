//! In-memory event store.
//! Owns the event collection, assigns ids, and mirrors every mutation to an
//! optional persistence slot. Operations are split across focused submodules.

use crate::error::{CalendarError, Result};
use crate::models::event::{CalendarEvent, EventId};
use crate::models::settings::StorageBackend;
use crate::services::persistence::{
    decode_snapshot, encode_snapshot, JsonFileSlot, SqliteSlot, StorageSlot,
};

pub mod crud;
pub mod queries;

/// Event boundary adjusted by a resize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResizeEdge {
    Start,
    End,
}

/// Exclusive owner of the calendar events.
///
/// Every mutation is applied in memory first and then written through to the
/// slot. A failed write is logged and remembered but never undoes the
/// mutation: memory stays the source of truth for the session.
pub struct EventStore {
    events: Vec<CalendarEvent>,
    next_id: u64,
    slot: Option<Box<dyn StorageSlot>>,
    /// The slot held something at open, even if it could not be read.
    had_saved_data: bool,
    last_persistence_error: Option<CalendarError>,
}

impl EventStore {
    /// Store with no persistence.
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
            next_id: 1,
            slot: None,
            had_saved_data: false,
            last_persistence_error: None,
        }
    }

    /// Load the collection from `slot` and keep writing through to it.
    ///
    /// Load problems never fail the store: unreadable or non-array contents
    /// start an empty collection, malformed entries are skipped.
    pub fn open(slot: Box<dyn StorageSlot>) -> Self {
        let mut store = Self::new();
        let location = slot.describe();

        let read = slot.read();
        // A failed read may hide real data, so it counts as saved
        store.had_saved_data = !matches!(read, Ok(None));
        match read {
            Ok(Some(data)) => match decode_snapshot(&data) {
                Ok(events) => {
                    log::info!("Loaded {} events from {}", events.len(), location);
                    store.events = events;
                }
                Err(err) => {
                    log::error!("Ignoring stored events in {}: {:#}", location, err);
                    store.last_persistence_error = Some(CalendarError::persistence(err));
                }
            },
            Ok(None) => log::info!("No stored events in {}", location),
            Err(err) => {
                log::error!("Failed to read events from {}: {:#}", location, err);
                store.last_persistence_error = Some(CalendarError::persistence(err));
            }
        }

        store.next_id = store
            .events
            .iter()
            .filter_map(|event| event.id().0.checked_add(1))
            .max()
            .unwrap_or(1);
        store.slot = Some(slot);
        store
    }

    /// Open the store on a configured backend.
    ///
    /// A SQLite database that cannot be opened leaves the store in memory
    /// with the failure recorded.
    pub fn from_backend(backend: &StorageBackend) -> Self {
        match backend {
            StorageBackend::Memory => Self::new(),
            StorageBackend::JsonFile { path } => Self::open(Box::new(JsonFileSlot::new(path))),
            StorageBackend::Sqlite { path } => {
                match SqliteSlot::open(&path.to_string_lossy()) {
                    Ok(slot) => Self::open(Box::new(slot)),
                    Err(err) => {
                        log::error!("Events will not be saved: {:#}", err);
                        let mut store = Self::new();
                        store.last_persistence_error = Some(CalendarError::persistence(err));
                        store
                    }
                }
            }
        }
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Whether the slot held a saved collection when the store opened.
    ///
    /// True for a saved empty list and for contents that failed to load;
    /// false only when nothing was ever written.
    pub fn had_saved_data(&self) -> bool {
        self.had_saved_data
    }

    /// Error from the most recent load or write, cleared by a successful write.
    pub fn last_persistence_error(&self) -> Option<&CalendarError> {
        self.last_persistence_error.as_ref()
    }

    /// Write the collection to the slot and report the outcome.
    pub fn flush(&mut self) -> Result<()> {
        let Some(slot) = self.slot.as_mut() else {
            return Ok(());
        };

        let outcome = encode_snapshot(&self.events)
            .and_then(|data| slot.write(&data))
            .map_err(CalendarError::persistence);
        self.last_persistence_error = outcome.as_ref().err().cloned();
        outcome
    }

    /// Fire-and-forget write after a mutation.
    fn persist(&mut self) {
        if let Err(err) = self.flush() {
            log::error!("Event changes were kept in memory only: {}", err);
        }
    }

    fn position(&self, id: EventId) -> Result<usize> {
        self.events
            .iter()
            .position(|event| event.id() == id)
            .ok_or(CalendarError::NotFound(id))
    }
}

impl Default for EventStore {
    fn default() -> Self {
        Self::new()
    }
}
