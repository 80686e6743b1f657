// Error taxonomy shared by the store, grid and interaction layers

use thiserror::Error;

use crate::models::event::EventId;

/// Failures reported by the timeline core.
///
/// `Validation` is recovered at the form boundary, `NotFound` is swallowed
/// when a gesture commits against a deleted event, and `Persistence` is only
/// logged: the in-memory store stays authoritative for the session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalendarError {
    #[error("invalid input: {0}")]
    Validation(String),

    #[error("event {0} not found")]
    NotFound(EventId),

    #[error("persistence failed: {0}")]
    Persistence(String),
}

impl CalendarError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Wrap an infrastructure error, keeping its full context chain.
    pub fn persistence(err: anyhow::Error) -> Self {
        Self::Persistence(format!("{:#}", err))
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, CalendarError>;
