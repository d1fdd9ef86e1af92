//! Persistence error types.

use derive_more::{Display, Error};
use tracing::instrument;

/// What went wrong while saving, loading or listing games.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum PersistenceErrorKind {
    /// A stored record is missing a required field or has one of the wrong kind.
    #[display("Malformed record: {}", _0)]
    MalformedRecord(String),
    /// The backing store could not be read or written.
    #[display("Store unavailable: {}", _0)]
    StoreUnavailable(String),
    /// No record is stored under the requested key.
    #[display("No saved game under key '{}'", _0)]
    NotFound(String),
}

/// Persistence error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Persistence error: {} at {}:{}", kind, file, line)]
pub struct PersistenceError {
    /// Error kind.
    pub kind: PersistenceErrorKind,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl PersistenceError {
    /// Creates a new persistence error with caller location tracking.
    #[track_caller]
    #[instrument]
    pub fn new(kind: PersistenceErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Shorthand for a [`PersistenceErrorKind::MalformedRecord`] error.
    #[track_caller]
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::new(PersistenceErrorKind::MalformedRecord(message.into()))
    }

    /// Shorthand for a [`PersistenceErrorKind::StoreUnavailable`] error.
    #[track_caller]
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(PersistenceErrorKind::StoreUnavailable(message.into()))
    }

    /// Shorthand for a [`PersistenceErrorKind::NotFound`] error.
    #[track_caller]
    pub fn not_found(key: impl Into<String>) -> Self {
        Self::new(PersistenceErrorKind::NotFound(key.into()))
    }

    /// Returns whether this is a malformed-record failure.
    pub fn is_malformed(&self) -> bool {
        matches!(self.kind, PersistenceErrorKind::MalformedRecord(_))
    }

    /// Returns whether this is a store failure.
    pub fn is_unavailable(&self) -> bool {
        matches!(self.kind, PersistenceErrorKind::StoreUnavailable(_))
    }
}

impl From<serde_json::Error> for PersistenceError {
    #[track_caller]
    fn from(err: serde_json::Error) -> Self {
        Self::malformed(err.to_string())
    }
}

impl From<std::io::Error> for PersistenceError {
    #[track_caller]
    fn from(err: std::io::Error) -> Self {
        Self::unavailable(format!("I/O error: {}", err))
    }
}

impl From<diesel::result::Error> for PersistenceError {
    #[track_caller]
    fn from(err: diesel::result::Error) -> Self {
        Self::unavailable(format!("Diesel error: {}", err))
    }
}

impl From<diesel::ConnectionError> for PersistenceError {
    #[track_caller]
    fn from(err: diesel::ConnectionError) -> Self {
        Self::unavailable(format!("Connection error: {}", err))
    }
}
