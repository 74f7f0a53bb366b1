//! Error types for the charter library.

use std::path::PathBuf;

use thiserror::Error;

use crate::wizard::{GateRule, WizardStep};

type BoxedSource = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Comprehensive error type for all draft and wizard operations.
#[derive(Error, Debug)]
pub enum DraftError {
    /// A gate rule failed for the step being left or submitted
    #[error("Step {step} cannot be completed: {rule}")]
    ValidationFailed { step: WizardStep, rule: GateRule },
    /// WBS node not found for the given ID
    #[error("WBS node with ID {id} not found")]
    NodeNotFound { id: u64 },
    /// No roster entry references the given employee
    #[error("No team member with employee ID {employee_id}")]
    MemberNotFound { employee_id: u64 },
    /// Budget line index out of range
    #[error("Budget line {index} not found")]
    LineNotFound { index: usize },
    /// Draft not found in the persistence store
    #[error("Draft with ID {id} not found")]
    DraftNotFound { id: u64 },
    /// Invalid argument validation errors
    #[error("Invalid value for '{field}': {reason}")]
    InvalidArgument { field: String, reason: String },
    /// Persistence gateway failures (I/O, database, remote store)
    #[error("Persistence error: {message}")]
    Persistence {
        message: String,
        #[source]
        source: BoxedSource,
    },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Coarse classification of [`DraftError`] used by callers deciding whether
/// to retry, re-prompt or give up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    ValidationFailed,
    NotFound,
    InvalidArgument,
    PersistenceFailure,
    Configuration,
}

/// Builder for creating persistence errors with optional context.
pub struct PersistenceErrorBuilder {
    message: String,
}

impl PersistenceErrorBuilder {
    /// Create a new persistence error builder with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build the error with the given source.
    pub fn with_source<E>(self, source: E) -> DraftError
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        DraftError::Persistence {
            message: self.message,
            source: Box::new(source),
        }
    }
}

/// Builder for creating argument validation errors.
pub struct InvalidArgumentBuilder {
    field: String,
}

impl InvalidArgumentBuilder {
    /// Create a new invalid argument error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> DraftError {
        DraftError::InvalidArgument {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl DraftError {
    /// Creates a builder for persistence errors.
    pub fn persistence(message: impl Into<String>) -> PersistenceErrorBuilder {
        PersistenceErrorBuilder::new(message)
    }

    /// Creates a builder for argument validation errors.
    pub fn invalid_argument(field: impl Into<String>) -> InvalidArgumentBuilder {
        InvalidArgumentBuilder::new(field)
    }

    /// Classifies the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ValidationFailed { .. } => ErrorKind::ValidationFailed,
            Self::NodeNotFound { .. }
            | Self::MemberNotFound { .. }
            | Self::LineNotFound { .. }
            | Self::DraftNotFound { .. } => ErrorKind::NotFound,
            Self::InvalidArgument { .. } => ErrorKind::InvalidArgument,
            Self::Persistence { .. } | Self::FileSystem { .. } | Self::Serialization { .. } => {
                ErrorKind::PersistenceFailure
            }
            Self::XdgDirectory(_) | Self::Configuration { .. } => ErrorKind::Configuration,
        }
    }

    /// Returns the failing gate rule for validation errors.
    pub fn gate_rule(&self) -> Option<GateRule> {
        match self {
            Self::ValidationFailed { rule, .. } => Some(*rule),
            _ => None,
        }
    }
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| DraftError::persistence(message).with_source(e))
    }
}

/// Result type alias for charter operations
pub type Result<T> = std::result::Result<T, DraftError>;
