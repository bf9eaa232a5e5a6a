use thiserror::Error;

use crate::logging::LoggingError;

/// Unified result type for the layout crate.
pub type Result<T> = std::result::Result<T, LayoutError>;

/// Errors surfaced at the fallible edges of the layout engine.
///
/// The geometry core never returns these: malformed numbers pass through and
/// unknown ids come back as `None`.
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("invalid canvas configuration: {0}")]
    InvalidConfig(String),
    #[error("container padding takes 1 to 4 values, got {0}")]
    InvalidPadding(usize),
    #[error("item `{0}` is already registered")]
    DuplicateItem(String),
    #[error("item `{0}` not found")]
    ItemNotFound(String),
    #[error("layout decode error: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("logging failure: {0}")]
    Logging(#[from] LoggingError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
