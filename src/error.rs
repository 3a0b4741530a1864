//! Error types

use thiserror::Error;

/// Errors raised by the visibility state and its settings
#[derive(Debug, Error)]
pub enum Error {
    /// A value outside the accepted set was passed in
    #[error("invalid {what}: {value:?}")]
    InvalidArgument { what: &'static str, value: String },

    #[error("settings I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("settings JSON is malformed: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn invalid(what: &'static str, value: impl Into<String>) -> Self {
        Error::InvalidArgument {
            what,
            value: value.into(),
        }
    }

    /// True for the `InvalidArgument` kind
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Error::InvalidArgument { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
