use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading an export or normalizing its dates.
#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed export: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid date {text:?}: {reason}")]
    InvalidDate { text: String, reason: String },
}

impl Error {
    pub(crate) fn invalid_date(text: &str, reason: impl Into<String>) -> Self {
        Error::InvalidDate {
            text: text.to_string(),
            reason: reason.into(),
        }
    }
}
