//! Metadata fetch error types.

use thiserror::Error;

/// Failure to obtain the image list.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum MetadataError {
    #[error("network error: {message}")]
    Network { message: String },

    #[error("HTTP error: {status}")]
    HttpStatus { status: u16 },

    #[error("malformed image list: {message}")]
    Malformed { message: String },
}

impl MetadataError {
    /// Creates network error.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Creates malformed-body error.
    #[must_use]
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed {
            message: message.into(),
        }
    }

    /// Banner text shown in place of the gallery.
    #[must_use]
    pub fn user_message(&self) -> String {
        format!("Failed to load images: {self}")
    }
}
