//! Unified error type for the ChemStock client.
//!
//! Every fallible operation in the crate returns [`Result`]. The view layer turns
//! an [`Error`] into a single notification through [`Error::user_message`].

use thiserror::Error;

/// Fallback text when the backend gives no usable message.
pub const GENERIC_FAILURE: &str = "Something went wrong";

/// All errors the client can produce.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid or missing configuration
    #[error("Configuration error: {message}")]
    Config {
        /// What was wrong
        message: String,
    },

    /// A form failed its local presence checks; nothing was sent
    #[error("{message}")]
    Validation {
        /// Name of the offending field
        field: &'static str,
        /// Message shown to the user
        message: String,
    },

    /// The backend answered with a non-success status
    #[error("Request failed with status {status}: {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// The `message` field of the response body, or the generic fallback
        message: String,
    },

    /// The request never produced a response
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The response body did not have the expected shape
    #[error("Malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Persisted session store failure
    #[error("Session store error: {0}")]
    Store(#[from] sea_orm::DbErr),

    /// I/O error, e.g. reading an image file for upload
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The USD to INR rate cannot be used for conversion
    #[error("Invalid USD to INR rate: {rate}")]
    InvalidRate {
        /// The rejected rate
        rate: f64,
    },

    /// An action needs a logged-in user
    #[error("You need to log in first")]
    NotAuthenticated,

    /// The logged-in user has the wrong role for an area
    #[error("This area is not available for role '{role}'")]
    Forbidden {
        /// Role of the current user
        role: String,
    },
}

impl Error {
    /// Text to show the user for this error.
    ///
    /// API errors show the backend's message verbatim, validation errors show the
    /// form message, everything else uses its display form.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Api { message, .. } | Self::Validation { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    /// HTTP status of an API error, if this is one.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub(crate) fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
