//! Error types for the meater-cloud crate.

use thiserror::Error;

/// The main error type for this crate.
///
/// Every API call fails with exactly one of these kinds. None of them are
/// retried internally; retry policy belongs to the caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Bad credentials, a missing or rejected token, or a login response
    /// that carried no token.
    #[error("Authentication failed: {message}")]
    Authentication {
        /// Description of the failure.
        message: String,
    },

    /// The requested device was not found or is not connected to the cloud.
    #[error("Unknown device: {message}")]
    UnknownDevice {
        /// Description of the failure.
        message: String,
    },

    /// The service answered with HTTP 500, or could not be reached at all.
    #[error("Service unavailable: {message}")]
    ServiceUnavailable {
        /// Description of the failure.
        message: String,
    },

    /// The service answered with HTTP 429.
    #[error("Rate limited: {message}")]
    RateLimited {
        /// Description of the failure.
        message: String,
    },

    /// Any other non-200 status, an empty success body, or a payload that
    /// does not match the expected shape.
    #[error("Unexpected response: {message}")]
    UnexpectedResponse {
        /// Description of what was unexpected.
        message: String,
    },

    /// An invalid configuration parameter was provided.
    #[error("Invalid parameter: {name} = {value}")]
    InvalidParameter {
        /// The name of the parameter.
        name: String,
        /// The invalid value that was provided.
        value: String,
    },
}

impl Error {
    pub(crate) fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication {
            message: message.into(),
        }
    }

    pub(crate) fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable {
            message: message.into(),
        }
    }

    pub(crate) fn unexpected(message: impl Into<String>) -> Self {
        Self::UnexpectedResponse {
            message: message.into(),
        }
    }

    /// Map a non-200 HTTP status to its error kind.
    ///
    /// `device_scoped` enables the 404 mapping, which only applies to the
    /// device endpoints. Returns `None` for 200.
    pub fn from_status(status: u16, device_scoped: bool) -> Option<Self> {
        let err = match status {
            200 => return None,
            401 => Self::authentication("the API rejected the credentials or token"),
            404 if device_scoped => Self::UnknownDevice {
                message: "the specified device could not be found, it might not be connected to MEATER Cloud"
                    .to_string(),
            },
            429 => Self::RateLimited {
                message: "too many requests have been made to the API".to_string(),
            },
            500 => Self::service_unavailable("the service is currently unavailable"),
            other => Self::unexpected(format!("unexpected HTTP status {other}")),
        };
        Some(err)
    }

    /// Whether a later retry of the same call could reasonably succeed.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::ServiceUnavailable { .. } | Self::RateLimited { .. }
        )
    }
}

/// A specialized Result type for this crate.
pub type Result<T> = std::result::Result<T, Error>;
