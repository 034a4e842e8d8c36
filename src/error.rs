//! Fetch error classification and user-facing messages.
//!
//! A failed request is either a transport failure (no usable response
//! reached us) or a response the backend answered with, which may carry a
//! non-success status or a body that does not decode. `Display` renders the
//! message shown to the user; the structured value is what gets logged.

use thiserror::Error;

/// Errors produced by a catalog fetch.
///
/// `Clone` so that a replayed stream can hand the same failure to every
/// subscriber.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The request never produced a response (connect, timeout, I/O).
    #[error("An error occurred: {message}")]
    Transport { url: String, message: String },

    /// The backend returned a non-success status code.
    #[error("Backend returned code {status}: Http failure response for {url}: {status} {reason}")]
    Status {
        url: String,
        status: u16,
        reason: String,
    },

    /// The backend answered but the body was not the expected JSON.
    #[error("Backend returned code {status}: Http failure during parsing for {url}")]
    Decode {
        url: String,
        status: u16,
        detail: String,
    },
}

impl FetchError {
    pub fn transport(url: impl Into<String>, message: impl Into<String>) -> Self {
        FetchError::Transport {
            url: url.into(),
            message: message.into(),
        }
    }

    pub fn status(url: impl Into<String>, status: u16, reason: impl Into<String>) -> Self {
        FetchError::Status {
            url: url.into(),
            status,
            reason: reason.into(),
        }
    }

    pub fn decode(url: impl Into<String>, status: u16, detail: impl Into<String>) -> Self {
        FetchError::Decode {
            url: url.into(),
            status,
            detail: detail.into(),
        }
    }

    /// URL of the failed request.
    pub fn url(&self) -> &str {
        match self {
            FetchError::Transport { url, .. }
            | FetchError::Status { url, .. }
            | FetchError::Decode { url, .. } => url,
        }
    }

    /// True when no response reached us.
    pub fn is_transport(&self) -> bool {
        matches!(self, FetchError::Transport { .. })
    }

    /// Status code of the response, if there was one.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            FetchError::Transport { .. } => None,
            FetchError::Status { status, .. } | FetchError::Decode { status, .. } => Some(*status),
        }
    }

    /// Message for display in a view's error channel.
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}
