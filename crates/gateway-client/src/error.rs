//! Failure side of a gateway call outcome.

use thiserror::Error;

/// Fixed caller-facing message for HTTP 429. The response body is never consulted.
pub const RATE_LIMIT_MESSAGE: &str = "Rate limit exceeded. Try again in a moment.";

/// A classified gateway call failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CallError {
    /// The gateway answered 429.
    #[error("Rate limit exceeded. Try again in a moment.")]
    RateLimited,

    /// The gateway answered with any other non-2xx status.
    #[error("Evolution API error ({status}): {message}")]
    Gateway { status: u16, message: String },

    /// The request could not be completed (connect, DNS, TLS, body read).
    #[error("Evolution API request failed: {0}")]
    Transport(String),

    /// A 2xx body that is not valid JSON for the expected shape.
    #[error("Evolution API returned an unreadable response ({status}): {message}")]
    Decode { status: u16, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    RateLimited,
    Gateway,
    Transport,
    Decode,
}

impl ErrorKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::RateLimited => "rate_limited",
            Self::Gateway => "gateway",
            Self::Transport => "transport",
            Self::Decode => "decode",
        }
    }
}

impl CallError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::RateLimited => ErrorKind::RateLimited,
            Self::Gateway { .. } => ErrorKind::Gateway,
            Self::Transport(_) => ErrorKind::Transport,
            Self::Decode { .. } => ErrorKind::Decode,
        }
    }

    /// HTTP status of the failed response, if one was received.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::RateLimited => Some(429),
            Self::Gateway { status, .. } | Self::Decode { status, .. } => Some(*status),
            Self::Transport(_) => None,
        }
    }
}
