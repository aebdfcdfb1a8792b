//! Error types for SMTP operations.

use std::io;

use crate::types::ReplyCode;

/// Result type alias for SMTP operations.
pub type Result<T> = std::result::Result<T, Error>;

/// SMTP error types.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Stream could not be opened or the TLS handshake failed.
    #[error("Connection to {address} failed: {source}")]
    Connection {
        /// `host:port` that was dialed.
        address: String,
        /// Underlying failure.
        #[source]
        source: io::Error,
    },

    /// Reply was absent or malformed.
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// Server replied with a code other than the one the exchange requires.
    #[error("SMTP error {code}: {message} (expected {expected})")]
    UnexpectedReply {
        /// Code the exchange required.
        expected: ReplyCode,
        /// Code the server sent.
        code: ReplyCode,
        /// Reply text.
        message: String,
    },

    /// I/O error on an established session.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Message could not be composed.
    #[error("Invalid message: {0}")]
    Message(#[from] relaymail_mime::Error),

    /// Invalid state for operation.
    #[error("Invalid state for operation: {0}")]
    InvalidState(String),
}

impl Error {
    /// Creates an unexpected-reply error.
    #[must_use]
    pub fn unexpected_reply(expected: ReplyCode, code: ReplyCode, message: impl Into<String>) -> Self {
        Self::UnexpectedReply {
            expected,
            code,
            message: message.into(),
        }
    }

    /// Returns true if the stream could not be established.
    #[must_use]
    pub const fn is_connection(&self) -> bool {
        matches!(self, Self::Connection { .. })
    }

    /// Returns true if a reply was absent, malformed or unexpected.
    #[must_use]
    pub const fn is_protocol(&self) -> bool {
        matches!(self, Self::Protocol(_) | Self::UnexpectedReply { .. })
    }

    /// Returns the server reply code, if the error carries one.
    #[must_use]
    pub const fn reply_code(&self) -> Option<ReplyCode> {
        match self {
            Self::UnexpectedReply { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Returns true if this is a permanent error (5xx).
    #[must_use]
    pub const fn is_permanent(&self) -> bool {
        matches!(self, Self::UnexpectedReply { code, .. } if code.is_permanent())
    }

    /// Returns true if this is a transient error (4xx).
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::UnexpectedReply { code, .. } if code.is_transient())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::redundant_clone, clippy::manual_string_new, clippy::needless_collect, clippy::unreadable_literal, clippy::used_underscore_items, clippy::similar_names)]
mod tests {
    use super::*;

    #[test]
    fn test_unexpected_reply_display() {
        let err = Error::unexpected_reply(ReplyCode::OK, ReplyCode::MAILBOX_UNAVAILABLE, "No such user");
        assert_eq!(err.to_string(), "SMTP error 550: No such user (expected 250)");
        assert!(err.is_protocol());
        assert!(err.is_permanent());
        assert!(!err.is_transient());
        assert_eq!(err.reply_code(), Some(ReplyCode::MAILBOX_UNAVAILABLE));
    }

    #[test]
    fn test_transient_reply() {
        let err = Error::unexpected_reply(ReplyCode::OK, ReplyCode::MAILBOX_BUSY, "Try later");
        assert!(err.is_transient());
        assert!(!err.is_permanent());
    }

    #[test]
    fn test_connection_error() {
        let err = Error::Connection {
            address: "smtp.example.com:465".into(),
            source: io::Error::new(io::ErrorKind::ConnectionRefused, "refused"),
        };
        assert!(err.is_connection());
        assert!(!err.is_protocol());
        assert_eq!(err.reply_code(), None);
    }
}
