//! Error types for message composition.

/// Result type alias for composition operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Message composition error types.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Unknown content transfer encoding name.
    #[error("{0:?} is not a valid content encoding")]
    InvalidEncoding(String),

    /// Header value that cannot be emitted on a single line.
    #[error("Invalid {name} header: value contains a line break")]
    InvalidHeader {
        /// Header name (e.g., `Subject`).
        name: &'static str,
    },

    /// Message has no plain content, no HTML and no attachments.
    #[error("Message has no content, HTML part or attachments")]
    EmptyMessage,
}
