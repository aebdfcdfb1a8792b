//! # relaymail-mime
//!
//! Message model and DATA payload composer for single-message SMTP
//! submission.
//!
//! ## Features
//!
//! - **Message model**: sender, recipient, subject, plain body, optional HTML
//!   alternative and pre-encoded attachments
//! - **Composition**: RFC 5322 headers followed by a `text/plain`,
//!   `multipart/alternative` or `multipart/mixed` body
//! - **Encodings**: Base64, Quoted-Printable, RFC 2047 subjects
//! - **Addresses**: envelope/header split of `"Display Name <addr>"` strings
//!
//! ## Quick Start
//!
//! ```
//! use relaymail_mime::{Attachment, Composer, Message};
//!
//! let message = Message::new("Sender <from@example.com>", "to@example.com", "Report", "See attached")
//!     .html("<p>See attached</p>")
//!     .attach(Attachment::from_bytes("text/plain", "notes.txt", b"hello"));
//!
//! let composed = Composer::default().compose(&message)?;
//! assert_eq!(composed.sender, "<from@example.com>");
//! assert_eq!(composed.lines.last().map(String::as_str), Some("--MixBoundary--"));
//! # Ok::<(), relaymail_mime::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod address;
mod compose;
mod error;
mod message;

pub mod encoding;

pub use address::ParsedAddress;
pub use compose::{ALTERNATIVE_BOUNDARY, ComposedMessage, Composer, MIX_BOUNDARY};
pub use encoding::TransferEncoding;
pub use error::{Error, Result};
pub use message::{Attachment, Message};
