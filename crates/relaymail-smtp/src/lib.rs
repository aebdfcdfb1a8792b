//! # relaymail-smtp
//!
//! A small SMTP submission client: one connection, one authenticated session,
//! one message per `send`.
//!
//! ## Features
//!
//! - **Transports**: plain TCP (port 25) and implicit TLS (port 465) via rustls
//! - **Handshake**: greeting, EHLO (capabilities skipped), optional AUTH LOGIN
//! - **Messages**: plain text, `multipart/alternative` with HTML, and
//!   `multipart/mixed` with pre-encoded attachments
//! - **Errors**: every unexpected reply surfaces with its code and text
//!
//! ## Quick Start
//!
//! ```ignore
//! use relaymail_smtp::{ConnectConfig, Message, SmtpClient};
//!
//! #[tokio::main]
//! async fn main() -> relaymail_smtp::Result<()> {
//!     let config = ConnectConfig::builder("smtp.example.com")
//!         .secure(true)
//!         .credentials("user@example.com", "app-password")
//!         .build();
//!
//!     let mut client = SmtpClient::new();
//!     client.connect(&config).await?;
//!
//!     let message = Message::new(
//!         "Build Bot <bot@example.com>",
//!         "team@example.com",
//!         "Build succeeded",
//!         "All green.",
//!     )
//!     .html("<h1>All green.</h1>");
//!
//!     client.send(&message).await?;
//!     client.close().await;
//!     Ok(())
//! }
//! ```
//!
//! ## Session States
//!
//! ```text
//! ┌──────────────┐
//! │ Disconnected │ ─── connect() ───→ Connected ───→ Negotiated ───→ Ready ⟲ send()
//! └──────────────┘                                                   │
//!                                                                    └── close() ───→ Closed
//! ```
//!
//! ## Modules
//!
//! - [`command`]: SMTP command builders
//! - [`connection`]: Streams, configuration and the session driver
//! - [`parser`]: Reply line parser
//! - [`types`]: Reply types

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod command;
pub mod connection;
mod error;
pub mod parser;
pub mod types;

pub use connection::{
    Authentication, ClientOptions, ConnectConfig, Credentials, Security, SessionState, SmtpClient,
    SmtpStream,
};
pub use error::{Error, Result};
pub use relaymail_mime::{Attachment, Message, TransferEncoding};
pub use types::{Reply, ReplyCode};
