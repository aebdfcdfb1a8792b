//! SMTP connection management.
//!
//! [`SmtpClient`] owns the stream for the lifetime of one session and drives
//! the greeting, EHLO, AUTH LOGIN and message transactions over it.

mod client;
mod config;
mod stream;

pub use client::{SessionState, SmtpClient};
pub use config::{
    Authentication, ClientOptions, ConnectConfig, ConnectConfigBuilder, Credentials, Security,
};
pub use stream::{SmtpStream, connect, connect_tls};
