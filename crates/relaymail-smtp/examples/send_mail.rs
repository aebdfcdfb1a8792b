#![allow(clippy::doc_markdown, clippy::uninlined_format_args)]
//! Example: Send one message through an SMTP relay
//!
//! Connection settings come from the environment:
//!
//! | variable      | meaning                               | default     |
//! |---------------|---------------------------------------|-------------|
//! | `SMTP_HOST`   | relay hostname                        | required    |
//! | `SMTP_PORT`   | relay port                            | 25 / 465    |
//! | `SMTP_SECURE` | `1` or `true` for implicit TLS        | plain TCP   |
//! | `MAIL_USER`   | AUTH LOGIN username                   | no auth     |
//! | `MAIL_PASS`   | AUTH LOGIN password                   | no auth     |
//! | `MAIL_FROM`   | sender                                | `MAIL_USER` |
//! | `MAIL_TO`     | recipient                             | required    |
//!
//! ## Running
//!
//! ```bash
//! SMTP_HOST=mail.smtp2go.com SMTP_PORT=2525 MAIL_USER=... MAIL_PASS=... MAIL_TO=... \
//!     RUST_LOG=relaymail_smtp=debug cargo run --package relaymail-smtp --example send_mail
//! ```

use anyhow::{Context, bail};
use chrono::Utc;
use relaymail_smtp::{ClientOptions, ConnectConfig, Message, SmtpClient};
use std::env;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let host = env::var("SMTP_HOST").context("SMTP_HOST is not set")?;
    let to = env::var("MAIL_TO").context("MAIL_TO is not set")?;
    let secure = env::var("SMTP_SECURE").is_ok_and(|v| v == "1" || v.eq_ignore_ascii_case("true"));

    let mut builder = ConnectConfig::builder(host).secure(secure);
    if let Ok(port) = env::var("SMTP_PORT") {
        builder = builder.port(port.parse().context("SMTP_PORT is not a port number")?);
    }

    let user = env::var("MAIL_USER").ok();
    if let (Some(user), Ok(pass)) = (&user, env::var("MAIL_PASS")) {
        builder = builder.credentials(user.clone(), pass);
    }
    let config = builder.build();

    let Some(from) = env::var("MAIL_FROM").ok().or(user) else {
        bail!("MAIL_FROM or MAIL_USER must be set");
    };

    println!("Connecting to {}...", config.address());
    let mut client = SmtpClient::with_options(ClientOptions::new().debug(true));
    client.connect(&config).await?;
    println!("✓ Connected");

    let stamp = Utc::now().timestamp();
    let message = Message::new(
        from,
        to,
        format!("relaymail build succeeded {}", stamp),
        "Build succeeded!",
    )
    .html("<h1>Success</h1><p>Build succeeded!</p>");

    let result = client.send(&message).await;
    client.quit().await?;
    result?;
    println!("✓ Message accepted");

    Ok(())
}
