//! SMTP session driver.

use super::config::{Authentication, ClientOptions, ConnectConfig, Credentials, Security};
use super::stream::{self, SmtpStream};
use crate::command::Command;
use crate::error::{Error, Result};
use crate::parser::parse_reply;
use crate::types::{Reply, ReplyCode};
use relaymail_mime::{ComposedMessage, Composer, Message};
use std::borrow::Cow;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, info, trace, warn};

/// Lifecycle of a session.
///
/// ```text
/// Disconnected ─connect─→ Connected ─EHLO─→ Negotiated ─(AUTH LOGIN)─→ Ready ─close─→ Closed
/// ```
///
/// A failed handshake goes straight to `Closed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No stream has been opened.
    Disconnected,
    /// Greeting received.
    Connected,
    /// EHLO exchanged; authentication pending.
    Negotiated,
    /// Messages may be sent.
    Ready,
    /// Stream closed; the session cannot be reused.
    Closed,
}

/// SMTP client owning a single session.
///
/// Every operation takes `&mut self`, so one session never runs two
/// exchanges at once.
#[derive(Debug)]
pub struct SmtpClient<S = SmtpStream> {
    stream: Option<BufReader<S>>,
    state: SessionState,
    authenticated: bool,
    options: ClientOptions,
    composer: Composer,
}

impl SmtpClient {
    /// Creates a client with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(ClientOptions::default())
    }

    /// Creates a client with the given options.
    #[must_use]
    pub fn with_options(options: ClientOptions) -> Self {
        Self::for_stream(options)
    }

    /// Dials the server and runs greeting, EHLO and optional AUTH LOGIN.
    ///
    /// Uses plain TCP or implicit TLS depending on `config.security`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Connection`] if the stream cannot be opened, or a
    /// protocol error if the handshake fails.
    pub async fn connect(&mut self, config: &ConnectConfig) -> Result<()> {
        self.ensure_unused()?;

        let port = config.port();
        debug!(host = %config.host, port, security = ?config.security, "Connecting");
        let stream = match config.security {
            Security::None => stream::connect(&config.host, port).await?,
            Security::Implicit => stream::connect_tls(&config.host, port).await?,
        };

        self.handshake(stream, config).await
    }
}

impl Default for SmtpClient {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> SmtpClient<S> {
    /// Creates a client that will run over a caller-supplied stream.
    ///
    /// See [`SmtpClient::connect_with_stream`].
    #[must_use]
    pub fn for_stream(options: ClientOptions) -> Self {
        Self {
            stream: None,
            state: SessionState::Disconnected,
            authenticated: false,
            composer: Composer::new(options.content_encoding),
            options,
        }
    }

    /// Returns the session state.
    #[must_use]
    pub const fn state(&self) -> SessionState {
        self.state
    }

    /// Returns true if AUTH LOGIN succeeded on this session.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// Returns the client options.
    #[must_use]
    pub const fn options(&self) -> &ClientOptions {
        &self.options
    }

    fn ensure_unused(&self) -> Result<()> {
        match self.state {
            SessionState::Disconnected => Ok(()),
            SessionState::Closed => Err(Error::InvalidState(
                "session is closed and cannot be reused".into(),
            )),
            state => Err(Error::InvalidState(format!(
                "session already connected ({state:?})"
            ))),
        }
    }

    fn log_command(&self, command: &Command) {
        if self.options.debug {
            info!(?command, "C:");
        } else {
            debug!(?command, "C:");
        }
    }
}

impl<S> SmtpClient<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// Runs greeting, EHLO and optional AUTH LOGIN over an already open stream.
    ///
    /// # Errors
    ///
    /// Returns a protocol error if any reply is absent or carries an
    /// unexpected code. The stream is then shut down and the session is
    /// [`SessionState::Closed`].
    pub async fn connect_with_stream(&mut self, stream: S, config: &ConnectConfig) -> Result<()> {
        self.ensure_unused()?;
        self.handshake(stream, config).await
    }

    /// Takes ownership of `stream` and negotiates. Any failure closes the
    /// session, so a half-open stream is never left behind.
    async fn handshake(&mut self, stream: S, config: &ConnectConfig) -> Result<()> {
        self.stream = Some(BufReader::new(stream));

        let result = self.negotiate(config).await;
        if let Err(e) = &result {
            warn!(error = %e, state = ?self.state, "Handshake failed, closing session");
            self.close().await;
        }
        result
    }

    async fn negotiate(&mut self, config: &ConnectConfig) -> Result<()> {
        let greeting = self.expect_reply(ReplyCode::SERVICE_READY).await?;
        self.state = SessionState::Connected;
        debug!(greeting = %greeting.text, "Connected");

        let hostname = self
            .options
            .ehlo_name
            .clone()
            .unwrap_or_else(|| config.host.clone());
        self.send_command(&Command::Ehlo { hostname }).await?;
        loop {
            let Some(reply) = self.read_reply().await? else {
                return Err(Error::Protocol(
                    "invalid reply: connection closed during EHLO".into(),
                ));
            };
            if !reply.is_continuation() {
                break;
            }
            trace!(capability = reply.text.trim_start_matches('-'), "EHLO");
        }
        self.state = SessionState::Negotiated;

        if let Authentication::Login(credentials) = &config.auth {
            self.auth_login(credentials).await?;
            self.authenticated = true;
        }

        self.state = SessionState::Ready;
        Ok(())
    }

    async fn auth_login(&mut self, credentials: &Credentials) -> Result<()> {
        self.send_command(&Command::AuthLogin).await?;
        self.expect_reply(ReplyCode::AUTH_CONTINUE).await?;

        self.send_command(&Command::auth_response(&credentials.username))
            .await?;
        self.expect_reply(ReplyCode::AUTH_CONTINUE).await?;

        self.send_command(&Command::auth_response(&credentials.password))
            .await?;
        self.expect_reply(ReplyCode::AUTH_SUCCESS).await?;

        debug!(username = %credentials.username, "Authenticated");
        Ok(())
    }

    /// Sends one message: MAIL FROM, RCPT TO, DATA, payload, end-of-data.
    ///
    /// The payload is composed before anything is written, so composition
    /// errors leave the wire untouched. A failed send leaves the session open;
    /// callers should close it and reconnect.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidState`] if the session is not ready,
    /// [`Error::Message`] if the message cannot be composed, or a protocol
    /// error if the server rejects any step.
    pub async fn send(&mut self, message: &Message) -> Result<()> {
        if self.state != SessionState::Ready {
            return Err(Error::InvalidState(format!(
                "cannot send in {:?} state",
                self.state
            )));
        }

        let ComposedMessage {
            sender,
            recipient,
            lines,
        } = self.composer.compose(message)?;

        self.send_command(&Command::MailFrom {
            from: sender.clone(),
        })
        .await?;
        self.expect_reply(ReplyCode::OK).await?;

        self.send_command(&Command::RcptTo {
            to: recipient.clone(),
        })
        .await?;
        self.expect_reply(ReplyCode::OK).await?;

        self.send_command(&Command::Data).await?;
        self.expect_reply(ReplyCode::START_DATA).await?;

        for line in &lines {
            self.write_data_line(line).await?;
        }
        self.write_line(".").await?;

        let reply = self.expect_reply(ReplyCode::OK).await?;
        info!(%sender, %recipient, lines = lines.len(), reply = %reply.text, "Message accepted");
        Ok(())
    }

    /// Sends QUIT, expects 221, then closes the stream.
    ///
    /// A no-op when no stream is open.
    ///
    /// # Errors
    ///
    /// Returns an error if the QUIT exchange fails. The stream is closed
    /// either way.
    pub async fn quit(&mut self) -> Result<()> {
        if self.stream.is_none() {
            return Ok(());
        }

        let result = self.quit_exchange().await;
        self.close().await;
        result
    }

    async fn quit_exchange(&mut self) -> Result<()> {
        self.send_command(&Command::Quit).await?;
        self.expect_reply(ReplyCode::CLOSING).await?;
        Ok(())
    }

    /// Closes the stream if one is open.
    ///
    /// Idempotent: does nothing before `connect` or after a previous close.
    pub async fn close(&mut self) {
        let Some(mut reader) = self.stream.take() else {
            return;
        };
        self.state = SessionState::Closed;

        if let Err(e) = reader.get_mut().shutdown().await {
            debug!(?e, "Stream shutdown failed");
        }
    }

    async fn send_command(&mut self, command: &Command) -> Result<()> {
        self.log_command(command);
        self.write_line(&command.to_line()).await
    }

    /// Writes one payload line, doubling a leading `.`.
    async fn write_data_line(&mut self, line: &str) -> Result<()> {
        trace!(line, "DATA");
        let line: Cow<'_, str> = if line.starts_with('.') {
            Cow::Owned(format!(".{line}"))
        } else {
            Cow::Borrowed(line)
        };
        self.write_line(&line).await
    }

    /// Writes `line` followed by CRLF and flushes.
    async fn write_line(&mut self, line: &str) -> Result<()> {
        let reader = self
            .stream
            .as_mut()
            .ok_or_else(|| Error::InvalidState("not connected".into()))?;

        let mut buf = Vec::with_capacity(line.len() + 2);
        buf.extend_from_slice(line.as_bytes());
        buf.extend_from_slice(b"\r\n");

        let stream = reader.get_mut();
        stream.write_all(&buf).await?;
        stream.flush().await?;
        Ok(())
    }

    /// Reads one reply line; `None` at end of input.
    async fn read_reply(&mut self) -> Result<Option<Reply>> {
        let reader = self
            .stream
            .as_mut()
            .ok_or_else(|| Error::InvalidState("not connected".into()))?;

        let mut line = String::new();
        if reader.read_line(&mut line).await? == 0 {
            return Ok(None);
        }

        let reply = parse_reply(line.trim_end_matches(['\r', '\n']))?;
        trace!(code = %reply.code, text = %reply.text, "S:");
        Ok(Some(reply))
    }

    async fn expect_reply(&mut self, expected: ReplyCode) -> Result<Reply> {
        let Some(reply) = self.read_reply().await? else {
            return Err(Error::Protocol("invalid reply: connection closed".into()));
        };

        if reply.code != expected {
            warn!(%expected, code = %reply.code, text = %reply.text, "Unexpected reply");
            return Err(Error::unexpected_reply(expected, reply.code, reply.text));
        }

        Ok(reply)
    }
}
