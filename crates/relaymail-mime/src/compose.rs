//! DATA payload composition.
//!
//! Produces the header and MIME body lines of a [`Message`] together with the
//! envelope addresses. Lines carry no terminators; the transport appends CRLF
//! and applies dot-stuffing.
//!
//! ```text
//! plain        : headers, text/plain part
//! html         : headers, multipart/alternative(text/plain, text/html)
//! attachments  : headers, multipart/mixed(alternative-or-plain, attachment...)
//! ```

use crate::address::ParsedAddress;
use crate::encoding::{TransferEncoding, encode_rfc2047};
use crate::error::{Error, Result};
use crate::message::{Attachment, Message};

/// Boundary of the outer `multipart/mixed` envelope.
pub const MIX_BOUNDARY: &str = "MixBoundary";

/// Boundary of the `multipart/alternative` text body.
pub const ALTERNATIVE_BOUNDARY: &str = "AlternativeBoundary";

const PLAIN_TYPE: &str = "text/plain;charset=utf-8";
const ALTERNATIVE_PLAIN_TYPE: &str = "text/plain;charset=\"utf-8\"";
const ALTERNATIVE_HTML_TYPE: &str = "text/html;charset=\"utf-8\"";

/// A message ready for the MAIL FROM / RCPT TO / DATA sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedMessage {
    /// Envelope sender, angle-bracket wrapped.
    pub sender: String,
    /// Envelope recipient, angle-bracket wrapped.
    pub recipient: String,
    /// Header and body lines, without line terminators.
    pub lines: Vec<String>,
}

/// Renders messages with a fixed transfer encoding for the text parts.
#[derive(Debug, Clone, Copy, Default)]
pub struct Composer {
    encoding: TransferEncoding,
}

impl Composer {
    /// Creates a composer using `encoding` for text parts.
    #[must_use]
    pub const fn new(encoding: TransferEncoding) -> Self {
        Self { encoding }
    }

    /// Returns the transfer encoding applied to text parts.
    #[must_use]
    pub const fn encoding(&self) -> TransferEncoding {
        self.encoding
    }

    /// Composes a message.
    ///
    /// When the message has no date, the current local time is used.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyMessage`] when there is nothing to send, or
    /// [`Error::InvalidHeader`] when a header value contains a line break.
    pub fn compose(&self, message: &Message) -> Result<ComposedMessage> {
        if message.content.is_empty() && message.html.is_none() && !message.has_attachments() {
            return Err(Error::EmptyMessage);
        }

        let from = ParsedAddress::parse(header_value("From", &message.from)?);
        let to = ParsedAddress::parse(header_value("To", &message.to)?);
        let date = match &message.date {
            Some(date) => header_value("Date", date)?.to_string(),
            None => chrono::Local::now().to_rfc2822(),
        };
        let subject = encode_rfc2047(header_value("Subject", &message.subject)?, "utf-8");

        let mut out = Lines::default();
        out.line(format!("Subject: {subject}"));
        out.line(format!("From: {}", from.header));
        out.line(format!("To: {}", to.header));
        out.line(format!("Date: {date}"));
        out.line("MIME-Version: 1.0");

        if message.has_attachments() {
            out.line(format!("Content-Type: multipart/mixed; boundary={MIX_BOUNDARY}"));
            out.blank();
            out.line(format!("--{MIX_BOUNDARY}"));
            self.text_body(&mut out, message);
            for attachment in &message.attachments {
                out.line(format!("--{MIX_BOUNDARY}"));
                attachment_part(&mut out, attachment)?;
            }
            out.line(format!("--{MIX_BOUNDARY}--"));
        } else {
            self.text_body(&mut out, message);
        }

        Ok(ComposedMessage {
            sender: from.envelope,
            recipient: to.envelope,
            lines: out.into_inner(),
        })
    }

    fn text_body(&self, out: &mut Lines, message: &Message) {
        match &message.html {
            Some(html) => {
                out.line(format!(
                    "Content-Type: multipart/alternative; boundary={ALTERNATIVE_BOUNDARY}"
                ));
                out.blank();
                out.line(format!("--{ALTERNATIVE_BOUNDARY}"));
                self.text_part(out, ALTERNATIVE_PLAIN_TYPE, &message.content);
                out.line(format!("--{ALTERNATIVE_BOUNDARY}"));
                self.text_part(out, ALTERNATIVE_HTML_TYPE, html);
                out.line(format!("--{ALTERNATIVE_BOUNDARY}--"));
            }
            None => self.text_part(out, PLAIN_TYPE, &message.content),
        }
    }

    fn text_part(&self, out: &mut Lines, content_type: &str, text: &str) {
        out.line(format!("Content-Type: {content_type}"));
        out.line(format!("Content-Transfer-Encoding: {}", self.encoding));
        out.blank();
        out.text(&self.encoding.encode(text));
        out.blank();
    }
}

fn attachment_part(out: &mut Lines, attachment: &Attachment) -> Result<()> {
    let content_type = header_value("Content-Type", &attachment.content_type)?;
    let file_name = header_value("Content-Type", &attachment.file_name)?;
    let disposition = header_value(
        "Content-Disposition",
        attachment.content_disposition.as_deref().unwrap_or("attachment"),
    )?;

    match &attachment.charset {
        Some(charset) => out.line(format!(
            "Content-Type: {content_type}; charset={}; name=\"{file_name}\"",
            header_value("Content-Type", charset)?
        )),
        None => out.line(format!("Content-Type: {content_type}; name=\"{file_name}\"")),
    }
    out.line(format!("Content-Disposition: {disposition}; filename=\"{file_name}\""));
    out.line(format!(
        "Content-Transfer-Encoding: {}",
        header_value("Content-Transfer-Encoding", &attachment.encoding)?
    ));
    if let Some(id) = &attachment.content_id {
        out.line(format!("Content-ID: <{}>", header_value("Content-ID", id)?));
    }
    if let Some(id) = &attachment.x_attachment_id {
        out.line(format!("X-Attachment-Id: <{}>", header_value("X-Attachment-Id", id)?));
    }
    out.blank();
    out.text(&attachment.data);
    out.blank();
    Ok(())
}

fn header_value<'a>(name: &'static str, value: &'a str) -> Result<&'a str> {
    if value.contains(['\r', '\n']) {
        return Err(Error::InvalidHeader { name });
    }
    Ok(value)
}

#[derive(Debug, Default)]
struct Lines(Vec<String>);

impl Lines {
    fn line(&mut self, line: impl Into<String>) {
        self.0.push(line.into());
    }

    fn blank(&mut self) {
        self.0.push(String::new());
    }

    /// Appends multi-line text, accepting LF or CRLF breaks.
    fn text(&mut self, text: &str) {
        for line in text.split('\n') {
            self.line(line.strip_suffix('\r').unwrap_or(line));
        }
    }

    fn into_inner(self) -> Vec<String> {
        self.0
    }
}
