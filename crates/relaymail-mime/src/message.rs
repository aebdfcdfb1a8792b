//! Outgoing message description.

/// A single message to submit.
///
/// `content` is always present; `html` and `attachments` are additive. An
/// HTML part turns the body into `multipart/alternative`, and attachments wrap
/// the body in `multipart/mixed`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Message {
    /// Sender, bare or `"Display Name <addr>"`.
    pub from: String,
    /// Recipient, bare or `"Display Name <addr>"`.
    pub to: String,
    /// Subject line.
    pub subject: String,
    /// `Date:` header value. The current time is used when absent.
    #[cfg_attr(feature = "serde", serde(default))]
    pub date: Option<String>,
    /// Plain text body.
    pub content: String,
    /// HTML alternative body.
    #[cfg_attr(feature = "serde", serde(default))]
    pub html: Option<String>,
    /// Attachments, emitted in order.
    #[cfg_attr(feature = "serde", serde(default))]
    pub attachments: Vec<Attachment>,
}

impl Message {
    /// Creates a plain text message.
    #[must_use]
    pub fn new(
        from: impl Into<String>,
        to: impl Into<String>,
        subject: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            subject: subject.into(),
            date: None,
            content: content.into(),
            html: None,
            attachments: Vec::new(),
        }
    }

    /// Sets the `Date:` header value.
    #[must_use]
    pub fn date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    /// Adds an HTML alternative body.
    #[must_use]
    pub fn html(mut self, html: impl Into<String>) -> Self {
        self.html = Some(html.into());
        self
    }

    /// Appends an attachment.
    #[must_use]
    pub fn attach(mut self, attachment: Attachment) -> Self {
        self.attachments.push(attachment);
        self
    }

    /// Returns true if the message carries attachments.
    #[must_use]
    pub fn has_attachments(&self) -> bool {
        !self.attachments.is_empty()
    }
}

/// A pre-encoded attachment.
///
/// `data` is emitted verbatim; it must already be encoded as `encoding` says.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Attachment {
    /// MIME type (e.g., `application/pdf`).
    pub content_type: String,
    /// Content-Transfer-Encoding of `data` (e.g., `base64`).
    pub encoding: String,
    /// File name used in `name=` and `filename=` parameters.
    pub file_name: String,
    /// Encoded payload.
    pub data: String,
    /// Charset parameter.
    #[cfg_attr(feature = "serde", serde(default))]
    pub charset: Option<String>,
    /// `Content-ID` value, without angle brackets.
    #[cfg_attr(feature = "serde", serde(default))]
    pub content_id: Option<String>,
    /// Disposition type; `attachment` when absent.
    #[cfg_attr(feature = "serde", serde(default))]
    pub content_disposition: Option<String>,
    /// `X-Attachment-Id` value, without angle brackets.
    #[cfg_attr(feature = "serde", serde(default))]
    pub x_attachment_id: Option<String>,
}

impl Attachment {
    /// Creates an attachment with the required fields.
    #[must_use]
    pub fn new(
        content_type: impl Into<String>,
        encoding: impl Into<String>,
        file_name: impl Into<String>,
        data: impl Into<String>,
    ) -> Self {
        Self {
            content_type: content_type.into(),
            encoding: encoding.into(),
            file_name: file_name.into(),
            data: data.into(),
            charset: None,
            content_id: None,
            content_disposition: None,
            x_attachment_id: None,
        }
    }

    /// Creates a base64 attachment from raw bytes.
    #[must_use]
    pub fn from_bytes(
        content_type: impl Into<String>,
        file_name: impl Into<String>,
        bytes: &[u8],
    ) -> Self {
        Self::new(
            content_type,
            "base64",
            file_name,
            crate::encoding::encode_base64_wrapped(bytes),
        )
    }

    /// Sets the charset parameter.
    #[must_use]
    pub fn charset(mut self, charset: impl Into<String>) -> Self {
        self.charset = Some(charset.into());
        self
    }

    /// Sets the `Content-ID` header.
    #[must_use]
    pub fn content_id(mut self, id: impl Into<String>) -> Self {
        self.content_id = Some(id.into());
        self
    }

    /// Sets the disposition type (e.g., `inline`).
    #[must_use]
    pub fn disposition(mut self, disposition: impl Into<String>) -> Self {
        self.content_disposition = Some(disposition.into());
        self
    }

    /// Sets the `X-Attachment-Id` header.
    #[must_use]
    pub fn x_attachment_id(mut self, id: impl Into<String>) -> Self {
        self.x_attachment_id = Some(id.into());
        self
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::redundant_clone, clippy::manual_string_new, clippy::needless_collect, clippy::unreadable_literal, clippy::used_underscore_items, clippy::similar_names)]
mod tests {
    use super::*;

    #[test]
    fn test_message_builder() {
        let message = Message::new("a@example.com", "b@example.com", "Hi", "Body")
            .html("<p>Body</p>")
            .date("Mon, 1 Jan 2024 00:00:00 +0000");
        assert_eq!(message.html.as_deref(), Some("<p>Body</p>"));
        assert_eq!(message.date.as_deref(), Some("Mon, 1 Jan 2024 00:00:00 +0000"));
        assert!(!message.has_attachments());
    }

    #[test]
    fn test_attachments_keep_order() {
        let message = Message::new("a@example.com", "b@example.com", "Hi", "Body")
            .attach(Attachment::new("text/plain", "base64", "one.txt", "b25l"))
            .attach(Attachment::new("text/plain", "base64", "two.txt", "dHdv"));
        let names: Vec<&str> = message
            .attachments
            .iter()
            .map(|a| a.file_name.as_str())
            .collect();
        assert_eq!(names, vec!["one.txt", "two.txt"]);
    }

    #[test]
    fn test_attachment_from_bytes() {
        let attachment = Attachment::from_bytes("image/png", "dot.png", b"Hello, World!");
        assert_eq!(attachment.encoding, "base64");
        assert_eq!(attachment.data, "SGVsbG8sIFdvcmxkIQ==");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_camel_case() {
        let json = r#"{
            "from": "Sender <a@example.com>",
            "to": "b@example.com",
            "subject": "Report",
            "content": "See attached",
            "attachments": [{
                "contentType": "application/pdf",
                "encoding": "base64",
                "fileName": "report.pdf",
                "data": "JVBERi0=",
                "xAttachmentId": "f_1"
            }]
        }"#;
        let message: Message = serde_json::from_str(json).unwrap();
        assert_eq!(message.attachments.len(), 1);
        assert_eq!(message.attachments[0].x_attachment_id.as_deref(), Some("f_1"));
        assert!(message.html.is_none());
    }
}
