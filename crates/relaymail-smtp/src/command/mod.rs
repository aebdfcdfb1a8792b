//! SMTP command builder.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// SMTP command issued by the client.
#[derive(Clone, PartialEq, Eq)]
pub enum Command {
    /// EHLO - Extended greeting
    Ehlo {
        /// Name the client announces
        hostname: String,
    },
    /// AUTH LOGIN - Begin LOGIN authentication
    AuthLogin,
    /// Base64 answer to an AUTH LOGIN challenge
    AuthResponse(String),
    /// MAIL FROM - Start mail transaction
    MailFrom {
        /// Angle-bracket wrapped sender
        from: String,
    },
    /// RCPT TO - Add recipient
    RcptTo {
        /// Angle-bracket wrapped recipient
        to: String,
    },
    /// DATA - Begin message data
    Data,
    /// QUIT - Close connection
    Quit,
}

impl Command {
    /// Builds the answer to an AUTH LOGIN challenge from a plain secret.
    #[must_use]
    pub fn auth_response(secret: &str) -> Self {
        Self::AuthResponse(STANDARD.encode(secret.as_bytes()))
    }

    /// Serializes the command line, without the CRLF terminator.
    #[must_use]
    pub fn to_line(&self) -> String {
        match self {
            Self::Ehlo { hostname } => format!("EHLO {hostname}"),
            Self::AuthLogin => "AUTH LOGIN".to_string(),
            Self::AuthResponse(encoded) => encoded.clone(),
            Self::MailFrom { from } => format!("MAIL FROM:{from}"),
            Self::RcptTo { to } => format!("RCPT TO:{to}"),
            Self::Data => "DATA".to_string(),
            Self::Quit => "QUIT".to_string(),
        }
    }
}

// Credentials never reach the logs.
impl std::fmt::Debug for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthResponse(_) => f.write_str("<auth response>"),
            other => f.write_str(&other.to_line()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::redundant_clone, clippy::manual_string_new, clippy::needless_collect, clippy::unreadable_literal, clippy::used_underscore_items, clippy::similar_names)]
mod tests {
    use super::*;

    #[test]
    fn test_ehlo_command() {
        let cmd = Command::Ehlo {
            hostname: "smtp.example.com".to_string(),
        };
        assert_eq!(cmd.to_line(), "EHLO smtp.example.com");
    }

    #[test]
    fn test_auth_login() {
        assert_eq!(Command::AuthLogin.to_line(), "AUTH LOGIN");
    }

    #[test]
    fn test_auth_response_is_base64() {
        let cmd = Command::auth_response("user@example.com");
        assert_eq!(cmd.to_line(), "dXNlckBleGFtcGxlLmNvbQ==");
    }

    #[test]
    fn test_auth_response_redacted_in_debug() {
        let cmd = Command::auth_response("hunter2");
        assert_eq!(format!("{cmd:?}"), "<auth response>");
        assert_eq!(format!("{:?}", Command::Data), "DATA");
    }

    #[test]
    fn test_mail_from_command() {
        let cmd = Command::MailFrom {
            from: "<sender@example.com>".to_string(),
        };
        assert_eq!(cmd.to_line(), "MAIL FROM:<sender@example.com>");
    }

    #[test]
    fn test_rcpt_to_command() {
        let cmd = Command::RcptTo {
            to: "<recipient@example.com>".to_string(),
        };
        assert_eq!(cmd.to_line(), "RCPT TO:<recipient@example.com>");
    }

    #[test]
    fn test_data_and_quit() {
        assert_eq!(Command::Data.to_line(), "DATA");
        assert_eq!(Command::Quit.to_line(), "QUIT");
    }
}
