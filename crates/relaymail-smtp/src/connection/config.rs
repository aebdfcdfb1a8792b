//! Connection and session configuration types.

use relaymail_mime::TransferEncoding;

/// Connection security mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Security {
    /// Plain TCP (port 25).
    #[default]
    None,
    /// TLS from the start (port 465).
    Implicit,
}

impl Security {
    /// Returns the default port for this security mode.
    #[must_use]
    pub const fn default_port(self) -> u16 {
        match self {
            Self::None => 25,
            Self::Implicit => 465,
        }
    }

    /// Maps a `secure` flag to a security mode.
    #[must_use]
    pub const fn from_secure(secure: bool) -> Self {
        if secure { Self::Implicit } else { Self::None }
    }
}

/// AUTH LOGIN credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Login name.
    pub username: String,
    /// Password.
    pub password: String,
}

impl Credentials {
    /// Creates credentials.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// How the session authenticates after EHLO.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Authentication {
    /// Skip authentication.
    #[default]
    None,
    /// AUTH LOGIN with the given credentials.
    Login(Credentials),
}

/// SMTP connection configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectConfig {
    /// Server hostname.
    pub host: String,
    /// Server port; the security mode's default when `None`.
    pub port: Option<u16>,
    /// Security mode.
    pub security: Security,
    /// Authentication performed after EHLO.
    pub auth: Authentication,
}

impl ConnectConfig {
    /// Creates a plaintext configuration without authentication.
    #[must_use]
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: None,
            security: Security::None,
            auth: Authentication::None,
        }
    }

    /// Creates a configuration builder.
    #[must_use]
    pub fn builder(host: impl Into<String>) -> ConnectConfigBuilder {
        ConnectConfigBuilder::new(host)
    }

    /// Returns the port to dial.
    #[must_use]
    pub fn port(&self) -> u16 {
        self.port.unwrap_or_else(|| self.security.default_port())
    }

    /// Returns true if the connection uses implicit TLS.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.security == Security::Implicit
    }

    /// Returns the `host:port` address to dial.
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port())
    }
}

/// Builder for connection configuration.
#[derive(Debug, Clone)]
pub struct ConnectConfigBuilder {
    host: String,
    port: Option<u16>,
    security: Security,
    auth: Authentication,
}

impl ConnectConfigBuilder {
    /// Creates a new builder with the given hostname.
    #[must_use]
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: None,
            security: Security::None,
            auth: Authentication::None,
        }
    }

    /// Sets the port.
    #[must_use]
    pub const fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Sets the security mode.
    #[must_use]
    pub const fn security(mut self, security: Security) -> Self {
        self.security = security;
        self
    }

    /// Selects implicit TLS when `secure` is true.
    #[must_use]
    pub const fn secure(mut self, secure: bool) -> Self {
        self.security = Security::from_secure(secure);
        self
    }

    /// Authenticates with AUTH LOGIN.
    #[must_use]
    pub fn credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.auth = Authentication::Login(Credentials::new(username, password));
        self
    }

    /// Builds the configuration.
    #[must_use]
    pub fn build(self) -> ConnectConfig {
        ConnectConfig {
            host: self.host,
            port: self.port,
            security: self.security,
            auth: self.auth,
        }
    }
}

/// Client behavior that is independent of the server being dialed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientOptions {
    /// Transfer encoding of text parts.
    pub content_encoding: TransferEncoding,
    /// Name announced in EHLO; the server host when `None`.
    pub ehlo_name: Option<String>,
    /// Log written commands at `info` instead of `debug`.
    pub debug: bool,
}

impl ClientOptions {
    /// Creates default options (quoted-printable text, EHLO with the server host).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the transfer encoding of text parts.
    #[must_use]
    pub const fn content_encoding(mut self, encoding: TransferEncoding) -> Self {
        self.content_encoding = encoding;
        self
    }

    /// Sets the name announced in EHLO.
    #[must_use]
    pub fn ehlo_name(mut self, name: impl Into<String>) -> Self {
        self.ehlo_name = Some(name.into());
        self
    }

    /// Enables logging of every written command at `info` level.
    #[must_use]
    pub const fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::redundant_clone,
    clippy::manual_string_new,
    clippy::needless_collect,
    clippy::unreadable_literal,
    clippy::used_underscore_items,
    clippy::similar_names
)]
mod tests {
    use super::*;

    #[test]
    fn test_default_ports() {
        assert_eq!(Security::None.default_port(), 25);
        assert_eq!(Security::Implicit.default_port(), 465);
    }

    #[test]
    fn test_config_new() {
        let config = ConnectConfig::new("smtp.example.com");
        assert_eq!(config.port(), 25);
        assert!(!config.is_secure());
        assert_eq!(config.auth, Authentication::None);
        assert_eq!(config.address(), "smtp.example.com:25");
    }

    #[test]
    fn test_secure_default_port() {
        let config = ConnectConfig::builder("smtp.example.com").secure(true).build();
        assert_eq!(config.port(), 465);
        assert!(config.is_secure());
    }

    #[test]
    fn test_explicit_port_wins() {
        let config = ConnectConfig::builder("mail.smtp2go.com")
            .port(2525)
            .credentials("user", "pass")
            .build();
        assert_eq!(config.port(), 2525);
        assert_eq!(
            config.auth,
            Authentication::Login(Credentials::new("user", "pass"))
        );
    }

    #[test]
    fn test_credentials_debug_hides_password() {
        let debug = format!("{:?}", Credentials::new("user", "hunter2"));
        assert!(debug.contains("user"));
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn test_client_options() {
        let options = ClientOptions::new()
            .content_encoding(TransferEncoding::Base64)
            .ehlo_name("client.example.com")
            .debug(true);
        assert_eq!(options.content_encoding, TransferEncoding::Base64);
        assert_eq!(options.ehlo_name.as_deref(), Some("client.example.com"));
        assert!(options.debug);
        assert_eq!(ClientOptions::default().content_encoding, TransferEncoding::QuotedPrintable);
    }
}
