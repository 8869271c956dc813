//! Mail delivery over SMTP with STARTTLS.

use std::time::Duration;

use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    Message, SmtpTransport, Transport,
};

use super::{Mailer, NotificationError, NotificationRequest, SUBJECT};

/// Settings for the SMTP relay.
#[non_exhaustive]
#[derive(Clone)]
pub struct SmtpSettings {
    /// Relay host. Defaults to Gmail's.
    pub host: String,
    /// Submission port. Defaults to 587.
    pub port: u16,
    /// Address advisories are sent from; also the login name.
    pub sender: String,
    pub password: String,
    pub timeout: Duration,
}

impl SmtpSettings {
    pub const DEFAULT_HOST: &'static str = "smtp.gmail.com";
    pub const DEFAULT_PORT: u16 = 587;

    /// Default relay, authenticating as `sender`.
    pub fn new(sender: impl Into<String>, password: impl Into<String>) -> Self {
        SmtpSettings {
            host: Self::DEFAULT_HOST.to_owned(),
            port: Self::DEFAULT_PORT,
            sender: sender.into(),
            password: password.into(),
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_relay(mut self, host: impl Into<String>, port: u16) -> Self {
        self.host = host.into();
        self.port = port;
        self
    }
}

impl std::fmt::Debug for SmtpSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("sender", &self.sender)
            .field("password", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Mailer that opens an authenticated SMTP session per message.
pub struct SmtpMailer {
    settings: SmtpSettings,
}

impl SmtpMailer {
    pub fn new(settings: SmtpSettings) -> Self {
        SmtpMailer { settings }
    }

    fn compose(&self, request: &NotificationRequest) -> Result<Message, NotificationError> {
        let mailbox = |address: &str| {
            address
                .parse::<Mailbox>()
                .map_err(|e| NotificationError::InvalidAddress {
                    address: address.to_owned(),
                    reason: e.to_string(),
                })
        };
        Message::builder()
            .from(mailbox(&self.settings.sender)?)
            .to(mailbox(&request.recipient)?)
            .subject(SUBJECT)
            .header(ContentType::TEXT_PLAIN)
            .body(request.body.clone())
            .map_err(|e| NotificationError::Compose(e.to_string()))
    }
}

impl Mailer for SmtpMailer {
    fn send(&self, request: &NotificationRequest) -> Result<(), NotificationError> {
        let message = self.compose(request)?;
        let transport = SmtpTransport::starttls_relay(&self.settings.host)
            .map_err(|e| NotificationError::Transport(e.to_string()))?
            .port(self.settings.port)
            .credentials(Credentials::new(
                self.settings.sender.clone(),
                self.settings.password.clone(),
            ))
            .timeout(Some(self.settings.timeout))
            .build();
        tracing::debug!(
            "sending to {} via {}:{}",
            request.recipient,
            self.settings.host,
            self.settings.port
        );
        // The session lives only as long as `transport`, which is dropped on
        // every return path.
        transport
            .send(&message)
            .map(|_| ())
            .map_err(|e| NotificationError::Transport(e.to_string()))
    }
}
