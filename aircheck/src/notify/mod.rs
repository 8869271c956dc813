//! Sending advisories to a recipient.
//!
//! A failed send never fails the query; the pipeline notes it in the report.

#[cfg(feature = "smtp")]
mod smtp;
#[cfg(feature = "smtp")]
pub use smtp::{SmtpMailer, SmtpSettings};

/// Subject line of every advisory.
pub const SUBJECT: &str = "Air Quality Alert";

/// An advisory to be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationRequest {
    pub recipient: String,
    pub body: String,
}

/// Acknowledgement of a sent advisory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sent {
    pub recipient: String,
}

/// An error in sending an advisory.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NotificationError {
    #[error("no recipient given")]
    EmptyRecipient,
    #[error("email transport is not configured")]
    Unconfigured,
    #[error("invalid address {address:?}: {reason}")]
    InvalidAddress { address: String, reason: String },
    #[error("could not compose message: {0}")]
    Compose(String),
    #[error("mail transport failed: {0}")]
    Transport(String),
}

/// A type that can deliver mail.
pub trait Mailer {
    /// Send `request.body` to `request.recipient` under [SUBJECT].
    ///
    /// Any connection opened for the send is closed before returning,
    /// whether or not the send succeeded.
    fn send(&self, request: &NotificationRequest) -> Result<(), NotificationError>;
}

/// The nullary Mailer: delivers nothing, and says so.
pub struct NullMailer {}

impl Mailer for NullMailer {
    fn send(&self, _: &NotificationRequest) -> Result<(), NotificationError> {
        Err(NotificationError::Unconfigured)
    }
}

/// Send an advisory through the given mailer.
pub fn dispatch(
    mailer: &dyn Mailer,
    request: &NotificationRequest,
) -> Result<Sent, NotificationError> {
    if request.recipient.trim().is_empty() {
        return Err(NotificationError::EmptyRecipient);
    }
    mailer.send(request)?;
    tracing::info!("notification sent to {}", request.recipient);
    Ok(Sent {
        recipient: request.recipient.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct CountingMailer {
        sends: Cell<usize>,
    }

    impl Mailer for CountingMailer {
        fn send(&self, _: &NotificationRequest) -> Result<(), NotificationError> {
            self.sends.set(self.sends.get() + 1);
            Ok(())
        }
    }

    fn request(recipient: &str) -> NotificationRequest {
        NotificationRequest {
            recipient: recipient.to_owned(),
            body: "body".to_owned(),
        }
    }

    #[test]
    fn blank_recipient_is_never_sent() {
        let mailer = CountingMailer { sends: Cell::new(0) };
        assert_eq!(
            dispatch(&mailer, &request("  ")),
            Err(NotificationError::EmptyRecipient)
        );
        assert_eq!(mailer.sends.get(), 0);
    }

    #[test]
    fn sends_once() {
        let mailer = CountingMailer { sends: Cell::new(0) };
        assert_eq!(
            dispatch(&mailer, &request("a@b.com")),
            Ok(Sent {
                recipient: "a@b.com".to_owned()
            })
        );
        assert_eq!(mailer.sends.get(), 1);
    }

    #[test]
    fn null_mailer_is_unconfigured() {
        assert_eq!(
            dispatch(&NullMailer {}, &request("a@b.com")),
            Err(NotificationError::Unconfigured)
        );
    }
}
