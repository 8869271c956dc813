//! Runtime configuration: provider and mail credentials.
//!
//! Built once at startup and handed to the collaborators that need it;
//! nothing here changes afterwards.

#[cfg(feature = "smtp")]
use crate::notify::{SmtpMailer, SmtpSettings};
use crate::notify::{Mailer, NullMailer};

/// Everything needed to build a [crate::Pipeline]'s collaborators.
#[derive(Clone, Debug)]
pub struct Settings {
    pub openweather: openweather::Settings,
    /// Without these, advisories are reported but never mailed.
    #[cfg(feature = "smtp")]
    pub smtp: Option<SmtpSettings>,
}

impl Settings {
    pub fn new(openweather: openweather::Settings) -> Self {
        Settings {
            openweather,
            #[cfg(feature = "smtp")]
            smtp: None,
        }
    }

    #[cfg(feature = "smtp")]
    pub fn with_smtp(mut self, smtp: SmtpSettings) -> Self {
        self.smtp = Some(smtp);
        self
    }

    /// Client for the upstream provider; serves as both geocoder and sampler.
    pub fn client(&self) -> Result<openweather::Client, openweather::Error> {
        openweather::Client::new(self.openweather.clone())
    }

    /// The configured mailer, or one that reports it is unconfigured.
    pub fn mailer(&self) -> Box<dyn Mailer> {
        self.smtp_mailer().unwrap_or_else(|| {
            tracing::debug!("no mail transport configured");
            Box::new(NullMailer {})
        })
    }

    #[cfg(feature = "smtp")]
    fn smtp_mailer(&self) -> Option<Box<dyn Mailer>> {
        let smtp = self.smtp.clone()?;
        Some(Box::new(SmtpMailer::new(smtp)))
    }

    #[cfg(not(feature = "smtp"))]
    fn smtp_mailer(&self) -> Option<Box<dyn Mailer>> {
        None
    }
}
