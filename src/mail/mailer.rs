//! Mailer trait and SMTP implementation.

use lettre::transport::smtp::authentication::Credentials;
use lettre::{SmtpTransport, Transport};

use super::ReportMail;
use crate::config::SmtpSettings;
use crate::error::AppError;

/// Delivers a report mail.
pub trait Mailer {
    fn send(&self, mail: &ReportMail) -> Result<(), AppError>;
}

/// Blocking SMTP delivery using lettre.
///
/// Each `send` opens one session: connect, optional STARTTLS, login, send,
/// quit. There is no retry.
pub struct SmtpMailer {
    transport: SmtpTransport,
    server: String,
}

impl SmtpMailer {
    /// Create a mailer from resolved settings. No connection is made here.
    pub fn from_settings(settings: &SmtpSettings) -> Result<Self, AppError> {
        let builder = if settings.use_tls {
            SmtpTransport::starttls_relay(&settings.server)
                .map_err(|e| AppError::mail(format!("Invalid SMTP server '{}': {e}", settings.server)))?
        } else {
            SmtpTransport::builder_dangerous(&settings.server)
        };

        let transport = builder
            .port(settings.port)
            .credentials(Credentials::new(settings.username.clone(), settings.password.clone()))
            .build();

        Ok(Self {
            transport,
            server: format!("{}:{}", settings.server, settings.port),
        })
    }
}

impl Mailer for SmtpMailer {
    fn send(&self, mail: &ReportMail) -> Result<(), AppError> {
        let message = mail.to_message()?;

        tracing::info!(
            server = %self.server,
            recipients = mail.to.len(),
            attachments = mail.attachments.len(),
            "sending report mail"
        );

        self.transport
            .send(&message)
            .map_err(|e| AppError::mail(format!("Failed to send report mail via {}: {e}", self.server)))?;

        Ok(())
    }
}
