//! The report mail and its MIME rendering.

use std::fs;
use std::path::{Path, PathBuf};

use lettre::Message;
use lettre::message::header::{ContentTransferEncoding, ContentType};
use lettre::message::{Attachment, Body, Mailbox, MultiPart, SinglePart};

use crate::config::SmtpSettings;
use crate::error::AppError;

/// A plain-text mail carrying the generated reports as attachments.
#[derive(Debug, Clone)]
pub struct ReportMail {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub body: String,
    pub attachments: Vec<PathBuf>,
}

impl ReportMail {
    pub fn new(settings: &SmtpSettings, attachments: Vec<PathBuf>) -> Self {
        Self {
            from: settings.from.clone(),
            to: settings.recipients.clone(),
            subject: settings.subject.clone(),
            body: settings.message.clone(),
            attachments,
        }
    }

    /// Build the `multipart/mixed` message: the text body first, then one
    /// base64 `application/octet-stream` part per attachment.
    pub fn to_message(&self) -> Result<Message, AppError> {
        let from: Mailbox = self
            .from
            .parse()
            .map_err(|_| AppError::mail(format!("Invalid sender address: {}", self.from)))?;

        let mut builder = Message::builder().from(from).subject(&self.subject).date_now();
        for to in &self.to {
            let mailbox: Mailbox = to
                .parse()
                .map_err(|_| AppError::mail(format!("Invalid recipient address: {to}")))?;
            builder = builder.to(mailbox);
        }

        let mut multipart = MultiPart::mixed().singlepart(SinglePart::plain(self.body.clone()));
        for path in &self.attachments {
            multipart = multipart.singlepart(attachment_part(path)?);
        }

        builder
            .multipart(multipart)
            .map_err(|e| AppError::mail(format!("Failed to build report mail: {e}")))
    }
}

fn attachment_part(path: &Path) -> Result<SinglePart, AppError> {
    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| AppError::mail(format!("Attachment has no file name: {}", path.display())))?;

    let data = fs::read(path)
        .map_err(|e| AppError::io(format!("Failed to read attachment '{}': {e}", path.display())))?;
    let body = Body::new_with_encoding(data, ContentTransferEncoding::Base64)
        .map_err(|_| AppError::mail(format!("Failed to encode attachment '{filename}'")))?;
    let content_type = ContentType::parse("application/octet-stream")
        .map_err(|e| AppError::mail(format!("Invalid attachment content type: {e}")))?;

    Ok(Attachment::new(filename).body(body, content_type))
}
