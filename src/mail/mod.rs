//! Mail delivery of the generated reports.
//!
//! A thin layer over [lettre](https://lettre.rs): [`ReportMail`] holds the
//! message contents, [`SmtpMailer`] delivers it over blocking SMTP. The
//! [`Mailer`] trait lets the pipeline be exercised without a server.

mod mailer;
mod message;

pub use mailer::{Mailer, SmtpMailer};
pub use message::ReportMail;
