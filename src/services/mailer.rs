//! Mail dispatch over a plain SMTP relay

use lettre::message::header::ContentType;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::info;

use crate::types::{ReportError, Result, SmtpSettings};

/// Sink for finished reports
#[allow(async_fn_in_trait)]
pub trait MailSender {
    async fn send(&self, subject: &str, body: &str) -> Result<()>;
}

/// Sends each report as one plain-text email through an open relay
pub struct SmtpMailer {
    settings: SmtpSettings,
}

impl SmtpMailer {
    pub fn new(settings: SmtpSettings) -> Self {
        Self { settings }
    }

    /// Build a single-part text/plain message for every configured recipient
    pub fn build_message(&self, subject: &str, body: &str) -> Result<Message> {
        let builder = self
            .settings
            .recipients
            .iter()
            .fold(Message::builder().from(self.settings.sender.clone()), |b, to| {
                b.to(to.clone())
            });

        builder
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())
            .map_err(|e| ReportError::Mail(format!("Failed to build email message: {}", e)))
    }
}

impl MailSender for SmtpMailer {
    async fn send(&self, subject: &str, body: &str) -> Result<()> {
        let message = self.build_message(subject, body)?;

        // No TLS, no auth. The transport is dropped at the end of this call,
        // which closes the connection whether or not the send succeeded.
        let transport: AsyncSmtpTransport<Tokio1Executor> =
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&self.settings.host)
                .port(self.settings.port)
                .build();

        transport.send(message).await.map_err(|e| {
            ReportError::Mail(format!(
                "Failed to send email via SMTP ({}:{}): {}",
                self.settings.host, self.settings.port, e
            ))
        })?;

        info!("Email sent via SMTP.");
        Ok(())
    }
}

/// Prints reports to stdout instead of mailing them (`--dry-run`)
#[derive(Debug, Default)]
pub struct StdoutMailer;

impl MailSender for StdoutMailer {
    async fn send(&self, subject: &str, body: &str) -> Result<()> {
        println!("Subject: {}", subject);
        println!();
        println!("{}", body);
        println!();
        Ok(())
    }
}
