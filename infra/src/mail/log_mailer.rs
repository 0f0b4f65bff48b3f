//! Mailer that writes messages to the log instead of sending them.
//!
//! Used for local development and as the default until an SMTP or API
//! provider is wired in.

use async_trait::async_trait;

use ba_core::errors::DomainError;
use ba_core::services::registration::{MailMessage, Mailer};
use ba_shared::utils::masking::mask_email;

/// Local dev mailer that logs the message instead of delivering it
#[derive(Clone, Debug, Default)]
pub struct LogMailer {
    /// Include the body in the log line; off outside development since the
    /// body carries a live verification link
    log_body: bool,
}

impl LogMailer {
    pub fn new(log_body: bool) -> Self {
        Self { log_body }
    }
}

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, message: &MailMessage) -> Result<(), DomainError> {
        if self.log_body {
            tracing::info!(
                from = %message.from,
                to = %message.to,
                subject = %message.subject,
                body = %message.body,
                event = "mail_logged",
                "mail send stub"
            );
        } else {
            tracing::info!(
                from = %message.from,
                to = %mask_email(&message.to),
                subject = %message.subject,
                event = "mail_logged",
                "mail send stub"
            );
        }
        Ok(())
    }
}
