//! Outbound mail for recommendation reports.
//!
//! Delivery goes through an HTTP relay endpoint rather than direct SMTP; the
//! relay URL, sender and moderation recipient come from [`ServerConfig`].

use serde::Serialize;
use thiserror::Error;

use crate::models::config::ServerConfig;

/// Subject line for moderation reports.
pub const REPORT_SUBJECT: &str = "Noobhub recommendation report!";

#[derive(Debug, Error)]
pub enum MailError {
    #[error("mail relay request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// Delivery seam for moderation reports.
pub trait ReportMailer {
    async fn send_report(&self, subject: &str, body: &str) -> Result<(), MailError>;
}

#[derive(Serialize)]
struct OutgoingMail<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    body: &'a str,
}

/// Posts reports to the configured mail relay.
pub struct HttpMailer {
    client: reqwest::Client,
    relay_url: String,
    from: String,
    recipient: String,
}

impl HttpMailer {
    pub fn new(config: &ServerConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            relay_url: config.mail_relay_url.clone(),
            from: config.mail_from.clone(),
            recipient: config.report_recipient.clone(),
        }
    }
}

impl ReportMailer for HttpMailer {
    async fn send_report(&self, subject: &str, body: &str) -> Result<(), MailError> {
        let mail = OutgoingMail {
            from: &self.from,
            to: &self.recipient,
            subject,
            body,
        };
        self.client
            .post(&self.relay_url)
            .json(&mail)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}
