//! SMTP delivery using lettre

use anyhow::Context;
use async_trait::async_trait;
use folio_shared::contact::FormFields;
use lettre::{
    Address, Message, SmtpTransport, Transport,
    message::{Mailbox, header::ContentType},
    transport::smtp::authentication::Credentials,
};
use serde::Deserialize;

use crate::{Delivery, MailDelivery, TemplateParams};

#[derive(Debug, Deserialize, Clone)]
pub struct SmtpConfig {
    #[serde(default = "default_smtp_host")]
    pub smtp_host: String,
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    #[serde(default)]
    pub smtp_username: String,
    #[serde(default)]
    pub smtp_password: String,
    #[serde(default = "default_from_address")]
    pub from_address: String,
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            smtp_host: default_smtp_host(),
            smtp_port: default_smtp_port(),
            smtp_username: String::new(),
            smtp_password: String::new(),
            from_address: default_from_address(),
        }
    }
}

fn default_smtp_host() -> String {
    "localhost".to_string()
}

fn default_smtp_port() -> u16 {
    587
}

fn default_from_address() -> String {
    "Portfolio contact form <noreply@folio.localhost>".to_string()
}

/// Sends the contact form as a plain-text mail to the recipient.
#[derive(Clone)]
pub struct Smtp {
    mailer: SmtpTransport,
    from: String,
    recipient: String,
}

impl Smtp {
    pub fn new(config: &SmtpConfig, recipient: impl Into<String>) -> anyhow::Result<Self> {
        let authenticated = !config.smtp_username.is_empty() && !config.smtp_password.is_empty();

        let mailer = if authenticated {
            let creds =
                Credentials::new(config.smtp_username.clone(), config.smtp_password.clone());

            SmtpTransport::relay(&config.smtp_host)
                .with_context(|| format!("Invalid SMTP relay host {}", config.smtp_host))?
                .port(config.smtp_port)
                .credentials(creds)
                .build()
        } else {
            SmtpTransport::builder_dangerous(&config.smtp_host)
                .port(config.smtp_port)
                .build()
        };

        tracing::info!(
            smtp_host = %config.smtp_host,
            smtp_port = config.smtp_port,
            authenticated,
            "Contact form mail goes through SMTP"
        );

        Ok(Self {
            mailer,
            from: config.from_address.clone(),
            recipient: recipient.into(),
        })
    }

    pub fn build_message(&self, payload: &FormFields) -> anyhow::Result<Message> {
        let params = TemplateParams::new(payload, &self.recipient);
        let name = params.from_name.trim();
        let reply_to = Mailbox::new(
            (!name.is_empty()).then(|| name.to_owned()),
            params
                .reply_to
                .parse::<Address>()
                .context("Failed to parse reply-to address")?,
        );

        let body = format!(
            "Name: {}\nEmail: {}\nSubject: {}\n\n{}\n",
            params.from_name, params.from_email, params.subject, params.message
        );

        Message::builder()
            .from(self.from.parse().context("Failed to parse from address")?)
            .reply_to(reply_to)
            .to(params.to_email.parse().context("Failed to parse recipient")?)
            .subject(params.subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body)
            .context("Failed to build contact message")
    }

    async fn try_send(&self, payload: &FormFields) -> anyhow::Result<()> {
        let message = self.build_message(payload)?;
        let mailer = self.mailer.clone();

        tokio::task::spawn_blocking(move || mailer.send(&message))
            .await
            .context("SMTP task aborted")?
            .context("SMTP send failed")?;

        Ok(())
    }
}

#[async_trait]
impl MailDelivery for Smtp {
    #[tracing::instrument(skip_all, fields(provider = "smtp", from = %payload.email))]
    async fn send(&self, payload: &FormFields) -> Delivery {
        match self.try_send(payload).await {
            Ok(()) => {
                tracing::info!("Contact message delivered");
                Delivery::sent(&payload.first_name)
            }
            Err(err) => {
                tracing::error!(error = ?err, "SMTP error");
                Delivery::failed()
            }
        }
    }
}
