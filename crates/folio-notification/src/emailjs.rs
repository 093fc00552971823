use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use folio_shared::contact::FormFields;
use serde::{Deserialize, Serialize};

use crate::{Delivery, MailDelivery, TemplateParams};

#[derive(Debug, Deserialize, Clone)]
pub struct EmailJsConfig {
    #[serde(default = "default_service_id")]
    pub service_id: String,
    #[serde(default = "default_template_id")]
    pub template_id: String,
    #[serde(default = "default_public_key")]
    pub public_key: String,
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// No timeout unless set; the request waits for the service to answer.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for EmailJsConfig {
    fn default() -> Self {
        Self {
            service_id: default_service_id(),
            template_id: default_template_id(),
            public_key: default_public_key(),
            api_url: default_api_url(),
            timeout_secs: None,
        }
    }
}

fn default_service_id() -> String {
    "your_service_id".to_string()
}

fn default_template_id() -> String {
    "your_template_id".to_string()
}

fn default_public_key() -> String {
    "your_public_key".to_string()
}

fn default_api_url() -> String {
    "https://api.emailjs.com".to_string()
}

#[derive(Debug, Serialize)]
struct SendRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: TemplateParams,
}

/// Client for the EmailJS REST API.
#[derive(Clone)]
pub struct EmailJs {
    client: reqwest::Client,
    config: EmailJsConfig,
    recipient: String,
}

impl EmailJs {
    pub fn new(config: EmailJsConfig, recipient: impl Into<String>) -> anyhow::Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().context("Failed to build EmailJS HTTP client")?;

        tracing::info!(
            api_url = %config.api_url,
            service_id = %config.service_id,
            template_id = %config.template_id,
            "EmailJS delivery initialized"
        );

        Ok(Self {
            client,
            config,
            recipient: recipient.into(),
        })
    }

    pub fn endpoint(&self) -> String {
        format!(
            "{}/api/v1.0/email/send",
            self.config.api_url.trim_end_matches('/')
        )
    }

    async fn try_send(&self, payload: &FormFields) -> anyhow::Result<()> {
        let body = SendRequest {
            service_id: &self.config.service_id,
            template_id: &self.config.template_id,
            user_id: &self.config.public_key,
            template_params: TemplateParams::new(payload, &self.recipient),
        };

        let res = self
            .client
            .post(self.endpoint())
            .json(&body)
            .send()
            .await
            .context("EmailJS request failed")?;

        let status = res.status();
        if !status.is_success() {
            let text = res.text().await.unwrap_or_default();
            anyhow::bail!("EmailJS rejected the message ({status}): {text}");
        }

        Ok(())
    }
}

#[async_trait]
impl MailDelivery for EmailJs {
    #[tracing::instrument(skip_all, fields(provider = "emailjs", from = %payload.email))]
    async fn send(&self, payload: &FormFields) -> Delivery {
        match self.try_send(payload).await {
            Ok(()) => {
                tracing::info!("Contact message delivered");
                Delivery::sent(&payload.first_name)
            }
            Err(err) => {
                tracing::error!(error = ?err, "EmailJS error");
                Delivery::failed()
            }
        }
    }
}
