use async_trait::async_trait;
use folio_shared::contact::FormFields;
use serde::Deserialize;
use strum::{Display, EnumString, VariantArray};

use crate::{Delivery, EmailJs, EmailJsConfig, MailDelivery, Smtp, SmtpConfig};

#[derive(
    EnumString, Display, VariantArray, Deserialize, Default, Clone, Copy, Debug, PartialEq, Eq,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Provider {
    #[default]
    EmailJs,
    Smtp,
}

/// The configured delivery provider.
#[derive(Clone)]
pub enum Mailer {
    EmailJs(EmailJs),
    Smtp(Smtp),
}

impl Mailer {
    pub fn new(
        provider: Provider,
        emailjs: &EmailJsConfig,
        smtp: &SmtpConfig,
        recipient: impl Into<String>,
    ) -> anyhow::Result<Self> {
        Ok(match provider {
            Provider::EmailJs => Self::EmailJs(EmailJs::new(emailjs.clone(), recipient)?),
            Provider::Smtp => Self::Smtp(Smtp::new(smtp, recipient)?),
        })
    }

    pub fn provider(&self) -> Provider {
        match self {
            Self::EmailJs(_) => Provider::EmailJs,
            Self::Smtp(_) => Provider::Smtp,
        }
    }
}

#[async_trait]
impl MailDelivery for Mailer {
    async fn send(&self, payload: &FormFields) -> Delivery {
        match self {
            Self::EmailJs(client) => client.send(payload).await,
            Self::Smtp(client) => client.send(payload).await,
        }
    }
}
