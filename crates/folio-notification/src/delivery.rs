use async_trait::async_trait;
use folio_shared::contact::FormFields;
use serde::Serialize;

pub const FAILURE_MESSAGE: &str =
    "Sorry, there was an error sending your message. Please try again or contact me directly.";

/// Normalized outcome of a send attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Delivery {
    pub success: bool,
    pub message: String,
}

impl Delivery {
    /// Personalized thank-you for `first_name`.
    pub fn sent(first_name: &str) -> Self {
        Self {
            success: true,
            message: format!(
                "Thank you {first_name}! Your message has been sent successfully. I'll get back to you within 24 hours."
            ),
        }
    }

    pub fn failed() -> Self {
        Self {
            success: false,
            message: FAILURE_MESSAGE.to_owned(),
        }
    }
}

/// Template variables shared by every provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateParams {
    pub from_name: String,
    pub from_email: String,
    pub subject: String,
    pub message: String,
    pub to_email: String,
    pub reply_to: String,
}

impl TemplateParams {
    pub fn new(payload: &FormFields, recipient: impl Into<String>) -> Self {
        Self {
            from_name: payload.full_name(),
            from_email: payload.email.to_owned(),
            subject: payload.subject.to_owned(),
            message: payload.message.to_owned(),
            to_email: recipient.into(),
            reply_to: payload.email.to_owned(),
        }
    }
}

#[async_trait]
pub trait MailDelivery: Send + Sync {
    /// Sends one submission. Implementations must not panic or return
    /// transport errors; every failure becomes [`Delivery::failed`].
    async fn send(&self, payload: &FormFields) -> Delivery;
}
