use anyhow::Result;
use folio_contact::ContactForm;
use folio_notification::Mailer;
use folio_shared::contact::{Field, FormFields, Status};
use strum::VariantArray;

use super::FormArgs;
use crate::config::Config;

/// Runs one submission through the form controller and prints the final
/// snapshot as JSON. Returns true when the message was delivered.
#[tracing::instrument(skip_all, fields(provider = %config.contact.provider))]
pub async fn submit(config: Config, form: FormArgs) -> Result<bool> {
    let mailer = Mailer::new(
        config.contact.provider,
        &config.emailjs,
        &config.smtp,
        &config.contact.recipient,
    )?;

    let contact = ContactForm::new(mailer).reset_after(config.contact.reset_after());

    let fields = FormFields::from(form);
    for field in Field::VARIANTS {
        contact.change(*field, fields.get(*field)).await;
    }

    let status = contact.submit().await?;
    tracing::info!(status = %status.status, message = %status.message, "Submission settled");

    let snapshot = contact.snapshot().await;
    println!("{}", serde_json::to_string_pretty(&snapshot)?);

    Ok(status.status == Status::Success)
}
