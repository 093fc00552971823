use anyhow::Result;
use folio_shared::contact::FormFields;

use super::FormArgs;

/// Prints the field errors as JSON. Returns true when the form is valid.
pub fn validate(form: FormArgs) -> Result<bool> {
    let fields = FormFields::from(form);
    let errors = folio_contact::validate(&fields);

    if !errors.is_empty() {
        tracing::info!(invalid = errors.len(), "Contact form has errors");
    }

    println!("{}", serde_json::to_string_pretty(&errors)?);

    Ok(errors.is_empty())
}
