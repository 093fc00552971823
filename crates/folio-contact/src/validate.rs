use std::{str::FromStr, sync::LazyLock};

use folio_shared::contact::{Field, FieldErrors, FormFields};
use regex::Regex;
use validator::{Validate, ValidationError};

static RE_EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@\x{FEFF}]+@[^\s@\x{FEFF}]+\.[^\s@\x{FEFF}]+$").unwrap()
});

/// Minimum trimmed message length, in UTF-16 code units as a browser counts
/// them.
pub const MIN_MESSAGE_LEN: usize = 10;

/// Trims whitespace and the byte order mark, which browsers also strip.
fn trim(value: &str) -> &str {
    value.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
}

fn required(value: &str, message: &'static str) -> Result<(), ValidationError> {
    if trim(value).is_empty() {
        return Err(ValidationError::new("required").with_message(message.into()));
    }

    Ok(())
}

fn validate_first_name(value: &str) -> Result<(), ValidationError> {
    required(value, "First name is required")
}

fn validate_last_name(value: &str) -> Result<(), ValidationError> {
    required(value, "Last name is required")
}

/// The pattern runs against the untrimmed value, so padded addresses fail.
fn validate_email_address(value: &str) -> Result<(), ValidationError> {
    required(value, "Email is required")?;

    if !RE_EMAIL.is_match(value) {
        return Err(ValidationError::new("email")
            .with_message("Please enter a valid email address".into()));
    }

    Ok(())
}

fn validate_subject(value: &str) -> Result<(), ValidationError> {
    required(value, "Subject is required")
}

fn validate_message(value: &str) -> Result<(), ValidationError> {
    required(value, "Message is required")?;

    if trim(value).encode_utf16().count() < MIN_MESSAGE_LEN {
        return Err(ValidationError::new("length")
            .with_message("Message must be at least 10 characters long".into()));
    }

    Ok(())
}

#[derive(Validate)]
pub struct SubmitFormInput {
    #[validate(custom(function = "validate_first_name"))]
    pub first_name: String,
    #[validate(custom(function = "validate_last_name"))]
    pub last_name: String,
    #[validate(custom(function = "validate_email_address"))]
    pub email: String,
    #[validate(custom(function = "validate_subject"))]
    pub subject: String,
    #[validate(custom(function = "validate_message"))]
    pub message: String,
}

impl From<&FormFields> for SubmitFormInput {
    fn from(fields: &FormFields) -> Self {
        Self {
            first_name: fields.first_name.to_owned(),
            last_name: fields.last_name.to_owned(),
            email: fields.email.to_owned(),
            subject: fields.subject.to_owned(),
            message: fields.message.to_owned(),
        }
    }
}

/// Checks every field and collects one message per failing field.
///
/// Pure: the result depends only on `fields`. An empty map means the form
/// can be sent.
pub fn validate(fields: &FormFields) -> FieldErrors {
    let Err(errors) = SubmitFormInput::from(fields).validate() else {
        return FieldErrors::new();
    };

    errors
        .field_errors()
        .into_iter()
        .filter_map(|(name, errs)| {
            let field = Field::from_str(name.as_ref()).ok()?;
            let message = errs.first()?.message.as_ref()?.to_string();

            Some((field, message))
        })
        .collect()
}
