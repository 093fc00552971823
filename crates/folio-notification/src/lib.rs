//! Mail delivery for contact form submissions.
//!
//! Every provider maps a [`FormFields`](folio_shared::contact::FormFields)
//! payload onto the same template parameters and normalizes its outcome into
//! a [`Delivery`]. Failures never escape as errors; they are logged and
//! turned into a user-facing message.

mod delivery;
mod emailjs;
mod mailer;
mod smtp;

pub use delivery::*;
pub use emailjs::*;
pub use mailer::*;
pub use smtp::*;
