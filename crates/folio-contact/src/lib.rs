//! Contact form controller: field state, validation and the submission
//! state machine.

mod controller;
mod validate;

pub use controller::*;
pub use validate::*;
