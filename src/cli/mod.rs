mod form;
mod submit;
mod validate;

pub use form::FormArgs;
pub use submit::submit;
pub use validate::validate;
