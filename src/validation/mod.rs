//! Input validation for plan requests.

mod validate;

pub use validate::validate_inputs;
