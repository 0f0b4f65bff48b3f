//! Common utility functions

pub mod masking;
pub mod validation;

pub use masking::mask_email;
pub use validation::{check_password, validate_email, ValidationError, ValidationErrors};
