pub mod validation;

pub use validation::{preflight_certificate_test, validate_certificate_request};
