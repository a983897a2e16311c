pub mod binding;
pub mod challenges;
pub mod domains;
pub mod outcome;
pub mod pipeline;
pub mod preflight;
pub mod webhook;

pub use outcome::{ConfirmationReason, OutcomeReport, OutcomeStatus, ValidationOutcome, Violation};
pub use pipeline::{RequestValidator, validate_request};
pub use preflight::{TestEnvironment, preflight_test};
