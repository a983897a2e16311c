//! Validation and normalization of managed certificate requests.
//!
//! A request is checked in a fixed order (primary domain, challenges, binding,
//! webhook) before it may be handed to an issuance engine. See
//! [`validation::validate_request`].

pub mod config;
pub mod core;
pub mod domain;
pub mod validation;

pub use config::ValidationSettings;
pub use crate::core::commands::{preflight_certificate_test, validate_certificate_request};
pub use crate::core::types::{
    CertificateRequest, ChallengeConfig, ChallengeParameter, ChallengeType, DomainOption,
    RequestConfig, ValidateRequestResponse,
};
pub use validation::{
    ConfirmationReason, OutcomeReport, OutcomeStatus, RequestValidator, TestEnvironment,
    ValidationOutcome, Violation, preflight_test, validate_request,
};
