use tokio::task::spawn_blocking;

use crate::config::ValidationSettings;
use crate::core::types::{CertificateRequest, ValidateRequestResponse};
use crate::validation::{TestEnvironment, preflight_test, validate_request};

/// Validates and normalizes a request off the caller's thread.
///
/// The normalized request comes back alongside the outcome whether or not it
/// passed, so the caller keeps any fields that were already corrected.
pub async fn validate_certificate_request(
    mut request: CertificateRequest,
    settings: ValidationSettings,
    confirmed: bool,
) -> Result<ValidateRequestResponse, String> {
    spawn_blocking(move || {
        let outcome = validate_request(&mut request, &settings, confirmed);
        ValidateRequestResponse {
            report: outcome.report(),
            outcome,
            request,
        }
    })
    .await
    .map_err(|err| format!("Validate request join error: {err}"))
}

/// Same as [`validate_certificate_request`], followed by the challenge-test checks.
pub async fn preflight_certificate_test(
    mut request: CertificateRequest,
    settings: ValidationSettings,
    confirmed: bool,
    env: TestEnvironment,
) -> Result<ValidateRequestResponse, String> {
    spawn_blocking(move || {
        let outcome = preflight_test(&mut request, &settings, confirmed, env);
        ValidateRequestResponse {
            report: outcome.report(),
            outcome,
            request,
        }
    })
    .await
    .map_err(|err| format!("Test preflight join error: {err}"))
}
