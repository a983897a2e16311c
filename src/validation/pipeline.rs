use std::ops::ControlFlow;

use log::{debug, info};

use crate::config::ValidationSettings;
use crate::core::types::CertificateRequest;
use crate::validation::{
    binding::normalize_binding, challenges::validate_challenges, domains::resolve_primary_domain,
    outcome::{StageFlow, ValidationOutcome},
    webhook::validate_webhook,
};

/// Inputs shared by every stage of one pass.
#[derive(Debug, Clone, Copy)]
struct PassContext<'a> {
    settings: &'a ValidationSettings,
    confirmed: bool,
}

type StageFn = fn(&mut CertificateRequest, &PassContext<'_>) -> StageFlow;

const STAGES: [(&str, StageFn); 4] = [
    ("domains", domains_stage),
    ("challenges", challenges_stage),
    ("binding", binding_stage),
    ("webhook", webhook_stage),
];

fn domains_stage(request: &mut CertificateRequest, _ctx: &PassContext<'_>) -> StageFlow {
    resolve_primary_domain(request)
}

fn challenges_stage(request: &mut CertificateRequest, ctx: &PassContext<'_>) -> StageFlow {
    validate_challenges(request, ctx.settings)
}

fn binding_stage(request: &mut CertificateRequest, ctx: &PassContext<'_>) -> StageFlow {
    normalize_binding(&mut request.request_config, ctx.confirmed)
}

fn webhook_stage(request: &mut CertificateRequest, _ctx: &PassContext<'_>) -> StageFlow {
    validate_webhook(&mut request.request_config)
}

/// Runs the validation stages in order against one request.
///
/// Each stage may normalize fields in place; the first stage that stops ends
/// the pass. Normalizations made before a stop are kept so the caller only
/// has to fix what was reported. `confirmed` acknowledges a previous
/// `NeedsConfirmation` outcome.
pub fn validate_request(
    request: &mut CertificateRequest,
    settings: &ValidationSettings,
    confirmed: bool,
) -> ValidationOutcome {
    let ctx = PassContext {
        settings,
        confirmed,
    };

    for (name, stage) in STAGES {
        debug!("[validation] running stage {name}");
        if let ControlFlow::Break(outcome) = stage(request, &ctx) {
            info!(
                "[validation] request '{}' stopped at {name}: {}",
                request.name,
                outcome.message().unwrap_or_default()
            );
            return outcome;
        }
    }

    info!("[validation] request '{}' ready for issuance", request.name);
    ValidationOutcome::Ready
}

/// Holds settings so callers can validate repeatedly without threading them through.
#[derive(Debug, Clone, Default)]
pub struct RequestValidator {
    settings: ValidationSettings,
}

impl RequestValidator {
    pub fn new(settings: ValidationSettings) -> Self {
        Self { settings }
    }

    pub fn from_env() -> Self {
        Self::new(ValidationSettings::from_env())
    }

    pub fn settings(&self) -> &ValidationSettings {
        &self.settings
    }

    pub fn validate(&self, request: &mut CertificateRequest) -> ValidationOutcome {
        validate_request(request, &self.settings, false)
    }

    /// Validates with the operator's confirmation already granted.
    pub fn validate_confirmed(&self, request: &mut CertificateRequest) -> ValidationOutcome {
        validate_request(request, &self.settings, true)
    }
}
