use std::ops::ControlFlow;

use serde::Serialize;
use thiserror::Error;

/// Hard stops: the request cannot be issued as configured.
///
/// The `Display` text is shown to the operator verbatim, so keep it stable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    #[error(
        "A primary domain must be set for this certificate. Select at least one domain to include."
    )]
    NoPrimaryDomain,
    #[error("Only one domain can be marked as the primary domain ({count} are marked).")]
    MultiplePrimaryDomains { count: usize },
    #[error("A name is required for this certificate.")]
    NameRequired,
    #[error(
        "One or more domains specified are internal hostnames ({domain}). Certificates for internal host names are not supported by the Certificate Authority."
    )]
    InternalHostname { domain: String },
    #[error(
        "Wildcard domains ({domain}) cannot use http-01 validation for domain authorization. Use dns-01 instead."
    )]
    WildcardRequiresDns { domain: String },
    #[error("Sorry, the tls-sni-01 challenge type is no longer supported for new certificates.")]
    LegacyChallengeForNewRequest,
    #[error(
        "The tls-sni-01 challenge type is no longer available. You need to switch to either http-01 or dns-01."
    )]
    LegacyChallenge,
    #[error(
        "A challenge configuration has an unrecognized challenge type. Use either http-01 or dns-01."
    )]
    UnrecognizedChallengeType,
    #[error("The dns-01 challenge type requires a DNS Update Method selection.")]
    DnsProviderRequired,
    #[error(
        "Only one authorization configuration can be used to match any domain (domain match blank). Specify domain(s) to match or remove additional configuration."
    )]
    MultipleCatchAllChallenges,
    #[error("Challenge configuration parameter required: {name}")]
    ChallengeParameterRequired { name: String },
    #[error(
        "Certificates cannot include more than {limit} names ({selected} selected). You will need to remove names or split your certificate into 2 or more managed certificates."
    )]
    TooManyNames { limit: usize, selected: usize },
    #[error("The webhook URL must be set to a valid absolute URL.")]
    WebhookUrlInvalid,
    #[error("The webhook method must be set.")]
    WebhookMethodRequired,
    #[error(
        "The http-01 challenge cannot be tested for a server site while the local web server is unavailable."
    )]
    HttpTestUnavailable,
    #[error("At least one challenge configuration is required to test this certificate.")]
    NoChallengeToTest,
}

impl Violation {
    /// Short machine-readable rule name.
    pub fn rule(&self) -> &'static str {
        match self {
            Violation::NoPrimaryDomain => "no_primary_domain",
            Violation::MultiplePrimaryDomains { .. } => "multiple_primary_domains",
            Violation::NameRequired => "name_required",
            Violation::InternalHostname { .. } => "internal_hostname",
            Violation::WildcardRequiresDns { .. } => "wildcard_requires_dns",
            Violation::LegacyChallengeForNewRequest | Violation::LegacyChallenge => {
                "legacy_challenge"
            }
            Violation::UnrecognizedChallengeType => "unrecognized_challenge_type",
            Violation::DnsProviderRequired => "dns_provider_required",
            Violation::MultipleCatchAllChallenges => "multiple_catch_all_challenges",
            Violation::ChallengeParameterRequired { .. } => "challenge_parameter_required",
            Violation::TooManyNames { .. } => "too_many_names",
            Violation::WebhookUrlInvalid => "webhook_url_invalid",
            Violation::WebhookMethodRequired => "webhook_method_required",
            Violation::HttpTestUnavailable => "http_test_unavailable",
            Violation::NoChallengeToTest => "no_challenge_to_test",
        }
    }
}

/// Soft stops: the request may proceed once the operator acknowledges them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfirmationReason {
    #[error(
        "SNI is selected together with the specific IP address {ip}. SNI bindings normally use all unassigned IP addresses (*). Proceed with this binding?"
    )]
    SniWithSpecificIp { ip: String },
}

impl ConfirmationReason {
    pub fn rule(&self) -> &'static str {
        match self {
            ConfirmationReason::SniWithSpecificIp { .. } => "sni_with_specific_ip",
        }
    }
}

/// Result of one validation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    Ready,
    RuleViolation(Violation),
    NeedsConfirmation(ConfirmationReason),
}

impl ValidationOutcome {
    pub fn is_ready(&self) -> bool {
        matches!(self, ValidationOutcome::Ready)
    }

    pub fn message(&self) -> Option<String> {
        match self {
            ValidationOutcome::Ready => None,
            ValidationOutcome::RuleViolation(violation) => Some(violation.to_string()),
            ValidationOutcome::NeedsConfirmation(reason) => Some(reason.to_string()),
        }
    }

    pub fn report(&self) -> OutcomeReport {
        let (status, rule) = match self {
            ValidationOutcome::Ready => (OutcomeStatus::Ready, None),
            ValidationOutcome::RuleViolation(violation) => {
                (OutcomeStatus::RuleViolation, Some(violation.rule()))
            }
            ValidationOutcome::NeedsConfirmation(reason) => {
                (OutcomeStatus::NeedsConfirmation, Some(reason.rule()))
            }
        };
        OutcomeReport {
            status,
            rule: rule.map(str::to_string),
            message: self.message(),
        }
    }
}

impl From<Violation> for ValidationOutcome {
    fn from(violation: Violation) -> Self {
        ValidationOutcome::RuleViolation(violation)
    }
}

impl From<ConfirmationReason> for ValidationOutcome {
    fn from(reason: ConfirmationReason) -> Self {
        ValidationOutcome::NeedsConfirmation(reason)
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeStatus {
    Ready,
    RuleViolation,
    NeedsConfirmation,
}

/// Serializable view of an outcome for callers outside the crate.
#[derive(Debug, Clone, Serialize)]
pub struct OutcomeReport {
    pub status: OutcomeStatus,
    pub rule: Option<String>,
    pub message: Option<String>,
}

/// What a single stage returns: keep going, or stop with a terminal outcome.
pub type StageFlow = ControlFlow<ValidationOutcome>;

pub(crate) fn violation(violation: Violation) -> StageFlow {
    ControlFlow::Break(violation.into())
}
