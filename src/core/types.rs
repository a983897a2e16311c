use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::domain_matches_pattern;
use crate::validation::{OutcomeReport, ValidationOutcome};

/// Challenge mechanisms a request can use to prove control of a domain.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ChallengeType {
    #[serde(rename = "http-01")]
    Http,
    #[serde(rename = "dns-01")]
    Dns,
    /// Deprecated by certificate authorities; kept only so stored requests still load.
    #[serde(rename = "tls-sni-01")]
    TlsSni,
    /// Any value this crate does not know about.
    #[serde(other)]
    Unrecognized,
}

impl ChallengeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChallengeType::Http => "http-01",
            ChallengeType::Dns => "dns-01",
            ChallengeType::TlsSni => "tls-sni-01",
            ChallengeType::Unrecognized => "unrecognized",
        }
    }
}

/// A named setting required by a challenge provider (API token, zone id, ...).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChallengeParameter {
    pub name: String,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub is_required: bool,
}

impl ChallengeParameter {
    pub fn is_missing(&self) -> bool {
        self.is_required && self.value.as_deref().is_none_or(str::is_empty)
    }
}

/// One authorization configuration. A blank `domain_match` applies to any
/// domain not matched by another configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChallengeConfig {
    pub challenge_type: ChallengeType,
    #[serde(default)]
    pub domain_match: Option<String>,
    #[serde(default)]
    pub challenge_provider_id: Option<String>,
    #[serde(default)]
    pub parameters: Vec<ChallengeParameter>,
}

impl ChallengeConfig {
    pub fn matches_any_domain(&self) -> bool {
        self.domain_match
            .as_deref()
            .is_none_or(str::is_empty)
    }

    pub fn has_provider(&self) -> bool {
        self.challenge_provider_id
            .as_deref()
            .is_some_and(|id| !id.trim().is_empty())
    }

    /// Individual patterns from `domain_match`, split on `;`, `,` or whitespace.
    pub fn domain_patterns(&self) -> impl Iterator<Item = &str> {
        self.domain_match
            .as_deref()
            .unwrap_or_default()
            .split(|c: char| c == ';' || c == ',' || c.is_whitespace())
            .filter(|pattern| !pattern.is_empty())
    }

    pub fn matches_domain(&self, domain: &str) -> bool {
        self.domain_patterns()
            .any(|pattern| domain_matches_pattern(domain, pattern))
    }
}

/// Per-request issuance settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RequestConfig {
    #[serde(default)]
    pub challenges: Vec<ChallengeConfig>,

    #[serde(default)]
    pub perform_automated_binding: bool,
    #[serde(default)]
    pub binding_ip_address: Option<String>,
    #[serde(default)]
    pub binding_port: Option<u16>,
    #[serde(default)]
    pub binding_use_sni: Option<bool>,

    /// Script hooks are executed elsewhere; the paths pass through untouched.
    #[serde(default)]
    pub pre_request_script: Option<String>,
    #[serde(default)]
    pub post_request_script: Option<String>,

    #[serde(default)]
    pub webhook_trigger: Option<String>,
    #[serde(default)]
    pub webhook_url: Option<String>,
    #[serde(default)]
    pub webhook_method: Option<String>,
    #[serde(default)]
    pub webhook_content_type: Option<String>,
    #[serde(default)]
    pub webhook_content_body: Option<String>,
}

impl RequestConfig {
    pub fn uses_challenge_type(&self, challenge_type: ChallengeType) -> bool {
        self.challenges
            .iter()
            .any(|c| c.challenge_type == challenge_type)
    }

    /// Picks the challenge configuration that applies to `domain`.
    ///
    /// An explicit `domain_match` hit wins over the blank catch-all entry. With
    /// no domain the catch-all (or, failing that, the first entry) is returned.
    pub fn challenge_for(&self, domain: Option<&str>) -> Option<&ChallengeConfig> {
        if let Some(domain) = domain
            && let Some(matched) = self.challenges.iter().find(|c| c.matches_domain(domain))
        {
            return Some(matched);
        }
        self.challenges
            .iter()
            .find(|c| c.matches_any_domain())
            .or_else(|| {
                if domain.is_none() {
                    self.challenges.first()
                } else {
                    None
                }
            })
    }
}

/// A domain offered for inclusion in the certificate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DomainOption {
    pub domain: String,
    #[serde(default)]
    pub is_selected: bool,
    #[serde(default)]
    pub is_primary_domain: bool,
}

impl DomainOption {
    pub fn new(domain: impl Into<String>, is_selected: bool, is_primary_domain: bool) -> Self {
        Self {
            domain: domain.into(),
            is_selected,
            is_primary_domain,
        }
    }
}

/// A managed certificate request as edited by the caller.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CertificateRequest {
    /// Absent until the request has been persisted.
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub domain_options: Vec<DomainOption>,
    #[serde(default)]
    pub request_config: RequestConfig,
    /// Web server site the certificate is bound to, if any.
    #[serde(default)]
    pub server_site_id: Option<String>,
    #[serde(default)]
    pub date_last_renewal_attempt: Option<DateTime<Utc>>,
}

impl CertificateRequest {
    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }

    /// True for persisted requests that have been attempted at least once.
    pub fn has_run(&self) -> bool {
        self.id.is_some() && self.date_last_renewal_attempt.is_some()
    }

    /// The selected primary domain, falling back to the first option marked primary.
    pub fn primary_domain(&self) -> Option<&DomainOption> {
        self.domain_options
            .iter()
            .find(|d| d.is_selected && d.is_primary_domain)
            .or_else(|| self.domain_options.iter().find(|d| d.is_primary_domain))
    }

    pub fn selected_domains(&self) -> impl Iterator<Item = &DomainOption> {
        self.domain_options.iter().filter(|d| d.is_selected)
    }
}

/// A validated request handed back to the caller, with its outcome.
#[derive(Debug, Clone, Serialize)]
pub struct ValidateRequestResponse {
    #[serde(skip)]
    pub outcome: ValidationOutcome,
    pub report: OutcomeReport,
    pub request: CertificateRequest,
}
