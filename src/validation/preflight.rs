use log::info;

use crate::config::ValidationSettings;
use crate::core::types::{CertificateRequest, ChallengeType};
use crate::validation::{
    outcome::{ValidationOutcome, Violation},
    pipeline::validate_request,
};

/// What the host can offer when a challenge test is requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TestEnvironment {
    /// Whether the local web server that answers http-01 challenges is reachable.
    pub web_server_available: bool,
}

/// Decides whether a challenge test may start for this request.
///
/// Runs the full validation pass first; a request that is not ready for
/// issuance is not ready for testing either.
pub fn preflight_test(
    request: &mut CertificateRequest,
    settings: &ValidationSettings,
    confirmed: bool,
    env: TestEnvironment,
) -> ValidationOutcome {
    let outcome = validate_request(request, settings, confirmed);
    if !outcome.is_ready() {
        return outcome;
    }

    let Some(challenge) = request.request_config.challenge_for(None) else {
        return Violation::NoChallengeToTest.into();
    };

    let bound_to_site = request
        .server_site_id
        .as_deref()
        .is_some_and(|id| !id.is_empty());
    if challenge.challenge_type == ChallengeType::Http && bound_to_site && !env.web_server_available
    {
        info!(
            "[validation] cannot test {} for '{}' without the local web server",
            challenge.challenge_type.as_str(),
            request.name
        );
        return Violation::HttpTestUnavailable.into();
    }

    ValidationOutcome::Ready
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{ChallengeConfig, DomainOption};

    const NO_SERVER: TestEnvironment = TestEnvironment {
        web_server_available: false,
    };

    fn request(challenge_type: Option<ChallengeType>, site: Option<&str>) -> CertificateRequest {
        let mut request = CertificateRequest {
            name: "site".into(),
            domain_options: vec![DomainOption::new("example.com", true, true)],
            server_site_id: site.map(str::to_string),
            ..Default::default()
        };
        if let Some(challenge_type) = challenge_type {
            request.request_config.challenges.push(ChallengeConfig {
                challenge_type,
                domain_match: None,
                challenge_provider_id: Some("provider".into()),
                parameters: vec![],
            });
        }
        request
    }

    #[test]
    fn http_test_for_site_needs_web_server() {
        let settings = ValidationSettings::default();
        let mut req = request(Some(ChallengeType::Http), Some("1"));
        assert_eq!(
            preflight_test(&mut req, &settings, false, NO_SERVER),
            ValidationOutcome::RuleViolation(Violation::HttpTestUnavailable)
        );
        assert!(
            preflight_test(
                &mut req,
                &settings,
                false,
                TestEnvironment {
                    web_server_available: true
                }
            )
            .is_ready()
        );
    }

    #[test]
    fn dns_or_unbound_requests_can_test_anywhere() {
        let settings = ValidationSettings::default();
        let mut dns = request(Some(ChallengeType::Dns), Some("1"));
        assert!(preflight_test(&mut dns, &settings, false, NO_SERVER).is_ready());

        let mut unbound = request(Some(ChallengeType::Http), None);
        assert!(preflight_test(&mut unbound, &settings, false, NO_SERVER).is_ready());
    }

    #[test]
    fn request_without_challenges_cannot_test() {
        let mut req = request(None, None);
        assert_eq!(
            preflight_test(&mut req, &ValidationSettings::default(), false, NO_SERVER),
            ValidationOutcome::RuleViolation(Violation::NoChallengeToTest)
        );
    }

    #[test]
    fn validation_failures_win() {
        let mut req = request(Some(ChallengeType::Http), None);
        req.name.clear();
        assert_eq!(
            preflight_test(&mut req, &ValidationSettings::default(), false, NO_SERVER),
            ValidationOutcome::RuleViolation(Violation::NameRequired)
        );
    }
}
