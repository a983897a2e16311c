use std::ops::ControlFlow;

use log::debug;

use crate::config::ValidationSettings;
use crate::core::types::{CertificateRequest, ChallengeType};
use crate::domain::{is_internal_hostname, is_wildcard};
use crate::validation::outcome::{StageFlow, Violation, violation};

/// Checks naming, hostnames and challenge configuration, in that order.
///
/// Expects the primary domain to be resolved already. The only mutation is
/// swapping the placeholder title for the primary domain.
pub fn validate_challenges(
    request: &mut CertificateRequest,
    settings: &ValidationSettings,
) -> StageFlow {
    if request.name.is_empty() {
        return violation(Violation::NameRequired);
    }

    if let Some(internal) = request
        .selected_domains()
        .find(|d| is_internal_hostname(&d.domain))
    {
        return violation(Violation::InternalHostname {
            domain: internal.domain.clone(),
        });
    }

    if request.name == settings.default_title {
        let Some(primary) = request.primary_domain().map(|d| d.domain.clone()) else {
            return violation(Violation::NoPrimaryDomain);
        };
        debug!("[validation] replacing default title with {primary}");
        request.name = primary;
    }

    let config = &request.request_config;

    if let Some(wildcard) = request.selected_domains().find(|d| is_wildcard(&d.domain))
        && !config.uses_challenge_type(ChallengeType::Dns)
    {
        return violation(Violation::WildcardRequiresDns {
            domain: wildcard.domain.clone(),
        });
    }

    if config.uses_challenge_type(ChallengeType::TlsSni) {
        return violation(if request.is_new() {
            Violation::LegacyChallengeForNewRequest
        } else {
            Violation::LegacyChallenge
        });
    }
    if config.uses_challenge_type(ChallengeType::Unrecognized) {
        return violation(Violation::UnrecognizedChallengeType);
    }

    if config
        .challenges
        .iter()
        .any(|c| c.challenge_type == ChallengeType::Dns && !c.has_provider())
    {
        return violation(Violation::DnsProviderRequired);
    }

    if config
        .challenges
        .iter()
        .filter(|c| c.matches_any_domain())
        .count()
        > 1
    {
        return violation(Violation::MultipleCatchAllChallenges);
    }

    if let Some(missing) = config
        .challenges
        .iter()
        .flat_map(|c| c.parameters.iter())
        .find(|p| p.is_missing())
    {
        return violation(Violation::ChallengeParameterRequired {
            name: missing.name.clone(),
        });
    }

    let selected = request.selected_domains().count();
    if selected > settings.max_names {
        return violation(Violation::TooManyNames {
            limit: settings.max_names,
            selected,
        });
    }

    ControlFlow::Continue(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{ChallengeConfig, ChallengeParameter, DomainOption};
    use crate::validation::outcome::ValidationOutcome;

    fn http() -> ChallengeConfig {
        ChallengeConfig {
            challenge_type: ChallengeType::Http,
            domain_match: None,
            challenge_provider_id: None,
            parameters: vec![],
        }
    }

    fn dns(provider: Option<&str>) -> ChallengeConfig {
        ChallengeConfig {
            challenge_type: ChallengeType::Dns,
            challenge_provider_id: provider.map(str::to_string),
            ..http()
        }
    }

    fn request(domains: &[&str]) -> CertificateRequest {
        let mut options: Vec<DomainOption> = domains
            .iter()
            .map(|d| DomainOption::new(*d, true, false))
            .collect();
        if let Some(first) = options.first_mut() {
            first.is_primary_domain = true;
        }
        let mut request = CertificateRequest {
            name: "site".into(),
            domain_options: options,
            ..Default::default()
        };
        request.request_config.challenges.push(http());
        request
    }

    fn check(request: &mut CertificateRequest) -> Option<Violation> {
        match validate_challenges(request, &ValidationSettings::default()) {
            ControlFlow::Continue(()) => None,
            ControlFlow::Break(ValidationOutcome::RuleViolation(v)) => Some(v),
            ControlFlow::Break(other) => panic!("unexpected outcome {other:?}"),
        }
    }

    #[test]
    fn accepts_plain_http_request() {
        assert_eq!(check(&mut request(&["example.com", "www.example.com"])), None);
    }

    #[test]
    fn requires_name() {
        let mut req = request(&["example.com"]);
        req.name.clear();
        assert_eq!(check(&mut req), Some(Violation::NameRequired));
    }

    #[test]
    fn rejects_internal_hostnames() {
        assert_eq!(
            check(&mut request(&["example.com", "intranet"])),
            Some(Violation::InternalHostname {
                domain: "intranet".into()
            })
        );
        assert!(matches!(
            check(&mut request(&["nas.Local"])),
            Some(Violation::InternalHostname { .. })
        ));
    }

    #[test]
    fn ignores_unselected_internal_hostnames() {
        let mut req = request(&["example.com"]);
        req.domain_options
            .push(DomainOption::new("intranet", false, false));
        assert_eq!(check(&mut req), None);
    }

    #[test]
    fn substitutes_default_title() {
        let mut req = request(&["example.com", "www.example.com"]);
        req.name = ValidationSettings::default().default_title;
        assert_eq!(check(&mut req), None);
        assert_eq!(req.name, "example.com");
    }

    #[test]
    fn wildcard_needs_dns_challenge() {
        let mut req = request(&["*.example.com"]);
        assert_eq!(
            check(&mut req),
            Some(Violation::WildcardRequiresDns {
                domain: "*.example.com".into()
            })
        );

        req.request_config.challenges = vec![dns(Some("cloudflare"))];
        assert_eq!(check(&mut req), None);
    }

    #[test]
    fn legacy_challenge_message_depends_on_request_age() {
        let mut req = request(&["example.com"]);
        req.request_config.challenges[0].challenge_type = ChallengeType::TlsSni;
        assert_eq!(check(&mut req), Some(Violation::LegacyChallengeForNewRequest));

        req.id = Some("existing".into());
        assert_eq!(check(&mut req), Some(Violation::LegacyChallenge));
    }

    #[test]
    fn unrecognized_challenge_fails_closed() {
        let mut req = request(&["example.com"]);
        req.request_config.challenges[0].challenge_type = ChallengeType::Unrecognized;
        assert_eq!(check(&mut req), Some(Violation::UnrecognizedChallengeType));
    }

    #[test]
    fn dns_challenge_requires_provider() {
        let mut req = request(&["example.com"]);
        req.request_config.challenges = vec![dns(None)];
        assert_eq!(check(&mut req), Some(Violation::DnsProviderRequired));

        req.request_config.challenges = vec![dns(Some(" "))];
        assert_eq!(check(&mut req), Some(Violation::DnsProviderRequired));
    }

    #[test]
    fn only_one_catch_all_challenge() {
        let mut req = request(&["example.com"]);
        req.request_config.challenges.push(dns(Some("route53")));
        assert_eq!(check(&mut req), Some(Violation::MultipleCatchAllChallenges));

        req.request_config.challenges[1].domain_match = Some("example.com".into());
        assert_eq!(check(&mut req), None);
    }

    #[test]
    fn names_first_missing_parameter() {
        let mut req = request(&["example.com"]);
        req.request_config.challenges[0].parameters = vec![
            ChallengeParameter {
                name: "optional".into(),
                value: None,
                is_required: false,
            },
            ChallengeParameter {
                name: "zone_id".into(),
                value: Some(String::new()),
                is_required: true,
            },
            ChallengeParameter {
                name: "api_token".into(),
                value: None,
                is_required: true,
            },
        ];
        assert_eq!(
            check(&mut req),
            Some(Violation::ChallengeParameterRequired {
                name: "zone_id".into()
            })
        );
    }

    #[test]
    fn blank_domain_match_with_whitespace_is_not_catch_all() {
        let mut req = request(&["example.com"]);
        let mut scoped = dns(Some("route53"));
        scoped.domain_match = Some(" ".into());
        req.request_config.challenges.push(scoped);
        assert_eq!(check(&mut req), None);
    }

    #[test]
    fn checks_run_in_order() {
        let mut req = request(&["*.example.com", "intranet"]);
        req.name.clear();
        req.request_config.challenges = vec![
            ChallengeConfig {
                challenge_type: ChallengeType::TlsSni,
                ..http()
            },
            dns(None),
        ];

        assert_eq!(check(&mut req), Some(Violation::NameRequired));
        req.name = "site".into();
        assert!(matches!(
            check(&mut req),
            Some(Violation::InternalHostname { .. })
        ));
        req.domain_options.pop();
        req.request_config.challenges.pop();
        assert!(matches!(
            check(&mut req),
            Some(Violation::WildcardRequiresDns { .. })
        ));
        req.request_config.challenges.push(dns(None));
        assert_eq!(check(&mut req), Some(Violation::LegacyChallengeForNewRequest));
        req.request_config.challenges.remove(0);
        assert_eq!(check(&mut req), Some(Violation::DnsProviderRequired));
    }

    #[test]
    fn enforces_name_ceiling() {
        let names: Vec<String> = (0..=100).map(|i| format!("host{i}.example.com")).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();

        assert_eq!(check(&mut request(&refs[..100])), None);
        assert_eq!(
            check(&mut request(&refs)),
            Some(Violation::TooManyNames {
                limit: 100,
                selected: 101
            })
        );
    }

    #[test]
    fn ceiling_follows_settings() {
        let settings = ValidationSettings {
            max_names: 1,
            ..Default::default()
        };
        let mut req = request(&["example.com", "www.example.com"]);
        assert!(matches!(
            validate_challenges(&mut req, &settings),
            ControlFlow::Break(ValidationOutcome::RuleViolation(Violation::TooManyNames {
                limit: 1,
                ..
            }))
        ));
    }
}
