use std::ops::ControlFlow;

use log::debug;

use crate::core::types::CertificateRequest;
use crate::validation::outcome::{StageFlow, Violation, violation};

/// Makes sure exactly one selected domain is primary.
///
/// A selected primary is kept as is. Otherwise the first domain still marked
/// primary is re-selected, and with no mark at all the first selected domain
/// is promoted. Domains are never removed.
pub fn resolve_primary_domain(request: &mut CertificateRequest) -> StageFlow {
    let selected_primaries = request
        .domain_options
        .iter()
        .filter(|d| d.is_selected && d.is_primary_domain)
        .count();
    if selected_primaries > 1 {
        return violation(Violation::MultiplePrimaryDomains {
            count: selected_primaries,
        });
    }
    if selected_primaries == 1 {
        return ControlFlow::Continue(());
    }

    if let Some(primary) = request
        .domain_options
        .iter_mut()
        .find(|d| d.is_primary_domain)
    {
        debug!(
            "[validation] re-selecting primary domain {}",
            primary.domain
        );
        primary.is_selected = true;
        return ControlFlow::Continue(());
    }

    match request.domain_options.iter_mut().find(|d| d.is_selected) {
        Some(first_selected) => {
            debug!(
                "[validation] promoting {} to primary domain",
                first_selected.domain
            );
            first_selected.is_primary_domain = true;
            ControlFlow::Continue(())
        }
        None => violation(Violation::NoPrimaryDomain),
    }
}
