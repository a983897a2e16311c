use std::ops::ControlFlow;

use log::debug;

use crate::core::types::RequestConfig;
use crate::validation::outcome::{ConfirmationReason, StageFlow};

pub const ALL_UNASSIGNED_IPS: &str = "*";

/// Reconciles automated and manual binding fields.
///
/// Automated binding owns IP, port and SNI selection, so explicit values are
/// cleared. Manual binding defaults SNI on, and asks for confirmation when SNI
/// is combined with one specific IP unless `confirmed` is set.
pub fn normalize_binding(config: &mut RequestConfig, confirmed: bool) -> StageFlow {
    if config.perform_automated_binding {
        if config.binding_ip_address.is_some()
            || config.binding_port.is_some()
            || config.binding_use_sni.is_some()
        {
            debug!("[binding] clearing manual binding fields for automated binding");
        }
        config.binding_ip_address = None;
        config.binding_port = None;
        config.binding_use_sni = None;
        return ControlFlow::Continue(());
    }

    let use_sni = *config.binding_use_sni.get_or_insert(true);

    if use_sni
        && let Some(ip) = config
            .binding_ip_address
            .as_deref()
            .filter(|ip| !ip.is_empty() && *ip != ALL_UNASSIGNED_IPS)
    {
        if confirmed {
            debug!("[binding] SNI on specific IP {ip} confirmed by caller");
        } else {
            return ControlFlow::Break(
                ConfirmationReason::SniWithSpecificIp { ip: ip.to_string() }.into(),
            );
        }
    }

    ControlFlow::Continue(())
}
