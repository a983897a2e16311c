use std::ops::ControlFlow;

use log::debug;
use url::Url;

use crate::core::types::RequestConfig;
use crate::validation::outcome::{StageFlow, Violation, violation};

pub const WEBHOOK_ON_NONE: &str = "none";
pub const WEBHOOK_ON_SUCCESS: &str = "on-success";
pub const WEBHOOK_ON_ERROR: &str = "on-error";
pub const WEBHOOK_ON_SUCCESS_OR_ERROR: &str = "on-success-or-error";

fn is_enabled(trigger: Option<&str>) -> bool {
    trigger.is_some_and(|t| !t.is_empty() && t != WEBHOOK_ON_NONE)
}

/// An enabled webhook needs an absolute URL and a method; a disabled one
/// drops whatever was configured before.
pub fn validate_webhook(config: &mut RequestConfig) -> StageFlow {
    if is_enabled(config.webhook_trigger.as_deref()) {
        let url_ok = config
            .webhook_url
            .as_deref()
            .is_some_and(|raw| !raw.is_empty() && Url::parse(raw).is_ok());
        if !url_ok {
            return violation(Violation::WebhookUrlInvalid);
        }
        if config.webhook_method.as_deref().is_none_or(str::is_empty) {
            return violation(Violation::WebhookMethodRequired);
        }
        return ControlFlow::Continue(());
    }

    if config.webhook_url.is_some()
        || config.webhook_method.is_some()
        || config.webhook_content_type.is_some()
        || config.webhook_content_body.is_some()
    {
        debug!("[webhook] trigger disabled; clearing webhook settings");
    }
    config.webhook_url = None;
    config.webhook_method = None;
    config.webhook_content_type = None;
    config.webhook_content_body = None;
    ControlFlow::Continue(())
}
