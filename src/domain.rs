use anyhow::{Result, anyhow};

pub const WILDCARD_PREFIX: &str = "*.";
pub const LOCAL_SUFFIX: &str = ".local";

pub fn normalize_domain_for_comparison(input: &str) -> Result<String> {
    let trimmed = input.trim().trim_end_matches('.');
    if trimmed.is_empty() {
        return Err(anyhow!("domain name is required"));
    }
    let ascii = idna::domain_to_ascii(trimmed)
        .map_err(|err| anyhow!("invalid domain name: {err}"))?;
    Ok(ascii.to_lowercase())
}

pub fn is_wildcard(domain: &str) -> bool {
    domain.starts_with(WILDCARD_PREFIX)
}

/// Names without a label separator or under `.local` only resolve on private
/// networks, so a public CA will not issue for them.
pub fn is_internal_hostname(domain: &str) -> bool {
    !domain.contains('.') || domain.to_lowercase().ends_with(LOCAL_SUFFIX)
}

/// Matches a domain against one `domain_match` entry. A `*.` pattern covers
/// subdomains of its suffix and the identical wildcard name, not the bare suffix.
pub fn domain_matches_pattern(domain: &str, pattern: &str) -> bool {
    let (is_wildcard_pattern, pattern_body) = match pattern.trim().strip_prefix(WILDCARD_PREFIX) {
        Some(rest) => (true, rest),
        None => (false, pattern.trim()),
    };
    let (is_wildcard_domain, domain_body) = match domain.trim().strip_prefix(WILDCARD_PREFIX) {
        Some(rest) => (true, rest),
        None => (false, domain.trim()),
    };

    let Ok(pattern_body) = normalize_domain_for_comparison(pattern_body) else {
        return false;
    };
    let Ok(domain_body) = normalize_domain_for_comparison(domain_body) else {
        return false;
    };

    if !is_wildcard_pattern {
        return !is_wildcard_domain && domain_body == pattern_body;
    }
    if is_wildcard_domain {
        return domain_body == pattern_body;
    }
    domain_body.ends_with(&format!(".{pattern_body}"))
}
