use log::warn;

pub const DEFAULT_TITLE: &str = "New Managed Certificate";
pub const DEFAULT_MAX_NAMES: usize = 100;

const DEFAULT_TITLE_ENV: &str = "CERT_GUARD_DEFAULT_TITLE";
const MAX_NAMES_ENV: &str = "CERT_GUARD_MAX_NAMES";

/// Knobs the validation pipeline reads. Validation never mutates these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationSettings {
    /// Placeholder title given to new requests; replaced by the primary domain on save.
    pub default_title: String,
    /// Most names a single certificate may carry.
    pub max_names: usize,
}

impl Default for ValidationSettings {
    fn default() -> Self {
        Self {
            default_title: DEFAULT_TITLE.to_string(),
            max_names: DEFAULT_MAX_NAMES,
        }
    }
}

impl ValidationSettings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let default_title = lookup(DEFAULT_TITLE_ENV)
            .filter(|raw| !raw.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_TITLE.to_string());

        let max_names = match lookup(MAX_NAMES_ENV) {
            None => DEFAULT_MAX_NAMES,
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(value) if value > 0 => value,
                _ => {
                    warn!("[settings] invalid {MAX_NAMES_ENV} value {raw:?}; using default");
                    DEFAULT_MAX_NAMES
                }
            },
        };

        Self {
            default_title,
            max_names,
        }
    }
}
