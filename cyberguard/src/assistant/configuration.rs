use std::env;
use std::fmt;
use std::net::SocketAddr;
use tracing::{info, warn};
use url::Url;

use super::error::ConfigurationError;

pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";
pub const PERPLEXITY_API_KEY: &str = "PERPLEXITY_API_KEY";

const OPENAI_MODEL: &str = "OPENAI_MODEL";
const PERPLEXITY_MODEL: &str = "PERPLEXITY_MODEL";
const OPENAI_BASE_URL: &str = "OPENAI_BASE_URL";
const PERPLEXITY_BASE_URL: &str = "PERPLEXITY_BASE_URL";
const CYBERGUARD_ADDR: &str = "CYBERGUARD_ADDR";

#[derive(Clone)]
pub struct Configuration {
    pub openai_api_key: String,
    pub perplexity_api_key: String,
    pub openai_model: String,
    pub perplexity_model: String,
    pub openai_base_url: String,
    pub perplexity_base_url: String,
    pub bind_addr: SocketAddr,
}

// Keys never appear in debug output.
impl fmt::Debug for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Configuration")
            .field("openai_api_key", &"***")
            .field("perplexity_api_key", &"***")
            .field("openai_model", &self.openai_model)
            .field("perplexity_model", &self.perplexity_model)
            .field("openai_base_url", &self.openai_base_url)
            .field("perplexity_base_url", &self.perplexity_base_url)
            .field("bind_addr", &self.bind_addr)
            .finish()
    }
}

fn default_openai_model() -> String {
    "gpt-4.1-mini".to_string()
}

fn default_perplexity_model() -> String {
    "sonar-pro".to_string()
}

fn default_openai_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_perplexity_base_url() -> String {
    "https://api.perplexity.ai".to_string()
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 3000))
}

impl Configuration {
    /// Load from the process environment. Call [`crate::init`] first so a
    /// local `.env` file is picked up.
    pub fn from_env() -> Result<Self, ConfigurationError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load from an arbitrary key lookup. Required keys are checked before
    /// anything else so a missing credential never reaches a client.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigurationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env_vars = [
            OPENAI_API_KEY,
            PERPLEXITY_API_KEY,
            OPENAI_MODEL,
            PERPLEXITY_MODEL,
            OPENAI_BASE_URL,
            PERPLEXITY_BASE_URL,
            CYBERGUARD_ADDR,
        ];

        for var in env_vars {
            match lookup(var) {
                Some(value) => {
                    let shown = if var.contains("KEY") { "***" } else { value.as_str() };
                    info!(var, value = shown, "Found env var");
                }
                None => warn!(var, "Env var not found"),
            }
        }

        let openai_api_key = required(&lookup, OPENAI_API_KEY)?;
        let perplexity_api_key = required(&lookup, PERPLEXITY_API_KEY)?;

        let openai_base_url = url_or(&lookup, OPENAI_BASE_URL, default_openai_base_url)?;
        let perplexity_base_url =
            url_or(&lookup, PERPLEXITY_BASE_URL, default_perplexity_base_url)?;

        let bind_addr = match optional(&lookup, CYBERGUARD_ADDR) {
            Some(value) => value
                .parse()
                .map_err(|_| ConfigurationError::InvalidAddr {
                    key: CYBERGUARD_ADDR,
                    value,
                })?,
            None => default_bind_addr(),
        };

        Ok(Configuration {
            openai_api_key,
            perplexity_api_key,
            openai_model: optional(&lookup, OPENAI_MODEL).unwrap_or_else(default_openai_model),
            perplexity_model: optional(&lookup, PERPLEXITY_MODEL)
                .unwrap_or_else(default_perplexity_model),
            openai_base_url,
            perplexity_base_url,
            bind_addr,
        })
    }

    /// Both credentials must be non-empty before a pipeline can be built.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.openai_api_key.trim().is_empty() {
            return Err(ConfigurationError::MissingKey(OPENAI_API_KEY));
        }
        if self.perplexity_api_key.trim().is_empty() {
            return Err(ConfigurationError::MissingKey(PERPLEXITY_API_KEY));
        }
        Ok(())
    }
}

fn optional<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn required<F>(lookup: &F, key: &'static str) -> Result<String, ConfigurationError>
where
    F: Fn(&str) -> Option<String>,
{
    optional(lookup, key).ok_or(ConfigurationError::MissingKey(key))
}

fn url_or<F>(
    lookup: &F,
    key: &'static str,
    default: fn() -> String,
) -> Result<String, ConfigurationError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(value) = optional(lookup, key) else {
        return Ok(default());
    };
    Url::parse(&value).map_err(|_| ConfigurationError::InvalidUrl {
        key,
        value: value.clone(),
    })?;
    Ok(value.trim_end_matches('/').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_loads_required_keys_with_defaults() {
        let config = Configuration::from_lookup(lookup_from(&[
            (OPENAI_API_KEY, "sk-openai"),
            (PERPLEXITY_API_KEY, "pplx-key"),
        ]))
        .unwrap();

        assert_eq!(config.openai_api_key, "sk-openai");
        assert_eq!(config.perplexity_api_key, "pplx-key");
        assert_eq!(config.openai_model, "gpt-4.1-mini");
        assert_eq!(config.perplexity_model, "sonar-pro");
        assert_eq!(config.openai_base_url, "https://api.openai.com/v1");
        assert_eq!(config.perplexity_base_url, "https://api.perplexity.ai");
        assert_eq!(config.bind_addr.port(), 3000);
    }

    #[test]
    fn test_missing_openai_key() {
        let err = Configuration::from_lookup(lookup_from(&[(PERPLEXITY_API_KEY, "pplx-key")]))
            .unwrap_err();
        assert_eq!(err, ConfigurationError::MissingKey(OPENAI_API_KEY));
    }

    #[test]
    fn test_missing_perplexity_key() {
        let err =
            Configuration::from_lookup(lookup_from(&[(OPENAI_API_KEY, "sk-openai")])).unwrap_err();
        assert_eq!(err, ConfigurationError::MissingKey(PERPLEXITY_API_KEY));
        assert!(err.to_string().contains("PERPLEXITY_API_KEY"));
    }

    #[test]
    fn test_blank_key_counts_as_missing() {
        let err = Configuration::from_lookup(lookup_from(&[
            (OPENAI_API_KEY, "   "),
            (PERPLEXITY_API_KEY, "pplx-key"),
        ]))
        .unwrap_err();
        assert_eq!(err, ConfigurationError::MissingKey(OPENAI_API_KEY));
    }

    #[test]
    fn test_overrides() {
        let config = Configuration::from_lookup(lookup_from(&[
            (OPENAI_API_KEY, "sk-openai"),
            (PERPLEXITY_API_KEY, "pplx-key"),
            (OPENAI_MODEL, "gpt-4o"),
            (PERPLEXITY_BASE_URL, "http://127.0.0.1:9000/"),
            (CYBERGUARD_ADDR, "127.0.0.1:8080"),
        ]))
        .unwrap();

        assert_eq!(config.openai_model, "gpt-4o");
        assert_eq!(config.perplexity_base_url, "http://127.0.0.1:9000");
        assert_eq!(config.bind_addr, "127.0.0.1:8080".parse::<SocketAddr>().unwrap());
    }

    #[test]
    fn test_invalid_url_rejected() {
        let err = Configuration::from_lookup(lookup_from(&[
            (OPENAI_API_KEY, "sk-openai"),
            (PERPLEXITY_API_KEY, "pplx-key"),
            (OPENAI_BASE_URL, "not a url"),
        ]))
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigurationError::InvalidUrl { key: OPENAI_BASE_URL, .. }
        ));
    }

    #[test]
    fn test_invalid_addr_rejected() {
        let err = Configuration::from_lookup(lookup_from(&[
            (OPENAI_API_KEY, "sk-openai"),
            (PERPLEXITY_API_KEY, "pplx-key"),
            (CYBERGUARD_ADDR, "localhost"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigurationError::InvalidAddr { .. }));
    }

    #[test]
    fn test_debug_masks_api_keys() {
        let config = Configuration::from_lookup(lookup_from(&[
            (OPENAI_API_KEY, "sk-openai"),
            (PERPLEXITY_API_KEY, "pplx-key"),
        ]))
        .unwrap();

        let shown = format!("{:?}", config);
        assert!(!shown.contains("sk-openai"));
        assert!(!shown.contains("pplx-key"));
        assert!(shown.contains("openai_api_key: \"***\""));
        assert!(shown.contains("perplexity_api_key: \"***\""));
        assert!(shown.contains("gpt-4.1-mini"));
    }

    #[test]
    fn test_validate_rejects_hand_built_empty_key() {
        let mut config = Configuration::from_lookup(lookup_from(&[
            (OPENAI_API_KEY, "sk-openai"),
            (PERPLEXITY_API_KEY, "pplx-key"),
        ]))
        .unwrap();
        assert!(config.validate().is_ok());

        config.perplexity_api_key.clear();
        assert_eq!(
            config.validate(),
            Err(ConfigurationError::MissingKey(PERPLEXITY_API_KEY))
        );
    }
}
