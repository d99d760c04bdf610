//! Environment-driven configuration for the review client.

use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use thiserror::Error;
use tradeassoc_domain::{DomainProfile, ResolutionPolicy, ReviewDomain};
use tradeassoc_shared::ReviewEndpoints;
use url::Url;

/// Default API base URL.
pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid {key}: {message}")]
    Invalid { key: String, message: String },
}

impl ConfigError {
    fn invalid(key: &str, message: impl Into<String>) -> Self {
        Self::Invalid {
            key: key.to_string(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ReviewConfig {
    pub api_url: Url,
    /// Static bearer token for headless use
    pub api_token: Option<String>,
    pub acting_user: Option<String>,
    pub request_timeout: Option<Duration>,
    /// Replaces the default currency symbol for every domain
    pub currency_symbol: Option<String>,
    endpoints: HashMap<ReviewDomain, ReviewEndpoints>,
    resolutions: HashMap<ReviewDomain, ResolutionPolicy>,
}

impl ReviewConfig {
    /// Reads `TRADEASSOC_*` variables from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let raw_url = var("TRADEASSOC_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let api_url = Url::parse(&raw_url)
            .map_err(|e| ConfigError::invalid("TRADEASSOC_API_URL", e.to_string()))?;
        if !matches!(api_url.scheme(), "http" | "https") {
            return Err(ConfigError::invalid(
                "TRADEASSOC_API_URL",
                format!("unsupported scheme `{}`", api_url.scheme()),
            ));
        }

        let request_timeout = match var("TRADEASSOC_REQUEST_TIMEOUT_MS") {
            None => None,
            Some(raw) => {
                let millis: u64 = raw.parse().map_err(|_| {
                    ConfigError::invalid(
                        "TRADEASSOC_REQUEST_TIMEOUT_MS",
                        format!("expected milliseconds, got `{}`", raw),
                    )
                })?;
                (millis > 0).then(|| Duration::from_millis(millis))
            }
        };

        let mut endpoints = HashMap::new();
        let mut resolutions = HashMap::new();
        for domain in ReviewDomain::ALL {
            let mut paths = ReviewEndpoints::for_domain(domain);
            let prefix = format!("TRADEASSOC_{}", domain.as_str().to_ascii_uppercase());
            if let Some(path) = var(&format!("{}_LIST_PATH", prefix)) {
                paths.list_path = path;
            }
            if let Some(path) = var(&format!("{}_DECISION_PATH", prefix)) {
                paths.decision_path = path;
            }
            endpoints.insert(domain, paths);

            let key = format!("{}_RESOLUTION", prefix);
            if let Some(raw) = var(&key) {
                let policy = raw
                    .parse::<ResolutionPolicy>()
                    .map_err(|e| ConfigError::invalid(&key, e.to_string()))?;
                resolutions.insert(domain, policy);
            }
        }

        Ok(Self {
            api_url,
            api_token: var("TRADEASSOC_API_TOKEN"),
            acting_user: var("TRADEASSOC_USER_ID"),
            request_timeout,
            currency_symbol: var("TRADEASSOC_CURRENCY_SYMBOL"),
            endpoints,
            resolutions,
        })
    }

    pub fn endpoints_for(&self, domain: ReviewDomain) -> ReviewEndpoints {
        self.endpoints
            .get(&domain)
            .cloned()
            .unwrap_or_else(|| ReviewEndpoints::for_domain(domain))
    }

    /// Built-in profile for `domain` with any configured overrides applied.
    pub fn profile_for(&self, domain: ReviewDomain) -> DomainProfile {
        let mut profile = DomainProfile::for_domain(domain);
        if let Some(policy) = self.resolutions.get(&domain) {
            profile = profile.with_resolution(*policy);
        }
        if let Some(symbol) = &self.currency_symbol {
            profile = profile.with_currency_symbol(symbol.clone());
        }
        profile
    }
}

/// Loads `.env.local` then `.env` from the repository root, when present.
pub fn load_dotenv_from_repo_root() {
    let repo_root = Path::new(env!("CARGO_MANIFEST_DIR")).join("..").join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}
