//! Assistant configuration (code > env > defaults).
//!
//! The Gemini credential is only ever read from configuration; when it is
//! absent the assistant runs in fallback-only mode.

use std::fmt;
use std::time::Duration;

use bon::Builder;
use tracing::warn;

use crate::connectivity::ProbeConfig;
use crate::remote::gemini::{DEFAULT_BASE_URL, DEFAULT_MODEL};
use crate::types::HISTORY_LIMIT;

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Environment variables read by [`AssistantConfig::from_env`].
pub const API_KEY_VARS: [&str; 2] = ["FITPRO_GEMINI_API_KEY", "GEMINI_API_KEY"];
pub const MODEL_VAR: &str = "FITPRO_GEMINI_MODEL";
pub const BASE_URL_VAR: &str = "FITPRO_GEMINI_BASE_URL";
pub const PROBE_HOST_VAR: &str = "FITPRO_PROBE_HOST";
pub const PROBE_PORT_VAR: &str = "FITPRO_PROBE_PORT";
pub const PROBE_TIMEOUT_VAR: &str = "FITPRO_PROBE_TIMEOUT_SECS";
pub const REQUEST_TIMEOUT_VAR: &str = "FITPRO_REQUEST_TIMEOUT_SECS";

#[derive(Clone, Builder)]
pub struct AssistantConfig {
    /// Gemini API key. `None` means fallback-only.
    #[builder(into)]
    pub api_key: Option<String>,
    #[builder(into, default = DEFAULT_MODEL.to_string())]
    pub model: String,
    #[builder(into, default = DEFAULT_BASE_URL.to_string())]
    pub base_url: String,
    /// Upper bound for one remote exchange.
    #[builder(default = DEFAULT_REQUEST_TIMEOUT)]
    pub request_timeout: Duration,
    #[builder(default)]
    pub probe: ProbeConfig,
    #[builder(default = HISTORY_LIMIT)]
    pub history_limit: usize,
}

impl fmt::Debug for AssistantConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AssistantConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("request_timeout", &self.request_timeout)
            .field("probe", &self.probe)
            .field("history_limit", &self.history_limit)
            .finish()
    }
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl AssistantConfig {
    /// Load from environment variables, reading `.env` first if present.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv(); // load .env if present, ignore error
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let mut config = Self {
            api_key: API_KEY_VARS.iter().find_map(|name| get(*name)),
            ..Self::default()
        };

        if let Some(model) = get(MODEL_VAR) {
            config.model = model;
        }
        if let Some(url) = get(BASE_URL_VAR) {
            config.base_url = url;
        }
        if let Some(host) = get(PROBE_HOST_VAR) {
            config.probe.host = host;
        }
        if let Some(port) = parse_var::<u16>(PROBE_PORT_VAR, get(PROBE_PORT_VAR)) {
            config.probe.port = port;
        }
        if let Some(secs) = parse_var::<f64>(PROBE_TIMEOUT_VAR, get(PROBE_TIMEOUT_VAR)) {
            config.probe.timeout = secs_to_duration(PROBE_TIMEOUT_VAR, secs, config.probe.timeout);
        }
        if let Some(secs) = parse_var::<f64>(REQUEST_TIMEOUT_VAR, get(REQUEST_TIMEOUT_VAR)) {
            config.request_timeout = secs_to_duration(REQUEST_TIMEOUT_VAR, secs, config.request_timeout);
        }

        config
    }

    /// Whether a remote credential is present.
    pub fn has_credentials(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, value: Option<String>) -> Option<T> {
    let value = value?;
    match value.parse() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            warn!(var = name, value = %value, "ignoring unparsable setting");
            None
        }
    }
}

fn secs_to_duration(name: &str, secs: f64, current: Duration) -> Duration {
    match Duration::try_from_secs_f64(secs)
        .ok()
        .filter(|d| !d.is_zero())
    {
        Some(duration) => duration,
        None => {
            warn!(var = name, secs, "timeout out of range; keeping default");
            current
        }
    }
}
