//! Gate configuration with TOML file support.

use std::time::Duration;

use atk_capabilities::InterfaceRegistry;
use atk_utils::LogFormat;
use serde::{Deserialize, Serialize};

use crate::GateError;

/// Configuration for a verification gate.
///
/// Can be loaded from a TOML file via [`GateConfig::from_toml_file`] or
/// built programmatically (e.g. for tests). Environment variables applied by
/// [`GateConfig::apply_env_overrides`] win over file values.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GateConfig {
    /// Portal GraphQL endpoint.
    #[serde(default = "default_portal_url")]
    pub portal_url: String,

    /// Application access token sent as `x-auth-token`.
    #[serde(default)]
    pub portal_access_token: Option<String>,

    /// Subgraph endpoint used for batch pre-checks. Without it every batch
    /// item is dispatched.
    #[serde(default)]
    pub indexer_url: Option<String>,

    /// Per-request HTTP timeout for the Portal and indexer.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Whether mutations verify the target's interfaces before dispatch.
    #[serde(default = "default_true")]
    pub check_capabilities: bool,

    /// How long a capability answer stays valid.
    #[serde(default = "default_cache_ttl_secs")]
    pub capability_cache_ttl_secs: u64,

    /// How often expired capability answers are purged.
    #[serde(default = "default_sweep_interval_secs")]
    pub capability_sweep_interval_secs: u64,

    /// Log format: "human" or "json".
    #[serde(default)]
    pub log_format: LogFormat,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Interface ids by name, added to the standard ERC entries.
    #[serde(default = "InterfaceRegistry::empty")]
    pub interfaces: InterfaceRegistry,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_portal_url() -> String {
    "http://localhost:7701/graphql".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_true() -> bool {
    true
}

fn default_cache_ttl_secs() -> u64 {
    600
}

fn default_sweep_interval_secs() -> u64 {
    60
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl GateConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &str) -> Result<Self, GateError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| GateError::Config(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, GateError> {
        toml::from_str(s).map_err(|e| GateError::Config(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, GateError> {
        toml::to_string_pretty(self).map_err(|e| GateError::Config(e.to_string()))
    }

    /// Apply `ATK_PORTAL_URL`, `ATK_PORTAL_ACCESS_TOKEN`, `ATK_INDEXER_URL`
    /// and `ATK_LOG_LEVEL` from the process environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary variable lookup.
    pub fn apply_overrides_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("ATK_PORTAL_URL") {
            self.portal_url = url;
        }
        if let Some(token) = lookup("ATK_PORTAL_ACCESS_TOKEN") {
            self.portal_access_token = Some(token);
        }
        if let Some(url) = lookup("ATK_INDEXER_URL") {
            self.indexer_url = Some(url);
        }
        if let Some(level) = lookup("ATK_LOG_LEVEL") {
            self.log_level = level;
        }
    }

    /// Reject values the gate cannot run with.
    pub fn validate(&self) -> Result<(), GateError> {
        if !self.portal_url.starts_with("http://") && !self.portal_url.starts_with("https://") {
            return Err(GateError::Config(format!(
                "portal_url must be an http(s) URL, got {:?}",
                self.portal_url
            )));
        }
        if self.request_timeout_secs == 0 {
            return Err(GateError::Config(
                "request_timeout_secs must be positive".into(),
            ));
        }
        if self.capability_cache_ttl_secs == 0 {
            return Err(GateError::Config(
                "capability_cache_ttl_secs must be positive".into(),
            ));
        }
        if self.capability_sweep_interval_secs == 0 {
            return Err(GateError::Config(
                "capability_sweep_interval_secs must be positive".into(),
            ));
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn capability_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.capability_cache_ttl_secs)
    }

    pub fn capability_sweep_interval(&self) -> Duration {
        Duration::from_secs(self.capability_sweep_interval_secs)
    }

    /// Standard interfaces plus the configured ones.
    pub fn interface_registry(&self) -> InterfaceRegistry {
        let mut registry = InterfaceRegistry::default();
        registry.extend(self.interfaces.clone());
        registry
    }

    /// Install the global tracing subscriber from `log_format` / `log_level`.
    pub fn init_logging(&self) -> bool {
        atk_utils::init_logging(self.log_format, &self.log_level)
    }
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            portal_url: default_portal_url(),
            portal_access_token: None,
            indexer_url: None,
            request_timeout_secs: default_request_timeout_secs(),
            check_capabilities: default_true(),
            capability_cache_ttl_secs: default_cache_ttl_secs(),
            capability_sweep_interval_secs: default_sweep_interval_secs(),
            log_format: LogFormat::default(),
            log_level: default_log_level(),
            interfaces: InterfaceRegistry::empty(),
        }
    }
}
