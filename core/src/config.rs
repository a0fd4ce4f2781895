//! Engine configuration.
//!
//! The serialized shape (feature `serde`) is the one middleware hosts already
//! write, with camelCase keys:
//!
//! ```yaml
//! requestHeaders:            # block rules
//!   - header: User-Agent
//!     env: Googlebot
//! whitelistRequestHeaders:   # allow rules, optional
//!   - header: Cf-Ipcountry
//!     env: VN
//! log: true                  # optional
//! ```
//!
//! Every field is optional; a missing list is an empty list.

use crate::HeaderPattern;
#[cfg(feature = "serde")]
use crate::RuleError;

/// Configuration consumed by [`Engine::build`](crate::Engine::build).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase", default)
)]
pub struct EngineConfig {
    /// Block rules: a request matching any of them is denied.
    pub request_headers: Vec<HeaderPattern>,

    /// Allow rules: when non-empty, only requests matching one are allowed.
    pub whitelist_request_headers: Vec<HeaderPattern>,

    /// Emit one `info` log line per decision.
    pub log: bool,
}

impl EngineConfig {
    /// Empty configuration: no rules, logging off.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a block rule (builder pattern).
    #[must_use]
    pub fn block(mut self, pattern: HeaderPattern) -> Self {
        self.request_headers.push(pattern);
        self
    }

    /// Add an allow rule (builder pattern).
    #[must_use]
    pub fn allow(mut self, pattern: HeaderPattern) -> Self {
        self.whitelist_request_headers.push(pattern);
        self
    }

    /// Enable or disable per-decision logging (builder pattern).
    #[must_use]
    pub fn log(mut self, enabled: bool) -> Self {
        self.log = enabled;
        self
    }
}

#[cfg(feature = "serde")]
impl EngineConfig {
    /// Parse a JSON configuration.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::InvalidConfig`] if the document does not parse.
    pub fn from_json(json: &str) -> Result<Self, RuleError> {
        serde_json::from_str(json).map_err(|e| RuleError::InvalidConfig {
            reason: format!("JSON parse error: {e}"),
        })
    }

    /// Parse a YAML configuration.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::InvalidConfig`] if the document does not parse.
    pub fn from_yaml(yaml: &str) -> Result<Self, RuleError> {
        serde_yaml::from_str(yaml).map_err(|e| RuleError::InvalidConfig {
            reason: format!("YAML parse error: {e}"),
        })
    }
}
