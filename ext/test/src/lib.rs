//! headerblock-test: conformance scenarios for the header filter
//!
//! Provides the reference scenarios as plain values, and (feature `fixtures`)
//! a YAML fixture runner so the same checks can be written as data.
//!
//! # Example
//!
//! ```
//! use headerblock_test::prelude::*;
//!
//! for scenario in reference_scenarios() {
//!     assert_eq!(scenario.run(), Ok(scenario.expect), "{}", scenario.name);
//! }
//! ```

use headerblock::prelude::*;

#[cfg(feature = "fixtures")]
pub mod fixture;

/// One config, one request, one expected decision.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub name: &'static str,
    pub config: EngineConfig,
    pub headers: RequestHeaders,
    pub expect: Decision,
}

impl Scenario {
    /// Create a scenario with no request headers.
    #[must_use]
    pub fn new(name: &'static str, config: EngineConfig, expect: Decision) -> Self {
        Self {
            name,
            config,
            headers: RequestHeaders::new(),
            expect,
        }
    }

    /// Add a request header (builder pattern).
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.append(name, value);
        self
    }

    /// Build the engine and decide on the request.
    ///
    /// # Errors
    ///
    /// Returns the build error if the config does not compile.
    pub fn run(&self) -> Result<Decision, RuleError> {
        Ok(Engine::build(&self.config)?.decide(&self.headers))
    }
}

/// The four reference scenarios: bot blocking, its negative, a country
/// allowlist, and blocking chunked transfer encoding.
#[must_use]
pub fn reference_scenarios() -> Vec<Scenario> {
    let bot = EngineConfig::new().block(HeaderPattern::new("User-Agent", "Googlebot"));
    let country = EngineConfig::new().allow(HeaderPattern::new("Cf-Ipcountry", "VN"));
    let chunked = EngineConfig::new().block(HeaderPattern::new("Transfer-Encoding", "chunked"));

    vec![
        Scenario::new("blocked_user_agent", bot.clone(), Decision::Deny)
            .with("User-Agent", "Googlebot"),
        Scenario::new("valid_user_agent", bot, Decision::Allow)
            .with("User-Agent", "ValidUserAgent"),
        Scenario::new("allowed_country", country.clone(), Decision::Allow)
            .with("Cf-Ipcountry", "VN"),
        Scenario::new("other_country", country.clone(), Decision::Deny)
            .with("Cf-Ipcountry", "FR"),
        Scenario::new("no_country_header", country, Decision::Deny),
        Scenario::new("chunked_encoding", chunked.clone(), Decision::Deny)
            .with("Transfer-Encoding", "chunked"),
        Scenario::new("no_transfer_encoding", chunked, Decision::Allow)
            .with("Content-Length", "42"),
    ]
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use super::{reference_scenarios, Scenario};
    pub use headerblock::prelude::*;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_scenarios_hold() {
        for scenario in reference_scenarios() {
            assert_eq!(scenario.run(), Ok(scenario.expect), "{}", scenario.name);
        }
    }

    #[test]
    fn scenario_builder_appends_values() {
        let scenario = Scenario::new("x", EngineConfig::new(), Decision::Allow)
            .with("Accept", "a")
            .with("Accept", "b");
        assert_eq!(scenario.headers.get_all("Accept"), ["a", "b"]);
    }

    #[test]
    fn unclosed_group_fails_build() {
        let scenario = Scenario::new(
            "unclosed",
            EngineConfig::new().block(HeaderPattern::name("(unclosed")),
            Decision::Deny,
        );
        let err = scenario.run().unwrap_err();
        assert_eq!(err.pattern(), Some("(unclosed"));
    }
}
