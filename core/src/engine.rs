//! Engine: Allow/deny decisions over a request's full header set
//!
//! The engine is built once from an [`EngineConfig`] and then shared, read
//! only, by every request-handling thread. Nothing in it is mutated after
//! construction, so no locking is involved.

use crate::{
    DecisionTrace, EngineConfig, HeaderSource, Mode, Policy, RuleError, RuleList, RuleSet,
};
use std::fmt;

/// Outcome of evaluating one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Decision {
    /// Forward the request unchanged.
    Allow,
    /// Reject the request with the terminal status.
    Deny,
}

impl Decision {
    /// Returns `true` for [`Decision::Allow`].
    #[must_use]
    pub fn is_allow(self) -> bool {
        self == Self::Allow
    }

    /// Returns `true` for [`Decision::Deny`].
    #[must_use]
    pub fn is_deny(self) -> bool {
        self == Self::Deny
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Allow => f.write_str("allow"),
            Self::Deny => f.write_str("deny"),
        }
    }
}

/// Header filter decision engine.
///
/// # Decision order
///
/// 1. Allowlist mode (any allow rule configured): a hit allows, no hit
///    denies. Block rules are never consulted.
/// 2. Blocklist mode: a hit denies.
/// 3. Otherwise allow.
///
/// # Example
///
/// ```
/// use headerblock::prelude::*;
///
/// let config = EngineConfig::new().allow(HeaderPattern::new("Cf-Ipcountry", "VN"));
/// let engine = Engine::build(&config).unwrap();
///
/// assert_eq!(engine.decide(&RequestHeaders::new().with("Cf-Ipcountry", "VN")), Decision::Allow);
/// assert_eq!(engine.decide(&RequestHeaders::new().with("Cf-Ipcountry", "FR")), Decision::Deny);
/// assert_eq!(engine.decide(&RequestHeaders::new()), Decision::Deny);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Engine {
    policy: Policy,
    log: bool,
}

impl Engine {
    /// Compile both rule lists and select the policy mode.
    ///
    /// Both lists are compiled even when the allowlist makes the blocklist
    /// irrelevant, so a bad pattern anywhere in the config is reported.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::List`] naming the list, wrapping the index and the
    /// pattern error of the first rule that fails.
    pub fn build(config: &EngineConfig) -> Result<Self, RuleError> {
        let block = compile_list(RuleList::Block, &config.request_headers)?;
        let allow = compile_list(RuleList::Allow, &config.whitelist_request_headers)?;
        let engine = Self::from_rules(block, allow, config.log);

        log::debug!(
            "header filter ready: {} mode, {} active rules",
            engine.mode(),
            engine.policy.rules().len()
        );
        Ok(engine)
    }

    /// Build from already-compiled rule sets.
    #[must_use]
    pub fn from_rules(block: RuleSet, allow: RuleSet, log: bool) -> Self {
        Self {
            policy: Policy::select(block, allow),
            log,
        }
    }

    /// The active policy.
    #[must_use]
    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    /// The active mode.
    #[must_use]
    pub fn mode(&self) -> Mode {
        self.policy.mode()
    }

    /// Whether per-request log lines are emitted.
    #[must_use]
    pub fn logs_decisions(&self) -> bool {
        self.log
    }

    /// Decide on a header set.
    pub fn decide<H: HeaderSource + ?Sized>(&self, headers: &H) -> Decision {
        self.decide_for("-", headers)
    }

    /// Decide on a header set, naming the request (usually its URL) in the
    /// log line when logging is enabled. `target` never affects the outcome.
    pub fn decide_for<H: HeaderSource + ?Sized>(&self, target: &str, headers: &H) -> Decision {
        let trace = self.explain(headers);
        if self.log {
            log::info!("{target}: {}", trace.reason());
        }
        trace.decision
    }

    /// Decide and report which rule and header settled it.
    pub fn explain<H: HeaderSource + ?Sized>(&self, headers: &H) -> DecisionTrace {
        let hit = self.policy.find_match(headers);
        let decision = match (&self.policy, hit.is_some()) {
            (Policy::Allowlist(_), true) | (Policy::Blocklist(_), false) => Decision::Allow,
            (Policy::Allowlist(_), false) | (Policy::Blocklist(_), true) => Decision::Deny,
        };

        DecisionTrace {
            mode: self.mode(),
            decision,
            hit,
        }
    }
}

fn compile_list(
    list: RuleList,
    patterns: &[crate::HeaderPattern],
) -> Result<RuleSet, RuleError> {
    RuleSet::compile(patterns).map_err(|e| RuleError::List {
        list,
        source: Box::new(e),
    })
}
