//! Decision trace types for debugging rule configurations.
//!
//! [`Engine::explain`](crate::Engine::explain) returns the same decision as
//! [`Engine::decide`](crate::Engine::decide) together with the rule and header
//! that produced it.
//!
//! # INV: `trace.decision` == `decide()` result
//!
//! `decide` is implemented on top of `explain`, so they cannot disagree.

use crate::{Decision, Mode};
use std::fmt;

/// The rule and header that settled a decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleHit {
    /// Index of the matching rule in the active list.
    pub rule_index: usize,
    /// Name of the header it matched, as the source presented it.
    pub header: String,
}

/// Full account of one decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecisionTrace {
    /// The policy mode that was active.
    pub mode: Mode,
    /// The outcome.
    pub decision: Decision,
    /// The first match found, if any.
    pub hit: Option<RuleHit>,
}

impl DecisionTrace {
    /// Human-readable reason, in the form used by the engine's log lines.
    #[must_use]
    pub fn reason(&self) -> String {
        match (self.mode, &self.hit) {
            (Mode::Allowlist, Some(hit)) => {
                format!("access allowed - whitelisted header: {}", hit.header)
            }
            (Mode::Allowlist, None) => "access denied - no matching whitelist headers".into(),
            (Mode::Blocklist, Some(hit)) => {
                format!("access denied - blocked header: {}", hit.header)
            }
            (Mode::Blocklist, None) => "access allowed - no rules matched".into(),
        }
    }
}

impl fmt::Display for DecisionTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} mode", self.decision, self.mode)?;
        if let Some(hit) = &self.hit {
            write!(f, ", rule #{} on {}", hit.rule_index, hit.header)?;
        }
        f.write_str(")")
    }
}
