//! headerblock - regex header rules for inline HTTP request filtering
//!
//! An [`Engine`] inspects the full header set of a request and decides, before
//! the request reaches the next handler, whether to forward it or reject it.
//!
//! # Architecture
//!
//! - [`HeaderPattern`]: Config-level rule: optional name and value regex strings
//! - [`CompiledRule`]: Runtime rule: the same pair, compiled once
//! - [`RuleSet`]: Ordered rules with existential ("any rule matches") semantics
//! - [`Policy`]: Blocklist or allowlist, chosen once at construction
//! - [`HeaderSource`]: Anything that can hand over `(name, values)` pairs
//! - [`Engine`]: Immutable, shareable decision maker returning a [`Decision`]
//!
//! # Key Invariants
//!
//! 1. **Allowlist is authoritative**: once any allow rule is configured, the
//!    block rules are never consulted and a request without a matching header
//!    is denied.
//!
//! 2. **Compile once**: patterns are compiled at construction. `decide` never
//!    fails and never mutates the engine.
//!
//! 3. **Absent matcher never matches by name**: a rule without a name pattern
//!    only matches through its value pattern, on any header name.
//!
//! # Example
//!
//! ```
//! use headerblock::prelude::*;
//!
//! let config = EngineConfig::new().block(HeaderPattern::new("User-Agent", "Googlebot"));
//! let engine = Engine::build(&config).unwrap();
//!
//! let bot = RequestHeaders::new().with("User-Agent", "Googlebot/2.1");
//! assert_eq!(engine.decide(&bot), Decision::Deny);
//!
//! let browser = RequestHeaders::new().with("User-Agent", "Firefox");
//! assert_eq!(engine.decide(&browser), Decision::Allow);
//! ```

// ═══════════════════════════════════════════════════════════════════════════════
// Modules
// ═══════════════════════════════════════════════════════════════════════════════

mod config;
mod engine;
mod headers;
mod pattern;
mod policy;
mod rule;
mod rule_set;
mod trace;

// ═══════════════════════════════════════════════════════════════════════════════
// Public API
// ═══════════════════════════════════════════════════════════════════════════════

pub use config::EngineConfig;
pub use engine::{Decision, Engine};
pub use headers::{HeaderSource, RequestHeaders};
pub use pattern::HeaderPattern;
pub use policy::{Mode, Policy, RuleList};
pub use rule::CompiledRule;
pub use rule_set::RuleSet;
pub use trace::{DecisionTrace, RuleHit};

/// Prelude module for convenient imports.
///
/// ```
/// use headerblock::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        CompiledRule, Decision, DecisionTrace, Engine, EngineConfig, HeaderPattern, HeaderSource,
        Mode, Policy, RequestHeaders, RuleError, RuleHit, RuleList, RuleSet,
    };
}

// ═══════════════════════════════════════════════════════════════════════════════
// Errors
// ═══════════════════════════════════════════════════════════════════════════════

/// Errors from rule compilation and engine construction.
///
/// All of these surface before the first request is served. There is no
/// runtime error: [`Engine::decide`] always resolves to a [`Decision`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuleError {
    /// A name or value pattern is not a valid regular expression.
    #[error("invalid pattern \"{pattern}\": {reason}")]
    InvalidPattern {
        /// The pattern that failed to compile.
        pattern: String,
        /// The regex compiler's message.
        reason: String,
    },

    /// A rule at `index` failed to compile.
    #[error("rule #{index}: {source}")]
    Rule {
        /// Position of the rule in its list.
        index: usize,
        /// What went wrong with it.
        source: Box<RuleError>,
    },

    /// A rule list of the configuration failed to compile.
    #[error("{list} rules: {source}")]
    List {
        /// Which list the failing rule belongs to.
        list: RuleList,
        /// What went wrong in it.
        source: Box<RuleError>,
    },

    /// Configuration deserialization failed.
    #[error("invalid config: {reason}")]
    InvalidConfig {
        /// The deserializer's message.
        reason: String,
    },
}

impl RuleError {
    /// The innermost error, with list and index context stripped.
    #[must_use]
    pub fn root(&self) -> &RuleError {
        match self {
            Self::Rule { source, .. } | Self::List { source, .. } => source.root(),
            other => other,
        }
    }

    /// The offending pattern string, if this error is about a pattern.
    #[must_use]
    pub fn pattern(&self) -> Option<&str> {
        match self.root() {
            Self::InvalidPattern { pattern, .. } => Some(pattern),
            _ => None,
        }
    }
}
