//! `Policy`: Blocklist or allowlist, fixed at construction
//!
//! The mode is a tagged variant rather than a flag re-derived per request:
//! configuring at least one allow rule selects [`Policy::Allowlist`], and the
//! block rules are then dropped because they can never be consulted.

use crate::{RuleHit, RuleSet};
use std::fmt;

/// Which configuration list a rule came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleList {
    /// `requestHeaders`: matching denies.
    Block,
    /// `whitelistRequestHeaders`: matching allows.
    Allow,
}

impl fmt::Display for RuleList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Block => f.write_str("block"),
            Self::Allow => f.write_str("allow"),
        }
    }
}

/// Policy mode, without the rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Deny if any rule matches.
    Blocklist,
    /// Deny unless some rule matches.
    Allowlist,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Blocklist => f.write_str("blocklist"),
            Self::Allowlist => f.write_str("allowlist"),
        }
    }
}

/// The active policy and its rules.
#[derive(Debug, Clone)]
pub enum Policy {
    /// Deny when any rule matches any header, allow otherwise.
    Blocklist(RuleSet),
    /// Allow when any rule matches any header, deny otherwise.
    Allowlist(RuleSet),
}

impl Policy {
    /// Pick the mode from the two compiled lists.
    ///
    /// A non-empty `allow` set wins outright; `block` is discarded.
    #[must_use]
    pub fn select(block: RuleSet, allow: RuleSet) -> Self {
        if allow.is_empty() {
            Self::Blocklist(block)
        } else {
            if !block.is_empty() {
                log::debug!(
                    "allowlist mode: {} block rules will not be consulted",
                    block.len()
                );
            }
            Self::Allowlist(allow)
        }
    }

    /// The active mode.
    #[must_use]
    pub fn mode(&self) -> Mode {
        match self {
            Self::Blocklist(_) => Mode::Blocklist,
            Self::Allowlist(_) => Mode::Allowlist,
        }
    }

    /// The rules of the active mode.
    #[must_use]
    pub fn rules(&self) -> &RuleSet {
        match self {
            Self::Blocklist(rules) | Self::Allowlist(rules) => rules,
        }
    }

    /// First rule hit for these headers under the active rules.
    pub fn find_match<H: crate::HeaderSource + ?Sized>(&self, headers: &H) -> Option<RuleHit> {
        self.rules().find_match(headers)
    }
}

impl Default for Policy {
    fn default() -> Self {
        Self::Blocklist(RuleSet::empty())
    }
}
