//! `CompiledRule`: Runtime header matcher
//!
//! A pair of optional regexes evaluated against one header name and its values.
//! Patterns are passed to the `regex` crate verbatim: no anchoring, escaping or
//! case folding is added, so `User-Agent` also matches `X-User-Agent-Hint`.

use crate::{HeaderPattern, RuleError};
use regex::Regex;

/// A compiled header rule.
///
/// # Matching
///
/// | name matcher | value matcher | matches header when |
/// |--------------|---------------|---------------------|
/// | present      | absent        | name matches |
/// | present      | present       | name matches and some value matches |
/// | absent       | present       | some value matches (any name) |
/// | absent       | absent        | never |
///
/// # Example
///
/// ```
/// use headerblock::HeaderPattern;
///
/// let rule = HeaderPattern::new("^User-Agent$", "Googlebot").compile().unwrap();
/// assert!(rule.matches("User-Agent", &["Googlebot/2.1"]));
/// assert!(!rule.matches("User-Agent", &["Chrome"]));
/// assert!(!rule.matches("Referer", &["Googlebot"]));
/// ```
#[derive(Debug, Clone)]
pub struct CompiledRule {
    name: Option<Regex>,
    value: Option<Regex>,
}

impl CompiledRule {
    /// Compile a [`HeaderPattern`].
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::InvalidPattern`] for the first pattern (name, then
    /// value) that cannot be compiled, including one over the regex size limit.
    pub fn compile(pattern: &HeaderPattern) -> Result<Self, RuleError> {
        Ok(Self {
            name: pattern.name_pattern().map(compile_regex).transpose()?,
            value: pattern.value_pattern().map(compile_regex).transpose()?,
        })
    }

    /// The compiled name regex, if any.
    #[must_use]
    pub fn name_matcher(&self) -> Option<&Regex> {
        self.name.as_ref()
    }

    /// The compiled value regex, if any.
    #[must_use]
    pub fn value_matcher(&self) -> Option<&Regex> {
        self.value.as_ref()
    }

    /// True when the rule has no matcher at all and so can never match.
    #[must_use]
    pub fn is_inert(&self) -> bool {
        self.name.is_none() && self.value.is_none()
    }

    /// Check this rule against one header name and all of its values.
    pub fn matches<S: AsRef<str>>(&self, name: &str, values: &[S]) -> bool {
        let name_match = self.name.as_ref().is_some_and(|re| re.is_match(name));

        match &self.value {
            None => name_match,
            Some(value) if name_match || self.name.is_none() => {
                values.iter().any(|v| value.is_match(v.as_ref()))
            }
            Some(_) => false,
        }
    }
}

fn compile_regex(pattern: &str) -> Result<Regex, RuleError> {
    Regex::new(pattern).map_err(|e| RuleError::InvalidPattern {
        pattern: pattern.to_owned(),
        reason: e.to_string(),
    })
}
