//! `RuleSet`: Ordered rules with existential semantics
//!
//! A header set matches a `RuleSet` when ANY rule matches ANY header. Order
//! never changes the outcome, only which hit is reported and how soon the
//! sweep stops.

use crate::{CompiledRule, HeaderPattern, HeaderSource, RuleError, RuleHit};
use std::ops::ControlFlow;

/// An ordered, immutable sequence of [`CompiledRule`]s.
///
/// # Example
///
/// ```
/// use headerblock::{HeaderPattern, RequestHeaders, RuleSet};
///
/// let rules = RuleSet::compile(&[
///     HeaderPattern::new("^User-Agent$", "Googlebot"),
///     HeaderPattern::name("^X-Debug$"),
/// ])
/// .unwrap();
///
/// let headers = RequestHeaders::new().with("X-Debug", "1");
/// let hit = rules.find_match(&headers).unwrap();
/// assert_eq!(hit.rule_index, 1);
/// assert_eq!(hit.header, "X-Debug");
/// ```
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<CompiledRule>,
}

impl RuleSet {
    /// Create an empty rule set.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Compile every pattern, in order.
    ///
    /// Patterns with neither a name nor a value are kept as inert rules and
    /// reported with a `warn` log line.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::Rule`] wrapping the first pattern error, with the
    /// index of the offending pattern.
    pub fn compile(patterns: &[HeaderPattern]) -> Result<Self, RuleError> {
        let rules = patterns
            .iter()
            .enumerate()
            .map(|(index, pattern)| {
                if pattern.is_inert() {
                    log::warn!(
                        "rule #{index} has neither header nor env pattern and will never match"
                    );
                }
                pattern.compile().map_err(|e| RuleError::Rule {
                    index,
                    source: Box::new(e),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { rules })
    }

    /// Returns the number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns `true` if there are no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Iterate over the rules in order.
    pub fn iter(&self) -> std::slice::Iter<'_, CompiledRule> {
        self.rules.iter()
    }

    /// True when any rule matches the given header.
    pub fn matches_header<S: AsRef<str>>(&self, name: &str, values: &[S]) -> bool {
        self.rules.iter().any(|rule| rule.matches(name, values))
    }

    /// Sweep all headers against all rules and return the first hit.
    ///
    /// Headers are visited in the source's order; for each header the rules
    /// are tried in configuration order. The sweep stops at the first match.
    pub fn find_match<H: HeaderSource + ?Sized>(&self, headers: &H) -> Option<RuleHit> {
        if self.rules.is_empty() {
            return None;
        }

        let mut hit = None;
        let _ = headers.try_for_each_header(&mut |name, values| {
            match self.rules.iter().position(|rule| rule.matches(name, values)) {
                Some(rule_index) => {
                    hit = Some(RuleHit {
                        rule_index,
                        header: name.to_owned(),
                    });
                    ControlFlow::Break(())
                }
                None => ControlFlow::Continue(()),
            }
        });
        hit
    }

    /// True when any rule matches any header.
    pub fn matches<H: HeaderSource + ?Sized>(&self, headers: &H) -> bool {
        self.find_match(headers).is_some()
    }
}

impl FromIterator<CompiledRule> for RuleSet {
    fn from_iter<I: IntoIterator<Item = CompiledRule>>(iter: I) -> Self {
        Self {
            rules: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a CompiledRule;
    type IntoIter = std::slice::Iter<'a, CompiledRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}
