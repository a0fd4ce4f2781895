//! `HeaderPattern`: Config-level header rule
//!
//! This type represents what the user wrote: an optional name regex and an
//! optional value regex. It compiles to a runtime [`CompiledRule`] via
//! [`compile()`](HeaderPattern::compile).
//!
//! # Naming: Pattern vs Rule
//!
//! - [`HeaderPattern`] = config-level description (strings)
//! - [`CompiledRule`] = runtime matcher (compiled regexes)
//!
//! Serialized keys are `header` (name) and `env` (value), the shape existing
//! middleware configurations already use.

use crate::{CompiledRule, RuleError};
use std::fmt;

/// A header rule as written in configuration.
///
/// An empty string is treated exactly like an absent pattern.
///
/// # Example
///
/// ```
/// use headerblock::HeaderPattern;
///
/// let both = HeaderPattern::new("^User-Agent$", "Googlebot");
/// let name_only = HeaderPattern::name("^X-Debug$");
/// let value_only = HeaderPattern::value("^evil$");
///
/// assert!(both.compile().is_ok());
/// assert_eq!(name_only.name_pattern(), Some("^X-Debug$"));
/// assert_eq!(value_only.name_pattern(), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeaderPattern {
    /// Regex matched against the header name.
    #[cfg_attr(
        feature = "serde",
        serde(rename = "header", default, skip_serializing_if = "Option::is_none")
    )]
    pub name: Option<String>,

    /// Regex matched against each of the header's values.
    #[cfg_attr(
        feature = "serde",
        serde(rename = "env", default, skip_serializing_if = "Option::is_none")
    )]
    pub value: Option<String>,
}

impl HeaderPattern {
    /// A rule constrained on both name and value.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            value: Some(value.into()),
        }
    }

    /// A rule matching on header name only, whatever the values.
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            value: None,
        }
    }

    /// A rule matching on value only, under any header name.
    pub fn value(value: impl Into<String>) -> Self {
        Self {
            name: None,
            value: Some(value.into()),
        }
    }

    /// The name pattern, or `None` when absent or empty.
    #[must_use]
    pub fn name_pattern(&self) -> Option<&str> {
        non_empty(self.name.as_deref())
    }

    /// The value pattern, or `None` when absent or empty.
    #[must_use]
    pub fn value_pattern(&self) -> Option<&str> {
        non_empty(self.value.as_deref())
    }

    /// True when neither pattern is set. Such a rule never matches.
    #[must_use]
    pub fn is_inert(&self) -> bool {
        self.name_pattern().is_none() && self.value_pattern().is_none()
    }

    /// Compile this pattern into a runtime [`CompiledRule`].
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::InvalidPattern`] if either regex is invalid.
    pub fn compile(&self) -> Result<CompiledRule, RuleError> {
        CompiledRule::compile(self)
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.is_empty())
}

impl fmt::Display for HeaderPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.name_pattern(), self.value_pattern()) {
            (Some(n), Some(v)) => write!(f, "header=\"{n}\" env=\"{v}\""),
            (Some(n), None) => write!(f, "header=\"{n}\""),
            (None, Some(v)) => write!(f, "env=\"{v}\""),
            (None, None) => f.write_str("(empty)"),
        }
    }
}
