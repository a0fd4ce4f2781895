//! `HttpHeaders`: `http::HeaderMap` as a [`HeaderSource`].
//!
//! `http` stores header names lowercased. Rules written against the
//! canonical MIME form (`User-Agent`, `Cf-Ipcountry`) would never match
//! `user-agent`, so by default names are presented canonicalized: the first
//! letter and every letter after a hyphen upper-cased, the rest lower-cased.
//! [`HttpHeaders::raw`] hands the names over exactly as stored instead.
//!
//! Values that are not valid UTF-8 are decoded lossily.

use headerblock::HeaderSource;
use http::HeaderMap;
use std::borrow::Cow;
use std::ops::ControlFlow;

/// How header names are presented to the rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NameCase {
    /// `Content-Type`, `X-Forwarded-For`.
    #[default]
    Canonical,
    /// As stored by `http`: `content-type`.
    Raw,
}

/// Borrowed view over an `http::HeaderMap`.
///
/// Each distinct name is visited once, with all of its values in insertion
/// order.
///
/// # Example
///
/// ```
/// use headerblock::prelude::*;
/// use headerblock_http::HttpHeaders;
///
/// let mut map = http::HeaderMap::new();
/// map.insert("user-agent", "Googlebot".parse().unwrap());
///
/// let engine = Engine::build(
///     &EngineConfig::new().block(HeaderPattern::new("^User-Agent$", "Googlebot")),
/// )
/// .unwrap();
///
/// assert_eq!(engine.decide(&HttpHeaders::canonical(&map)), Decision::Deny);
/// assert_eq!(engine.decide(&HttpHeaders::raw(&map)), Decision::Allow);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct HttpHeaders<'a> {
    map: &'a HeaderMap,
    case: NameCase,
}

impl<'a> HttpHeaders<'a> {
    /// View with canonical MIME header names.
    #[must_use]
    pub fn canonical(map: &'a HeaderMap) -> Self {
        Self::new(map, NameCase::Canonical)
    }

    /// View with names exactly as stored.
    #[must_use]
    pub fn raw(map: &'a HeaderMap) -> Self {
        Self::new(map, NameCase::Raw)
    }

    /// View with an explicit name case.
    #[must_use]
    pub fn new(map: &'a HeaderMap, case: NameCase) -> Self {
        Self { map, case }
    }
}

impl HeaderSource for HttpHeaders<'_> {
    fn try_for_each_header(
        &self,
        visit: &mut dyn FnMut(&str, &[&str]) -> ControlFlow<()>,
    ) -> ControlFlow<()> {
        for name in self.map.keys() {
            let decoded: Vec<Cow<'_, str>> = self
                .map
                .get_all(name)
                .iter()
                .map(|v| String::from_utf8_lossy(v.as_bytes()))
                .collect();
            let values: Vec<&str> = decoded.iter().map(AsRef::as_ref).collect();

            let name = match self.case {
                NameCase::Canonical => Cow::Owned(canonical_header_name(name.as_str())),
                NameCase::Raw => Cow::Borrowed(name.as_str()),
            };
            visit(&name, &values)?;
        }
        ControlFlow::Continue(())
    }

    fn header_count(&self) -> usize {
        self.map.keys_len()
    }
}

/// Canonical MIME form of a header name: `x-forwarded-for` → `X-Forwarded-For`.
///
/// Names containing a space or a non-ASCII byte are returned unchanged.
#[must_use]
pub fn canonical_header_name(name: &str) -> String {
    if name.bytes().any(|b| b == b' ' || !b.is_ascii()) {
        return name.to_owned();
    }

    let mut upper = true;
    name.chars()
        .map(|c| {
            let out = if upper {
                c.to_ascii_uppercase()
            } else {
                c.to_ascii_lowercase()
            };
            upper = c == '-';
            out
        })
        .collect()
}
