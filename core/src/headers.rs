//! `HeaderSource`: Header multimap access for the engine
//!
//! The engine never owns request data. Anything that can walk its headers as
//! `(name, values)` pairs can be decided on: the owned [`RequestHeaders`]
//! multimap below, plain `HashMap`/`BTreeMap` multimaps, or a transport's own
//! header type (see the `headerblock-http` crate for `http::HeaderMap`).
//!
//! Header name case is the transport's business. Names are handed to the
//! rules exactly as the source stores them.

use std::collections::{BTreeMap, HashMap};
use std::ops::ControlFlow;

/// Walks a request's headers, one call per distinct name.
///
/// `visit` receives the header name and every value recorded for it, in
/// order. Returning [`ControlFlow::Break`] stops the walk early and the
/// implementation must return `Break` as well.
///
/// # Thread Safety
///
/// The trait itself has no `Send`/`Sync` bound. The engine only borrows the
/// source for the duration of one call.
///
/// # Example
///
/// ```
/// use headerblock::HeaderSource;
/// use std::ops::ControlFlow;
///
/// struct Single(&'static str, &'static str);
///
/// impl HeaderSource for Single {
///     fn try_for_each_header(
///         &self,
///         visit: &mut dyn FnMut(&str, &[&str]) -> ControlFlow<()>,
///     ) -> ControlFlow<()> {
///         visit(self.0, &[self.1])
///     }
/// }
///
/// assert_eq!(Single("Host", "example.com").header_count(), 1);
/// ```
pub trait HeaderSource {
    /// Call `visit` for each header name with all of its values.
    fn try_for_each_header(
        &self,
        visit: &mut dyn FnMut(&str, &[&str]) -> ControlFlow<()>,
    ) -> ControlFlow<()>;

    /// Number of distinct header names.
    fn header_count(&self) -> usize {
        let mut count = 0;
        let _ = self.try_for_each_header(&mut |_, _| {
            count += 1;
            ControlFlow::Continue(())
        });
        count
    }
}

impl<H: HeaderSource + ?Sized> HeaderSource for &H {
    fn try_for_each_header(
        &self,
        visit: &mut dyn FnMut(&str, &[&str]) -> ControlFlow<()>,
    ) -> ControlFlow<()> {
        (**self).try_for_each_header(visit)
    }
}

fn visit_owned<'a, I>(
    entries: I,
    visit: &mut dyn FnMut(&str, &[&str]) -> ControlFlow<()>,
) -> ControlFlow<()>
where
    I: IntoIterator<Item = (&'a String, &'a Vec<String>)>,
{
    for (name, values) in entries {
        let values: Vec<&str> = values.iter().map(String::as_str).collect();
        visit(name, &values)?;
    }
    ControlFlow::Continue(())
}

impl HeaderSource for HashMap<String, Vec<String>> {
    fn try_for_each_header(
        &self,
        visit: &mut dyn FnMut(&str, &[&str]) -> ControlFlow<()>,
    ) -> ControlFlow<()> {
        visit_owned(self, visit)
    }

    fn header_count(&self) -> usize {
        self.len()
    }
}

impl HeaderSource for BTreeMap<String, Vec<String>> {
    fn try_for_each_header(
        &self,
        visit: &mut dyn FnMut(&str, &[&str]) -> ControlFlow<()>,
    ) -> ControlFlow<()> {
        visit_owned(self, visit)
    }

    fn header_count(&self) -> usize {
        self.len()
    }
}

/// Owned, insertion-ordered header multimap.
///
/// A name may carry several values; adding a value under a name that is
/// already present appends to it. Names are compared exactly.
///
/// # Example
///
/// ```
/// use headerblock::RequestHeaders;
///
/// let headers = RequestHeaders::new()
///     .with("Accept", "text/html")
///     .with("Accept", "application/json")
///     .with("Host", "example.com");
///
/// assert_eq!(headers.len(), 2);
/// assert_eq!(headers.get_all("Accept"), &["text/html", "application/json"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestHeaders {
    entries: Vec<(String, Vec<String>)>,
}

impl RequestHeaders {
    /// Create an empty header set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a value (builder pattern).
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.append(name, value);
        self
    }

    /// Add a value, keeping any values already recorded under `name`.
    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, values)) => values.push(value),
            None => self.entries.push((name, vec![value])),
        }
    }

    /// All values recorded under `name`, empty if the header is absent.
    #[must_use]
    pub fn get_all(&self, name: &str) -> &[String] {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, values)| values.as_slice())
            .unwrap_or_default()
    }

    /// Number of distinct header names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no header is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(name, values)` in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }
}

impl<N: Into<String>, V: Into<String>> FromIterator<(N, V)> for RequestHeaders {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut headers = Self::new();
        for (name, value) in iter {
            headers.append(name, value);
        }
        headers
    }
}

impl HeaderSource for RequestHeaders {
    fn try_for_each_header(
        &self,
        visit: &mut dyn FnMut(&str, &[&str]) -> ControlFlow<()>,
    ) -> ControlFlow<()> {
        visit_owned(self.entries.iter().map(|(n, v)| (n, v)), visit)
    }

    fn header_count(&self) -> usize {
        self.len()
    }
}
