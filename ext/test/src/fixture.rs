//! Conformance test fixture runner
//!
//! Loads YAML fixtures and runs them against the headerblock engine.
//!
//! ```yaml
//! name: bot_blocking
//! description: block crawlers by user agent
//! config:
//!   requestHeaders:
//!     - header: User-Agent
//!       env: Googlebot
//! cases:
//!   - name: crawler
//!     headers:
//!       User-Agent: Googlebot/2.1
//!     expect: deny
//!     hit: User-Agent
//!   - name: repeated_header
//!     headers:
//!       Accept: [text/html, application/json]
//!     expect: allow
//! ```
//!
//! A fixture with `expect_error: true` must fail to build and has no cases.

use headerblock::prelude::*;
use serde::Deserialize;
use std::collections::BTreeMap;

/// A complete test fixture
#[derive(Debug, Deserialize)]
pub struct Fixture {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub config: EngineConfig,
    #[serde(default)]
    pub cases: Vec<TestCase>,
    #[serde(default)]
    pub expect_error: bool,
}

/// One header value or several
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum HeaderValues {
    One(String),
    Many(Vec<String>),
}

impl HeaderValues {
    fn into_vec(self) -> Vec<String> {
        match self {
            Self::One(v) => vec![v],
            Self::Many(vs) => vs,
        }
    }
}

/// Expected outcome of a case
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Expect {
    Allow,
    Deny,
}

impl From<Expect> for Decision {
    fn from(expect: Expect) -> Self {
        match expect {
            Expect::Allow => Decision::Allow,
            Expect::Deny => Decision::Deny,
        }
    }
}

/// Test case
#[derive(Debug, Deserialize)]
pub struct TestCase {
    pub name: String,
    #[serde(default)]
    pub headers: BTreeMap<String, HeaderValues>,
    pub expect: Expect,
    /// Header name the deciding rule must have matched.
    #[serde(default)]
    pub hit: Option<String>,
}

impl TestCase {
    /// Build the header set for this case
    pub fn build_headers(&self) -> BTreeMap<String, Vec<String>> {
        self.headers
            .iter()
            .map(|(name, values)| (name.clone(), values.clone().into_vec()))
            .collect()
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Runner
// ═══════════════════════════════════════════════════════════════════════════════

/// Result of running a single test case
#[derive(Debug)]
pub struct CaseResult {
    pub case_name: String,
    pub passed: bool,
    pub expected: Decision,
    pub actual: Decision,
    pub expected_hit: Option<String>,
    pub actual_hit: Option<String>,
}

impl Fixture {
    /// Parse a fixture from YAML
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Parse multiple fixtures from a YAML file with `---` separators
    pub fn from_yaml_multi(yaml: &str) -> Result<Vec<Self>, serde_yaml::Error> {
        let mut fixtures = Vec::new();
        for doc in serde_yaml::Deserializer::from_str(yaml) {
            fixtures.push(Self::deserialize(doc)?);
        }
        Ok(fixtures)
    }

    /// Build the engine and run all test cases
    ///
    /// # Errors
    ///
    /// Returns the build error if the config does not compile.
    pub fn run(&self) -> Result<Vec<CaseResult>, RuleError> {
        let engine = Engine::build(&self.config)?;
        Ok(self
            .cases
            .iter()
            .map(|case| {
                let trace = engine.explain(&case.build_headers());
                let expected = Decision::from(case.expect);
                let actual_hit = trace.hit.map(|h| h.header);
                let hit_ok = case.hit.is_none() || case.hit == actual_hit;
                CaseResult {
                    case_name: case.name.clone(),
                    passed: trace.decision == expected && hit_ok,
                    expected,
                    actual: trace.decision,
                    expected_hit: case.hit.clone(),
                    actual_hit,
                }
            })
            .collect())
    }

    /// Run all test cases and panic on first failure
    pub fn run_and_assert(&self) {
        match self.run() {
            Ok(_) if self.expect_error => {
                panic!("Fixture '{}' expected a build error", self.name);
            }
            Err(e) if !self.expect_error => {
                panic!("Fixture '{}' failed to build: {e}", self.name);
            }
            Err(_) => {}
            Ok(results) => {
                for result in results {
                    assert!(
                        result.passed,
                        "Fixture '{}' case '{}' failed: expected {} (hit {:?}), got {} (hit {:?})",
                        self.name,
                        result.case_name,
                        result.expected,
                        result.expected_hit,
                        result.actual,
                        result.actual_hit
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r"
name: inline
config:
  requestHeaders:
    - header: User-Agent
      env: Googlebot
cases:
  - name: crawler
    headers:
      User-Agent: Googlebot
    expect: deny
    hit: User-Agent
  - name: browser
    headers:
      User-Agent: [Firefox, Safari]
    expect: allow
";

    #[test]
    fn parses_and_runs() {
        let fixture = Fixture::from_yaml(FIXTURE).unwrap();
        assert_eq!(fixture.cases.len(), 2);
        assert!(!fixture.expect_error);
        assert_eq!(
            fixture.cases[1].build_headers()["User-Agent"],
            vec!["Firefox".to_string(), "Safari".to_string()]
        );

        let results = fixture.run().unwrap();
        assert!(results.iter().all(|r| r.passed));
    }

    #[test]
    fn wrong_hit_fails_case() {
        let yaml = FIXTURE.replace("hit: User-Agent", "hit: Accept");
        let results = Fixture::from_yaml(&yaml).unwrap().run().unwrap();
        assert!(!results[0].passed);
        assert_eq!(results[0].actual_hit.as_deref(), Some("User-Agent"));
    }

    #[test]
    fn multi_document() {
        let yaml = format!("{FIXTURE}---\nname: bad\nconfig:\n  requestHeaders:\n    - header: \"(\"\nexpect_error: true\n");
        let fixtures = Fixture::from_yaml_multi(&yaml).unwrap();
        assert_eq!(fixtures.len(), 2);
        assert!(fixtures[1].run().is_err());
        fixtures[1].run_and_assert();
    }
}
