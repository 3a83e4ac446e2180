//! Test definition model
//!
//! A definition is everything needed to run one probe: the fixture files to
//! stage below a subdirectory, the file to request, and the ordered rules that
//! turn the response into a [`Status`].
//!
//! Definitions can be written by hand (TOML or JSON) for custom tests:
//!
//! ```
//! use htcap::core::models::{Condition, Status, TestDefinition};
//!
//! let definition: TestDefinition = toml::from_str(r#"
//!     subdir = "my-rewrite"
//!     request = "0.txt"
//!
//!     [[files]]
//!     path = ".htaccess"
//!     content = "RewriteEngine On\nRewriteRule ^0\\.txt$ 1.txt [L]\n"
//!
//!     [[files]]
//!     path = "0.txt"
//!     content = "0"
//!
//!     [[files]]
//!     path = "1.txt"
//!     content = "1"
//!
//!     [[interpretation]]
//!     outcome = "success"
//!     condition = { test = "body-equals", value = "1" }
//! "#).unwrap();
//!
//! assert_eq!(definition.files.len(), 3);
//! assert_eq!(definition.interpretation[0].outcome, Status::Success);
//! assert_eq!(definition.interpretation[0].condition, Condition::BodyEquals { value: "1".into() });
//! ```

use std::path::{Component, Path};

use serde::{Deserialize, Serialize};

use super::Status;
use crate::error::ProbeError;

/// A fully caller-defined probe
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TestDefinition {
    /// Directory below the base dir (and base URL) the fixture lives in
    pub subdir: String,

    /// Files to stage, relative to `subdir`
    pub files: Vec<FixtureFile>,

    /// Path to request, relative to `subdir`; empty requests the directory itself
    #[serde(default)]
    pub request: String,

    /// Rules evaluated in order; the first matching rule decides
    #[serde(default)]
    pub interpretation: Vec<Interpretation>,
}

/// A file to write before the request is made
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FixtureFile {
    /// Path relative to the definition's subdir (e.g. `.htaccess`)
    pub path: String,
    /// File content
    pub content: String,
}

/// One interpretation rule: if `condition` holds, the result is `outcome`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Interpretation {
    /// Outcome when the condition matches
    #[serde(with = "outcome")]
    pub outcome: Status,

    /// What to look for in the response
    pub condition: Condition,

    /// Optional explanation reported as the result info
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// A predicate over an [`HttpResponse`](super::HttpResponse)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "test", rename_all = "kebab-case")]
pub enum Condition {
    /// Status code equals `value`
    StatusEquals {
        /// Expected status code
        value: u16,
    },
    /// Status code differs from `value`
    StatusNotEquals {
        /// Status code that must not be seen
        value: u16,
    },
    /// Trimmed body equals `value`
    BodyEquals {
        /// Expected body
        value: String,
    },
    /// Trimmed body differs from `value`
    BodyNotEquals {
        /// Body that must not be seen
        value: String,
    },
    /// Trimmed body starts with `value`
    BodyBeginsWith {
        /// Expected prefix
        value: String,
    },
    /// Body contains `value`
    BodyContains {
        /// Expected substring
        value: String,
    },
    /// Body does not contain `value`
    BodyNotContains {
        /// Substring that must not be seen
        value: String,
    },
    /// Body is empty or whitespace
    BodyIsEmpty,
    /// Body matches the regular expression `pattern`
    BodyMatches {
        /// Regular expression (regex crate syntax)
        pattern: String,
    },
    /// Header `name` is present
    HeaderExists {
        /// Header name, case-insensitive
        name: String,
    },
    /// Header `name` is absent
    HeaderMissing {
        /// Header name, case-insensitive
        name: String,
    },
    /// Header `name` equals `value`
    HeaderEquals {
        /// Header name, case-insensitive
        name: String,
        /// Expected value
        value: String,
    },
    /// Header `name` contains `value`
    HeaderContains {
        /// Header name, case-insensitive
        name: String,
        /// Expected substring of the value
        value: String,
    },
}

impl Interpretation {
    /// Create a rule without a note
    #[must_use]
    pub fn new(outcome: Status, condition: Condition) -> Self {
        Self {
            outcome,
            condition,
            note: None,
        }
    }

    /// Attach an explanation to the rule
    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

impl Condition {
    /// Short human-readable description, used in result info
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::StatusEquals { value } => format!("status code is {value}"),
            Self::StatusNotEquals { value } => format!("status code is not {value}"),
            Self::BodyEquals { value } => format!("body equals {value:?}"),
            Self::BodyNotEquals { value } => format!("body does not equal {value:?}"),
            Self::BodyBeginsWith { value } => format!("body begins with {value:?}"),
            Self::BodyContains { value } => format!("body contains {value:?}"),
            Self::BodyNotContains { value } => format!("body does not contain {value:?}"),
            Self::BodyIsEmpty => "body is empty".to_string(),
            Self::BodyMatches { pattern } => format!("body matches /{pattern}/"),
            Self::HeaderExists { name } => format!("header {name} is present"),
            Self::HeaderMissing { name } => format!("header {name} is missing"),
            Self::HeaderEquals { name, value } => format!("header {name} equals {value:?}"),
            Self::HeaderContains { name, value } => format!("header {name} contains {value:?}"),
        }
    }
}

impl TestDefinition {
    /// Check that the definition can be staged safely
    ///
    /// Paths must stay below the base directory. Runs before any I/O.
    pub fn validate(&self) -> Result<(), ProbeError> {
        check_relative("subdir", &self.subdir, false)?;
        if self.files.is_empty() {
            return Err(ProbeError::InvalidDefinition("no fixture files".to_string()));
        }
        for file in &self.files {
            check_relative("file path", &file.path, false)?;
        }
        check_relative("request", &self.request, true)?;
        for rule in &self.interpretation {
            if let Condition::BodyMatches { pattern } = &rule.condition {
                regex::Regex::new(pattern).map_err(|e| {
                    ProbeError::InvalidDefinition(format!("bad pattern /{pattern}/: {e}"))
                })?;
            }
        }
        Ok(())
    }
}

fn check_relative(what: &str, value: &str, allow_empty: bool) -> Result<(), ProbeError> {
    if value.is_empty() {
        if allow_empty {
            return Ok(());
        }
        return Err(ProbeError::InvalidDefinition(format!("{what} is empty")));
    }
    let escapes = Path::new(value)
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
    if escapes || value.starts_with('/') || value.contains('\\') {
        return Err(ProbeError::InvalidDefinition(format!(
            "{what} {value:?} must be a relative path without '..'"
        )));
    }
    Ok(())
}

/// (De)serialize an outcome as `success` / `failure` / `inconclusive`
mod outcome {
    use serde::{Deserialize, Deserializer, Serializer};

    use super::Status;

    pub fn serialize<S: Serializer>(status: &Status, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(status)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Status, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
