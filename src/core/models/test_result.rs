//! Test result model
//!
//! A probe ends in one of three states: the capability is confirmed present,
//! confirmed absent, or the probe could not tell.

use serde::{Deserialize, Serialize};

/// Tri-state outcome of a capability probe
///
/// Serializes as `true` / `false` / `null`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<bool>", into = "Option<bool>")]
pub enum Status {
    /// Capability confirmed present
    Success,
    /// Capability confirmed absent
    Failure,
    /// Could not be determined (transport failure, ambiguous response)
    Inconclusive,
}

impl Status {
    /// The status as an optional boolean (`None` = inconclusive)
    #[must_use]
    pub const fn as_option(self) -> Option<bool> {
        match self {
            Self::Success => Some(true),
            Self::Failure => Some(false),
            Self::Inconclusive => None,
        }
    }
}

impl From<Option<bool>> for Status {
    fn from(value: Option<bool>) -> Self {
        match value {
            Some(true) => Self::Success,
            Some(false) => Self::Failure,
            None => Self::Inconclusive,
        }
    }
}

impl From<Status> for Option<bool> {
    fn from(status: Status) -> Self {
        status.as_option()
    }
}

impl std::str::FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "success" | "true" => Ok(Self::Success),
            "failure" | "false" => Ok(Self::Failure),
            "inconclusive" | "null" => Ok(Self::Inconclusive),
            _ => Err(format!(
                "Unknown status: {s}. Use 'success', 'failure' or 'inconclusive'"
            )),
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Failure => write!(f, "failure"),
            Self::Inconclusive => write!(f, "inconclusive"),
        }
    }
}

/// The outcome of one probe execution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestResult {
    /// Tri-state status
    pub status: Status,

    /// Human-readable explanation, mostly populated for failure/inconclusive
    pub info: String,
}

impl TestResult {
    /// Create a result
    pub fn new(status: Status, info: impl Into<String>) -> Self {
        Self {
            status,
            info: info.into(),
        }
    }

    /// Capability confirmed present
    pub fn success(info: impl Into<String>) -> Self {
        Self::new(Status::Success, info)
    }

    /// Capability confirmed absent
    pub fn failure(info: impl Into<String>) -> Self {
        Self::new(Status::Failure, info)
    }

    /// Undetermined
    pub fn inconclusive(info: impl Into<String>) -> Self {
        Self::new(Status::Inconclusive, info)
    }
}
