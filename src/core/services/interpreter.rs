//! Response interpretation
//!
//! Turns an [`HttpResponse`] into a [`TestResult`] by walking an ordered list
//! of [`Interpretation`] rules. This is pure logic with no I/O.

use regex::Regex;

use crate::core::models::{Condition, HttpResponse, Interpretation, TestResult};
use crate::error::ProbeError;

/// Maximum number of body characters quoted in result info
const EXCERPT_LEN: usize = 80;

/// Interpret a response against a rule list
///
/// 1. A transport failure (status `0`) is always inconclusive.
/// 2. The first matching rule decides the outcome.
/// 3. When nothing matches, the result is inconclusive.
pub fn interpret(
    response: &HttpResponse,
    rules: &[Interpretation],
) -> Result<TestResult, ProbeError> {
    if response.is_transport_failure() {
        return Ok(TestResult::inconclusive(format!(
            "request failed: {}",
            response.body_excerpt(EXCERPT_LEN * 2)
        )));
    }

    for rule in rules {
        if holds(&rule.condition, response)? {
            let info = rule.note.clone().unwrap_or_else(|| {
                format!("{} (status code: {})", rule.condition.describe(), response.status_code)
            });
            return Ok(TestResult::new(rule.outcome, info));
        }
    }

    Ok(TestResult::inconclusive(format!(
        "unexpected response (status code: {}, body: {:?})",
        response.status_code,
        response.body_excerpt(EXCERPT_LEN)
    )))
}

/// Whether `condition` holds for `response`
pub fn holds(condition: &Condition, response: &HttpResponse) -> Result<bool, ProbeError> {
    let body = response.body.trim();
    let matched = match condition {
        Condition::StatusEquals { value } => response.status_code == *value,
        Condition::StatusNotEquals { value } => response.status_code != *value,
        Condition::BodyEquals { value } => body == value.as_str(),
        Condition::BodyNotEquals { value } => body != value.as_str(),
        Condition::BodyBeginsWith { value } => body.starts_with(value.as_str()),
        Condition::BodyContains { value } => response.body.contains(value.as_str()),
        Condition::BodyNotContains { value } => !response.body.contains(value.as_str()),
        Condition::BodyIsEmpty => body.is_empty(),
        Condition::BodyMatches { pattern } => Regex::new(pattern)
            .map_err(|e| ProbeError::InvalidDefinition(format!("bad pattern /{pattern}/: {e}")))?
            .is_match(&response.body),
        Condition::HeaderExists { name } => response.header(name).is_some(),
        Condition::HeaderMissing { name } => response.header(name).is_none(),
        Condition::HeaderEquals { name, value } => {
            response.header(name).is_some_and(|v| v.trim() == value.as_str())
        },
        Condition::HeaderContains { name, value } => {
            response.header(name).is_some_and(|v| v.contains(value.as_str()))
        },
    };
    Ok(matched)
}
