//! Soft assertions
//!
//! Every check in a step is evaluated and recorded, even after an earlier
//! one failed, so the report shows the full picture for the step.

use std::fmt::Debug;

use reqwest::StatusCode;
use serde::Serialize;

/// Result of a single check
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckOutcome {
    pub passed: bool,
    /// What was checked
    pub description: String,
    /// Actual-vs-expected detail, only for failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Collector for the checks made by one step
#[derive(Debug, Default)]
pub struct Checks {
    outcomes: Vec<CheckOutcome>,
}

impl Checks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check the HTTP status code
    pub fn status(&mut self, actual: StatusCode, expected: StatusCode) -> bool {
        let detail = format!(
            "Expected status code {}, but got: {}",
            describe_status(expected),
            describe_status(actual)
        );
        self.record(
            actual == expected,
            format!("status is {}", expected.as_u16()),
            detail,
        )
    }

    /// Check that two values are equal
    pub fn equals<A, E>(&mut self, actual: A, expected: E, message: &str) -> bool
    where
        A: PartialEq<E> + Debug,
        E: Debug,
    {
        let passed = actual == expected;
        let detail = format!("{}: expected {:?}, got {:?}", message, expected, actual);
        self.record(passed, message.to_string(), detail)
    }

    /// Check an arbitrary condition
    pub fn that(&mut self, condition: bool, message: &str, detail: impl Into<String>) -> bool {
        self.record(condition, message.to_string(), detail.into())
    }

    /// Record an unconditional failure
    pub fn fail(&mut self, message: &str, detail: impl Into<String>) {
        self.record(false, message.to_string(), detail.into());
    }

    pub fn all_passed(&self) -> bool {
        self.outcomes.iter().all(|o| o.passed)
    }

    pub fn failed_count(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.passed).count()
    }

    pub fn into_outcomes(self) -> Vec<CheckOutcome> {
        self.outcomes
    }

    fn record(&mut self, passed: bool, description: String, detail: String) -> bool {
        self.outcomes.push(CheckOutcome {
            passed,
            description,
            detail: if passed { None } else { Some(detail) },
        });
        passed
    }
}

fn describe_status(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("{} {}", status.as_u16(), reason),
        None => status.as_u16().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failures_do_not_stop_later_checks() {
        let mut checks = Checks::new();
        assert!(!checks.status(StatusCode::NOT_FOUND, StatusCode::OK));
        assert!(checks.equals(Some("Successfully edited"), Some("Successfully edited"), "msg"));

        assert!(!checks.all_passed());
        assert_eq!(checks.failed_count(), 1);

        let outcomes = checks.into_outcomes();
        assert_eq!(outcomes.len(), 2);
        assert_eq!(
            outcomes[0].detail.as_deref(),
            Some("Expected status code 200 OK, but got: 404 Not Found")
        );
        assert!(outcomes[1].detail.is_none());
    }

    #[test]
    fn test_equals_reports_actual_and_expected() {
        let mut checks = Checks::new();
        checks.equals(None::<&str>, Some("Deleted successfully!"), "msg");
        let outcome = &checks.into_outcomes()[0];
        assert!(!outcome.passed);
        let detail = outcome.detail.as_deref().unwrap();
        assert!(detail.contains("Deleted successfully!"));
        assert!(detail.contains("None"));
    }

    #[test]
    fn test_empty_collector_passes() {
        assert!(Checks::new().all_passed());
    }

    #[test]
    fn test_fail_always_records_failure() {
        let mut checks = Checks::new();
        checks.fail("body is JSON", "expected value at line 1");
        assert_eq!(checks.failed_count(), 1);
    }
}
