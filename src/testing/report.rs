//! Step and run reports

use colored::Colorize;
use serde::Serialize;

use super::assertion::CheckOutcome;

/// Why a step did not pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StepFailure {
    /// Required state from an earlier step was missing; no request was sent
    DependencyMissing { message: String },
    /// One or more checks failed; details are in the step's checks
    Assertion { failed: usize },
    /// No HTTP response was obtained
    Transport { message: String },
}

impl std::fmt::Display for StepFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StepFailure::DependencyMissing { message } => write!(f, "{}", message),
            StepFailure::Assertion { failed } => write!(f, "{} check(s) failed", failed),
            StepFailure::Transport { message } => write!(f, "{}", message),
        }
    }
}

/// Outcome of one step
#[derive(Debug, Clone, Serialize)]
pub struct StepReport {
    pub order: usize,
    pub name: &'static str,
    /// Request line, absent when the step short-circuited
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    pub checks: Vec<CheckOutcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<StepFailure>,
}

impl StepReport {
    pub fn passed(&self) -> bool {
        self.failure.is_none()
    }

    /// Print the step line and, on failure, every failed check
    pub fn print(&self) {
        let label = format!("Step {}: {}", self.order, self.name);
        let request = self.request.as_deref().unwrap_or("no request sent");
        match &self.failure {
            None => println!("  {} {} ({})", "✓".green(), label, request.dimmed()),
            Some(failure) => {
                println!("  {} {} ({}): {}", "✗".red(), label, request.dimmed(), failure);
                for check in self.checks.iter().filter(|c| !c.passed) {
                    let detail = check.detail.as_deref().unwrap_or(&check.description);
                    println!("      {} {}", "-".red(), detail);
                }
            }
        }
    }
}

/// Outcome of a full run
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub base_url: String,
    pub steps: Vec<StepReport>,
}

impl RunReport {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            steps: Vec::new(),
        }
    }

    pub fn passed_count(&self) -> usize {
        self.steps.iter().filter(|s| s.passed()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.steps.len() - self.passed_count()
    }

    pub fn all_passed(&self) -> bool {
        self.failed_count() == 0
    }

    /// Look up a step by name
    pub fn step(&self, name: &str) -> Option<&StepReport> {
        self.steps.iter().find(|s| s.name == name)
    }

    pub fn print_summary(&self) {
        if self.all_passed() {
            println!(
                "\n{} {}\n",
                "✓".green().bold(),
                format!("All {} steps passed", self.steps.len()).green().bold()
            );
        } else {
            println!(
                "\n{} {}\n",
                "✗".red().bold(),
                format!(
                    "{} of {} steps failed",
                    self.failed_count(),
                    self.steps.len()
                )
                .red()
                .bold()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(order: usize, failure: Option<StepFailure>) -> StepReport {
        StepReport {
            order,
            name: "edit_story",
            request: None,
            status: None,
            checks: Vec::new(),
            failure,
        }
    }

    #[test]
    fn test_counts() {
        let mut report = RunReport::new("http://localhost");
        report.steps.push(step(1, None));
        report.steps.push(step(
            2,
            Some(StepFailure::DependencyMissing {
                message: "No story ID available for editing.".to_string(),
            }),
        ));
        assert_eq!(report.passed_count(), 1);
        assert_eq!(report.failed_count(), 1);
        assert!(!report.all_passed());
    }

    #[test]
    fn test_failure_serializes_with_kind_tag() {
        let json = serde_json::to_value(StepFailure::Transport {
            message: "connection refused".to_string(),
        })
        .unwrap();
        assert_eq!(json["kind"], "transport");
        assert_eq!(json["message"], "connection refused");
    }
}
