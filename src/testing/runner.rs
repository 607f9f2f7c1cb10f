//! Scenario runner
//!
//! Authenticates once, then drives every entry of `PLAN` in order through a
//! single session, threading `RunState` between steps. A failing step never
//! stops the loop; steps that need the created id short-circuit instead of
//! sending a request.

use colored::Colorize;

use crate::api::{
    obtain_token, ApiResponseEnvelope, AuthCredentials, ClientSession, StoryPayload, StoryRecord,
};
use crate::common::config::StoryFixtures;
use crate::common::Result;

use super::assertion::Checks;
use super::report::{RunReport, StepFailure, StepReport};
use super::state::RunState;
use super::steps::{BodySource, Contract, Effect, PathId, StepDescriptor, PLAN};

/// How the scenario is run and reported
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub fixtures: StoryFixtures,
    /// Require the listing to contain the edited title
    pub verify_listing_reflects_edit: bool,
    /// Print step lines to stdout while running
    pub print_progress: bool,
    /// Also print each raw response body
    pub verbose: bool,
}

/// Run the whole scenario against `base_url`
///
/// Returns `Err` only for setup failures (authentication, client
/// construction); in that case no step has run. Step failures are part of
/// the returned report.
pub async fn run(
    base_url: &str,
    credentials: &AuthCredentials,
    options: &RunOptions,
) -> Result<RunReport> {
    let base_url = base_url.trim_end_matches('/');
    let token = obtain_token(base_url, credentials).await?;
    let mut session = ClientSession::new(base_url, token)?;

    let report = run_steps(&mut session, options).await;

    tracing::info!(
        passed = report.passed_count(),
        failed = report.failed_count(),
        "scenario finished"
    );
    Ok(report)
}

/// Drive every step of the plan through an existing session
pub async fn run_steps(session: &mut ClientSession, options: &RunOptions) -> RunReport {
    let mut state = RunState::new();
    let mut report = RunReport::new(session.base_url());

    if options.print_progress {
        println!(
            "\n{} {}",
            "Running Story scenario against".blue().bold(),
            session.base_url().white().bold()
        );
        println!("\n{}", "Steps:".cyan());
    }

    for (i, step) in PLAN.iter().enumerate() {
        let step_report = execute_step(session, &mut state, step, i + 1, options).await;

        if let Some(failure) = &step_report.failure {
            tracing::warn!(step = step.name, %failure, "step failed");
        }
        if options.print_progress {
            step_report.print();
        }
        report.steps.push(step_report);
    }

    report
}

/// Execute a single step
async fn execute_step(
    session: &mut ClientSession,
    state: &mut RunState,
    step: &StepDescriptor,
    order: usize,
    options: &RunOptions,
) -> StepReport {
    let mut report = StepReport {
        order,
        name: step.name,
        request: None,
        status: None,
        checks: Vec::new(),
        failure: None,
    };

    let path = match step.id {
        PathId::None => step.resolve_path(None),
        PathId::Missing => step.resolve_path(Some(&options.fixtures.missing_story_id)),
        PathId::Created => match state.require_story_id(step.purpose) {
            Ok(id) => step.resolve_path(Some(id)),
            Err(failure) => {
                report.failure = Some(failure);
                return report;
            }
        },
    };
    report.request = Some(format!("{} {}", step.method, path));

    let empty = StoryPayload::empty();
    let body = match step.body {
        BodySource::None => None,
        BodySource::Create => Some(&options.fixtures.create),
        BodySource::Edit => Some(&options.fixtures.edit),
        BodySource::Empty => Some(&empty),
        BodySource::MissingEdit => Some(&options.fixtures.missing_edit),
    };

    let response = match session.execute(step.method.clone(), &path, body).await {
        Ok(response) => response,
        Err(e) => {
            report.failure = Some(StepFailure::Transport {
                message: e.to_string(),
            });
            return report;
        }
    };
    report.status = Some(response.status.as_u16());

    if options.verbose && options.print_progress {
        println!(
            "    {} {} {}",
            "←".dimmed(),
            response.status.as_u16().to_string().dimmed(),
            response.body.dimmed()
        );
    }

    let mut checks = Checks::new();
    checks.status(response.status, step.expected_status);

    let mut created_id = None;
    match step.contract {
        Contract::StatusOnly => {}
        Contract::Message(expected) => {
            if let Some(envelope) = parse_envelope(&mut checks, &response.body) {
                checks.equals(envelope.msg.as_deref(), Some(expected), "msg");
            }
        }
        Contract::Created(expected) => {
            if let Some(envelope) = parse_envelope(&mut checks, &response.body) {
                created_id = envelope.created_id().map(str::to_string);
                checks.that(
                    created_id.is_some(),
                    "storyId is present",
                    "Expected story ID to be returned, but it was null or empty.",
                );
                checks.equals(envelope.msg.as_deref(), Some(expected), "msg");
            }
        }
        Contract::NonEmptyList => {
            match serde_json::from_str::<Vec<StoryRecord>>(&response.body) {
                Ok(stories) => {
                    checks.that(
                        !stories.is_empty(),
                        "story list is not empty",
                        "Stories array should not be empty",
                    );
                    if options.verify_listing_reflects_edit {
                        if let Some(title) = state.edited_title() {
                            checks.that(
                                stories.iter().any(|s| s.title.as_deref() == Some(title)),
                                "story list contains the edited title",
                                format!("No story titled {:?} in the listing", title),
                            );
                        }
                    }
                }
                Err(e) => checks.fail(
                    "response is a list of stories",
                    format!("Could not parse story list: {}. Body: {}", e, response.body),
                ),
            }
        }
    }

    if checks.all_passed() {
        match step.effect {
            Effect::None => {}
            Effect::RecordCreated => {
                if let Some(id) = &created_id {
                    tracing::info!(story_id = %id, "story created");
                    state.record_created(id);
                }
            }
            Effect::RecordEdited => state.record_edited(&options.fixtures.edit.title),
            Effect::Invalidate => state.invalidate(),
        }
    } else {
        report.failure = Some(StepFailure::Assertion {
            failed: checks.failed_count(),
        });
    }

    report.checks = checks.into_outcomes();
    report
}

/// Decode a response envelope, recording a failed check if it is not one
fn parse_envelope(checks: &mut Checks, body: &str) -> Option<ApiResponseEnvelope> {
    match serde_json::from_str::<ApiResponseEnvelope>(body) {
        Ok(envelope) => Some(envelope),
        Err(e) => {
            checks.fail(
                "response is a JSON envelope",
                format!("Could not parse response envelope: {}. Body: {}", e, body),
            );
            None
        }
    }
}
