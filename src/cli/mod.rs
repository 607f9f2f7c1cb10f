//! CLI command handling
//!
//! Resolves configuration, runs the scenario and formats output.

use colored::Colorize;

use crate::commands::Commands;
use crate::common::config::Config;
use crate::common::paths;
use crate::common::{Error, Result};
use crate::testing::{self, RunOptions, PLAN};

/// Dispatch a CLI command
pub async fn dispatch(command: Commands) -> Result<()> {
    match command {
        Commands::Run {
            config,
            base_url,
            username,
            password,
            json,
            verbose,
        } => {
            let mut cfg = Config::load(config.as_deref())?;
            cfg.apply_overrides(base_url, username, password);

            let base_url = cfg.base_url()?;
            let credentials = cfg.auth_credentials()?;
            let options = RunOptions {
                fixtures: cfg.fixtures.clone(),
                verify_listing_reflects_edit: cfg.checks.verify_listing_reflects_edit,
                print_progress: !json,
                verbose,
            };

            let report = testing::run(&base_url, &credentials, &options).await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                report.print_summary();
            }

            if report.all_passed() {
                Ok(())
            } else {
                Err(Error::ScenarioFailed {
                    failed: report.failed_count(),
                    total: report.steps.len(),
                })
            }
        }

        Commands::Plan => {
            print_plan();
            Ok(())
        }

        Commands::ConfigPath => {
            match paths::config_path() {
                Some(path) => println!("{}", path.display()),
                None => println!("No configuration directory available on this platform"),
            }
            Ok(())
        }
    }
}

fn print_plan() {
    println!("{}", "Story scenario steps:".cyan());
    for (i, step) in PLAN.iter().enumerate() {
        let needs = if step.requires_created_id() {
            " (needs created story id)"
        } else {
            ""
        };
        println!(
            "  {}. {:<28} {:<7} {:<28} expect {}{}",
            i + 1,
            step.name,
            step.method.as_str(),
            step.path,
            step.expected_status.as_u16(),
            needs.dimmed()
        );
    }
}
