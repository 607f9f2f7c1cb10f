//! Story harness - ordered integration tests for the Story HTTP API
//!
//! Authenticates once, then runs the create/edit/list/delete scenario and
//! its negative paths, reporting every step.

use clap::Parser;
use commands::Commands;
use story_harness::common::logging;
use story_harness::{cli, commands};

#[derive(Parser)]
#[command(name = "story-harness", about = "Ordered integration tests for the Story API")]
#[command(version, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    logging::init_cli(cli.command.verbose());

    if let Err(e) = cli::dispatch(cli.command).await {
        if e.is_setup_failure() {
            eprintln!("Setup failed, no steps were run: {e}");
        } else {
            eprintln!("Error: {e}");
        }
        std::process::exit(1);
    }
}
