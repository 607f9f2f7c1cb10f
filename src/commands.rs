//! CLI command definitions
//!
//! Defines the clap commands for the story harness CLI.

use clap::Subcommand;
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum Commands {
    /// Authenticate and run the ordered Story scenario
    Run {
        /// Configuration file (default: platform config dir)
        #[arg(long, short)]
        config: Option<PathBuf>,

        /// Base URL of the API under test
        #[arg(long, env = "STORY_HARNESS_BASE_URL")]
        base_url: Option<String>,

        /// Login user name
        #[arg(long, env = "STORY_HARNESS_USERNAME")]
        username: Option<String>,

        /// Login password
        #[arg(long, env = "STORY_HARNESS_PASSWORD", hide_env_values = true)]
        password: Option<String>,

        /// Print the report as JSON instead of the step list
        #[arg(long)]
        json: bool,

        /// Verbose output (raw response bodies, debug logging)
        #[arg(long, short)]
        verbose: bool,
    },

    /// Show the ordered step plan without running it
    Plan,

    /// Print the default configuration file location
    ConfigPath,
}

impl Commands {
    /// Whether the command asked for verbose output
    pub fn verbose(&self) -> bool {
        matches!(self, Commands::Run { verbose: true, .. })
    }
}
