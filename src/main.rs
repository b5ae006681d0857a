// ABOUTME: Main entry point for konnektr-wizard
//
// Binary: konnektr-wizard
// Usage: konnektr-wizard <COMMAND>
// - steps: print the steps the creation wizard would show
// - walk: drive the wizard through scripted actions

#![allow(missing_docs)]

use anyhow::Result;
use clap::Parser;

use konnektr_wizard::cli::{self, Cli, Commands};
use konnektr_wizard::config::WizardConfig;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    let config = WizardConfig::load(args.config.as_deref())?;
    setup_logging(&config);

    match &args.command {
        Commands::Steps(flow_args) => cli::steps::execute(flow_args, &config, args.format),
        Commands::Walk(walk_args) => cli::walk::execute(walk_args, &config, args.format).await,
    }
}

fn setup_logging(config: &WizardConfig) {
    use tracing_subscriber::prelude::*;

    // Logs go to stderr so stdout stays machine-readable
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_filter));
    let registry = tracing_subscriber::registry().with(filter);

    if config.json_logs {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_writer(std::io::stderr)
                    .with_ansi(false),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
