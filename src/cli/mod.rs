// ABOUTME: CLI argument parsing and command routing for konnektr-wizard
//
// Provides command-line access to the creation wizard:
// - Printing the derived steps for an entry URL (steps)
// - Walking the wizard through a scripted sequence of actions (walk)

pub mod script;
pub mod steps;
pub mod walk;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::config::WizardConfig;
use crate::wizard::{BillingSignal, EntryParams, FlowContext, FlowController};

/// Drive the Konnektr resource-creation wizard from the terminal
#[derive(Parser)]
#[command(name = "konnektr-wizard")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Config file (defaults to ~/.konnektr/wizard.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

/// Output format for commands
#[derive(Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Print the steps the wizard would show
    Steps(FlowArgs),

    /// Apply a scripted sequence of actions and print each resulting state
    Walk(WalkArgs),
}

/// Billing status as reported by the billing service
#[derive(Clone, Copy, Default, ValueEnum)]
pub enum BillingArg {
    /// Status still loading
    Loading,
    /// No payment method on file
    Missing,
    /// Payment method on file
    #[default]
    Present,
}

impl From<BillingArg> for BillingSignal {
    fn from(arg: BillingArg) -> Self {
        match arg {
            BillingArg::Loading => BillingSignal::loading(),
            BillingArg::Missing => BillingSignal::loaded(false),
            BillingArg::Present => BillingSignal::loaded(true),
        }
    }
}

/// Context the wizard is opened in
#[derive(clap::Args)]
pub struct FlowArgs {
    /// Entry URL or query string (resourceType, sku/tier, projectId)
    #[arg(long, short, default_value = "")]
    pub query: String,

    /// Project fixed by the route
    #[arg(long)]
    pub project: Option<String>,

    /// Whether the user already owns projects
    #[arg(long)]
    pub has_projects: bool,

    /// Billing status of the active project
    #[arg(long, default_value = "present")]
    pub billing: BillingArg,
}

impl FlowArgs {
    /// Build a controller for these arguments
    pub fn controller(&self, config: &WizardConfig) -> FlowController {
        let context = FlowContext {
            fixed_project_id: self.project.clone(),
            has_existing_projects: self.has_projects,
            billing: self.billing.into(),
        };
        FlowController::new(context, EntryParams::from_query(&self.query), config.catalog())
            .with_default_sku(&config.default_sku)
    }
}

/// Arguments for the walk command
#[derive(clap::Args)]
pub struct WalkArgs {
    #[command(flatten)]
    pub flow: FlowArgs,

    /// Action to apply, repeatable: project:<id>, type:<id>, name:<text>,
    /// id:<text>, sku:<sku>, settings:<json>, next, back, skip, goto:<step>,
    /// payment, create
    #[arg(long = "action", short = 'a', required = true)]
    pub actions: Vec<String>,
}
