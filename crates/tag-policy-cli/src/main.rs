//! tagpol - tag governance policy CLI
//!
//! Compiles a required-tags configuration into a tag policy document and
//! the plan an orchestration engine needs to publish and attach it:
//! - Compile the policy document (report or enforce mode)
//! - Plan the scope binding for an organizational root or unit
//! - Validate configuration before anything is handed off
//! - Inspect the default label set and the service catalog
//!
//! Nothing here talks to a cloud API.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tag_policy::PolicyPlanner;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod error;
mod output;

use commands::{compile, inspect, plan};
use error::CliResult;

/// tagpol CLI application
#[derive(Parser)]
#[command(name = "tagpol")]
#[command(about = "Tag governance policy compiler", long_about = None)]
#[command(version)]
struct Cli {
    /// Policy configuration file (.toml, .yaml, .yml or .json)
    #[arg(short, long, global = true, env = "TAGPOL_CONFIG")]
    config: Option<PathBuf>,

    /// Output format (table, json, yaml)
    #[arg(short, long, global = true, value_enum, default_value = "table")]
    output: output::OutputFormat,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand)]
enum Commands {
    /// Compile the tag policy document
    Compile(compile::CompileArgs),

    /// Compile and plan the binding to a target scope
    Plan(plan::PlanArgs),

    /// Validate configuration without emitting a document
    Validate(inspect::ValidateArgs),

    /// Show the built-in default label set
    Defaults,

    /// Show the resource service catalog
    Catalog,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries only command output
    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::print_error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> CliResult<()> {
    // Only commands that read the configuration load it
    let load = || config::load(cli.config.as_deref());
    let planner = PolicyPlanner::default();

    match cli.command {
        Commands::Compile(args) => compile::execute(args, load()?, &planner, cli.output),
        Commands::Plan(args) => plan::execute(args, load()?, &planner, cli.output),
        Commands::Validate(args) => inspect::validate(args, load()?, &planner, cli.output),
        Commands::Defaults => inspect::defaults(&planner, cli.output),
        Commands::Catalog => inspect::catalog(&load()?, cli.output),
    }
}
