//! Output formatting utilities

use colored::*;
use serde::Serialize;
use tabled::{Table, Tabled};

use crate::error::CliResult;

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// YAML format
    Yaml,
}

/// Print rows as a table, or the raw items as JSON/YAML
pub fn print_output<T: Serialize + Tabled>(data: Vec<T>, format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Table => {
            if data.is_empty() {
                println!("{}", "No results".dimmed());
            } else {
                println!("{}", Table::new(data));
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&data)?),
        OutputFormat::Yaml => print!("{}", serde_yaml::to_string(&data)?),
    }
    Ok(())
}

/// Print a single item; tables fall back to pretty JSON
pub fn print_single<T: Serialize>(data: &T, format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Table | OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(data)?)
        }
        OutputFormat::Yaml => print!("{}", serde_yaml::to_string(data)?),
    }
    Ok(())
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Print an error message
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red(), message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
    println!("{} {}", "⚠".yellow(), message);
}
