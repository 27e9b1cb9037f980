//! Document compilation command

use std::path::PathBuf;

use clap::Args;
use tag_policy::{PolicyPlanner, TagPolicyConfig};

use crate::error::CliResult;
use crate::output::{print_success, OutputFormat};

/// Arguments for `tagpol compile`
#[derive(Debug, Args)]
pub struct CompileArgs {
    /// Enforcement mode (report or enforce), overrides the configuration file
    #[arg(short, long, env = "TAGPOL_ENFORCEMENT_MODE")]
    pub mode: Option<String>,

    /// Emit the document as a single line of JSON
    #[arg(long)]
    pub compact: bool,

    /// Write the document to this file instead of stdout
    #[arg(long)]
    pub out: Option<PathBuf>,
}

/// Compile the policy document and print or write it
pub fn execute(
    args: CompileArgs,
    config: TagPolicyConfig,
    planner: &PolicyPlanner,
    format: OutputFormat,
) -> CliResult<()> {
    let config = super::with_mode_override(config, args.mode);
    let document = planner.compile(&config)?;

    let rendered = match format {
        OutputFormat::Yaml => serde_yaml::to_string(&document)?,
        _ if args.compact => document.to_json()?,
        _ => document.to_json_pretty()?,
    };

    match args.out {
        Some(path) => {
            std::fs::write(&path, format!("{}\n", rendered.trim_end()))?;
            print_success(&format!(
                "wrote {} policy with {} labels to {}",
                document.mode(),
                document.entries().len(),
                path.display()
            ));
        }
        None => println!("{}", rendered.trim_end()),
    }
    Ok(())
}
