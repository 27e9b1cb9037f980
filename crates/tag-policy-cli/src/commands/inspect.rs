//! Validation and introspection commands

use clap::Args;
use serde::Serialize;
use tabled::Tabled;
use tag_policy::{
    EnforcementMode, PolicyPlanner, RequiredTags, ServiceCatalog, TagPolicyConfig, TagPolicyError,
};

use crate::error::CliResult;
use crate::output::{self, print_success, print_warning, OutputFormat};

/// Arguments for `tagpol validate`
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Enforcement mode (report or enforce), overrides the configuration file
    #[arg(short, long, env = "TAGPOL_ENFORCEMENT_MODE")]
    pub mode: Option<String>,
}

/// Table row for label display
#[derive(Debug, Serialize, Tabled)]
struct LabelRow {
    /// Label name
    label: String,
    /// Restricted or unrestricted
    restriction: &'static str,
    /// Allowed values, comma separated
    allowed_values: String,
}

/// Table row for catalog display
#[derive(Debug, Serialize, Tabled)]
struct ServiceRow {
    /// Service identifier
    service: String,
    /// Applicability token emitted for the service
    token: String,
}

#[derive(Debug, Serialize)]
struct ValidationSummary {
    valid: bool,
    labels: Vec<String>,
    mode: EnforcementMode,
    services: usize,
}

fn label_rows(tags: &RequiredTags) -> Vec<LabelRow> {
    tags.iter()
        .map(|(label, values)| LabelRow {
            label: label.to_string(),
            restriction: if values.is_empty() {
                "any value"
            } else {
                "allow-list"
            },
            allowed_values: values.join(", "),
        })
        .collect()
}

fn service_rows(catalog: &ServiceCatalog) -> Vec<ServiceRow> {
    catalog
        .services()
        .iter()
        .zip(catalog.applicability_tokens())
        .map(|(service, token)| ServiceRow {
            service: service.clone(),
            token,
        })
        .collect()
}

/// Validate the configuration without emitting a document
pub fn validate(
    args: ValidateArgs,
    config: TagPolicyConfig,
    planner: &PolicyPlanner,
    format: OutputFormat,
) -> CliResult<()> {
    let config = super::with_mode_override(config, args.mode);
    let document = planner.compile(&config)?;
    let services = config.catalog().map_err(TagPolicyError::from)?.len();

    let summary = ValidationSummary {
        valid: true,
        labels: document.labels().map(str::to_string).collect(),
        mode: document.mode(),
        services,
    };

    match format {
        OutputFormat::Table => {
            print_success(&format!(
                "configuration valid: {} labels, {} services, mode {}",
                summary.labels.len(),
                summary.services,
                summary.mode
            ));
            if summary.mode.is_blocking() {
                print_warning("enforce mode blocks operations on non-compliant resources");
            }
            Ok(())
        }
        _ => output::print_single(&summary, format),
    }
}

/// Show the built-in default label set
pub fn defaults(planner: &PolicyPlanner, format: OutputFormat) -> CliResult<()> {
    output::print_output(label_rows(planner.defaults()), format)
}

/// Show the service catalog the configuration resolves to
pub fn catalog(config: &TagPolicyConfig, format: OutputFormat) -> CliResult<()> {
    let catalog = config.catalog().map_err(TagPolicyError::from)?;
    output::print_output(service_rows(&catalog), format)
}
