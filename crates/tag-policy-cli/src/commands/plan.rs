//! Deployment planning command

use clap::Args;
use serde::Serialize;
use tabled::Tabled;
use tag_policy::{DeploymentPlan, PolicyPlanner, TagPolicyConfig};

use crate::error::CliResult;
use crate::output::{self, OutputFormat};

/// Arguments for `tagpol plan`
#[derive(Debug, Args)]
pub struct PlanArgs {
    /// Enforcement mode (report or enforce), overrides the configuration file
    #[arg(short, long, env = "TAGPOL_ENFORCEMENT_MODE")]
    pub mode: Option<String>,

    /// Organizational root or unit to attach the policy to
    #[arg(short, long, env = "TAGPOL_TARGET_SCOPE")]
    pub target_scope: Option<String>,
}

/// Table row for plan display
#[derive(Debug, Serialize, Tabled)]
struct PlanRow {
    /// Plan field
    field: &'static str,
    /// Resolved value
    value: String,
}

impl PlanRow {
    fn new(field: &'static str, value: impl ToString) -> Self {
        Self {
            field,
            value: value.to_string(),
        }
    }
}

fn plan_rows(plan: &DeploymentPlan) -> Vec<PlanRow> {
    let diagnostics = plan.diagnostics();
    vec![
        PlanRow::new("policy", &plan.metadata().name),
        PlanRow::new("type", plan.metadata().policy_type),
        PlanRow::new("reference", plan.binding().policy_reference()),
        PlanRow::new("target scope", plan.binding().target_scope()),
        PlanRow::new("scope kind", diagnostics.scope_kind),
        PlanRow::new("mode", diagnostics.mode),
        PlanRow::new("applicability field", diagnostics.applicability_field),
        PlanRow::new("labels", diagnostics.label_keys.join(", ")),
        PlanRow::new(
            "services",
            format!(
                "{} (catalog {})",
                diagnostics.service_count, diagnostics.catalog_version
            ),
        ),
        PlanRow::new("fingerprint", &diagnostics.fingerprint),
    ]
}

/// Build the deployment plan and print it
pub fn execute(
    args: PlanArgs,
    config: TagPolicyConfig,
    planner: &PolicyPlanner,
    format: OutputFormat,
) -> CliResult<()> {
    let config = super::with_mode_override(config, args.mode);
    let plan = planner.plan(&config, args.target_scope.as_deref())?;

    match format {
        OutputFormat::Table => output::print_output(plan_rows(&plan), format),
        _ => output::print_single(&plan, format),
    }
}
