//! Policy document compiler.
//!
//! `PolicyCompiler` turns a validated [`LabelRequirementSet`] into a
//! [`PolicyDocument`]. It performs no validation of its own; everything it
//! receives has already been checked by the builder and the mode resolver.

use std::sync::Arc;

use tracing::debug;

use crate::catalog::ServiceCatalog;
use crate::document::{PolicyDocument, PolicyEntry};
use crate::mode::ResolvedMode;
use crate::requirements::LabelRequirementSet;

/// Compiles label requirements against a fixed service catalog.
#[derive(Debug, Clone, Default)]
pub struct PolicyCompiler {
    catalog: ServiceCatalog,
}

impl PolicyCompiler {
    /// Compiler over the built-in catalog.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_catalog(catalog: ServiceCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &ServiceCatalog {
        &self.catalog
    }

    /// Compile one document. Pure: the same inputs always produce the same
    /// document, entry for entry and byte for byte once serialized.
    pub fn compile(&self, requirements: &LabelRequirementSet, mode: ResolvedMode) -> PolicyDocument {
        // Shared by every entry.
        let applicability: Arc<[String]> = Arc::from(self.catalog.applicability_tokens());

        let entries: Vec<PolicyEntry> = requirements
            .iter()
            .map(|requirement| {
                let allowed = (!requirement.is_unrestricted())
                    .then(|| requirement.allowed_values().to_vec());
                PolicyEntry::new(
                    requirement.name().to_string(),
                    allowed,
                    mode.applicability_field,
                    Arc::clone(&applicability),
                )
            })
            .collect();

        debug!(
            labels = entries.len(),
            services = applicability.len(),
            mode = %mode.mode,
            field = mode.applicability_field,
            "compiled tag policy document"
        );

        PolicyDocument::new(mode.mode, entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mode::EnforcementMode;
    use crate::requirements::RequiredTags;

    fn requirements() -> LabelRequirementSet {
        let raw = RequiredTags::new()
            .with_tag("Environment", ["Dev", "Prod"])
            .with_tag("Owner", Vec::<String>::new());
        LabelRequirementSet::build(&raw).unwrap()
    }

    fn compiler() -> PolicyCompiler {
        PolicyCompiler::with_catalog(ServiceCatalog::new("test", ["ec2", "s3"]).unwrap())
    }

    #[test]
    fn compiles_reference_document_in_report_mode() {
        let mode = EnforcementMode::resolve(Some("report")).unwrap();
        let json = compiler().compile(&requirements(), mode).to_json().unwrap();
        assert_eq!(
            json,
            r#"{"tags":{"Environment":{"tag_key":{"@@assign":"Environment"},"tag_value":{"@@assign":["Dev","Prod"]},"*@@report_required_tag_for*":{"@@assign":["ec2:ALL_SUPPORTED","s3:ALL_SUPPORTED"]}},"Owner":{"tag_key":{"@@assign":"Owner"},"*@@report_required_tag_for*":{"@@assign":["ec2:ALL_SUPPORTED","s3:ALL_SUPPORTED"]}}}}"#
        );
    }

    #[test]
    fn enforce_mode_only_renames_applicability_field() {
        let report = compiler()
            .compile(&requirements(), EnforcementMode::Report.into())
            .to_json()
            .unwrap();
        let enforce = compiler()
            .compile(&requirements(), EnforcementMode::Enforce.into())
            .to_json()
            .unwrap();
        assert_ne!(report, enforce);
        assert_eq!(
            report.replace("*@@report_required_tag_for*", "enforced_for"),
            enforce
        );
    }

    #[test]
    fn entries_share_one_token_list() {
        let doc = compiler().compile(&requirements(), EnforcementMode::Report.into());
        let first = doc.entries()[0].applicability();
        let second = doc.entries()[1].applicability();
        assert_eq!(first, second);
        assert!(std::ptr::eq(first.as_ptr(), second.as_ptr()));
    }

    #[test]
    fn default_catalog_is_used_by_new() {
        let doc = PolicyCompiler::new().compile(&requirements(), EnforcementMode::Report.into());
        assert_eq!(
            doc.entries()[0].applicability().len(),
            crate::catalog::DEFAULT_SERVICES.len()
        );
    }

    #[test]
    fn empty_requirement_set_compiles_to_empty_tags() {
        let set = LabelRequirementSet::build(&RequiredTags::new()).unwrap();
        let json = compiler()
            .compile(&set, EnforcementMode::Report.into())
            .to_json()
            .unwrap();
        assert_eq!(json, r#"{"tags":{}}"#);
    }
}
