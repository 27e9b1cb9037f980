//! One full compilation pass.
//!
//! `PolicyPlanner` validates every input first, then compiles, then binds.
//! A [`DeploymentPlan`] is only ever constructed here, so its binding always
//! references the document it carries.

use serde::Serialize;
use tracing::info;

use crate::binding::{PolicyReference, ScopeBindingRequest, ScopeKind, TargetScope};
use crate::compiler::PolicyCompiler;
use crate::config::{PolicyMetadata, TagPolicyConfig};
use crate::document::{DocumentFingerprint, PolicyDocument};
use crate::error::{ConfigurationError, TagPolicyResult};
use crate::mode::{EnforcementMode, ResolvedMode};
use crate::requirements::{LabelRequirementSet, RequiredTags};

/// Informational summary of what a pass resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostics {
    pub label_keys: Vec<String>,
    pub mode: EnforcementMode,
    pub applicability_field: &'static str,
    pub service_count: usize,
    pub catalog_version: String,
    pub scope_kind: ScopeKind,
    pub fingerprint: DocumentFingerprint,
}

/// Everything the orchestration engine needs from one pass.
#[derive(Debug, Clone, Serialize)]
pub struct DeploymentPlan {
    policy: PlannedPolicy,
    binding: ScopeBindingRequest,
    diagnostics: Diagnostics,
}

#[derive(Debug, Clone, Serialize)]
struct PlannedPolicy {
    #[serde(flatten)]
    metadata: PolicyMetadata,
    content: PolicyDocument,
}

impl DeploymentPlan {
    pub fn metadata(&self) -> &PolicyMetadata {
        &self.policy.metadata
    }

    pub fn document(&self) -> &PolicyDocument {
        &self.policy.content
    }

    pub fn binding(&self) -> &ScopeBindingRequest {
        &self.binding
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }
}

/// Inputs that passed validation, ready to compile.
struct ValidatedInputs {
    requirements: LabelRequirementSet,
    mode: ResolvedMode,
    compiler: PolicyCompiler,
}

/// Runs the builder, resolver, compiler and binder in one pass.
#[derive(Debug, Clone)]
pub struct PolicyPlanner {
    defaults: RequiredTags,
}

impl Default for PolicyPlanner {
    fn default() -> Self {
        Self::new(RequiredTags::builtin_defaults())
    }
}

impl PolicyPlanner {
    /// `defaults` is used when the configuration names no required tags.
    pub fn new(defaults: RequiredTags) -> Self {
        Self { defaults }
    }

    pub fn defaults(&self) -> &RequiredTags {
        &self.defaults
    }

    /// Compile the document only, without a scope binding.
    pub fn compile(&self, config: &TagPolicyConfig) -> TagPolicyResult<PolicyDocument> {
        let inputs = self.validate(config)?;
        Ok(inputs.compiler.compile(&inputs.requirements, inputs.mode))
    }

    /// Full pass. `scope_override` takes precedence over
    /// `config.target_scope`; one of them must be present.
    pub fn plan(
        &self,
        config: &TagPolicyConfig,
        scope_override: Option<&str>,
    ) -> TagPolicyResult<DeploymentPlan> {
        let inputs = self.validate(config)?;
        let metadata = config.metadata()?;
        let target_scope = scope_override
            .or(config.target_scope.as_deref())
            .ok_or(ConfigurationError::EmptyTargetScope)
            .and_then(TargetScope::new)?;

        let document = inputs.compiler.compile(&inputs.requirements, inputs.mode);
        let fingerprint = document.fingerprint()?;
        let binding = ScopeBindingRequest::new(
            PolicyReference::pending(&metadata.name, &fingerprint),
            target_scope,
        );

        let catalog = inputs.compiler.catalog();
        let diagnostics = Diagnostics {
            label_keys: inputs.requirements.label_names(),
            mode: inputs.mode.mode,
            applicability_field: inputs.mode.applicability_field,
            service_count: catalog.len(),
            catalog_version: catalog.version().to_string(),
            scope_kind: binding.scope_kind(),
            fingerprint,
        };

        info!(
            policy = %metadata.name,
            scope = %binding.target_scope(),
            mode = %diagnostics.mode,
            labels = diagnostics.label_keys.len(),
            services = diagnostics.service_count,
            "planned tag policy"
        );

        Ok(DeploymentPlan {
            policy: PlannedPolicy {
                metadata,
                content: document,
            },
            binding,
            diagnostics,
        })
    }

    fn validate(&self, config: &TagPolicyConfig) -> TagPolicyResult<ValidatedInputs> {
        let requirements =
            LabelRequirementSet::from_config(config.required_tags.as_ref(), &self.defaults)?;
        let mode = EnforcementMode::resolve(config.enforcement_mode.as_deref())?;
        let compiler = PolicyCompiler::with_catalog(config.catalog()?);
        Ok(ValidatedInputs {
            requirements,
            mode,
            compiler,
        })
    }
}
