//! # tag-policy
//!
//! Compiles an organization-wide tag governance policy: which labels every
//! cloud resource must carry, which values those labels may take, and
//! whether violations are only reported or enforced.
//!
//! The crate is pure. It reads no files and calls no cloud API; it turns a
//! [`TagPolicyConfig`] into a [`PolicyDocument`] and a
//! [`ScopeBindingRequest`] that an orchestration engine then applies.
//!
//! ```
//! use tag_policy::{PolicyPlanner, RequiredTags, TagPolicyConfig};
//!
//! let config = TagPolicyConfig::default()
//!     .with_required_tags(RequiredTags::new().with_tag("Owner", Vec::<String>::new()))
//!     .with_enforcement_mode("enforce");
//! let plan = PolicyPlanner::default().plan(&config, Some("r-ab12")).unwrap();
//! assert!(plan.document().to_json().unwrap().contains("enforced_for"));
//! ```
//!
//! ## Invariants
//!
//! - Any configuration error aborts the pass; no partial document is built.
//! - Compiling the same inputs twice yields byte-identical JSON.
//! - The enforcement mode changes only the applicability field's name.

#![deny(unsafe_code)]

pub mod binding;
pub mod catalog;
pub mod compiler;
pub mod config;
pub mod document;
pub mod error;
pub mod mode;
pub mod plan;
pub mod requirements;

// ── Re-exports ──────────────────────────────────────────────────────

pub use binding::{PolicyReference, ScopeBindingRequest, ScopeKind, TargetScope};
pub use catalog::{ServiceCatalog, CATALOG_VERSION, DEFAULT_SERVICES};
pub use compiler::PolicyCompiler;
pub use config::{PolicyMetadata, TagPolicyConfig};
pub use document::{DocumentFingerprint, PolicyDocument, PolicyEntry};
pub use error::{ConfigurationError, TagPolicyError, TagPolicyResult};
pub use mode::{EnforcementMode, ResolvedMode, ENFORCE_FIELD, REPORT_FIELD};
pub use plan::{DeploymentPlan, Diagnostics, PolicyPlanner};
pub use requirements::{LabelRequirement, LabelRequirementSet, RequiredTags};
