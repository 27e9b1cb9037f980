//! Policy configuration.
//!
//! The shape of a configuration file once parsed. Loading the file itself
//! (and choosing the format) is left to the caller; everything here is plain
//! serde data plus the accessors that turn it into validated inputs.

use serde::{Deserialize, Serialize};

use crate::catalog::ServiceCatalog;
use crate::error::ConfigurationError;
use crate::requirements::RequiredTags;

pub const DEFAULT_POLICY_NAME: &str = "tag-governance-policy";
pub const DEFAULT_POLICY_DESCRIPTION: &str = "Organization-wide required tags policy";

/// Policy type understood by the governance system.
pub const TAG_POLICY_TYPE: &str = "TAG_POLICY";

/// Catalog version reported for catalogs supplied through configuration.
pub const CUSTOM_CATALOG_VERSION: &str = "custom";

/// Raw tag policy configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TagPolicyConfig {
    /// Required labels and their allowed values
    #[serde(default, alias = "requiredTags", skip_serializing_if = "Option::is_none")]
    pub required_tags: Option<RequiredTags>,

    /// `report` or `enforce`; absent means `report`
    #[serde(default, alias = "enforcementMode", skip_serializing_if = "Option::is_none")]
    pub enforcement_mode: Option<String>,

    /// Organizational root or unit to attach the policy to
    #[serde(default, alias = "targetScope", skip_serializing_if = "Option::is_none")]
    pub target_scope: Option<String>,

    #[serde(default, alias = "policyName", skip_serializing_if = "Option::is_none")]
    pub policy_name: Option<String>,

    #[serde(default, alias = "policyDescription", skip_serializing_if = "Option::is_none")]
    pub policy_description: Option<String>,

    /// Replaces the built-in service catalog
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub services: Option<Vec<String>>,
}

impl TagPolicyConfig {
    pub fn with_enforcement_mode(mut self, mode: impl Into<String>) -> Self {
        self.enforcement_mode = Some(mode.into());
        self
    }

    pub fn with_target_scope(mut self, scope: impl Into<String>) -> Self {
        self.target_scope = Some(scope.into());
        self
    }

    pub fn with_required_tags(mut self, tags: RequiredTags) -> Self {
        self.required_tags = Some(tags);
        self
    }

    /// The configured catalog, or the built-in one.
    pub fn catalog(&self) -> Result<ServiceCatalog, ConfigurationError> {
        match &self.services {
            Some(services) => ServiceCatalog::new(CUSTOM_CATALOG_VERSION, services.iter().cloned()),
            None => Ok(ServiceCatalog::default()),
        }
    }

    pub fn metadata(&self) -> Result<PolicyMetadata, ConfigurationError> {
        let name = self
            .policy_name
            .as_deref()
            .unwrap_or(DEFAULT_POLICY_NAME)
            .trim();
        if name.is_empty() {
            return Err(ConfigurationError::EmptyPolicyName);
        }
        Ok(PolicyMetadata {
            name: name.to_string(),
            description: self
                .policy_description
                .clone()
                .unwrap_or_else(|| DEFAULT_POLICY_DESCRIPTION.to_string()),
            policy_type: TAG_POLICY_TYPE,
        })
    }
}

/// Identity of the policy resource the document is published as.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PolicyMetadata {
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub policy_type: &'static str,
}
