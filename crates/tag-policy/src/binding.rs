//! Scope binding requests.
//!
//! A [`ScopeBindingRequest`] is a plan object: it tells the orchestration
//! engine which policy to attach where. Nothing here performs the attach.

use std::fmt;

use serde::Serialize;

use crate::document::DocumentFingerprint;
use crate::error::ConfigurationError;

/// Organizational root or sub-unit a policy is attached to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TargetScope(String);

impl TargetScope {
    /// Rejects empty and whitespace-only identifiers. Surrounding whitespace
    /// is trimmed.
    pub fn new(id: impl AsRef<str>) -> Result<Self, ConfigurationError> {
        let id = id.as_ref().trim();
        if id.is_empty() {
            return Err(ConfigurationError::EmptyTargetScope);
        }
        Ok(Self(id.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn kind(&self) -> ScopeKind {
        ScopeKind::classify(&self.0)
    }
}

impl fmt::Display for TargetScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Informational classification of a scope identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScopeKind {
    Root,
    OrganizationalUnit,
    Account,
    Other,
}

impl ScopeKind {
    fn classify(id: &str) -> Self {
        if id.starts_with("r-") {
            Self::Root
        } else if id.starts_with("ou-") {
            Self::OrganizationalUnit
        } else if id.len() == 12 && id.bytes().all(|b| b.is_ascii_digit()) {
            Self::Account
        } else {
            Self::Other
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Root => "root",
            Self::OrganizationalUnit => "organizational-unit",
            Self::Account => "account",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for ScopeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reference to the policy resource a binding attaches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PolicyReference(String);

impl PolicyReference {
    /// Placeholder used until the engine assigns an identifier:
    /// `pending:<policy-name>@<fingerprint-prefix>`.
    pub fn pending(policy_name: &str, fingerprint: &DocumentFingerprint) -> Self {
        Self(format!("pending:{}@{}", policy_name, fingerprint.short()))
    }

    /// Identifier assigned by the orchestration engine.
    pub fn assigned(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn is_pending(&self) -> bool {
        self.0.starts_with("pending:")
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PolicyReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Attach `policy_reference` to `target_scope`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScopeBindingRequest {
    policy_reference: PolicyReference,
    target_scope: TargetScope,
    #[serde(skip)]
    scope_kind: ScopeKind,
}

impl ScopeBindingRequest {
    pub fn new(policy_reference: PolicyReference, target_scope: TargetScope) -> Self {
        let scope_kind = target_scope.kind();
        Self {
            policy_reference,
            target_scope,
            scope_kind,
        }
    }

    pub fn policy_reference(&self) -> &PolicyReference {
        &self.policy_reference
    }

    pub fn target_scope(&self) -> &TargetScope {
        &self.target_scope
    }

    pub fn scope_kind(&self) -> ScopeKind {
        self.scope_kind
    }

    /// Swap the pending placeholder for the identifier the engine assigned.
    pub fn with_assigned_reference(self, id: impl Into<String>) -> Self {
        Self {
            policy_reference: PolicyReference::assigned(id),
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_scope_rejected() {
        assert_eq!(
            TargetScope::new("").unwrap_err(),
            ConfigurationError::EmptyTargetScope
        );
        assert_eq!(
            TargetScope::new(" \t").unwrap_err(),
            ConfigurationError::EmptyTargetScope
        );
    }

    #[test]
    fn scope_is_trimmed() {
        assert_eq!(TargetScope::new("  r-ab12 ").unwrap().as_str(), "r-ab12");
    }

    #[test]
    fn scope_kind_classification() {
        assert_eq!(TargetScope::new("r-ab12").unwrap().kind(), ScopeKind::Root);
        assert_eq!(
            TargetScope::new("ou-ab12-34cd56ef").unwrap().kind(),
            ScopeKind::OrganizationalUnit
        );
        assert_eq!(
            TargetScope::new("123456789012").unwrap().kind(),
            ScopeKind::Account
        );
        assert_eq!(TargetScope::new("sandbox").unwrap().kind(), ScopeKind::Other);
    }

    #[test]
    fn assigned_reference_replaces_pending() {
        let request = ScopeBindingRequest::new(
            PolicyReference::assigned("pending:tags@abc"),
            TargetScope::new("r-ab12").unwrap(),
        );
        assert!(request.policy_reference().is_pending());

        let request = request.with_assigned_reference("p-0123456789");
        assert!(!request.policy_reference().is_pending());
        assert_eq!(request.policy_reference().as_str(), "p-0123456789");
        assert_eq!(request.target_scope().as_str(), "r-ab12");
    }

    #[test]
    fn serializes_reference_and_scope_only() {
        let request = ScopeBindingRequest::new(
            PolicyReference::assigned("p-1"),
            TargetScope::new("ou-x").unwrap(),
        );
        assert_eq!(
            serde_json::to_string(&request).unwrap(),
            r#"{"policyReference":"p-1","targetScope":"ou-x"}"#
        );
    }
}
