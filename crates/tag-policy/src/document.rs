//! Policy document model and its wire format.
//!
//! The serialized shape is a contract with the governance system:
//!
//! ```text
//! {"tags": {"<Label>": {
//!     "tag_key":   {"@@assign": "<Label>"},
//!     "tag_value": {"@@assign": [..]},          // only when restricted
//!     "<applicability-field>": {"@@assign": ["<svc>:ALL_SUPPORTED", ..]}
//! }}}
//! ```
//!
//! Serialization is hand-written so that key order is always declaration
//! order; the output has to be byte-stable for the same input.

use std::fmt;
use std::sync::Arc;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::error::TagPolicyResult;
use crate::mode::EnforcementMode;

pub const TAGS_KEY: &str = "tags";
pub const TAG_KEY_FIELD: &str = "tag_key";
pub const TAG_VALUE_FIELD: &str = "tag_value";
pub const ASSIGN_OPERATOR: &str = "@@assign";

/// Number of hex characters used by [`DocumentFingerprint::short`].
const SHORT_FINGERPRINT_LEN: usize = 12;

/// One label's entry in the compiled document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyEntry {
    label: String,
    allowed_values: Option<Vec<String>>,
    applicability_field: &'static str,
    applicability: Arc<[String]>,
}

impl PolicyEntry {
    pub(crate) fn new(
        label: String,
        allowed_values: Option<Vec<String>>,
        applicability_field: &'static str,
        applicability: Arc<[String]>,
    ) -> Self {
        Self {
            label,
            allowed_values,
            applicability_field,
            applicability,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// `None` when the label accepts any value.
    pub fn allowed_values(&self) -> Option<&[String]> {
        self.allowed_values.as_deref()
    }

    pub fn applicability_field(&self) -> &'static str {
        self.applicability_field
    }

    pub fn applicability(&self) -> &[String] {
        &self.applicability
    }
}

/// Compiled tag policy. A value: built once, then serialized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyDocument {
    mode: EnforcementMode,
    entries: Vec<PolicyEntry>,
}

impl PolicyDocument {
    pub(crate) fn new(mode: EnforcementMode, entries: Vec<PolicyEntry>) -> Self {
        Self { mode, entries }
    }

    pub fn mode(&self) -> EnforcementMode {
        self.mode
    }

    pub fn entries(&self) -> &[PolicyEntry] {
        &self.entries
    }

    pub fn entry(&self, label: &str) -> Option<&PolicyEntry> {
        self.entries.iter().find(|e| e.label == label)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.label.as_str())
    }

    /// Compact JSON, as handed to the governance system.
    pub fn to_json(&self) -> TagPolicyResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> TagPolicyResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn to_value(&self) -> TagPolicyResult<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// BLAKE3 digest of the compact JSON form.
    pub fn fingerprint(&self) -> TagPolicyResult<DocumentFingerprint> {
        let mut hasher = blake3::Hasher::new();
        serde_json::to_writer(&mut hasher, self)?;
        Ok(DocumentFingerprint(hasher.finalize().to_hex().to_string()))
    }
}

/// Hex-encoded content hash of a compiled document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct DocumentFingerprint(String);

impl DocumentFingerprint {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn short(&self) -> &str {
        &self.0[..SHORT_FINGERPRINT_LEN.min(self.0.len())]
    }
}

impl fmt::Display for DocumentFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "blake3:{}", self.0)
    }
}

// ── Serialization ────────────────────────────────────────────────────

struct Assign<'a, T: ?Sized>(&'a T);

impl<T: Serialize + ?Sized> Serialize for Assign<'_, T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(ASSIGN_OPERATOR, self.0)?;
        map.end()
    }
}

impl Serialize for PolicyEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = if self.allowed_values.is_some() { 3 } else { 2 };
        let mut map = serializer.serialize_map(Some(len))?;
        map.serialize_entry(TAG_KEY_FIELD, &Assign(self.label.as_str()))?;
        if let Some(values) = &self.allowed_values {
            map.serialize_entry(TAG_VALUE_FIELD, &Assign(values.as_slice()))?;
        }
        map.serialize_entry(self.applicability_field, &Assign(&*self.applicability))?;
        map.end()
    }
}

struct Entries<'a>(&'a [PolicyEntry]);

impl Serialize for Entries<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for entry in self.0 {
            map.serialize_entry(entry.label.as_str(), entry)?;
        }
        map.end()
    }
}

impl Serialize for PolicyDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(TAGS_KEY, &Entries(&self.entries))?;
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens() -> Arc<[String]> {
        Arc::from(vec!["ec2:ALL_SUPPORTED".to_string()])
    }

    fn document(mode: EnforcementMode) -> PolicyDocument {
        let field = mode.applicability_field();
        PolicyDocument::new(
            mode,
            vec![
                PolicyEntry::new("Team".into(), Some(vec!["core".into()]), field, tokens()),
                PolicyEntry::new("Owner".into(), None, field, tokens()),
            ],
        )
    }

    #[test]
    fn serializes_in_entry_order() {
        let json = document(EnforcementMode::Enforce).to_json().unwrap();
        assert_eq!(
            json,
            concat!(
                r#"{"tags":{"Team":{"tag_key":{"@@assign":"Team"},"tag_value":{"@@assign":["core"]},"#,
                r#""enforced_for":{"@@assign":["ec2:ALL_SUPPORTED"]}},"#,
                r#""Owner":{"tag_key":{"@@assign":"Owner"},"enforced_for":{"@@assign":["ec2:ALL_SUPPORTED"]}}}}"#
            )
        );
    }

    #[test]
    fn unrestricted_entry_has_no_tag_value() {
        let value = document(EnforcementMode::Report).to_value().unwrap();
        assert!(value["tags"]["Owner"].get(TAG_VALUE_FIELD).is_none());
        assert!(value["tags"]["Team"].get(TAG_VALUE_FIELD).is_some());
    }

    #[test]
    fn fingerprint_is_stable_and_mode_sensitive() {
        let a = document(EnforcementMode::Report).fingerprint().unwrap();
        let b = document(EnforcementMode::Report).fingerprint().unwrap();
        let c = document(EnforcementMode::Enforce).fingerprint().unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.as_str().len(), 64);
        assert_eq!(a.short().len(), 12);
        assert!(a.to_string().starts_with("blake3:"));
    }

    #[test]
    fn entry_lookup() {
        let doc = document(EnforcementMode::Report);
        assert_eq!(doc.labels().collect::<Vec<_>>(), vec!["Team", "Owner"]);
        let team = doc.entry("Team").unwrap();
        assert_eq!(team.allowed_values().unwrap(), ["core"]);
        assert_eq!(team.applicability_field(), crate::mode::REPORT_FIELD);
        assert!(doc.entry("Missing").is_none());
    }
}
