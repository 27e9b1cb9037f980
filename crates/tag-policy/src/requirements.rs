//! Label requirements.
//!
//! [`RequiredTags`] is the raw, unvalidated mapping as it comes out of a
//! configuration file. It keeps declaration order and keeps duplicate keys,
//! so that [`LabelRequirementSet::build`] can reject them instead of a map
//! type silently collapsing them.

use std::collections::HashSet;
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::warn;

use crate::error::ConfigurationError;

/// Allowed values of the built-in `Environment` label.
pub const DEFAULT_ENVIRONMENT_VALUES: [&str; 3] = ["Development", "Staging", "Production"];

/// Labels the built-in default set requires without restricting values.
pub const DEFAULT_UNRESTRICTED_LABELS: [&str; 3] = ["Owner", "CostCenter", "Project"];

// ── Raw configuration ────────────────────────────────────────────────

/// Raw `label -> allowed values` mapping in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequiredTags(Vec<(String, Vec<String>)>);

impl RequiredTags {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// The built-in default set: `Environment` restricted to three values,
    /// `Owner`, `CostCenter` and `Project` unrestricted.
    pub fn builtin_defaults() -> Self {
        let mut tags = Self::new().with_tag("Environment", DEFAULT_ENVIRONMENT_VALUES);
        for label in DEFAULT_UNRESTRICTED_LABELS {
            tags = tags.with_tag(label, Vec::<String>::new());
        }
        tags
    }

    /// Append a label. Duplicates are kept.
    pub fn with_tag<N, I, V>(mut self, name: N, values: I) -> Self
    where
        N: Into<String>,
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        self.push(name, values);
        self
    }

    pub fn push<N, I, V>(&mut self, name: N, values: I)
    where
        N: Into<String>,
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        self.0
            .push((name.into(), values.into_iter().map(Into::into).collect()));
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}

impl<N, V> FromIterator<(N, Vec<V>)> for RequiredTags
where
    N: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (N, Vec<V>)>>(iter: T) -> Self {
        let mut tags = Self::new();
        for (name, values) in iter {
            tags.push(name, values);
        }
        tags
    }
}

impl Serialize for RequiredTags {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, values) in &self.0 {
            map.serialize_entry(name, values)?;
        }
        map.end()
    }
}

struct RequiredTagsVisitor;

impl<'de> Visitor<'de> for RequiredTagsVisitor {
    type Value = RequiredTags;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a mapping from label name to a list of allowed values")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((name, values)) = access.next_entry::<String, Option<Vec<String>>>()? {
            entries.push((name, values.unwrap_or_default()));
        }
        Ok(RequiredTags(entries))
    }
}

impl<'de> Deserialize<'de> for RequiredTags {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(RequiredTagsVisitor)
    }
}

// ── Validated requirements ───────────────────────────────────────────

/// A required label and its optional allow-list.
///
/// An empty allow-list means any non-empty value is accepted; the label
/// itself is still mandatory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelRequirement {
    name: String,
    allowed_values: Vec<String>,
}

impl LabelRequirement {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn allowed_values(&self) -> &[String] {
        &self.allowed_values
    }

    pub fn is_unrestricted(&self) -> bool {
        self.allowed_values.is_empty()
    }
}

/// Validated, immutable, ordered set of label requirements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelRequirementSet {
    requirements: Vec<LabelRequirement>,
}

impl LabelRequirementSet {
    /// Validate a raw mapping. The first violation in declaration order
    /// rejects the whole set.
    pub fn build(raw: &RequiredTags) -> Result<Self, ConfigurationError> {
        let mut seen = HashSet::with_capacity(raw.len());
        let mut requirements = Vec::with_capacity(raw.len());

        for (position, (name, values)) in raw.iter().enumerate() {
            if name.trim().is_empty() {
                return Err(ConfigurationError::EmptyLabelName { position });
            }
            if !seen.insert(name) {
                return Err(ConfigurationError::DuplicateLabel {
                    label: name.to_string(),
                });
            }
            if let Some(index) = values.iter().position(|v| v.trim().is_empty()) {
                return Err(ConfigurationError::EmptyAllowedValue {
                    label: name.to_string(),
                    index,
                });
            }
            requirements.push(LabelRequirement {
                name: name.to_string(),
                allowed_values: values.to_vec(),
            });
        }

        Ok(Self { requirements })
    }

    /// Validate `raw`, or `defaults` when `raw` is absent or empty.
    pub fn from_config(
        raw: Option<&RequiredTags>,
        defaults: &RequiredTags,
    ) -> Result<Self, ConfigurationError> {
        match raw {
            Some(tags) if !tags.is_empty() => Self::build(tags),
            _ => {
                warn!(
                    labels = defaults.len(),
                    "no required tags configured, using default label set"
                );
                Self::build(defaults)
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &LabelRequirement> {
        self.requirements.iter()
    }

    pub fn get(&self, name: &str) -> Option<&LabelRequirement> {
        self.requirements.iter().find(|r| r.name == name)
    }

    pub fn label_names(&self) -> Vec<String> {
        self.requirements.iter().map(|r| r.name.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.requirements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requirements.is_empty()
    }
}

impl<'a> IntoIterator for &'a LabelRequirementSet {
    type Item = &'a LabelRequirement;
    type IntoIter = std::slice::Iter<'a, LabelRequirement>;

    fn into_iter(self) -> Self::IntoIter {
        self.requirements.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RequiredTags {
        RequiredTags::new()
            .with_tag("Environment", ["Dev", "Prod"])
            .with_tag("Owner", Vec::<String>::new())
    }

    #[test]
    fn build_preserves_order_and_values() {
        let set = LabelRequirementSet::build(&sample()).unwrap();
        assert_eq!(set.label_names(), vec!["Environment", "Owner"]);

        let env = set.get("Environment").unwrap();
        assert_eq!(env.allowed_values(), ["Dev", "Prod"]);
        assert!(!env.is_unrestricted());
        assert!(set.get("Owner").unwrap().is_unrestricted());
    }

    #[test]
    fn empty_label_name_rejected() {
        let raw = sample().with_tag("   ", ["x"]);
        let err = LabelRequirementSet::build(&raw).unwrap_err();
        assert_eq!(err, ConfigurationError::EmptyLabelName { position: 2 });
    }

    #[test]
    fn duplicate_label_rejected() {
        let raw = sample().with_tag("Owner", ["alice"]);
        let err = LabelRequirementSet::build(&raw).unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::DuplicateLabel {
                label: "Owner".into()
            }
        );
    }

    #[test]
    fn duplicate_check_is_case_sensitive() {
        let raw = sample().with_tag("owner", Vec::<String>::new());
        let set = LabelRequirementSet::build(&raw).unwrap();
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn empty_allowed_value_rejected() {
        let raw = RequiredTags::new().with_tag("Environment", ["Dev", " ", "Prod"]);
        let err = LabelRequirementSet::build(&raw).unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::EmptyAllowedValue {
                label: "Environment".into(),
                index: 1
            }
        );
    }

    #[test]
    fn first_violation_wins() {
        let raw = RequiredTags::new()
            .with_tag("A", [""])
            .with_tag("A", ["x"]);
        let err = LabelRequirementSet::build(&raw).unwrap_err();
        assert!(matches!(err, ConfigurationError::EmptyAllowedValue { .. }));
    }

    #[test]
    fn absent_or_empty_config_falls_back_to_defaults() {
        let defaults = RequiredTags::builtin_defaults();
        let from_none = LabelRequirementSet::from_config(None, &defaults).unwrap();
        let from_empty =
            LabelRequirementSet::from_config(Some(&RequiredTags::new()), &defaults).unwrap();
        assert_eq!(from_none, from_empty);
        assert_eq!(
            from_none.label_names(),
            vec!["Environment", "Owner", "CostCenter", "Project"]
        );
        assert_eq!(from_none.get("Environment").unwrap().allowed_values().len(), 3);
        assert!(from_none.get("CostCenter").unwrap().is_unrestricted());
    }

    #[test]
    fn explicit_config_ignores_defaults() {
        let defaults = RequiredTags::builtin_defaults();
        let set = LabelRequirementSet::from_config(Some(&sample()), &defaults).unwrap();
        assert_eq!(set.len(), 2);
        assert!(set.get("Project").is_none());
    }

    #[test]
    fn deserialize_keeps_order_and_duplicates() {
        let raw: RequiredTags =
            serde_json::from_str(r#"{"Zeta": [], "Alpha": ["a"], "Zeta": ["z"]}"#).unwrap();
        let names: Vec<&str> = raw.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["Zeta", "Alpha", "Zeta"]);
        assert!(LabelRequirementSet::build(&raw).is_err());
    }

    #[test]
    fn deserialize_null_values_as_unrestricted() {
        let raw: RequiredTags = serde_json::from_str(r#"{"Owner": null}"#).unwrap();
        let set = LabelRequirementSet::build(&raw).unwrap();
        assert!(set.get("Owner").unwrap().is_unrestricted());
    }

    #[test]
    fn serialize_in_declaration_order() {
        let json = serde_json::to_string(&sample()).unwrap();
        assert_eq!(json, r#"{"Environment":["Dev","Prod"],"Owner":[]}"#);
    }
}
