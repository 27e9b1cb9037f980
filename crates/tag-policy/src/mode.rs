//! Enforcement mode resolution.
//!
//! The resolver is strict: only the exact literals `report` and `enforce`
//! are accepted. Defaulting to [`EnforcementMode::Report`] happens only when
//! no value was given at all.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::ConfigurationError;

/// Applicability field used in `report` mode.
pub const REPORT_FIELD: &str = "*@@report_required_tag_for*";

/// Applicability field used in `enforce` mode.
pub const ENFORCE_FIELD: &str = "enforced_for";

/// Whether violations are only reported or also block the operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EnforcementMode {
    /// Violations are surfaced, operations proceed.
    #[default]
    Report,
    /// Violations block the operation.
    Enforce,
}

impl EnforcementMode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Report => "report",
            Self::Enforce => "enforce",
        }
    }

    /// Document field that carries the applicability token list.
    pub const fn applicability_field(self) -> &'static str {
        match self {
            Self::Report => REPORT_FIELD,
            Self::Enforce => ENFORCE_FIELD,
        }
    }

    pub const fn is_blocking(self) -> bool {
        matches!(self, Self::Enforce)
    }

    /// Resolve an optional raw mode string.
    pub fn resolve(raw: Option<&str>) -> Result<ResolvedMode, ConfigurationError> {
        let mode = match raw {
            None => Self::default(),
            Some(value) => value.parse()?,
        };
        Ok(ResolvedMode::from(mode))
    }
}

impl FromStr for EnforcementMode {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "report" => Ok(Self::Report),
            "enforce" => Ok(Self::Enforce),
            other => Err(ConfigurationError::UnrecognizedMode {
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for EnforcementMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A mode paired with the field name it selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResolvedMode {
    pub mode: EnforcementMode,
    pub applicability_field: &'static str,
}

impl From<EnforcementMode> for ResolvedMode {
    fn from(mode: EnforcementMode) -> Self {
        Self {
            mode,
            applicability_field: mode.applicability_field(),
        }
    }
}
