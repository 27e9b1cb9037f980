//! Error types for tag policy compilation.
//!
//! Every input problem is a [`ConfigurationError`]. They are all fatal: a
//! caller must never fall back to a previous or default document when one
//! is returned.

use thiserror::Error;

/// Malformed or ambiguous policy input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// A label name is empty or whitespace-only.
    #[error("label #{position} has an empty name")]
    EmptyLabelName {
        /// Zero-based position of the label in declaration order.
        position: usize,
    },

    /// The same label name was declared more than once.
    #[error("label '{label}' is declared more than once")]
    DuplicateLabel { label: String },

    /// An explicit allow-list entry is empty or whitespace-only.
    #[error("label '{label}' has an empty allowed value at index {index}")]
    EmptyAllowedValue { label: String, index: usize },

    /// The enforcement mode string is neither `report` nor `enforce`.
    #[error("unrecognized enforcement mode '{value}' (expected 'report' or 'enforce')")]
    UnrecognizedMode { value: String },

    /// The scope a policy should be attached to is empty.
    #[error("target scope must not be empty")]
    EmptyTargetScope,

    /// A resource service catalog entry violates the catalog invariants.
    #[error("invalid service catalog entry '{service}': {reason}")]
    InvalidCatalog { service: String, reason: String },

    /// The service catalog names no service, so the policy would govern nothing.
    #[error("service catalog must name at least one service")]
    EmptyCatalog,

    /// The policy resource name is empty.
    #[error("policy name must not be empty")]
    EmptyPolicyName,
}

/// Top-level error for the tag policy crate.
#[derive(Debug, Error)]
pub enum TagPolicyError {
    /// Input rejected before any document was produced.
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// The compiled document could not be serialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for tag policy operations.
pub type TagPolicyResult<T> = Result<T, TagPolicyError>;
