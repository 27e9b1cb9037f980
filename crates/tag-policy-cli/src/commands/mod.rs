//! CLI command implementations

pub mod compile;
pub mod inspect;
pub mod plan;

use tag_policy::TagPolicyConfig;

/// Apply a command-line mode override on top of the loaded configuration.
///
/// The raw string is passed through untouched so the resolver rejects
/// anything that is not an exact mode name.
pub(crate) fn with_mode_override(config: TagPolicyConfig, mode: Option<String>) -> TagPolicyConfig {
    match mode {
        Some(mode) => config.with_enforcement_mode(mode),
        None => config,
    }
}
