//! Policy configuration loading

use std::path::Path;

use tag_policy::TagPolicyConfig;
use tracing::debug;

use crate::error::{CliError, CliResult};

/// Supported configuration file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Yaml,
    Json,
}

impl ConfigFormat {
    /// Pick a format from the file extension
    pub fn from_path(path: &Path) -> CliResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("toml") => Ok(Self::Toml),
            Some("yaml") | Some("yml") => Ok(Self::Yaml),
            Some("json") => Ok(Self::Json),
            _ => Err(CliError::Config(format!(
                "unsupported configuration file '{}' (expected .toml, .yaml, .yml or .json)",
                path.display()
            ))),
        }
    }

    /// Parse configuration text in this format
    pub fn parse(self, contents: &str) -> CliResult<TagPolicyConfig> {
        let config = match self {
            Self::Toml => toml::from_str(contents)?,
            Self::Yaml => serde_yaml::from_str(contents)?,
            Self::Json => serde_json::from_str(contents)?,
        };
        Ok(config)
    }
}

/// Load configuration from file, or the empty configuration when no file is given
pub fn load(path: Option<&Path>) -> CliResult<TagPolicyConfig> {
    let Some(path) = path else {
        debug!("no configuration file given, using built-in defaults");
        return Ok(TagPolicyConfig::default());
    };

    let format = ConfigFormat::from_path(path)?;
    let contents = std::fs::read_to_string(path)?;
    debug!(path = %path.display(), ?format, "loading tag policy configuration");
    format.parse(&contents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            ConfigFormat::from_path(&PathBuf::from("tags.toml")).unwrap(),
            ConfigFormat::Toml
        );
        assert_eq!(
            ConfigFormat::from_path(&PathBuf::from("tags.YML")).unwrap(),
            ConfigFormat::Yaml
        );
        assert_eq!(
            ConfigFormat::from_path(&PathBuf::from("tags.json")).unwrap(),
            ConfigFormat::Json
        );
        assert!(ConfigFormat::from_path(&PathBuf::from("tags.ini")).is_err());
        assert!(ConfigFormat::from_path(&PathBuf::from("tags")).is_err());
    }

    #[test]
    fn test_parse_toml_keeps_declaration_order() {
        let config = ConfigFormat::Toml
            .parse(
                r#"
enforcement_mode = "enforce"
target_scope = "r-ab12"

[required_tags]
Owner = []
Environment = ["Dev", "Prod"]
"#,
            )
            .unwrap();
        assert_eq!(config.enforcement_mode.as_deref(), Some("enforce"));
        let names: Vec<&str> = config
            .required_tags
            .as_ref()
            .unwrap()
            .iter()
            .map(|(name, _)| name)
            .collect();
        assert_eq!(names, vec!["Owner", "Environment"]);
    }

    #[test]
    fn test_parse_yaml_camel_case() {
        let config = ConfigFormat::Yaml
            .parse(
                r#"
requiredTags:
  Environment: [Dev, Prod]
  Owner: []
enforcementMode: report
"#,
            )
            .unwrap();
        assert_eq!(config.required_tags.unwrap().len(), 2);
        assert_eq!(config.enforcement_mode.as_deref(), Some("report"));
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(ConfigFormat::Toml.parse("mode = \"enforce\"").is_err());
    }

    #[test]
    fn test_load_without_path_is_default() {
        assert_eq!(load(None).unwrap(), TagPolicyConfig::default());
    }
}
