//! Resource service catalog.
//!
//! The catalog is versioned with the compiler. Changing [`DEFAULT_SERVICES`]
//! changes every compiled document, so bump [`CATALOG_VERSION`] with it.

use std::collections::HashSet;

use serde::Serialize;

use crate::error::ConfigurationError;

pub const CATALOG_VERSION: &str = "2024.1";

/// Suffix appended to a service identifier to form an applicability token.
pub const ALL_SUPPORTED_SUFFIX: &str = ":ALL_SUPPORTED";

/// Every governable service class, in document order.
pub const DEFAULT_SERVICES: &[&str] = &[
    "ec2",
    "s3",
    "rds",
    "lambda",
    "dynamodb",
    "ecs",
    "eks",
    "elasticloadbalancing",
    "cloudwatch",
    "sns",
    "sqs",
    "kms",
    "secretsmanager",
    "elasticache",
    "efs",
    "apigateway",
    "cloudfront",
    "route53",
    "logs",
    "iam",
];

/// Ordered, duplicate-free list of service identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceCatalog {
    version: String,
    services: Vec<String>,
}

impl ServiceCatalog {
    /// Build a custom catalog. It must name at least one service, and
    /// entries must be unique, non-empty lowercase identifiers (`a-z`,
    /// `0-9`, `-`).
    pub fn new<I, S>(version: impl Into<String>, services: I) -> Result<Self, ConfigurationError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let services: Vec<String> = services.into_iter().map(Into::into).collect();
        if services.is_empty() {
            return Err(ConfigurationError::EmptyCatalog);
        }
        let mut seen = HashSet::with_capacity(services.len());
        for service in &services {
            validate_service(service)?;
            if !seen.insert(service.as_str()) {
                return Err(ConfigurationError::InvalidCatalog {
                    service: service.clone(),
                    reason: "duplicate entry".into(),
                });
            }
        }
        Ok(Self {
            version: version.into(),
            services,
        })
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn services(&self) -> &[String] {
        &self.services
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    /// `"<service>:ALL_SUPPORTED"` for every entry, in catalog order.
    pub fn applicability_tokens(&self) -> Vec<String> {
        self.services
            .iter()
            .map(|s| format!("{s}{ALL_SUPPORTED_SUFFIX}"))
            .collect()
    }
}

impl Default for ServiceCatalog {
    fn default() -> Self {
        Self {
            version: CATALOG_VERSION.to_string(),
            services: DEFAULT_SERVICES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

fn validate_service(service: &str) -> Result<(), ConfigurationError> {
    let reason = if service.is_empty() {
        "empty identifier"
    } else if !service
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        "identifier must be lowercase alphanumeric"
    } else {
        return Ok(());
    };
    Err(ConfigurationError::InvalidCatalog {
        service: service.to_string(),
        reason: reason.into(),
    })
}
