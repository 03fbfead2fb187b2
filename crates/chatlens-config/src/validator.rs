//! Runtime validation entry point.

use crate::schema::Config;
use chatlens_common::Result;
use tracing::warn;

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validates a configuration.
    pub fn validate(config: &Config) -> Result<()> {
        config.validate()
    }

    /// Validates a configuration and returns non-fatal observations about it.
    ///
    /// Warnings are also logged. They describe settings that are legal but
    /// make part of the report trivially empty.
    pub fn validate_with_warnings(config: &Config) -> Result<Vec<String>> {
        config.validate()?;

        let mut warnings = Vec::new();
        if config.report.locations.is_empty() {
            warnings.push("no locations configured; location FAQs will be empty".to_string());
        }
        if config.report.categories.is_empty() {
            warnings.push("no categories configured; category breakdown will be empty".to_string());
        }

        for warning in &warnings {
            warn!("{}", warning);
        }
        Ok(warnings)
    }
}
