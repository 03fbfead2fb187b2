//! Configuration schema definitions using serde.

use chatlens_common::{InsightsError, RecordScope};
use chrono::FixedOffset;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure for chatlens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Interaction log storage.
    pub database: DatabaseConfig,
    /// Local time handling.
    pub time: TimeConfig,
    /// Report vocabulary and limits.
    pub report: ReportConfig,
}

/// Interaction log storage configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// SQLite database file.
    pub path: PathBuf,
    /// Table holding one row per interaction.
    pub table: String,
    /// Whether to restrict reports to in-scope queries.
    pub in_scope_only: bool,
    /// SQL `LIKE` patterns marking rows out of scope when the `in_scope`
    /// column is first added to a legacy table.
    pub out_of_scope_patterns: Vec<String>,
}

impl DatabaseConfig {
    /// Record scope implied by `in_scope_only`.
    #[must_use]
    pub const fn scope(&self) -> RecordScope {
        if self.in_scope_only {
            RecordScope::InScopeOnly
        } else {
            RecordScope::All
        }
    }
}

/// Local time configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeConfig {
    /// Fixed offset of local time from UTC, in minutes east of Greenwich.
    pub utc_offset_minutes: i32,
}

impl TimeConfig {
    /// The configured offset as a chrono [`FixedOffset`].
    pub fn local_offset(&self) -> Result<FixedOffset, InsightsError> {
        self.utc_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .ok_or_else(|| {
                InsightsError::config(format!(
                    "utc_offset_minutes out of range: {}",
                    self.utc_offset_minutes
                ))
            })
    }
}

/// Report configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Number of entries in the top queries list.
    pub top_n: usize,
    /// Known campus locations, in display order.
    pub locations: Vec<String>,
    /// Query categories, in matching order. The first matching category wins.
    pub categories: Vec<CategoryConfig>,
}

/// A named query category and the keywords that select it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryConfig {
    /// Category display name.
    pub name: String,
    /// Substrings matched case-insensitively against the query.
    pub keywords: Vec<String>,
}

impl CategoryConfig {
    /// Creates a category from borrowed strings.
    pub fn new(name: &str, keywords: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            keywords: keywords.iter().map(|k| (*k).to_string()).collect(),
        }
    }
}

impl Config {
    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), InsightsError> {
        self.database.validate()?;
        self.time.local_offset()?;
        self.report.validate()
    }
}

impl DatabaseConfig {
    fn validate(&self) -> Result<(), InsightsError> {
        if self.path.as_os_str().is_empty() {
            return Err(InsightsError::config("database path cannot be empty"));
        }

        if self.table.trim().is_empty() {
            return Err(InsightsError::config("database table cannot be empty"));
        }

        // The table name is interpolated into SQL, so keep it to a plain identifier.
        if !self
            .table
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return Err(InsightsError::config(format!(
                "database table must be a plain identifier, got {:?}",
                self.table
            )));
        }

        Ok(())
    }
}

impl ReportConfig {
    fn validate(&self) -> Result<(), InsightsError> {
        if self.top_n == 0 {
            return Err(InsightsError::config("top_n must be at least 1"));
        }

        if self.locations.iter().any(|l| l.trim().is_empty()) {
            return Err(InsightsError::config("location names cannot be empty"));
        }

        let mut seen = Vec::with_capacity(self.categories.len());
        for category in &self.categories {
            let name = category.name.trim();
            if name.is_empty() {
                return Err(InsightsError::config("category names cannot be empty"));
            }
            if seen.contains(&name) {
                return Err(InsightsError::config(format!(
                    "duplicate category name: {name}"
                )));
            }
            if category.keywords.is_empty() || category.keywords.iter().any(|k| k.trim().is_empty()) {
                return Err(InsightsError::config(format!(
                    "category {name} needs at least one non-empty keyword"
                )));
            }
            seen.push(name);
        }

        Ok(())
    }
}
