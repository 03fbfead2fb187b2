//! Application wiring: configuration, record source and command dispatch.

use crate::cli::{Cli, Command, OutputFormat};
use crate::error::{AppError, AppResult};
use crate::render::{location_summary, query_list, TextReport};
use chatlens_common::RecordScope;
use chatlens_config::{Config, ConfigLoader, ConfigValidator};
use chatlens_report::{report_charts, LogSource, ReportBuilder, SqliteSource};
use std::path::Path;
use tracing::{debug, info, warn};

/// Environment variable overriding `database.path`.
pub const ENV_DB_PATH: &str = "CHATLENS_DB_PATH";

/// Environment variable overriding `time.utc_offset_minutes`.
pub const ENV_UTC_OFFSET_MINUTES: &str = "CHATLENS_UTC_OFFSET_MINUTES";

/// Loads the configuration file, or the defaults when no path is given.
pub async fn load_config(path: Option<&Path>) -> AppResult<Config> {
    match path {
        Some(path) => Ok(ConfigLoader::new(path).load().await?),
        None => {
            debug!("No configuration file given, using defaults");
            Ok(Config::default())
        }
    }
}

/// Applies environment overrides, reading variables through `var`.
pub fn apply_env_overrides<F>(config: &mut Config, var: F) -> AppResult<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(path) = var(ENV_DB_PATH) {
        debug!("Database path overridden by {}", ENV_DB_PATH);
        config.database.path = path.into();
    }

    if let Some(raw) = var(ENV_UTC_OFFSET_MINUTES) {
        config.time.utc_offset_minutes =
            raw.trim().parse().map_err(|_| AppError::InvalidEnv {
                name: ENV_UTC_OFFSET_MINUTES,
                value: raw.clone(),
            })?;
        debug!("UTC offset overridden by {}", ENV_UTC_OFFSET_MINUTES);
    }

    Ok(())
}

/// Applies command line overrides.
pub fn apply_cli_overrides(config: &mut Config, cli: &Cli) {
    if let Some(path) = &cli.database {
        config.database.path.clone_from(path);
    }
    if cli.all_records {
        config.database.in_scope_only = false;
    }
}

/// A configured chatlens instance.
pub struct ChatLens {
    config: Config,
    builder: ReportBuilder,
}

impl ChatLens {
    /// Validates `config` and prepares the report builder.
    pub fn new(config: Config) -> AppResult<Self> {
        // Warnings are logged by the validator.
        ConfigValidator::validate_with_warnings(&config)?;
        let builder = ReportBuilder::from_config(&config)?;
        Ok(Self { config, builder })
    }

    /// The active configuration.
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Record scope implied by the configuration.
    pub const fn scope(&self) -> RecordScope {
        self.config.database.scope()
    }

    /// Opens the configured database, adding the `in_scope` column if missing.
    ///
    /// A failed upgrade is logged and the source is still returned: without
    /// the column every record reads as in scope.
    pub async fn open_source(&self) -> AppResult<SqliteSource> {
        let source = SqliteSource::from_config(&self.config.database).await?;
        match source
            .ensure_in_scope_column(&self.config.database.out_of_scope_patterns)
            .await
        {
            Ok(true) => info!("Upgraded table {} with an in_scope column", source.table()),
            Ok(false) => {}
            Err(e) => warn!(
                "Could not add in_scope column to {}, reading it as is: {}",
                source.table(),
                e
            ),
        }
        Ok(source)
    }

    /// Runs `command` against `source` and returns what should be printed.
    pub async fn execute(&self, command: &Command, source: &dyn LogSource) -> AppResult<String> {
        match command {
            Command::Report { format } => {
                let report = self.builder.build_from(source).await?;
                match format {
                    OutputFormat::Text => Ok(TextReport(&report).to_string()),
                    OutputFormat::Json => Ok(serde_json::to_string_pretty(&report)? + "\n"),
                    OutputFormat::Charts => {
                        Ok(serde_json::to_string_pretty(&report_charts(&report))? + "\n")
                    }
                }
            }
            Command::Location { name } => {
                let records = source.fetch(self.scope()).await?;
                let queries = self.builder.lookup_location(&records, name);
                info!("Found {} queries for location {:?}", queries.len(), name);
                Ok(query_list(&queries))
            }
            Command::Locations => {
                let records = source.fetch(self.scope()).await?;
                Ok(location_summary(&self.builder.location_faqs(&records)))
            }
            Command::Search { term } => {
                let records = source.fetch(self.scope()).await?;
                let matches = self.builder.search(&records, term)?;
                info!("Search for {:?} matched {} queries", term, matches.len());
                Ok(query_list(&matches))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config::default();
        apply_env_overrides(
            &mut config,
            env(&[(ENV_DB_PATH, "/data/logs.db"), (ENV_UTC_OFFSET_MINUTES, " -300 ")]),
        )
        .unwrap();

        assert_eq!(config.database.path, Path::new("/data/logs.db"));
        assert_eq!(config.time.utc_offset_minutes, -300);
    }

    #[test]
    fn test_env_overrides_absent() {
        let mut config = Config::default();
        apply_env_overrides(&mut config, env(&[])).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_bad_offset_env_is_rejected() {
        let mut config = Config::default();
        let err = apply_env_overrides(&mut config, env(&[(ENV_UTC_OFFSET_MINUTES, "IST")])).unwrap_err();
        assert!(matches!(err, AppError::InvalidEnv { name: ENV_UTC_OFFSET_MINUTES, .. }));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = Config::default();
        config.report.top_n = 0;
        assert!(ChatLens::new(config).is_err());
    }

    #[tokio::test]
    async fn test_load_config_defaults_without_path() {
        assert_eq!(load_config(None).await.unwrap(), Config::default());
    }
}
