//! Default values for every configuration section.

use crate::schema::*;
use std::path::PathBuf;

/// Default SQLite file, relative to the working directory.
pub const DEFAULT_DATABASE_PATH: &str = "rag_app.db";

/// Default interaction log table.
pub const DEFAULT_TABLE: &str = "application_logs";

/// Default local offset: India Standard Time, UTC+05:30.
pub const DEFAULT_UTC_OFFSET_MINUTES: i32 = 5 * 60 + 30;

/// Default size of the top queries list.
pub const DEFAULT_TOP_N: usize = 10;

/// SQL `LIKE` patterns for off-topic queries, applied when `in_scope` is added.
pub const DEFAULT_OUT_OF_SCOPE_PATTERNS: [&str; 2] = ["%capital%", "%2+2%"];

/// Campus locations recognised in queries by default.
pub const DEFAULT_LOCATIONS: [&str; 6] = ["Jaipur", "Ajmer", "Jodhpur", "Udaipur", "Kota", "Bikaner"];

/// Default query categories, in matching order.
pub fn default_categories() -> Vec<CategoryConfig> {
    vec![
        CategoryConfig::new("Hostel", &["hostel", "accommodation", "room", "stay"]),
        CategoryConfig::new("Placement", &["placement", "job", "career", "opportunity"]),
        CategoryConfig::new("Fees", &["fees", "cost", "tuition", "scholarship"]),
        CategoryConfig::new("Admission", &["admission", "application", "process", "form"]),
        CategoryConfig::new("Curriculum", &["course", "subject", "curriculum", "syllabus"]),
    ]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: DatabaseConfig::default(),
            time: TimeConfig::default(),
            report: ReportConfig::default(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_DATABASE_PATH),
            table: DEFAULT_TABLE.to_string(),
            in_scope_only: true,
            out_of_scope_patterns: DEFAULT_OUT_OF_SCOPE_PATTERNS
                .iter()
                .map(|p| (*p).to_string())
                .collect(),
        }
    }
}

impl Default for TimeConfig {
    fn default() -> Self {
        Self {
            utc_offset_minutes: DEFAULT_UTC_OFFSET_MINUTES,
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            locations: DEFAULT_LOCATIONS.iter().map(|l| (*l).to_string()).collect(),
            categories: default_categories(),
        }
    }
}
