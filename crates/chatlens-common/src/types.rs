//! Log record model, newtype wrappers and the shared error type.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a stored interaction log row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RecordId(pub i64);

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Thumbs up / thumbs down signal left by the user on an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feedback {
    /// Stored as `1`.
    Positive,
    /// Stored as `0`.
    Negative,
}

impl Feedback {
    /// Decodes the integer flag stored in the log table.
    ///
    /// Only `1` and `0` carry a signal; anything else is treated as unset.
    #[must_use]
    pub const fn from_flag(flag: i64) -> Option<Self> {
        match flag {
            1 => Some(Self::Positive),
            0 => Some(Self::Negative),
            _ => None,
        }
    }

    /// Integer flag as stored in the log table.
    #[must_use]
    pub const fn as_flag(self) -> i64 {
        match self {
            Self::Positive => 1,
            Self::Negative => 0,
        }
    }

    /// Display label used by the sentiment tally.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Positive => "Thumbs Up",
            Self::Negative => "Thumbs Down",
        }
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

const fn default_in_scope() -> bool {
    true
}

/// One logged chatbot interaction, as read from storage.
///
/// `created_at` is kept as the raw stored text (UTC, timezone-naive). Parsing
/// happens when the record is bucketed so a malformed row can be skipped
/// without failing the whole load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
    /// Row identifier.
    pub id: RecordId,
    /// Raw creation timestamp.
    pub created_at: String,
    /// Free-text question asked by the user, absent on older rows.
    #[serde(default)]
    pub user_query: Option<String>,
    /// Feedback signal, absent when the user never voted.
    #[serde(default)]
    pub feedback: Option<Feedback>,
    /// Whether the query was judged on-topic. Legacy rows default to `true`.
    #[serde(default = "default_in_scope")]
    pub in_scope: bool,
}

impl LogRecord {
    /// Creates an in-scope record with no query and no feedback.
    pub fn new(id: i64, created_at: impl Into<String>) -> Self {
        Self {
            id: RecordId(id),
            created_at: created_at.into(),
            user_query: None,
            feedback: None,
            in_scope: true,
        }
    }

    /// Sets the user query.
    #[must_use]
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.user_query = Some(query.into());
        self
    }

    /// Sets the feedback signal.
    #[must_use]
    pub fn with_feedback(mut self, feedback: Feedback) -> Self {
        self.feedback = Some(feedback);
        self
    }

    /// Marks the record as off-topic.
    #[must_use]
    pub fn out_of_scope(mut self) -> Self {
        self.in_scope = false;
        self
    }

    /// The user query, if present.
    #[must_use]
    pub fn query(&self) -> Option<&str> {
        self.user_query.as_deref()
    }
}

/// Which records a report should consider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordScope {
    /// Only records flagged in scope.
    #[default]
    InScopeOnly,
    /// Every record.
    All,
}

impl RecordScope {
    /// Returns whether `record` belongs to this scope.
    #[must_use]
    pub const fn admits(self, record: &LogRecord) -> bool {
        match self {
            Self::InScopeOnly => record.in_scope,
            Self::All => true,
        }
    }
}

/// Common result type for the workspace.
pub type Result<T> = std::result::Result<T, InsightsError>;

/// Workspace-wide error type.
#[derive(thiserror::Error, Debug)]
pub enum InsightsError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Log storage error.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Timestamp that matches none of the accepted layouts.
    #[error("Malformed timestamp: {0:?}")]
    Timestamp(String),

    /// Caller supplied an unusable argument.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl InsightsError {
    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a storage error.
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    /// Creates an invalid input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }
}
