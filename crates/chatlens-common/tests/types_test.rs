//! Tests for the log record model in chatlens-common.
//!
//! This test suite covers:
//! - Newtype wrappers implementing expected traits (Display, Debug, Serialize, Deserialize)
//! - Feedback flag decoding
//! - Defaults applied to legacy rows
//! - Scope filtering

use chatlens_common::types::*;
use std::collections::HashMap;

#[cfg(test)]
mod newtype_trait_tests {
    use super::*;

    #[test]
    fn test_record_id_implements_expected_traits() {
        let id = RecordId(42);

        assert_eq!(format!("{:?}", id), "RecordId(42)");
        assert_eq!(format!("{}", id), "42");

        let copied = id;
        assert_eq!(id, copied);
        assert_ne!(id, RecordId(43));

        let mut map = HashMap::new();
        map.insert(id, "row");
        assert_eq!(map.get(&id), Some(&"row"));
    }

    #[test]
    fn test_record_id_serialization() {
        let id = RecordId(123456789);
        let serialized = serde_json::to_string(&id).unwrap();
        assert_eq!(serialized, "123456789");

        let deserialized: RecordId = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, id);
    }
}

#[cfg(test)]
mod feedback_tests {
    use super::*;

    #[test]
    fn test_from_flag() {
        assert_eq!(Feedback::from_flag(1), Some(Feedback::Positive));
        assert_eq!(Feedback::from_flag(0), Some(Feedback::Negative));
        assert_eq!(Feedback::from_flag(2), None);
        assert_eq!(Feedback::from_flag(-1), None);
    }

    #[test]
    fn test_flag_and_label() {
        assert_eq!(Feedback::Positive.as_flag(), 1);
        assert_eq!(Feedback::Negative.as_flag(), 0);
        assert_eq!(Feedback::Positive.to_string(), "Thumbs Up");
        assert_eq!(Feedback::Negative.label(), "Thumbs Down");
    }

    #[test]
    fn test_feedback_serialization() {
        assert_eq!(serde_json::to_string(&Feedback::Positive).unwrap(), "\"positive\"");
        let parsed: Feedback = serde_json::from_str("\"negative\"").unwrap();
        assert_eq!(parsed, Feedback::Negative);
    }
}

#[cfg(test)]
mod log_record_tests {
    use super::*;

    #[test]
    fn test_builder() {
        let record = LogRecord::new(7, "2024-11-20 03:00:00")
            .with_query("hostel fees")
            .with_feedback(Feedback::Negative)
            .out_of_scope();

        assert_eq!(record.id, RecordId(7));
        assert_eq!(record.query(), Some("hostel fees"));
        assert_eq!(record.feedback, Some(Feedback::Negative));
        assert!(!record.in_scope);
    }

    #[test]
    fn test_legacy_row_defaults() {
        // Rows written before the in_scope and feedback columns existed.
        let json = r#"{"id": 3, "created_at": "2024-01-01 00:00:00"}"#;
        let record: LogRecord = serde_json::from_str(json).unwrap();

        assert!(record.in_scope);
        assert!(record.user_query.is_none());
        assert!(record.feedback.is_none());
    }

    #[test]
    fn test_scope_admits() {
        let on_topic = LogRecord::new(1, "2024-01-01 00:00:00");
        let off_topic = LogRecord::new(2, "2024-01-01 00:00:00").out_of_scope();

        assert!(RecordScope::InScopeOnly.admits(&on_topic));
        assert!(!RecordScope::InScopeOnly.admits(&off_topic));
        assert!(RecordScope::All.admits(&off_topic));
        assert_eq!(RecordScope::default(), RecordScope::InScopeOnly);
    }
}

#[cfg(test)]
mod error_tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            InsightsError::config("top_n must be positive").to_string(),
            "Configuration error: top_n must be positive"
        );
        assert_eq!(
            InsightsError::Timestamp("yesterday".to_string()).to_string(),
            "Malformed timestamp: \"yesterday\""
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: InsightsError = io.into();
        assert!(matches!(err, InsightsError::Io(_)));
    }
}
