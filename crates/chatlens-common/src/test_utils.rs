//! Test utilities and shared test helpers for chatlens.
//!
//! This module provides fixtures and helper functions that can be used across
//! all crates in the workspace for unit and integration testing.

use std::sync::Once;

#[cfg(feature = "tracing-subscriber")]
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize test logging once per test run.
static INIT: Once = Once::new();

/// Initialize logging for tests with a sensible default configuration.
/// This function is safe to call multiple times and will only initialize once.
#[cfg(feature = "tracing-subscriber")]
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

        fmt().with_test_writer().with_env_filter(filter).init();
    });
}

/// No-op version when tracing-subscriber is not available
#[cfg(not(feature = "tracing-subscriber"))]
pub fn init_test_logging() {
    INIT.call_once(|| {});
}

/// Assert that two floating point numbers are approximately equal within a tolerance.
pub fn assert_approx_eq(left: f64, right: f64, tolerance: f64) {
    let diff = (left - right).abs();
    assert!(
        diff <= tolerance,
        "assertion failed: `{left}` is not approximately equal to `{right}` (tolerance: {tolerance}, diff: {diff})"
    );
}

/// Log record fixtures.
pub mod record_fixtures {
    use crate::{Feedback, LogRecord};

    /// An in-scope record carrying a query.
    pub fn query_record(id: i64, created_at: &str, query: &str) -> LogRecord {
        LogRecord::new(id, created_at).with_query(query)
    }

    /// A small interaction log with one of each edge case.
    ///
    /// With a +05:30 local offset and the in-scope filter applied:
    /// - 8 records in scope, one of which (id 6) has a malformed timestamp;
    /// - local hours of the 7 usable records: 8, 8, 14, 2, 23, 10, 12;
    /// - local dates: 2024-11-20 (3 records), 2024-11-21 (4 records);
    /// - feedback: 3 thumbs up, 2 thumbs down, 2 unset;
    /// - categories: Hostel 2, Placement 1, Admission 1, Curriculum 1, 1 unclassified;
    /// - locations: Jaipur, Udaipur and Kota each matched by one distinct query.
    pub fn campus_log() -> Vec<LogRecord> {
        vec![
            query_record(1, "2024-11-20 03:00:00", "What is the hostel fee for Jaipur campus?")
                .with_feedback(Feedback::Positive),
            query_record(2, "2024-11-20 03:15:00", "Placement record of Kota polytechnic")
                .with_feedback(Feedback::Positive),
            query_record(3, "2024-11-20 08:40:00", "What is the hostel fee for Jaipur campus?")
                .with_feedback(Feedback::Negative),
            query_record(4, "2024-11-20 20:45:00", "Admission process for Udaipur"),
            query_record(5, "2024-11-21 18:29:59", "Is there a syllabus for first year?")
                .with_feedback(Feedback::Positive),
            query_record(6, "not-a-timestamp", "What is the hostel fee for Ajmer?")
                .with_feedback(Feedback::Positive),
            LogRecord::new(7, "2024-11-21 05:00:00").with_feedback(Feedback::Negative),
            query_record(8, "2024-11-21 06:00:00", "What is the capital of France?").out_of_scope(),
            query_record(9, "2024-11-21 07:00:00", "Tell me a joke"),
        ]
    }
}

/// Property-based testing utilities using proptest.
#[cfg(feature = "proptest")]
pub mod property_testing {
    use crate::{Feedback, LogRecord};
    use proptest::prelude::*;

    /// Strategy for hours of the day.
    pub fn hour_strategy() -> impl Strategy<Value = u32> {
        0u32..24
    }

    /// Strategy for stored UTC timestamps within 2024.
    pub fn stored_timestamp_strategy() -> impl Strategy<Value = String> {
        (1u32..=12, 1u32..=28, hour_strategy(), 0u32..60, 0u32..60).prop_map(
            |(month, day, hour, min, sec)| {
                format!("2024-{month:02}-{day:02} {hour:02}:{min:02}:{sec:02}")
            },
        )
    }

    /// Strategy for user queries drawn from a small vocabulary so duplicates occur.
    pub fn query_strategy() -> impl Strategy<Value = Option<String>> {
        proptest::option::of(prop::sample::select(vec![
            "hostel rooms in Jaipur".to_string(),
            "placement statistics".to_string(),
            "tuition fees for Kota".to_string(),
            "admission form deadline".to_string(),
            "syllabus of semester 3".to_string(),
            "who won the match yesterday".to_string(),
            "bus timings for Bikaner campus".to_string(),
        ]))
    }

    /// Strategy for feedback flags.
    pub fn feedback_strategy() -> impl Strategy<Value = Option<Feedback>> {
        proptest::option::of(prop_oneof![Just(Feedback::Positive), Just(Feedback::Negative)])
    }

    /// Strategy for collections of well-formed records.
    pub fn records_strategy(max_len: usize) -> impl Strategy<Value = Vec<LogRecord>> {
        prop::collection::vec(
            (stored_timestamp_strategy(), query_strategy(), feedback_strategy(), any::<bool>()),
            0..max_len,
        )
        .prop_map(|rows| {
            rows.into_iter()
                .zip(1i64..)
                .map(|((created_at, user_query, feedback, in_scope), id)| LogRecord {
                    id: crate::RecordId(id),
                    created_at,
                    user_query,
                    feedback,
                    in_scope,
                })
                .collect()
        })
    }
}
