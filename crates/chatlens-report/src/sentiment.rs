//! Feedback sentiment tally.

use crate::aggregator::DataAggregator;
use crate::time_bucket::StampedRecord;
use chatlens_common::Feedback;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Number of records carrying one feedback value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentCount {
    /// The feedback value.
    pub feedback: Feedback,
    /// Display label, `"Thumbs Up"` or `"Thumbs Down"`.
    pub label: String,
    /// Number of records.
    pub count: u32,
}

/// Tallies thumbs up and thumbs down.
///
/// Records without feedback are ignored, and a value that never occurs is
/// left out rather than reported as zero. Entries are ordered by count,
/// thumbs up first on a tie.
#[derive(Debug, Default, Clone, Copy)]
pub struct SentimentAggregator;

impl SentimentAggregator {
    /// Creates the aggregator.
    pub const fn new() -> Self {
        Self
    }
}

impl DataAggregator for SentimentAggregator {
    type Output = Vec<SentimentCount>;

    fn name(&self) -> &'static str {
        "sentiment"
    }

    #[instrument(skip_all, fields(records = records.len()))]
    fn aggregate(&self, records: &[StampedRecord<'_>]) -> Self::Output {
        let mut positive = 0u32;
        let mut negative = 0u32;

        for stamped in records {
            match stamped.record.feedback {
                Some(Feedback::Positive) => positive = positive.saturating_add(1),
                Some(Feedback::Negative) => negative = negative.saturating_add(1),
                None => {}
            }
        }

        let mut result: Vec<SentimentCount> = [(Feedback::Positive, positive), (Feedback::Negative, negative)]
            .into_iter()
            .filter(|(_, count)| *count > 0)
            .map(|(feedback, count)| SentimentCount {
                feedback,
                label: feedback.label().to_string(),
                count,
            })
            .collect();

        // Stable sort keeps thumbs up ahead on a tie
        result.sort_by(|a, b| b.count.cmp(&a.count));

        debug!("Tallied {} thumbs up, {} thumbs down", positive, negative);
        result
    }
}
