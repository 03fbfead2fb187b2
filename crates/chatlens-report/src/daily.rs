//! Interactions per local calendar day.

use crate::aggregator::DataAggregator;
use crate::time_bucket::StampedRecord;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, instrument};

/// Interaction count for one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyCount {
    /// Local calendar date.
    pub date: NaiveDate,
    /// Number of interactions on that date.
    pub count: u32,
}

/// Counts interactions per local date, sorted by date.
///
/// Days without interactions are not reported.
#[derive(Debug, Default, Clone, Copy)]
pub struct DailyInteractionAggregator {
    /// Earliest date to include, inclusive.
    pub start_date: Option<NaiveDate>,
    /// Latest date to include, inclusive.
    pub end_date: Option<NaiveDate>,
}

impl DailyInteractionAggregator {
    /// Creates an aggregator without a date filter.
    pub const fn new() -> Self {
        Self {
            start_date: None,
            end_date: None,
        }
    }

    /// Creates an aggregator limited to `start..=end`.
    pub const fn with_date_range(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start_date: Some(start),
            end_date: Some(end),
        }
    }

    fn is_in_range(&self, date: NaiveDate) -> bool {
        self.start_date.map_or(true, |start| date >= start)
            && self.end_date.map_or(true, |end| date <= end)
    }
}

impl DataAggregator for DailyInteractionAggregator {
    type Output = Vec<DailyCount>;

    fn name(&self) -> &'static str {
        "daily"
    }

    #[instrument(skip_all, fields(records = records.len()))]
    fn aggregate(&self, records: &[StampedRecord<'_>]) -> Self::Output {
        let mut daily_counts: BTreeMap<NaiveDate, u32> = BTreeMap::new();

        for stamped in records {
            if self.is_in_range(stamped.stamp.date) {
                let count = daily_counts.entry(stamped.stamp.date).or_insert(0);
                *count = count.saturating_add(1);
            }
        }

        let result: Vec<DailyCount> = daily_counts
            .into_iter()
            .map(|(date, count)| DailyCount { date, count })
            .collect();

        debug!("Aggregated {} daily data points", result.len());
        result
    }
}
