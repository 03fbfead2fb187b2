//! Shared aggregator trait.
//!
//! Every aggregator is a pure pass over already-stamped records: it never
//! mutates its input and builds a fresh result on each call. Records missing
//! the field an aggregator needs are left out of that aggregator only.

use crate::time_bucket::StampedRecord;

/// Trait for turning a stamped record collection into one summarised result.
pub trait DataAggregator {
    /// The summarised result.
    type Output;

    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Summarises `records`.
    fn aggregate(&self, records: &[StampedRecord<'_>]) -> Self::Output;
}

