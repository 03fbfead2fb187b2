//! Peak interaction histogram by local hour of day.

use crate::aggregator::DataAggregator;
use crate::time_bucket::{hour_range_label, StampedRecord, HOURS_IN_DAY};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Interaction count for one hour bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourlyDataPoint {
    /// Hour of day, 0-23.
    pub hour: u8,
    /// Range label, e.g. `"2 AM to 3 AM"`.
    pub label: String,
    /// Number of interactions in the hour.
    pub count: u32,
}

/// Counts interactions per local hour.
///
/// The result always has 24 entries in hour order 0 to 23, including empty
/// hours. This differs from the other aggregators, which only report values
/// that occur.
#[derive(Debug, Default, Clone, Copy)]
pub struct PeakHoursAggregator;

impl PeakHoursAggregator {
    /// Creates the aggregator.
    pub const fn new() -> Self {
        Self
    }
}

impl DataAggregator for PeakHoursAggregator {
    type Output = Vec<HourlyDataPoint>;

    fn name(&self) -> &'static str {
        "peak_hours"
    }

    #[instrument(skip_all, fields(records = records.len()))]
    fn aggregate(&self, records: &[StampedRecord<'_>]) -> Self::Output {
        let mut counts = [0u32; HOURS_IN_DAY as usize];
        for stamped in records {
            let slot = &mut counts[usize::from(stamped.stamp.hour % HOURS_IN_DAY)];
            *slot = slot.saturating_add(1);
        }

        let result: Vec<HourlyDataPoint> = (0..HOURS_IN_DAY)
            .zip(counts)
            .map(|(hour, count)| HourlyDataPoint {
                hour,
                label: hour_range_label(hour),
                count,
            })
            .collect();

        debug!(
            "Aggregated {} interactions into {} hour buckets",
            records.len(),
            result.len()
        );
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time_bucket::TimeBucketer;
    use chatlens_common::LogRecord;

    fn histogram_for(timestamps: &[&str]) -> Vec<HourlyDataPoint> {
        let records: Vec<LogRecord> = timestamps
            .iter()
            .zip(1..)
            .map(|(ts, id)| LogRecord::new(id, *ts))
            .collect();
        let batch = TimeBucketer::utc().stamp_all(&records);
        PeakHoursAggregator::new().aggregate(&batch.records)
    }

    #[test]
    fn test_counts_land_in_their_hour() {
        let histogram = histogram_for(&[
            "2024-11-20 02:10:00",
            "2024-11-20 02:59:59",
            "2024-11-20 14:00:00",
        ]);

        assert_eq!(histogram.len(), 24);
        assert_eq!(histogram[2].label, "2 AM to 3 AM");
        assert_eq!(histogram[2].count, 2);
        assert_eq!(histogram[14].label, "2 PM to 3 PM");
        assert_eq!(histogram[14].count, 1);
        assert_eq!(histogram.iter().map(|d| d.count).sum::<u32>(), 3);
        assert_eq!(histogram.iter().filter(|d| d.count == 0).count(), 22);
    }

    #[test]
    fn test_empty_input_still_has_all_hours() {
        let histogram = histogram_for(&[]);
        assert_eq!(histogram.len(), 24);
        assert!(histogram.iter().all(|d| d.count == 0));
        let hours: Vec<u8> = histogram.iter().map(|d| d.hour).collect();
        assert_eq!(hours, (0..24).collect::<Vec<u8>>());
    }
}
