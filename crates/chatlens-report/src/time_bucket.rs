//! Hour-of-day bucketing in a fixed local offset.

use chatlens_common::{InsightsError, LogRecord, Result};
use chrono::{
    DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeZone, Timelike, Utc,
};
use tracing::{debug, warn};

/// Number of hour buckets in a day.
pub const HOURS_IN_DAY: u8 = 24;

/// Layouts accepted for naive (UTC) stored timestamps.
const NAIVE_LAYOUTS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// Formats an hour of day as a 12-hour clock label, e.g. `"12 AM"` or `"3 PM"`.
fn format_hour_12(hour: u8) -> String {
    let hour = hour % HOURS_IN_DAY;
    let suffix = if hour < 12 { "AM" } else { "PM" };
    match hour % 12 {
        0 => format!("12 {suffix}"),
        h => format!("{h} {suffix}"),
    }
}

/// Human-readable range for the hour starting at `hour`, e.g. `"2 AM to 3 AM"`.
///
/// The end wraps at midnight, so hour 23 is `"11 PM to 12 AM"`. Values above
/// 23 are taken modulo 24.
pub fn hour_range_label(hour: u8) -> String {
    let start = hour % HOURS_IN_DAY;
    let end = (start + 1) % HOURS_IN_DAY;
    format!("{} to {}", format_hour_12(start), format_hour_12(end))
}

/// All 24 range labels in hour-of-day order.
pub fn all_hour_range_labels() -> Vec<String> {
    (0..HOURS_IN_DAY).map(hour_range_label).collect()
}

/// Parses a stored `created_at` value into a naive UTC timestamp.
///
/// Accepts `YYYY-MM-DD HH:MM:SS[.fff]`, the same with a `T` separator, RFC 3339
/// with an explicit offset (normalised to UTC) and a bare `YYYY-MM-DD`.
pub fn parse_stored_timestamp(raw: &str) -> Result<NaiveDateTime> {
    let trimmed = raw.trim();

    for layout in NAIVE_LAYOUTS {
        if let Ok(timestamp) = NaiveDateTime::parse_from_str(trimmed, layout) {
            return Ok(timestamp);
        }
    }

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(timestamp.naive_utc());
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN));
    }

    Err(InsightsError::Timestamp(raw.to_string()))
}

/// Local hour and calendar date of an interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LocalStamp {
    /// Hour of day, 0-23.
    pub hour: u8,
    /// Local calendar date.
    pub date: NaiveDate,
}

/// A record paired with its local time stamp.
#[derive(Debug, Clone, Copy)]
pub struct StampedRecord<'a> {
    /// The underlying log record.
    pub record: &'a LogRecord,
    /// Local hour and date of `record.created_at`.
    pub stamp: LocalStamp,
}

impl<'a> StampedRecord<'a> {
    /// The record's query, if present.
    pub fn query(&self) -> Option<&'a str> {
        self.record.user_query.as_deref()
    }
}

/// Outcome of stamping a record collection.
#[derive(Debug, Default)]
pub struct StampedBatch<'a> {
    /// Records whose timestamp parsed.
    pub records: Vec<StampedRecord<'a>>,
    /// Number of records skipped for a malformed timestamp.
    pub skipped: usize,
}

/// Converts stored UTC timestamps into a fixed local offset.
#[derive(Debug, Clone, Copy)]
pub struct TimeBucketer {
    offset: FixedOffset,
}

impl TimeBucketer {
    /// Creates a bucketer for the given local offset.
    pub const fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    /// Creates a bucketer that keeps timestamps in UTC.
    pub fn utc() -> Self {
        Self::new(Utc.fix())
    }

    /// Local hour and date of a naive UTC timestamp.
    pub fn localize(&self, utc: NaiveDateTime) -> LocalStamp {
        let local = self.offset.from_utc_datetime(&utc);
        LocalStamp {
            // hour() is always < 24.
            hour: u8::try_from(local.hour()).unwrap_or_default(),
            date: local.date_naive(),
        }
    }

    /// Parses and localizes a record's `created_at`.
    pub fn stamp(&self, record: &LogRecord) -> Result<LocalStamp> {
        parse_stored_timestamp(&record.created_at).map(|utc| self.localize(utc))
    }

    /// Stamps every record, skipping and counting those with malformed timestamps.
    pub fn stamp_all<'a, I>(&self, records: I) -> StampedBatch<'a>
    where
        I: IntoIterator<Item = &'a LogRecord>,
    {
        let mut batch = StampedBatch::default();

        for record in records {
            match self.stamp(record) {
                Ok(stamp) => batch.records.push(StampedRecord { record, stamp }),
                Err(e) => {
                    debug!("Skipping record {}: {}", record.id, e);
                    batch.skipped += 1;
                }
            }
        }

        if batch.skipped > 0 {
            warn!(
                "Skipped {} of {} records with malformed timestamps",
                batch.skipped,
                batch.skipped + batch.records.len()
            );
        }
        batch
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    fn ist() -> TimeBucketer {
        TimeBucketer::new(FixedOffset::east_opt(19_800).unwrap())
    }

    #[test]
    fn test_format_hour_12() {
        assert_eq!(format_hour_12(0), "12 AM");
        assert_eq!(format_hour_12(1), "1 AM");
        assert_eq!(format_hour_12(11), "11 AM");
        assert_eq!(format_hour_12(12), "12 PM");
        assert_eq!(format_hour_12(13), "1 PM");
        assert_eq!(format_hour_12(23), "11 PM");
    }

    #[test]
    fn test_hour_range_label() {
        assert_eq!(hour_range_label(0), "12 AM to 1 AM");
        assert_eq!(hour_range_label(2), "2 AM to 3 AM");
        assert_eq!(hour_range_label(11), "11 AM to 12 PM");
        assert_eq!(hour_range_label(12), "12 PM to 1 PM");
        assert_eq!(hour_range_label(14), "2 PM to 3 PM");
        assert_eq!(hour_range_label(23), "11 PM to 12 AM");
    }

    #[test]
    fn test_all_labels_distinct() {
        let mut labels = all_hour_range_labels();
        assert_eq!(labels.len(), 24);
        labels.sort();
        labels.dedup();
        assert_eq!(labels.len(), 24);
    }

    #[test]
    fn test_parse_accepted_layouts() {
        let expected = NaiveDate::from_ymd_opt(2024, 11, 20)
            .unwrap()
            .and_hms_opt(3, 0, 0)
            .unwrap();

        assert_eq!(parse_stored_timestamp("2024-11-20 03:00:00").unwrap(), expected);
        assert_eq!(parse_stored_timestamp("2024-11-20T03:00:00").unwrap(), expected);
        assert_eq!(parse_stored_timestamp(" 2024-11-20 03:00:00 ").unwrap(), expected);
        assert_eq!(parse_stored_timestamp("2024-11-20T08:30:00+05:30").unwrap(), expected);
        assert_eq!(parse_stored_timestamp("2024-11-20T03:00:00Z").unwrap(), expected);

        let fractional = parse_stored_timestamp("2024-11-20 03:00:00.250").unwrap();
        assert_eq!(fractional.nanosecond(), 250_000_000);

        let midnight = parse_stored_timestamp("2024-11-20").unwrap();
        assert_eq!(midnight.hour(), 0);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for raw in ["", "not-a-timestamp", "2024-13-01 00:00:00", "20/11/2024 03:00"] {
            let err = parse_stored_timestamp(raw).unwrap_err();
            assert!(matches!(err, InsightsError::Timestamp(_)), "{raw}");
        }
    }

    #[test]
    fn test_localize_crosses_midnight() {
        // 20:45 UTC is 02:15 the next day at +05:30.
        let utc = parse_stored_timestamp("2024-11-20 20:45:00").unwrap();
        let stamp = ist().localize(utc);
        assert_eq!(stamp.hour, 2);
        assert_eq!(stamp.date.day(), 21);
        assert_eq!(hour_range_label(stamp.hour), "2 AM to 3 AM");
    }

    #[test]
    fn test_utc_bucketer_keeps_hour() {
        let utc = parse_stored_timestamp("2024-11-20 20:45:00").unwrap();
        assert_eq!(TimeBucketer::utc().localize(utc).hour, 20);
    }

    #[test]
    fn test_stamp_all_counts_skipped() {
        let records = vec![
            LogRecord::new(1, "2024-11-20 03:00:00"),
            LogRecord::new(2, "garbage"),
            LogRecord::new(3, "2024-11-20 08:40:00"),
        ];

        let batch = ist().stamp_all(&records);
        assert_eq!(batch.records.len(), 2);
        assert_eq!(batch.skipped, 1);
        assert_eq!(batch.records[0].stamp.hour, 8);
        assert_eq!(batch.records[1].stamp.hour, 14);
    }
}
