//! Report assembly.
//!
//! The [`ReportBuilder`] owns the configured aggregators and runs all of them
//! over one record snapshot. It keeps no state between calls, so a single
//! builder can serve any number of requests.

use crate::aggregator::DataAggregator;
use crate::categories::{CategoryAggregator, CategoryBreakdown};
use crate::daily::{DailyCount, DailyInteractionAggregator};
use crate::locations::{search_queries, LocationFaqAggregator, LocationFaqs};
use crate::peak_hours::{HourlyDataPoint, PeakHoursAggregator};
use crate::sentiment::{SentimentAggregator, SentimentCount};
use crate::source::LogSource;
use crate::time_bucket::{StampedBatch, TimeBucketer};
use crate::top_queries::{QueryCount, TopQueriesAggregator};
use chatlens_common::{LogRecord, RecordScope, Result};
use chatlens_config::{default_categories, Config, DEFAULT_LOCATIONS, DEFAULT_TOP_N};
use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Every aggregate computed for one reporting request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightsReport {
    /// When the report was built.
    pub generated_at: DateTime<Utc>,
    /// Records admitted by the scope filter, including skipped ones.
    pub total_records: usize,
    /// Records left out because their timestamp could not be parsed.
    pub skipped_records: usize,
    /// 24 hour buckets in hour order.
    pub peak_hours: Vec<HourlyDataPoint>,
    /// Most frequent queries.
    pub top_queries: Vec<QueryCount>,
    /// Per-category tally.
    pub categories: CategoryBreakdown,
    /// Thumbs up / thumbs down tally.
    pub sentiment: Vec<SentimentCount>,
    /// Queries per known location.
    pub location_faqs: LocationFaqs,
    /// Interactions per local date.
    pub daily: Vec<DailyCount>,
}

impl InsightsReport {
    /// Queries mentioning `location`; empty when unknown or unmatched.
    pub fn lookup_location(&self, location: &str) -> &[String] {
        self.location_faqs.lookup(location)
    }

    /// Records that made it into the aggregates.
    pub const fn analysed_records(&self) -> usize {
        self.total_records.saturating_sub(self.skipped_records)
    }
}

/// Runs every aggregator over a record snapshot.
#[derive(Debug, Clone)]
pub struct ReportBuilder {
    bucketer: TimeBucketer,
    scope: RecordScope,
    peak_hours: PeakHoursAggregator,
    top_queries: TopQueriesAggregator,
    categories: CategoryAggregator,
    sentiment: SentimentAggregator,
    locations: LocationFaqAggregator,
    daily: DailyInteractionAggregator,
}

impl ReportBuilder {
    /// Creates a builder for `offset` with the default vocabulary.
    pub fn new(offset: FixedOffset) -> Self {
        Self {
            bucketer: TimeBucketer::new(offset),
            scope: RecordScope::default(),
            peak_hours: PeakHoursAggregator::new(),
            top_queries: TopQueriesAggregator::with_limit(DEFAULT_TOP_N),
            categories: CategoryAggregator::from_config(&default_categories()),
            sentiment: SentimentAggregator::new(),
            locations: LocationFaqAggregator::new(DEFAULT_LOCATIONS),
            daily: DailyInteractionAggregator::new(),
        }
    }

    /// Creates a builder from a validated configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let offset = config.time.local_offset()?;
        Ok(Self::new(offset)
            .with_scope(config.database.scope())
            .with_top_n(config.report.top_n)
            .with_categories(CategoryAggregator::from_config(&config.report.categories))
            .with_locations(LocationFaqAggregator::new(config.report.locations.iter().cloned())))
    }

    /// Restricts reports to records admitted by `scope`.
    #[must_use]
    pub fn with_scope(mut self, scope: RecordScope) -> Self {
        self.scope = scope;
        self
    }

    /// Sets the length of the top queries list.
    #[must_use]
    pub fn with_top_n(mut self, limit: usize) -> Self {
        self.top_queries = TopQueriesAggregator::with_limit(limit);
        self
    }

    /// Limits the daily counts to `start..=end`.
    #[must_use]
    pub fn with_date_range(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.daily = DailyInteractionAggregator::with_date_range(start, end);
        self
    }

    /// Replaces the category vocabulary.
    #[must_use]
    pub fn with_categories(mut self, categories: CategoryAggregator) -> Self {
        self.categories = categories;
        self
    }

    /// Replaces the known location list.
    #[must_use]
    pub fn with_locations(mut self, locations: LocationFaqAggregator) -> Self {
        self.locations = locations;
        self
    }

    /// The record scope in use.
    pub const fn scope(&self) -> RecordScope {
        self.scope
    }

    /// Applies the scope filter and stamps what remains.
    fn stamp<'a>(&self, records: &'a [LogRecord]) -> (usize, StampedBatch<'a>) {
        let scope = self.scope;
        let admitted: Vec<&LogRecord> = records.iter().filter(|r| scope.admits(r)).collect();
        if admitted.len() < records.len() {
            debug!(
                "Scope {:?} left out {} of {} records",
                scope,
                records.len() - admitted.len(),
                records.len()
            );
        }
        (admitted.len(), self.bucketer.stamp_all(admitted))
    }

    /// Builds a full report over `records`.
    ///
    /// Never fails: malformed records are skipped and counted.
    #[instrument(skip_all, fields(records = records.len()))]
    pub fn build(&self, records: &[LogRecord]) -> InsightsReport {
        let (total_records, batch) = self.stamp(records);
        let stamped = &batch.records;

        debug!(
            "Running aggregators {}, {}, {}, {}, {}, {}",
            self.peak_hours.name(),
            self.top_queries.name(),
            self.categories.name(),
            self.sentiment.name(),
            self.locations.name(),
            self.daily.name()
        );

        let report = InsightsReport {
            generated_at: Utc::now(),
            total_records,
            skipped_records: batch.skipped,
            peak_hours: self.peak_hours.aggregate(stamped),
            top_queries: self.top_queries.aggregate(stamped),
            categories: self.categories.aggregate(stamped),
            sentiment: self.sentiment.aggregate(stamped),
            location_faqs: self.locations.aggregate(stamped),
            daily: self.daily.aggregate(stamped),
        };

        info!(
            "Built report over {} records ({} skipped)",
            report.total_records, report.skipped_records
        );
        report
    }

    /// Fetches a snapshot from `source` and builds a report over it.
    #[instrument(skip_all, fields(source = source.name()))]
    pub async fn build_from(&self, source: &dyn LogSource) -> Result<InsightsReport> {
        let records = source.fetch(self.scope).await?;
        Ok(self.build(&records))
    }

    /// Location to queries mapping without the rest of the report.
    pub fn location_faqs(&self, records: &[LogRecord]) -> LocationFaqs {
        let (_, batch) = self.stamp(records);
        self.locations.aggregate(&batch.records)
    }

    /// Queries mentioning one location; empty when unknown or unmatched.
    pub fn lookup_location(&self, records: &[LogRecord], location: &str) -> Vec<String> {
        self.location_faqs(records).lookup(location).to_vec()
    }

    /// Distinct queries containing `term`, case-insensitively.
    pub fn search(&self, records: &[LogRecord], term: &str) -> Result<Vec<String>> {
        let (_, batch) = self.stamp(records);
        search_queries(&batch.records, term)
    }
}
