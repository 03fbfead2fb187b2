//! Most frequent user queries.

use crate::aggregator::DataAggregator;
use crate::time_bucket::StampedRecord;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, instrument};

/// Default length of the top queries list.
pub const DEFAULT_TOP_QUERIES: usize = 10;

/// A distinct query and how often it was asked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryCount {
    /// Query text, exactly as stored.
    pub query: String,
    /// Number of records with this exact text.
    pub count: u32,
}

/// Counts identical queries and keeps the most frequent.
///
/// Matching is exact string equality. Records without a query are ignored.
/// Ties keep the order in which the queries were first seen.
#[derive(Debug, Clone, Copy)]
pub struct TopQueriesAggregator {
    /// Maximum number of queries to return.
    pub limit: usize,
}

impl TopQueriesAggregator {
    /// Creates an aggregator returning the top 10 queries.
    pub const fn new() -> Self {
        Self {
            limit: DEFAULT_TOP_QUERIES,
        }
    }

    /// Creates an aggregator returning at most `limit` queries.
    pub const fn with_limit(limit: usize) -> Self {
        Self { limit }
    }
}

impl Default for TopQueriesAggregator {
    fn default() -> Self {
        Self::new()
    }
}

impl DataAggregator for TopQueriesAggregator {
    type Output = Vec<QueryCount>;

    fn name(&self) -> &'static str {
        "top_queries"
    }

    #[instrument(skip_all, fields(records = records.len(), limit = self.limit))]
    fn aggregate(&self, records: &[StampedRecord<'_>]) -> Self::Output {
        // query -> (count, first-seen position)
        let mut query_counts: HashMap<&str, (u32, usize)> = HashMap::new();

        for query in records.iter().filter_map(StampedRecord::query) {
            let next_position = query_counts.len();
            let entry = query_counts.entry(query).or_insert((0, next_position));
            entry.0 = entry.0.saturating_add(1);
        }

        let mut ranked: Vec<(&str, u32, usize)> = query_counts
            .into_iter()
            .map(|(query, (count, position))| (query, count, position))
            .collect();

        // Sort by count descending, first appearance breaks ties
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));
        ranked.truncate(self.limit);

        let result: Vec<QueryCount> = ranked
            .into_iter()
            .map(|(query, count, _)| QueryCount {
                query: query.to_string(),
                count,
            })
            .collect();

        debug!("Aggregated {} top query data points", result.len());
        result
    }
}
