//! Location-based FAQ extraction and free-text query search.

use crate::aggregator::DataAggregator;
use crate::time_bucket::StampedRecord;
use chatlens_common::{contains_lowercase, InsightsError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, instrument};

/// Distinct queries mentioning one location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationFaq {
    /// Location name as configured.
    pub location: String,
    /// Distinct matching queries in first-seen order.
    pub queries: Vec<String>,
}

/// Location to queries mapping, in configured location order.
///
/// Locations without any matching query are not present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationFaqs {
    /// One entry per location with at least one match.
    pub entries: Vec<LocationFaq>,
}

impl LocationFaqs {
    /// Queries for `location`, matched case-insensitively on the name.
    ///
    /// Unknown locations and locations without matches yield an empty slice.
    pub fn lookup(&self, location: &str) -> &[String] {
        let wanted = location.trim().to_lowercase();
        self.entries
            .iter()
            .find(|e| e.location.to_lowercase() == wanted)
            .map_or(&[], |e| e.queries.as_slice())
    }

    /// Names of the locations that have at least one query.
    pub fn locations(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.location.as_str()).collect()
    }

    /// Whether no location matched anything.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Finds queries mentioning each known location.
#[derive(Debug, Clone, Default)]
pub struct LocationFaqAggregator {
    locations: Vec<String>,
}

impl LocationFaqAggregator {
    /// Creates an aggregator over the given location names.
    pub fn new(locations: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            locations: locations.into_iter().map(Into::into).collect(),
        }
    }

    /// The known location names.
    pub fn locations(&self) -> &[String] {
        &self.locations
    }
}

impl DataAggregator for LocationFaqAggregator {
    type Output = LocationFaqs;

    fn name(&self) -> &'static str {
        "location_faqs"
    }

    #[instrument(skip_all, fields(records = records.len(), locations = self.locations.len()))]
    fn aggregate(&self, records: &[StampedRecord<'_>]) -> Self::Output {
        // Lowercase each query once; the location loop reuses it.
        let queries: Vec<(&str, String)> = records
            .iter()
            .filter_map(StampedRecord::query)
            .map(|q| (q, q.to_lowercase()))
            .collect();

        let entries: Vec<LocationFaq> = self
            .locations
            .iter()
            .filter_map(|location| {
                let needle = location.to_lowercase();
                let mut seen = HashSet::new();
                let matches: Vec<String> = queries
                    .iter()
                    .filter(|(_, lower)| lower.contains(needle.as_str()))
                    .filter(|(original, _)| seen.insert(*original))
                    .map(|(original, _)| (*original).to_string())
                    .collect();

                (!matches.is_empty()).then(|| LocationFaq {
                    location: location.clone(),
                    queries: matches,
                })
            })
            .collect();

        debug!(
            "Matched queries for {} of {} locations",
            entries.len(),
            self.locations.len()
        );
        LocationFaqs { entries }
    }
}

/// Distinct queries containing `term`, case-insensitively, in first-seen order.
///
/// The term is trimmed first; a blank term is rejected.
pub fn search_queries(records: &[StampedRecord<'_>], term: &str) -> Result<Vec<String>> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return Err(InsightsError::invalid_input("search term must not be blank"));
    }

    let mut seen = HashSet::new();
    let matches: Vec<String> = records
        .iter()
        .filter_map(StampedRecord::query)
        .filter(|q| contains_lowercase(q, &needle))
        .filter(|q| seen.insert(*q))
        .map(ToString::to_string)
        .collect();

    debug!("Search for {:?} matched {} queries", needle, matches.len());
    Ok(matches)
}
