//! Keyword-based query categorisation.

use crate::aggregator::DataAggregator;
use crate::time_bucket::StampedRecord;
use chatlens_config::CategoryConfig;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// A category with its keywords lowercased for matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    name: String,
    keywords: Vec<String>,
}

impl Category {
    /// Creates a category. Keywords are matched case-insensitively.
    pub fn new(name: impl Into<String>, keywords: impl IntoIterator<Item = impl AsRef<str>>) -> Self {
        Self {
            name: name.into(),
            keywords: keywords
                .into_iter()
                .map(|k| k.as_ref().to_lowercase())
                .collect(),
        }
    }

    /// Category display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether an already-lowercased query mentions any keyword.
    fn matches(&self, query_lower: &str) -> bool {
        self.keywords.iter().any(|k| query_lower.contains(k.as_str()))
    }
}

impl From<&CategoryConfig> for Category {
    fn from(config: &CategoryConfig) -> Self {
        Self::new(config.name.clone(), &config.keywords)
    }
}

/// Share of classified queries that fell into one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryShare {
    /// Category name.
    pub category: String,
    /// Number of queries assigned to the category.
    pub count: u32,
    /// `count` as a percentage of all classified queries; 0 when nothing classified.
    pub percentage: f64,
}

/// Per-category tally in category order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    /// One entry per configured category, including empty ones.
    pub entries: Vec<CategoryShare>,
    /// Queries assigned to some category.
    pub classified: u32,
    /// Queries that matched no category. They are not part of `entries`.
    pub unclassified: u32,
}

impl CategoryBreakdown {
    /// `(category, count)` pairs.
    pub fn counts(&self) -> Vec<(&str, u32)> {
        self.entries
            .iter()
            .map(|e| (e.category.as_str(), e.count))
            .collect()
    }

    /// `(category, percentage)` pairs.
    pub fn percentages(&self) -> Vec<(&str, f64)> {
        self.entries
            .iter()
            .map(|e| (e.category.as_str(), e.percentage))
            .collect()
    }

    /// Looks up one category's share by name.
    pub fn get(&self, category: &str) -> Option<&CategoryShare> {
        self.entries.iter().find(|e| e.category == category)
    }
}

/// Assigns each query to the first category whose keywords it mentions.
#[derive(Debug, Clone, Default)]
pub struct CategoryAggregator {
    categories: Vec<Category>,
}

impl CategoryAggregator {
    /// Creates an aggregator over `categories`, tried in the given order.
    pub fn new(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    /// Creates an aggregator from configuration entries.
    pub fn from_config(categories: &[CategoryConfig]) -> Self {
        Self::new(categories.iter().map(Category::from).collect())
    }

    /// The categories in matching order.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Index of the first category matching `query`, if any.
    fn classify_index(&self, query: &str) -> Option<usize> {
        let query_lower = query.to_lowercase();
        self.categories.iter().position(|c| c.matches(&query_lower))
    }

    /// Name of the first category matching `query`, if any.
    pub fn classify(&self, query: &str) -> Option<&str> {
        self.classify_index(query)
            .map(|index| self.categories[index].name())
    }
}

impl DataAggregator for CategoryAggregator {
    type Output = CategoryBreakdown;

    fn name(&self) -> &'static str {
        "categories"
    }

    #[instrument(skip_all, fields(records = records.len(), categories = self.categories.len()))]
    fn aggregate(&self, records: &[StampedRecord<'_>]) -> Self::Output {
        let mut counts = vec![0u32; self.categories.len()];
        let mut unclassified = 0u32;

        for query in records.iter().filter_map(StampedRecord::query) {
            match self.classify_index(query) {
                Some(index) => counts[index] = counts[index].saturating_add(1),
                None => unclassified = unclassified.saturating_add(1),
            }
        }

        let classified: u32 = counts.iter().sum();
        let entries = self
            .categories
            .iter()
            .zip(counts)
            .map(|(category, count)| CategoryShare {
                category: category.name().to_string(),
                count,
                percentage: if classified == 0 {
                    0.0
                } else {
                    f64::from(count) / f64::from(classified) * 100.0
                },
            })
            .collect();

        debug!(
            "Classified {} queries, {} matched no category",
            classified, unclassified
        );

        CategoryBreakdown {
            entries,
            classified,
            unclassified,
        }
    }
}
