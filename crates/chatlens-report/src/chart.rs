//! Chart specifications for an external renderer.
//!
//! These are plain data: a renderer picks the kind, draws the points in the
//! given order and uses the labels verbatim.

use crate::categories::CategoryBreakdown;
use crate::peak_hours::HourlyDataPoint;
use crate::report::InsightsReport;
use crate::sentiment::SentimentCount;
use crate::top_queries::QueryCount;
use serde::{Deserialize, Serialize};

/// Title of the peak interaction chart.
pub const PEAK_HOURS_TITLE: &str = "Peak User Interaction Times";
/// Title of the top queries chart.
pub const TOP_QUERIES_TITLE: &str = "Top FAQs";
/// Title of the category chart.
pub const CATEGORIES_TITLE: &str = "User Query Trends by Category";
/// Title of the feedback chart.
pub const SENTIMENT_TITLE: &str = "Feedback Sentiments Distribution";

/// Supported chart kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    /// Vertical bars, one per point.
    Bar,
    /// Slices proportional to each point's value.
    Pie,
}

/// One labelled value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    /// Category axis label or slice name.
    pub label: String,
    /// Bar height or slice weight.
    pub value: f64,
}

/// A renderable chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    /// Chart kind.
    pub kind: ChartKind,
    /// Chart title.
    pub title: String,
    /// X axis label; bar charts only.
    pub x_label: Option<String>,
    /// Y axis label; bar charts only.
    pub y_label: Option<String>,
    /// Points in display order.
    pub points: Vec<ChartPoint>,
}

impl ChartSpec {
    fn bar(title: &str, x_label: &str, y_label: &str, points: Vec<ChartPoint>) -> Self {
        Self {
            kind: ChartKind::Bar,
            title: title.to_string(),
            x_label: Some(x_label.to_string()),
            y_label: Some(y_label.to_string()),
            points,
        }
    }

    fn pie(title: &str, points: Vec<ChartPoint>) -> Self {
        Self {
            kind: ChartKind::Pie,
            title: title.to_string(),
            x_label: None,
            y_label: None,
            points,
        }
    }

    /// Bar chart of the hourly histogram, in hour order.
    pub fn peak_hours(histogram: &[HourlyDataPoint]) -> Self {
        let points = histogram
            .iter()
            .map(|d| ChartPoint {
                label: d.label.clone(),
                value: f64::from(d.count),
            })
            .collect();
        Self::bar(PEAK_HOURS_TITLE, "Time Range", "Number of Interactions", points)
    }

    /// Bar chart of the most frequent queries.
    pub fn top_queries(queries: &[QueryCount]) -> Self {
        let points = queries
            .iter()
            .map(|q| ChartPoint {
                label: q.query.clone(),
                value: f64::from(q.count),
            })
            .collect();
        Self::bar(TOP_QUERIES_TITLE, "Query", "Count", points)
    }

    /// Pie chart of category percentages. Empty categories are left out.
    pub fn categories(breakdown: &CategoryBreakdown) -> Self {
        let points = breakdown
            .entries
            .iter()
            .filter(|e| e.count > 0)
            .map(|e| ChartPoint {
                label: e.category.clone(),
                value: e.percentage,
            })
            .collect();
        Self::pie(CATEGORIES_TITLE, points)
    }

    /// Pie chart of the feedback tally.
    pub fn sentiment(sentiment: &[SentimentCount]) -> Self {
        let points = sentiment
            .iter()
            .map(|s| ChartPoint {
                label: s.label.clone(),
                value: f64::from(s.count),
            })
            .collect();
        Self::pie(SENTIMENT_TITLE, points)
    }

    /// Whether the chart has nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.points.iter().all(|p| p.value <= 0.0)
    }
}

/// The four dashboard charts, in dashboard order.
pub fn report_charts(report: &InsightsReport) -> Vec<ChartSpec> {
    vec![
        ChartSpec::peak_hours(&report.peak_hours),
        ChartSpec::top_queries(&report.top_queries),
        ChartSpec::categories(&report.categories),
        ChartSpec::sentiment(&report.sentiment),
    ]
}
