//! Plain text rendering of reports and query lists.

use chatlens_common::{format_timestamp, truncate_string};
use chatlens_report::{
    InsightsReport, LocationFaqs, CATEGORIES_TITLE, PEAK_HOURS_TITLE, SENTIMENT_TITLE,
    TOP_QUERIES_TITLE,
};
use std::fmt;

/// Longest query shown in a table row.
const MAX_QUERY_WIDTH: usize = 60;

/// Text rendering of a full report.
pub struct TextReport<'a>(pub &'a InsightsReport);

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;

        writeln!(f, "Generated: {}", format_timestamp(report.generated_at))?;
        writeln!(
            f,
            "Records: {} ({} skipped for malformed timestamps)",
            report.total_records, report.skipped_records
        )?;

        writeln!(f)?;
        writeln!(f, "{PEAK_HOURS_TITLE}")?;
        for point in &report.peak_hours {
            writeln!(f, "  {:<16} {:>6}", point.label, point.count)?;
        }

        writeln!(f)?;
        writeln!(f, "{TOP_QUERIES_TITLE}")?;
        if report.top_queries.is_empty() {
            writeln!(f, "  (none)")?;
        }
        for (rank, query) in report.top_queries.iter().enumerate() {
            writeln!(
                f,
                "  {:>2}. {:<width$} {:>6}",
                rank + 1,
                truncate_string(&query.query, MAX_QUERY_WIDTH),
                query.count,
                width = MAX_QUERY_WIDTH
            )?;
        }

        writeln!(f)?;
        writeln!(f, "{CATEGORIES_TITLE}")?;
        for share in &report.categories.entries {
            writeln!(
                f,
                "  {:<16} {:>6} {:>6.1}%",
                share.category, share.count, share.percentage
            )?;
        }
        writeln!(f, "  {:<16} {:>6}", "Unclassified", report.categories.unclassified)?;

        writeln!(f)?;
        writeln!(f, "{SENTIMENT_TITLE}")?;
        if report.sentiment.is_empty() {
            writeln!(f, "  (no feedback)")?;
        }
        for sentiment in &report.sentiment {
            writeln!(f, "  {:<16} {:>6}", sentiment.label, sentiment.count)?;
        }

        Ok(())
    }
}

/// One query per line.
pub fn query_list(queries: &[String]) -> String {
    queries.iter().map(|q| format!("{q}\n")).collect()
}

/// Locations with their number of matching queries.
pub fn location_summary(faqs: &LocationFaqs) -> String {
    faqs.entries
        .iter()
        .map(|entry| format!("{} ({})\n", entry.location, entry.queries.len()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatlens_common::test_utils::record_fixtures::campus_log;
    use chatlens_config::Config;
    use chatlens_report::ReportBuilder;

    #[test]
    fn test_text_report_sections() {
        let report = ReportBuilder::from_config(&Config::default())
            .unwrap()
            .build(&campus_log());
        let text = TextReport(&report).to_string();

        assert!(text.contains("Records: 8 (1 skipped"));
        assert!(text.contains(PEAK_HOURS_TITLE));
        assert!(text.contains("11 PM to 12 AM"));
        assert!(text.contains("What is the hostel fee for Jaipur campus?"));
        assert!(text.contains("40.0%"));
        assert!(text.contains("  Unclassified          1\n"));
        assert!(text.contains("Thumbs Down"));
    }

    #[test]
    fn test_text_report_empty() {
        let report = ReportBuilder::from_config(&Config::default())
            .unwrap()
            .build(&[]);
        let text = TextReport(&report).to_string();
        assert!(text.contains("(none)"));
        assert!(text.contains("(no feedback)"));
    }

    #[test]
    fn test_lists() {
        assert_eq!(query_list(&["a".to_string(), "b".to_string()]), "a\nb\n");
        assert_eq!(query_list(&[]), "");

        let report = ReportBuilder::from_config(&Config::default())
            .unwrap()
            .build(&campus_log());
        assert_eq!(
            location_summary(&report.location_faqs),
            "Jaipur (1)\nUdaipur (1)\nKota (1)\n"
        );
    }
}
