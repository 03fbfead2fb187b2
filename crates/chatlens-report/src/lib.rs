//! # Chatlens Report
//!
//! Aggregation and report building over chatbot interaction logs.
//!
//! Records come from a [`LogSource`], are stamped with their local hour and
//! date by the [`TimeBucketer`], and are then summarised by independent
//! aggregators. The [`ReportBuilder`] runs them all and returns an
//! [`InsightsReport`] that an external renderer can turn into charts.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod aggregator;
pub mod categories;
pub mod chart;
pub mod daily;
pub mod locations;
pub mod peak_hours;
pub mod report;
pub mod sentiment;
pub mod source;
pub mod sqlite;
pub mod time_bucket;
pub mod top_queries;

pub use aggregator::*;
pub use categories::*;
pub use chart::*;
pub use daily::*;
pub use locations::*;
pub use peak_hours::*;
pub use report::*;
pub use sentiment::*;
pub use source::*;
pub use sqlite::*;
pub use time_bucket::*;
pub use top_queries::*;
