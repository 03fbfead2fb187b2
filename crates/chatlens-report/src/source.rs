//! Record-fetch interface.

use async_trait::async_trait;
use chatlens_common::{LogRecord, RecordScope, Result};
use tracing::debug;

/// Something that can hand over a snapshot of logged interactions.
///
/// A failure here is a request-level failure: nothing is retried and no
/// partial report is built.
#[async_trait]
pub trait LogSource: Send + Sync {
    /// Fetches every record admitted by `scope`.
    async fn fetch(&self, scope: RecordScope) -> Result<Vec<LogRecord>>;

    /// Short identifier used in logs.
    fn name(&self) -> &'static str;
}

/// A fixed in-memory record set.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    records: Vec<LogRecord>,
}

impl MemorySource {
    /// Wraps an existing record collection.
    pub fn new(records: Vec<LogRecord>) -> Self {
        Self { records }
    }

    /// All held records, regardless of scope.
    pub fn records(&self) -> &[LogRecord] {
        &self.records
    }
}

impl From<Vec<LogRecord>> for MemorySource {
    fn from(records: Vec<LogRecord>) -> Self {
        Self::new(records)
    }
}

#[async_trait]
impl LogSource for MemorySource {
    async fn fetch(&self, scope: RecordScope) -> Result<Vec<LogRecord>> {
        let records: Vec<LogRecord> = self
            .records
            .iter()
            .filter(|r| scope.admits(r))
            .cloned()
            .collect();
        debug!("Fetched {} of {} in-memory records", records.len(), self.records.len());
        Ok(records)
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_source_honours_scope() {
        let source = MemorySource::new(vec![
            LogRecord::new(1, "2024-11-20 10:00:00").with_query("hostel fees"),
            LogRecord::new(2, "2024-11-20 11:00:00")
                .with_query("capital of France")
                .out_of_scope(),
        ]);

        let in_scope = source.fetch(RecordScope::InScopeOnly).await.unwrap();
        assert_eq!(in_scope.len(), 1);
        assert_eq!(in_scope[0].query(), Some("hostel fees"));

        let all = source.fetch(RecordScope::All).await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(source.records().len(), 2);
        assert_eq!(source.name(), "memory");
    }

    #[tokio::test]
    async fn test_usable_as_trait_object() {
        let source: Box<dyn LogSource> = Box::new(MemorySource::default());
        assert!(source.fetch(RecordScope::All).await.unwrap().is_empty());
    }
}
