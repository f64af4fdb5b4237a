//! Id sources
//!
//! Every add action mints a fresh id. Ids only need to be distinct within the
//! session; they carry no meaning beyond identity.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;

/// Source of fresh, never-repeating entity ids
pub trait IdSource: Send + Sync {
    /// Next id for the given entity prefix (`"section"`, `"field"`, ...)
    fn next_id(&self, prefix: &str) -> String;
}

/// Wall-clock ids: `{prefix}-{unix_millis}-{counter}`
///
/// The counter keeps ids minted within the same millisecond apart.
#[derive(Debug, Default)]
pub struct TimestampIdSource {
    counter: AtomicU64,
}

impl TimestampIdSource {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdSource for TimestampIdSource {
    fn next_id(&self, prefix: &str) -> String {
        let seq = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        format!("{}-{}-{}", prefix, Utc::now().timestamp_millis(), seq)
    }
}

/// Deterministic ids: `{prefix}-{counter}`, one counter shared by all prefixes
#[derive(Debug, Default)]
pub struct SequentialIdSource {
    counter: AtomicU64,
}

impl SequentialIdSource {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdSource for SequentialIdSource {
    fn next_id(&self, prefix: &str) -> String {
        let seq = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        format!("{}-{}", prefix, seq)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_timestamp_ids_are_distinct() {
        let ids = TimestampIdSource::new();
        let minted: HashSet<String> = (0..1000).map(|_| ids.next_id("field")).collect();
        assert_eq!(minted.len(), 1000);
        assert!(minted.iter().all(|id| id.starts_with("field-")));
    }

    #[test]
    fn test_sequential_ids() {
        let ids = SequentialIdSource::new();
        assert_eq!(ids.next_id("section"), "section-1");
        assert_eq!(ids.next_id("indicator"), "indicator-2");
    }
}
