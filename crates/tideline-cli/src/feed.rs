//! In-memory JSON feed served page by page.
//!
//! Records are held newest first. A page request answers with the records
//! strictly after the cursor record, in feed order; a `None` cursor (or one
//! that is no longer in the feed) starts from the newest record.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Value, json};
use tokio::sync::RwLock;
use tracing::{debug, info};

use tideline_pager::{Fetched, PageSource, json_field};

#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("feed file must hold a JSON array of records")]
    NotAnArray,
}

/// Shared, append-at-head record store.
#[derive(Clone)]
pub struct MemoryFeed {
    records: Arc<RwLock<Vec<Value>>>,
    key_field: String,
}

impl MemoryFeed {
    pub fn new(records: Vec<Value>, key_field: impl Into<String>) -> Self {
        Self {
            records: Arc::new(RwLock::new(records)),
            key_field: key_field.into(),
        }
    }

    /// `count` synthetic records keyed `count..=1`, newest first.
    pub fn synthetic(count: u64, key_field: &str) -> Self {
        let records = (1..=count)
            .rev()
            .map(|n| json!({ key_field: n, "memo": format!("record {n}") }))
            .collect();
        Self::new(records, key_field)
    }

    /// Load a JSON array of records (newest first) from disk.
    pub fn load(path: impl AsRef<Path>, key_field: &str) -> Result<Self, FeedError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        match serde_json::from_str::<Value>(&text)? {
            Value::Array(records) => {
                info!("Loaded {} records from {}", records.len(), path.display());
                Ok(Self::new(records, key_field))
            }
            _ => Err(FeedError::NotAnArray),
        }
    }

    pub fn key_field(&self) -> &str {
        &self.key_field
    }

    /// Record a new arrival at the head of the feed.
    ///
    /// Returns false, leaving the feed untouched, when the head already
    /// carries the same key.
    pub async fn push_latest(&self, record: Value) -> bool {
        let key = json_field(self.key_field.as_str());
        let mut records = self.records.write().await;
        if records.first().is_some_and(|head| key(head) == key(&record)) {
            debug!("Ignoring arrival already at feed head: {}", key(&record));
            return false;
        }
        records.insert(0, record);
        true
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }
}

#[async_trait]
impl PageSource<Value> for MemoryFeed {
    type Key = Value;
    type Error = FeedError;

    async fn initial(&self, page_size: usize) -> Result<Fetched<Value>, FeedError> {
        let records = self.records.read().await;
        Ok(records.iter().take(page_size).cloned().collect())
    }

    async fn page(&self, cursor: Option<Value>, page_size: usize) -> Result<Fetched<Value>, FeedError> {
        let records = self.records.read().await;
        let key = json_field(self.key_field.as_str());
        let start = cursor
            .and_then(|c| records.iter().position(|r| key(r) == c))
            .map_or(0, |pos| pos + 1);
        debug!("Serving page from position {} (page_size={})", start, page_size);
        Ok(records.iter().skip(start).take(page_size).cloned().collect())
    }
}
