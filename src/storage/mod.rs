use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::PriceRecord;

mod memory;
pub use memory::{MemoryStore, DEFAULT_MAX_BATCHES};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BatchId(pub String);

impl fmt::Display for BatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where resolved batches live between submission and retrieval.
#[async_trait]
pub trait ResultStore: Send + Sync {
    async fn save(&self, records: Vec<PriceRecord>) -> BatchId;
    async fn get(&self, batch_id: &BatchId) -> Option<Vec<PriceRecord>>;
    /// The most recently saved batch.
    async fn latest(&self) -> Option<(BatchId, Vec<PriceRecord>)>;
}
