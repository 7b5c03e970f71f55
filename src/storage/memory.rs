use async_trait::async_trait;
use chrono::Utc;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::models::PriceRecord;
use crate::storage::{BatchId, ResultStore};

pub const DEFAULT_MAX_BATCHES: usize = 32;

#[derive(Default)]
struct Batches {
    by_id: HashMap<BatchId, Vec<PriceRecord>>,
    /// Oldest first. The back is the latest batch.
    order: VecDeque<BatchId>,
}

/// Process-local store. Every batch is kept under its own id, so concurrent
/// submissions never overwrite each other. Only the newest `max_batches`
/// batches are retained.
pub struct MemoryStore {
    batches: RwLock<Batches>,
    sequence: AtomicU64,
    max_batches: usize,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_MAX_BATCHES)
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(max_batches: usize) -> Self {
        Self {
            batches: RwLock::new(Batches::default()),
            sequence: AtomicU64::new(0),
            max_batches: max_batches.max(1),
        }
    }

    fn next_id(&self, row_count: usize) -> BatchId {
        let sequence = self.sequence.fetch_add(1, Ordering::Relaxed);
        let seed = format!(
            "{}|{}|{}",
            Utc::now().timestamp_nanos_opt().unwrap_or_default(),
            sequence,
            row_count
        );
        BatchId(format!("{:x}", md5::compute(seed.as_bytes())))
    }
}

#[async_trait]
impl ResultStore for MemoryStore {
    async fn save(&self, records: Vec<PriceRecord>) -> BatchId {
        let batch_id = self.next_id(records.len());
        let mut batches = self.batches.write().await;

        info!("Stored batch {} with {} records", batch_id, records.len());
        batches.by_id.insert(batch_id.clone(), records);
        batches.order.push_back(batch_id.clone());

        while batches.order.len() > self.max_batches {
            if let Some(evicted) = batches.order.pop_front() {
                batches.by_id.remove(&evicted);
                debug!("Evicted batch {}", evicted);
            }
        }
        batch_id
    }

    async fn get(&self, batch_id: &BatchId) -> Option<Vec<PriceRecord>> {
        self.batches.read().await.by_id.get(batch_id).cloned()
    }

    async fn latest(&self) -> Option<(BatchId, Vec<PriceRecord>)> {
        let batches = self.batches.read().await;
        let batch_id = batches.order.back()?.clone();
        let records = batches.by_id.get(&batch_id)?.clone();
        Some((batch_id, records))
    }
}
