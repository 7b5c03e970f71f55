//! Drives search, disambiguation and extraction over a batch of queries.
//!
//! Rows are resolved one after another in input order and every row yields
//! exactly one record. Only a search failure under
//! [`SearchFailurePolicy::Abort`] ends a batch early.

use std::sync::Arc;
use tracing::{error, info, warn};

use crate::config::SearchFailurePolicy;
use crate::error::ResolveError;
use crate::models::{CardQuery, PriceRecord, ResolvedLink};
use crate::scrapers::PriceSource;

pub struct BatchResolver {
    source: Arc<dyn PriceSource>,
    policy: SearchFailurePolicy,
}

impl BatchResolver {
    pub fn new(source: Arc<dyn PriceSource>, policy: SearchFailurePolicy) -> Self {
        Self { source, policy }
    }

    pub fn policy(&self) -> SearchFailurePolicy {
        self.policy
    }

    pub async fn resolve(&self, queries: &[CardQuery]) -> Result<Vec<PriceRecord>, ResolveError> {
        info!("Resolving batch of {} cards", queries.len());

        let mut records = Vec::with_capacity(queries.len());
        for (row, query) in queries.iter().enumerate() {
            records.push(self.resolve_row(row, query).await?);
        }

        let priced = records.iter().filter(|r| r.has_any_price()).count();
        info!("Batch resolved: {} of {} cards priced", priced, records.len());
        Ok(records)
    }

    async fn resolve_row(&self, row: usize, query: &CardQuery) -> Result<PriceRecord, ResolveError> {
        let query = query.normalized();

        let link = match self.source.search(&query).await {
            Ok(link) => link,
            Err(e) => match self.policy {
                SearchFailurePolicy::Abort => {
                    error!("Search failed for {}, aborting batch: {}", query, e);
                    return Err(ResolveError::SearchFailed {
                        row,
                        card: query.to_string(),
                        source: e,
                    });
                }
                SearchFailurePolicy::Fallback => {
                    warn!("Search failed for {}, marking as not available: {}", query, e);
                    return Ok(PriceRecord::unavailable(&query));
                }
            },
        };

        let Some(url) = link.url() else {
            return Ok(PriceRecord::unavailable(&query));
        };

        if matches!(link, ResolvedLink::ProductPage(_)) {
            info!("Direct product page for {}", query);
        }

        match self.source.extract(url, &query).await {
            Ok(record) => Ok(record),
            Err(e) => {
                error!(
                    "Failed to extract table for {}, setting all prices to not available: {}",
                    query, e
                );
                Ok(PriceRecord::unavailable(&query))
            }
        }
    }
}
