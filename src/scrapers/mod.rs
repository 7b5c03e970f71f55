use async_trait::async_trait;

use crate::error::{ExtractError, FetchError};
use crate::models::{CardQuery, PriceRecord, ResolvedLink};

mod pricecharting;

pub use pricecharting::PriceChartingScraper;

/// A site that can locate a card's product page and read its prices.
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Runs the site search for a normalized query and settles on one link.
    async fn search(&self, query: &CardQuery) -> Result<ResolvedLink, FetchError>;

    /// Reads the price table behind `link`. Identity fields come from `query`.
    async fn extract(&self, link: &str, query: &CardQuery) -> Result<PriceRecord, ExtractError>;
}
