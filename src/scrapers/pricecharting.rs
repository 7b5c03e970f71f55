use async_trait::async_trait;
use scraper::Html;
use std::sync::Arc;
use tracing::info;
use url::Url;

use crate::config::ScraperConfig;
use crate::error::{ExtractError, FetchError};
use crate::models::{CardQuery, FieldValue, PriceRecord, ResolvedLink};
use crate::parsers::{find_product_link, parse_price_page};
use crate::scrapers::PriceSource;
use crate::utils::http::PageFetcher;

pub struct PriceChartingScraper {
    fetcher: Arc<dyn PageFetcher>,
    config: Arc<ScraperConfig>,
}

impl PriceChartingScraper {
    pub fn new(fetcher: Arc<dyn PageFetcher>, config: Arc<ScraperConfig>) -> Self {
        Self { fetcher, config }
    }

    /// `{base}/search-products?q={card}+{id}&type=prices`
    pub fn search_url(&self, query: &CardQuery) -> Result<Url, FetchError> {
        let invalid = |source| FetchError::InvalidUrl {
            url: format!("{}{}", self.config.base_url, self.config.search_path),
            source,
        };

        let mut url = Url::parse(&self.config.base_url)
            .and_then(|base| base.join(&self.config.search_path))
            .map_err(invalid)?;
        url.query_pairs_mut()
            .append_pair("q", &query.search_terms())
            .append_pair("type", "prices");

        Ok(url)
    }

    /// True when one of the URL's path segments marks a single-product page.
    pub fn is_product_page(&self, url: &str) -> bool {
        Url::parse(url)
            .ok()
            .and_then(|url| {
                url.path_segments()
                    .map(|mut segments| segments.any(|s| s == self.config.product_path_segment))
            })
            .unwrap_or(false)
    }
}

#[async_trait]
impl PriceSource for PriceChartingScraper {
    async fn search(&self, query: &CardQuery) -> Result<ResolvedLink, FetchError> {
        let url = self.search_url(query)?;
        info!("Searching for {} ({})", query, url);

        let page = self.fetcher.fetch(url.as_str()).await?;

        if self.is_product_page(&page.final_url) {
            info!("Search for {} landed on product page {}", query, page.final_url);
            return Ok(ResolvedLink::ProductPage(page.final_url));
        }

        Ok(match disambiguate(query, &page.body, &page.final_url) {
            Some(link) => ResolvedLink::Matched(link),
            None => ResolvedLink::NotFound,
        })
    }

    async fn extract(&self, link: &str, query: &CardQuery) -> Result<PriceRecord, ExtractError> {
        info!("Fetching prices for {} from {}", query, link);
        let page = self.fetcher.fetch(link).await?;
        let parsed = parse_price_page(&page.body);

        let mut record = PriceRecord::unavailable(query);
        for (tier, value) in parsed.prices {
            record.set_price(tier, value);
        }
        record.img_link = FieldValue::from(
            parsed
                .image_src
                .map(|src| absolutize(&page.final_url, &src)),
        );
        record.final_link = FieldValue::Present(link.to_string());

        Ok(record)
    }
}

fn disambiguate(query: &CardQuery, body: &str, page_url: &str) -> Option<String> {
    let document = Html::parse_document(body);
    find_product_link(query, &document).map(|href| absolutize(page_url, &href))
}

/// Resolves `href` against `base`, leaving it untouched if either is unusable.
fn absolutize(base: &str, href: &str) -> String {
    Url::parse(base)
        .and_then(|base| base.join(href))
        .map(|url| url.to_string())
        .unwrap_or_else(|_| href.to_string())
}
