//! Shared fixtures for the integration tests: a scraper and resolver wired to
//! a `wiremock` server, plus builders for the two kinds of page the price site
//! serves.

#![allow(dead_code)]

use std::sync::Arc;

use card_pricer::config::{ScraperConfig, SearchFailurePolicy};
use card_pricer::scrapers::PriceChartingScraper;
use card_pricer::utils::http::HttpFetcher;
use card_pricer::BatchResolver;
use wiremock::MockServer;

pub fn config_for(base_url: &str) -> ScraperConfig {
    ScraperConfig {
        base_url: base_url.to_string(),
        timeout_seconds: 5,
        ..ScraperConfig::default()
    }
}

pub fn scraper_for(base_url: &str) -> PriceChartingScraper {
    let config = Arc::new(config_for(base_url));
    let fetcher = Arc::new(HttpFetcher::from_config(&config).unwrap());
    PriceChartingScraper::new(fetcher, config)
}

pub fn resolver_for(server: &MockServer, policy: SearchFailurePolicy) -> BatchResolver {
    BatchResolver::new(Arc::new(scraper_for(&server.uri())), policy)
}

/// A product page with a `#full-prices` table and optionally a product image.
pub fn product_page(prices: &[(&str, &str)], image: Option<&str>) -> String {
    let rows: String = prices
        .iter()
        .map(|(label, value)| format!("<tr><td class=\"title\">{label}</td><td class=\"price js-price\">\n  {value}\n</td></tr>"))
        .collect();
    let img = image
        .map(|src| format!(r#"<div class="cover"><img itemprop="image" src="{src}" alt="card"></div>"#))
        .unwrap_or_default();

    format!(
        r#"<html><head><title>Prices</title></head><body>
        {img}
        <table id="full-prices"><tbody>
          <tr><th>Condition</th><th>Price</th></tr>
          {rows}
        </tbody></table>
        </body></html>"#
    )
}

/// A search listing with one anchor per href, in order.
pub fn results_page(hrefs: &[&str]) -> String {
    let rows: String = hrefs
        .iter()
        .map(|href| format!(r#"<tr><td class="title"><a href="{href}">result</a></td></tr>"#))
        .collect();

    format!(
        r#"<html><body>
        <a href="/">Home</a>
        <table id="games_table">{rows}</table>
        </body></html>"#
    )
}
