use anyhow::{bail, Context, Result};
use scraper::Html;
use std::fs;

use card_pricer::config::Config;
use card_pricer::models::CardQuery;
use card_pricer::parsers::{candidate_links, match_link, parse_price_page, search_patterns};
use card_pricer::scrapers::PriceChartingScraper;
use card_pricer::utils::http::{HttpFetcher, PageFetcher};
use std::sync::Arc;

/// Usage: analyze_html <card name> <card id> [holo] [reverse] [1st]
#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() < 2 {
        bail!("usage: analyze_html <card name> <card id> [holo] [reverse] [1st]");
    }

    let flags = &args[2..];
    let query = CardQuery::new(&args[0], &args[1])
        .holo(flags.iter().any(|f| f == "holo"))
        .reverse_holo(flags.iter().any(|f| f == "reverse"))
        .first_edition(flags.iter().any(|f| f == "1st"))
        .normalized();

    let config = Config::load().context("Failed to load configuration")?;
    let scraper_config = Arc::new(config.scraper);
    let fetcher = Arc::new(HttpFetcher::from_config(&scraper_config)?);
    let scraper = PriceChartingScraper::new(fetcher.clone(), scraper_config);

    let url = scraper.search_url(&query)?;
    println!("Fetching {}", url);
    let page = fetcher.fetch(url.as_str()).await?;
    fs::write("search_sample.html", &page.body)?;
    println!("Landed on {}", page.final_url);

    if scraper.is_product_page(&page.final_url) {
        println!("Search redirected to a product page");
        let prices = parse_price_page(&page.body);
        for (tier, value) in &prices.prices {
            println!("  {:<16} {}", tier.label(), value);
        }
        println!("  image: {:?}", prices.image_src);
        return Ok(());
    }

    let document = Html::parse_document(&page.body);
    let links = candidate_links(&document);
    println!("Found {} links on the results page", links.len());

    for pattern in search_patterns(&query) {
        let hits = links
            .iter()
            .filter(|href| href.rsplit('/').next().is_some_and(|s| s.contains(&pattern)))
            .count();
        println!("  pattern {:<40} {} hits", pattern, hits);
    }

    match match_link(&query, &links) {
        Some(link) => println!("Chosen link: {}", link),
        None => println!("No matching link"),
    }

    Ok(())
}
