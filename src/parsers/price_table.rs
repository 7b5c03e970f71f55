use once_cell::sync::Lazy;
use scraper::{Html, Selector};

use super::clean_text;
use crate::models::PriceTier;

static PRICE_ROW_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("#full-prices tr").expect("Invalid price row selector"));

static CELL_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("td").expect("Invalid cell selector"));

static PRODUCT_IMAGE_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(r#"img[itemprop="image"]"#).expect("Invalid product image selector")
});

/// What a product page yielded. Missing pieces are simply absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PricePage {
    pub prices: Vec<(PriceTier, String)>,
    pub image_src: Option<String>,
}

pub fn parse_price_page(html: &str) -> PricePage {
    let document = Html::parse_document(html);
    PricePage {
        prices: parse_price_rows(&document),
        image_src: product_image(&document),
    }
}

/// Two-cell rows of the full price table whose label is a known tier.
/// Later rows with the same label overwrite earlier ones.
pub fn parse_price_rows(document: &Html) -> Vec<(PriceTier, String)> {
    let mut prices: Vec<(PriceTier, String)> = Vec::new();

    for row in document.select(&PRICE_ROW_SELECTOR) {
        let cells: Vec<String> = row
            .select(&CELL_SELECTOR)
            .map(|cell| clean_text(&cell.text().collect::<String>()))
            .collect();

        let [label, value] = cells.as_slice() else {
            continue;
        };

        if let Some(tier) = PriceTier::from_label(label) {
            prices.retain(|(existing, _)| *existing != tier);
            prices.push((tier, value.clone()));
        }
    }

    prices
}

pub fn product_image(document: &Html) -> Option<String> {
    document
        .select(&PRODUCT_IMAGE_SELECTOR)
        .next()
        .and_then(|img| img.value().attr("src"))
        .map(str::to_string)
}
