//! Trading card price lookup: search a price site for each card, pick the
//! right product page and read its price table into a fixed-shape record.

pub mod config;
pub mod error;
pub mod models;
pub mod parsers;
pub mod resolver;
pub mod scrapers;
pub mod server;
pub mod storage;
pub mod utils;
pub mod variants;

pub use config::{Config, SearchFailurePolicy};
pub use error::{CatalogError, ExtractError, FetchError, ResolveError};
pub use models::{CardQuery, CardVariant, FieldValue, PriceRecord, PriceTier, ResolvedLink};
pub use resolver::BatchResolver;
