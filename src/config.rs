use config::{Environment, File};
use serde::{Deserialize, Serialize};

use crate::storage::DEFAULT_MAX_BATCHES;

const DEFAULT_CONFIG_FILE: &str = "card_pricer.toml";
const CONFIG_PATH_ENV: &str = "CARD_PRICER_CONFIG";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub scraper: ScraperConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub variants: VariantsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScraperConfig {
    pub base_url: String,
    pub search_path: String,
    /// Path segment that marks a single-product page, e.g. `/game/...`.
    pub product_path_segment: String,
    pub user_agent: String,
    pub timeout_seconds: u64,
    pub max_attempts: u32,
    pub search_failure_policy: SearchFailurePolicy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Resolved batches kept in memory; older ones are evicted.
    pub max_batches: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            max_batches: DEFAULT_MAX_BATCHES,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VariantsConfig {
    pub catalog_path: Option<String>,
}

/// What a failed search request does to the rest of the batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchFailurePolicy {
    /// The row gets an identity-only record and the batch continues.
    #[default]
    Fallback,
    /// The whole batch fails.
    Abort,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.pricecharting.com".to_string(),
            search_path: "/search-products".to_string(),
            product_path_segment: "game".to_string(),
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/108.0.0.0 Safari/537.36".to_string(),
            timeout_seconds: 25,
            max_attempts: 1,
            search_failure_policy: SearchFailurePolicy::Fallback,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            scraper: ScraperConfig::default(),
            storage: StorageConfig::default(),
            variants: VariantsConfig::default(),
        }
    }
}

impl Config {
    /// Defaults, then `card_pricer.toml` (or `$CARD_PRICER_CONFIG`) if present,
    /// then `CARD_PRICER__SECTION__KEY` environment variables.
    pub fn load() -> Result<Self, config::ConfigError> {
        let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        let server = ServerConfig::default();
        let scraper = ScraperConfig::default();

        config::Config::builder()
            .set_default("server.host", server.host)?
            .set_default("server.port", i64::from(server.port))?
            .set_default("scraper.base_url", scraper.base_url)?
            .set_default("scraper.search_path", scraper.search_path)?
            .set_default("scraper.product_path_segment", scraper.product_path_segment)?
            .set_default("scraper.user_agent", scraper.user_agent)?
            .set_default("scraper.timeout_seconds", scraper.timeout_seconds as i64)?
            .set_default("scraper.max_attempts", i64::from(scraper.max_attempts))?
            .set_default("scraper.search_failure_policy", "fallback")?
            .set_default("storage.max_batches", DEFAULT_MAX_BATCHES as i64)?
            .add_source(File::with_name(&path).required(false))
            .add_source(Environment::with_prefix("CARD_PRICER").separator("__"))
            .build()?
            .try_deserialize()
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
