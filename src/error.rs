use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid url {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP error {status}: {url}")]
    Status { url: String, status: u16 },
}

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("could not fetch product page: {0}")]
    Fetch(#[from] FetchError),
}

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("search for row {row} ({card}) failed: {source}")]
    SearchFailed {
        row: usize,
        card: String,
        #[source]
        source: FetchError,
    },
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read variant catalog {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed variant catalog: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid set pattern {pattern:?}: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}
