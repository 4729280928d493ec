use ::scraper::error::SelectorErrorKind;

use crate::model::StatColumn;

/// All errors that can occur while scraping, assembling or importing stats.
#[derive(thiserror::Error, Debug)]
pub enum StatsError {
    /// HTTP request failed (network, DNS, TLS, timeout, etc.).
    #[error("http request failed for {url}: {source}")]
    Http {
        url: String,
        source: reqwest::Error,
    },

    /// Server returned a non-success HTTP status code.
    #[error("unexpected status {status} for {url}")]
    UnexpectedStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    /// Failed to read the response body as text.
    #[error("failed to read response body from {url}: {source}")]
    ResponseBody {
        url: String,
        source: reqwest::Error,
    },

    /// A CSS selector string could not be parsed.
    #[error("invalid CSS selector: {0}")]
    Selector(String),

    /// An expected HTML element was not found on the page.
    #[error("expected element not found: {context}")]
    ElementNotFound { context: &'static str },

    /// A stats table header no longer carries a column the normalizer needs.
    #[error("stats table header has no {column} column: {header:?}")]
    SchemaDrift {
        column: StatColumn,
        header: Vec<String>,
    },

    /// A CSV extract could not be read or written.
    #[error("csv error in {path}: {source}")]
    Csv { path: String, source: csv::Error },

    #[error("csv error: {0}")]
    CsvStream(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The persistence sink rejected a statement or transaction.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("configuration error: {0}")]
    Config(#[from] ::config::ConfigError),
}

impl<'a> From<SelectorErrorKind<'a>> for StatsError {
    fn from(err: SelectorErrorKind<'a>) -> Self {
        StatsError::Selector(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, StatsError>;
