use ::scraper::error::SelectorErrorKind;
use std::path::PathBuf;

/// All errors that can occur while crawling schedules and writing standings tables.
#[derive(thiserror::Error, Debug)]
pub enum KboError {
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

    /// The season year has no known regular-season start date.
    #[error("only seasons {first}..={last} are supported, got {year}")]
    UnsupportedYear { year: i32, first: i32, last: i32 },

    /// The output mode is not one of `all`, `date` or `game`.
    #[error("output mode must be one of 'all', 'date' or 'game', got '{0}'")]
    InvalidMode(String),

    /// No configured team produced a single game for the season.
    #[error("no games found for season {year}")]
    NoGames { year: i32 },

    /// Creating a directory or file failed.
    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Opening or writing a CSV file failed.
    #[error("failed to write csv {path}: {source}")]
    Csv {
        path: PathBuf,
        source: csv::Error,
    },
}

impl KboError {
    /// Errors caused by user input rather than by the crawl itself.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            KboError::UnsupportedYear { .. } | KboError::InvalidMode(_)
        )
    }
}

impl<'a> From<SelectorErrorKind<'a>> for KboError {
    fn from(err: SelectorErrorKind<'a>) -> Self {
        KboError::Selector(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, KboError>;
