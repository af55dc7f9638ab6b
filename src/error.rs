use thiserror::Error;

pub type FetchResult<T> = std::result::Result<T, FetchError>;
pub type SinkResult<T> = std::result::Result<T, SinkError>;

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum FetchError {
    #[error("transport error")]
    Transport {
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },
    #[error("could not decode paste list")]
    Decode {
        #[from]
        source: serde_json::Error,
    },
}

impl From<reqwest::Error> for FetchError {
    fn from(source: reqwest::Error) -> Self {
        FetchError::Transport {
            source: Box::new(source),
        }
    }
}

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum SinkError {
    #[error("database error")]
    Database {
        #[from]
        source: sqlx::Error,
    },
    #[error("could not serialize batch")]
    Serialize {
        #[from]
        source: serde_json::Error,
    },
    #[error("IO error")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

/// The error that ended the scrape loop.
#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("fetch failed")]
    Fetch {
        #[from]
        source: FetchError,
    },
    #[error("sink failed")]
    Sink {
        #[from]
        source: SinkError,
    },
    #[error("scrape task aborted")]
    Task {
        #[from]
        source: tokio::task::JoinError,
    },
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("limit must be between 1 and 250, got {0}")]
    LimitOutOfRange(i64),
    #[error("rate must be at least 60 seconds, got {0}")]
    RateTooShort(u64),
    #[error("invalid endpoint '{endpoint}': {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },
    #[error("invalid table name '{0}'")]
    InvalidTable(String),
}
