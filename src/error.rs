use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    JsonParsing(#[from] serde_json::Error),

    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Configuration missing: {0}")]
    ConfigurationMissing(String),

    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    #[error("Invalid timestamp in '{field}': {value}")]
    InvalidTimestamp { field: String, value: String },

    #[error("Pagination stalled after {retrieved} of {total} records")]
    PaginationStalled { retrieved: usize, total: usize },

    #[error("{context}: {source}")]
    Retrieval {
        context: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// 操作名などのコンテキストでエラーを包む
    ///
    /// `MalformedPayload`は包まずにメッセージの先頭へコンテキストを付ける。
    pub fn context(self, context: impl Into<String>) -> Self {
        match self {
            Error::MalformedPayload(message) => {
                Error::MalformedPayload(format!("{}: {}", context.into(), message))
            }
            other => Error::Retrieval {
                context: context.into(),
                source: Box::new(other),
            },
        }
    }

    /// `Retrieval`の入れ子を剥がした根本原因
    pub fn root_cause(&self) -> &Error {
        match self {
            Error::Retrieval { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
