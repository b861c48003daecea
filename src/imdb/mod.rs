mod client;
mod mapper;
mod provider;
mod types;


pub use client::{ImdbClient, Param};
pub use provider::{DEFAULT_ROWS, GenreFilter, ImdbProvider, SearchParams, SortOrder};
pub use types::{DetailResult, MovieDetail, MovieSummary, RatingResult, SearchResult};

/// Upstream component result type
pub type Result<T> = std::result::Result<T, ImdbError>;

/// Upstream component error types
#[derive(Debug, thiserror::Error)]
pub enum ImdbError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Upstream {status}: {message}")]
    Api {
        status: u16,
        message: String,
        body: serde_json::Value,
    },

    #[error("Invalid JSON from upstream ({status}): {body}")]
    Parse { status: u16, body: String },
}
