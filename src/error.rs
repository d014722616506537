// Error types for readme-pulse.
// Covers feed and GraphQL transport errors, payload errors, and local file errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PulseError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{what} returned HTTP {status}: {body}")]
    Status {
        what: &'static str,
        status: u16,
        body: String,
    },

    #[error("GraphQL errors: {0}")]
    GraphQl(String),

    #[error("Response is missing {0}")]
    MissingData(&'static str),

    #[error("Missing GITHUB_TOKEN environment variable")]
    MissingToken,

    #[error("Missing GH_LOGIN (or GITHUB_REPOSITORY_OWNER) environment variable")]
    MissingLogin,

    #[error("Invalid header value: {0}")]
    Header(#[from] reqwest::header::InvalidHeaderValue),

    #[error("Invalid marker pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("XML parsing error: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PulseError>;
