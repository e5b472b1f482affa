//! CMS error types

use thiserror::Error;

/// Errors raised while querying the CMS
#[derive(Error, Debug)]
pub enum CmsError {
    #[error("CMS is not configured: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("CMS returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to decode CMS response: {0}")]
    Decode(#[from] serde_json::Error),
}
