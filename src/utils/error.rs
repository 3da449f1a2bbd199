use std::fmt;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Fetch error for {site}: {message}")]
    Fetch { site: String, message: String },

    #[error("Fetch failed for site(s): {}", .sites.join(", "))]
    FetchFailed { sites: Vec<String> },

    #[error("SMTP transport error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),

    #[error("Email build error: {0}")]
    Email(#[from] lettre::error::Error),

    #[error("Email address error: {0}")]
    Address(#[from] lettre::address::AddressError),
}

impl AppError {
    /// Uniform per-site fetch failure: transport, HTTP status and markup-shape
    /// errors all collapse into this so the scrape loop sees a single kind.
    pub fn fetch(site: impl Into<String>, cause: impl fmt::Display) -> Self {
        AppError::Fetch {
            site: site.into(),
            message: cause.to_string(),
        }
    }
}

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, AppError>;
