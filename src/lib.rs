pub mod config;
pub mod detector;
pub mod models;
pub mod notify;
pub mod poller;
pub mod scraper;
pub mod sites;
pub mod utils;

// Re-export commonly used types
pub use config::AppConfig;
pub use utils::error::AppError;

pub type Result<T> = std::result::Result<T, AppError>;
