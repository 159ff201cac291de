//! HTTP client module with status classification.

mod client;
mod error;

pub use client::HttpClient;
pub use error::{FetchError, check_status, classify_status};
