//! Fetch side of powerwatch: pulls the provider's outage status for one house.

pub mod client;
pub mod error;
pub mod parse;
pub mod source;

pub use client::{ShutdownsClient, ShutdownsQuery};
pub use error::FetchError;
pub use parse::{extract_csrf_token, status_from_response};
pub use source::StatusSource;
