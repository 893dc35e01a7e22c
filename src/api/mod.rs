//! Status API access

pub mod client;
pub mod error;
pub mod types;

pub use client::{ApiSettings, BdsClient};
pub use error::{FetchError, FetchResult};
