//! Client for the anime catalog service.
//!
//! Fetches a user's library list, then enriches every item with the
//! per-anime detail endpoint in fixed-size concurrent batches.

pub mod client;
pub mod error;
pub mod fetcher;
pub mod traits;
pub mod types;

pub use client::LibraryClient;
pub use error::ApiError;
pub use fetcher::{
    DetailOutcome, FetchOptions, FetchReport, MetadataFetcher, DEFAULT_BATCH_SIZE,
    DEFAULT_REQUEST_TIMEOUT,
};
pub use traits::CatalogService;
pub use types::{DetailRecord, RawLibraryRecord};
