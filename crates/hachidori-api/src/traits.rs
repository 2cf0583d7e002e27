//! Trait definitions for the catalog service.
//!
//! The batched metadata fetcher is generic over this trait, so the HTTP
//! client can be swapped for an in-memory double.

use std::future::Future;

use crate::error::ApiError;
use crate::types::RawLibraryRecord;

/// The two read endpoints of the catalog service.
pub trait CatalogService: Send + Sync {
    /// Fetch a user's library list. Any failure here is fatal to the session.
    fn fetch_library(
        &self,
        username: &str,
    ) -> impl Future<Output = Result<Vec<RawLibraryRecord>, ApiError>> + Send;

    /// Fetch the raw detail body for one anime.
    fn fetch_anime(
        &self,
        remote_id: &str,
    ) -> impl Future<Output = Result<serde_json::Value, ApiError>> + Send;
}
