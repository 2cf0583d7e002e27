//! Batched, bounded-concurrency retrieval of anime detail bodies.
//!
//! Identifiers are split into fixed-size batches. Every request in a batch
//! runs concurrently and the batch drains completely before the next one
//! starts, so at most `batch_size` requests are ever in flight. Outcomes
//! are collected by position: the i-th outcome belongs to the i-th id.

use std::num::NonZeroUsize;
use std::time::Duration;

use futures::future::join_all;

use crate::error::ApiError;
use crate::traits::CatalogService;

/// Requests per batch unless configured otherwise.
pub const DEFAULT_BATCH_SIZE: usize = 50;

/// Per-request deadline unless configured otherwise.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// The raw detail body for one id, or why it could not be fetched.
pub type DetailOutcome = Result<serde_json::Value, ApiError>;

/// Tunables for one metadata fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchOptions {
    pub batch_size: NonZeroUsize,
    /// Per-request deadline; an item that exceeds it is marked failed.
    pub request_timeout: Duration,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            batch_size: NonZeroUsize::new(DEFAULT_BATCH_SIZE).unwrap_or(NonZeroUsize::MIN),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

/// Counters for one completed metadata fetch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchReport {
    pub requested: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub batches: usize,
}

/// Runs detail requests against a [`CatalogService`] in sequential batches.
pub struct MetadataFetcher<'a, S> {
    service: &'a S,
    options: FetchOptions,
}

impl<'a, S: CatalogService> MetadataFetcher<'a, S> {
    pub fn new(service: &'a S, options: FetchOptions) -> Self {
        Self { service, options }
    }

    /// Fetch detail bodies for every id, preserving input order.
    ///
    /// Never fails as a whole: a failed item only fails its own slot.
    pub async fn fetch_all(&self, ids: &[String]) -> (Vec<DetailOutcome>, FetchReport) {
        let mut outcomes = Vec::with_capacity(ids.len());
        let mut report = FetchReport {
            requested: ids.len(),
            ..FetchReport::default()
        };

        for (batch, chunk) in ids.chunks(self.options.batch_size.get()).enumerate() {
            tracing::debug!(batch, size = chunk.len(), "Dispatching detail batch");

            let results = join_all(chunk.iter().map(|id| self.fetch_one(id))).await;

            let failed = results.iter().filter(|r| r.is_err()).count();
            tracing::debug!(batch, size = chunk.len(), failed, "Detail batch drained");

            report.batches += 1;
            report.failed += failed;
            report.succeeded += results.len() - failed;
            outcomes.extend(results);
        }

        (outcomes, report)
    }

    async fn fetch_one(&self, id: &str) -> DetailOutcome {
        if id.is_empty() {
            return Err(ApiError::MissingId);
        }

        let timeout = self.options.request_timeout;
        let result = match tokio::time::timeout(timeout, self.service.fetch_anime(id)).await {
            Ok(result) => result,
            Err(_) => Err(ApiError::Timeout {
                id: id.to_string(),
                after: timeout,
            }),
        };

        if let Err(ref e) = result {
            tracing::warn!(remote_id = id, error = %e, "Anime detail fetch failed");
        }
        result
    }
}
