//! One library session: list fetch, batched enrichment, merge, store.

use hachidori_api::{
    CatalogService, DetailRecord, FetchOptions, LibraryClient, MetadataFetcher,
};
use tracing::{info, warn};

use crate::config::ApiConfig;
use crate::error::HachidoriError;
use crate::merge::merge;
use crate::store::EntryStore;

/// Outcome of a session.
///
/// An empty library is `Populated` with zero entries; `Failed` means the
/// list fetch (or setup) aborted and no entries exist at all.
#[derive(Debug)]
pub enum Session {
    Populated(EntryStore),
    Failed(HachidoriError),
}

impl Session {
    pub fn store(&self) -> Option<&EntryStore> {
        match self {
            Self::Populated(store) => Some(store),
            Self::Failed(_) => None,
        }
    }

    /// Number of entries, or `None` for a failed session.
    pub fn entry_count(&self) -> Option<usize> {
        self.store().map(EntryStore::len)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    pub fn into_result(self) -> Result<EntryStore, HachidoriError> {
        match self {
            Self::Populated(store) => Ok(store),
            Self::Failed(e) => Err(e),
        }
    }
}

impl From<Result<EntryStore, HachidoriError>> for Session {
    fn from(result: Result<EntryStore, HachidoriError>) -> Self {
        match result {
            Ok(store) => Self::Populated(store),
            Err(e) => Self::Failed(e),
        }
    }
}

/// Run a session against the configured catalog service.
///
/// The HTTP client lives exactly as long as this call.
pub async fn fetch_session(config: &ApiConfig, username: &str) -> Session {
    connect_and_load(config, username).await.into()
}

async fn connect_and_load(config: &ApiConfig, username: &str) -> Result<EntryStore, HachidoriError> {
    let options = config.fetch_options()?;
    let client = LibraryClient::new(&config.base_url, options.request_timeout)
        .map_err(|e| HachidoriError::Config(e.to_string()))?;
    load_library(&client, username, options).await
}

/// Run a session against any [`CatalogService`].
pub async fn run_session<S: CatalogService>(
    service: &S,
    username: &str,
    options: FetchOptions,
) -> Session {
    load_library(service, username, options).await.into()
}

/// Fetch the list, enrich every record, and build the store.
///
/// Only a list-fetch failure is an error. Each record yields exactly one
/// entry, enriched or not.
pub async fn load_library<S: CatalogService>(
    service: &S,
    username: &str,
    options: FetchOptions,
) -> Result<EntryStore, HachidoriError> {
    let records = service.fetch_library(username).await?;

    let ids: Vec<String> = records.iter().map(|r| r.remote_id.clone()).collect();
    let (outcomes, report) = MetadataFetcher::new(service, options).fetch_all(&ids).await;

    let mut enriched = 0usize;
    let mut store = EntryStore::new();
    for (raw, outcome) in records.iter().zip(outcomes) {
        // Fetch failures were already logged by the fetcher.
        let detail = outcome.ok().and_then(|body| {
            DetailRecord::from_value(&body)
                .inspect_err(|e| {
                    warn!(remote_id = %raw.remote_id, error = %e, "Unusable anime detail body");
                })
                .ok()
        });
        if detail.is_some() {
            enriched += 1;
        }
        store.insert(merge(raw, detail.as_ref()));
    }

    info!(
        username,
        records = records.len(),
        entries = store.len(),
        enriched,
        failed = records.len() - enriched,
        batches = report.batches,
        "Library loaded"
    );
    Ok(store)
}
