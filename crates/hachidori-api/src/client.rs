use std::time::Duration;

use reqwest::Client;
use url::Url;

use super::error::ApiError;
use super::traits::CatalogService;
use super::types::{library_records, RawLibraryRecord};

pub const DEFAULT_BASE_URL: &str = "https://hummingbird.me/api/v1";

const USER_AGENT: &str = concat!("hachidori/", env!("CARGO_PKG_VERSION"));

/// HTTP client for the catalog service.
///
/// Holds one connection pool for its whole lifetime, so detail requests
/// reuse keep-alive connections across batches.
pub struct LibraryClient {
    base: Url,
    http: Client,
}

impl LibraryClient {
    pub fn new(base_url: &str, request_timeout: Duration) -> Result<Self, ApiError> {
        let base = Url::parse(base_url).map_err(|e| ApiError::InvalidUrl(format!("{base_url}: {e}")))?;
        if base.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(base_url.to_string()));
        }

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(request_timeout)
            .build()?;

        Ok(Self { base, http })
    }

    /// Build `{base}/{segments...}`, percent-encoding each segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(self.base.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        if resp.status().is_success() {
            Ok(resp)
        } else {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            Err(ApiError::Api {
                status,
                message: body,
            })
        }
    }

    async fn get_json(&self, url: Url) -> Result<serde_json::Value, ApiError> {
        let resp = self
            .http
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await?;

        let resp = Self::check_response(resp).await?;
        resp.json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }

    /// Fetch `{base}/users/{username}/library`.
    pub async fn get_library(&self, username: &str) -> Result<Vec<RawLibraryRecord>, ApiError> {
        let url = self.endpoint(&["users", username, "library"])?;
        tracing::info!(username, "Fetching library list");

        let body = self.get_json(url).await.inspect_err(|e| {
            tracing::warn!(username, error = %e, "Library list request failed");
        })?;
        let records = library_records(body)?;

        tracing::info!(username, count = records.len(), "Library list received");
        Ok(records)
    }

    /// Fetch `{base}/anime/{id}` as an unparsed JSON body.
    pub async fn get_anime(&self, remote_id: &str) -> Result<serde_json::Value, ApiError> {
        let url = self.endpoint(&["anime", remote_id])?;
        tracing::trace!(remote_id, "Anime detail request");
        self.get_json(url).await
    }
}

impl CatalogService for LibraryClient {
    async fn fetch_library(&self, username: &str) -> Result<Vec<RawLibraryRecord>, ApiError> {
        self.get_library(username).await
    }

    async fn fetch_anime(&self, remote_id: &str) -> Result<serde_json::Value, ApiError> {
        self.get_anime(remote_id).await
    }
}
