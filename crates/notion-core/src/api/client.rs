//! API client for the Notion REST API.
//!
//! This module provides the `NotionClient` struct for making authenticated,
//! read-only requests: search, database lookup, and data source queries.

use std::fmt;
use std::time::Duration;

use reqwest::{header, Client, Method, RequestBuilder, Url};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::models::{DataSourceRef, DataSourceSelection, FilterParams, SearchRequest};

use super::error::{ApiError, Result};

// ============================================================================
// Constants
// ============================================================================

/// Base URL for all API endpoints
pub const API_BASE_URL: &str = "https://api.notion.com/v1";

/// API version this client was built against, sent as `Notion-Version`
pub const NOTION_VERSION: &str = "2025-09-03";

/// HTTP request timeout in seconds.
const REQUEST_TIMEOUT_SECS: u64 = 30;

const NOTION_VERSION_HEADER: &str = "Notion-Version";

/// API client for Notion.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct NotionClient {
    client: Client,
    base_url: Url,
}

impl fmt::Debug for NotionClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotionClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl NotionClient {
    /// Create a client authenticated with the given integration token.
    ///
    /// Fails with `InvalidConfiguration` before any network activity if the
    /// token is missing, blank, or cannot be sent as a header.
    pub fn new(token: Option<&str>) -> Result<Self> {
        Self::with_base_url(token, API_BASE_URL)
    }

    pub(crate) fn with_base_url(token: Option<&str>, base_url: &str) -> Result<Self> {
        let token = token
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| ApiError::InvalidConfiguration("API token is required".into()))?;
        // Sent exactly as given, so a stray space is an error rather than silently dropped
        if token.trim() != token {
            return Err(ApiError::InvalidConfiguration(
                "API token has leading or trailing whitespace".into(),
            ));
        }

        let base_url = Url::parse(base_url).map_err(|e| {
            ApiError::InvalidConfiguration(format!("invalid base URL {}: {}", base_url, e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidConfiguration(format!(
                "base URL {} cannot carry a path",
                base_url
            )));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .default_headers(Self::default_headers(token)?)
            .build()?;

        Ok(Self { client, base_url })
    }

    /// Headers sent with every request: bearer token, API version, JSON content type.
    fn default_headers(token: &str) -> Result<header::HeaderMap> {
        let mut auth = header::HeaderValue::from_str(&format!("Bearer {}", token)).map_err(|_| {
            ApiError::InvalidConfiguration("API token contains characters not allowed in a header".into())
        })?;
        auth.set_sensitive(true);

        let mut headers = header::HeaderMap::new();
        headers.insert(header::AUTHORIZATION, auth);
        headers.insert(
            NOTION_VERSION_HEADER,
            header::HeaderValue::from_static(NOTION_VERSION),
        );
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );
        Ok(headers)
    }

    /// API version identifier sent with every request
    pub fn api_version(&self) -> &'static str {
        NOTION_VERSION
    }

    /// Build an endpoint URL under the base path. Segments are percent-encoded,
    /// so an ID can never escape its path position.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidConfiguration("base URL cannot carry a path".into()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Send a request and decode the JSON body. Non-success statuses become
    /// `RequestFailed` carrying the body; nothing is retried.
    async fn send(&self, request: RequestBuilder, method: &Method, url: &Url) -> Result<Value> {
        debug!(method = %method, url = %url, "Sending request");

        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        debug!(method = %method, url = %url, status = %status, "Response received");

        if !status.is_success() {
            warn!(method = %method, url = %url, status = %status, "Request failed");
            return Err(ApiError::from_status(status, &String::from_utf8_lossy(&bytes)));
        }

        // Invalid UTF-8 is a decode failure, never replaced
        serde_json::from_slice(&bytes).map_err(|source| ApiError::DecodeFailed {
            url: url.to_string(),
            source,
        })
    }

    async fn get(&self, url: Url) -> Result<Value> {
        let request = self.client.get(url.clone());
        self.send(request, &Method::GET, &url).await
    }

    async fn post<B: Serialize + ?Sized>(&self, url: Url, body: &B) -> Result<Value> {
        let request = self.client.post(url.clone()).json(body);
        self.send(request, &Method::POST, &url).await
    }

    // ===== Operations =====

    /// Search pages and data sources shared with the integration.
    /// An empty query returns everything accessible.
    pub async fn search(&self, query: &str) -> Result<Value> {
        let url = self.endpoint(&["search"])?;
        self.post(url, &SearchRequest::new(query)).await
    }

    /// Retrieve a database object by ID
    pub async fn get_database(&self, database_id: &str) -> Result<Value> {
        let url = self.endpoint(&["databases", database_id])?;
        self.get(url).await
    }

    /// List the data sources of a database, in the order the server returns them.
    pub async fn get_database_data_sources(&self, database_id: &str) -> Result<Vec<DataSourceRef>> {
        let url = self.endpoint(&["databases", database_id])?;
        let database = self.get_database(database_id).await?;
        match database.get("data_sources") {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(sources) => Vec::<DataSourceRef>::deserialize(sources).map_err(|source| {
                ApiError::DecodeFailed {
                    url: url.to_string(),
                    source,
                }
            }),
        }
    }

    /// Resolve one data source of a database by an explicit selection.
    pub async fn get_data_source_id(
        &self,
        database_id: &str,
        selection: &DataSourceSelection,
    ) -> Result<String> {
        let sources = self.get_database_data_sources(database_id).await?;
        if sources.is_empty() {
            return Err(ApiError::NoDataSource {
                database_id: database_id.to_string(),
            });
        }
        let chosen = selection
            .select(&sources)
            .ok_or_else(|| ApiError::DataSourceNotFound {
                database_id: database_id.to_string(),
                selection: selection.clone(),
            })?;
        debug!(database_id, data_source_id = %chosen.id, %selection, "Resolved data source");
        Ok(chosen.id.clone())
    }

    /// ID of the first data source listed for a database
    pub async fn get_primary_data_source_id(&self, database_id: &str) -> Result<String> {
        self.get_data_source_id(database_id, &DataSourceSelection::First)
            .await
    }

    /// Query a data source. `filter_params` is sent verbatim; absent sends `{}`.
    pub async fn query_data_source(
        &self,
        data_source_id: &str,
        filter_params: Option<&FilterParams>,
    ) -> Result<Value> {
        let url = self.endpoint(&["data_sources", data_source_id, "query"])?;
        let empty = FilterParams::new();
        self.post(url, filter_params.unwrap_or(&empty)).await
    }

    /// Query the primary data source of a database.
    pub async fn query_database(
        &self,
        database_id: &str,
        filter_params: Option<&FilterParams>,
    ) -> Result<Value> {
        self.query_database_with(database_id, &DataSourceSelection::First, filter_params)
            .await
    }

    /// Query a chosen data source of a database. The lookup failing stops
    /// before any query is sent.
    pub async fn query_database_with(
        &self,
        database_id: &str,
        selection: &DataSourceSelection,
        filter_params: Option<&FilterParams>,
    ) -> Result<Value> {
        let data_source_id = self.get_data_source_id(database_id, selection).await?;
        self.query_data_source(&data_source_id, filter_params).await
    }
}
