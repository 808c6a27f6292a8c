//! PostgREST/Supabase-compatible gateway built on `reqwest`.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use http::header::{AUTHORIZATION, HeaderMap, HeaderName, HeaderValue, InvalidHeaderValue};
use url::Url;

use super::FeedbackGateway;
use super::error_mapping::{
    extract_backend_message, map_decode_error, map_http_error, map_transport_error,
};
use crate::feedback::error::FeedbackError;
use crate::feedback::models::{ApiFeedbackRow, FeedbackEntry, NewFeedback, SortDirection};

const API_KEY_HEADER: &str = "apikey";
const PREFER_HEADER: &str = "prefer";
const RETURN_MINIMAL: &str = "return=minimal";

/// Connection settings for the REST backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestGatewaySettings {
    /// Project base URL, e.g. `https://abc.supabase.co`.
    pub base_url: String,
    /// Anonymous or service API key sent with every request.
    pub api_key: String,
    /// Table exposed under `/rest/v1/`.
    pub table: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

/// Feedback gateway that talks to a hosted PostgREST table.
#[derive(Debug, Clone)]
pub struct RestFeedbackGateway {
    client: reqwest::Client,
    table_url: Url,
}

impl RestFeedbackGateway {
    /// Creates a gateway for the configured table.
    ///
    /// # Errors
    ///
    /// Returns [`FeedbackError::InvalidUrl`] when the base URL cannot be
    /// parsed or is not HTTP(S), [`FeedbackError::MissingApiKey`] when the key
    /// is blank, and [`FeedbackError::Configuration`] when the key or table
    /// cannot be used or the HTTP client fails to build.
    pub fn new(settings: &RestGatewaySettings) -> Result<Self, FeedbackError> {
        let table_url = build_table_url(&settings.base_url, &settings.table)?;
        let headers = build_auth_headers(&settings.api_key)?;

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(settings.timeout)
            .build()
            .map_err(|error| FeedbackError::Configuration {
                message: format!("failed to build HTTP client: {error}"),
            })?;

        Ok(Self { client, table_url })
    }

    /// Endpoint used for inserts and reads.
    #[must_use]
    pub const fn table_url(&self) -> &Url {
        &self.table_url
    }

    fn select_url(&self, direction: SortDirection) -> Url {
        let mut url = self.table_url.clone();
        url.query_pairs_mut()
            .append_pair("select", "*")
            .append_pair(
                "order",
                &format!("created_at.{}", direction.as_postgrest()),
            );
        url
    }

    async fn error_from_response(operation: &str, response: reqwest::Response) -> FeedbackError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let error = map_http_error(operation, status, extract_backend_message(&body));
        tracing::warn!("{operation} rejected by backend with status {status}");
        error
    }
}

#[async_trait]
impl FeedbackGateway for RestFeedbackGateway {
    async fn insert(&self, feedback: &NewFeedback) -> Result<(), FeedbackError> {
        const OPERATION: &str = "insert feedback";
        tracing::debug!("POST {}", self.table_url);
        let started = Instant::now();

        let response = self
            .client
            .post(self.table_url.clone())
            .header(PREFER_HEADER, RETURN_MINIMAL)
            .json(feedback)
            .send()
            .await
            .map_err(|error| {
                tracing::warn!("{OPERATION} transport failure: {error}");
                map_transport_error(OPERATION, &error)
            })?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(OPERATION, response).await);
        }

        tracing::debug!(
            "{OPERATION} succeeded in {:?} with status {}",
            started.elapsed(),
            response.status()
        );
        Ok(())
    }

    async fn select_all(
        &self,
        direction: SortDirection,
    ) -> Result<Vec<FeedbackEntry>, FeedbackError> {
        const OPERATION: &str = "list feedback";
        let url = self.select_url(direction);
        tracing::debug!("GET {url}");

        let response = self.client.get(url).send().await.map_err(|error| {
            tracing::warn!("{OPERATION} transport failure: {error}");
            map_transport_error(OPERATION, &error)
        })?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(OPERATION, response).await);
        }

        let body = response
            .text()
            .await
            .map_err(|error| map_transport_error(OPERATION, &error))?;
        let rows: Vec<ApiFeedbackRow> = serde_json::from_str(&body)
            .map_err(|error| map_decode_error(OPERATION, &error.to_string()))?;

        let entries = rows
            .into_iter()
            .map(FeedbackEntry::try_from)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|error| map_decode_error(OPERATION, &error.to_string()))?;

        tracing::debug!("{OPERATION} returned {} entries", entries.len());
        Ok(entries)
    }
}

fn build_table_url(base_url: &str, table: &str) -> Result<Url, FeedbackError> {
    let trimmed_table = table.trim();
    if trimmed_table.is_empty() {
        return Err(FeedbackError::Configuration {
            message: "table name must not be blank".to_owned(),
        });
    }

    let mut url =
        Url::parse(base_url.trim()).map_err(|error| FeedbackError::InvalidUrl(error.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(FeedbackError::InvalidUrl(format!(
            "unsupported scheme '{}' (expected http or https)",
            url.scheme()
        )));
    }

    url.set_query(None);
    url.set_fragment(None);
    url.path_segments_mut()
        .map_err(|()| FeedbackError::InvalidUrl(format!("{base_url} cannot be a base URL")))?
        .pop_if_empty()
        .extend(["rest", "v1", trimmed_table]);

    Ok(url)
}

fn build_auth_headers(api_key: &str) -> Result<HeaderMap, FeedbackError> {
    let key = api_key.trim();
    if key.is_empty() {
        return Err(FeedbackError::MissingApiKey);
    }

    let invalid_key = |_: InvalidHeaderValue| FeedbackError::Configuration {
        message: "API key contains characters that are not valid in an HTTP header".to_owned(),
    };
    let mut key_value = HeaderValue::from_str(key).map_err(invalid_key)?;
    key_value.set_sensitive(true);
    let mut bearer_value = HeaderValue::from_str(&format!("Bearer {key}")).map_err(invalid_key)?;
    bearer_value.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert(HeaderName::from_static(API_KEY_HEADER), key_value);
    headers.insert(AUTHORIZATION, bearer_value);
    Ok(headers)
}
