//! HTTP implementation of the catalog provider
//!
//! Talks to the provider's REST API: `POST /sessions` for login and
//! `GET /series/search` for paginated metadata. Wire DTOs are private
//! to this module and converted into the normalized model; absent or
//! unrecognized attributes degrade to `Unknown`/`None` rather than
//! failing the whole page.

use crate::config::ProviderConfig;
use crate::credentials::Credentials;
use crate::error::{Result, SercatError};
use crate::model::{
    Frequency, GeoEntry, GeoKind, IndicatorNode, MetadataRecord, SeriesStatus,
};
use crate::provider::{CatalogProvider, SeriesPage, SessionHandle};

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// HTTP catalog provider
///
/// The base URL is configured once at construction; tests point it at
/// a mock server.
pub struct HttpCatalogProvider {
    client: Client,
    api_base: String,
}

#[derive(Debug, Serialize)]
struct LoginRequest {
    access_id: String,
    secret_key: String,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: String,
}

/// One page of `GET /series/search`
#[derive(Debug, Deserialize)]
struct SearchPageDto {
    #[serde(default)]
    total: u64,
    #[serde(default)]
    items: Vec<SearchItemDto>,
    #[serde(default)]
    next: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchItemDto {
    metadata: MetadataDto,
}

/// Nested `{"name": "..."}` objects the provider uses for enumerations
#[derive(Debug, Deserialize)]
struct NamedValueDto {
    #[serde(default)]
    name: String,
}

#[derive(Debug, Deserialize)]
struct GeoDto {
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    name: String,
}

/// Raw series metadata as the provider ships it
#[derive(Debug, Deserialize)]
struct MetadataDto {
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    status: Option<NamedValueDto>,
    #[serde(default)]
    frequency: Option<NamedValueDto>,
    #[serde(default)]
    last_update_time: Option<DateTime<Utc>>,
    #[serde(default)]
    last_value: Option<f64>,
    #[serde(default)]
    start_date: Option<NaiveDate>,
    #[serde(default)]
    end_date: Option<NaiveDate>,
    #[serde(default)]
    number_of_observations: Option<u64>,
    #[serde(default)]
    indicator_path: Vec<NamedValueDto>,
    #[serde(default)]
    geo_info: Vec<GeoDto>,
    #[serde(default)]
    is_forecast: bool,
    #[serde(default)]
    key_series: bool,
    #[serde(default)]
    has_continuous_series: bool,
    #[serde(default)]
    has_vintage: bool,
    #[serde(default)]
    new_series: bool,
    #[serde(default)]
    has_schedule: bool,
}

impl From<MetadataDto> for MetadataRecord {
    fn from(dto: MetadataDto) -> Self {
        MetadataRecord {
            id: dto.id,
            name: dto.name,
            status: dto
                .status
                .map(|s| SeriesStatus::from_label(&s.name))
                .unwrap_or_default(),
            frequency: dto
                .frequency
                .map(|f| Frequency::from_label(&f.name))
                .unwrap_or_default(),
            last_update_time: dto.last_update_time,
            last_value: dto.last_value,
            start_date: dto.start_date,
            end_date: dto.end_date,
            number_of_observations: dto.number_of_observations,
            indicator_path: dto
                .indicator_path
                .into_iter()
                .map(|n| IndicatorNode { name: n.name })
                .collect(),
            geo_info: dto
                .geo_info
                .into_iter()
                .map(|g| GeoEntry {
                    kind: GeoKind::from_tag(&g.kind),
                    name: g.name,
                })
                .collect(),
            is_forecast: dto.is_forecast,
            is_key_series: dto.key_series,
            has_continuous_series: dto.has_continuous_series,
            has_vintage: dto.has_vintage,
            is_new_series: dto.new_series,
            has_schedule: dto.has_schedule,
        }
    }
}

impl HttpCatalogProvider {
    /// Create a new HTTP provider instance
    ///
    /// # Arguments
    ///
    /// * `config` - Provider configuration (base URL, timeout)
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent("sercat/0.1.0")
            .build()
            .map_err(|e| SercatError::Provider(format!("Failed to create HTTP client: {}", e)))?;

        tracing::info!("Initialized catalog provider: api_base={}", config.api_base);

        Ok(Self {
            client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
        })
    }

    /// Configured API base URL
    pub fn api_base(&self) -> &str {
        &self.api_base
    }
}

#[async_trait]
impl CatalogProvider for HttpCatalogProvider {
    async fn login(&self, credentials: &Credentials) -> Result<SessionHandle> {
        let url = format!("{}/sessions", self.api_base);
        tracing::debug!("Logging in at {}", url);

        let response = self
            .client
            .post(&url)
            .json(&LoginRequest {
                access_id: credentials.access_id.clone(),
                secret_key: credentials.secret_key.clone(),
            })
            .send()
            .await
            .map_err(|e| {
                tracing::warn!("Login request failed: {}", e);
                SercatError::Auth(format!("Identity provider unreachable: {}", e))
            })?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(SercatError::Auth("Invalid credentials".to_string()).into());
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Login returned {}: {}", status, body);
            return Err(
                SercatError::Auth(format!("Login failed with status {}", status)).into(),
            );
        }

        let login: LoginResponse = response
            .json()
            .await
            .map_err(|e| SercatError::Auth(format!("Failed to parse login response: {}", e)))?;

        tracing::info!("Authenticated with provider");
        Ok(SessionHandle { token: login.token })
    }

    async fn fetch_page(
        &self,
        session: &SessionHandle,
        source_id: &str,
        cursor: Option<&str>,
    ) -> Result<SeriesPage> {
        let url = format!("{}/series/search", self.api_base);
        let mut query: Vec<(&str, &str)> = vec![("source", source_id)];
        if let Some(cursor) = cursor {
            query.push(("cursor", cursor));
        }

        tracing::debug!("Fetching search page: source={}, cursor={:?}", source_id, cursor);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&session.token)
            .query(&query)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!("Search request failed: {}", e);
                SercatError::Provider(format!("Search request failed: {}", e))
            })?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(SercatError::Auth("Session expired or invalid".to_string()).into());
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Search returned {}: {}", status, body);
            return Err(SercatError::Provider(format!(
                "Search failed with status {}: {}",
                status, body
            ))
            .into());
        }

        let page: SearchPageDto = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse search page: {}", e);
            SercatError::Provider(format!("Failed to parse search response: {}", e))
        })?;

        Ok(SeriesPage {
            total: page.total,
            records: page.items.into_iter().map(|i| i.metadata.into()).collect(),
            next: page.next,
        })
    }
}
