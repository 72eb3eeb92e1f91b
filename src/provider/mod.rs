//! Catalog provider abstraction
//!
//! This module defines the `CatalogProvider` trait: the single seam
//! between the application and the provider's HTTP API. The fetch and
//! aggregation pipeline only sees normalized pages, so the session
//! logic is independently testable with an in-memory stub provider.

mod http;

pub use http::HttpCatalogProvider;

use crate::credentials::Credentials;
use crate::error::Result;
use crate::model::MetadataRecord;
use async_trait::async_trait;

/// Opaque authenticated session handle
///
/// Returned by `login` and presented on every subsequent call. The
/// token's format is provider-internal.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    pub(crate) token: String,
}

impl SessionHandle {
    /// Build a handle from a raw token
    ///
    /// Mostly useful for stub providers in tests; production handles
    /// come from `CatalogProvider::login`.
    pub fn from_token(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

/// One page of a paginated series search
///
/// `total` is the declared total for the whole query, stable across
/// pages. `next` is the provider's opaque pagination cursor; `None`
/// marks the final page.
#[derive(Debug, Clone)]
pub struct SeriesPage {
    /// Declared total series count for the query
    pub total: u64,
    /// Normalized records on this page
    pub records: Vec<MetadataRecord>,
    /// Opaque cursor for the next page, absent on the last page
    pub next: Option<String>,
}

/// Provider trait for the series catalog API
///
/// Implementations must not retry internally: a failed call surfaces
/// immediately so the caller can decide what to discard.
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Authenticate with the provider
    ///
    /// # Errors
    ///
    /// Returns `SercatError::Auth` on invalid credentials or an
    /// unreachable identity endpoint
    async fn login(&self, credentials: &Credentials) -> Result<SessionHandle>;

    /// Fetch one page of the series search for a source
    ///
    /// # Arguments
    ///
    /// * `session` - Authenticated session handle
    /// * `source_id` - Provider source identifier
    /// * `cursor` - Opaque cursor from the previous page, `None` for
    ///   the first page
    ///
    /// # Errors
    ///
    /// Returns `SercatError::Provider` on API failure
    async fn fetch_page(
        &self,
        session: &SessionHandle,
        source_id: &str,
        cursor: Option<&str>,
    ) -> Result<SeriesPage>;
}
