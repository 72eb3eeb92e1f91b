//! Paginated fetch driver
//!
//! `PageFetcher` walks a provider's search result page by page, yielding
//! batches of normalized records plus a running count. The provider's
//! pagination cursor stays opaque here: the fetcher only hands it back
//! on the next call. The sequence is finite and not restartable; a new
//! fetch re-issues the query from the start.

use crate::error::Result;
use crate::model::MetadataRecord;
use crate::provider::{CatalogProvider, SessionHandle};

/// One yielded batch of records
#[derive(Debug)]
pub struct Batch {
    /// Records on this batch, never empty
    pub records: Vec<MetadataRecord>,
    /// Records seen so far across all yielded batches
    pub cumulative: u64,
}

/// Drives one paginated search to exhaustion
///
/// Batches are pulled one at a time on a single logical thread; there
/// is no prefetching and no concurrency. Any provider error aborts the
/// sequence immediately; batches already yielded are not rolled back.
pub struct PageFetcher<'a> {
    provider: &'a dyn CatalogProvider,
    session: &'a SessionHandle,
    source_id: String,
    cursor: Option<String>,
    declared_total: Option<u64>,
    cumulative: u64,
    exhausted: bool,
}

impl<'a> PageFetcher<'a> {
    /// Start a new fetch for a source
    pub fn new(
        provider: &'a dyn CatalogProvider,
        session: &'a SessionHandle,
        source_id: impl Into<String>,
    ) -> Self {
        Self {
            provider,
            session,
            source_id: source_id.into(),
            cursor: None,
            declared_total: None,
            cumulative: 0,
            exhausted: false,
        }
    }

    /// Declared total from the first page, if one has been fetched
    ///
    /// Stable across pages; treated as authoritative even when the
    /// drained count ends up differing.
    pub fn declared_total(&self) -> Option<u64> {
        self.declared_total
    }

    /// Records seen so far across all yielded batches
    pub fn cumulative(&self) -> u64 {
        self.cumulative
    }

    /// Pull the next batch, or `None` when the sequence is exhausted
    ///
    /// # Errors
    ///
    /// Propagates the first provider failure and marks the sequence
    /// exhausted; subsequent calls return `None`
    pub async fn next_batch(&mut self) -> Result<Option<Batch>> {
        if self.exhausted {
            return Ok(None);
        }

        let page = match self
            .provider
            .fetch_page(self.session, &self.source_id, self.cursor.as_deref())
            .await
        {
            Ok(page) => page,
            Err(e) => {
                self.exhausted = true;
                return Err(e);
            }
        };

        if self.declared_total.is_none() {
            self.declared_total = Some(page.total);
        }

        self.cursor = page.next;
        if self.cursor.is_none() {
            self.exhausted = true;
        }

        if page.records.is_empty() {
            // Batches are non-empty by contract; an empty page ends the
            // sequence even if a cursor was handed back.
            self.exhausted = true;
            return Ok(None);
        }

        self.cumulative += page.records.len() as u64;
        Ok(Some(Batch {
            records: page.records,
            cumulative: self.cumulative,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::Credentials;
    use crate::error::SercatError;
    use crate::model::{Frequency, SeriesStatus};
    use crate::provider::SeriesPage;
    use async_trait::async_trait;
    use std::sync::Mutex;

    fn record(id: &str) -> MetadataRecord {
        MetadataRecord {
            id: id.to_string(),
            name: format!("Series {}", id),
            status: SeriesStatus::Unknown,
            frequency: Frequency::Unknown,
            last_update_time: None,
            last_value: None,
            start_date: None,
            end_date: None,
            number_of_observations: None,
            indicator_path: Vec::new(),
            geo_info: Vec::new(),
            is_forecast: false,
            is_key_series: false,
            has_continuous_series: false,
            has_vintage: false,
            is_new_series: false,
            has_schedule: false,
        }
    }

    /// Provider stub yielding a scripted sequence of page results
    struct ScriptedProvider {
        pages: Mutex<Vec<Result<SeriesPage>>>,
    }

    impl ScriptedProvider {
        fn new(pages: Vec<Result<SeriesPage>>) -> Self {
            let mut pages = pages;
            pages.reverse();
            Self {
                pages: Mutex::new(pages),
            }
        }
    }

    #[async_trait]
    impl CatalogProvider for ScriptedProvider {
        async fn login(&self, _credentials: &Credentials) -> Result<SessionHandle> {
            Ok(SessionHandle::from_token("stub"))
        }

        async fn fetch_page(
            &self,
            _session: &SessionHandle,
            _source_id: &str,
            _cursor: Option<&str>,
        ) -> Result<SeriesPage> {
            self.pages
                .lock()
                .unwrap()
                .pop()
                .unwrap_or_else(|| Err(SercatError::Provider("script exhausted".to_string()).into()))
        }
    }

    fn page(total: u64, ids: &[&str], next: Option<&str>) -> SeriesPage {
        SeriesPage {
            total,
            records: ids.iter().map(|id| record(id)).collect(),
            next: next.map(String::from),
        }
    }

    #[tokio::test]
    async fn test_drains_multiple_pages() {
        let provider = ScriptedProvider::new(vec![
            Ok(page(5, &["1", "2"], Some("c1"))),
            Ok(page(5, &["3", "4"], Some("c2"))),
            Ok(page(5, &["5"], None)),
        ]);
        let session = SessionHandle::from_token("t");
        let mut fetcher = PageFetcher::new(&provider, &session, "src-1");

        let first = fetcher.next_batch().await.unwrap().unwrap();
        assert_eq!(first.records.len(), 2);
        assert_eq!(first.cumulative, 2);
        assert_eq!(fetcher.declared_total(), Some(5));

        let second = fetcher.next_batch().await.unwrap().unwrap();
        assert_eq!(second.cumulative, 4);

        let third = fetcher.next_batch().await.unwrap().unwrap();
        assert_eq!(third.cumulative, 5);

        assert!(fetcher.next_batch().await.unwrap().is_none());
        // Exhausted sequences stay exhausted
        assert!(fetcher.next_batch().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_empty_result() {
        let provider = ScriptedProvider::new(vec![Ok(page(0, &[], None))]);
        let session = SessionHandle::from_token("t");
        let mut fetcher = PageFetcher::new(&provider, &session, "src-1");

        assert!(fetcher.next_batch().await.unwrap().is_none());
        assert_eq!(fetcher.declared_total(), Some(0));
        assert_eq!(fetcher.cumulative(), 0);
    }

    #[tokio::test]
    async fn test_empty_page_with_cursor_ends_sequence() {
        let provider = ScriptedProvider::new(vec![Ok(page(10, &[], Some("dangling")))]);
        let session = SessionHandle::from_token("t");
        let mut fetcher = PageFetcher::new(&provider, &session, "src-1");

        assert!(fetcher.next_batch().await.unwrap().is_none());
        assert!(fetcher.next_batch().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_error_aborts_sequence() {
        let provider = ScriptedProvider::new(vec![
            Ok(page(500, &["1", "2"], Some("c1"))),
            Err(SercatError::Provider("boom".to_string()).into()),
        ]);
        let session = SessionHandle::from_token("t");
        let mut fetcher = PageFetcher::new(&provider, &session, "src-1");

        let first = fetcher.next_batch().await.unwrap().unwrap();
        assert_eq!(first.cumulative, 2);

        let err = fetcher.next_batch().await.unwrap_err();
        assert!(err.to_string().contains("boom"));

        // After a failure the sequence is over, not retried
        assert!(fetcher.next_batch().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_total_recorded_from_first_page_only() {
        // A provider bug that changes `total` mid-drain does not move
        // the recorded declared total.
        let provider = ScriptedProvider::new(vec![
            Ok(page(3, &["1"], Some("c1"))),
            Ok(page(99, &["2"], None)),
        ]);
        let session = SessionHandle::from_token("t");
        let mut fetcher = PageFetcher::new(&provider, &session, "src-1");

        fetcher.next_batch().await.unwrap();
        fetcher.next_batch().await.unwrap();
        assert_eq!(fetcher.declared_total(), Some(3));
    }
}
