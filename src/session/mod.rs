//! Search session orchestration
//!
//! A `SearchSession` owns the current search: the per-source summary
//! and the fetched record list. It sequences the probe, the large-load
//! confirmation gate, and the full drain, and it is an explicit
//! passed-around object so independent sessions never share state.
//!
//! State machine:
//!
//! ```text
//! Idle -> Probing -> Probed -> (Idle | ConfirmingLargeLoad) -> Loading -> Loaded
//! ```
//!
//! `Loaded -> Idle` on new source selection; any state -> `Idle` on
//! reset. Everything runs on one logical thread of control: no locks,
//! no background workers, no mid-drain cancellation. Correctness rests
//! on sequencing, never on mutual exclusion.

pub mod fetcher;
pub mod stats;

use crate::error::{Result, SercatError};
use crate::model::MetadataRecord;
use crate::progress::ProgressSink;
use crate::provider::{CatalogProvider, SessionHandle};
use fetcher::PageFetcher;
use stats::SummaryStats;

use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Session lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No search in flight, no or stale results
    Idle,
    /// First-page probe in flight
    Probing,
    /// Probe complete; total known, no records loaded
    Probed,
    /// Full load requested but gated on explicit confirmation
    ConfirmingLargeLoad,
    /// Full drain in flight
    Loading,
    /// Full drain complete; records and enriched summary available
    Loaded,
}

/// Outcome of a full-load request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadGate {
    /// Load may proceed directly
    Ready,
    /// Probe found zero series; loading is a no-op
    NothingToLoad,
    /// Total exceeds the configured threshold; `confirm_load` required
    ConfirmationRequired,
}

/// Per-source search summary
///
/// Created by the probe; enriched in place by a completed full load.
/// `total_count` comes from the probe and is authoritative: it is never
/// overwritten by the drained count, so the user-visible number does
/// not jump when the two disagree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchSummary {
    /// Source this summary describes
    pub source_id: String,
    /// Declared total from the probe, authoritative
    pub total_count: u64,
    /// Present only after a full load completes
    pub stats: Option<SummaryStats>,
}

/// One user's search session against the catalog
pub struct SearchSession {
    provider: Arc<dyn CatalogProvider>,
    handle: SessionHandle,
    large_load_threshold: u64,
    state: SessionState,
    summary: Option<SearchSummary>,
    records: Vec<MetadataRecord>,
    load_armed: bool,
}

impl SearchSession {
    /// Create a session from an authenticated handle
    ///
    /// # Arguments
    ///
    /// * `provider` - Catalog provider to query
    /// * `handle` - Authenticated session handle from `login`
    /// * `large_load_threshold` - Series count above which a full load
    ///   requires explicit confirmation
    pub fn new(
        provider: Arc<dyn CatalogProvider>,
        handle: SessionHandle,
        large_load_threshold: u64,
    ) -> Self {
        Self {
            provider,
            handle,
            large_load_threshold,
            state: SessionState::Idle,
            summary: None,
            records: Vec::new(),
            load_armed: false,
        }
    }

    /// Current lifecycle state
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Current summary, if a probe has completed
    pub fn summary(&self) -> Option<&SearchSummary> {
        self.summary.as_ref()
    }

    /// Fetched records; empty unless the session is `Loaded`
    pub fn records(&self) -> &[MetadataRecord] {
        &self.records
    }

    /// Discard all search state and return to `Idle`
    pub fn reset(&mut self) {
        self.state = SessionState::Idle;
        self.summary = None;
        self.records.clear();
        self.load_armed = false;
    }

    /// Probe a source for its total series count
    ///
    /// Issues a single first-page query; the batch itself is discarded,
    /// only the declared total is kept. Any previous summary and record
    /// list are unconditionally replaced (last write wins).
    ///
    /// # Errors
    ///
    /// On provider failure the session returns to `Idle` with the
    /// summary cleared, and the error is propagated
    pub async fn probe(&mut self, source_id: &str) -> Result<&SearchSummary> {
        self.reset();
        self.state = SessionState::Probing;
        tracing::info!("Probing source {}", source_id);

        let mut fetcher = PageFetcher::new(self.provider.as_ref(), &self.handle, source_id);
        match fetcher.next_batch().await {
            Ok(_first_batch_discarded) => {}
            Err(e) => {
                tracing::error!("Probe failed for source {}: {:#}", source_id, e);
                self.reset();
                return Err(e);
            }
        }

        let total_count = fetcher.declared_total().unwrap_or(0);
        tracing::info!("Source {} declares {} series", source_id, total_count);

        self.state = SessionState::Probed;
        Ok(self.summary.insert(SearchSummary {
            source_id: source_id.to_string(),
            total_count,
            stats: None,
        }))
    }

    /// Request a full metadata load for the probed source
    ///
    /// Zero-series results are a no-op. Totals above the configured
    /// threshold transition to `ConfirmingLargeLoad` and require
    /// `confirm_load` before `load_all` is permitted; a total exactly
    /// at the threshold proceeds without confirmation.
    ///
    /// # Errors
    ///
    /// Returns `SercatError::Session` unless the session is `Probed`
    pub fn request_load(&mut self) -> Result<LoadGate> {
        if self.state != SessionState::Probed {
            return Err(SercatError::Session(format!(
                "cannot request a load in state {:?}; probe a source first",
                self.state
            ))
            .into());
        }

        let total = self
            .summary
            .as_ref()
            .map(|s| s.total_count)
            .unwrap_or(0);

        if total == 0 {
            tracing::debug!("Load requested for empty result; ignoring");
            return Ok(LoadGate::NothingToLoad);
        }

        if total > self.large_load_threshold {
            tracing::info!(
                "Load of {} series exceeds threshold {}; confirmation required",
                total,
                self.large_load_threshold
            );
            self.state = SessionState::ConfirmingLargeLoad;
            return Ok(LoadGate::ConfirmationRequired);
        }

        self.load_armed = true;
        Ok(LoadGate::Ready)
    }

    /// Confirm a gated large load
    ///
    /// # Errors
    ///
    /// Returns `SercatError::Session` unless a confirmation is pending
    pub fn confirm_load(&mut self) -> Result<()> {
        if self.state != SessionState::ConfirmingLargeLoad {
            return Err(SercatError::Session(
                "no large load is awaiting confirmation".to_string(),
            )
            .into());
        }
        self.load_armed = true;
        self.state = SessionState::Probed;
        Ok(())
    }

    /// Cancel a gated large load, discarding the search
    pub fn cancel_load(&mut self) {
        if self.state == SessionState::ConfirmingLargeLoad {
            tracing::info!("Large load cancelled");
            self.reset();
        }
    }

    /// Drain the full result set and enrich the summary
    ///
    /// Consumes the provider's pages to exhaustion, reporting
    /// `(processed, total)` to the sink after every batch with the
    /// processed count clamped to the declared total. On completion the
    /// aggregator enriches the summary in place; a drained count that
    /// differs from the declared total is logged and otherwise ignored,
    /// the probe total stays authoritative.
    ///
    /// # Errors
    ///
    /// On a mid-drain provider failure the partial record list is
    /// discarded, the probe-level summary survives unmodified, the
    /// session returns to `Idle`, and the error is propagated once
    pub async fn load_all(&mut self, progress: &mut dyn ProgressSink) -> Result<&SearchSummary> {
        if self.state != SessionState::Probed || !self.load_armed {
            return Err(SercatError::Session(format!(
                "cannot load in state {:?}; request and confirm a load first",
                self.state
            ))
            .into());
        }

        let (source_id, total) = {
            let summary = self
                .summary
                .as_ref()
                .ok_or_else(|| SercatError::Session("no probe summary".to_string()))?;
            (summary.source_id.clone(), summary.total_count)
        };

        self.state = SessionState::Loading;
        self.load_armed = false;
        tracing::info!("Loading all metadata for source {} ({} series)", source_id, total);

        let mut fetcher = PageFetcher::new(self.provider.as_ref(), &self.handle, &source_id);
        let mut fetched: Vec<MetadataRecord> = Vec::new();

        loop {
            match fetcher.next_batch().await {
                Ok(Some(batch)) => {
                    fetched.extend(batch.records);
                    progress.update(batch.cumulative.min(total), total);
                }
                Ok(None) => break,
                Err(e) => {
                    tracing::error!(
                        "Load failed for source {} after {} records: {:#}",
                        source_id,
                        fetched.len(),
                        e
                    );
                    self.records.clear();
                    self.state = SessionState::Idle;
                    return Err(e);
                }
            }
        }

        // Final update so the sink always sees completion
        progress.update(total, total);

        let stats = stats::aggregate(&fetched);
        if stats.records_processed != total {
            tracing::warn!(
                "Data inconsistency for source {}: declared total {} but drained {}; keeping declared total",
                source_id,
                total,
                stats.records_processed
            );
        }

        self.records = fetched;
        self.state = SessionState::Loaded;
        tracing::info!(
            "Loaded {} records for source {}",
            self.records.len(),
            source_id
        );

        let summary = self
            .summary
            .as_mut()
            .ok_or_else(|| SercatError::Session("no probe summary".to_string()))?;
        summary.stats = Some(stats);
        Ok(&*summary)
    }
}
