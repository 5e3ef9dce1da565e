//! # Catalog Client
//!
//! Search and stream resolution against the catalog backend.
//!
//! ## Resolve response shapes
//!
//! Two shapes of resolve response exist in the wild for this backend family:
//!
//! 1. a single JSON object carrying `OriginalTrackUrl`;
//! 2. a JSON array whose third element is an object carrying
//!    `OriginalTrackUrl`.
//!
//! The backend contract is ambiguous, so the parser is shape-tolerant: it
//! attempts the object form first and falls back to indexing the array form.
//! Responses matching neither shape fail with
//! [`CatalogError::ResolveMissingUrl`].

use crate::error::{CatalogError, Result};
use crate::model::{RawTrack, SearchResponse, Track};
use crate::results::SearchResults;
use bridge_traits::http::{HttpClient, HttpRequest};
use core_runtime::config::{AudioQuality, SharedConfig};
use core_runtime::events::{CoreEvent, EventBus, SearchEvent};
use std::sync::Arc;
use tracing::{debug, warn};

/// Client for the remote catalog.
///
/// Holds the shared configuration handle (so runtime base-URL edits apply to
/// the next request), the displayed [`SearchResults`], and the event bus on
/// which search outcomes are announced.
#[derive(Clone)]
pub struct CatalogClient {
    http: Arc<dyn HttpClient>,
    config: SharedConfig,
    events: EventBus,
    results: SearchResults,
}

impl CatalogClient {
    pub fn new(http: Arc<dyn HttpClient>, config: SharedConfig, events: EventBus) -> Self {
        Self {
            http,
            config,
            events,
            results: SearchResults::new(),
        }
    }

    /// Handle to the displayed result set.
    pub fn results(&self) -> SearchResults {
        self.results.clone()
    }

    /// Search the catalog by free text.
    ///
    /// A blank or whitespace-only query is a no-op: no request is issued and
    /// an empty list is returned. On success the displayed result set is
    /// swapped to the new (query, tracks) pair and a
    /// [`SearchEvent::Completed`] is emitted; concurrent searches race and
    /// the last response to arrive wins the display.
    ///
    /// # Errors
    ///
    /// [`CatalogError::SearchFailed`] for a non-2xx status,
    /// [`CatalogError::SearchNetwork`] when the transport fails.
    pub async fn search(&self, query: &str) -> Result<Vec<Track>> {
        if query.trim().is_empty() {
            return Ok(Vec::new());
        }

        let snapshot = self.config.snapshot();
        let url = format!(
            "{}/search/?s={}",
            snapshot.base_url,
            urlencoding::encode(query)
        );
        debug!(query = %query, "searching catalog");

        let outcome = self.execute_search(&url, snapshot.http_timeout).await;
        match &outcome {
            Ok(tracks) => {
                self.results.swap(query, tracks.clone());
                self.events
                    .emit(CoreEvent::Search(SearchEvent::Completed {
                        query: query.to_string(),
                        track_count: tracks.len(),
                    }))
                    .ok();
            }
            Err(error) => {
                warn!(query = %query, %error, "catalog search failed");
                self.events
                    .emit(CoreEvent::Search(SearchEvent::Failed {
                        query: query.to_string(),
                        message: error.to_string(),
                    }))
                    .ok();
            }
        }
        outcome
    }

    async fn execute_search(
        &self,
        url: &str,
        timeout: std::time::Duration,
    ) -> Result<Vec<Track>> {
        let response = self
            .http
            .execute(HttpRequest::get(url).timeout(timeout))
            .await
            .map_err(|e| CatalogError::SearchNetwork(e.to_string()))?;

        if !response.is_success() {
            return Err(CatalogError::SearchFailed {
                status: response.status,
            });
        }

        let parsed: SearchResponse = response
            .json()
            .map_err(|e| CatalogError::MalformedResponse(e.to_string()))?;

        Ok(parsed
            .items
            .into_iter()
            .filter_map(RawTrack::into_track)
            .collect())
    }

    /// Exchange a track id for a playable stream URL.
    ///
    /// The returned URL is time-limited; callers hand it straight to the
    /// audio engine rather than storing it.
    ///
    /// # Errors
    ///
    /// [`CatalogError::ResolveMissingUrl`] when the response parses but
    /// carries no usable `OriginalTrackUrl`; [`CatalogError::ResolveFailed`]
    /// / [`CatalogError::ResolveNetwork`] for status and transport failures.
    pub async fn resolve_stream(&self, track_id: &str, quality: AudioQuality) -> Result<String> {
        let snapshot = self.config.snapshot();
        let url = format!(
            "{}/song/?id={}&quality={}",
            snapshot.base_url,
            urlencoding::encode(track_id),
            quality.as_param()
        );
        debug!(track_id = %track_id, quality = quality.as_param(), "resolving stream");

        let response = self
            .http
            .execute(HttpRequest::get(&url).timeout(snapshot.http_timeout))
            .await
            .map_err(|e| CatalogError::ResolveNetwork(e.to_string()))?;

        if !response.is_success() {
            return Err(CatalogError::ResolveFailed {
                status: response.status,
            });
        }

        let value: serde_json::Value = response
            .json()
            .map_err(|e| CatalogError::MalformedResponse(e.to_string()))?;

        extract_stream_url(&value).ok_or_else(|| CatalogError::ResolveMissingUrl {
            track_id: track_id.to_string(),
        })
    }
}

/// Pull `OriginalTrackUrl` out of either observed resolve response shape.
fn extract_stream_url(value: &serde_json::Value) -> Option<String> {
    let field = |object: &serde_json::Value| {
        object
            .get("OriginalTrackUrl")
            .and_then(|v| v.as_str())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
    };

    // Canonical shape: a bare object with the field.
    if value.is_object() {
        return field(value);
    }
    // Legacy shape: an array carrying the payload object at index 2.
    value.get(2).and_then(field)
}
