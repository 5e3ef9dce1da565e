//! Displayed search results with last-response-wins semantics.

use crate::model::Track;
use parking_lot::RwLock;
use std::sync::Arc;

/// Immutable snapshot of the displayed results: the track list together with
/// the query it answers. The two always travel as a pair.
#[derive(Debug, Clone, Default)]
pub struct ResultSet {
    pub query: String,
    pub tracks: Vec<Track>,
}

/// Shared holder for the displayed result set.
///
/// Concurrent searches are allowed to race; whichever response arrives last
/// wins the display. The swap replaces query and tracks in one write, so a
/// reader never observes one query's term paired with another's tracks.
#[derive(Clone, Default)]
pub struct SearchResults {
    inner: Arc<RwLock<ResultSet>>,
}

impl SearchResults {
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomically replace the displayed result set.
    pub fn swap(&self, query: impl Into<String>, tracks: Vec<Track>) {
        let mut guard = self.inner.write();
        *guard = ResultSet {
            query: query.into(),
            tracks,
        };
    }

    /// Consistent snapshot for rendering.
    pub fn snapshot(&self) -> ResultSet {
        self.inner.read().clone()
    }

    /// Drop the displayed results (e.g. when the search box is cleared).
    pub fn clear(&self) {
        *self.inner.write() = ResultSet::default();
    }
}
