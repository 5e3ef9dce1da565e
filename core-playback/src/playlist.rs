//! # Playlist
//!
//! User-curated, order-preserving collection of tracks, independent of the
//! playback queue. "Play this one now" goes through the controller and
//! bypasses the queue entirely.

use core_catalog::Track;
use parking_lot::Mutex;
use std::sync::Arc;

/// In-memory playlist. Cloning yields another handle to the same list.
///
/// No de-duplication is enforced; the same track may appear multiple times.
/// Nothing is persisted across restarts.
#[derive(Clone, Default)]
pub struct Playlist {
    inner: Arc<Mutex<Vec<Track>>>,
}

impl Playlist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a track to the end.
    pub fn append(&self, track: Track) {
        self.inner.lock().push(track);
    }

    /// Remove and return the track at `index`, or `None` if out of range.
    pub fn remove_at(&self, index: usize) -> Option<Track> {
        let mut guard = self.inner.lock();
        if index < guard.len() {
            Some(guard.remove(index))
        } else {
            None
        }
    }

    /// The track at `index`, cloned for a play-now request.
    pub fn get(&self, index: usize) -> Option<Track> {
        self.inner.lock().get(index).cloned()
    }

    /// Read-only snapshot in list order.
    pub fn tracks(&self) -> Vec<Track> {
        self.inner.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }
}
