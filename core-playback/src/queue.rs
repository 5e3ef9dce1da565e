//! # Playback Queue
//!
//! Ordered sequence of pending tracks, consumed head-first on each
//! playback-completion advance. The queue holds only not-yet-started
//! tracks; the currently-playing track is never in it. Queue operations
//! never trigger playback themselves — the controller decides when to call
//! [`PlaybackQueue::dequeue_next`].

use core_catalog::Track;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;

/// FIFO queue of pending tracks. Cloning yields another handle to the same
/// queue.
///
/// No capacity bound and no de-duplication: the same track may be enqueued
/// any number of times.
#[derive(Clone, Default)]
pub struct PlaybackQueue {
    inner: Arc<Mutex<VecDeque<Track>>>,
}

impl PlaybackQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a track to the tail.
    pub fn enqueue(&self, track: Track) {
        self.inner.lock().push_back(track);
    }

    /// Remove and return the head, or `None` when the queue is empty.
    pub fn dequeue_next(&self) -> Option<Track> {
        self.inner.lock().pop_front()
    }

    /// Read-only snapshot in play order, for the "show queue" view.
    pub fn peek_all(&self) -> Vec<Track> {
        self.inner.lock().iter().cloned().collect()
    }

    /// Empty the queue.
    pub fn clear(&self) {
        self.inner.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }
}
