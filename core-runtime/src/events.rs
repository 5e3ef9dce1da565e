//! # Event Bus System
//!
//! Event-driven notification layer built on `tokio::sync::broadcast`.
//!
//! ## Overview
//!
//! The core never assumes a rendering framework. Instead, every observable
//! mutation (search results landing, playback transitions, queue changes)
//! is published as a typed [`CoreEvent`] on the [`EventBus`]; any number of
//! view layers subscribe independently and re-render on what they receive.
//!
//! ```text
//! ┌──────────────┐    emit     ┌───────────┐
//! │ Catalog      ├────────────>│           │
//! └──────────────┘             │ EventBus  │   subscribe   ┌────────────┐
//! ┌──────────────┐    emit     │ (broadcast├──────────────>│ View layer │
//! │ Player Ctrl  ├────────────>│  channel) │               └────────────┘
//! └──────────────┘             └───────────┘
//! ```
//!
//! ## Usage
//!
//! ```
//! use core_runtime::events::{EventBus, CoreEvent, PlaybackEvent};
//!
//! let bus = EventBus::new(100);
//! let mut subscriber = bus.subscribe();
//!
//! bus.emit(CoreEvent::Playback(PlaybackEvent::Started {
//!     track_id: "7".to_string(),
//!     title: "Consequence".to_string(),
//! }))
//! .ok();
//! ```
//!
//! Subscribers that fall behind receive `RecvError::Lagged` and simply
//! continue with newer events; `RecvError::Closed` signals shutdown.

use serde::{Deserialize, Serialize};
use std::fmt;
use tokio::sync::broadcast;

pub use tokio::sync::broadcast::error::{RecvError, SendError};
pub use tokio::sync::broadcast::Receiver;

/// Default buffer size for the event bus channel.
pub const DEFAULT_EVENT_BUFFER_SIZE: usize = 100;

// ============================================================================
// Core Event Types
// ============================================================================

/// Top-level event enum encompassing all event categories.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "payload")]
pub enum CoreEvent {
    /// Search-related events
    Search(SearchEvent),
    /// Playback-related events
    Playback(PlaybackEvent),
    /// Queue-related events
    Queue(QueueEvent),
}

impl CoreEvent {
    /// Returns a human-readable description of the event.
    pub fn description(&self) -> &str {
        match self {
            CoreEvent::Search(e) => e.description(),
            CoreEvent::Playback(e) => e.description(),
            CoreEvent::Queue(e) => e.description(),
        }
    }

    /// Returns the severity level of the event.
    pub fn severity(&self) -> EventSeverity {
        match self {
            CoreEvent::Search(SearchEvent::Failed { .. }) => EventSeverity::Error,
            CoreEvent::Playback(PlaybackEvent::Error { .. }) => EventSeverity::Error,
            CoreEvent::Playback(PlaybackEvent::Started { .. }) => EventSeverity::Info,
            CoreEvent::Search(SearchEvent::Completed { .. }) => EventSeverity::Info,
            _ => EventSeverity::Debug,
        }
    }
}

/// Event severity levels for filtering and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EventSeverity {
    Debug,
    Info,
    Warning,
    Error,
}

// ============================================================================
// Search Events
// ============================================================================

/// Events related to catalog searches.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "event")]
pub enum SearchEvent {
    /// A search response arrived and the displayed result set was swapped.
    Completed {
        /// The query the results belong to.
        query: String,
        /// Number of tracks in the result set.
        track_count: usize,
    },
    /// A search failed; the displayed result set is unchanged.
    Failed {
        /// The query that failed.
        query: String,
        /// Human-readable error message.
        message: String,
    },
}

impl SearchEvent {
    fn description(&self) -> &str {
        match self {
            SearchEvent::Completed { .. } => "Search completed",
            SearchEvent::Failed { .. } => "Search failed",
        }
    }
}

// ============================================================================
// Playback Events
// ============================================================================

/// Events related to audio playback.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "event")]
pub enum PlaybackEvent {
    /// Playback started for a track.
    Started {
        /// The track ID being played.
        track_id: String,
        /// Track title for display.
        title: String,
    },
    /// Playback paused.
    Paused {
        /// The track ID.
        track_id: String,
    },
    /// Playback resumed after a pause.
    Resumed {
        /// The track ID.
        track_id: String,
    },
    /// Playback stopped; displayed metadata was cleared.
    Stopped,
    /// Track finished playing naturally.
    Completed {
        /// The track ID that completed.
        track_id: String,
    },
    /// Playback error occurred.
    Error {
        /// The track ID if available.
        track_id: Option<String>,
        /// Human-readable error message.
        message: String,
    },
}

impl PlaybackEvent {
    fn description(&self) -> &str {
        match self {
            PlaybackEvent::Started { .. } => "Playback started",
            PlaybackEvent::Paused { .. } => "Playback paused",
            PlaybackEvent::Resumed { .. } => "Playback resumed",
            PlaybackEvent::Stopped => "Playback stopped",
            PlaybackEvent::Completed { .. } => "Track completed",
            PlaybackEvent::Error { .. } => "Playback error",
        }
    }
}

// ============================================================================
// Queue Events
// ============================================================================

/// Events related to the playback queue.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "event")]
pub enum QueueEvent {
    /// A track was appended to the queue tail.
    TrackEnqueued {
        /// The enqueued track ID.
        track_id: String,
        /// Queue length after the append.
        queue_len: usize,
    },
    /// The queue was emptied.
    Cleared,
    /// Playback advanced to the queue head after a completion.
    Advanced {
        /// The track now playing.
        next_track_id: String,
        /// Tracks still pending after the advance.
        remaining: usize,
    },
    /// A completion arrived with an empty queue; playback ended.
    Drained,
}

impl QueueEvent {
    fn description(&self) -> &str {
        match self {
            QueueEvent::TrackEnqueued { .. } => "Track enqueued",
            QueueEvent::Cleared => "Queue cleared",
            QueueEvent::Advanced { .. } => "Queue advanced",
            QueueEvent::Drained => "Queue drained",
        }
    }
}

// ============================================================================
// Event Bus
// ============================================================================

/// Central event bus for publishing and subscribing to events.
///
/// Uses `tokio::sync::broadcast` internally: multiple producers (clone the
/// bus), multiple independent consumers, non-blocking sends, and lagging
/// detection for slow subscribers.
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<CoreEvent>,
}

impl EventBus {
    /// Creates a new event bus with the specified buffer capacity.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publishes an event to all subscribers.
    ///
    /// Returns the number of subscribers that received the event, or an
    /// error when there are none. Emission with no subscribers is routine
    /// during startup, so callers usually discard the result with `.ok()`.
    pub fn emit(&self, event: CoreEvent) -> Result<usize, SendError<CoreEvent>> {
        self.sender.send(event)
    }

    /// Creates a new subscriber. Past events are not replayed.
    pub fn subscribe(&self) -> Receiver<CoreEvent> {
        self.sender.subscribe()
    }

    /// Returns the number of active subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_BUFFER_SIZE)
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("subscriber_count", &self.subscriber_count())
            .finish()
    }
}

// ============================================================================
// Event Stream Wrapper
// ============================================================================

/// Type alias for event filter functions.
type EventFilter = Box<dyn Fn(&CoreEvent) -> bool + Send + Sync>;

/// A wrapper around `broadcast::Receiver` with optional filtering.
///
/// ```no_run
/// use core_runtime::events::{EventBus, EventStream, CoreEvent};
///
/// let bus = EventBus::default();
/// let mut playback_only = EventStream::new(bus.subscribe())
///     .filter(|event| matches!(event, CoreEvent::Playback(_)));
/// ```
pub struct EventStream {
    receiver: Receiver<CoreEvent>,
    filter: Option<EventFilter>,
}

impl EventStream {
    /// Creates a new event stream from a receiver.
    pub fn new(receiver: Receiver<CoreEvent>) -> Self {
        Self {
            receiver,
            filter: None,
        }
    }

    /// Adds a filter; only matching events are returned by `recv()`.
    pub fn filter<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&CoreEvent) -> bool + Send + Sync + 'static,
    {
        self.filter = Some(Box::new(predicate));
        self
    }

    /// Receives the next event that passes the filter.
    ///
    /// # Errors
    ///
    /// Returns `RecvError::Lagged(n)` if the subscriber fell behind by `n`
    /// events, or `RecvError::Closed` when all senders are gone.
    pub async fn recv(&mut self) -> Result<CoreEvent, RecvError> {
        loop {
            let event = self.receiver.recv().await?;

            let Some(filter) = &self.filter else {
                return Ok(event);
            };

            if filter(&event) {
                return Ok(event);
            }
        }
    }
}

impl fmt::Debug for EventStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventStream")
            .field("has_filter", &self.filter.is_some())
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
