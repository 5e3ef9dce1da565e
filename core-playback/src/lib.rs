//! # Core Playback Module
//!
//! The playback half of the client core: the pending-track queue, the
//! user-curated playlist, and the player controller that owns the single
//! active playback session.
//!
//! ## Architecture
//!
//! The controller is the only component that talks to the audio engine. A
//! play request always stops any prior session, resolves a
//! [`StreamTarget`] (a local path as-is, a catalog track through
//! [`CatalogClient`](core_catalog::CatalogClient)), and only then commands
//! the engine. Completion notifications flow back in on the same serialized
//! control path and drive the queue advance.
//!
//! ```text
//! view intent ──> PlayerController ──> AudioEngine (bridge)
//!                      │    ▲
//!         dequeue_next │    │ PlaybackCompleted
//!                      ▼    │
//!                 PlaybackQueue
//! ```

pub mod controller;
pub mod error;
pub mod playlist;
pub mod queue;
pub mod source;

pub use controller::{spawn_completion_pump, PlayerController, PlayerStatus};
pub use error::{PlayerError, Result};
pub use playlist::Playlist;
pub use queue::PlaybackQueue;
pub use source::StreamTarget;
