//! Audio engine bridge trait and supporting types.
//!
//! The core never decodes or buffers audio itself. It hands the engine a
//! single source at a time (a resolved remote URL or a local file path) and
//! drives it through a small command surface. Completion is reported back on
//! a broadcast stream that the host pumps into the player controller.

use crate::error::Result;
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::sync::broadcast;

/// The concrete source handed to the engine for one playback session.
///
/// Exactly one variant is in effect per session; the engine owns decoding,
/// buffering, and device output for either kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineSource {
    /// Remote HTTP(S) stream, already resolved to a time-limited URL.
    RemoteStream { url: String },
    /// Local file accessible to the host runtime.
    LocalFile { path: PathBuf },
}

impl EngineSource {
    /// Determine whether the source represents remote content.
    pub fn is_remote(&self) -> bool {
        matches!(self, EngineSource::RemoteStream { .. })
    }

    /// Human-readable description for logging.
    pub fn describe(&self) -> String {
        match self {
            EngineSource::RemoteStream { url } => format!("remote:{}", url),
            EngineSource::LocalFile { path } => format!("local:{}", path.display()),
        }
    }
}

/// Out-of-band notifications emitted by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineNotification {
    /// The loaded source played through to its natural end.
    PlaybackCompleted,
    /// The engine failed mid-stream after a successful load.
    PlaybackFaulted { message: String },
}

/// Trait for platform-specific audio engines.
///
/// Implementations hold at most one loaded source. `load` replaces any prior
/// source; `stop` releases it. All control calls are serialized by the
/// caller, so implementations do not need to tolerate concurrent commands
/// for the same session.
#[async_trait]
pub trait AudioEngine: Send + Sync {
    /// Load a source, releasing any previously loaded one.
    ///
    /// # Errors
    ///
    /// Returns [`crate::BridgeError::EngineRejected`] when the engine cannot
    /// open the source (unreachable URL, unreadable file, unsupported
    /// container).
    async fn load(&self, source: EngineSource) -> Result<()>;

    /// Begin output for the loaded source.
    async fn play(&self) -> Result<()>;

    /// Pause output without releasing the source.
    async fn pause(&self) -> Result<()>;

    /// Resume output after a pause.
    async fn resume(&self) -> Result<()>;

    /// Stop output and release the loaded source.
    async fn stop(&self) -> Result<()>;

    /// Subscribe to completion/fault notifications.
    ///
    /// Each call returns an independent receiver; past notifications are not
    /// replayed.
    fn subscribe(&self) -> broadcast::Receiver<EngineNotification>;
}
