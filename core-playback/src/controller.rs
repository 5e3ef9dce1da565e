//! # Player Controller
//!
//! Owns the single active playback session and every interaction with the
//! audio engine.
//!
//! ## State machine
//!
//! States: `Idle`, `Loading`, `Playing`, `Paused`, `Stopped`. A play request
//! from any state first stops the prior session (at most one active stream
//! at a time), then resolves a [`StreamTarget`], then commands the engine to
//! load and start it. Completion notifications advance the queue; an empty
//! queue ends playback.
//!
//! ## Last-request-wins
//!
//! Each play request takes a fresh generation number. After every await
//! point the request re-checks whether a newer one superseded it and, if so,
//! abandons silently: the newer request has already stopped the engine and
//! owns it from then on. The engine is therefore never asked to hold two
//! concurrently loaded sources.
//!
//! Callers drive the controller from a single logical control path (view
//! intents and the completion pump); the controller does not attempt to
//! untangle truly simultaneous commands beyond the generation guard.

use crate::error::{PlayerError, Result};
use crate::playlist::Playlist;
use crate::queue::PlaybackQueue;
use crate::source::StreamTarget;
use bridge_traits::audio::{AudioEngine, EngineNotification};
use bridge_traits::files::FileSelector;
use core_catalog::model::UNKNOWN_TITLE;
use core_catalog::{CatalogClient, Track};
use core_runtime::config::SharedConfig;
use core_runtime::events::{CoreEvent, EventBus, PlaybackEvent, QueueEvent, RecvError};
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, warn};

/// Player lifecycle state, as displayed to the view layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerStatus {
    Idle,
    Loading,
    Playing,
    Paused,
    Stopped,
}

/// The one playback session the controller owns.
struct Session {
    status: PlayerStatus,
    /// Displayed "now playing" metadata.
    current: Option<Track>,
    /// The source the engine currently holds, if any.
    target: Option<StreamTarget>,
}

impl Session {
    fn has_engine_source(&self) -> bool {
        self.target.is_some() || matches!(self.status, PlayerStatus::Playing | PlayerStatus::Paused)
    }
}

/// Controller for the single active playback session.
pub struct PlayerController {
    engine: Arc<dyn AudioEngine>,
    catalog: CatalogClient,
    config: SharedConfig,
    events: EventBus,
    queue: PlaybackQueue,
    playlist: Playlist,
    session: Mutex<Session>,
    /// Monotonic play-request generation; stale requests abandon themselves.
    generation: AtomicU64,
}

impl PlayerController {
    pub fn new(
        engine: Arc<dyn AudioEngine>,
        catalog: CatalogClient,
        config: SharedConfig,
        events: EventBus,
    ) -> Self {
        Self {
            engine,
            catalog,
            config,
            events,
            queue: PlaybackQueue::new(),
            playlist: Playlist::new(),
            session: Mutex::new(Session {
                status: PlayerStatus::Idle,
                current: None,
                target: None,
            }),
            generation: AtomicU64::new(0),
        }
    }

    /// Handle to the pending-track queue.
    pub fn queue(&self) -> PlaybackQueue {
        self.queue.clone()
    }

    /// Handle to the user-curated playlist.
    pub fn playlist(&self) -> Playlist {
        self.playlist.clone()
    }

    /// Current lifecycle state.
    pub fn status(&self) -> PlayerStatus {
        self.session.lock().status
    }

    /// Displayed "now playing" metadata, if any.
    pub fn now_playing(&self) -> Option<Track> {
        self.session.lock().current.clone()
    }

    /// Append a track to the queue tail. Never triggers playback.
    pub fn enqueue(&self, track: Track) {
        let track_id = track.id.clone();
        self.queue.enqueue(track);
        self.events
            .emit(CoreEvent::Queue(QueueEvent::TrackEnqueued {
                track_id,
                queue_len: self.queue.len(),
            }))
            .ok();
    }

    /// Empty the queue.
    pub fn clear_queue(&self) {
        self.queue.clear();
        self.events.emit(CoreEvent::Queue(QueueEvent::Cleared)).ok();
    }

    /// Play a catalog track, resolving its stream URL first.
    ///
    /// Any prior session is stopped before the resolve call goes out. A
    /// track whose id is blank cannot be resolved and fails with
    /// [`PlayerError::NoSourceAvailable`] before any catalog or engine call.
    pub async fn play(&self, track: Track) -> Result<()> {
        if track.id.trim().is_empty() {
            return Err(PlayerError::NoSourceAvailable);
        }

        let request = self.begin_request().await?;

        let quality = track.quality_or(self.config.default_quality());
        let url = match self.catalog.resolve_stream(&track.id, quality).await {
            Ok(url) => url,
            Err(error) => {
                self.fail_request(request, Some(&track.id), &error.to_string());
                return Err(error.into());
            }
        };

        self.start_target(request, track, StreamTarget::Remote { url })
            .await
    }

    /// Play a local file as-is, without touching the catalog.
    pub async fn play_local(&self, path: PathBuf) -> Result<()> {
        if path.as_os_str().is_empty() {
            return Err(PlayerError::NoSourceAvailable);
        }

        let request = self.begin_request().await?;
        let track = local_track(&path);
        self.start_target(request, track, StreamTarget::Local { path })
            .await
    }

    /// Ask the host to pick a file and play it.
    ///
    /// Returns `Ok(false)` when the user cancelled; that outcome is a no-op,
    /// not an error, and leaves the current session untouched.
    pub async fn play_selected(&self, selector: &dyn FileSelector) -> Result<bool> {
        let picked = selector
            .pick_audio_file()
            .await
            .map_err(|e| PlayerError::FileSelection(e.to_string()))?;

        match picked {
            Some(path) => {
                self.play_local(path).await?;
                Ok(true)
            }
            None => {
                debug!("file selection cancelled");
                Ok(false)
            }
        }
    }

    /// Play a playlist entry immediately, bypassing the queue.
    pub async fn play_from_playlist(&self, index: usize) -> Result<()> {
        let track = self
            .playlist
            .get(index)
            .ok_or(PlayerError::NoSourceAvailable)?;
        self.play(track).await
    }

    /// Pause output. A no-op unless currently playing.
    pub async fn pause(&self) -> Result<()> {
        let track_id = {
            let session = self.session.lock();
            if session.status != PlayerStatus::Playing {
                debug!(status = ?session.status, "pause ignored");
                return Ok(());
            }
            session.current.as_ref().map(|t| t.id.clone())
        };

        self.engine
            .pause()
            .await
            .map_err(|e| PlayerError::PlaybackFailed(e.to_string()))?;
        self.session.lock().status = PlayerStatus::Paused;

        if let Some(track_id) = track_id {
            self.events
                .emit(CoreEvent::Playback(PlaybackEvent::Paused { track_id }))
                .ok();
        }
        Ok(())
    }

    /// Resume output after a pause. A no-op unless currently paused.
    pub async fn resume(&self) -> Result<()> {
        let track_id = {
            let session = self.session.lock();
            if session.status != PlayerStatus::Paused {
                debug!(status = ?session.status, "resume ignored");
                return Ok(());
            }
            session.current.as_ref().map(|t| t.id.clone())
        };

        self.engine
            .resume()
            .await
            .map_err(|e| PlayerError::PlaybackFailed(e.to_string()))?;
        self.session.lock().status = PlayerStatus::Playing;

        if let Some(track_id) = track_id {
            self.events
                .emit(CoreEvent::Playback(PlaybackEvent::Resumed { track_id }))
                .ok();
        }
        Ok(())
    }

    /// Stop playback, release the engine's source, and clear the displayed
    /// metadata. Pending queue entries are left in place.
    pub async fn stop(&self) -> Result<()> {
        // Invalidate any in-flight play request.
        self.generation.fetch_add(1, Ordering::SeqCst);

        let had_source = {
            let session = self.session.lock();
            if session.status == PlayerStatus::Idle || session.status == PlayerStatus::Stopped {
                return Ok(());
            }
            session.has_engine_source()
        };

        if had_source {
            self.engine
                .stop()
                .await
                .map_err(|e| PlayerError::PlaybackFailed(e.to_string()))?;
        }

        {
            let mut session = self.session.lock();
            session.status = PlayerStatus::Stopped;
            session.current = None;
            session.target = None;
        }
        self.events
            .emit(CoreEvent::Playback(PlaybackEvent::Stopped))
            .ok();
        Ok(())
    }

    /// Handle the engine's "finished playing" notification.
    ///
    /// Delivered on the same serialized control path as user intents, so the
    /// queue is never mutated re-entrantly during an in-flight play request.
    /// Non-empty queue: dequeue the head and play it. Empty queue: end
    /// playback.
    pub async fn on_playback_completed(&self) -> Result<()> {
        let finished = self.session.lock().current.clone();
        if let Some(track) = &finished {
            self.events
                .emit(CoreEvent::Playback(PlaybackEvent::Completed {
                    track_id: track.id.clone(),
                }))
                .ok();
        }

        match self.queue.dequeue_next() {
            Some(next) => {
                debug!(track_id = %next.id, "advancing to queued track");
                self.events
                    .emit(CoreEvent::Queue(QueueEvent::Advanced {
                        next_track_id: next.id.clone(),
                        remaining: self.queue.len(),
                    }))
                    .ok();
                self.play(next).await
            }
            None => {
                debug!("queue drained, ending playback");
                self.events.emit(CoreEvent::Queue(QueueEvent::Drained)).ok();
                self.stop().await
            }
        }
    }

    /// Handle an engine fault that occurred after a successful load.
    pub async fn on_playback_faulted(&self, message: String) {
        let track_id = self.session.lock().current.as_ref().map(|t| t.id.clone());
        warn!(?track_id, %message, "engine faulted mid-stream");

        self.generation.fetch_add(1, Ordering::SeqCst);
        // Best-effort release; the engine may already have torn down.
        self.engine.stop().await.ok();
        {
            let mut session = self.session.lock();
            session.status = PlayerStatus::Stopped;
            session.current = None;
            session.target = None;
        }
        self.events
            .emit(CoreEvent::Playback(PlaybackEvent::Error { track_id, message }))
            .ok();
    }

    /// Subscribe to the engine's notification stream (for the pump).
    pub fn engine_notifications(
        &self,
    ) -> tokio::sync::broadcast::Receiver<EngineNotification> {
        self.engine.subscribe()
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    /// Claim a new request generation and stop any existing session.
    async fn begin_request(&self) -> Result<u64> {
        let request = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let had_source = {
            let mut session = self.session.lock();
            let had = session.has_engine_source();
            session.status = PlayerStatus::Loading;
            session.target = None;
            had
        };

        if had_source {
            if let Err(error) = self.engine.stop().await {
                self.fail_request(request, None, &error.to_string());
                return Err(PlayerError::PlaybackFailed(error.to_string()));
            }
        }
        Ok(request)
    }

    /// Whether a newer play request has taken over.
    fn superseded(&self, request: u64) -> bool {
        self.generation.load(Ordering::SeqCst) != request
    }

    /// Load and start a resolved target, committing the session on success.
    async fn start_target(
        &self,
        request: u64,
        track: Track,
        target: StreamTarget,
    ) -> Result<()> {
        if self.superseded(request) {
            debug!(track_id = %track.id, "play request superseded before load");
            return Ok(());
        }

        if let Err(error) = self.engine.load(target.to_engine_source()).await {
            self.fail_request(request, Some(&track.id), &error.to_string());
            return Err(PlayerError::PlaybackFailed(error.to_string()));
        }

        if self.superseded(request) {
            // The winning request owns the engine now; it has either already
            // replaced this load or is about to.
            return Ok(());
        }

        if let Err(error) = self.engine.play().await {
            self.fail_request(request, Some(&track.id), &error.to_string());
            return Err(PlayerError::PlaybackFailed(error.to_string()));
        }

        {
            let mut session = self.session.lock();
            if self.superseded(request) {
                return Ok(());
            }
            session.status = PlayerStatus::Playing;
            session.current = Some(track.clone());
            session.target = Some(target);
        }

        self.events
            .emit(CoreEvent::Playback(PlaybackEvent::Started {
                track_id: track.id,
                title: track.title,
            }))
            .ok();
        Ok(())
    }

    /// Return a failed request to a stable `Idle` state and announce it.
    ///
    /// Displayed metadata is left as it was; only the status changes.
    fn fail_request(&self, request: u64, track_id: Option<&str>, message: &str) {
        {
            let mut session = self.session.lock();
            if !self.superseded(request) {
                session.status = PlayerStatus::Idle;
                session.target = None;
            }
        }
        self.events
            .emit(CoreEvent::Playback(PlaybackEvent::Error {
                track_id: track_id.map(String::from),
                message: message.to_string(),
            }))
            .ok();
    }
}

/// Synthesized display metadata for a device file.
fn local_track(path: &Path) -> Track {
    let title = path
        .file_stem()
        .and_then(|s| s.to_str())
        .map(str::to_string)
        .unwrap_or_else(|| UNKNOWN_TITLE.to_string());

    Track {
        id: path.display().to_string(),
        title,
        artist_name: "Local File".to_string(),
        album_title: None,
        cover_id: None,
        duration_seconds: None,
        audio_quality: None,
    }
}

/// Forward engine notifications into the controller.
///
/// The returned task runs until the engine drops its notification sender.
/// Lagged receivers skip ahead; completions are never fabricated to make up
/// for missed ones.
pub fn spawn_completion_pump(controller: Arc<PlayerController>) -> tokio::task::JoinHandle<()> {
    let mut notifications = controller.engine_notifications();
    tokio::spawn(async move {
        loop {
            match notifications.recv().await {
                Ok(EngineNotification::PlaybackCompleted) => {
                    if let Err(error) = controller.on_playback_completed().await {
                        warn!(%error, "queue advance failed");
                    }
                }
                Ok(EngineNotification::PlaybackFaulted { message }) => {
                    controller.on_playback_faulted(message).await;
                }
                Err(RecvError::Lagged(missed)) => {
                    warn!(missed, "engine notification stream lagged");
                }
                Err(RecvError::Closed) => break,
            }
        }
    })
}
