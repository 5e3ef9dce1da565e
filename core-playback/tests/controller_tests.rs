//! Controller tests against fake engine, HTTP, and file-selection bridges.
//!
//! Exercises the full play pipeline (resolve, load, start), the queue
//! advance on completion, the last-request-wins policy, and the failure
//! paths that must leave the controller in a stable state.

use async_trait::async_trait;
use bridge_traits::audio::{AudioEngine, EngineNotification, EngineSource};
use bridge_traits::error::{BridgeError, Result as BridgeResult};
use bridge_traits::files::FileSelector;
use bridge_traits::http::{HttpClient, HttpRequest, HttpResponse};
use core_catalog::model::UNKNOWN_ARTIST;
use core_catalog::{CatalogClient, CatalogError, Track};
use core_playback::{spawn_completion_pump, PlayerController, PlayerError, PlayerStatus};
use core_runtime::config::{CatalogConfig, SharedConfig};
use core_runtime::events::{CoreEvent, EventBus, PlaybackEvent, QueueEvent};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, oneshot};

// ============================================================================
// Fake audio engine
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
enum EngineCommand {
    Load(EngineSource),
    Play,
    Pause,
    Resume,
    Stop,
}

struct FakeEngine {
    commands: Mutex<Vec<EngineCommand>>,
    fail_next_load: AtomicBool,
    notifications: broadcast::Sender<EngineNotification>,
}

impl FakeEngine {
    fn new() -> Arc<Self> {
        let (notifications, _) = broadcast::channel(16);
        Arc::new(Self {
            commands: Mutex::new(Vec::new()),
            fail_next_load: AtomicBool::new(false),
            notifications,
        })
    }

    fn commands(&self) -> Vec<EngineCommand> {
        self.commands.lock().clone()
    }

    fn loads(&self) -> Vec<EngineSource> {
        self.commands()
            .into_iter()
            .filter_map(|c| match c {
                EngineCommand::Load(source) => Some(source),
                _ => None,
            })
            .collect()
    }

    fn fail_next_load(&self) {
        self.fail_next_load.store(true, Ordering::SeqCst);
    }

    fn complete_current(&self) {
        self.notifications
            .send(EngineNotification::PlaybackCompleted)
            .ok();
    }
}

#[async_trait]
impl AudioEngine for FakeEngine {
    async fn load(&self, source: EngineSource) -> BridgeResult<()> {
        if self.fail_next_load.swap(false, Ordering::SeqCst) {
            return Err(BridgeError::EngineRejected("bad container".into()));
        }
        self.commands.lock().push(EngineCommand::Load(source));
        Ok(())
    }

    async fn play(&self) -> BridgeResult<()> {
        self.commands.lock().push(EngineCommand::Play);
        Ok(())
    }

    async fn pause(&self) -> BridgeResult<()> {
        self.commands.lock().push(EngineCommand::Pause);
        Ok(())
    }

    async fn resume(&self) -> BridgeResult<()> {
        self.commands.lock().push(EngineCommand::Resume);
        Ok(())
    }

    async fn stop(&self) -> BridgeResult<()> {
        self.commands.lock().push(EngineCommand::Stop);
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<EngineNotification> {
        self.notifications.subscribe()
    }
}

// ============================================================================
// Fake HTTP client (scripted responses, optional gate per response)
// ============================================================================

struct Scripted {
    response: BridgeResult<HttpResponse>,
    gate: Option<oneshot::Receiver<()>>,
}

struct FakeHttp {
    script: Mutex<VecDeque<Scripted>>,
    requested: Mutex<Vec<String>>,
}

impl FakeHttp {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(VecDeque::new()),
            requested: Mutex::new(Vec::new()),
        })
    }

    fn push_resolved(&self, url: &str) {
        self.push_json(200, &format!(r#"{{"OriginalTrackUrl":"{}"}}"#, url));
    }

    fn push_json(&self, status: u16, body: &str) {
        self.script.lock().push_back(Scripted {
            response: Ok(HttpResponse {
                status,
                body: body.as_bytes().to_vec().into(),
            }),
            gate: None,
        });
    }

    /// Queue a response that is held back until the returned sender fires.
    fn push_gated_resolved(&self, url: &str) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.script.lock().push_back(Scripted {
            response: Ok(HttpResponse {
                status: 200,
                body: format!(r#"{{"OriginalTrackUrl":"{}"}}"#, url)
                    .into_bytes()
                    .into(),
            }),
            gate: Some(rx),
        });
        tx
    }

    fn requested(&self) -> Vec<String> {
        self.requested.lock().clone()
    }
}

#[async_trait]
impl HttpClient for FakeHttp {
    async fn execute(&self, request: HttpRequest) -> BridgeResult<HttpResponse> {
        self.requested.lock().push(request.url.clone());
        let scripted = self
            .script
            .lock()
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected request: {}", request.url));
        if let Some(gate) = scripted.gate {
            gate.await.ok();
        }
        scripted.response
    }
}

// ============================================================================
// Fake file selector
// ============================================================================

struct FakeSelector {
    pick: Option<PathBuf>,
}

#[async_trait]
impl FileSelector for FakeSelector {
    async fn pick_audio_file(&self) -> BridgeResult<Option<PathBuf>> {
        Ok(self.pick.clone())
    }
}

// ============================================================================
// Harness
// ============================================================================

struct Harness {
    engine: Arc<FakeEngine>,
    http: Arc<FakeHttp>,
    controller: Arc<PlayerController>,
    bus: EventBus,
}

fn harness() -> Harness {
    let engine = FakeEngine::new();
    let http = FakeHttp::new();
    let config = SharedConfig::new(
        CatalogConfig::builder()
            .base_url("https://catalog.test/v1")
            .build()
            .unwrap(),
    );
    let bus = EventBus::default();
    let catalog = CatalogClient::new(http.clone(), config.clone(), bus.clone());
    let controller = Arc::new(PlayerController::new(
        engine.clone(),
        catalog,
        config,
        bus.clone(),
    ));
    Harness {
        engine,
        http,
        controller,
        bus,
    }
}

fn track(id: &str) -> Track {
    Track {
        id: id.to_string(),
        title: format!("Title {}", id),
        artist_name: UNKNOWN_ARTIST.to_string(),
        album_title: None,
        cover_id: None,
        duration_seconds: None,
        audio_quality: None,
    }
}

fn remote(url: &str) -> EngineSource {
    EngineSource::RemoteStream { url: url.into() }
}

fn drain(receiver: &mut broadcast::Receiver<CoreEvent>) -> Vec<CoreEvent> {
    let mut events = Vec::new();
    while let Ok(event) = receiver.try_recv() {
        events.push(event);
    }
    events
}

// ============================================================================
// Play pipeline
// ============================================================================

#[tokio::test]
async fn play_resolves_loads_and_starts() {
    let h = harness();
    let mut events = h.bus.subscribe();
    h.http.push_resolved("https://cdn.test/s/7");

    h.controller.play(track("7")).await.unwrap();

    assert_eq!(
        h.engine.commands(),
        vec![
            EngineCommand::Load(remote("https://cdn.test/s/7")),
            EngineCommand::Play,
        ]
    );
    assert_eq!(h.controller.status(), PlayerStatus::Playing);
    assert_eq!(h.controller.now_playing().unwrap().id, "7");
    assert_eq!(
        h.http.requested(),
        vec!["https://catalog.test/v1/song/?id=7&quality=LOSSLESS".to_string()]
    );

    let events = drain(&mut events);
    assert!(events.contains(&CoreEvent::Playback(PlaybackEvent::Started {
        track_id: "7".to_string(),
        title: "Title 7".to_string(),
    })));
}

#[tokio::test]
async fn new_play_stops_the_prior_session_first() {
    let h = harness();
    h.http.push_resolved("https://cdn.test/s/1");
    h.http.push_resolved("https://cdn.test/s/2");

    h.controller.play(track("1")).await.unwrap();
    h.controller.play(track("2")).await.unwrap();

    assert_eq!(
        h.engine.commands(),
        vec![
            EngineCommand::Load(remote("https://cdn.test/s/1")),
            EngineCommand::Play,
            EngineCommand::Stop,
            EngineCommand::Load(remote("https://cdn.test/s/2")),
            EngineCommand::Play,
        ]
    );
    assert_eq!(h.controller.now_playing().unwrap().id, "2");
}

#[tokio::test]
async fn resolve_missing_url_leaves_controller_idle_without_engine_call() {
    let h = harness();
    h.http.push_json(200, r#"{"SomethingElse":true}"#);

    let result = h.controller.play(track("7")).await;

    assert!(matches!(
        result,
        Err(PlayerError::Resolve(CatalogError::ResolveMissingUrl { .. }))
    ));
    assert!(h.engine.commands().is_empty());
    assert_eq!(h.controller.status(), PlayerStatus::Idle);
}

#[tokio::test]
async fn blank_track_id_is_no_source_without_any_io() {
    let h = harness();

    let result = h.controller.play(track("   ")).await;

    assert!(matches!(result, Err(PlayerError::NoSourceAvailable)));
    assert!(h.engine.commands().is_empty());
    assert!(h.http.requested().is_empty());
    assert_eq!(h.controller.status(), PlayerStatus::Idle);
}

#[tokio::test]
async fn engine_load_rejection_returns_to_idle() {
    let h = harness();
    let mut events = h.bus.subscribe();
    h.engine.fail_next_load();

    let result = h.controller.play_local(PathBuf::from("/music/a.flac")).await;

    assert!(matches!(result, Err(PlayerError::PlaybackFailed(_))));
    assert_eq!(h.controller.status(), PlayerStatus::Idle);
    assert!(h
        .engine
        .commands()
        .iter()
        .all(|c| !matches!(c, EngineCommand::Play)));

    let events = drain(&mut events);
    assert!(events
        .iter()
        .any(|e| matches!(e, CoreEvent::Playback(PlaybackEvent::Error { .. }))));
}

// ============================================================================
// Queue advance on completion
// ============================================================================

#[tokio::test]
async fn completion_advances_into_the_queue() {
    let h = harness();
    let mut events = h.bus.subscribe();

    h.controller
        .play_local(PathBuf::from("/music/a.flac"))
        .await
        .unwrap();
    h.controller.enqueue(track("C"));
    h.controller.enqueue(track("D"));
    h.http.push_resolved("https://cdn.test/s/C");

    h.controller.on_playback_completed().await.unwrap();

    assert_eq!(h.controller.now_playing().unwrap().id, "C");
    assert_eq!(h.controller.status(), PlayerStatus::Playing);
    let pending = h.controller.queue().peek_all();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].id, "D");

    let events = drain(&mut events);
    assert!(events.contains(&CoreEvent::Queue(QueueEvent::Advanced {
        next_track_id: "C".to_string(),
        remaining: 1,
    })));
}

#[tokio::test]
async fn completion_with_empty_queue_stops_and_clears_metadata() {
    let h = harness();
    let mut events = h.bus.subscribe();

    h.controller
        .play_local(PathBuf::from("/music/a.flac"))
        .await
        .unwrap();
    h.controller.on_playback_completed().await.unwrap();

    assert_eq!(h.controller.status(), PlayerStatus::Stopped);
    assert!(h.controller.now_playing().is_none());
    assert_eq!(h.engine.commands().last(), Some(&EngineCommand::Stop));

    let events = drain(&mut events);
    assert!(events.contains(&CoreEvent::Queue(QueueEvent::Drained)));
    assert!(events.contains(&CoreEvent::Playback(PlaybackEvent::Stopped)));
}

// ============================================================================
// Last-request-wins
// ============================================================================

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn second_play_while_first_is_loading_wins() {
    let h = harness();
    let gate = h.http.push_gated_resolved("https://cdn.test/s/slow");

    let slow = {
        let controller = h.controller.clone();
        tokio::spawn(async move { controller.play(track("slow")).await })
    };
    // Let the first request reach its resolve call and block on the gate.
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert_eq!(h.controller.status(), PlayerStatus::Loading);

    h.controller
        .play_local(PathBuf::from("/music/fast.flac"))
        .await
        .unwrap();

    gate.send(()).ok();
    slow.await.unwrap().unwrap();

    // The superseded request never touched the engine; only one source was
    // ever loaded.
    assert_eq!(
        h.engine.loads(),
        vec![EngineSource::LocalFile {
            path: PathBuf::from("/music/fast.flac")
        }]
    );
    assert_eq!(h.controller.status(), PlayerStatus::Playing);
    assert_eq!(h.controller.now_playing().unwrap().id, "/music/fast.flac");
}

// ============================================================================
// Pause / resume / stop
// ============================================================================

#[tokio::test]
async fn pause_resume_cycle() {
    let h = harness();
    h.controller
        .play_local(PathBuf::from("/music/a.flac"))
        .await
        .unwrap();

    h.controller.pause().await.unwrap();
    assert_eq!(h.controller.status(), PlayerStatus::Paused);

    // Pausing again is a no-op.
    let before = h.engine.commands().len();
    h.controller.pause().await.unwrap();
    assert_eq!(h.engine.commands().len(), before);

    h.controller.resume().await.unwrap();
    assert_eq!(h.controller.status(), PlayerStatus::Playing);
}

#[tokio::test]
async fn resume_when_not_paused_is_a_no_op() {
    let h = harness();
    h.controller.resume().await.unwrap();
    assert!(h.engine.commands().is_empty());
    assert_eq!(h.controller.status(), PlayerStatus::Idle);
}

#[tokio::test]
async fn stop_releases_source_and_keeps_queue() {
    let h = harness();
    h.controller
        .play_local(PathBuf::from("/music/a.flac"))
        .await
        .unwrap();
    h.controller.enqueue(track("C"));

    h.controller.stop().await.unwrap();

    assert_eq!(h.controller.status(), PlayerStatus::Stopped);
    assert!(h.controller.now_playing().is_none());
    assert_eq!(h.engine.commands().last(), Some(&EngineCommand::Stop));
    assert_eq!(h.controller.queue().len(), 1);
}

#[tokio::test]
async fn stop_when_idle_is_a_no_op() {
    let h = harness();
    h.controller.stop().await.unwrap();
    assert!(h.engine.commands().is_empty());
    assert_eq!(h.controller.status(), PlayerStatus::Idle);
}

// ============================================================================
// Local files and file selection
// ============================================================================

#[tokio::test]
async fn play_local_synthesizes_display_metadata() {
    let h = harness();
    h.controller
        .play_local(PathBuf::from("/music/Consequence.flac"))
        .await
        .unwrap();

    let playing = h.controller.now_playing().unwrap();
    assert_eq!(playing.title, "Consequence");
    assert_eq!(playing.artist_name, "Local File");
    assert!(h.http.requested().is_empty());
}

#[tokio::test]
async fn play_local_with_empty_path_is_no_source() {
    let h = harness();
    let result = h.controller.play_local(PathBuf::new()).await;
    assert!(matches!(result, Err(PlayerError::NoSourceAvailable)));
    assert!(h.engine.commands().is_empty());
}

#[tokio::test]
async fn cancelled_file_selection_is_a_no_op() {
    let h = harness();
    let selector = FakeSelector { pick: None };

    let started = h.controller.play_selected(&selector).await.unwrap();

    assert!(!started);
    assert!(h.engine.commands().is_empty());
    assert_eq!(h.controller.status(), PlayerStatus::Idle);
}

#[tokio::test]
async fn selected_file_plays_through_the_same_pipeline() {
    let h = harness();
    let selector = FakeSelector {
        pick: Some(PathBuf::from("/music/picked.flac")),
    };

    let started = h.controller.play_selected(&selector).await.unwrap();

    assert!(started);
    assert_eq!(h.controller.status(), PlayerStatus::Playing);
    assert_eq!(h.controller.now_playing().unwrap().title, "picked");
}

// ============================================================================
// Playlist
// ============================================================================

#[tokio::test]
async fn play_from_playlist_bypasses_the_queue() {
    let h = harness();
    h.controller.playlist().append(track("P1"));
    h.controller.playlist().append(track("P2"));
    h.controller.enqueue(track("Q1"));
    h.http.push_resolved("https://cdn.test/s/P2");

    h.controller.play_from_playlist(1).await.unwrap();

    assert_eq!(h.controller.now_playing().unwrap().id, "P2");
    // The queue is untouched by a play-now request.
    assert_eq!(h.controller.queue().len(), 1);
}

#[tokio::test]
async fn play_from_playlist_out_of_range_is_no_source() {
    let h = harness();
    let result = h.controller.play_from_playlist(3).await;
    assert!(matches!(result, Err(PlayerError::NoSourceAvailable)));
}

// ============================================================================
// Completion pump
// ============================================================================

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn completion_pump_drives_the_queue_advance() {
    let h = harness();
    let pump = spawn_completion_pump(h.controller.clone());

    h.controller
        .play_local(PathBuf::from("/music/a.flac"))
        .await
        .unwrap();
    h.engine.complete_current();

    // Give the pump a moment to deliver the notification.
    tokio::time::sleep(Duration::from_millis(50)).await;

    assert_eq!(h.controller.status(), PlayerStatus::Stopped);
    assert!(h.controller.now_playing().is_none());

    pump.abort();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn completion_pump_surfaces_engine_faults() {
    let h = harness();
    let mut events = h.bus.subscribe();
    let pump = spawn_completion_pump(h.controller.clone());

    h.controller
        .play_local(PathBuf::from("/music/a.flac"))
        .await
        .unwrap();
    h.engine
        .notifications
        .send(EngineNotification::PlaybackFaulted {
            message: "device lost".to_string(),
        })
        .ok();

    tokio::time::sleep(Duration::from_millis(50)).await;

    assert_eq!(h.controller.status(), PlayerStatus::Stopped);
    let events = drain(&mut events);
    assert!(events
        .iter()
        .any(|e| matches!(e, CoreEvent::Playback(PlaybackEvent::Error { .. }))));

    pump.abort();
}
