//! # Host Bridge Traits
//!
//! Platform abstraction traits that must be implemented by each host platform.
//!
//! ## Overview
//!
//! This crate defines the contract between the client core and the
//! platform-specific machinery that actually moves bytes and produces sound.
//! The core issues catalog lookups, commands playback, and asks the user for
//! files exclusively through these traits; it never links a concrete HTTP
//! stack or audio engine itself.
//!
//! ## Traits
//!
//! - [`HttpClient`](http::HttpClient) - Async HTTP GET against the catalog backend
//! - [`AudioEngine`](audio::AudioEngine) - Load/play/pause/resume/stop plus a
//!   completion notification stream
//! - [`FileSelector`](files::FileSelector) - Native file picking, with user
//!   cancellation as a non-error outcome
//!
//! ## Fail-Fast Strategy
//!
//! The core fails fast with descriptive errors when a required bridge is
//! missing or misbehaves; it never falls back to a built-in implementation.

pub mod audio;
pub mod error;
pub mod files;
pub mod http;

pub use audio::{AudioEngine, EngineNotification, EngineSource};
pub use error::{BridgeError, Result};
pub use files::FileSelector;
pub use http::{HttpClient, HttpRequest, HttpResponse};
