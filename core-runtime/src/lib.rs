//! # Core Runtime Module
//!
//! Provides foundational runtime infrastructure for the streaming client core:
//! - Logging and tracing infrastructure
//! - Configuration management (catalog endpoint, quality tier)
//! - Event bus system
//!
//! ## Overview
//!
//! This crate contains the runtime utilities the other modules depend on. It
//! establishes the logging conventions, the shared configuration handle, and
//! the event broadcasting mechanism that view layers subscribe to.

pub mod config;
pub mod error;
pub mod events;
pub mod logging;

pub use config::{AudioQuality, CatalogConfig, SharedConfig};
pub use error::{Error, Result};
pub use events::{CoreEvent, EventBus, PlaybackEvent, QueueEvent, SearchEvent};
