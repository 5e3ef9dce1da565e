//! # Core Configuration Module
//!
//! Configuration for the streaming client core.
//!
//! ## Overview
//!
//! [`CatalogConfig`] holds the catalog endpoint and playback quality
//! settings. It is constructed through a builder with fail-fast validation,
//! then wrapped in a [`SharedConfig`] handle so the view layer can edit the
//! base URL at runtime while in-flight operations keep reading a consistent
//! snapshot.
//!
//! There is no environment-variable or file-based configuration: the base
//! URL is a runtime-editable string with a default value.
//!
//! ## Usage
//!
//! ```
//! use core_runtime::config::{CatalogConfig, SharedConfig};
//!
//! let config = CatalogConfig::builder()
//!     .base_url("https://catalog.example.com/v1")
//!     .build()
//!     .expect("valid config");
//!
//! let shared = SharedConfig::new(config);
//! shared.set_base_url("https://mirror.example.com/v1");
//! assert_eq!(shared.base_url(), "https://mirror.example.com/v1");
//! ```

use crate::error::{Error, Result};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// Default catalog endpoint baked into fresh installs.
pub const DEFAULT_BASE_URL: &str = "https://api.vleer.app/v1";

/// Default HTTP timeout for catalog requests.
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Requested audio quality tier, passed through to the resolve call.
///
/// The wire encoding matches the backend's `quality=` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AudioQuality {
    Low,
    High,
    Lossless,
    HiRes,
}

impl AudioQuality {
    /// Wire encoding for the `quality=` query parameter.
    pub fn as_param(self) -> &'static str {
        match self {
            AudioQuality::Low => "LOW",
            AudioQuality::High => "HIGH",
            AudioQuality::Lossless => "LOSSLESS",
            AudioQuality::HiRes => "HI_RES",
        }
    }
}

impl Default for AudioQuality {
    fn default() -> Self {
        AudioQuality::Lossless
    }
}

/// Catalog and playback configuration.
///
/// Use [`CatalogConfig::builder`] to construct instances.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Base URL of the catalog backend, without a trailing slash.
    pub base_url: String,

    /// Quality tier requested when a track carries no quality hint.
    pub default_quality: AudioQuality,

    /// Timeout applied to each catalog request.
    pub http_timeout: Duration,
}

impl CatalogConfig {
    /// Start building a configuration.
    pub fn builder() -> CatalogConfigBuilder {
        CatalogConfigBuilder::default()
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            default_quality: AudioQuality::default(),
            http_timeout: DEFAULT_HTTP_TIMEOUT,
        }
    }
}

/// Builder for [`CatalogConfig`] with fail-fast validation.
#[derive(Debug, Default)]
pub struct CatalogConfigBuilder {
    base_url: Option<String>,
    default_quality: Option<AudioQuality>,
    http_timeout: Option<Duration>,
}

impl CatalogConfigBuilder {
    /// Set the catalog base URL. A trailing slash is stripped.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the default quality tier.
    pub fn default_quality(mut self, quality: AudioQuality) -> Self {
        self.default_quality = Some(quality);
        self
    }

    /// Set the per-request HTTP timeout.
    pub fn http_timeout(mut self, timeout: Duration) -> Self {
        self.http_timeout = Some(timeout);
        self
    }

    /// Validate and build the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when the base URL is empty or is not an
    /// http(s) URL.
    pub fn build(self) -> Result<CatalogConfig> {
        let base_url = self
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let base_url = normalize_base_url(&base_url)?;

        Ok(CatalogConfig {
            base_url,
            default_quality: self.default_quality.unwrap_or_default(),
            http_timeout: self.http_timeout.unwrap_or(DEFAULT_HTTP_TIMEOUT),
        })
    }
}

fn normalize_base_url(url: &str) -> Result<String> {
    let trimmed = url.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(Error::Config("catalog base URL must not be empty".into()));
    }
    if !trimmed.starts_with("http://") && !trimmed.starts_with("https://") {
        return Err(Error::Config(format!(
            "catalog base URL must be http(s), got: {}",
            trimmed
        )));
    }
    Ok(trimmed.to_string())
}

/// Cloneable, thread-safe handle to the live configuration.
///
/// The view layer edits the base URL through this handle; readers take a
/// consistent snapshot per operation, so a request that is already in flight
/// is unaffected by a concurrent edit.
#[derive(Clone)]
pub struct SharedConfig {
    inner: Arc<RwLock<CatalogConfig>>,
}

impl SharedConfig {
    /// Wrap a validated configuration.
    pub fn new(config: CatalogConfig) -> Self {
        Self {
            inner: Arc::new(RwLock::new(config)),
        }
    }

    /// Current base URL.
    pub fn base_url(&self) -> String {
        self.inner.read().base_url.clone()
    }

    /// Replace the base URL at runtime. Invalid URLs are rejected and the
    /// previous value stays in effect.
    pub fn set_base_url(&self, url: impl AsRef<str>) -> Result<()> {
        let normalized = normalize_base_url(url.as_ref())?;
        self.inner.write().base_url = normalized;
        Ok(())
    }

    /// Quality tier used when a track carries no hint.
    pub fn default_quality(&self) -> AudioQuality {
        self.inner.read().default_quality
    }

    /// Per-request HTTP timeout.
    pub fn http_timeout(&self) -> Duration {
        self.inner.read().http_timeout
    }

    /// Consistent snapshot of the full configuration.
    pub fn snapshot(&self) -> CatalogConfig {
        self.inner.read().clone()
    }
}

impl Default for SharedConfig {
    fn default() -> Self {
        Self::new(CatalogConfig::default())
    }
}
