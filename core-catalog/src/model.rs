//! # Catalog Data Model
//!
//! Wire DTOs for the search response plus the [`Track`] record handed to the
//! rest of the core. Malformed catalog entries never panic the mapping:
//! missing display fields fall back to placeholders, and entries without an
//! `id` are dropped because nothing downstream can resolve them.

use core_runtime::config::AudioQuality;
use serde::Deserialize;
use tracing::warn;

/// Placeholder title for entries the backend shipped without one.
pub const UNKNOWN_TITLE: &str = "Unknown Title";

/// Placeholder artist for entries missing the nested artist object.
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";

/// One catalog entry, normalized for display and resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    /// Opaque identifier, required to resolve a stream URL. Numeric wire ids
    /// are normalized to their decimal string form.
    pub id: String,
    /// Display title; [`UNKNOWN_TITLE`] when absent.
    pub title: String,
    /// Display artist, derived from the nested artist object;
    /// [`UNKNOWN_ARTIST`] when that object is absent.
    pub artist_name: String,
    /// Album title, when present.
    pub album_title: Option<String>,
    /// Cover artwork identifier, when present.
    pub cover_id: Option<String>,
    /// Track duration in seconds, when present.
    pub duration_seconds: Option<u32>,
    /// Encoded quality hint passed through to the resolve call.
    pub audio_quality: Option<AudioQuality>,
}

impl Track {
    /// The quality to request for this track, falling back to `default`
    /// when the catalog entry carried no hint.
    pub fn quality_or(&self, default: AudioQuality) -> AudioQuality {
        self.audio_quality.unwrap_or(default)
    }
}

// ============================================================================
// Wire DTOs
// ============================================================================

/// Search response envelope: `{ "items": [...] }`.
#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    #[serde(default)]
    pub items: Vec<RawTrack>,
}

/// Track ids arrive as either JSON numbers or strings depending on the
/// backend deployment.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum RawId {
    Int(i64),
    Str(String),
}

impl RawId {
    fn normalize(self) -> String {
        match self {
            RawId::Int(n) => n.to_string(),
            RawId::Str(s) => s,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawArtist {
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawAlbum {
    pub title: Option<String>,
    pub cover: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawTrack {
    pub id: Option<RawId>,
    pub title: Option<String>,
    pub artist: Option<RawArtist>,
    pub album: Option<RawAlbum>,
    pub duration: Option<u32>,
    #[serde(rename = "audioQuality")]
    pub audio_quality: Option<String>,
}

impl RawTrack {
    /// Map a wire entry to a [`Track`], or `None` when the entry has no id.
    pub(crate) fn into_track(self) -> Option<Track> {
        let Some(id) = self.id else {
            warn!("dropping catalog entry without id");
            return None;
        };

        let (album_title, cover_id) = match self.album {
            Some(album) => (album.title, album.cover),
            None => (None, None),
        };

        Some(Track {
            id: id.normalize(),
            title: self
                .title
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(|| UNKNOWN_TITLE.to_string()),
            artist_name: self
                .artist
                .and_then(|a| a.name)
                .filter(|n| !n.trim().is_empty())
                .unwrap_or_else(|| UNKNOWN_ARTIST.to_string()),
            album_title,
            cover_id,
            duration_seconds: self.duration,
            audio_quality: self.audio_quality.as_deref().and_then(parse_quality),
        })
    }
}

/// Parse the backend's quality string; unknown values are treated as absent
/// so the configured default applies.
fn parse_quality(raw: &str) -> Option<AudioQuality> {
    match raw.trim().to_ascii_uppercase().as_str() {
        "LOW" => Some(AudioQuality::Low),
        "HIGH" => Some(AudioQuality::High),
        "LOSSLESS" => Some(AudioQuality::Lossless),
        "HI_RES" | "HIRES" => Some(AudioQuality::HiRes),
        _ => None,
    }
}
