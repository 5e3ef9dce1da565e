//! Resolved playable sources.

use bridge_traits::audio::EngineSource;
use std::path::PathBuf;

/// The concrete playable source for one playback request.
///
/// Exactly one variant is populated per request: a remote track resolves to
/// a time-limited URL, a device file plays from its path. The two are
/// mutually exclusive by construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamTarget {
    /// Time-limited stream URL obtained from the catalog resolve call.
    Remote { url: String },
    /// Local filesystem path from device file selection.
    Local { path: PathBuf },
}

impl StreamTarget {
    pub fn is_remote(&self) -> bool {
        matches!(self, StreamTarget::Remote { .. })
    }

    /// The source handed to the audio engine bridge.
    pub fn to_engine_source(&self) -> EngineSource {
        match self {
            StreamTarget::Remote { url } => EngineSource::RemoteStream { url: url.clone() },
            StreamTarget::Local { path } => EngineSource::LocalFile { path: path.clone() },
        }
    }
}
