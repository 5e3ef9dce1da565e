//! Native file selection bridge.

use crate::error::Result;
use async_trait::async_trait;
use std::path::PathBuf;

/// Trait for host-provided file picking.
///
/// The request blocks the initiating flow until the user chooses a file or
/// dismisses the dialog. Cancellation is an ordinary outcome (`Ok(None)`),
/// never an error.
#[async_trait]
pub trait FileSelector: Send + Sync {
    /// Ask the user to pick an audio file from the device.
    async fn pick_audio_file(&self) -> Result<Option<PathBuf>>;
}
