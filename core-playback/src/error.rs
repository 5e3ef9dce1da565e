//! # Player Error Types

use core_catalog::CatalogError;
use thiserror::Error;

/// Errors surfaced by the player controller.
///
/// Every failure leaves the controller in a stable `Idle`/`Stopped` state;
/// none are fatal and none trigger automatic retry.
#[derive(Error, Debug)]
pub enum PlayerError {
    /// A play request arrived with neither a local path nor a resolvable
    /// remote track. No engine or catalog call was made.
    #[error("No playable source available for this request")]
    NoSourceAvailable,

    /// The engine rejected the source, or a control command failed.
    #[error("Playback failed: {0}")]
    PlaybackFailed(String),

    /// Stream resolution against the catalog failed.
    #[error(transparent)]
    Resolve(#[from] CatalogError),

    /// The host-side file selection bridge failed (distinct from the user
    /// cancelling, which is not an error).
    #[error("File selection failed: {0}")]
    FileSelection(String),
}

pub type Result<T> = std::result::Result<T, PlayerError>;
