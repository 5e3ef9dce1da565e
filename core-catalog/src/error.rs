//! # Catalog Error Types

use thiserror::Error;

/// Errors produced by catalog lookups.
///
/// Search and resolve failures are kept apart, and within each the
/// HTTP-status case is distinguished from the transport case, because the
/// view layer words its notifications differently for the two.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The search endpoint answered with a non-2xx status.
    #[error("Search failed: catalog returned HTTP {status}")]
    SearchFailed { status: u16 },

    /// The search request never completed (DNS, connect, TLS, timeout).
    #[error("Search failed: {0}")]
    SearchNetwork(String),

    /// The resolve endpoint answered with a non-2xx status.
    #[error("Resolve failed: catalog returned HTTP {status}")]
    ResolveFailed { status: u16 },

    /// The resolve request never completed.
    #[error("Resolve failed: {0}")]
    ResolveNetwork(String),

    /// The resolve response parsed but carried no usable stream URL.
    #[error("Resolve response carried no stream URL for track {track_id}")]
    ResolveMissingUrl { track_id: String },

    /// A response body could not be parsed at all.
    #[error("Malformed catalog response: {0}")]
    MalformedResponse(String),
}

pub type Result<T> = std::result::Result<T, CatalogError>;
