//! # Remote Catalog Client
//!
//! Issues search and stream-resolution lookups against the catalog backend
//! and maps the JSON responses into [`Track`] records.
//!
//! ## Overview
//!
//! The catalog speaks two GET endpoints:
//!
//! - `{base_url}/search/?s={query}` returning `{ "items": [...] }`
//! - `{base_url}/song/?id={id}&quality={q}` returning the resolved,
//!   time-limited stream URL in an `OriginalTrackUrl` field
//!
//! The resolve endpoint's response shape is not fixed across backend
//! deployments (a bare object in one, an array with the payload at index 2
//! in another), so the parser tolerates both. See [`client`] for details.
//!
//! All HTTP goes through the [`HttpClient`](bridge_traits::HttpClient)
//! bridge; this crate never links a transport stack directly.

pub mod client;
pub mod error;
pub mod model;
pub mod results;

pub use client::CatalogClient;
pub use error::{CatalogError, Result};
pub use model::Track;
pub use results::{ResultSet, SearchResults};

// The quality tier is a configuration concern shared with the controller.
pub use core_runtime::config::AudioQuality;
