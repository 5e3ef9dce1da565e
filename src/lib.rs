//! Workspace placeholder crate.
//!
//! This crate exists to expose the individual workspace crates behind a single
//! dependency. Host applications can depend on `cadenza-workspace` and enable
//! the `desktop-shims` feature to pull in the desktop bridge implementations
//! without wiring each crate individually.

pub use bridge_traits;
pub use core_catalog;
pub use core_playback;
pub use core_runtime;

#[cfg(feature = "desktop-shims")]
pub use bridge_desktop;
