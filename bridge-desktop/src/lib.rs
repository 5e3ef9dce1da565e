//! Desktop bridge implementations.
//!
//! Desktop hosts get a ready-made [`HttpClient`](bridge_traits::HttpClient)
//! backed by reqwest. The audio engine and file selector remain host
//! responsibilities: desktop shells wire their own playback stack (or a
//! media framework binding) into the `AudioEngine` trait and surface native
//! file dialogs through `FileSelector`.

pub mod http;

pub use http::ReqwestHttpClient;
