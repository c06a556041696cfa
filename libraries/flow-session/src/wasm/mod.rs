//! Browser bindings for flow-session
//!
//! Wires a page's `<audio>` element and `window.localStorage` into a
//! [`PlayerSession`](crate::PlayerSession) and exposes it to JavaScript.

#[cfg(feature = "wasm")]
pub mod media;

#[cfg(feature = "wasm")]
pub mod player;

#[cfg(feature = "wasm")]
pub mod storage;

#[cfg(feature = "wasm")]
pub use media::HtmlMediaResource;

#[cfg(feature = "wasm")]
pub use player::WasmPlayer;

#[cfg(feature = "wasm")]
pub use storage::LocalStorageStore;
