//! Browser DOM layer for the folio page enhancements.
//!
//! This crate implements the `folio-core` platform traits over web-sys and
//! routes browser events into a `PageSession`. It assumes a
//! `wasm32-unknown-unknown` target environment.
//!
//! # Architecture
//!
//! - `dom`: `DomElement`, the `ElementHandle` implementation
//! - `watcher`: `ViewportWatcher`, the `IntersectionObserver`-backed watcher
//! - `events`: listener wiring for clicks, scroll and keydown
//! - `metrics`: scroll position and document extents
//!
//! # Re-exports
//!
//! This crate re-exports `folio-core` for convenience, so consumers only
//! need to depend on `folio-browser`.

// Re-export core crate
pub use folio_core;
pub use folio_core::*;

pub mod dom;
pub mod events;
pub mod metrics;
pub mod watcher;

pub use dom::DomElement;
pub use events::{Enhancements, enhance};
pub use metrics::read_metrics;
pub use watcher::ViewportWatcher;

use wasm_bindgen::JsValue;

/// Wrap a thrown JS value with the call that threw it.
pub(crate) fn js_error(context: &str, err: JsValue) -> FolioError {
    let detail = err
        .as_string()
        .or_else(|| {
            js_sys::Reflect::get(&err, &JsValue::from_str("message"))
                .ok()
                .and_then(|m| m.as_string())
        })
        .unwrap_or_else(|| format!("{err:?}"));
    FolioError::Browser(format!("{context}: {detail}"))
}
