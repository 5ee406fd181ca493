//! folio-core: framework-agnostic logic for the folio page enhancements.
//!
//! This crate provides:
//! - `ElementHandle` / `IntersectionWatcher` traits for the host DOM abstraction
//! - `PageBindings` - the page elements resolved once at startup
//! - Explicit state machines for the menu and lightbox controllers
//! - Scroll math (sticky header, active section, footer) and its controller
//! - The reveal coordinator and its configurable rule plan
//! - `PageSession`, the one-time startup step that ties them together
//!
//! Nothing here touches a browser API; `folio-browser` supplies the web-sys
//! implementations of the platform traits.

pub mod bindings;
pub mod config;
pub mod error;
pub mod lightbox;
pub mod menu;
pub mod platform;
pub mod reveal;
pub mod scroll;
pub mod session;

#[cfg(test)]
mod testing;

pub use bindings::{LightboxBindings, MenuBindings, PageBindings, ScrollBindings};
pub use config::{ClassNames, EnhanceConfig, ObserverSettings, ScrollSettings, Selectors};
pub use error::{FolioError, Result};
pub use lightbox::{
    GalleryHit, LightboxController, LightboxEvent, LightboxState, resolve_gallery_click,
};
pub use menu::{MenuController, MenuEvent, MenuState};
pub use platform::{ESCAPE_KEY, ElementHandle, IntersectionWatcher, LayoutBox, is_escape};
pub use reveal::{
    Alternate, AlternateBy, DEFAULT_STAGGER_MS, RevealCoordinator, RevealPlan, RevealRule,
    STAGGER_ATTRIBUTE, format_delay, parse_stagger, stagger_delays,
};
pub use scroll::{
    ScrollController, ScrollMetrics, ScrollOutcome, current_sections, is_at_bottom, is_sticky,
    section_is_current,
};
pub use session::PageSession;
pub use smol_str::SmolStr;
