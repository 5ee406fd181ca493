//! Page session: every controller for one page, started once.
//!
//! `PageSession::start` is the single startup step. It marks the root
//! `js-ready`, resolves the page bindings, builds the controllers and applies
//! the reveal plan. The session then lives for the page lifetime; hosts route
//! their events into it.

use crate::bindings::PageBindings;
use crate::config::EnhanceConfig;
use crate::lightbox::LightboxController;
use crate::menu::{MenuController, MenuEvent};
use crate::platform::{ElementHandle, IntersectionWatcher, is_escape};
use crate::reveal::RevealCoordinator;
use crate::scroll::{ScrollController, ScrollMetrics, ScrollOutcome};

#[derive(Debug)]
pub struct PageSession<E> {
    pub bindings: PageBindings<E>,
    pub menu: MenuController<E>,
    pub scroll: ScrollController<E>,
    pub lightbox: LightboxController<E>,
    pub reveal: RevealCoordinator<E>,
}

impl<E: ElementHandle> PageSession<E> {
    pub fn start<W: IntersectionWatcher<E>>(root: E, config: &EnhanceConfig, watcher: &W) -> Self {
        root.add_class(&config.classes.js_ready);

        let bindings = PageBindings::resolve(root, &config.selectors);
        let menu = MenuController::from_page(&bindings, &config.classes);
        let scroll = ScrollController::new(bindings.scroll(), config.scroll, &config.classes);
        let lightbox = LightboxController::from_page(&bindings, &config.classes);

        let mut reveal = RevealCoordinator::new(&config.classes.visible);
        reveal.apply_plan(&bindings.root, &config.reveal, watcher);

        tracing::info!(
            menu = menu.is_bound(),
            lightbox = lightbox.is_bound(),
            reveal_targets = reveal.len(),
            "page enhancements started"
        );

        Self {
            bindings,
            menu,
            scroll,
            lightbox,
            reveal,
        }
    }

    /// Scroll update, then close the menu if it was left open.
    pub fn on_scroll(&mut self, metrics: ScrollMetrics) -> ScrollOutcome {
        let outcome = self.scroll.on_scroll(metrics);
        self.menu.handle(MenuEvent::Scroll);
        outcome
    }

    /// Escape closes both the menu and the lightbox. Other keys are ignored.
    pub fn on_keydown(&mut self, key: &str) -> bool {
        if !is_escape(key) {
            return false;
        }
        self.menu.handle(MenuEvent::Escape);
        self.lightbox.close();
        true
    }
}
