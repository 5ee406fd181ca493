//! Navigation menu state machine and controller.
//!
//! The menu's open flag is mirrored into four places: the overlay class, the
//! burger glyph class, the body scroll-lock class and `aria-expanded` on the
//! burger. `MenuController::set_menu` is the only writer of all four, so they
//! always agree.

use crate::bindings::{MenuBindings, PageBindings};
use crate::config::ClassNames;
use crate::platform::ElementHandle;

/// Open/closed state of the navigation overlay.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MenuState {
    #[default]
    Closed,
    Open,
}

/// Inputs that drive the menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuEvent {
    /// Burger icon clicked: toggles.
    BurgerClick,
    /// A navigation link was followed.
    NavLinkClick,
    /// Escape pressed anywhere.
    Escape,
    /// The page scrolled.
    Scroll,
}

impl MenuState {
    pub fn is_open(self) -> bool {
        self == MenuState::Open
    }

    /// Transition table.
    pub fn next(self, event: MenuEvent) -> Self {
        match (self, event) {
            (MenuState::Closed, MenuEvent::BurgerClick) => MenuState::Open,
            (MenuState::Open, MenuEvent::BurgerClick) => MenuState::Closed,
            (_, MenuEvent::NavLinkClick | MenuEvent::Escape | MenuEvent::Scroll) => {
                MenuState::Closed
            }
        }
    }
}

/// Owns the menu state and applies it to the bound elements.
#[derive(Debug)]
pub struct MenuController<E> {
    bindings: Option<MenuBindings<E>>,
    classes: ClassNames,
    state: MenuState,
}

impl<E: ElementHandle> MenuController<E> {
    /// Create a controller over the page, writing the initial closed ARIA
    /// state on the burger when there is one.
    pub fn from_page(page: &PageBindings<E>, classes: &ClassNames) -> Self {
        if let Some(burger) = &page.burger {
            burger.set_attribute("aria-expanded", "false");
        }
        Self::new(page.menu(), classes)
    }

    pub fn new(bindings: Option<MenuBindings<E>>, classes: &ClassNames) -> Self {
        Self {
            bindings,
            classes: classes.clone(),
            state: MenuState::Closed,
        }
    }

    pub fn state(&self) -> MenuState {
        self.state
    }

    pub fn is_bound(&self) -> bool {
        self.bindings.is_some()
    }

    /// Feed an event through the transition table and apply the result.
    ///
    /// A scroll while closed does not touch the DOM; scroll events arrive at
    /// a high rate and closing an already-closed menu is a no-op anyway.
    pub fn handle(&mut self, event: MenuEvent) -> MenuState {
        if event == MenuEvent::Scroll && !self.state.is_open() {
            return self.state;
        }
        let next = self.state.next(event);
        tracing::trace!(?event, from = ?self.state, to = ?next, "menu transition");
        self.set_menu(next.is_open());
        self.state
    }

    /// Show or hide the overlay. Idempotent; does nothing when the overlay or
    /// burger is missing.
    pub fn set_menu(&mut self, open: bool) {
        let Some(bindings) = &self.bindings else {
            return;
        };
        bindings.overlay.set_class(&self.classes.overlay_open, open);
        bindings.burger.set_class(&self.classes.burger_open, open);
        if let Some(body) = &bindings.body {
            body.set_class(&self.classes.body_menu_open, open);
        }
        bindings
            .burger
            .set_attribute("aria-expanded", if open { "true" } else { "false" });
        self.state = if open { MenuState::Open } else { MenuState::Closed };
    }
}
