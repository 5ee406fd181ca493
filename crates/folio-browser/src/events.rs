//! Browser event wiring.
//!
//! `enhance` starts a `PageSession` over the live document and routes DOM
//! events into it:
//!
//! - burger click, nav link clicks → menu
//! - window scroll (passive) → scroll controller, then menu close
//! - window keydown → Escape closes menu and lightbox
//! - gallery clicks, lightbox clicks → lightbox
//! - intersection callbacks → reveal coordinator

use std::cell::{OnceCell, RefCell};
use std::rc::{Rc, Weak};

use folio_core::{
    EnhanceConfig, FolioError, LightboxState, MenuEvent, MenuState, PageSession,
};
use gloo_events::{EventListener, EventListenerOptions};
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, KeyboardEvent};

use crate::dom::DomElement;
use crate::metrics::read_metrics;
use crate::watcher::ViewportWatcher;

type SharedSession = Rc<RefCell<PageSession<DomElement>>>;

/// Running enhancements for one page.
///
/// Dropping this removes every event listener, disconnects the viewport
/// watcher and frees the session. Call `keep_alive` to leave them installed
/// for the page lifetime.
pub struct Enhancements {
    session: SharedSession,
    watcher: ViewportWatcher,
    listeners: Vec<EventListener>,
    kept: bool,
}

impl Enhancements {
    pub fn session(&self) -> &SharedSession {
        &self.session
    }

    pub fn menu_state(&self) -> MenuState {
        self.session.borrow().menu.state()
    }

    pub fn lightbox_state(&self) -> LightboxState {
        self.session.borrow().lightbox.state().clone()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Leak the listeners, watcher and session so they outlive this handle.
    pub fn keep_alive(mut self) {
        for listener in self.listeners.drain(..) {
            listener.forget();
        }
        // The observer callback only holds a weak reference.
        std::mem::forget(Rc::clone(&self.session));
        self.kept = true;
    }
}

impl Drop for Enhancements {
    fn drop(&mut self) {
        if !self.kept {
            self.watcher.disconnect();
        }
    }
}

/// Run `f` on the session unless it is already borrowed by an outer
/// handler further up the same dispatch.
fn with_session<R>(session: &SharedSession, f: impl FnOnce(&mut PageSession<DomElement>) -> R) -> Option<R> {
    match session.try_borrow_mut() {
        Ok(mut session) => Some(f(&mut session)),
        Err(_) => {
            tracing::warn!("re-entrant event dispatch ignored");
            None
        }
    }
}

fn event_target(event: &Event) -> Option<DomElement> {
    event
        .target()
        .and_then(|target| target.dyn_into::<Element>().ok())
        .map(DomElement::from)
}

/// Enhance the current page. Startup step: call once per page load.
pub fn enhance(config: &EnhanceConfig) -> Result<Enhancements, FolioError> {
    config.validate()?;

    let window = web_sys::window().ok_or(FolioError::MissingGlobal("window"))?;
    let root = DomElement::document_root().ok_or(FolioError::MissingGlobal("document element"))?;

    // The observer callback needs the session, and the session needs the
    // watcher to apply the reveal plan. Intersections are delivered
    // asynchronously, so the slot is always filled before the first one.
    // The leaked callback holds the session weakly so dropping
    // `Enhancements` frees it.
    let slot: Rc<OnceCell<Weak<RefCell<PageSession<DomElement>>>>> = Rc::default();
    let watcher = ViewportWatcher::new(&config.observer, {
        let slot = slot.clone();
        move |element, watcher| {
            let Some(session) = slot.get().and_then(Weak::upgrade) else {
                return;
            };
            with_session(&session, |s| s.reveal.on_intersect(&element, watcher));
        }
    })?;

    let session: SharedSession = Rc::new(RefCell::new(PageSession::start(root, config, &watcher)));
    let _ = slot.set(Rc::downgrade(&session));

    let bindings = session.borrow().bindings.clone();
    let menu_bound = session.borrow().menu.is_bound();
    let lightbox = session.borrow().lightbox.bindings().cloned();
    let mut listeners = Vec::new();

    // === Menu ===

    if menu_bound {
        if let Some(burger) = &bindings.burger {
            let session = session.clone();
            listeners.push(EventListener::new(burger.as_element(), "click", move |_| {
                with_session(&session, |s| s.menu.handle(MenuEvent::BurgerClick));
            }));
        }
        for link in &bindings.nav_links {
            let session = session.clone();
            listeners.push(EventListener::new(link.as_element(), "click", move |_| {
                with_session(&session, |s| s.menu.handle(MenuEvent::NavLinkClick));
            }));
        }
    }

    // === Keyboard ===

    {
        let session = session.clone();
        listeners.push(EventListener::new(&window, "keydown", move |event| {
            let Some(key) = event.dyn_ref::<KeyboardEvent>().map(KeyboardEvent::key) else {
                return;
            };
            with_session(&session, |s| s.on_keydown(&key));
        }));
    }

    // === Scroll ===

    // gloo's default options register the listener as passive.
    {
        let session = session.clone();
        let scroll_window = window.clone();
        listeners.push(EventListener::new(&window, "scroll", move |_| {
            let metrics = read_metrics(&scroll_window);
            with_session(&session, |s| s.on_scroll(metrics));
        }));
    }

    // === Lightbox ===

    if let Some(lightbox) = lightbox {
        for gallery in &bindings.galleries {
            let session = session.clone();
            let gallery_el = gallery.clone();
            listeners.push(EventListener::new_with_options(
                gallery.as_element(),
                "click",
                EventListenerOptions::enable_prevent_default(),
                move |event| {
                    let Some(target) = event_target(event) else {
                        return;
                    };
                    let opened = with_session(&session, |s| {
                        s.lightbox.handle_gallery_click(&gallery_el, &target)
                    });
                    if opened == Some(true) {
                        event.prevent_default();
                    }
                },
            ));
        }

        {
            let session = session.clone();
            listeners.push(EventListener::new(
                lightbox.container.as_element(),
                "click",
                move |event| {
                    let Some(target) = event_target(event) else {
                        return;
                    };
                    with_session(&session, |s| s.lightbox.handle_container_click(&target));
                },
            ));
        }

        {
            let session = session.clone();
            listeners.push(EventListener::new(lightbox.image.as_element(), "click", move |_| {
                with_session(&session, |s| s.lightbox.close());
            }));
        }
    }

    tracing::debug!(listeners = listeners.len(), "event listeners installed");

    Ok(Enhancements {
        session,
        watcher,
        listeners,
        kept: false,
    })
}
