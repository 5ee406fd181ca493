//! Viewport intersection watcher backed by `IntersectionObserver`.
//!
//! The observer callback receives the observer itself, so the handler gets a
//! `ViewportWatcher` for the same observer and can unwatch the target
//! without holding a reference back to its owner.

use folio_core::{FolioError, IntersectionWatcher, ObserverSettings};
use js_sys::Array;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use crate::dom::DomElement;
use crate::js_error;

/// Watches elements for their first entry into the viewport.
#[derive(Clone, Debug)]
pub struct ViewportWatcher {
    observer: IntersectionObserver,
}

impl ViewportWatcher {
    /// Create an observer with the configured threshold and root margin.
    ///
    /// `on_enter` runs for every intersecting entry. The callback closure is
    /// leaked: the observer lives for the page lifetime.
    pub fn new<F>(settings: &ObserverSettings, mut on_enter: F) -> Result<Self, FolioError>
    where
        F: FnMut(DomElement, &ViewportWatcher) + 'static,
    {
        let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
            move |entries: Array, observer: IntersectionObserver| {
                let watcher = ViewportWatcher { observer };
                for entry in entries.iter() {
                    let entry: IntersectionObserverEntry = entry.unchecked_into();
                    if !entry.is_intersecting() {
                        continue;
                    }
                    on_enter(DomElement::from(entry.target()), &watcher);
                }
            },
        );

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(settings.threshold));
        init.set_root_margin(&settings.root_margin);

        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)
                .map_err(|e| js_error("IntersectionObserver", e))?;
        callback.forget();

        tracing::debug!(
            threshold = settings.threshold,
            root_margin = %settings.root_margin,
            "viewport watcher created"
        );
        Ok(Self { observer })
    }

    /// Stop watching everything.
    pub fn disconnect(&self) {
        self.observer.disconnect();
    }
}

impl IntersectionWatcher<DomElement> for ViewportWatcher {
    fn watch(&self, target: &DomElement) {
        self.observer.observe(target.as_element());
    }

    fn unwatch(&self, target: &DomElement) {
        self.observer.unobserve(target.as_element());
    }
}
