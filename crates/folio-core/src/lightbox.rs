//! Image lightbox state machine and controller.
//!
//! Gallery clicks open the lightbox with the full-size image behind the
//! clicked tile; backdrop clicks, clicks on the shown image and Escape close
//! it. Closing always clears the image and caption so the next open never
//! flashes the previous picture.

use crate::bindings::{LightboxBindings, PageBindings};
use crate::config::ClassNames;
use crate::platform::ElementHandle;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum LightboxState {
    #[default]
    Closed,
    Open {
        source: String,
        caption: String,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LightboxEvent {
    /// Show an image, replacing whatever is shown.
    Show { source: String, caption: String },
    /// Backdrop click, image click or Escape.
    Dismiss,
}

impl LightboxState {
    pub fn is_open(&self) -> bool {
        matches!(self, LightboxState::Open { .. })
    }

    /// Transition table. Every event fully determines the next state.
    pub fn next(self, event: LightboxEvent) -> Self {
        match event {
            LightboxEvent::Show { source, caption } => LightboxState::Open { source, caption },
            LightboxEvent::Dismiss => LightboxState::Closed,
        }
    }
}

/// A gallery click that should open the lightbox.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GalleryHit {
    /// The enclosing link's href: the full-resolution image.
    pub source: String,
    /// The image's alt text, empty when missing.
    pub caption: String,
}

/// Resolve a click inside `gallery` to the image it landed on.
///
/// Returns `None` (not our event, default action untouched) when the click
/// is not on an image inside this gallery, the image has no enclosing link,
/// or the link has no href.
pub fn resolve_gallery_click<E: ElementHandle>(gallery: &E, target: &E) -> Option<GalleryHit> {
    let image = target.closest("img")?;
    if !gallery.contains(&image) {
        return None;
    }
    let link = image.closest("a")?;
    let source = link.attribute("href")?;
    Some(GalleryHit {
        source,
        caption: image.attribute("alt").unwrap_or_default(),
    })
}

#[derive(Debug)]
pub struct LightboxController<E> {
    bindings: Option<LightboxBindings<E>>,
    classes: ClassNames,
    state: LightboxState,
}

impl<E: ElementHandle> LightboxController<E> {
    pub fn from_page(page: &PageBindings<E>, classes: &ClassNames) -> Self {
        Self::new(page.lightbox(), classes)
    }

    pub fn new(bindings: Option<LightboxBindings<E>>, classes: &ClassNames) -> Self {
        Self {
            bindings,
            classes: classes.clone(),
            state: LightboxState::Closed,
        }
    }

    pub fn state(&self) -> &LightboxState {
        &self.state
    }

    pub fn is_bound(&self) -> bool {
        self.bindings.is_some()
    }

    /// The container and shown-image elements, for listener wiring.
    pub fn bindings(&self) -> Option<&LightboxBindings<E>> {
        self.bindings.as_ref()
    }

    pub fn open(&mut self, source: &str, caption: &str) {
        self.handle(LightboxEvent::Show {
            source: source.to_owned(),
            caption: caption.to_owned(),
        });
    }

    pub fn close(&mut self) {
        self.handle(LightboxEvent::Dismiss);
    }

    /// Feed an event through the transition table and write the result.
    pub fn handle(&mut self, event: LightboxEvent) -> &LightboxState {
        let Some(bindings) = &self.bindings else {
            return &self.state;
        };
        let next = std::mem::take(&mut self.state).next(event);

        let (source, caption) = match &next {
            LightboxState::Open { source, caption } => (source.as_str(), caption.as_str()),
            LightboxState::Closed => ("", ""),
        };
        let open = next.is_open();
        bindings.image.set_attribute("src", source);
        bindings.image.set_attribute("alt", caption);
        bindings.caption.set_text(caption);
        bindings.container.set_class(&self.classes.lightbox_open, open);
        if let Some(body) = &bindings.body {
            body.set_class(&self.classes.body_lightbox_open, open);
        }

        tracing::debug!(open, source, "lightbox transition");
        self.state = next;
        &self.state
    }

    /// Handle a click that reached the lightbox container. Closes when it
    /// landed on the container itself or on the backdrop. Returns whether it
    /// closed.
    pub fn handle_container_click(&mut self, target: &E) -> bool {
        let Some(bindings) = &self.bindings else {
            return false;
        };
        let on_backdrop =
            target == &bindings.container || target.has_class(&self.classes.lightbox_backdrop);
        if on_backdrop {
            self.close();
        }
        on_backdrop
    }

    /// Handle a click inside a gallery. Returns true when the click opened
    /// the lightbox, meaning the link's default navigation must be cancelled.
    pub fn handle_gallery_click(&mut self, gallery: &E, target: &E) -> bool {
        if !self.is_bound() {
            return false;
        }
        let Some(hit) = resolve_gallery_click(gallery, target) else {
            return false;
        };
        self.handle(LightboxEvent::Show {
            source: hit.source,
            caption: hit.caption,
        });
        true
    }
}
