//! Page bindings: the elements each controller works on.
//!
//! Selectors are resolved once against the document root at startup. Each
//! controller takes only its own subset; a subset whose required elements
//! are missing resolves to `None` and the controller runs as a no-op.

use crate::config::Selectors;
use crate::platform::ElementHandle;

/// Every element the enhancements bind to, resolved from the document root.
#[derive(Debug, Clone)]
pub struct PageBindings<E> {
    pub root: E,
    pub body: Option<E>,
    pub header: Option<E>,
    pub burger: Option<E>,
    pub overlay: Option<E>,
    pub nav_links: Vec<E>,
    pub sections: Vec<E>,
    pub footer: Option<E>,
    pub lightbox: Option<E>,
    pub lightbox_image: Option<E>,
    pub lightbox_caption: Option<E>,
    pub galleries: Vec<E>,
}

/// Elements the menu controller needs. Overlay and burger are required.
#[derive(Debug, Clone)]
pub struct MenuBindings<E> {
    pub overlay: E,
    pub burger: E,
    pub body: Option<E>,
}

/// Elements the scroll controller reads and writes. All optional.
#[derive(Debug, Clone)]
pub struct ScrollBindings<E> {
    pub header: Option<E>,
    pub nav_links: Vec<E>,
    pub sections: Vec<E>,
    pub footer: Option<E>,
}

/// Elements the lightbox controller needs. Container and both slots are required.
#[derive(Debug, Clone)]
pub struct LightboxBindings<E> {
    pub container: E,
    pub image: E,
    pub caption: E,
    pub body: Option<E>,
}

impl<E: ElementHandle> PageBindings<E> {
    /// Resolve all bindings under `root` (normally the document element).
    pub fn resolve(root: E, selectors: &Selectors) -> Self {
        let lightbox = root.query(&selectors.lightbox);
        let (lightbox_image, lightbox_caption) = match &lightbox {
            Some(container) => (
                container.query(&selectors.lightbox_image),
                container.query(&selectors.lightbox_caption),
            ),
            None => (None, None),
        };

        let bindings = Self {
            body: root.query("body"),
            header: root.query(&selectors.header),
            burger: root.query(&selectors.burger),
            overlay: root.query(&selectors.overlay),
            nav_links: root.query_all(&selectors.nav_links),
            sections: root.query_all(&selectors.sections),
            footer: root.query(&selectors.footer),
            galleries: root.query_all(&selectors.galleries),
            lightbox,
            lightbox_image,
            lightbox_caption,
            root,
        };

        tracing::debug!(
            header = bindings.header.is_some(),
            burger = bindings.burger.is_some(),
            overlay = bindings.overlay.is_some(),
            nav_links = bindings.nav_links.len(),
            sections = bindings.sections.len(),
            footer = bindings.footer.is_some(),
            lightbox = bindings.lightbox.is_some(),
            galleries = bindings.galleries.len(),
            "resolved page bindings"
        );
        bindings
    }

    pub fn menu(&self) -> Option<MenuBindings<E>> {
        let (Some(overlay), Some(burger)) = (&self.overlay, &self.burger) else {
            tracing::debug!("menu overlay or burger missing, menu disabled");
            return None;
        };
        Some(MenuBindings {
            overlay: overlay.clone(),
            burger: burger.clone(),
            body: self.body.clone(),
        })
    }

    pub fn scroll(&self) -> ScrollBindings<E> {
        ScrollBindings {
            header: self.header.clone(),
            nav_links: self.nav_links.clone(),
            sections: self.sections.clone(),
            footer: self.footer.clone(),
        }
    }

    pub fn lightbox(&self) -> Option<LightboxBindings<E>> {
        let (Some(container), Some(image), Some(caption)) =
            (&self.lightbox, &self.lightbox_image, &self.lightbox_caption)
        else {
            tracing::debug!("lightbox markup incomplete, lightbox disabled");
            return None;
        };
        Some(LightboxBindings {
            container: container.clone(),
            image: image.clone(),
            caption: caption.clone(),
            body: self.body.clone(),
        })
    }
}
