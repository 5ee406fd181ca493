//! Scroll-driven page state: sticky header, active section, footer reveal.
//!
//! The pure functions here take plain numbers so they can be checked in
//! isolation; `ScrollController` reads layout from the bound elements and
//! writes the resulting classes.

use smol_str::SmolStr;

use crate::bindings::ScrollBindings;
use crate::config::{ClassNames, ScrollSettings};
use crate::platform::{ElementHandle, LayoutBox};

/// Scroll position and extents at the time of a scroll event.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollMetrics {
    /// Vertical scroll offset.
    pub top: f64,
    /// Viewport height.
    pub viewport_height: f64,
    /// Full scrollable height of the document.
    pub scroll_height: f64,
}

/// Header is sticky strictly past the threshold. No hysteresis.
pub fn is_sticky(top: f64, threshold: f64) -> bool {
    top > threshold
}

/// Whether a section is current at `top`, with its range shifted up by
/// `reveal_offset` so it triggers slightly before reaching the viewport top.
pub fn section_is_current(layout: LayoutBox, top: f64, reveal_offset: f64) -> bool {
    let offset = layout.top - reveal_offset;
    top >= offset && top < offset + layout.height
}

/// Indices of all current sections, in document order.
///
/// Overlapping layouts can make several sections current at once; callers
/// treat the last one as the active section.
pub fn current_sections(layouts: &[LayoutBox], top: f64, reveal_offset: f64) -> Vec<usize> {
    layouts
        .iter()
        .enumerate()
        .filter(|(_, layout)| section_is_current(**layout, top, reveal_offset))
        .map(|(i, _)| i)
        .collect()
}

/// Whether the viewport bottom has reached the end of the document.
pub fn is_at_bottom(metrics: ScrollMetrics) -> bool {
    metrics.viewport_height + metrics.top >= metrics.scroll_height
}

/// What a single scroll update decided.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScrollOutcome {
    pub sticky: bool,
    /// Id of the active section, if a section was current.
    pub current: Option<SmolStr>,
    /// Footer reveal state, when there is a footer.
    pub footer_visible: Option<bool>,
}

#[derive(Debug)]
struct Section<E> {
    element: E,
    /// One-way: set the first time the section is current.
    revealed: bool,
}

impl<E: ElementHandle> Section<E> {
    /// Read on every update, so an id changed after startup is honored.
    fn id(&self) -> SmolStr {
        self.element.attribute("id").map(SmolStr::from).unwrap_or_default()
    }
}

/// Applies scroll state to the header, nav links, sections and footer.
#[derive(Debug)]
pub struct ScrollController<E> {
    header: Option<E>,
    nav_links: Vec<E>,
    sections: Vec<Section<E>>,
    footer: Option<E>,
    settings: ScrollSettings,
    classes: ClassNames,
}

impl<E: ElementHandle> ScrollController<E> {
    pub fn new(bindings: ScrollBindings<E>, settings: ScrollSettings, classes: &ClassNames) -> Self {
        let sections = bindings
            .sections
            .into_iter()
            .map(|element| Section {
                element,
                revealed: false,
            })
            .collect();
        Self {
            header: bindings.header,
            nav_links: bindings.nav_links,
            sections,
            footer: bindings.footer,
            settings,
            classes: classes.clone(),
        }
    }

    /// Recompute and apply scroll state. Safe to call at scroll-event rate.
    pub fn on_scroll(&mut self, metrics: ScrollMetrics) -> ScrollOutcome {
        let top = metrics.top;

        let sticky = is_sticky(top, self.settings.sticky_threshold);
        if let Some(header) = &self.header {
            header.set_class(&self.classes.sticky, sticky);
        }

        let layouts: Vec<LayoutBox> = self.sections.iter().map(|s| s.element.layout()).collect();
        let current = current_sections(&layouts, top, self.settings.reveal_offset);

        for &index in &current {
            let section = &mut self.sections[index];
            if !section.revealed {
                section.element.add_class(&self.classes.show_animate);
                section.revealed = true;
                tracing::debug!(section = %section.id(), "section revealed");
            }
        }

        let active = current.last().map(|&index| self.sections[index].id());
        if let Some(id) = &active {
            self.activate_link(id);
        }

        let footer_visible = self.footer.as_ref().map(|footer| {
            let at_bottom = is_at_bottom(metrics);
            footer.set_class(&self.classes.show_animate, at_bottom);
            at_bottom
        });

        tracing::trace!(top, sticky, active = ?active, "scroll update");
        ScrollOutcome {
            sticky,
            current: active,
            footer_visible,
        }
    }

    /// Clear the active marker on every nav link, then set it on the first
    /// link whose href contains `id`. An empty id activates nothing.
    fn activate_link(&self, id: &str) {
        for link in &self.nav_links {
            link.remove_class(&self.classes.nav_active);
        }
        if id.is_empty() {
            return;
        }
        let target = self
            .nav_links
            .iter()
            .find(|link| link.attribute("href").is_some_and(|href| href.contains(id)));
        if let Some(link) = target {
            link.add_class(&self.classes.nav_active);
        }
    }
}
