//! Platform abstraction traits for page enhancements.
//!
//! These traits define the interface between the controller logic and the
//! host document (browser DOM, or an in-memory tree under test). Every state
//! transition a controller makes is expressed through them as class-list,
//! attribute, text or inline-style changes.

/// The key value reported for the Escape key.
pub const ESCAPE_KEY: &str = "Escape";

/// Check whether a keyboard event key value is Escape.
pub fn is_escape(key: &str) -> bool {
    key == ESCAPE_KEY
}

/// Layout box of an element, in document pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LayoutBox {
    /// Offset from the top of the offset parent.
    pub top: f64,
    /// Rendered height.
    pub height: f64,
}

impl LayoutBox {
    pub fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }
}

/// Handle to a single element in the host document.
///
/// Handles are cheap to clone and compare by identity. Writes take `&self`
/// since the host owns the underlying node. Failures reported by the host
/// (e.g. an invalid selector) are swallowed: queries return nothing and
/// writes are dropped.
pub trait ElementHandle: Clone + PartialEq + Sized {
    /// Add a class to the element's class list.
    fn add_class(&self, class: &str);

    /// Remove a class from the element's class list.
    fn remove_class(&self, class: &str);

    /// Check class list membership.
    fn has_class(&self, class: &str) -> bool;

    /// Add or remove a class so that membership matches `on`.
    fn set_class(&self, class: &str, on: bool) {
        if on {
            self.add_class(class);
        } else {
            self.remove_class(class);
        }
    }

    /// Read an attribute value.
    fn attribute(&self, name: &str) -> Option<String>;

    /// Write an attribute value.
    fn set_attribute(&self, name: &str, value: &str);

    /// Replace the element's text content.
    fn set_text(&self, text: &str);

    /// Set an inline style property (e.g. `transition-delay`).
    fn set_style(&self, property: &str, value: &str);

    /// Direct element children, in document order.
    fn children(&self) -> Vec<Self>;

    /// First descendant matching `selector`.
    fn query(&self, selector: &str) -> Option<Self>;

    /// All descendants matching `selector`, in document order.
    fn query_all(&self, selector: &str) -> Vec<Self>;

    /// Closest inclusive ancestor matching `selector`.
    fn closest(&self, selector: &str) -> Option<Self>;

    /// Whether `other` is this element or one of its descendants.
    fn contains(&self, other: &Self) -> bool;

    /// Current layout box.
    fn layout(&self) -> LayoutBox;
}

/// Viewport intersection primitive.
///
/// Implementations invoke their owner's callback when a watched element
/// crosses the configured visibility threshold. The reveal coordinator
/// unwatches each target on its first intersection.
pub trait IntersectionWatcher<E> {
    /// Start tracking an element.
    fn watch(&self, target: &E);

    /// Stop tracking an element.
    fn unwatch(&self, target: &E);
}
