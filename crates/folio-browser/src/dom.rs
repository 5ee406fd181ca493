//! `ElementHandle` over web-sys elements.
//!
//! DOM calls that can throw (class list edits, invalid selectors) are
//! swallowed here: a failed write leaves the page as it was, a failed query
//! matches nothing. Invalid selectors are logged since they come from config.

use folio_core::{ElementHandle, LayoutBox};
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, NodeList};

/// Browser element handle. Compares by node identity.
#[derive(Clone, Debug, PartialEq)]
pub struct DomElement(Element);

impl DomElement {
    pub fn new(element: Element) -> Self {
        Self(element)
    }

    /// The document element (`<html>`), the root every binding resolves from.
    pub fn document_root() -> Option<Self> {
        web_sys::window()?
            .document()?
            .document_element()
            .map(Self)
    }

    pub fn as_element(&self) -> &Element {
        &self.0
    }

}

impl From<Element> for DomElement {
    fn from(element: Element) -> Self {
        Self(element)
    }
}

fn collect_elements(list: NodeList) -> Vec<DomElement> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .map(DomElement)
        .collect()
}

impl ElementHandle for DomElement {
    fn add_class(&self, class: &str) {
        let _ = self.0.class_list().add_1(class);
    }

    fn remove_class(&self, class: &str) {
        let _ = self.0.class_list().remove_1(class);
    }

    fn has_class(&self, class: &str) -> bool {
        self.0.class_list().contains(class)
    }

    fn set_class(&self, class: &str, on: bool) {
        let _ = self.0.class_list().toggle_with_force(class, on);
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.0.get_attribute(name)
    }

    fn set_attribute(&self, name: &str, value: &str) {
        let _ = self.0.set_attribute(name, value);
    }

    fn set_text(&self, text: &str) {
        self.0.set_text_content(Some(text));
    }

    fn set_style(&self, property: &str, value: &str) {
        // SVG and other non-HTML elements have no inline style we manage.
        if let Some(html) = self.0.dyn_ref::<HtmlElement>() {
            let _ = html.style().set_property(property, value);
        }
    }

    fn children(&self) -> Vec<Self> {
        let children = self.0.children();
        (0..children.length())
            .filter_map(|i| children.item(i))
            .map(DomElement)
            .collect()
    }

    fn query(&self, selector: &str) -> Option<Self> {
        match self.0.query_selector(selector) {
            Ok(found) => found.map(DomElement),
            Err(_) => {
                tracing::warn!(selector, "invalid selector");
                None
            }
        }
    }

    fn query_all(&self, selector: &str) -> Vec<Self> {
        match self.0.query_selector_all(selector) {
            Ok(list) => collect_elements(list),
            Err(_) => {
                tracing::warn!(selector, "invalid selector");
                Vec::new()
            }
        }
    }

    fn closest(&self, selector: &str) -> Option<Self> {
        self.0.closest(selector).ok().flatten().map(DomElement)
    }

    fn contains(&self, other: &Self) -> bool {
        let node: &web_sys::Node = other.0.as_ref();
        self.0.contains(Some(node))
    }

    fn layout(&self) -> LayoutBox {
        match self.0.dyn_ref::<HtmlElement>() {
            Some(html) => LayoutBox::new(html.offset_top() as f64, html.offset_height() as f64),
            None => {
                let rect = self.0.get_bounding_client_rect();
                let scroll_y = web_sys::window()
                    .and_then(|w| w.scroll_y().ok())
                    .unwrap_or(0.0);
                LayoutBox::new(rect.top() + scroll_y, rect.height())
            }
        }
    }
}
