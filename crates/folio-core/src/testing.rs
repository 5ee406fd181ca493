//! In-memory element tree and recording watcher for tests.
//!
//! `MemoryElement` implements `ElementHandle` over a tiny DOM with enough
//! selector support for the page layouts used in tests: compound selectors
//! of tag, `.class` and `#id`, the descendant combinator and `,` lists.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::platform::{ElementHandle, IntersectionWatcher, LayoutBox};

#[derive(Clone)]
pub struct MemoryElement(Rc<Node>);

struct Node {
    tag: String,
    state: RefCell<NodeState>,
    parent: RefCell<Weak<Node>>,
    children: RefCell<Vec<MemoryElement>>,
}

#[derive(Default)]
struct NodeState {
    classes: Vec<String>,
    attributes: BTreeMap<String, String>,
    styles: BTreeMap<String, String>,
    text: String,
    layout: LayoutBox,
}

impl MemoryElement {
    pub fn new(tag: &str) -> Self {
        Self(Rc::new(Node {
            tag: tag.to_owned(),
            state: RefCell::default(),
            parent: RefCell::new(Weak::new()),
            children: RefCell::default(),
        }))
    }

    pub fn with_class(self, class: &str) -> Self {
        for class in class.split_whitespace() {
            self.add_class(class);
        }
        self
    }

    pub fn with_attr(self, name: &str, value: &str) -> Self {
        self.set_attribute(name, value);
        self
    }

    pub fn with_layout(self, top: f64, height: f64) -> Self {
        self.0.state.borrow_mut().layout = LayoutBox::new(top, height);
        self
    }

    /// Append `child` and return it, for building nested fixtures.
    pub fn append(&self, child: &MemoryElement) -> MemoryElement {
        *child.0.parent.borrow_mut() = Rc::downgrade(&self.0);
        self.0.children.borrow_mut().push(child.clone());
        child.clone()
    }

    pub fn parent(&self) -> Option<MemoryElement> {
        self.0.parent.borrow().upgrade().map(MemoryElement)
    }

    pub fn tag(&self) -> &str {
        &self.0.tag
    }

    pub fn classes(&self) -> Vec<String> {
        self.0.state.borrow().classes.clone()
    }

    pub fn style(&self, property: &str) -> Option<String> {
        self.0.state.borrow().styles.get(property).cloned()
    }

    pub fn text(&self) -> String {
        self.0.state.borrow().text.clone()
    }

    fn descendants(&self) -> Vec<MemoryElement> {
        let mut out = Vec::new();
        for child in self.0.children.borrow().iter() {
            out.push(child.clone());
            out.extend(child.descendants());
        }
        out
    }

    fn matches(&self, selector: &str) -> bool {
        selector
            .split(',')
            .any(|group| self.matches_group(group.split_whitespace().map(Compound::parse).collect()))
    }

    fn matches_group(&self, compounds: Vec<Compound>) -> bool {
        let Some((last, ancestors)) = compounds.split_last() else {
            return false;
        };
        if !last.matches(self) {
            return false;
        }
        let mut cursor = self.parent();
        for compound in ancestors.iter().rev() {
            loop {
                let Some(candidate) = cursor else {
                    return false;
                };
                cursor = candidate.parent();
                if compound.matches(&candidate) {
                    break;
                }
            }
        }
        true
    }
}

impl PartialEq for MemoryElement {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for MemoryElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.0.state.borrow();
        write!(f, "<{}", self.0.tag)?;
        if let Some(id) = state.attributes.get("id") {
            write!(f, " id=\"{id}\"")?;
        }
        if !state.classes.is_empty() {
            write!(f, " class=\"{}\"", state.classes.join(" "))?;
        }
        write!(f, ">")
    }
}

impl ElementHandle for MemoryElement {
    fn add_class(&self, class: &str) {
        let mut state = self.0.state.borrow_mut();
        if !state.classes.iter().any(|c| c == class) {
            state.classes.push(class.to_owned());
        }
    }

    fn remove_class(&self, class: &str) {
        self.0.state.borrow_mut().classes.retain(|c| c != class);
    }

    fn has_class(&self, class: &str) -> bool {
        self.0.state.borrow().classes.iter().any(|c| c == class)
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.0.state.borrow().attributes.get(name).cloned()
    }

    fn set_attribute(&self, name: &str, value: &str) {
        self.0
            .state
            .borrow_mut()
            .attributes
            .insert(name.to_owned(), value.to_owned());
    }

    fn set_text(&self, text: &str) {
        self.0.state.borrow_mut().text = text.to_owned();
    }

    fn set_style(&self, property: &str, value: &str) {
        self.0
            .state
            .borrow_mut()
            .styles
            .insert(property.to_owned(), value.to_owned());
    }

    fn children(&self) -> Vec<Self> {
        self.0.children.borrow().clone()
    }

    fn query(&self, selector: &str) -> Option<Self> {
        self.descendants().into_iter().find(|el| el.matches(selector))
    }

    fn query_all(&self, selector: &str) -> Vec<Self> {
        self.descendants()
            .into_iter()
            .filter(|el| el.matches(selector))
            .collect()
    }

    fn closest(&self, selector: &str) -> Option<Self> {
        let mut cursor = Some(self.clone());
        while let Some(el) = cursor {
            if el.matches(selector) {
                return Some(el);
            }
            cursor = el.parent();
        }
        None
    }

    fn contains(&self, other: &Self) -> bool {
        let mut cursor = Some(other.clone());
        while let Some(el) = cursor {
            if &el == self {
                return true;
            }
            cursor = el.parent();
        }
        false
    }

    fn layout(&self) -> LayoutBox {
        self.0.state.borrow().layout
    }
}

#[derive(Default)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
}

impl Compound {
    fn parse(token: &str) -> Self {
        let mut compound = Compound::default();
        let end = token.find(['.', '#']).unwrap_or(token.len());
        if end > 0 {
            compound.tag = Some(token[..end].to_owned());
        }
        let mut rest = &token[end..];
        while let Some(marker) = rest.chars().next() {
            let body = &rest[1..];
            let end = body.find(['.', '#']).unwrap_or(body.len());
            let name = body[..end].to_owned();
            if marker == '#' {
                compound.id = Some(name);
            } else {
                compound.classes.push(name);
            }
            rest = &body[end..];
        }
        compound
    }

    fn matches(&self, el: &MemoryElement) -> bool {
        if let Some(tag) = &self.tag {
            if tag != "*" && tag != el.tag() {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if el.attribute("id").as_ref() != Some(id) {
                return false;
            }
        }
        self.classes.iter().all(|c| el.has_class(c))
    }
}

/// Watcher that records subscriptions instead of observing a viewport.
#[derive(Default)]
pub struct RecordingWatcher {
    watched: RefCell<Vec<MemoryElement>>,
    pub watch_calls: Cell<usize>,
    pub unwatch_calls: Cell<usize>,
}

impl RecordingWatcher {
    pub fn is_watching(&self, el: &MemoryElement) -> bool {
        self.watched.borrow().contains(el)
    }

    pub fn watching(&self) -> usize {
        self.watched.borrow().len()
    }
}

impl IntersectionWatcher<MemoryElement> for RecordingWatcher {
    fn watch(&self, target: &MemoryElement) {
        self.watch_calls.set(self.watch_calls.get() + 1);
        let mut watched = self.watched.borrow_mut();
        if !watched.contains(target) {
            watched.push(target.clone());
        }
    }

    fn unwatch(&self, target: &MemoryElement) {
        self.unwatch_calls.set(self.unwatch_calls.get() + 1);
        self.watched.borrow_mut().retain(|el| el != target);
    }
}

/// Handles into the fixture built by `portfolio_page`.
pub struct PortfolioPage {
    pub root: MemoryElement,
    pub body: MemoryElement,
    pub header: MemoryElement,
    pub burger: MemoryElement,
    pub overlay: MemoryElement,
    pub nav_links: Vec<MemoryElement>,
    pub sections: Vec<MemoryElement>,
    pub footer: MemoryElement,
    pub gallery: MemoryElement,
    /// `<img>` elements inside gallery anchors.
    pub gallery_images: Vec<MemoryElement>,
    /// An `<img>` inside the gallery with no anchor around it.
    pub loose_image: MemoryElement,
    /// A non-image element inside the gallery.
    pub gallery_label: MemoryElement,
    pub lightbox: MemoryElement,
    pub backdrop: MemoryElement,
    pub lightbox_image: MemoryElement,
    pub lightbox_caption: MemoryElement,
}

/// A cut-down portfolio page: header with nav, three sections, a project
/// gallery, footer and lightbox. Sections are laid out at 0, 600 and 1400.
pub fn portfolio_page() -> PortfolioPage {
    let root = MemoryElement::new("html");
    let body = root.append(&MemoryElement::new("body"));

    let header = body.append(&MemoryElement::new("header").with_class("header"));
    let overlay = header.append(&MemoryElement::new("nav").with_class("navbar"));
    let nav_links = ["#home", "#about", "#projects"]
        .iter()
        .map(|href| overlay.append(&MemoryElement::new("a").with_attr("href", href)))
        .collect();
    let burger = header.append(
        &MemoryElement::new("i")
            .with_attr("id", "menu-icon")
            .with_class("bx bx-menu"),
    );

    let home = body.append(
        &MemoryElement::new("section")
            .with_attr("id", "home")
            .with_class("home")
            .with_layout(0.0, 600.0),
    );
    let home_content = home.append(&MemoryElement::new("div").with_class("home-content"));
    home_content.append(&MemoryElement::new("h1"));
    home_content.append(&MemoryElement::new("p"));

    let about = body.append(
        &MemoryElement::new("section")
            .with_attr("id", "about")
            .with_class("about")
            .with_layout(600.0, 800.0),
    );
    about.append(&MemoryElement::new("h2").with_class("heading"));
    about.append(&MemoryElement::new("div").with_class("about-img"));
    let about_content = about.append(&MemoryElement::new("div").with_class("about-content"));
    about_content.append(&MemoryElement::new("p"));
    about_content.append(&MemoryElement::new("p"));

    let projects = body.append(
        &MemoryElement::new("section")
            .with_attr("id", "projects")
            .with_class("projects")
            .with_layout(1400.0, 1000.0),
    );
    projects.append(&MemoryElement::new("h2").with_class("heading"));
    let project = projects.append(&MemoryElement::new("div").with_class("project"));
    let gallery = project.append(&MemoryElement::new("div").with_class("project-media-grid"));
    let gallery_images = [
        ("/img/one-full.jpg", "Project shot"),
        ("/img/two-full.jpg", "Second shot"),
    ]
    .iter()
    .map(|(href, alt)| {
        let link = gallery.append(&MemoryElement::new("a").with_attr("href", href));
        link.append(&MemoryElement::new("img").with_attr("alt", alt))
    })
    .collect();
    let loose_image = gallery.append(&MemoryElement::new("img").with_attr("alt", "loose"));
    let gallery_label = gallery.append(&MemoryElement::new("span").with_class("label"));
    project.append(&MemoryElement::new("div").with_class("project-body"));
    let second = projects.append(&MemoryElement::new("div").with_class("project"));
    second.append(&MemoryElement::new("div").with_class("project-body"));

    let footer = body.append(&MemoryElement::new("div").with_class("footer"));

    let lightbox = body.append(&MemoryElement::new("div").with_class("lightbox"));
    let backdrop = lightbox.append(&MemoryElement::new("div").with_class("lightbox-backdrop"));
    let lightbox_image = lightbox.append(&MemoryElement::new("img").with_class("lightbox-image"));
    let lightbox_caption =
        lightbox.append(&MemoryElement::new("p").with_class("lightbox-caption"));

    let sections = vec![home, about, projects];

    PortfolioPage {
        root,
        body,
        header,
        burger,
        overlay,
        nav_links,
        sections,
        footer,
        gallery,
        gallery_images,
        loose_image,
        gallery_label,
        lightbox,
        backdrop,
        lightbox_image,
        lightbox_caption,
    }
}
