//! One-shot reveal animations.
//!
//! Targets are tagged with their reveal classes and handed to an
//! `IntersectionWatcher`. On the first intersection the target gets the
//! visible class, containers with a `data-stagger` step assign incremental
//! transition delays to their children, and the target is unwatched. A
//! revealed target is never hidden or watched again.
//!
//! # CSS Integration
//!
//! Hidden/visible styling belongs to the stylesheet, e.g.:
//! ```css
//! .js-ready .reveal { opacity: 0; transform: translateY(24px); }
//! .js-ready .reveal.is-visible { opacity: 1; transform: none; }
//! ```

mod plan;

pub use plan::{Alternate, AlternateBy, RevealPlan, RevealRule};

use smol_str::SmolStr;

use crate::platform::{ElementHandle, IntersectionWatcher};

/// Attribute carrying a container's stagger step in milliseconds.
pub const STAGGER_ATTRIBUTE: &str = "data-stagger";

/// Step used when a stagger attribute is present but not a positive number.
pub const DEFAULT_STAGGER_MS: u32 = 80;

/// Parse a stagger step the way `parseInt(value, 10) || 80` would: leading
/// whitespace and sign are accepted, parsing stops at the first non-digit,
/// and zero or garbage falls back to the default.
pub fn parse_stagger(raw: &str) -> u32 {
    let trimmed = raw.trim_start();
    let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let digits: String = unsigned.chars().take_while(char::is_ascii_digit).collect();
    match digits.parse::<u32>() {
        Ok(step) if step > 0 => step,
        _ => DEFAULT_STAGGER_MS,
    }
}

/// Delay for each of `count` children: `index * step`.
pub fn stagger_delays(count: usize, step: u32) -> impl Iterator<Item = u32> {
    (0..count).map(move |index| (index as u32).saturating_mul(step))
}

/// CSS value for a delay in milliseconds.
pub fn format_delay(ms: u32) -> String {
    format!("{ms}ms")
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum RevealState {
    Pending,
    Visible,
}

#[derive(Debug)]
struct RevealTarget<E> {
    element: E,
    state: RevealState,
    /// Guard so children get their delays once per container.
    staggered: bool,
}

/// Registry of reveal targets and their one-way visibility state.
#[derive(Debug)]
pub struct RevealCoordinator<E> {
    targets: Vec<RevealTarget<E>>,
    visible_class: SmolStr,
}

impl<E: ElementHandle> RevealCoordinator<E> {
    pub fn new(visible_class: &str) -> Self {
        Self {
            targets: Vec::new(),
            visible_class: SmolStr::new(visible_class),
        }
    }

    /// Tag an element with `classes` and start watching it.
    ///
    /// A positive `stagger` is written to `data-stagger` so the children get
    /// delays on reveal. Registering an element again merges the classes;
    /// an already-revealed element is not watched again.
    pub fn register<S, W>(&mut self, element: &E, classes: &[S], stagger: Option<u32>, watcher: &W)
    where
        S: AsRef<str>,
        W: IntersectionWatcher<E>,
    {
        for class in classes {
            element.add_class(class.as_ref());
        }
        if let Some(step) = stagger.filter(|step| *step > 0) {
            element.set_attribute(STAGGER_ATTRIBUTE, &step.to_string());
        }

        let existing = self
            .targets
            .iter()
            .find(|t| &t.element == element)
            .map(|t| t.state);
        match existing {
            Some(RevealState::Visible) => return,
            Some(RevealState::Pending) => {}
            None => self.targets.push(RevealTarget {
                element: element.clone(),
                state: RevealState::Pending,
                staggered: false,
            }),
        }
        watcher.watch(element);
    }

    /// Handle an intersection reported by the watcher.
    ///
    /// Returns true when the target was revealed by this call; repeated or
    /// late intersections for a visible target are ignored.
    pub fn on_intersect<W: IntersectionWatcher<E>>(&mut self, element: &E, watcher: &W) -> bool {
        let index = match self.targets.iter().position(|t| &t.element == element) {
            Some(index) => index,
            None => {
                tracing::debug!("intersection for an unregistered element");
                self.targets.push(RevealTarget {
                    element: element.clone(),
                    state: RevealState::Pending,
                    staggered: false,
                });
                self.targets.len() - 1
            }
        };

        let target = &mut self.targets[index];
        if target.state == RevealState::Visible {
            watcher.unwatch(element);
            return false;
        }

        element.add_class(&self.visible_class);
        target.state = RevealState::Visible;

        let step = element
            .attribute(STAGGER_ATTRIBUTE)
            .filter(|raw| !raw.is_empty())
            .map(|raw| parse_stagger(&raw));
        if let Some(step) = step {
            if !target.staggered {
                let children = element.children();
                for (child, delay) in children.iter().zip(stagger_delays(children.len(), step)) {
                    child.set_style("transition-delay", &format_delay(delay));
                }
                target.staggered = true;
                tracing::trace!(children = children.len(), step, "staggered children");
            }
        }

        watcher.unwatch(element);
        true
    }

    pub fn is_visible(&self, element: &E) -> bool {
        self.targets
            .iter()
            .any(|t| &t.element == element && t.state == RevealState::Visible)
    }

    /// Number of registered targets.
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Targets still waiting for their first intersection.
    pub fn pending(&self) -> usize {
        self.targets
            .iter()
            .filter(|t| t.state == RevealState::Pending)
            .count()
    }
}
