//! Which page regions to reveal, and with which classes.
//!
//! The default plan covers the portfolio page: hero, about, education,
//! skills, projects, contact and footer. A config can replace it wholesale.

use serde::{Deserialize, Serialize};

use super::RevealCoordinator;
use crate::platform::{ElementHandle, IntersectionWatcher};

/// Ordered list of reveal rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RevealPlan {
    pub rules: Vec<RevealRule>,
}

/// One selector's worth of reveal targets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevealRule {
    /// When set, `selector` is matched inside each scope element in turn.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    pub selector: String,
    /// Take only the first `selector` match inside each scope.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub first: bool,
    /// When set, the targets are these descendants of each match instead of
    /// the match itself. Parity restarts inside every match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descend: Option<String>,
    #[serde(default)]
    pub classes: Vec<String>,
    /// Per-child delay step (ms) applied on reveal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stagger: Option<u32>,
    /// Extra class picked by index parity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternate: Option<Alternate>,
}

/// Direction variant chosen by parity, e.g. left for even, right for odd.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alternate {
    pub even: String,
    pub odd: String,
    #[serde(default)]
    pub by: AlternateBy,
}

/// Which index drives the parity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AlternateBy {
    /// Position among the rule's matches (within the scope or the
    /// `descend` parent, if any).
    #[default]
    Match,
    /// Position of the enclosing scope element.
    Scope,
}

impl Alternate {
    pub fn new(even: &str, odd: &str, by: AlternateBy) -> Self {
        Self {
            even: even.to_owned(),
            odd: odd.to_owned(),
            by,
        }
    }

    pub fn pick(&self, index: usize) -> &str {
        if index % 2 == 1 { &self.odd } else { &self.even }
    }
}

impl RevealRule {
    /// Rule with whitespace-separated `classes`.
    pub fn new(selector: &str, classes: &str) -> Self {
        Self {
            scope: None,
            selector: selector.to_owned(),
            first: false,
            descend: None,
            classes: classes.split_whitespace().map(str::to_owned).collect(),
            stagger: None,
            alternate: None,
        }
    }

    pub fn within(mut self, scope: &str) -> Self {
        self.scope = Some(scope.to_owned());
        self
    }

    /// Only the first match per scope.
    pub fn first(mut self) -> Self {
        self.first = true;
        self
    }

    pub fn descend(mut self, selector: &str) -> Self {
        self.descend = Some(selector.to_owned());
        self
    }

    pub fn stagger(mut self, step_ms: u32) -> Self {
        self.stagger = Some(step_ms);
        self
    }

    pub fn alternate(mut self, alternate: Alternate) -> Self {
        self.alternate = Some(alternate);
        self
    }

    /// Matches under `root`, each with the index used for parity.
    pub fn targets<E: ElementHandle>(&self, root: &E) -> Vec<(E, usize)> {
        let by_scope = matches!(
            self.alternate,
            Some(Alternate {
                by: AlternateBy::Scope,
                ..
            })
        );
        let scopes: Vec<E> = match &self.scope {
            None => vec![root.clone()],
            Some(scope) => root.query_all(scope),
        };

        let mut targets = Vec::new();
        for (scope_index, scope_el) in scopes.iter().enumerate() {
            let matches: Vec<E> = if self.first {
                scope_el.query(&self.selector).into_iter().collect()
            } else {
                scope_el.query_all(&self.selector)
            };
            let groups: Vec<Vec<E>> = match &self.descend {
                None => vec![matches],
                Some(inner) => matches.iter().map(|m| m.query_all(inner)).collect(),
            };
            for group in groups {
                for (match_index, el) in group.into_iter().enumerate() {
                    targets.push((el, if by_scope { scope_index } else { match_index }));
                }
            }
        }
        targets
    }

    /// Classes for the target at parity `index`.
    pub fn classes_for(&self, index: usize) -> Vec<&str> {
        let mut classes: Vec<&str> = self.classes.iter().map(String::as_str).collect();
        if let Some(alternate) = &self.alternate {
            classes.push(alternate.pick(index));
        }
        classes
    }
}

impl Default for RevealPlan {
    fn default() -> Self {
        let sides = |by| Alternate::new("reveal-left", "reveal-right", by);
        Self {
            rules: vec![
                // Hero
                RevealRule::new(".home .home-content h1", "reveal reveal-up"),
                RevealRule::new(".home .home-content p", "reveal reveal-up"),
                // About
                RevealRule::new(".about .heading", "reveal reveal-up"),
                RevealRule::new(".about .about-img", "reveal reveal-scale"),
                RevealRule::new(".about .about-content p", "reveal reveal-up"),
                // Education timeline
                RevealRule::new(".education .heading", "reveal reveal-up"),
                RevealRule::new(".education .education-content", "reveal reveal-left"),
                RevealRule::new(".education .education-content .content", "reveal"),
                // Skills
                RevealRule::new(".skills .heading", "reveal reveal-up"),
                RevealRule::new(".skills .skills-grid", "reveal-stagger reveal").stagger(90),
                RevealRule::new(".skills .skill-card", "reveal").alternate(sides(AlternateBy::Match)),
                // Projects: gallery, tiles, then text
                RevealRule::new(".projects .heading", "reveal reveal-up"),
                RevealRule::new(".project-media-grid", "reveal reveal-stagger reveal-up")
                    .within(".projects .project")
                    .first()
                    .stagger(80),
                RevealRule::new(".project-media-grid", "reveal")
                    .within(".projects .project")
                    .first()
                    .descend("a")
                    .alternate(sides(AlternateBy::Match)),
                RevealRule::new(".project-body", "reveal")
                    .within(".projects .project")
                    .first()
                    .alternate(sides(AlternateBy::Scope)),
                // Contact
                RevealRule::new(".contact .heading", "reveal reveal-up"),
                RevealRule::new(".contact form", "reveal reveal-up"),
                // Footer
                RevealRule::new(".footer", "reveal reveal-up"),
            ],
        }
    }
}

impl<E: ElementHandle> RevealCoordinator<E> {
    /// Register every target of every rule. Returns the number of matches.
    pub fn apply_plan<W: IntersectionWatcher<E>>(
        &mut self,
        root: &E,
        plan: &RevealPlan,
        watcher: &W,
    ) -> usize {
        let mut matched = 0;
        for rule in &plan.rules {
            let targets = rule.targets(root);
            if targets.is_empty() {
                tracing::trace!(selector = %rule.selector, "reveal rule matched nothing");
            }
            for (element, index) in targets {
                self.register(&element, &rule.classes_for(index), rule.stagger, watcher);
                matched += 1;
            }
        }
        tracing::debug!(
            rules = plan.rules.len(),
            matched,
            targets = self.len(),
            "reveal plan applied"
        );
        matched
    }
}
