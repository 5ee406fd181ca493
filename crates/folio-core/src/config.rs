//! Configuration for the page enhancements.
//!
//! Every field has a default matching the portfolio page markup, so an empty
//! config object (or none at all) enhances that page as-is. Field names are
//! camelCase on the wire since the config usually comes from JavaScript.

use serde::{Deserialize, Serialize};

use crate::error::{FolioError, Result};
use crate::reveal::RevealPlan;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EnhanceConfig {
    /// Selectors for the page bindings.
    pub selectors: Selectors,
    /// Class names written to the page.
    pub classes: ClassNames,
    /// Scroll controller thresholds.
    pub scroll: ScrollSettings,
    /// Intersection options for reveal targets.
    pub observer: ObserverSettings,
    /// What to reveal.
    pub reveal: RevealPlan,
}

impl EnhanceConfig {
    /// Parse a JSON config and validate it.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges and reject empty selectors.
    pub fn validate(&self) -> Result<()> {
        self.selectors.validate()?;

        let scroll = &self.scroll;
        if !scroll.sticky_threshold.is_finite() || scroll.sticky_threshold < 0.0 {
            return Err(FolioError::invalid_config(
                "scroll.stickyThreshold",
                format!("expected a non-negative number, got {}", scroll.sticky_threshold),
            ));
        }
        if !scroll.reveal_offset.is_finite() {
            return Err(FolioError::invalid_config(
                "scroll.revealOffset",
                "expected a finite number",
            ));
        }

        let observer = &self.observer;
        if !(0.0..=1.0).contains(&observer.threshold) {
            return Err(FolioError::invalid_config(
                "observer.threshold",
                format!("expected a ratio in 0..=1, got {}", observer.threshold),
            ));
        }
        if observer.root_margin.trim().is_empty() {
            return Err(FolioError::invalid_config(
                "observer.rootMargin",
                "must not be empty",
            ));
        }

        for rule in &self.reveal.rules {
            if rule.selector.trim().is_empty() {
                return Err(FolioError::invalid_config(
                    "reveal.rules.selector",
                    "must not be empty",
                ));
            }
            if rule.descend.as_deref().is_some_and(|d| d.trim().is_empty()) {
                return Err(FolioError::invalid_config(
                    "reveal.rules.descend",
                    "must not be empty when set",
                ));
            }
        }
        Ok(())
    }
}

/// Selectors resolved once at startup into `PageBindings`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Selectors {
    pub header: String,
    pub burger: String,
    pub overlay: String,
    pub nav_links: String,
    pub sections: String,
    pub footer: String,
    pub lightbox: String,
    /// Relative to the lightbox container.
    pub lightbox_image: String,
    /// Relative to the lightbox container.
    pub lightbox_caption: String,
    pub galleries: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            header: ".header".to_owned(),
            burger: "#menu-icon".to_owned(),
            overlay: ".navbar".to_owned(),
            nav_links: "header nav a".to_owned(),
            sections: "section".to_owned(),
            footer: ".footer".to_owned(),
            lightbox: ".lightbox".to_owned(),
            lightbox_image: ".lightbox-image".to_owned(),
            lightbox_caption: ".lightbox-caption".to_owned(),
            galleries: ".project-media-grid".to_owned(),
        }
    }
}

impl Selectors {
    fn validate(&self) -> Result<()> {
        let fields = [
            ("selectors.header", &self.header),
            ("selectors.burger", &self.burger),
            ("selectors.overlay", &self.overlay),
            ("selectors.navLinks", &self.nav_links),
            ("selectors.sections", &self.sections),
            ("selectors.footer", &self.footer),
            ("selectors.lightbox", &self.lightbox),
            ("selectors.lightboxImage", &self.lightbox_image),
            ("selectors.lightboxCaption", &self.lightbox_caption),
            ("selectors.galleries", &self.galleries),
        ];
        for (field, value) in fields {
            if value.trim().is_empty() {
                return Err(FolioError::invalid_config(field, "must not be empty"));
            }
        }
        Ok(())
    }
}

/// Class names that make up the style contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClassNames {
    /// Header past the sticky threshold.
    pub sticky: String,
    /// Nav link of the current section.
    pub nav_active: String,
    /// Navigation overlay shown.
    pub overlay_open: String,
    /// Burger icon showing its close glyph.
    pub burger_open: String,
    /// Body scroll lock while the menu is open.
    pub body_menu_open: String,
    /// Section/footer scroll reveal.
    pub show_animate: String,
    /// Reveal target has entered the viewport.
    pub visible: String,
    /// Lightbox container shown.
    pub lightbox_open: String,
    /// Body marker while the lightbox is shown.
    pub body_lightbox_open: String,
    /// Lightbox backdrop; clicks on it close the lightbox.
    pub lightbox_backdrop: String,
    /// Root marker set once the script runs.
    pub js_ready: String,
}

impl Default for ClassNames {
    fn default() -> Self {
        Self {
            sticky: "sticky".to_owned(),
            nav_active: "active".to_owned(),
            overlay_open: "active".to_owned(),
            burger_open: "bx-x".to_owned(),
            body_menu_open: "menu-open".to_owned(),
            show_animate: "show-animate".to_owned(),
            visible: "is-visible".to_owned(),
            lightbox_open: "open".to_owned(),
            body_lightbox_open: "lightbox-open".to_owned(),
            lightbox_backdrop: "lightbox-backdrop".to_owned(),
            js_ready: "js-ready".to_owned(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScrollSettings {
    /// Header turns sticky strictly past this offset (px).
    pub sticky_threshold: f64,
    /// Sections count as current this many px before reaching the top.
    pub reveal_offset: f64,
}

impl Default for ScrollSettings {
    fn default() -> Self {
        Self {
            sticky_threshold: 100.0,
            reveal_offset: 50.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ObserverSettings {
    /// Visible ratio that counts as an intersection.
    pub threshold: f64,
    /// CSS margin applied to the viewport before intersecting.
    pub root_margin: String,
}

impl Default for ObserverSettings {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            root_margin: "0px 0px -10% 0px".to_owned(),
        }
    }
}
