#![forbid(unsafe_code)]

//! Site configuration: the markup contract plus tunables.
//!
//! Every field has a default matching the storefront templates, and the
//! sections are `#[serde(default)]`, so a host may pass a partial JSON object
//! that overrides only what differs:
//!
//! ```
//! use vitrine_core::config::SiteConfig;
//!
//! let cfg = SiteConfig::from_json(r#"{ "headerScrollThreshold": 80 }"#).unwrap();
//! assert_eq!(cfg.header_scroll_threshold, 80.0);
//! assert_eq!(cfg.selectors.burger, ".header__burger");
//! ```

use serde::{Deserialize, Serialize};

use crate::mask::DEFAULT_TEMPLATE;

/// Configuration error type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The options document is not valid JSON for [`SiteConfig`].
    Parse(String),
    /// A field holds a value the controllers cannot work with.
    Invalid(&'static str),
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Parse(msg) => write!(f, "malformed site config: {msg}"),
            Self::Invalid(field) => write!(f, "invalid site config value for `{field}`"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

/// Selectors and attribute names the behaviour binds to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Selectors {
    pub header: String,
    pub section_top: String,
    pub burger: String,
    pub mobile_nav: String,
    pub mega_trigger: String,
    pub mega_panel: String,
    pub mega_item: String,
    pub mega_list: String,
    pub mega_more: String,
    pub accordion_item: String,
    pub accordion_body: String,
    pub tabs: String,
    pub phone_input: String,
    pub modal_layer: String,
    pub modal: String,
    pub modal_trigger: String,
    pub modal_close: String,
    /// Attribute naming the modal on both triggers and panels.
    pub modal_type_attr: String,
    pub more_caption_attr: String,
    pub less_caption_attr: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            header: "header".into(),
            section_top: ".section-top".into(),
            burger: ".header__burger".into(),
            mobile_nav: ".header__nav".into(),
            mega_trigger: ".header__catalog".into(),
            mega_panel: ".header__mega".into(),
            mega_item: ".mega-menu__item".into(),
            mega_list: ".mega-menu__list".into(),
            mega_more: ".mega-menu__more".into(),
            accordion_item: ".accordion__item".into(),
            accordion_body: ".accordion__body".into(),
            tabs: "[data-tabs]".into(),
            phone_input: r#"input[type="tel"]"#.into(),
            modal_layer: ".modals".into(),
            modal: ".modal".into(),
            modal_trigger: ".modal-btn".into(),
            modal_close: ".modal__close".into(),
            modal_type_attr: "data-type".into(),
            more_caption_attr: "data-text-more".into(),
            less_caption_attr: "data-text-less".into(),
        }
    }
}

/// State classes toggled on the markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Classes {
    pub mobile_open: String,
    pub mega_open: String,
    pub trigger_active: String,
    pub burger_active: String,
    pub group_expanded: String,
    pub accordion_active: String,
    pub header_scrolled: String,
    pub no_scroll: String,
}

impl Default for Classes {
    fn default() -> Self {
        Self {
            mobile_open: "open".into(),
            mega_open: "mega-open".into(),
            trigger_active: "is-active".into(),
            burger_active: "active".into(),
            group_expanded: "is-expanded".into(),
            accordion_active: "active".into(),
            header_scrolled: "scroll".into(),
            no_scroll: "no-scroll".into(),
        }
    }
}

/// Fallback captions for the "show more" toggles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Captions {
    pub show_more: String,
    pub show_less: String,
}

impl Default for Captions {
    fn default() -> Self {
        Self {
            show_more: "Показать еще".into(),
            show_less: "Свернуть".into(),
        }
    }
}

/// Vertical slide of a modal panel, in percent of its own height.
///
/// Unlike the other sections a tween override must be complete; only
/// `fromPercent` may be omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tween {
    /// Start offset; `None` tweens from wherever the panel currently is.
    #[serde(default)]
    pub from_percent: Option<f64>,
    pub to_percent: f64,
    pub duration_secs: f64,
    /// Easing name understood by the animation library.
    pub ease: String,
}

impl Tween {
    /// Slide down from above the viewport into place.
    #[must_use]
    pub fn modal_in() -> Self {
        Self {
            from_percent: Some(-100.0),
            to_percent: 0.0,
            duration_secs: 0.5,
            ease: "power3.out".into(),
        }
    }

    /// Slide back up out of view.
    #[must_use]
    pub fn modal_out() -> Self {
        Self {
            from_percent: None,
            to_percent: -100.0,
            duration_secs: 0.4,
            ease: "power3.in".into(),
        }
    }
}

/// Complete configuration handed to [`crate::app::App`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SiteConfig {
    pub selectors: Selectors,
    pub classes: Classes,
    pub captions: Captions,
    pub mask_template: String,
    /// `scrollY` beyond which the header gets its scrolled class.
    pub header_scroll_threshold: f64,
    /// Menu groups with more children than this get a "show more" toggle.
    pub show_more_threshold: usize,
    pub modal_in: Tween,
    pub modal_out: Tween,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            selectors: Selectors::default(),
            classes: Classes::default(),
            captions: Captions::default(),
            mask_template: DEFAULT_TEMPLATE.into(),
            header_scroll_threshold: 50.0,
            show_more_threshold: 3,
            modal_in: Tween::modal_in(),
            modal_out: Tween::modal_out(),
        }
    }
}

impl SiteConfig {
    /// Parse a (possibly partial) JSON options object and validate it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject values that would make a controller misbehave.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.mask_template.is_empty() {
            return Err(ConfigError::Invalid("maskTemplate"));
        }
        if !self.header_scroll_threshold.is_finite() {
            return Err(ConfigError::Invalid("headerScrollThreshold"));
        }
        for (name, tween) in [("modalIn", &self.modal_in), ("modalOut", &self.modal_out)] {
            if !tween.duration_secs.is_finite() || tween.duration_secs < 0.0 {
                return Err(ConfigError::Invalid(name));
            }
        }
        Ok(())
    }
}
