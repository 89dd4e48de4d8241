#![forbid(unsafe_code)]

//! App state to DOM operations.
//!
//! Rendering is split from applying so it can be tested natively: these
//! functions read an [`App`] and return a flat list of [`DomOp`]s; the wasm
//! layer resolves each [`Part`] to the elements it found at boot and skips
//! parts the page does not have.
//!
//! Every call renders whole sections of state, so applying the list twice is
//! the same as applying it once. [`render_changed`] limits the work to the
//! sections an update reported in its [`Repaint`].

use vitrine_core::app::{App, FrameOutcome, Repaint};
use vitrine_core::config::Classes;

/// A piece of page markup the host knows how to find.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Part {
    Body,
    Header,
    /// Every top section at once.
    SectionTops,
    Burger,
    MobileNav,
    MegaTrigger,
    MegaPanel,
    MoreGroup(usize),
    MoreToggle(usize),
    AccordionItem(usize),
    AccordionBody(usize),
    ModalLayer,
    /// Every modal panel carrying this type.
    Modal(String),
    /// Every modal panel in the layer except those of the given type,
    /// untyped panels included.
    InactiveModals(Option<String>),
}

/// One DOM mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum DomOp {
    Class {
        part: Part,
        class: String,
        on: bool,
    },
    Attr {
        part: Part,
        name: &'static str,
        value: &'static str,
    },
    Text {
        part: Part,
        text: String,
    },
    /// Inline style; `None` removes the property.
    Style {
        part: Part,
        property: &'static str,
        value: Option<String>,
    },
}

impl DomOp {
    #[must_use]
    pub fn part(&self) -> &Part {
        match self {
            Self::Class { part, .. }
            | Self::Attr { part, .. }
            | Self::Text { part, .. }
            | Self::Style { part, .. } => part,
        }
    }
}

fn class(part: Part, class: &str, on: bool) -> DomOp {
    DomOp::Class {
        part,
        class: class.to_owned(),
        on,
    }
}

fn style(part: Part, property: &'static str, value: Option<String>) -> DomOp {
    DomOp::Style {
        part,
        property,
        value,
    }
}

fn px(value: f64) -> String {
    format!("{value}px")
}

/// Full view of the header, groups, accordion and modal layer.
///
/// `accordion_heights[i]` is the measured `scrollHeight` of body `i`;
/// missing entries count as zero.
#[must_use]
pub fn render(app: &App, accordion_heights: &[f64]) -> Vec<DomOp> {
    render_changed(app, Repaint::all(), accordion_heights)
}

/// The sections named in `repaint`, in the same order [`render`] emits them.
///
/// `accordion_heights` is only read when `repaint` contains
/// [`Repaint::ACCORDION`].
#[must_use]
pub fn render_changed(app: &App, repaint: Repaint, accordion_heights: &[f64]) -> Vec<DomOp> {
    let mut ops = Vec::new();
    if repaint.contains(Repaint::HEADER) {
        let classes = &app.config().classes;
        ops.push(class(Part::Header, &classes.header_scrolled, app.header_scrolled()));
    }
    if repaint.contains(Repaint::MENU) {
        render_menu(app, &mut ops);
    }
    if repaint.contains(Repaint::GROUPS) {
        render_groups(app, &mut ops);
    }
    if repaint.contains(Repaint::ACCORDION) {
        render_accordion(app, accordion_heights, &mut ops);
    }
    if repaint.contains(Repaint::MODALS) {
        render_modals(app, &mut ops);
    }
    ops
}

fn render_menu(app: &App, ops: &mut Vec<DomOp>) {
    let classes = &app.config().classes;
    let menu = app.menu();
    let view = menu.view();

    ops.push(class(Part::Burger, &classes.burger_active, view.burger_active));
    if menu.features().mobile {
        ops.push(class(Part::MobileNav, &classes.mobile_open, view.mobile_open));
    }
    if menu.features().mega {
        ops.push(class(Part::Header, &classes.mega_open, view.mega_open));
        ops.push(class(Part::MegaTrigger, &classes.trigger_active, view.mega_open));
        ops.push(DomOp::Attr {
            part: Part::MegaTrigger,
            name: "aria-expanded",
            value: view.trigger_aria_expanded(),
        });
        ops.push(DomOp::Attr {
            part: Part::MegaPanel,
            name: "aria-hidden",
            value: view.panel_aria_hidden(),
        });
    }
}

fn render_groups(app: &App, ops: &mut Vec<DomOp>) {
    let classes = &app.config().classes;
    let menu = app.menu();
    for (i, group) in menu.groups().iter().enumerate() {
        if !menu.group_has_toggle(i) {
            ops.push(style(Part::MoreToggle(i), "display", Some("none".into())));
            continue;
        }
        ops.push(class(
            Part::MoreGroup(i),
            &classes.group_expanded,
            group.is_expanded(),
        ));
        ops.push(DomOp::Attr {
            part: Part::MoreToggle(i),
            name: "aria-expanded",
            value: group.aria_expanded(),
        });
        ops.push(DomOp::Text {
            part: Part::MoreToggle(i),
            text: group.caption().to_owned(),
        });
    }
}

fn render_accordion(app: &App, heights: &[f64], ops: &mut Vec<DomOp>) {
    let classes = &app.config().classes;
    let accordion = app.accordion();
    for i in 0..accordion.len() {
        ops.push(class(
            Part::AccordionItem(i),
            &classes.accordion_active,
            accordion.is_active(i),
        ));
        let height = heights.get(i).copied().unwrap_or(0.0);
        ops.push(style(
            Part::AccordionBody(i),
            "max-height",
            accordion.body_height(i, height).map(px),
        ));
    }
}

fn render_modals(app: &App, ops: &mut Vec<DomOp>) {
    let modals = app.modals();
    let visible = modals.is_layer_visible();
    ops.push(style(
        Part::ModalLayer,
        "opacity",
        Some(if visible { "1" } else { "0" }.into()),
    ));
    ops.push(style(
        Part::ModalLayer,
        "pointer-events",
        Some(if visible { "all" } else { "none" }.into()),
    ));

    let current = modals.current().map(str::to_owned);
    let inactive = Part::InactiveModals(current.clone());
    ops.push(style(inactive.clone(), "display", Some("none".into())));
    ops.push(style(inactive, "transform", None));
    if let Some(ty) = current {
        ops.push(style(Part::Modal(ty), "display", Some("block".into())));
    }
}

/// Top-section margins for a frame that measured the header.
#[must_use]
pub fn layout_ops(outcome: &FrameOutcome) -> Vec<DomOp> {
    outcome
        .section_offset
        .map(|offset| style(Part::SectionTops, "margin-top", Some(px(offset))))
        .into_iter()
        .collect()
}

/// Body class for a scroll-lock edge.
#[must_use]
pub fn scroll_lock_op(locked: bool, classes: &Classes) -> DomOp {
    class(Part::Body, &classes.no_scroll, locked)
}
