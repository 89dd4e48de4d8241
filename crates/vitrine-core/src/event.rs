#![forbid(unsafe_code)]

//! Host-facing input events.
//!
//! The host classifies raw DOM events before handing them over: a document
//! click becomes a [`ClickRegion`] bitset describing which landmarks contain
//! the target, a keydown becomes a [`Key`]. This keeps selector matching
//! and `Node::contains` calls on the host side.

use bitflags::bitflags;

bitflags! {
    /// Landmarks containing the target of a document-level click.
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ClickRegion: u8 {
        /// Inside the site header container.
        const HEADER = 0b0001;
        /// Inside the mobile navigation drawer.
        const NAV    = 0b0010;
        /// On (or inside) the burger control.
        const BURGER = 0b0100;
    }
}

/// Keys the controllers react to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    Escape,
    Other(String),
}

impl Key {
    /// Normalize a DOM `KeyboardEvent.key` value.
    #[must_use]
    pub fn from_dom_key(key: &str) -> Self {
        match key {
            "Escape" | "Esc" => Self::Escape,
            other => Self::Other(other.to_owned()),
        }
    }
}

/// Layout viewport size in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1920.0, 1080.0)
    }
}

/// Window/document level events pushed by the host.
#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    /// A click that bubbled to the document.
    Click(ClickRegion),
    /// A keydown on the window.
    Key(Key),
    /// The window scrolled to `y`.
    Scroll { y: f64 },
    /// The window was resized.
    Resize(Viewport),
}
