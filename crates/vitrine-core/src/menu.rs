#![forbid(unsafe_code)]

//! Header navigation: mega-menu and mobile drawer.
//!
//! # State machine
//!
//! ```text
//!   state        toggle_mega   toggle_mobile   escape    scroll    outside click
//!   Closed       MegaOpen      MobileOpen      -         -         -
//!   MobileOpen   MegaOpen      Closed          -         Closed    Closed (not nav/burger)
//!   MegaOpen     Closed        Closed          Closed    -         Closed (not header)
//! ```
//!
//! The burger closes whichever menu is open. Escape only closes the
//! mega-menu; the drawer closes on scroll or an outside click instead.
//!
//! # Invariants
//!
//! 1. At most one of the drawer and the mega-menu is open.
//! 2. The "mobile" lock is held iff the state is `MobileOpen`, and the
//!    "mega" lock iff it is `MegaOpen`.
//! 3. A menu whose markup is missing never opens.

use crate::event::ClickRegion;
use crate::scroll_lock::{MEGA_LOCK, MOBILE_LOCK, ScrollLockRegistry};

/// Which header overlay is open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum MenuState {
    #[default]
    Closed,
    MobileOpen,
    MegaOpen,
}

/// Which menus the page markup supports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MenuFeatures {
    /// Burger control and drawer both present.
    pub mobile: bool,
    /// Header, mega trigger and mega panel all present.
    pub mega: bool,
}

impl MenuFeatures {
    #[must_use]
    pub const fn all() -> Self {
        Self {
            mobile: true,
            mega: true,
        }
    }
}

/// Derived flags the host mirrors onto the markup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MenuView {
    pub mobile_open: bool,
    pub mega_open: bool,
    /// Burger shows its "active" (close) look whenever any menu is open.
    pub burger_active: bool,
}

impl MenuView {
    /// `aria-expanded` value for the mega trigger.
    #[must_use]
    pub fn trigger_aria_expanded(&self) -> &'static str {
        if self.mega_open { "true" } else { "false" }
    }

    /// `aria-hidden` value for the mega panel.
    #[must_use]
    pub fn panel_aria_hidden(&self) -> &'static str {
        if self.mega_open { "false" } else { "true" }
    }
}

/// One "show more" group inside the mega panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowMoreGroup {
    items: usize,
    expanded: bool,
    more_caption: String,
    less_caption: String,
}

impl ShowMoreGroup {
    #[must_use]
    pub fn new(
        items: usize,
        more_caption: impl Into<String>,
        less_caption: impl Into<String>,
    ) -> Self {
        Self {
            items,
            expanded: false,
            more_caption: more_caption.into(),
            less_caption: less_caption.into(),
        }
    }

    #[must_use]
    pub fn items(&self) -> usize {
        self.items
    }

    #[must_use]
    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// Caption the toggle should currently show.
    #[must_use]
    pub fn caption(&self) -> &str {
        if self.expanded {
            &self.less_caption
        } else {
            &self.more_caption
        }
    }

    #[must_use]
    pub fn aria_expanded(&self) -> &'static str {
        if self.expanded { "true" } else { "false" }
    }
}

/// Mega-menu / mobile drawer controller.
#[derive(Debug, Clone)]
pub struct MenuController {
    state: MenuState,
    features: MenuFeatures,
    groups: Vec<ShowMoreGroup>,
    show_more_threshold: usize,
}

impl MenuController {
    #[must_use]
    pub fn new(features: MenuFeatures) -> Self {
        Self {
            state: MenuState::Closed,
            features,
            groups: Vec::new(),
            show_more_threshold: 3,
        }
    }

    /// Register the mega panel's item groups (builder).
    ///
    /// Only groups longer than `threshold` are interactive.
    #[must_use]
    pub fn with_groups(mut self, groups: Vec<ShowMoreGroup>, threshold: usize) -> Self {
        self.groups = groups;
        self.show_more_threshold = threshold;
        self
    }

    #[must_use]
    pub fn state(&self) -> MenuState {
        self.state
    }

    #[must_use]
    pub fn features(&self) -> MenuFeatures {
        self.features
    }

    #[must_use]
    pub fn is_mobile_open(&self) -> bool {
        self.state == MenuState::MobileOpen
    }

    #[must_use]
    pub fn is_mega_open(&self) -> bool {
        self.state == MenuState::MegaOpen
    }

    #[must_use]
    pub fn is_any_open(&self) -> bool {
        self.state != MenuState::Closed
    }

    #[must_use]
    pub fn view(&self) -> MenuView {
        MenuView {
            mobile_open: self.is_mobile_open(),
            mega_open: self.is_mega_open(),
            burger_active: self.is_any_open(),
        }
    }

    fn close_mobile(&mut self, locks: &mut ScrollLockRegistry) {
        if !self.features.mobile {
            return;
        }
        if self.state == MenuState::MobileOpen {
            self.state = MenuState::Closed;
            crate::debug!("mobile drawer closed");
        }
        locks.unlock(MOBILE_LOCK);
    }

    fn close_mega(&mut self, locks: &mut ScrollLockRegistry) {
        if !self.features.mega {
            return;
        }
        if self.state == MenuState::MegaOpen {
            self.state = MenuState::Closed;
            crate::debug!("mega-menu closed");
        }
        locks.unlock(MEGA_LOCK);
    }

    /// Mega trigger clicked.
    pub fn toggle_mega(&mut self, locks: &mut ScrollLockRegistry) {
        if !self.features.mega {
            return;
        }
        if self.is_mega_open() {
            self.close_mega(locks);
            return;
        }
        self.close_mobile(locks);
        self.state = MenuState::MegaOpen;
        locks.lock(MEGA_LOCK);
        crate::debug!("mega-menu opened");
    }

    /// Burger clicked: close whatever is open, otherwise open the drawer.
    pub fn toggle_mobile(&mut self, locks: &mut ScrollLockRegistry) {
        if !self.features.mobile {
            return;
        }
        if self.is_any_open() {
            self.close_all(locks);
            return;
        }
        self.state = MenuState::MobileOpen;
        locks.lock(MOBILE_LOCK);
        crate::debug!("mobile drawer opened");
    }

    /// Close both menus.
    pub fn close_all(&mut self, locks: &mut ScrollLockRegistry) {
        self.close_mega(locks);
        self.close_mobile(locks);
    }

    /// A click reached the document.
    pub fn on_document_click(&mut self, region: ClickRegion, locks: &mut ScrollLockRegistry) {
        match self.state {
            MenuState::MegaOpen if !region.contains(ClickRegion::HEADER) => self.close_mega(locks),
            MenuState::MobileOpen
                if !region.intersects(ClickRegion::NAV | ClickRegion::BURGER) =>
            {
                self.close_mobile(locks);
            }
            _ => {}
        }
    }

    /// Escape pressed. Leaves an open drawer alone.
    pub fn on_escape(&mut self, locks: &mut ScrollLockRegistry) {
        self.close_mega(locks);
    }

    /// The page scrolled. Dismisses the drawer only.
    pub fn on_scroll(&mut self, locks: &mut ScrollLockRegistry) {
        if self.is_mobile_open() {
            self.close_mobile(locks);
        }
    }

    #[must_use]
    pub fn groups(&self) -> &[ShowMoreGroup] {
        &self.groups
    }

    /// Whether group `index` shows its toggle at all.
    #[must_use]
    pub fn group_has_toggle(&self, index: usize) -> bool {
        self.groups
            .get(index)
            .is_some_and(|g| g.items > self.show_more_threshold)
    }

    /// Flip group `index`. Returns the new expanded flag, or `None` when the
    /// group does not exist or is too short to have a toggle.
    pub fn toggle_group(&mut self, index: usize) -> Option<bool> {
        if !self.group_has_toggle(index) {
            return None;
        }
        let group = self.groups.get_mut(index)?;
        group.expanded = !group.expanded;
        Some(group.expanded)
    }
}
