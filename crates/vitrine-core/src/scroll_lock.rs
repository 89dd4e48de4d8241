#![forbid(unsafe_code)]

//! Aggregated page scroll suppression.
//!
//! Several overlays (mobile drawer, mega-menu, modal) may want the page to
//! stop scrolling at the same time. [`ScrollLockRegistry`] keeps the set of
//! active reasons and reports an edge only when the set flips between empty
//! and non-empty.
//!
//! # Set semantics
//!
//! Keys behave like set members, not reference counts: locking `"modal"`
//! twice and unlocking it once leaves the page unlocked. Callers must pair
//! each logical open with exactly one unlock.
//!
//! # Invariants
//!
//! 1. `is_locked()` is true iff at least one key is active.
//! 2. A [`ScrollState::Locked`] edge is queued only on an empty to non-empty
//!    change; [`ScrollState::Unlocked`] only on non-empty to empty, or on
//!    every `reset()`.
//! 3. Empty keys are ignored.

use std::collections::BTreeSet;

/// Lock key held while the mobile drawer is open.
pub const MOBILE_LOCK: &str = "mobile";
/// Lock key held while the mega-menu is open.
pub const MEGA_LOCK: &str = "mega";
/// Lock key held while a modal is visible.
pub const MODAL_LOCK: &str = "modal";

/// Page scroll state the host should apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScrollState {
    /// Block body scroll and pause smooth scrolling.
    Locked,
    /// Restore body scroll and resume smooth scrolling.
    Unlocked,
}

/// Set of active scroll-lock reasons.
#[derive(Debug, Clone, Default)]
pub struct ScrollLockRegistry {
    keys: BTreeSet<String>,
    transitions: Vec<ScrollState>,
}

impl ScrollLockRegistry {
    /// Create an empty (unlocked) registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `key` to the active set.
    pub fn lock(&mut self, key: &str) {
        if key.is_empty() {
            return;
        }
        let was_empty = self.keys.is_empty();
        if self.keys.insert(key.to_owned()) && was_empty {
            crate::debug!(key = key, "scroll locked");
            self.transitions.push(ScrollState::Locked);
        }
    }

    /// Remove `key` from the active set, however many times it was locked.
    pub fn unlock(&mut self, key: &str) {
        if key.is_empty() {
            return;
        }
        if self.keys.remove(key) && self.keys.is_empty() {
            crate::debug!(key = key, "scroll unlocked");
            self.transitions.push(ScrollState::Unlocked);
        }
    }

    /// Drop every key and unlock unconditionally.
    pub fn reset(&mut self) {
        self.keys.clear();
        self.transitions.push(ScrollState::Unlocked);
    }

    /// Whether `key` is currently active.
    #[must_use]
    pub fn has(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    /// Whether page scroll is currently suppressed.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        !self.keys.is_empty()
    }

    /// Number of distinct active keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether no key is active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// The state implied by the current key set.
    #[must_use]
    pub fn state(&self) -> ScrollState {
        if self.is_locked() {
            ScrollState::Locked
        } else {
            ScrollState::Unlocked
        }
    }

    /// Take the queued edges. The queue is empty afterwards.
    pub fn drain_transitions(&mut self) -> std::vec::Drain<'_, ScrollState> {
        self.transitions.drain(..)
    }
}
