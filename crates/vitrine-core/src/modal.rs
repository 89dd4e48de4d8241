#![forbid(unsafe_code)]

//! Named modal dialogs.
//!
//! Modals live in one overlay layer. At most one is current; opening
//! another replaces it. Closing is two-phase when a tween library is
//! available: the controller enters [`ModalPhase::Closing`], asks the host
//! to slide the panel out, and only hides it and releases the scroll lock
//! when the host reports completion with the matching [`CloseToken`].
//!
//! # Invariants
//!
//! 1. The "modal" scroll lock is held iff the phase is not `Hidden`.
//! 2. `close()` during `Closing` is ignored, so a completion commits once.
//! 3. A completion whose token does not match the in-flight close is
//!    ignored; opening a modal mid-close therefore survives the late
//!    completion of the old one.
//! 4. Unknown modal types never change state.

use crate::config::Tween;
use crate::scroll_lock::{MODAL_LOCK, ScrollLockRegistry};

/// Identifies one out-animation so its completion can be matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CloseToken(u64);

impl CloseToken {
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    #[must_use]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }
}

/// Visibility phase of the modal layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ModalPhase {
    #[default]
    Hidden,
    Open(String),
    /// Slide-out in flight; the modal is still rendered.
    Closing { modal: String, token: CloseToken },
}

/// Animation work the host should hand to the tween library.
#[derive(Debug, Clone, PartialEq)]
pub enum ModalAnimation {
    In {
        modal: String,
        tween: Tween,
    },
    /// On completion, dispatch `FinishModalClose(token)`.
    Out {
        modal: String,
        tween: Tween,
        token: CloseToken,
    },
    /// Kill any tween still running on `modal`.
    Cancel { modal: String },
}

/// Modal layer controller.
#[derive(Debug, Clone)]
pub struct ModalController {
    types: Vec<String>,
    phase: ModalPhase,
    animated: bool,
    tween_in: Tween,
    tween_out: Tween,
    next_token: u64,
    animations: Vec<ModalAnimation>,
}

impl ModalController {
    /// `types` are the `data-type` values present in the layer; `animated`
    /// says whether the tween library is loaded.
    #[must_use]
    pub fn new<I, S>(types: I, animated: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut known: Vec<String> = Vec::new();
        for ty in types {
            let ty = ty.into();
            if !ty.is_empty() && !known.contains(&ty) {
                known.push(ty);
            }
        }
        Self {
            types: known,
            phase: ModalPhase::Hidden,
            animated,
            tween_in: Tween::modal_in(),
            tween_out: Tween::modal_out(),
            next_token: 0,
            animations: Vec::new(),
        }
    }

    /// Override the slide tweens (builder).
    #[must_use]
    pub fn with_tweens(mut self, tween_in: Tween, tween_out: Tween) -> Self {
        self.tween_in = tween_in;
        self.tween_out = tween_out;
        self
    }

    #[must_use]
    pub fn types(&self) -> &[String] {
        &self.types
    }

    #[must_use]
    pub fn knows(&self, ty: &str) -> bool {
        self.types.iter().any(|t| t == ty)
    }

    #[must_use]
    pub fn phase(&self) -> &ModalPhase {
        &self.phase
    }

    /// The modal currently rendered, including one that is sliding out.
    #[must_use]
    pub fn current(&self) -> Option<&str> {
        match &self.phase {
            ModalPhase::Hidden => None,
            ModalPhase::Open(modal) | ModalPhase::Closing { modal, .. } => Some(modal),
        }
    }

    /// Whether the overlay layer is shown and takes pointer input.
    #[must_use]
    pub fn is_layer_visible(&self) -> bool {
        self.phase != ModalPhase::Hidden
    }

    #[must_use]
    pub fn is_closing(&self) -> bool {
        matches!(self.phase, ModalPhase::Closing { .. })
    }

    /// Show modal `ty`, replacing whatever is current.
    ///
    /// Returns `false` (and changes nothing) for an unknown type.
    pub fn open(&mut self, ty: &str, locks: &mut ScrollLockRegistry) -> bool {
        if !self.knows(ty) {
            crate::debug!(modal = ty, "unknown modal type ignored");
            return false;
        }
        if let ModalPhase::Closing { modal, .. } = &self.phase {
            self.animations.push(ModalAnimation::Cancel {
                modal: modal.clone(),
            });
        }
        self.phase = ModalPhase::Open(ty.to_owned());
        locks.lock(MODAL_LOCK);
        if self.animated {
            self.animations.push(ModalAnimation::In {
                modal: ty.to_owned(),
                tween: self.tween_in.clone(),
            });
        }
        crate::debug!(modal = ty, "modal opened");
        true
    }

    /// Hide the current modal, animating it out when possible.
    pub fn close(&mut self, locks: &mut ScrollLockRegistry) {
        match std::mem::take(&mut self.phase) {
            ModalPhase::Open(modal) if self.animated => {
                self.next_token += 1;
                let token = CloseToken(self.next_token);
                self.animations.push(ModalAnimation::Out {
                    modal: modal.clone(),
                    tween: self.tween_out.clone(),
                    token,
                });
                crate::debug!(modal = %modal, token = token.get(), "modal closing");
                self.phase = ModalPhase::Closing { modal, token };
            }
            closing @ ModalPhase::Closing { .. } => {
                self.phase = closing;
            }
            ModalPhase::Open(_) | ModalPhase::Hidden => {
                self.commit_close(locks);
            }
        }
    }

    /// The host finished the slide-out started with `token`.
    pub fn finish_close(&mut self, token: CloseToken, locks: &mut ScrollLockRegistry) {
        match &self.phase {
            ModalPhase::Closing { token: pending, .. } if *pending == token => {
                self.commit_close(locks);
            }
            _ => {
                crate::debug!(token = token.get(), "stale modal close completion ignored");
            }
        }
    }

    /// Escape pressed: close only while the layer is interactive.
    pub fn on_escape(&mut self, locks: &mut ScrollLockRegistry) {
        if self.is_layer_visible() {
            self.close(locks);
        }
    }

    fn commit_close(&mut self, locks: &mut ScrollLockRegistry) {
        self.phase = ModalPhase::Hidden;
        locks.unlock(MODAL_LOCK);
        crate::debug!("modal layer hidden");
    }

    /// Take queued animation requests.
    pub fn drain_animations(&mut self) -> std::vec::Drain<'_, ModalAnimation> {
        self.animations.drain(..)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller(animated: bool) -> (ModalController, ScrollLockRegistry) {
        (
            ModalController::new(["callback", "order"], animated),
            ScrollLockRegistry::new(),
        )
    }

    fn out_token(modals: &mut ModalController) -> CloseToken {
        modals
            .drain_animations()
            .find_map(|a| match a {
                ModalAnimation::Out { token, .. } => Some(token),
                _ => None,
            })
            .expect("out animation queued")
    }

    #[test]
    fn unknown_type_is_noop() {
        let (mut modals, mut locks) = controller(true);
        assert!(!modals.open("missing", &mut locks));
        assert!(!locks.is_locked());
        assert_eq!(modals.drain_animations().count(), 0);
    }

    #[test]
    fn open_locks_and_animates_in() {
        let (mut modals, mut locks) = controller(true);
        assert!(modals.open("callback", &mut locks));
        assert_eq!(modals.current(), Some("callback"));
        assert!(locks.has(MODAL_LOCK));
        let anims: Vec<_> = modals.drain_animations().collect();
        assert_eq!(
            anims,
            vec![ModalAnimation::In {
                modal: "callback".into(),
                tween: Tween::modal_in(),
            }]
        );
    }

    #[test]
    fn open_replaces_current_with_single_lock() {
        let (mut modals, mut locks) = controller(false);
        modals.open("callback", &mut locks);
        modals.open("order", &mut locks);
        assert_eq!(modals.current(), Some("order"));
        assert_eq!(locks.len(), 1);
    }

    #[test]
    fn close_without_animation_is_immediate() {
        let (mut modals, mut locks) = controller(false);
        modals.open("order", &mut locks);
        modals.close(&mut locks);
        assert_eq!(modals.phase(), &ModalPhase::Hidden);
        assert!(!locks.is_locked());
    }

    #[test]
    fn animated_close_commits_on_completion() {
        let (mut modals, mut locks) = controller(true);
        modals.open("order", &mut locks);
        modals.close(&mut locks);
        assert!(modals.is_closing());
        assert_eq!(modals.current(), Some("order"));
        assert!(locks.is_locked(), "lock held until the slide-out ends");

        let token = out_token(&mut modals);
        modals.finish_close(token, &mut locks);
        assert_eq!(modals.current(), None);
        assert!(!locks.is_locked());
    }

    #[test]
    fn double_close_commits_once() {
        let (mut modals, mut locks) = controller(true);
        modals.open("order", &mut locks);
        modals.close(&mut locks);
        modals.close(&mut locks);
        let tokens: Vec<_> = modals
            .drain_animations()
            .filter(|a| matches!(a, ModalAnimation::Out { .. }))
            .collect();
        assert_eq!(tokens.len(), 1);
    }

    #[test]
    fn reopen_during_close_survives_stale_completion() {
        let (mut modals, mut locks) = controller(true);
        modals.open("callback", &mut locks);
        modals.close(&mut locks);
        let token = out_token(&mut modals);

        modals.open("order", &mut locks);
        let anims: Vec<_> = modals.drain_animations().collect();
        assert!(anims.contains(&ModalAnimation::Cancel {
            modal: "callback".into()
        }));

        modals.finish_close(token, &mut locks);
        assert_eq!(modals.current(), Some("order"));
        assert!(locks.has(MODAL_LOCK));
    }

    #[test]
    fn close_when_hidden_is_noop() {
        let (mut modals, mut locks) = controller(true);
        locks.lock("mobile");
        let _ = locks.drain_transitions().count();
        modals.close(&mut locks);
        assert_eq!(locks.len(), 1);
        assert_eq!(locks.drain_transitions().count(), 0);
        assert_eq!(modals.drain_animations().count(), 0);
    }

    #[test]
    fn escape_only_when_visible() {
        let (mut modals, mut locks) = controller(false);
        modals.on_escape(&mut locks);
        assert_eq!(modals.phase(), &ModalPhase::Hidden);
        modals.open("callback", &mut locks);
        modals.on_escape(&mut locks);
        assert_eq!(modals.phase(), &ModalPhase::Hidden);
    }

    #[test]
    fn duplicate_and_empty_types_collapse() {
        let modals = ModalController::new(["a", "", "a", "b"], false);
        assert_eq!(modals.types(), ["a".to_string(), "b".to_string()]);
    }
}
