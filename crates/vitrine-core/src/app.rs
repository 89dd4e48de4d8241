#![forbid(unsafe_code)]

//! Application context and command dispatch.
//!
//! [`App`] owns every controller together with the shared scroll-lock
//! registry and the spacing multiplier, so nothing lives in ambient global
//! state. The host talks to it in three ways:
//!
//! - element-level listeners dispatch a typed [`Command`];
//! - window/document listeners push a [`HostEvent`];
//! - an animation-frame callback calls [`App::on_frame`] when
//!   [`Handled::request_frame`] asked for one.
//!
//! Each of these reports a [`Repaint`] naming the parts of the view that
//! changed; the host re-renders only those and applies the [`Effect`]s
//! drained with [`App::drain_effects`].
//!
//! # Example
//!
//! ```
//! use vitrine_core::app::{App, Command, Effect, HostCapabilities, PageMarkup};
//! use vitrine_core::config::SiteConfig;
//! use vitrine_core::event::{HostEvent, Key, Viewport};
//! use vitrine_core::scroll_lock::ScrollState;
//!
//! let markup = PageMarkup {
//!     modal_types: vec!["callback".into()],
//!     ..PageMarkup::default()
//! };
//! let mut app = App::new(
//!     SiteConfig::default(),
//!     markup,
//!     HostCapabilities::default(),
//!     Viewport::new(1440.0, 900.0),
//! );
//!
//! app.dispatch(Command::OpenModal("callback".into()));
//! assert_eq!(app.drain_effects(), vec![Effect::Scroll(ScrollState::Locked)]);
//!
//! app.handle(HostEvent::Key(Key::Escape));
//! assert_eq!(app.modals().current(), None);
//! assert_eq!(app.drain_effects(), vec![Effect::Scroll(ScrollState::Unlocked)]);
//! ```

use bitflags::bitflags;

use crate::accordion::AccordionController;
use crate::carousel::{CarouselSpec, storefront_carousels};
use crate::config::SiteConfig;
use crate::event::{HostEvent, Key, Viewport};
use crate::layout::{self, Multiplier};
use crate::mask::PhoneMask;
use crate::menu::{MenuController, MenuFeatures, MenuView, ShowMoreGroup};
use crate::modal::{CloseToken, ModalAnimation, ModalController, ModalPhase};
use crate::scroll_lock::{ScrollLockRegistry, ScrollState};
use crate::throttle::FrameThrottle;

/// Typed user intents dispatched by element-level listeners.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    ToggleMega,
    ToggleMobile,
    CloseMenus,
    OpenModal(String),
    CloseModal,
    /// The slide-out started for this token has completed.
    FinishModalClose(CloseToken),
    ToggleAccordion(usize),
    ToggleMoreGroup(usize),
}

impl Command {
    /// Whether the triggering DOM event must have `preventDefault()` called.
    #[must_use]
    pub fn prevents_default(&self) -> bool {
        matches!(
            self,
            Self::ToggleMega | Self::OpenModal(_) | Self::ToggleMoreGroup(_)
        )
    }

    /// Whether the triggering DOM event must not bubble to the document.
    #[must_use]
    pub fn stops_propagation(&self) -> bool {
        matches!(
            self,
            Self::ToggleMega | Self::ToggleMobile | Self::ToggleMoreGroup(_)
        )
    }
}

/// Side effects for external collaborators.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Toggle the body scroll class and stop/start smooth scrolling.
    Scroll(ScrollState),
    /// Drive the tween library.
    Modal(ModalAnimation),
    /// Ask every live carousel to re-measure.
    UpdateCarousels,
}

/// External libraries the host bridges [`Effect`]s to.
///
/// Effects are routed after they have been drained, so the [`App`] is not
/// mid-update while a collaborator runs. A collaborator may dispatch back
/// into it, as long as the host has released its own borrow first: a
/// slide-out that cannot start reports [`Command::FinishModalClose`] right
/// away, one that does start reports it on completion.
pub trait Collaborators {
    /// Block or release page scroll (body class plus smooth-scroll stop/start).
    fn set_scroll_locked(&mut self, locked: bool);

    fn animate_modal(&mut self, animation: ModalAnimation);

    fn update_carousels(&mut self);
}

impl Effect {
    /// Route this effect to the matching collaborator.
    pub fn apply_to<C: Collaborators + ?Sized>(self, collaborators: &mut C) {
        match self {
            Self::Scroll(state) => collaborators.set_scroll_locked(state == ScrollState::Locked),
            Self::Modal(animation) => collaborators.animate_modal(animation),
            Self::UpdateCarousels => collaborators.update_carousels(),
        }
    }
}

/// Static description of the page the host found at boot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageMarkup {
    pub menu: MenuFeatures,
    /// Mega panel groups: child count and optional caption overrides.
    pub show_more_groups: Vec<GroupMarkup>,
    pub accordion_panels: usize,
    /// Panel rendered expanded by the server, if any.
    pub accordion_active: Option<usize>,
    pub modal_types: Vec<String>,
    pub section_tops: usize,
}

/// One mega panel group as found in markup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupMarkup {
    pub items: usize,
    pub more_caption: Option<String>,
    pub less_caption: Option<String>,
}

/// Third-party libraries the host detected on the page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HostCapabilities {
    pub tweens: bool,
}

bitflags! {
    /// Parts of the view whose state changed and must be re-rendered.
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Repaint: u8 {
        /// Header "scrolled" class.
        const HEADER    = 0b0_0001;
        /// Drawer, mega panel and burger flags.
        const MENU      = 0b0_0010;
        /// Show-more groups.
        const GROUPS    = 0b0_0100;
        /// Accordion classes and body heights.
        const ACCORDION = 0b0_1000;
        /// Modal layer and panels.
        const MODALS    = 0b1_0000;
    }
}

/// What the host must do after handing over an event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[must_use]
pub struct Handled {
    /// Schedule an animation-frame callback that calls [`App::on_frame`].
    pub request_frame: bool,
    pub repaint: Repaint,
}

/// Layout results of one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameOutcome {
    /// New top margin for every top section, when it should be (re)applied.
    pub section_offset: Option<f64>,
    /// New header "scrolled" flag, when scroll was processed.
    pub header_scrolled: Option<bool>,
    /// Whether the multiplier was recomputed this frame.
    pub resized: bool,
    pub repaint: Repaint,
}

/// Everything the view reads, captured to tell what an update changed.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ViewState {
    header_scrolled: bool,
    menu: MenuView,
    groups: Vec<bool>,
    accordion: Option<usize>,
    modal: ModalPhase,
}

impl ViewState {
    fn diff(&self, after: &Self) -> Repaint {
        let mut repaint = Repaint::empty();
        repaint.set(Repaint::HEADER, self.header_scrolled != after.header_scrolled);
        repaint.set(Repaint::MENU, self.menu != after.menu);
        repaint.set(Repaint::GROUPS, self.groups != after.groups);
        repaint.set(Repaint::ACCORDION, self.accordion != after.accordion);
        repaint.set(Repaint::MODALS, self.modal != after.modal);
        repaint
    }
}

/// Application context owned by the boot routine.
#[derive(Debug, Clone)]
pub struct App {
    config: SiteConfig,
    markup: PageMarkup,
    locks: ScrollLockRegistry,
    menu: MenuController,
    modals: ModalController,
    accordion: AccordionController,
    mask: PhoneMask,
    viewport: Viewport,
    multiplier: Multiplier,
    header_scrolled: bool,
    throttle: FrameThrottle,
    effects: Vec<Effect>,
}

impl App {
    #[must_use]
    pub fn new(
        config: SiteConfig,
        markup: PageMarkup,
        caps: HostCapabilities,
        viewport: Viewport,
    ) -> Self {
        let groups = markup
            .show_more_groups
            .iter()
            .map(|g| {
                ShowMoreGroup::new(
                    g.items,
                    g.more_caption
                        .clone()
                        .unwrap_or_else(|| config.captions.show_more.clone()),
                    g.less_caption
                        .clone()
                        .unwrap_or_else(|| config.captions.show_less.clone()),
                )
            })
            .collect();
        let menu = MenuController::new(markup.menu).with_groups(groups, config.show_more_threshold);
        let modals = ModalController::new(markup.modal_types.iter().cloned(), caps.tweens)
            .with_tweens(config.modal_in.clone(), config.modal_out.clone());
        let accordion =
            AccordionController::new(markup.accordion_panels).with_active(markup.accordion_active);
        let mask = PhoneMask::new(&config.mask_template);

        crate::info!(
            mobile = markup.menu.mobile,
            mega = markup.menu.mega,
            modals = markup.modal_types.len(),
            accordion = markup.accordion_panels,
            "app booted"
        );

        Self {
            locks: ScrollLockRegistry::new(),
            menu,
            modals,
            accordion,
            mask,
            viewport,
            multiplier: Multiplier::for_viewport(viewport),
            header_scrolled: false,
            throttle: FrameThrottle::new(),
            effects: Vec::new(),
            config,
            markup,
        }
    }

    #[must_use]
    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    #[must_use]
    pub fn markup(&self) -> &PageMarkup {
        &self.markup
    }

    #[must_use]
    pub fn locks(&self) -> &ScrollLockRegistry {
        &self.locks
    }

    #[must_use]
    pub fn menu(&self) -> &MenuController {
        &self.menu
    }

    #[must_use]
    pub fn modals(&self) -> &ModalController {
        &self.modals
    }

    #[must_use]
    pub fn accordion(&self) -> &AccordionController {
        &self.accordion
    }

    #[must_use]
    pub fn mask(&self) -> &PhoneMask {
        &self.mask
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn multiplier(&self) -> Multiplier {
        self.multiplier
    }

    #[must_use]
    pub fn header_scrolled(&self) -> bool {
        self.header_scrolled
    }

    /// Carousel presets at the current multiplier.
    #[must_use]
    pub fn carousels(&self) -> Vec<CarouselSpec> {
        storefront_carousels(self.multiplier)
    }

    fn view_state(&self) -> ViewState {
        ViewState {
            header_scrolled: self.header_scrolled,
            menu: self.menu.view(),
            groups: self.menu.groups().iter().map(ShowMoreGroup::is_expanded).collect(),
            accordion: self.accordion.active(),
            modal: self.modals.phase().clone(),
        }
    }

    /// Apply a typed command, returning the parts of the view it changed.
    pub fn dispatch(&mut self, command: Command) -> Repaint {
        let span = crate::debug_span!("vitrine.dispatch", command = ?command);
        let _guard = span.enter();
        let before = self.view_state();
        match command {
            Command::ToggleMega => self.menu.toggle_mega(&mut self.locks),
            Command::ToggleMobile => self.menu.toggle_mobile(&mut self.locks),
            Command::CloseMenus => self.menu.close_all(&mut self.locks),
            Command::OpenModal(ty) => {
                self.modals.open(&ty, &mut self.locks);
            }
            Command::CloseModal => self.modals.close(&mut self.locks),
            Command::FinishModalClose(token) => self.modals.finish_close(token, &mut self.locks),
            Command::ToggleAccordion(index) => self.accordion.toggle(index),
            Command::ToggleMoreGroup(index) => {
                self.menu.toggle_group(index);
            }
        }
        before.diff(&self.view_state())
    }

    /// Handle a window/document level event.
    pub fn handle(&mut self, event: HostEvent) -> Handled {
        let before = self.view_state();
        let request_frame = match event {
            HostEvent::Click(region) => {
                self.menu.on_document_click(region, &mut self.locks);
                false
            }
            HostEvent::Key(Key::Escape) => {
                self.menu.on_escape(&mut self.locks);
                self.modals.on_escape(&mut self.locks);
                false
            }
            HostEvent::Key(Key::Other(_)) => false,
            HostEvent::Scroll { y } => {
                self.menu.on_scroll(&mut self.locks);
                self.throttle.push_scroll(y)
            }
            HostEvent::Resize(viewport) => self.throttle.push_resize(viewport),
        };
        Handled {
            request_frame,
            repaint: before.diff(&self.view_state()),
        }
    }

    /// Process everything coalesced since the last frame.
    ///
    /// `header_height` is the header's rendered height measured by the host
    /// in this frame (`None` without a header).
    pub fn on_frame(&mut self, header_height: Option<f64>) -> FrameOutcome {
        let batch = self.throttle.flush();
        let mut outcome = FrameOutcome::default();

        if let Some(viewport) = batch.resize {
            self.viewport = viewport;
            self.multiplier = Multiplier::for_viewport(viewport);
            outcome.resized = true;
            outcome.section_offset =
                layout::section_offset(header_height, self.markup.section_tops);
            self.effects.push(Effect::UpdateCarousels);
            crate::trace!(
                width = viewport.width,
                height = viewport.height,
                multiplier = self.multiplier.get(),
                "frame reflow"
            );
        }
        if let Some(y) = batch.scroll {
            let was = self.header_scrolled;
            let now = self.set_scroll_y(y);
            outcome.header_scrolled = Some(now);
            if now != was {
                outcome.repaint |= Repaint::HEADER;
            }
        }
        outcome
    }

    /// Initial layout pass on page load. Asks for a full render.
    pub fn initial_layout(&mut self, scroll_y: f64, header_height: Option<f64>) -> FrameOutcome {
        FrameOutcome {
            section_offset: layout::section_offset(header_height, self.markup.section_tops),
            header_scrolled: Some(self.set_scroll_y(scroll_y)),
            resized: false,
            repaint: Repaint::all(),
        }
    }

    fn set_scroll_y(&mut self, y: f64) -> bool {
        self.header_scrolled = layout::header_scrolled(y, self.config.header_scroll_threshold);
        self.header_scrolled
    }

    /// Take pending side effects, oldest first.
    pub fn drain_effects(&mut self) -> Vec<Effect> {
        let mut out: Vec<Effect> = self.locks.drain_transitions().map(Effect::Scroll).collect();
        out.extend(self.modals.drain_animations().map(Effect::Modal));
        out.append(&mut self.effects);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::ClickRegion;
    use crate::menu::MenuState;
    use crate::scroll_lock::MODAL_LOCK;
    use pretty_assertions::assert_eq;

    fn markup() -> PageMarkup {
        PageMarkup {
            menu: MenuFeatures::all(),
            show_more_groups: vec![
                GroupMarkup {
                    items: 5,
                    more_caption: Some("More".into()),
                    less_caption: None,
                },
                GroupMarkup {
                    items: 2,
                    ..GroupMarkup::default()
                },
            ],
            accordion_panels: 3,
            accordion_active: None,
            modal_types: vec!["callback".into(), "order".into()],
            section_tops: 2,
        }
    }

    fn app(tweens: bool) -> App {
        App::new(
            SiteConfig::default(),
            markup(),
            HostCapabilities { tweens },
            Viewport::new(1920.0, 1080.0),
        )
    }

    #[test]
    fn propagation_rules() {
        assert!(Command::ToggleMega.prevents_default());
        assert!(Command::ToggleMega.stops_propagation());
        assert!(!Command::ToggleMobile.prevents_default());
        assert!(Command::ToggleMobile.stops_propagation());
        assert!(Command::OpenModal("x".into()).prevents_default());
        assert!(!Command::OpenModal("x".into()).stops_propagation());
        assert!(!Command::ToggleAccordion(0).stops_propagation());
    }

    #[test]
    fn menu_and_modal_share_one_registry() {
        let mut app = app(false);
        app.dispatch(Command::ToggleMobile);
        app.dispatch(Command::OpenModal("order".into()));
        assert_eq!(app.locks().len(), 2);
        app.dispatch(Command::CloseModal);
        assert!(app.locks().is_locked(), "drawer still holds its lock");
        app.dispatch(Command::ToggleMobile);
        assert_eq!(
            app.drain_effects(),
            vec![
                Effect::Scroll(ScrollState::Locked),
                Effect::Scroll(ScrollState::Unlocked)
            ]
        );
    }

    #[test]
    fn escape_closes_mega_and_modal_but_not_drawer() {
        let mut app = app(false);
        app.dispatch(Command::ToggleMega);
        app.dispatch(Command::OpenModal("callback".into()));
        let _ = app.handle(HostEvent::Key(Key::Escape));
        assert_eq!(app.menu().state(), MenuState::Closed);
        assert_eq!(app.modals().current(), None);

        app.dispatch(Command::ToggleMobile);
        let _ = app.handle(HostEvent::Key(Key::Escape));
        assert_eq!(app.menu().state(), MenuState::MobileOpen);
    }

    #[test]
    fn scroll_closes_drawer_immediately_and_throttles_header() {
        let mut app = app(false);
        app.dispatch(Command::ToggleMobile);
        let first = app.handle(HostEvent::Scroll { y: 10.0 });
        let second = app.handle(HostEvent::Scroll { y: 120.0 });
        assert!(first.request_frame);
        assert!(!second.request_frame);
        assert_eq!(app.menu().state(), MenuState::Closed);

        let frame = app.on_frame(Some(90.0));
        assert_eq!(frame.header_scrolled, Some(true));
        assert_eq!(frame.section_offset, None, "no resize, no reflow");
    }

    #[test]
    fn resize_recomputes_multiplier_before_carousels() {
        let mut app = app(false);
        let _ = app.handle(HostEvent::Resize(Viewport::new(1000.0, 700.0)));
        let _ = app.handle(HostEvent::Resize(Viewport::new(960.0, 640.0)));
        let frame = app.on_frame(Some(72.0));
        assert!(frame.resized);
        assert_eq!(frame.section_offset, Some(72.0));

        let m = app.multiplier().get();
        assert_eq!(m, 640.0 / 768.0);
        assert_eq!(app.carousels()[0].options.space_between, 16.0 * m);
        assert_eq!(app.drain_effects(), vec![Effect::UpdateCarousels]);
    }

    #[test]
    fn outside_click_closes_mega() {
        let mut app = app(false);
        app.dispatch(Command::ToggleMega);
        let _ = app.handle(HostEvent::Click(ClickRegion::HEADER));
        assert!(app.menu().is_mega_open());
        let _ = app.handle(HostEvent::Click(ClickRegion::empty()));
        assert!(!app.menu().is_mega_open());
    }

    #[test]
    fn animated_close_round_trip_through_effects() {
        let mut app = app(true);
        app.dispatch(Command::OpenModal("callback".into()));
        let _ = app.drain_effects();
        app.dispatch(Command::CloseModal);
        let token = app
            .drain_effects()
            .into_iter()
            .find_map(|e| match e {
                Effect::Modal(ModalAnimation::Out { token, .. }) => Some(token),
                _ => None,
            })
            .unwrap();
        assert!(app.locks().has(MODAL_LOCK));
        app.dispatch(Command::FinishModalClose(token));
        assert!(!app.locks().has(MODAL_LOCK));
        assert_eq!(
            app.drain_effects(),
            vec![Effect::Scroll(ScrollState::Unlocked)]
        );
    }

    #[test]
    fn group_captions_fall_back_to_config() {
        let mut app = app(false);
        assert_eq!(app.menu().groups()[0].caption(), "More");
        app.dispatch(Command::ToggleMoreGroup(0));
        assert_eq!(app.menu().groups()[0].caption(), "Свернуть");
        app.dispatch(Command::ToggleMoreGroup(1));
        assert!(!app.menu().groups()[1].is_expanded());
    }

    #[derive(Default)]
    struct Recorder {
        calls: Vec<String>,
    }

    impl Collaborators for Recorder {
        fn set_scroll_locked(&mut self, locked: bool) {
            self.calls.push(format!("lock:{locked}"));
        }

        fn animate_modal(&mut self, animation: ModalAnimation) {
            let name = match animation {
                ModalAnimation::In { modal, .. } => format!("in:{modal}"),
                ModalAnimation::Out { modal, .. } => format!("out:{modal}"),
                ModalAnimation::Cancel { modal } => format!("cancel:{modal}"),
            };
            self.calls.push(name);
        }

        fn update_carousels(&mut self) {
            self.calls.push("update".into());
        }
    }

    #[test]
    fn effects_route_to_collaborators() {
        let mut app = app(true);
        app.dispatch(Command::OpenModal("callback".into()));
        app.dispatch(Command::CloseModal);
        app.dispatch(Command::OpenModal("order".into()));
        let _ = app.handle(HostEvent::Resize(Viewport::new(800.0, 600.0)));
        let _ = app.on_frame(None);

        let mut recorder = Recorder::default();
        for effect in app.drain_effects() {
            effect.apply_to(&mut recorder);
        }
        assert_eq!(
            recorder.calls,
            vec![
                "lock:true",
                "in:callback",
                "out:callback",
                "cancel:callback",
                "in:order",
                "update"
            ]
        );
    }

    #[test]
    fn repaint_names_only_what_changed() {
        let mut app = app(true);
        assert_eq!(app.dispatch(Command::ToggleMega), Repaint::MENU);
        assert_eq!(app.dispatch(Command::ToggleMoreGroup(0)), Repaint::GROUPS);
        assert_eq!(app.dispatch(Command::ToggleMoreGroup(1)), Repaint::empty());
        assert_eq!(app.dispatch(Command::ToggleAccordion(2)), Repaint::ACCORDION);
        assert_eq!(app.dispatch(Command::ToggleAccordion(9)), Repaint::empty());
        assert_eq!(
            app.dispatch(Command::OpenModal("callback".into())),
            Repaint::MODALS
        );
        assert_eq!(
            app.dispatch(Command::OpenModal("missing".into())),
            Repaint::empty()
        );
        assert_eq!(
            app.handle(HostEvent::Key(Key::Escape)).repaint,
            Repaint::MENU | Repaint::MODALS
        );
        assert_eq!(
            app.handle(HostEvent::Key(Key::Other("a".into()))).repaint,
            Repaint::empty()
        );
    }

    #[test]
    fn scroll_repaints_only_on_transitions() {
        let mut app = app(false);
        for y in [5.0, 10.0, 15.0] {
            assert_eq!(app.handle(HostEvent::Scroll { y }).repaint, Repaint::empty());
        }
        assert_eq!(app.on_frame(None).repaint, Repaint::empty());

        let _ = app.handle(HostEvent::Scroll { y: 400.0 });
        assert_eq!(app.on_frame(None).repaint, Repaint::HEADER);
        let _ = app.handle(HostEvent::Scroll { y: 500.0 });
        assert_eq!(app.on_frame(None).repaint, Repaint::empty());

        app.dispatch(Command::ToggleMobile);
        assert_eq!(
            app.handle(HostEvent::Scroll { y: 510.0 }).repaint,
            Repaint::MENU
        );
    }

    #[test]
    fn initial_layout_reports_offset_and_scroll_flag() {
        let mut app = app(false);
        let first = app.initial_layout(0.0, Some(64.0));
        assert_eq!(first.section_offset, Some(64.0));
        assert_eq!(first.header_scrolled, Some(false));
        assert_eq!(first.repaint, Repaint::all());
        assert!(!app.header_scrolled());
    }
}
