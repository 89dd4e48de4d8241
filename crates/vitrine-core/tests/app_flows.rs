//! End-to-end flows through [`App`] the way a page visit drives them.

use pretty_assertions::assert_eq;
use vitrine_core::app::{
    App, Command, Effect, FrameOutcome, GroupMarkup, HostCapabilities, PageMarkup, Repaint,
};
use vitrine_core::config::{SiteConfig, Tween};
use vitrine_core::event::{ClickRegion, HostEvent, Key, Viewport};
use vitrine_core::mask::MaskEvent;
use vitrine_core::menu::{MenuFeatures, MenuState};
use vitrine_core::modal::{ModalAnimation, ModalPhase};
use vitrine_core::scroll_lock::ScrollState;

fn storefront(tweens: bool) -> App {
    let markup = PageMarkup {
        menu: MenuFeatures::all(),
        show_more_groups: vec![GroupMarkup {
            items: 8,
            ..GroupMarkup::default()
        }],
        accordion_panels: 4,
        accordion_active: Some(0),
        modal_types: vec!["callback".into(), "order".into()],
        section_tops: 3,
    };
    App::new(
        SiteConfig::default(),
        markup,
        HostCapabilities { tweens },
        Viewport::new(390.0, 844.0),
    )
}

fn scroll_effects(app: &mut App) -> Vec<ScrollState> {
    app.drain_effects()
        .into_iter()
        .filter_map(|e| match e {
            Effect::Scroll(s) => Some(s),
            _ => None,
        })
        .collect()
}

#[test]
fn opening_second_modal_keeps_single_lock() {
    let mut app = storefront(false);
    app.dispatch(Command::OpenModal("callback".into()));
    app.dispatch(Command::OpenModal("order".into()));
    assert_eq!(app.modals().current(), Some("order"));
    assert_eq!(app.locks().len(), 1);
    assert_eq!(scroll_effects(&mut app), vec![ScrollState::Locked]);

    app.dispatch(Command::CloseModal);
    assert_eq!(scroll_effects(&mut app), vec![ScrollState::Unlocked]);
}

#[test]
fn closing_with_nothing_open_emits_nothing() {
    let mut app = storefront(true);
    app.dispatch(Command::CloseModal);
    app.dispatch(Command::CloseMenus);
    let _ = app.handle(HostEvent::Key(Key::Escape));
    assert_eq!(app.drain_effects(), vec![]);
}

#[test]
fn double_close_during_slide_out() {
    let mut app = storefront(true);
    app.dispatch(Command::OpenModal("callback".into()));
    assert_eq!(
        app.drain_effects(),
        vec![
            Effect::Scroll(ScrollState::Locked),
            Effect::Modal(ModalAnimation::In {
                modal: "callback".into(),
                tween: Tween::modal_in(),
            }),
        ]
    );

    app.dispatch(Command::CloseModal);
    let _ = app.handle(HostEvent::Key(Key::Escape));
    let effects = app.drain_effects();
    assert_eq!(effects.len(), 1, "second close ignored: {effects:?}");
    let Effect::Modal(ModalAnimation::Out { token, .. }) = &effects[0] else {
        panic!("expected slide-out, got {effects:?}");
    };
    assert!(app.modals().is_closing());

    app.dispatch(Command::FinishModalClose(*token));
    app.dispatch(Command::FinishModalClose(*token));
    assert_eq!(app.modals().phase(), &ModalPhase::Hidden);
    assert_eq!(scroll_effects(&mut app), vec![ScrollState::Unlocked]);
}

#[test]
fn drawer_session_on_phone() {
    let mut app = storefront(false);
    let first = app.initial_layout(0.0, Some(60.0));
    assert_eq!(
        first,
        FrameOutcome {
            section_offset: Some(60.0),
            header_scrolled: Some(false),
            resized: false,
            repaint: Repaint::all(),
        }
    );

    app.dispatch(Command::ToggleMobile);
    assert_eq!(app.menu().state(), MenuState::MobileOpen);
    assert!(app.menu().view().burger_active);

    // Taps inside the drawer keep it open; a tap on the page closes it.
    let _ = app.handle(HostEvent::Click(ClickRegion::NAV));
    assert!(app.menu().is_mobile_open());
    let _ = app.handle(HostEvent::Click(ClickRegion::HEADER));
    assert!(!app.menu().is_mobile_open());
    assert_eq!(
        scroll_effects(&mut app),
        vec![ScrollState::Locked, ScrollState::Unlocked]
    );
}

#[test]
fn burger_closes_mega_menu() {
    let mut app = storefront(false);
    app.dispatch(Command::ToggleMega);
    assert_eq!(app.menu().state(), MenuState::MegaOpen);
    app.dispatch(Command::ToggleMobile);
    assert_eq!(app.menu().state(), MenuState::Closed);
    assert!(!app.locks().is_locked());
}

#[test]
fn scroll_burst_coalesces_into_one_frame() {
    let mut app = storefront(false);
    let requests = [10.0, 30.0, 55.0, 70.0]
        .into_iter()
        .map(|y| app.handle(HostEvent::Scroll { y }).request_frame)
        .filter(|&r| r)
        .count();
    assert_eq!(requests, 1);

    let frame = app.on_frame(None);
    assert_eq!(frame.header_scrolled, Some(true));
    assert!(app.header_scrolled());

    let _ = app.handle(HostEvent::Scroll { y: 50.0 });
    assert_eq!(app.on_frame(None).header_scrolled, Some(false));
}

#[test]
fn rotate_to_landscape_rescales_carousels() {
    let mut app = storefront(false);
    let portrait = app.carousels()[0].options.space_between;

    let _ = app.handle(HostEvent::Resize(Viewport::new(844.0, 390.0)));
    let frame = app.on_frame(Some(56.0));
    assert!(frame.resized);
    assert_eq!(frame.section_offset, Some(56.0));

    let landscape = app.carousels()[0].options.space_between;
    assert_eq!(landscape, 16.0 * (390.0 / 768.0));
    assert!(landscape < portrait);
    assert_eq!(app.drain_effects(), vec![Effect::UpdateCarousels]);
}

#[test]
fn accordion_starts_from_markup_and_stays_single() {
    let mut app = storefront(false);
    assert_eq!(app.accordion().active(), Some(0));
    app.dispatch(Command::ToggleAccordion(2));
    assert_eq!(app.accordion().active(), Some(2));
    app.dispatch(Command::ToggleAccordion(2));
    assert_eq!(app.accordion().active(), None);
}

#[test]
fn show_more_toggle_flips_caption() {
    let mut app = storefront(false);
    assert!(app.menu().group_has_toggle(0));
    assert_eq!(app.menu().groups()[0].caption(), "Показать еще");
    app.dispatch(Command::ToggleMoreGroup(0));
    assert_eq!(app.menu().groups()[0].caption(), "Свернуть");
    assert_eq!(app.menu().groups()[0].aria_expanded(), "true");
}

#[test]
fn configured_mask_template_is_used() {
    let config = SiteConfig::from_json(r#"{ "maskTemplate": "+7 (___) ___-__-__" }"#).unwrap();
    let app = App::new(
        config,
        PageMarkup::default(),
        HostCapabilities::default(),
        Viewport::default(),
    );
    let mut value = String::new();
    for d in "79161234567".chars() {
        value.push(d);
        value = app.mask().apply(&value, MaskEvent::Input).value;
    }
    assert_eq!(value, "+7 (916) 123-45-67");
}
