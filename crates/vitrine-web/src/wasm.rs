#![forbid(unsafe_code)]

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::{Array, Function, JSON, Object, Reflect};
use vitrine_core::app::{
    App, Collaborators, Command, Effect, GroupMarkup, HostCapabilities, PageMarkup, Repaint,
};
use vitrine_core::carousel::CarouselSpec;
use vitrine_core::config::{Selectors, SiteConfig, Tween};
use vitrine_core::event::{ClickRegion, HostEvent, Key, Viewport};
use vitrine_core::mask::MaskEvent;
use vitrine_core::menu::MenuFeatures;
use vitrine_core::modal::ModalAnimation;
use vitrine_core::{debug, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    AddEventListenerOptions, Document, Element, Event, EventTarget, HtmlElement,
    HtmlInputElement, KeyboardEvent, Node, NodeList, Window,
};

use crate::view::{self, DomOp, Part};

/// Boot the storefront behaviour.
///
/// `options` is an optional plain object overriding any part of the site
/// configuration (selectors, classes, captions, mask template, timings).
/// Runs immediately when the page has loaded, otherwise on `load`.
///
/// Fails only for malformed options or a missing `window`/`document`.
#[wasm_bindgen]
pub fn boot(options: Option<JsValue>) -> Result<(), JsValue> {
    let config = parse_options(options)?;
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("vitrine: no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("vitrine: no document"))?;

    if document.ready_state() == "complete" {
        start(window, document, config);
    } else {
        let target = window.clone();
        let on_load = Closure::once_into_js(move || start(window, document, config));
        target.add_event_listener_with_callback("load", on_load.unchecked_ref())?;
    }
    Ok(())
}

fn parse_options(options: Option<JsValue>) -> Result<SiteConfig, JsValue> {
    let Some(options) = options.filter(|v| !v.is_undefined() && !v.is_null()) else {
        return Ok(SiteConfig::default());
    };
    let json: String = JSON::stringify(&options)?.into();
    SiteConfig::from_json(&json).map_err(|err| {
        warn!(error = %err, "rejected boot options");
        JsValue::from_str(&err.to_string())
    })
}

fn start(window: Window, document: Document, config: SiteConfig) {
    let libs = Libs::detect(&window);
    let dom = Dom::query(&document, &config);
    let caps = HostCapabilities {
        tweens: libs.gsap.is_some(),
    };
    let app = App::new(config.clone(), dom.markup(), caps, viewport(&window));
    let site = Rc::new(Site {
        window,
        document,
        config,
        dom,
        libs,
        app: RefCell::new(app),
    });

    site.first_paint();
    site.build_carousels();
    site.build_tabs();
    if let Err(_err) = site.wire() {
        warn!(error = ?_err, "failed to wire listeners");
    }
}

// ── DOM helpers ───────────────────────────────────────────────────────────

fn elements(list: Result<NodeList, JsValue>) -> Vec<Element> {
    let Ok(list) = list else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

fn first(document: &Document, selector: &str) -> Option<Element> {
    document.query_selector(selector).ok().flatten()
}

fn all(document: &Document, selector: &str) -> Vec<Element> {
    elements(document.query_selector_all(selector))
}

fn first_in(root: &Element, selector: &str) -> Option<Element> {
    root.query_selector(selector).ok().flatten()
}

fn all_in(root: &Element, selector: &str) -> Vec<Element> {
    elements(root.query_selector_all(selector))
}

fn inside(el: &Element, selector: &str) -> bool {
    matches!(el.closest(selector), Ok(Some(_)))
}

fn viewport(window: &Window) -> Viewport {
    let read = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    Viewport::new(read(window.inner_width()), read(window.inner_height()))
}

/// Register `handler` for the page lifetime.
fn listen<F>(target: &EventTarget, event: &str, passive: bool, handler: F) -> Result<(), JsValue>
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    if passive {
        let options = AddEventListenerOptions::new();
        options.set_passive(true);
        target.add_event_listener_with_callback_and_add_event_listener_options(
            event,
            closure.as_ref().unchecked_ref(),
            &options,
        )?;
    } else {
        target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    }
    closure.forget();
    Ok(())
}

// ── JS library bridges ────────────────────────────────────────────────────

fn global(window: &Window, name: &str) -> Option<JsValue> {
    Reflect::get(window, &JsValue::from_str(name))
        .ok()
        .filter(|v| !v.is_undefined() && !v.is_null())
}

fn constructor(window: &Window, name: &str) -> Option<Function> {
    global(window, name)?.dyn_into::<Function>().ok()
}

fn call_method(target: &JsValue, name: &str, args: &Array) -> Result<JsValue, JsValue> {
    let method: Function = Reflect::get(target, &JsValue::from_str(name))?.dyn_into()?;
    Reflect::apply(&method, target, args)
}

fn percent(value: f64) -> JsValue {
    JsValue::from_str(&format!("{value}%"))
}

/// `gsap.fromTo` when the tween has a start offset, `gsap.to` otherwise.
fn run_tween(
    gsap: &JsValue,
    target: &Element,
    tween: &Tween,
    on_complete: Option<&JsValue>,
) -> Result<JsValue, JsValue> {
    let to = Object::new();
    Reflect::set(&to, &"y".into(), &percent(tween.to_percent))?;
    Reflect::set(&to, &"duration".into(), &tween.duration_secs.into())?;
    Reflect::set(&to, &"ease".into(), &tween.ease.as_str().into())?;
    if let Some(done) = on_complete {
        Reflect::set(&to, &"onComplete".into(), done)?;
    }
    match tween.from_percent {
        Some(from) => {
            let from_vars = Object::new();
            Reflect::set(&from_vars, &"y".into(), &percent(from))?;
            call_method(gsap, "fromTo", &Array::of3(target, &from_vars, &to))
        }
        None => call_method(gsap, "to", &Array::of2(target, &to)),
    }
}

/// Libraries the page loaded as globals.
struct Libs {
    lenis: Option<JsValue>,
    gsap: Option<JsValue>,
    swiper: Option<Function>,
    tabby: Option<Function>,
    carousels: RefCell<Vec<(&'static str, JsValue)>>,
}

impl Libs {
    fn detect(window: &Window) -> Self {
        let lenis = constructor(window, "Lenis").and_then(|ctor| {
            let options = Object::new();
            let _ = Reflect::set(&options, &"autoRaf".into(), &JsValue::TRUE);
            match Reflect::construct(&ctor, &Array::of1(&options)) {
                Ok(instance) => {
                    let _ = Reflect::set(window, &"lenis".into(), &instance);
                    Some(instance)
                }
                Err(_err) => {
                    warn!(error = ?_err, "smooth scroll constructor failed");
                    None
                }
            }
        });
        let libs = Self {
            lenis,
            gsap: global(window, "gsap"),
            swiper: constructor(window, "Swiper"),
            tabby: constructor(window, "Tabby"),
            carousels: RefCell::new(Vec::new()),
        };
        debug!(
            lenis = libs.lenis.is_some(),
            gsap = libs.gsap.is_some(),
            swiper = libs.swiper.is_some(),
            tabby = libs.tabby.is_some(),
            "page libraries detected"
        );
        libs
    }
}

// ── Markup ────────────────────────────────────────────────────────────────

struct MoreGroup {
    item: Element,
    toggle: Element,
    items: usize,
    more: Option<String>,
    less: Option<String>,
}

impl MoreGroup {
    fn query(item: Element, s: &Selectors) -> Option<Self> {
        let list = first_in(&item, &s.mega_list)?;
        let toggle = first_in(&item, &s.mega_more)?;
        let items = all_in(&list, ":scope > li").len();
        let caption = |attr: &str| toggle.get_attribute(attr).filter(|t| !t.is_empty());
        let more = caption(&s.more_caption_attr);
        let less = caption(&s.less_caption_attr);
        Some(Self {
            item,
            toggle,
            items,
            more,
            less,
        })
    }
}

/// Elements found at boot.
struct Dom {
    body: Option<Element>,
    header: Option<Element>,
    section_tops: Vec<Element>,
    burger: Option<Element>,
    mobile_nav: Option<Element>,
    mega_trigger: Option<Element>,
    mega_panel: Option<Element>,
    groups: Vec<MoreGroup>,
    accordion: Vec<(Element, Option<Element>)>,
    accordion_active: Option<usize>,
    phone_inputs: Vec<HtmlInputElement>,
    modal_layer: Option<Element>,
    modals: Vec<(String, Element)>,
    modal_triggers: Vec<Element>,
}

impl Dom {
    fn query(document: &Document, config: &SiteConfig) -> Self {
        let s = &config.selectors;
        let header = first(document, &s.header);
        let mega_trigger = first(document, &s.mega_trigger);
        let mega_panel = first(document, &s.mega_panel);
        let mega_ready = header.is_some() && mega_trigger.is_some() && mega_panel.is_some();

        let groups = if mega_ready {
            all(document, &s.mega_item)
                .into_iter()
                .filter_map(|item| MoreGroup::query(item, s))
                .collect()
        } else {
            Vec::new()
        };

        let accordion: Vec<(Element, Option<Element>)> = all(document, &s.accordion_item)
            .into_iter()
            .map(|item| {
                let body = first_in(&item, &s.accordion_body);
                (item, body)
            })
            .collect();
        let accordion_active = accordion.iter().position(|(item, _)| {
            item.class_list()
                .contains(&config.classes.accordion_active)
        });

        let modal_layer = first(document, &s.modal_layer);
        let (modals, modal_triggers): (Vec<(String, Element)>, Vec<Element>) = match &modal_layer {
            Some(layer) => (
                all_in(layer, &s.modal)
                    .into_iter()
                    .map(|modal| {
                        let ty = modal.get_attribute(&s.modal_type_attr).unwrap_or_default();
                        (ty, modal)
                    })
                    .collect(),
                all(document, &s.modal_trigger),
            ),
            None => (Vec::new(), Vec::new()),
        };

        Self {
            body: document.body().map(Element::from),
            header,
            section_tops: all(document, &s.section_top),
            burger: first(document, &s.burger),
            mobile_nav: first(document, &s.mobile_nav),
            mega_trigger,
            mega_panel,
            groups,
            accordion,
            accordion_active,
            phone_inputs: all(document, &s.phone_input)
                .into_iter()
                .filter_map(|el| el.dyn_into::<HtmlInputElement>().ok())
                .collect(),
            modal_layer,
            modals,
            modal_triggers,
        }
    }

    fn markup(&self) -> PageMarkup {
        PageMarkup {
            menu: MenuFeatures {
                mobile: self.burger.is_some() && self.mobile_nav.is_some(),
                mega: self.header.is_some()
                    && self.mega_trigger.is_some()
                    && self.mega_panel.is_some(),
            },
            show_more_groups: self
                .groups
                .iter()
                .map(|g| GroupMarkup {
                    items: g.items,
                    more_caption: g.more.clone(),
                    less_caption: g.less.clone(),
                })
                .collect(),
            accordion_panels: self.accordion.len(),
            accordion_active: self.accordion_active,
            modal_types: self.modal_types(),
            section_tops: self.section_tops.len(),
        }
    }

    /// Distinct non-empty `data-type`s, in document order.
    fn modal_types(&self) -> Vec<String> {
        let mut types: Vec<String> = Vec::new();
        for (ty, _) in &self.modals {
            if !ty.is_empty() && !types.contains(ty) {
                types.push(ty.clone());
            }
        }
        types
    }

    fn modal(&self, ty: &str) -> Option<&Element> {
        self.modals.iter().find(|(t, _)| t == ty).map(|(_, el)| el)
    }

    fn resolve(&self, part: &Part) -> Vec<Element> {
        let one = |el: &Option<Element>| -> Vec<Element> { el.iter().cloned().collect() };
        match part {
            Part::Body => one(&self.body),
            Part::Header => one(&self.header),
            Part::SectionTops => self.section_tops.clone(),
            Part::Burger => one(&self.burger),
            Part::MobileNav => one(&self.mobile_nav),
            Part::MegaTrigger => one(&self.mega_trigger),
            Part::MegaPanel => one(&self.mega_panel),
            Part::MoreGroup(i) => self.groups.get(*i).map(|g| g.item.clone()).into_iter().collect(),
            Part::MoreToggle(i) => self
                .groups
                .get(*i)
                .map(|g| g.toggle.clone())
                .into_iter()
                .collect(),
            Part::AccordionItem(i) => self
                .accordion
                .get(*i)
                .map(|(item, _)| item.clone())
                .into_iter()
                .collect(),
            Part::AccordionBody(i) => self
                .accordion
                .get(*i)
                .and_then(|(_, body)| body.clone())
                .into_iter()
                .collect(),
            Part::ModalLayer => one(&self.modal_layer),
            Part::Modal(ty) => self
                .modals
                .iter()
                .filter(|(t, _)| t == ty)
                .map(|(_, el)| el.clone())
                .collect(),
            Part::InactiveModals(current) => self
                .modals
                .iter()
                .filter(|(t, _)| current.as_deref() != Some(t.as_str()))
                .map(|(_, el)| el.clone())
                .collect(),
        }
    }
}

// ── Site ──────────────────────────────────────────────────────────────────

/// Everything `boot()` builds. Listeners hold it through `Rc`; the `App`
/// borrow is always released before calling into the DOM or a library.
struct Site {
    window: Window,
    document: Document,
    config: SiteConfig,
    dom: Dom,
    libs: Libs,
    app: RefCell<App>,
}

impl Site {
    fn apply(&self, op: &DomOp) {
        for el in self.dom.resolve(op.part()) {
            match op {
                DomOp::Class { class, on, .. } => {
                    let _ = el.class_list().toggle_with_force(class, *on);
                }
                DomOp::Attr { name, value, .. } => {
                    let _ = el.set_attribute(name, value);
                }
                DomOp::Text { text, .. } => el.set_text_content(Some(text.as_str())),
                DomOp::Style {
                    property, value, ..
                } => {
                    let Some(html) = el.dyn_ref::<HtmlElement>() else {
                        continue;
                    };
                    let style = html.style();
                    let _ = match value {
                        Some(v) => style.set_property(property, v),
                        None => style.remove_property(property).map(|_| ()),
                    };
                }
            }
        }
    }

    fn apply_all(&self, ops: &[DomOp]) {
        for op in ops {
            self.apply(op);
        }
    }

    fn header_height(&self) -> Option<f64> {
        self.dom
            .header
            .as_ref()
            .and_then(|h| h.dyn_ref::<HtmlElement>())
            .map(|h| f64::from(h.offset_height()))
    }

    fn accordion_heights(&self) -> Vec<f64> {
        self.dom
            .accordion
            .iter()
            .map(|(_, body)| body.as_ref().map_or(0.0, |b| f64::from(b.scroll_height())))
            .collect()
    }

    /// Re-render the changed sections. Accordion bodies are only measured
    /// when the accordion itself changed.
    fn repaint(&self, repaint: Repaint) {
        if repaint.is_empty() {
            return;
        }
        let heights = if repaint.contains(Repaint::ACCORDION) {
            self.accordion_heights()
        } else {
            Vec::new()
        };
        let ops = view::render_changed(&self.app.borrow(), repaint, &heights);
        self.apply_all(&ops);
    }

    fn first_paint(&self) {
        let scroll_y = self.window.scroll_y().unwrap_or(0.0);
        let height = self.header_height();
        let outcome = self.app.borrow_mut().initial_layout(scroll_y, height);
        self.apply_all(&view::layout_ops(&outcome));
        self.repaint(outcome.repaint);
    }

    /// Hand effects to the libraries, then re-render what changed.
    fn sync(self: &Rc<Self>, effects: Vec<Effect>, repaint: Repaint) {
        let mut bridge = Bridge { site: self };
        for effect in effects {
            effect.apply_to(&mut bridge);
        }
        self.repaint(repaint);
    }

    fn dispatch(self: &Rc<Self>, command: Command) {
        let (repaint, effects) = {
            let mut app = self.app.borrow_mut();
            let repaint = app.dispatch(command);
            (repaint, app.drain_effects())
        };
        self.sync(effects, repaint);
    }

    fn handle(self: &Rc<Self>, event: HostEvent) {
        let (handled, effects) = {
            let mut app = self.app.borrow_mut();
            let handled = app.handle(event);
            (handled, app.drain_effects())
        };
        if handled.request_frame {
            self.request_frame();
        }
        self.sync(effects, handled.repaint);
    }

    fn request_frame(self: &Rc<Self>) {
        let site = Rc::clone(self);
        let callback = Closure::once_into_js(move |_timestamp: f64| site.frame());
        if let Err(_err) = self.window.request_animation_frame(callback.unchecked_ref()) {
            warn!(error = ?_err, "animation frame unavailable; reflowing now");
            self.frame();
        }
    }

    fn frame(self: &Rc<Self>) {
        let height = self.header_height();
        let (outcome, effects) = {
            let mut app = self.app.borrow_mut();
            let outcome = app.on_frame(height);
            (outcome, app.drain_effects())
        };
        self.apply_all(&view::layout_ops(&outcome));
        self.sync(effects, outcome.repaint);
    }

    fn animate_modal(self: &Rc<Self>, animation: ModalAnimation) {
        let Some(gsap) = &self.libs.gsap else {
            return;
        };
        match animation {
            ModalAnimation::In { modal, tween } => {
                let Some(el) = self.dom.modal(&modal) else {
                    return;
                };
                if let Err(_err) = run_tween(gsap, el, &tween, None) {
                    warn!(modal = %modal, error = ?_err, "modal slide-in failed");
                }
            }
            ModalAnimation::Out {
                modal,
                tween,
                token,
            } => {
                let site = Rc::clone(self);
                let done = Closure::once_into_js(move || {
                    site.dispatch(Command::FinishModalClose(token));
                });
                let started = self
                    .dom
                    .modal(&modal)
                    .map(|el| run_tween(gsap, el, &tween, Some(&done)));
                if !matches!(started, Some(Ok(_))) {
                    debug!(modal = %modal, "slide-out unavailable; closing now");
                    self.dispatch(Command::FinishModalClose(token));
                }
            }
            ModalAnimation::Cancel { modal } => {
                if let Some(el) = self.dom.modal(&modal) {
                    let _ = call_method(gsap, "killTweensOf", &Array::of1(el));
                }
            }
        }
    }

    fn build_carousels(&self) {
        let Some(swiper) = &self.libs.swiper else {
            debug!("carousel library not loaded");
            return;
        };
        let specs = self.app.borrow().carousels();
        let mut built: Vec<(&'static str, JsValue)> = Vec::new();
        for spec in specs {
            if first(&self.document, spec.selector).is_none() {
                debug!(carousel = spec.name, "carousel markup missing");
                continue;
            }
            match construct_carousel(swiper, &spec, &built) {
                Ok(instance) => built.push((spec.name, instance)),
                Err(_err) => {
                    warn!(carousel = spec.name, error = ?_err, "carousel constructor failed");
                }
            }
        }
        *self.libs.carousels.borrow_mut() = built;
    }

    fn build_tabs(&self) {
        let Some(tabby) = &self.libs.tabby else {
            return;
        };
        let selector = &self.config.selectors.tabs;
        if first(&self.document, selector).is_none() {
            return;
        }
        if let Err(_err) = Reflect::construct(tabby, &Array::of1(&JsValue::from_str(selector))) {
            warn!(error = ?_err, "tabs constructor failed");
        }
    }

    fn click_region(&self, event: &Event) -> ClickRegion {
        let mut region = ClickRegion::empty();
        let Some(target) = event.target() else {
            return region;
        };
        let Some(el) = target.dyn_ref::<Element>() else {
            return region;
        };
        let node: &Node = el;
        if self.dom.header.as_ref().is_some_and(|h| h.contains(Some(node))) {
            region |= ClickRegion::HEADER;
        }
        let s = &self.config.selectors;
        if inside(el, &s.mobile_nav) {
            region |= ClickRegion::NAV;
        }
        if inside(el, &s.burger) {
            region |= ClickRegion::BURGER;
        }
        region
    }

    /// Click on `target` dispatches `command`, honouring its propagation rules.
    fn command_on(self: &Rc<Self>, target: &EventTarget, command: Command) -> Result<(), JsValue> {
        let site = Rc::clone(self);
        listen(target, "click", false, move |event| {
            if command.prevents_default() {
                event.prevent_default();
            }
            if command.stops_propagation() {
                event.stop_propagation();
            }
            site.dispatch(command.clone());
        })
    }

    fn wire(self: &Rc<Self>) -> Result<(), JsValue> {
        let dom = &self.dom;
        let features = self.app.borrow().menu().features();

        if features.mega {
            if let Some(trigger) = &dom.mega_trigger {
                self.command_on(trigger, Command::ToggleMega)?;
            }
            if let Some(panel) = &dom.mega_panel {
                listen(panel, "click", false, |event| event.stop_propagation())?;
            }
            for (i, group) in dom.groups.iter().enumerate() {
                if self.app.borrow().menu().group_has_toggle(i) {
                    self.command_on(&group.toggle, Command::ToggleMoreGroup(i))?;
                }
            }
        }
        if features.mobile {
            if let Some(burger) = &dom.burger {
                self.command_on(burger, Command::ToggleMobile)?;
            }
        }

        let site = Rc::clone(self);
        listen(&self.document, "click", false, move |event| {
            let region = site.click_region(&event);
            site.handle(HostEvent::Click(region));
        })?;
        let site = Rc::clone(self);
        listen(&self.document, "keydown", false, move |event| {
            if let Some(key) = event.dyn_ref::<KeyboardEvent>() {
                site.handle(HostEvent::Key(Key::from_dom_key(&key.key())));
            }
        })?;
        let site = Rc::clone(self);
        listen(&self.window, "scroll", true, move |_event| {
            let y = site.window.scroll_y().unwrap_or(0.0);
            site.handle(HostEvent::Scroll { y });
        })?;
        let site = Rc::clone(self);
        listen(&self.window, "resize", false, move |_event| {
            site.handle(HostEvent::Resize(viewport(&site.window)));
        })?;

        for (i, (item, _)) in dom.accordion.iter().enumerate() {
            self.command_on(item, Command::ToggleAccordion(i))?;
        }
        self.wire_modals()?;
        self.wire_masks()
    }

    fn wire_modals(self: &Rc<Self>) -> Result<(), JsValue> {
        let Some(layer) = &self.dom.modal_layer else {
            return Ok(());
        };
        let s = &self.config.selectors;

        for trigger in &self.dom.modal_triggers {
            let site = Rc::clone(self);
            let button = trigger.clone();
            let attr = s.modal_type_attr.clone();
            listen(trigger, "click", false, move |event| {
                event.prevent_default();
                if let Some(ty) = button.get_attribute(&attr).filter(|t| !t.is_empty()) {
                    site.dispatch(Command::OpenModal(ty));
                }
            })?;
        }

        let site = Rc::clone(self);
        let backdrop = layer.clone();
        let close = s.modal_close.clone();
        listen(layer, "click", false, move |event| {
            let Some(target) = event.target() else {
                return;
            };
            let Some(el) = target.dyn_ref::<Element>() else {
                return;
            };
            let backdrop: &Node = &backdrop;
            if el.is_same_node(Some(backdrop)) || inside(el, &close) {
                site.dispatch(Command::CloseModal);
            }
        })
    }

    fn wire_masks(&self) -> Result<(), JsValue> {
        let mask = self.app.borrow().mask().clone();
        for input in &self.dom.phone_inputs {
            for name in ["input", "focus", "blur", "keydown"] {
                let mask = mask.clone();
                let field = input.clone();
                listen(input, name, false, move |event| {
                    let outcome = mask.apply(&field.value(), mask_event(&event, &field));
                    if outcome.prevent_default {
                        event.prevent_default();
                    }
                    if outcome.changed {
                        field.set_value(&outcome.value);
                    }
                })?;
            }
        }
        Ok(())
    }
}

fn construct_carousel(
    swiper: &Function,
    spec: &CarouselSpec,
    built: &[(&'static str, JsValue)],
) -> Result<JsValue, JsValue> {
    let json = spec
        .options
        .to_json()
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    let options = JSON::parse(&json)?;
    let thumbs = spec
        .thumbs
        .and_then(|name| built.iter().find(|(built_name, _)| *built_name == name));
    if let Some((_, thumbs)) = thumbs {
        let link = Object::new();
        Reflect::set(&link, &"swiper".into(), thumbs)?;
        Reflect::set(&options, &"thumbs".into(), &link)?;
    }
    Reflect::construct(swiper, &Array::of2(&spec.selector.into(), &options))
}

fn mask_event(event: &Event, field: &HtmlInputElement) -> MaskEvent {
    match event.type_().as_str() {
        "focus" => MaskEvent::Focus,
        "blur" => MaskEvent::Blur,
        "keydown" => MaskEvent::KeyDown {
            key_code: event
                .dyn_ref::<KeyboardEvent>()
                .map_or(0, KeyboardEvent::key_code),
            // A missing caret compares as zero, so the key is suppressed.
            caret: field.selection_start().ok().flatten().unwrap_or(0) as usize,
        },
        _ => MaskEvent::Input,
    }
}

/// [`Collaborators`] over the page's DOM and JS libraries.
struct Bridge<'a> {
    site: &'a Rc<Site>,
}

impl Collaborators for Bridge<'_> {
    fn set_scroll_locked(&mut self, locked: bool) {
        self.site
            .apply(&view::scroll_lock_op(locked, &self.site.config.classes));
        if let Some(lenis) = &self.site.libs.lenis {
            let method = if locked { "stop" } else { "start" };
            let _ = call_method(lenis, method, &Array::new());
        }
    }

    fn animate_modal(&mut self, animation: ModalAnimation) {
        self.site.animate_modal(animation);
    }

    fn update_carousels(&mut self) {
        for (_, carousel) in self.site.libs.carousels.borrow().iter() {
            let _ = call_method(carousel, "update", &Array::new());
        }
    }
}
