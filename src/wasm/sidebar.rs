//! DOM for the typography sidebar, wired to a [`SettingsPanel`].

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, Event, EventTarget, HtmlElement, HtmlInputElement, Window};

use super::describe;
use super::hero::Hero;
use super::storage::{browser_store, NavigatorClipboard};
use super::toast::Toaster;
use crate::config::AppConfig;
use crate::fonts::{
    self, FontCategory, FontWeight, SliderRange, TextTransform, FONT_SIZE_RANGE,
    LETTER_SPACING_RANGE, LINE_HEIGHTS,
};
use crate::panel::SettingsPanel;
use crate::ports::KeyValueStore;
use crate::settings::{round_hundredths, TypographySettings};

pub type BrowserPanel = SettingsPanel<Box<dyn KeyValueStore>, NavigatorClipboard, Toaster>;

/// An event listener removed again when dropped.
struct Listener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Drop for Listener {
    fn drop(&mut self) {
        if let Err(e) = self
            .target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref())
        {
            log::warn!("could not remove {} listener: {}", self.event, describe(&e));
        }
    }
}

fn listen(
    target: &HtmlElement,
    event: &'static str,
    handler: impl FnMut(Event) + 'static,
) -> Result<Listener, JsValue> {
    let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
    Ok(Listener {
        target: EventTarget::from(target.clone()),
        event,
        callback,
    })
}

struct Slider {
    input: HtmlInputElement,
    readout: HtmlElement,
}

/// Elements whose state follows the published settings.
pub struct SidebarView {
    aside: HtmlElement,
    reopen: HtmlElement,
    close: HtmlElement,
    copy: HtmlElement,
    reset: HtmlElement,
    fonts: Vec<(&'static str, HtmlElement)>,
    weights: Vec<(FontWeight, HtmlElement)>,
    transforms: Vec<(TextTransform, HtmlElement)>,
    line_heights: Vec<(f64, HtmlElement)>,
    size: Slider,
    spacing: Slider,
}

struct Builder<'a> {
    document: &'a Document,
}

impl Builder<'_> {
    fn element(&self, tag: &str, class: &str) -> Result<HtmlElement, JsValue> {
        let el = self.document.create_element(tag)?.dyn_into::<HtmlElement>()?;
        el.set_class_name(class);
        Ok(el)
    }

    fn text(&self, tag: &str, class: &str, text: &str) -> Result<HtmlElement, JsValue> {
        let el = self.element(tag, class)?;
        el.set_text_content(Some(text));
        Ok(el)
    }

    fn button(&self, class: &str, label: &str) -> Result<HtmlElement, JsValue> {
        let el = self.text("button", class, label)?;
        el.set_attribute("type", "button")?;
        Ok(el)
    }

    fn section(&self, body: &Element, title: &str) -> Result<HtmlElement, JsValue> {
        let section = self.element("section", "sidebar__section")?;
        section.append_child(&self.text("h3", "sidebar__heading", title)?)?;
        body.append_child(&section)?;
        Ok(section)
    }

    fn slider(&self, parent: &Element, range: SliderRange) -> Result<Slider, JsValue> {
        let row = self.element("div", "slider")?;
        let input = self.document.create_element("input")?.dyn_into::<HtmlInputElement>()?;
        input.set_type("range");
        input.set_class_name("slider__input");
        input.set_min(&range.min.to_string());
        input.set_max(&range.max.to_string());
        input.set_step(&range.step.to_string());
        let readout = self.element("span", "slider__readout")?;
        row.append_child(&input)?;
        row.append_child(&readout)?;
        parent.append_child(&row)?;
        Ok(Slider { input, readout })
    }

    fn group(&self, parent: &Element) -> Result<HtmlElement, JsValue> {
        let group = self.element("div", "option-group")?;
        parent.append_child(&group)?;
        Ok(group)
    }
}

impl SidebarView {
    fn build(document: &Document) -> Result<Self, JsValue> {
        let b = Builder { document };

        let reopen = b.button("sidebar-reopen", "Aa")?;
        reopen.set_attribute("aria-label", "Open typography panel")?;

        let aside = b.element("aside", "sidebar")?;
        let header = b.element("header", "sidebar__header")?;
        header.append_child(&b.text("span", "sidebar__title", "Typography")?)?;
        let close = b.button("sidebar__close", "\u{00d7}")?;
        close.set_attribute("aria-label", "Collapse typography panel")?;
        header.append_child(&close)?;
        aside.append_child(&header)?;

        let body = b.element("div", "sidebar__body")?;
        aside.append_child(&body)?;

        let font_section = b.section(&body, "Font")?;
        let mut font_buttons = Vec::with_capacity(fonts::FONTS.len());
        for category in FontCategory::ALL {
            font_section.append_child(&b.text("h4", "sidebar__category", category.label())?)?;
            let group = b.group(&font_section)?;
            for font in fonts::by_category(category) {
                let button = b.button(&format!("option option--font {}", font.class), font.label)?;
                group.append_child(&button)?;
                font_buttons.push((font.name, button));
            }
        }

        let weight_group = b.group(&b.section(&body, "Weight")?)?;
        let mut weights = Vec::with_capacity(FontWeight::ALL.len());
        for weight in FontWeight::ALL {
            let button = b.button("option", weight.label())?;
            button.style().set_property("font-weight", &weight.value().to_string())?;
            weight_group.append_child(&button)?;
            weights.push((weight, button));
        }

        let size = b.slider(&b.section(&body, "Size")?, FONT_SIZE_RANGE)?;
        let spacing = b.slider(&b.section(&body, "Letter spacing")?, LETTER_SPACING_RANGE)?;

        let line_group = b.group(&b.section(&body, "Line height")?)?;
        let mut line_heights = Vec::with_capacity(LINE_HEIGHTS.len());
        for line_height in LINE_HEIGHTS {
            let button = b.button("option", &line_height.to_string())?;
            line_group.append_child(&button)?;
            line_heights.push((line_height, button));
        }

        let transform_group = b.group(&b.section(&body, "Transform")?)?;
        let mut transforms = Vec::with_capacity(TextTransform::ALL.len());
        for transform in TextTransform::ALL {
            let button = b.button("option", transform.label())?;
            button.set_attribute("title", transform.css())?;
            transform_group.append_child(&button)?;
            transforms.push((transform, button));
        }

        let footer = b.element("footer", "sidebar__footer")?;
        let copy = b.button("action", "Copy settings")?;
        let reset = b.button("action action--quiet", "Reset")?;
        footer.append_child(&copy)?;
        footer.append_child(&reset)?;
        aside.append_child(&footer)?;

        Ok(Self {
            aside,
            reopen,
            close,
            copy,
            reset,
            fonts: font_buttons,
            weights,
            transforms,
            line_heights,
            size,
            spacing,
        })
    }

    pub fn sync(&self, s: &TypographySettings) {
        for (name, el) in &self.fonts {
            mark(el, *name == s.font_family);
        }
        for (weight, el) in &self.weights {
            mark(el, *weight == s.font_weight);
        }
        for (transform, el) in &self.transforms {
            mark(el, *transform == s.text_transform);
        }
        for (line_height, el) in &self.line_heights {
            mark(el, (line_height - s.line_height).abs() < 1e-9);
        }
        self.size.input.set_value(&s.font_size.to_string());
        self.size.readout.set_text_content(Some(&format!("{}%", s.font_size)));
        let spacing = round_hundredths(s.letter_spacing);
        self.spacing.input.set_value(&spacing.to_string());
        self.spacing.readout.set_text_content(Some(&format!("{spacing:.2}em")));
    }

    pub fn set_open(&self, open: bool) {
        if let Err(e) = self.aside.class_list().toggle_with_force("is-collapsed", !open) {
            log::warn!("could not toggle sidebar: {}", describe(&e));
        }
        self.reopen.set_hidden(open);
    }
}

fn mark(el: &HtmlElement, active: bool) {
    if let Err(e) = el.class_list().toggle_with_force("is-active", active) {
        log::warn!("could not mark option: {}", describe(&e));
    }
    if let Err(e) = el.set_attribute("aria-pressed", if active { "true" } else { "false" }) {
        log::warn!("could not set aria-pressed: {}", describe(&e));
    }
}

fn with_panel(panel: &Rc<RefCell<BrowserPanel>>, f: impl FnOnce(&mut BrowserPanel)) {
    match panel.try_borrow_mut() {
        Ok(mut panel) => f(&mut panel),
        Err(_) => log::warn!("typography panel busy, dropping event"),
    }
}

pub struct Sidebar {
    view: Rc<SidebarView>,
    _panel: Rc<RefCell<BrowserPanel>>,
    listeners: Vec<Listener>,
}

impl Sidebar {
    pub fn mount(window: &Window, document: &Document, config: &AppConfig) -> Result<Self, JsValue> {
        let body = document.body().ok_or("no body")?;
        let container: Element = document
            .get_element_by_id("sidebar")
            .unwrap_or_else(|| body.clone().into());
        let view = Rc::new(SidebarView::build(document)?);
        container.append_child(&view.reopen)?;
        container.append_child(&view.aside)?;

        let toasts = match document.get_element_by_id("toasts") {
            Some(el) => el,
            None => {
                let el = document.create_element("div")?;
                el.set_id("toasts");
                body.append_child(&el)?;
                el
            }
        };
        let toaster = Toaster::new(window.clone(), document.clone(), toasts);

        let hero = Hero::find(document);
        let on_change = {
            let view = view.clone();
            move |s: &TypographySettings| {
                if let Err(e) = hero.apply(s) {
                    log::warn!("could not style hero text: {}", describe(&e));
                }
                view.sync(s);
            }
        };
        let mut panel = SettingsPanel::mount(
            config.storage_key.clone(),
            browser_store(window),
            NavigatorClipboard::new(window.clone()),
            toaster,
            on_change,
        );
        panel.set_open(config.sidebar_open);
        view.set_open(config.sidebar_open);
        let panel = Rc::new(RefCell::new(panel));

        let listeners = wire(&view, &panel)?;
        Ok(Self { view, _panel: panel, listeners })
    }
}

fn wire(view: &Rc<SidebarView>, panel: &Rc<RefCell<BrowserPanel>>) -> Result<Vec<Listener>, JsValue> {
    let mut listeners = Vec::new();

    for (name, el) in &view.fonts {
        let (panel, name) = (panel.clone(), *name);
        listeners.push(listen(el, "click", move |_| {
            with_panel(&panel, |p| {
                if let Err(err) = p.select_font(name) {
                    log::warn!("{err}");
                }
            })
        })?);
    }
    for (weight, el) in &view.weights {
        let (panel, weight) = (panel.clone(), *weight);
        listeners.push(listen(el, "click", move |_| {
            with_panel(&panel, |p| p.set_font_weight(weight))
        })?);
    }
    for (transform, el) in &view.transforms {
        let (panel, transform) = (panel.clone(), *transform);
        listeners.push(listen(el, "click", move |_| {
            with_panel(&panel, |p| p.set_text_transform(transform))
        })?);
    }
    for (line_height, el) in &view.line_heights {
        let (panel, line_height) = (panel.clone(), *line_height);
        listeners.push(listen(el, "click", move |_| {
            with_panel(&panel, |p| p.set_line_height(line_height))
        })?);
    }

    {
        let (panel, input) = (panel.clone(), view.size.input.clone());
        listeners.push(listen(&view.size.input, "input", move |_| {
            match input.value().parse::<f64>() {
                Ok(v) => with_panel(&panel, |p| p.set_font_size(v.round() as u16)),
                Err(_) => log::warn!("ignoring font size {:?}", input.value()),
            }
        })?);
    }
    {
        let (panel, input) = (panel.clone(), view.spacing.input.clone());
        listeners.push(listen(&view.spacing.input, "input", move |_| {
            match input.value().parse::<f64>() {
                Ok(v) => with_panel(&panel, |p| p.set_letter_spacing(round_hundredths(v))),
                Err(_) => log::warn!("ignoring letter spacing {:?}", input.value()),
            }
        })?);
    }

    {
        let panel = panel.clone();
        listeners.push(listen(&view.copy, "click", move |_| {
            with_panel(&panel, |p| p.copy_settings())
        })?);
    }
    {
        let panel = panel.clone();
        listeners.push(listen(&view.reset, "click", move |_| with_panel(&panel, |p| p.reset()))?);
    }
    {
        let (panel, v) = (panel.clone(), view.clone());
        listeners.push(listen(&view.close, "click", move |_| {
            with_panel(&panel, |p| v.set_open(p.toggle()))
        })?);
    }
    {
        let (panel, v) = (panel.clone(), view.clone());
        listeners.push(listen(&view.reopen, "click", move |_| {
            with_panel(&panel, |p| {
                p.set_open(true);
                v.set_open(true);
            })
        })?);
    }

    Ok(listeners)
}

impl Drop for Sidebar {
    fn drop(&mut self) {
        self.listeners.clear();
        self.view.aside.remove();
        self.view.reopen.remove();
    }
}
