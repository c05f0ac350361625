//! WebAssembly bindings via wasm-bindgen for browser integration.
//!
//! This module is only compiled when the `web` feature is enabled.
//!
//! # Usage
//!
//! Build with wasm-pack:
//! ```bash
//! wasm-pack build --target web --features web
//! ```
//!
//! # JavaScript Example
//!
//! ```javascript
//! import init, { tweakable_init, tweak, mountDefault, forwardEventsToWindow } from './tweakable.js';
//!
//! await init();
//! tweakable_init();
//!
//! const size = tweak("Size", 10);
//! mountDefault(document.getElementById("tweaks"));
//! forwardEventsToWindow();
//!
//! window.addEventListener("tweak", (e) => console.log(e.detail.name, e.detail.value));
//! const width = size * 2; // valueOf() reads the live value
//! ```

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    CustomEvent, CustomEventInit, Document, Element, Event, HtmlButtonElement, HtmlInputElement,
    HtmlLabelElement, Window,
};

use crate::bus::TweakEvent;
use crate::control::{Container, ControlGroup, Input, InputKind};
use crate::format::format_value;
use crate::global::{create, default_registry, on_tweak_event};
use crate::options::TweakOptions;
use crate::tweak::Tweak;

// ═══════════════════════════════════════════════════════════════════════════
// Errors
// ═══════════════════════════════════════════════════════════════════════════

/// Error while talking to the DOM.
#[derive(Debug)]
pub enum WebError {
    /// No global `window` (e.g. running in a worker).
    NoWindow,

    /// The window has no document.
    NoDocument,

    /// A DOM call threw or returned an unexpected element type.
    Dom(String),
}

impl fmt::Display for WebError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WebError::NoWindow => write!(f, "No global window"),
            WebError::NoDocument => write!(f, "Window has no document"),
            WebError::Dom(msg) => write!(f, "DOM error: {}", msg),
        }
    }
}

impl std::error::Error for WebError {}

impl From<WebError> for JsValue {
    fn from(err: WebError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

fn dom(err: JsValue) -> WebError {
    WebError::Dom(err.as_string().unwrap_or_else(|| format!("{:?}", err)))
}

fn window() -> Result<Window, WebError> {
    web_sys::window().ok_or(WebError::NoWindow)
}

fn document() -> Result<Document, WebError> {
    window()?.document().ok_or(WebError::NoDocument)
}

fn create_element<T: JsCast>(document: &Document, tag: &str) -> Result<T, WebError> {
    document
        .create_element(tag)
        .map_err(dom)?
        .dyn_into::<T>()
        .map_err(|_| WebError::Dom(format!("<{}> has an unexpected type", tag)))
}

// ═══════════════════════════════════════════════════════════════════════════
// Initialization
// ═══════════════════════════════════════════════════════════════════════════

/// Initialize the wasm module. Call this once before using any other functions.
/// Sets up panic hooks and console logging.
#[wasm_bindgen]
pub fn tweakable_init() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Debug).ok();
}

// ═══════════════════════════════════════════════════════════════════════════
// Mounting
// ═══════════════════════════════════════════════════════════════════════════

/// DOM rendering of a mounted container.
///
/// Holds one row element per control group, including groups appended
/// after mounting.
#[wasm_bindgen]
pub struct DomPanel {
    parent: Element,
    rows: Rc<RefCell<Vec<Element>>>,
}

#[wasm_bindgen]
impl DomPanel {
    /// Element the rows were appended to.
    #[wasm_bindgen(getter)]
    pub fn parent(&self) -> Element {
        self.parent.clone()
    }

    /// Number of rendered control groups.
    #[wasm_bindgen(getter, js_name = rowCount)]
    pub fn row_count(&self) -> usize {
        self.rows.borrow().len()
    }

    /// Row element of the `index`-th control group, in append order.
    pub fn row(&self, index: usize) -> Option<Element> {
        self.rows.borrow().get(index).cloned()
    }
}

/// Render every control group of `container` under `parent`, and every
/// group appended later.
///
/// DOM event handlers live as long as the page; they are leaked on purpose
/// because controls are never removed.
pub fn mount(container: &Container, parent: &Element) -> Result<DomPanel, WebError> {
    let document = document()?;
    let rows = Rc::new(RefCell::new(Vec::new()));

    for group in container.groups() {
        let row = render_group(&document, parent, &group)?;
        rows.borrow_mut().push(row);
    }

    let target = parent.clone();
    let appended = rows.clone();
    container.on_append(move |group| match render_group(&document, &target, group) {
        Ok(row) => appended.borrow_mut().push(row),
        Err(e) => log::error!("Error rendering controls for {:?}: {}", group.label.text, e),
    });

    Ok(DomPanel {
        parent: parent.clone(),
        rows,
    })
}

/// Mount the default registry's container under `parent`.
#[wasm_bindgen(js_name = mountDefault)]
pub fn mount_default(parent: &Element) -> Result<DomPanel, JsValue> {
    mount(&default_registry().container(), parent).map_err(JsValue::from)
}

fn render_group(
    document: &Document,
    parent: &Element,
    group: &ControlGroup,
) -> Result<Element, WebError> {
    let row: Element = document.create_element("div").map_err(dom)?;
    row.set_class_name("tweak");

    let label: HtmlLabelElement = create_element(document, "label")?;
    label.set_text_content(Some(&group.label.text));
    label.set_html_for(&group.label.for_id);

    let number = render_input(document, &group.number)?;
    let slider = render_input(document, &group.slider)?;

    let button: HtmlButtonElement = create_element(document, "button")?;
    button.set_text_content(Some(group.reset.text()));
    button.set_disabled(group.reset.is_disabled());

    let target = button.clone();
    group.reset.on_disabled(move |disabled| target.set_disabled(disabled));

    let reset = group.reset.clone();
    let on_click = Closure::<dyn FnMut()>::new(move || reset.click());
    button.set_onclick(Some(on_click.as_ref().unchecked_ref()));
    on_click.forget();

    row.append_child(&label).map_err(dom)?;
    row.append_child(&number).map_err(dom)?;
    row.append_child(&slider).map_err(dom)?;
    row.append_child(&button).map_err(dom)?;
    parent.append_child(&row).map_err(dom)?;
    Ok(row)
}

fn render_input(document: &Document, input: &Input) -> Result<HtmlInputElement, WebError> {
    let element: HtmlInputElement = create_element(document, "input")?;
    element.set_type(match input.kind() {
        InputKind::Number => "number",
        InputKind::Range => "range",
    });
    element.set_id(input.id());

    if let Some(attrs) = input.range_attrs() {
        element.set_min(&format_value(attrs.min));
        element.set_max(&format_value(attrs.max));
        element.set_step(&format_value(attrs.step));
    }
    element.set_value(&input.value());

    let target = element.clone();
    input.on_value(move |text| target.set_value(text));

    let control = input.clone();
    let source = element.clone();
    let on_input = Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
        control.input(&source.value());
    });
    element.set_oninput(Some(on_input.as_ref().unchecked_ref()));
    on_input.forget();

    Ok(element)
}

// ═══════════════════════════════════════════════════════════════════════════
// Window events
// ═══════════════════════════════════════════════════════════════════════════

/// Re-dispatch every ambient tweak event as a DOM `CustomEvent` on `window`,
/// with `detail = { name, value }`.
#[wasm_bindgen(js_name = forwardEventsToWindow)]
pub fn forward_events_to_window() -> Result<(), JsValue> {
    let window = window()?;
    on_tweak_event(move |event| {
        if let Err(e) = dispatch_dom_event(&window, event) {
            log::error!("Error forwarding {:?} event: {}", event.kind, e);
        }
    });
    Ok(())
}

fn dispatch_dom_event(window: &Window, event: &TweakEvent) -> Result<(), WebError> {
    let detail = js_sys::Object::new();
    js_sys::Reflect::set(&detail, &"name".into(), &event.tweak.name().into()).map_err(dom)?;
    js_sys::Reflect::set(&detail, &"value".into(), &event.tweak.get().into()).map_err(dom)?;

    let init = CustomEventInit::new();
    init.set_detail(&detail);

    let dom_event = CustomEvent::new_with_event_init_dict(&event.kind, &init).map_err(dom)?;
    window.dispatch_event(&dom_event).map_err(dom)?;
    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════════
// Tweak handle
// ═══════════════════════════════════════════════════════════════════════════

/// A tweak seen from JavaScript. `valueOf` lets it stand in for a number.
#[wasm_bindgen]
pub struct JsTweak {
    inner: Tweak,
}

#[wasm_bindgen]
impl JsTweak {
    #[wasm_bindgen(getter)]
    pub fn name(&self) -> String {
        self.inner.name().to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn value(&self) -> f64 {
        self.inner.get()
    }

    #[wasm_bindgen(getter)]
    pub fn initial(&self) -> f64 {
        self.inner.initial()
    }

    pub fn set(&self, value: f64) {
        self.inner.set(value);
    }

    pub fn reset(&self) {
        self.inner.reset();
    }

    #[wasm_bindgen(js_name = valueOf)]
    pub fn value_of(&self) -> f64 {
        self.inner.get()
    }

    #[wasm_bindgen(js_name = toString)]
    pub fn to_js_string(&self) -> String {
        self.inner.to_string()
    }
}

/// Create a tweak in the default registry. Bounds default to 0..100 step 1.
#[wasm_bindgen(js_name = tweak)]
pub fn js_tweak(
    name: &str,
    initial: f64,
    min: Option<f64>,
    max: Option<f64>,
    step: Option<f64>,
) -> JsTweak {
    let mut options = TweakOptions::default();
    if let Some(min) = min {
        options.min = min;
    }
    if let Some(max) = max {
        options.max = max;
    }
    if let Some(step) = step {
        options.step = step;
    }

    JsTweak {
        inner: create(name, initial, options),
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use crate::registry::Registry;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn local_tweak(registry: &Registry, name: &str, initial: f64) -> Tweak {
        create(name, initial, TweakOptions::new().registry(registry))
    }

    fn number_field(row: &Element) -> HtmlInputElement {
        row.query_selector("input[type=number]")
            .unwrap()
            .unwrap()
            .dyn_into::<HtmlInputElement>()
            .unwrap()
    }

    #[wasm_bindgen_test]
    fn test_dispatch_dom_event_carries_name_and_value() {
        let window = window().unwrap();
        let received: Rc<RefCell<Option<(String, f64)>>> = Rc::new(RefCell::new(None));

        let sink = received.clone();
        let listener = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            let detail = event.dyn_into::<CustomEvent>().unwrap().detail();
            let name = js_sys::Reflect::get(&detail, &"name".into()).unwrap();
            let value = js_sys::Reflect::get(&detail, &"value".into()).unwrap();
            *sink.borrow_mut() = Some((name.as_string().unwrap(), value.as_f64().unwrap()));
        });
        window
            .add_event_listener_with_callback("tweak", listener.as_ref().unchecked_ref())
            .unwrap();

        let registry = Registry::new(Container::new());
        let t = local_tweak(&registry, "Size", 10.0);
        t.set(25.0);
        dispatch_dom_event(&window, &TweakEvent::changed(&t)).unwrap();

        window
            .remove_event_listener_with_callback("tweak", listener.as_ref().unchecked_ref())
            .unwrap();
        assert_eq!(*received.borrow(), Some(("Size".to_string(), 25.0)));
    }

    #[wasm_bindgen_test]
    fn test_mount_renders_and_follows_changes() {
        let parent = document().unwrap().create_element("div").unwrap();
        let registry = Registry::new(Container::new());
        let size = local_tweak(&registry, "Size", 10.0);

        let panel = mount(&registry.container(), &parent).unwrap();
        assert_eq!(panel.row_count(), 1);
        assert_eq!(parent.child_element_count(), 1);

        local_tweak(&registry, "Speed", 1.0);
        assert_eq!(panel.row_count(), 2);
        assert_eq!(parent.child_element_count(), 2);

        let row = panel.row(0).unwrap();
        assert_eq!(number_field(&row).value(), "10");

        size.set(25.0);
        assert_eq!(number_field(&row).value(), "25");
    }

    #[wasm_bindgen_test]
    fn test_js_tweak_value_of_reads_live_value() {
        let handle = js_tweak("Gain", 0.5, Some(0.0), Some(1.0), Some(0.01));
        assert_eq!(handle.value_of(), 0.5);

        handle.set(0.75);
        assert_eq!(handle.value_of(), 0.75);
        assert_eq!(handle.to_js_string(), "0.75");

        handle.reset();
        assert_eq!(handle.value(), handle.initial());
    }
}
