// src/control.rs
//
// Headless form controls and the rendering surface they live on.
//
// These mirror the handful of host widgets a tweak panel needs (label,
// number field, slider, button). Values are kept as text, like a host
// form control. Hosts that draw real widgets subscribe to the render hooks
// (`on_value`, `on_disabled`, `on_append`) and forward user activity back
// through `input` / `click`.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use crate::format::format_value;
use crate::tweak::Tweak;

type TextFn = Rc<dyn Fn(&str)>;
type FlagFn = Rc<dyn Fn(bool)>;
type ClickFn = Rc<dyn Fn()>;
type GroupFn = Rc<dyn Fn(&ControlGroup)>;

/// Caption of every reset button.
pub const RESET_TEXT: &str = "Reset";

/// Id of the number field for a tweak called `name`.
///
/// Every ASCII alphanumeric character is replaced with `_`, so names of
/// equal shape ("ab" and "xy") collide. The id is not meant to be unique.
pub fn control_id(name: &str) -> String {
    let escaped: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { '_' } else { c })
        .collect();
    format!("tweak-{}-input", escaped)
}

/// Id of the slider for a tweak called `name`.
pub fn slider_id(name: &str) -> String {
    format!("{}-range", control_id(name))
}

// ═══════════════════════════════════════════════════════════════════════════
// Label
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    /// Visible caption
    pub text: String,

    /// Id of the control this label describes
    pub for_id: String,
}

// ═══════════════════════════════════════════════════════════════════════════
// Input
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// Free-form numeric field
    Number,
    /// Slider
    Range,
}

/// Slider attributes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeAttrs {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

struct InputState {
    kind: InputKind,
    id: String,
    range: Option<RangeAttrs>,
    value: RefCell<String>,
    input_listeners: RefCell<Vec<TextFn>>,
    render_hooks: RefCell<Vec<TextFn>>,
}

/// A text-valued input control. Clones share the same control.
#[derive(Clone)]
pub struct Input {
    inner: Rc<InputState>,
}

impl Input {
    pub fn number(id: impl Into<String>, value: impl Into<String>) -> Self {
        Self::build(InputKind::Number, id.into(), None, value.into())
    }

    pub fn range(id: impl Into<String>, attrs: RangeAttrs, value: impl Into<String>) -> Self {
        Self::build(InputKind::Range, id.into(), Some(attrs), value.into())
    }

    fn build(kind: InputKind, id: String, range: Option<RangeAttrs>, value: String) -> Self {
        Self {
            inner: Rc::new(InputState {
                kind,
                id,
                range,
                value: RefCell::new(value),
                input_listeners: RefCell::new(Vec::new()),
                render_hooks: RefCell::new(Vec::new()),
            }),
        }
    }

    pub fn kind(&self) -> InputKind {
        self.inner.kind
    }

    pub fn id(&self) -> &str {
        &self.inner.id
    }

    /// Slider attributes, `None` for number fields.
    pub fn range_attrs(&self) -> Option<RangeAttrs> {
        self.inner.range
    }

    /// Displayed text.
    pub fn value(&self) -> String {
        self.inner.value.borrow().clone()
    }

    /// Programmatic update. Runs render hooks, never input listeners.
    pub fn set_value(&self, text: impl Into<String>) {
        let text = text.into();
        *self.inner.value.borrow_mut() = text.clone();

        let hooks = self.inner.render_hooks.borrow().clone();
        for hook in &hooks {
            hook(&text);
        }
    }

    /// Called on every user edit, with the edited text.
    pub fn on_input(&self, func: impl Fn(&str) + 'static) {
        self.inner.input_listeners.borrow_mut().push(Rc::new(func));
    }

    /// Called whenever the displayed text is rewritten programmatically.
    pub fn on_value(&self, func: impl Fn(&str) + 'static) {
        self.inner.render_hooks.borrow_mut().push(Rc::new(func));
    }

    /// A user edit: store `text`, then notify input listeners.
    pub fn input(&self, text: &str) {
        *self.inner.value.borrow_mut() = text.to_string();

        let listeners = self.inner.input_listeners.borrow().clone();
        for listener in &listeners {
            listener(text);
        }
    }
}

impl fmt::Debug for Input {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Input")
            .field("kind", &self.inner.kind)
            .field("id", &self.inner.id)
            .field("value", &*self.inner.value.borrow())
            .field("range", &self.inner.range)
            .finish()
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Button
// ═══════════════════════════════════════════════════════════════════════════

struct ButtonState {
    text: String,
    disabled: Cell<bool>,
    click_listeners: RefCell<Vec<ClickFn>>,
    render_hooks: RefCell<Vec<FlagFn>>,
}

/// A push button. Clones share the same control.
#[derive(Clone)]
pub struct Button {
    inner: Rc<ButtonState>,
}

impl Button {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            inner: Rc::new(ButtonState {
                text: text.into(),
                disabled: Cell::new(false),
                click_listeners: RefCell::new(Vec::new()),
                render_hooks: RefCell::new(Vec::new()),
            }),
        }
    }

    pub fn text(&self) -> &str {
        &self.inner.text
    }

    pub fn is_disabled(&self) -> bool {
        self.inner.disabled.get()
    }

    pub fn set_disabled(&self, disabled: bool) {
        self.inner.disabled.set(disabled);

        let hooks = self.inner.render_hooks.borrow().clone();
        for hook in &hooks {
            hook(disabled);
        }
    }

    pub fn on_click(&self, func: impl Fn() + 'static) {
        self.inner.click_listeners.borrow_mut().push(Rc::new(func));
    }

    /// Called with the new state whenever `set_disabled` runs.
    pub fn on_disabled(&self, func: impl Fn(bool) + 'static) {
        self.inner.render_hooks.borrow_mut().push(Rc::new(func));
    }

    /// A user activation. Ignored while disabled.
    pub fn click(&self) {
        if self.is_disabled() {
            return;
        }

        let listeners = self.inner.click_listeners.borrow().clone();
        for listener in &listeners {
            listener();
        }
    }
}

impl fmt::Debug for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Button")
            .field("text", &self.inner.text)
            .field("disabled", &self.inner.disabled.get())
            .finish()
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Control group
// ═══════════════════════════════════════════════════════════════════════════

/// The controls rendered for one tweak.
#[derive(Debug, Clone)]
pub struct ControlGroup {
    /// Derived id, shared with the number field
    pub id: String,
    pub label: Label,
    pub number: Input,
    pub slider: Input,
    pub reset: Button,
}

impl ControlGroup {
    /// Build unbound controls showing the tweak's current state.
    pub fn for_tweak(tweak: &Tweak) -> Self {
        let id = control_id(tweak.name());
        let value = format_value(tweak.get());

        let attrs = RangeAttrs {
            min: tweak.min(),
            max: tweak.max(),
            step: tweak.step(),
        };

        let reset = Button::new(RESET_TEXT);
        reset.set_disabled(tweak.is_default());

        Self {
            label: Label {
                text: tweak.name().to_string(),
                for_id: id.clone(),
            },
            number: Input::number(id.clone(), value.clone()),
            slider: Input::range(slider_id(tweak.name()), attrs, value),
            reset,
            id,
        }
    }

    /// Rewrite both fields and the reset state from the tweak.
    pub(crate) fn sync(&self, tweak: &Tweak) {
        let text = format_value(tweak.get());
        self.number.set_value(text.clone());
        self.slider.set_value(text);
        self.reset.set_disabled(tweak.is_default());
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Container
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Default)]
struct ContainerState {
    groups: RefCell<Vec<ControlGroup>>,
    append_hooks: RefCell<Vec<GroupFn>>,
}

/// Rendering surface a registry appends control groups to.
///
/// Owned by the caller; clones share the same surface.
#[derive(Clone, Default)]
pub struct Container {
    inner: Rc<ContainerState>,
}

impl Container {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&self, group: ControlGroup) {
        self.inner.groups.borrow_mut().push(group.clone());

        let hooks = self.inner.append_hooks.borrow().clone();
        for hook in &hooks {
            hook(&group);
        }
    }

    /// Called for every group appended after this call.
    pub fn on_append(&self, func: impl Fn(&ControlGroup) + 'static) {
        self.inner.append_hooks.borrow_mut().push(Rc::new(func));
    }

    /// Groups in append order.
    pub fn groups(&self) -> Vec<ControlGroup> {
        self.inner.groups.borrow().clone()
    }

    /// First group with the given id.
    pub fn find(&self, id: &str) -> Option<ControlGroup> {
        self.inner.groups.borrow().iter().find(|g| g.id == id).cloned()
    }

    pub fn len(&self) -> usize {
        self.inner.groups.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.groups.borrow().is_empty()
    }

    pub fn ptr_eq(&self, other: &Container) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Container")
            .field("groups", &*self.inner.groups.borrow())
            .finish()
    }
}
