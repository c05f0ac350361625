// src/bus.rs
//
// Ambient broadcast of tweak changes.
//
// Listeners subscribe by event kind and receive every matching event,
// without holding a reference to the registry or tweak that emitted it.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::tweak::Tweak;

/// Kind of the event broadcast for every change of a default-registry tweak.
pub const TWEAK_EVENT: &str = "tweak";

/// A broadcast notification carrying the changed tweak.
#[derive(Debug, Clone)]
pub struct TweakEvent {
    pub kind: String,
    pub tweak: Tweak,
}

impl TweakEvent {
    /// A [`TWEAK_EVENT`] for `tweak`.
    pub fn changed(tweak: &Tweak) -> Self {
        Self {
            kind: TWEAK_EVENT.to_string(),
            tweak: tweak.clone(),
        }
    }
}

type EventFn = Rc<dyn Fn(&TweakEvent)>;

/// Shared publish/subscribe channel. Clones share listeners.
#[derive(Clone, Default)]
pub struct EventBus {
    listeners: Rc<RefCell<Vec<(String, EventFn)>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_listener(&self, kind: impl Into<String>, func: impl Fn(&TweakEvent) + 'static) {
        self.listeners
            .borrow_mut()
            .push((kind.into(), Rc::new(func)));
    }

    /// Deliver `event` to the listeners of its kind, in registration order.
    pub fn dispatch(&self, event: &TweakEvent) {
        log::trace!("dispatch {:?} for {:?}", event.kind, event.tweak.name());

        let matching: Vec<EventFn> = self
            .listeners
            .borrow()
            .iter()
            .filter(|(kind, _)| *kind == event.kind)
            .map(|(_, func)| func.clone())
            .collect();

        for func in &matching {
            func(event);
        }
    }

    pub fn listener_count(&self, kind: &str) -> usize {
        self.listeners
            .borrow()
            .iter()
            .filter(|(k, _)| k == kind)
            .count()
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.listeners.borrow().len())
            .finish()
    }
}
