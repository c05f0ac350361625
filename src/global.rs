// src/global.rs
//
// The default registry and event bus, plus the `create` entry points.
//
// Both are built once per execution stream on first use and never torn
// down. The default container is detached: the host decides where (and
// whether) to mount it.

use crate::bus::{EventBus, TWEAK_EVENT, TweakEvent};
use crate::control::Container;
use crate::options::TweakOptions;
use crate::registry::Registry;
use crate::tweak::Tweak;

thread_local! {
    static EVENT_BUS: EventBus = EventBus::new();
    static DEFAULT_REGISTRY: Registry = build_default_registry();
}

fn build_default_registry() -> Registry {
    let registry = Registry::new(Container::new());
    let bus = event_bus();
    registry.on_tweak(move |tweak| bus.dispatch(&TweakEvent::changed(tweak)));
    registry
}

/// The registry tweaks join unless told otherwise.
pub fn default_registry() -> Registry {
    DEFAULT_REGISTRY.with(Registry::clone)
}

/// The ambient bus the default registry broadcasts on.
pub fn event_bus() -> EventBus {
    EVENT_BUS.with(EventBus::clone)
}

/// Listen for changes of any default-registry tweak.
pub fn on_tweak_event(func: impl Fn(&TweakEvent) + 'static) {
    event_bus().add_listener(TWEAK_EVENT, func);
}

/// Create a tweak and register it.
///
/// Goes to `options.registry`, or the default registry. When the name is
/// taken there, the registered tweak comes back and `initial` and the
/// bounds given here are ignored.
pub fn create(name: impl Into<String>, initial: f64, options: TweakOptions) -> Tweak {
    let tweak = Tweak::new(name, initial, &options);
    match options.registry {
        Some(registry) => registry.add(tweak),
        None => default_registry().add(tweak),
    }
}

/// [`create`] with default bounds in the default registry.
pub fn tweak(name: impl Into<String>, initial: f64) -> Tweak {
    create(name, initial, TweakOptions::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    // Each test runs on its own thread, so the defaults start fresh.

    #[test]
    fn test_default_registry_is_shared() {
        let a = default_registry();
        let b = default_registry();
        assert!(a.ptr_eq(&b));
        assert!(a.is_empty());
    }

    #[test]
    fn test_tweak_joins_default_registry() {
        let t = tweak("Size", 10.0);
        let reg = default_registry();

        assert_eq!(reg.len(), 1);
        assert!(reg.get("Size").unwrap().ptr_eq(&t));
        assert_eq!(reg.container().len(), 1);
    }

    #[test]
    fn test_create_with_explicit_registry() {
        let reg = Registry::new(Container::new());
        let t = create("Local", 2.0, TweakOptions::new().registry(&reg).step(0.5));

        assert_eq!(reg.len(), 1);
        assert_eq!(t.step(), 0.5);
        assert!(default_registry().is_empty());
    }

    #[test]
    fn test_duplicate_create() {
        let first = tweak("Dup", 1.0);
        let second = create("Dup", 99.0, TweakOptions::new().range(0.0, 1000.0));

        assert_eq!(first.get(), 1.0);
        assert_eq!(second.get(), 1.0);
        assert_eq!(second.max(), 100.0);
        assert_eq!(default_registry().len(), 1);
        assert_eq!(default_registry().container().len(), 1);
    }

    #[test]
    fn test_default_registry_broadcasts() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let s = seen.clone();
        on_tweak_event(move |event| {
            s.borrow_mut()
                .push((event.kind.clone(), event.tweak.name().to_string(), event.tweak.get()));
        });

        let t = tweak("Speed", 1.0);
        t.set(2.0);
        t.reset();

        assert_eq!(
            *seen.borrow(),
            vec![
                (TWEAK_EVENT.to_string(), "Speed".to_string(), 2.0),
                (TWEAK_EVENT.to_string(), "Speed".to_string(), 1.0),
            ]
        );
    }

    #[test]
    fn test_isolated_registry_does_not_broadcast() {
        let hits = Rc::new(RefCell::new(0));
        let h = hits.clone();
        on_tweak_event(move |_| *h.borrow_mut() += 1);

        let reg = Registry::new(Container::new());
        let t = create("Quiet", 0.0, TweakOptions::new().registry(&reg));
        t.set(5.0);

        assert_eq!(*hits.borrow(), 0);
    }
}
