// src/lib.rs
//
// Live-editable numbers with generated slider/number controls.
//
// ```ignore
// let size = tweakable::tweak("Size", 10.0);
// let width = &size * 2.0;          // reads the live value
// tweakable::on_tweak_event(|e| println!("{} = {}", e.tweak.name(), e.tweak));
// ```

mod bus;
mod control;
mod format;
mod global;
mod options;
mod registry;
mod tweak;

#[cfg(feature = "web")]
pub mod wasm;

pub use bus::{EventBus, TWEAK_EVENT, TweakEvent};
pub use control::{
    Button, Container, ControlGroup, Input, InputKind, Label, RESET_TEXT, RangeAttrs, control_id,
    slider_id,
};
pub use format::{format_value, parse_value};
pub use global::{create, default_registry, event_bus, on_tweak_event, tweak};
pub use options::{DEFAULT_MAX, DEFAULT_MIN, DEFAULT_STEP, TweakOptions};
pub use registry::Registry;
pub use tweak::Tweak;

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_size_scenario() {
        let reg = Registry::new(Container::new());
        let size = create("Size", 10.0, TweakOptions::new().registry(&reg));
        let group = reg.control_group("Size").unwrap();

        let seen = Rc::new(RefCell::new(Vec::new()));
        let s = seen.clone();
        size.on_change(move |v| s.borrow_mut().push(("cell", v)));
        let s = seen.clone();
        reg.on_tweak(move |t| s.borrow_mut().push(("registry", t.get())));

        assert_eq!(size.get(), 10.0);
        assert!(group.reset.is_disabled());

        size.set(25.0);
        assert_eq!(size.get(), 25.0);
        assert!(!group.reset.is_disabled());

        group.reset.click();
        assert_eq!(size.get(), 10.0);
        assert!(group.reset.is_disabled());

        // the registry binding was subscribed first, so it fans out first
        assert_eq!(
            *seen.borrow(),
            vec![
                ("registry", 25.0),
                ("cell", 25.0),
                ("registry", 10.0),
                ("cell", 10.0),
            ]
        );
    }

    #[test]
    fn test_dup_scenario() {
        let reg = Registry::new(Container::new());
        let a = create("Dup", 1.0, TweakOptions::new().registry(&reg));
        let b = create("Dup", 99.0, TweakOptions::new().registry(&reg));

        assert_eq!(a.get(), 1.0);
        assert_eq!(b.get(), 1.0);
        assert_eq!(reg.tweaks().len(), 1);
        assert_eq!(reg.container().len(), 1);
    }

    #[test]
    fn test_live_value_in_expressions() {
        let reg = Registry::new(Container::new());
        let radius = create("Radius", 2.0, TweakOptions::new().registry(&reg).range(0.0, 10.0));
        let area = |r: &Tweak| std::f64::consts::PI * r * r;

        let before = area(&radius);
        reg.control_group("Radius").unwrap().slider.input("4");
        let after = area(&radius);

        assert_eq!(after / before, 4.0);
        assert_eq!(format!("r={}", radius), "r=4");
    }
}
