// src/registry.rs
//
// Owner of uniquely-named tweaks.
//
// A Registry renders one control group per tweak onto its container and
// keeps the two in sync:
// - user edits on either field call `Tweak::set`
// - the reset button calls `Tweak::set(initial)`
// - every change rewrites the controls, then reaches `on_tweak` listeners

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::control::{Container, ControlGroup};
use crate::format::parse_value;
use crate::tweak::Tweak;

type TweakFn = Rc<dyn Fn(&Tweak)>;

struct RegistryState {
    container: Container,

    /// Registration order; names are unique.
    tweaks: RefCell<Vec<Tweak>>,

    /// Index-aligned with `tweaks`. Control ids can collide, names can't.
    groups: RefCell<Vec<ControlGroup>>,

    callbacks: RefCell<Vec<TweakFn>>,
}

/// Shared handle to a set of tweaks bound to one rendering surface.
#[derive(Clone)]
pub struct Registry {
    inner: Rc<RegistryState>,
}

impl Registry {
    /// Empty registry drawing onto `container`.
    pub fn new(container: Container) -> Self {
        Self {
            inner: Rc::new(RegistryState {
                container,
                tweaks: RefCell::new(Vec::new()),
                groups: RefCell::new(Vec::new()),
                callbacks: RefCell::new(Vec::new()),
            }),
        }
    }

    /// Register `tweak` and build its controls.
    ///
    /// If a tweak with the same name is already registered, that one is
    /// returned untouched and `tweak` is dropped: no controls are built
    /// and its bounds are not merged. First registration wins.
    pub fn add(&self, tweak: Tweak) -> Tweak {
        if let Some(existing) = self.get(tweak.name()) {
            return existing;
        }

        self.inner.tweaks.borrow_mut().push(tweak.clone());

        let group = ControlGroup::for_tweak(&tweak);
        self.bind(&tweak, &group);
        self.inner.groups.borrow_mut().push(group.clone());

        log::debug!(
            "registered tweak {:?} (value {}, range {}..{} step {})",
            tweak.name(),
            tweak.get(),
            tweak.min(),
            tweak.max(),
            tweak.step()
        );

        self.inner.container.append(group);
        tweak
    }

    /// Append a listener called with the tweak after any owned tweak changes.
    ///
    /// Controls are already up to date when it runs.
    pub fn on_tweak(&self, func: impl Fn(&Tweak) + 'static) {
        self.inner.callbacks.borrow_mut().push(Rc::new(func));
    }

    /// Registered tweaks in registration order.
    pub fn tweaks(&self) -> Vec<Tweak> {
        self.inner.tweaks.borrow().clone()
    }

    pub fn get(&self, name: &str) -> Option<Tweak> {
        self.inner
            .tweaks
            .borrow()
            .iter()
            .find(|t| t.name() == name)
            .cloned()
    }

    /// Controls built for the tweak called `name`.
    pub fn control_group(&self, name: &str) -> Option<ControlGroup> {
        let index = self
            .inner
            .tweaks
            .borrow()
            .iter()
            .position(|t| t.name() == name)?;
        self.inner.groups.borrow().get(index).cloned()
    }

    /// The rendering surface, for the host to mount.
    pub fn container(&self) -> Container {
        self.inner.container.clone()
    }

    pub fn len(&self) -> usize {
        self.inner.tweaks.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.tweaks.borrow().is_empty()
    }

    pub fn ptr_eq(&self, other: &Registry) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Wire controls and tweak together.
    ///
    /// Closures hold weak handles so the tweak, its controls and this
    /// registry never keep each other alive.
    fn bind(&self, tweak: &Tweak, group: &ControlGroup) {
        for input in [&group.number, &group.slider] {
            let target = tweak.downgrade();
            input.on_input(move |text| {
                if let Some(tweak) = target.upgrade() {
                    tweak.set(parse_value(text));
                }
            });
        }

        let target = tweak.downgrade();
        group.reset.on_click(move || {
            if let Some(tweak) = target.upgrade() {
                tweak.set(tweak.initial());
            }
        });

        let target = tweak.downgrade();
        let registry: Weak<RegistryState> = Rc::downgrade(&self.inner);
        let controls = group.clone();
        tweak.on_change(move |_| {
            let Some(tweak) = target.upgrade() else {
                return;
            };
            controls.sync(&tweak);

            if let Some(inner) = registry.upgrade() {
                Registry { inner }.notify(&tweak);
            }
        });
    }

    fn notify(&self, tweak: &Tweak) {
        let callbacks = self.inner.callbacks.borrow().clone();
        for callback in &callbacks {
            callback(tweak);
        }
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self
            .inner
            .tweaks
            .borrow()
            .iter()
            .map(|t| t.name().to_string())
            .collect();
        f.debug_struct("Registry")
            .field("tweaks", &names)
            .field("listeners", &self.inner.callbacks.borrow().len())
            .finish()
    }
}
