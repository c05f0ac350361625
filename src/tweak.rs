// src/tweak.rs
//
// The tweak value cell.
//
// A Tweak is a named, externally mutable f64 with advisory slider bounds
// and an ordered list of change listeners. Handles are cheap to clone and
// all clones share one cell.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Rem, Sub};
use std::rc::{Rc, Weak};

use crate::format::format_value;
use crate::options::TweakOptions;

type ChangeFn = Rc<dyn Fn(f64)>;

struct TweakInner {
    name: String,
    initial: f64,
    min: f64,
    max: f64,
    step: f64,
    value: Cell<f64>,
    callbacks: RefCell<Vec<ChangeFn>>,
}

/// A live-editable number.
///
/// Use it where a number is expected: `f64::from(&t)`, `&t * 2.0`,
/// `t > 10.0` and `format!("{t}")` all observe the current value.
///
/// There is no truthiness conversion. A tweak is never "falsy"; write
/// `t.get() != 0.0` before using it as a condition.
#[derive(Clone)]
pub struct Tweak {
    inner: Rc<TweakInner>,
}

/// Non-owning handle, used by bindings that must not keep a tweak alive.
#[derive(Clone)]
pub(crate) struct WeakTweak(Weak<TweakInner>);

impl WeakTweak {
    pub(crate) fn upgrade(&self) -> Option<Tweak> {
        self.0.upgrade().map(|inner| Tweak { inner })
    }
}

impl Tweak {
    /// Create an unregistered tweak holding `initial`.
    ///
    /// `options.registry` is ignored here; see [`create`](crate::create)
    /// for the registering entry point.
    pub fn new(name: impl Into<String>, initial: f64, options: &TweakOptions) -> Self {
        Self {
            inner: Rc::new(TweakInner {
                name: name.into(),
                initial,
                min: options.min,
                max: options.max,
                step: options.step,
                value: Cell::new(initial),
                callbacks: RefCell::new(Vec::new()),
            }),
        }
    }

    /// Current value.
    #[inline]
    pub fn get(&self) -> f64 {
        self.inner.value.get()
    }

    /// Store `value` and notify every listener in subscription order.
    ///
    /// Nothing is clamped or deduplicated: setting the current value again
    /// still notifies. Listeners may call back into this tweak; a listener
    /// added during a notification only sees later changes.
    pub fn set(&self, value: f64) {
        self.inner.value.set(value);
        log::trace!("tweak {:?} = {}", self.inner.name, value);

        let callbacks = self.inner.callbacks.borrow().clone();
        for callback in &callbacks {
            callback(value);
        }
    }

    /// Go back to the initial value. Same notifications as `set`.
    pub fn reset(&self) {
        self.set(self.inner.initial);
    }

    /// Whether the value equals the initial one (NaN never does).
    pub fn is_default(&self) -> bool {
        self.get() == self.inner.initial
    }

    /// Append a change listener. There is no way to remove it.
    pub fn on_change(&self, func: impl Fn(f64) + 'static) {
        self.inner.callbacks.borrow_mut().push(Rc::new(func));
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    pub fn initial(&self) -> f64 {
        self.inner.initial
    }

    pub fn min(&self) -> f64 {
        self.inner.min
    }

    pub fn max(&self) -> f64 {
        self.inner.max
    }

    pub fn step(&self) -> f64 {
        self.inner.step
    }

    /// True when both handles point at the same cell.
    pub fn ptr_eq(&self, other: &Tweak) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    pub(crate) fn downgrade(&self) -> WeakTweak {
        WeakTweak(Rc::downgrade(&self.inner))
    }

    #[cfg(test)]
    pub(crate) fn listener_count(&self) -> usize {
        self.inner.callbacks.borrow().len()
    }
}

impl fmt::Debug for Tweak {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tweak")
            .field("name", &self.inner.name)
            .field("value", &self.get())
            .field("initial", &self.inner.initial)
            .field("min", &self.inner.min)
            .field("max", &self.inner.max)
            .field("step", &self.inner.step)
            .finish()
    }
}

// ───────────────────────────────────────────────────────────────────────────
// Coercion view
// ───────────────────────────────────────────────────────────────────────────

impl fmt::Display for Tweak {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&format_value(self.get()))
    }
}

impl From<&Tweak> for f64 {
    fn from(tweak: &Tweak) -> f64 {
        tweak.get()
    }
}

impl From<Tweak> for f64 {
    fn from(tweak: Tweak) -> f64 {
        tweak.get()
    }
}

impl PartialEq<f64> for Tweak {
    fn eq(&self, other: &f64) -> bool {
        self.get() == *other
    }
}

impl PartialEq<Tweak> for f64 {
    fn eq(&self, other: &Tweak) -> bool {
        *self == other.get()
    }
}

impl PartialOrd<f64> for Tweak {
    fn partial_cmp(&self, other: &f64) -> Option<std::cmp::Ordering> {
        self.get().partial_cmp(other)
    }
}

impl PartialOrd<Tweak> for f64 {
    fn partial_cmp(&self, other: &Tweak) -> Option<std::cmp::Ordering> {
        self.partial_cmp(&other.get())
    }
}

impl Neg for &Tweak {
    type Output = f64;

    fn neg(self) -> f64 {
        -self.get()
    }
}

impl Neg for Tweak {
    type Output = f64;

    fn neg(self) -> f64 {
        -self.get()
    }
}

macro_rules! coercing_op {
    ($op_trait:ident, $method:ident, $op:tt) => {
        impl $op_trait<f64> for &Tweak {
            type Output = f64;

            fn $method(self, rhs: f64) -> f64 {
                self.get() $op rhs
            }
        }

        impl $op_trait<f64> for Tweak {
            type Output = f64;

            fn $method(self, rhs: f64) -> f64 {
                self.get() $op rhs
            }
        }

        impl $op_trait<&Tweak> for f64 {
            type Output = f64;

            fn $method(self, rhs: &Tweak) -> f64 {
                self $op rhs.get()
            }
        }

        impl $op_trait<Tweak> for f64 {
            type Output = f64;

            fn $method(self, rhs: Tweak) -> f64 {
                self $op rhs.get()
            }
        }

        impl $op_trait<&Tweak> for &Tweak {
            type Output = f64;

            fn $method(self, rhs: &Tweak) -> f64 {
                self.get() $op rhs.get()
            }
        }
    };
}

coercing_op!(Add, add, +);
coercing_op!(Sub, sub, -);
coercing_op!(Mul, mul, *);
coercing_op!(Div, div, /);
coercing_op!(Rem, rem, %);
