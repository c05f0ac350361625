// src/options.rs
//
// Construction options for a tweak.

use crate::registry::Registry;

/// Slider minimum used when none is given.
pub const DEFAULT_MIN: f64 = 0.0;

/// Slider maximum used when none is given.
pub const DEFAULT_MAX: f64 = 100.0;

/// Slider step used when none is given.
pub const DEFAULT_STEP: f64 = 1.0;

/// Options bundle accepted by [`create`](crate::create).
///
/// Bounds are advisory: they only shape the slider control and are never
/// enforced on [`Tweak::set`](crate::Tweak::set).
#[derive(Debug, Clone)]
pub struct TweakOptions {
    /// Slider minimum
    pub min: f64,

    /// Slider maximum
    pub max: f64,

    /// Slider granularity
    pub step: f64,

    /// Target registry. `None` means the process-wide default.
    pub registry: Option<Registry>,
}

impl Default for TweakOptions {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN,
            max: DEFAULT_MAX,
            step: DEFAULT_STEP,
            registry: None,
        }
    }
}

impl TweakOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn min(mut self, min: f64) -> Self {
        self.min = min;
        self
    }

    pub fn max(mut self, max: f64) -> Self {
        self.max = max;
        self
    }

    pub fn range(mut self, min: f64, max: f64) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    pub fn step(mut self, step: f64) -> Self {
        self.step = step;
        self
    }

    /// Register into `registry` instead of the default one.
    pub fn registry(mut self, registry: &Registry) -> Self {
        self.registry = Some(registry.clone());
        self
    }
}
