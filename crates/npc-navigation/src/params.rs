//! Navigation parameters shared by the strategy and its follower.

use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::{NavigationError, NavigationResult};

/// A side effect run once per navigation tick (animation hooks, footstep
/// sounds, ...).  Opaque to the navigation core.
pub type TickCallback = Rc<dyn Fn()>;

/// Tunables for one navigation attempt.
///
/// The numeric fields deserialize from config files with defaults for any
/// missing key; tick callbacks are code-only and never serialized.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigatorParameters {
    /// Squared horizontal distance from the target's block centre at which
    /// the NPC counts as arrived.  Default: 2.0.
    pub distance_margin: f64,

    /// Blocks moved per tick by followers that honour it.  Default: 0.25.
    pub speed: f64,

    /// Consecutive ticks without progress before a follower gives up with
    /// [`CancelReason::Stuck`][crate::CancelReason::Stuck].  0 disables the
    /// check.  Default: 100.
    pub stationary_ticks: u32,

    #[serde(skip)]
    callbacks: Vec<TickCallback>,
}

impl NavigatorParameters {
    pub fn with_distance_margin(mut self, margin: f64) -> Self {
        self.distance_margin = margin;
        self
    }

    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_stationary_ticks(mut self, ticks: u32) -> Self {
        self.stationary_ticks = ticks;
        self
    }

    /// Register a per-tick side effect.
    pub fn add_tick_callback(&mut self, callback: impl Fn() + 'static) -> &mut Self {
        self.callbacks.push(Rc::new(callback));
        self
    }

    /// Number of registered tick callbacks.
    pub fn tick_callback_count(&self) -> usize {
        self.callbacks.len()
    }

    /// Invoke every tick callback in registration order.
    pub fn run(&self) {
        for callback in &self.callbacks {
            callback();
        }
    }

    /// Reject values that would make arrival or movement meaningless.
    pub fn validate(&self) -> NavigationResult<()> {
        if self.distance_margin.is_nan() || self.distance_margin < 0.0 {
            return Err(NavigationError::InvalidParameter {
                name:   "distance_margin",
                reason: format!("must be a non-negative number, got {}", self.distance_margin),
            });
        }
        if !(self.speed > 0.0 && self.speed.is_finite()) {
            return Err(NavigationError::InvalidParameter {
                name:   "speed",
                reason: format!("must be positive and finite, got {}", self.speed),
            });
        }
        Ok(())
    }
}

impl Default for NavigatorParameters {
    fn default() -> Self {
        Self {
            distance_margin:  2.0,
            speed:            0.25,
            stationary_ticks: 100,
            callbacks:        Vec::new(),
        }
    }
}

impl fmt::Debug for NavigatorParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NavigatorParameters")
            .field("distance_margin", &self.distance_margin)
            .field("speed", &self.speed)
            .field("stationary_ticks", &self.stationary_ticks)
            .field("callbacks", &self.callbacks.len())
            .finish()
    }
}
