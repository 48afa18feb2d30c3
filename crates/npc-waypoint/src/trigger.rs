//! Waypoint triggers.
//!
//! Triggers are a closed set of kinds.  Each one runs against the NPC and
//! returns a [`TriggerEffect`]; the engine branches on that value instead of
//! asking which kind of trigger it holds.

use std::fmt;

use npc_core::Point;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{Npc, TriggerResult};

/// What the chain should do after a trigger ran.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TriggerEffect {
    /// Run the next trigger immediately.
    Continue,
    /// Pause the route and resume the chain after this many ticks.
    Pause(u64),
}

// ── DelayTrigger ──────────────────────────────────────────────────────────────

/// Holds the route still for `delay` ticks.  Non-positive delays are a
/// transparent pass-through.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct DelayTrigger {
    #[serde(default)]
    delay: i32,
}

impl DelayTrigger {
    pub fn new(delay: i32) -> Self {
        Self { delay }
    }

    /// The raw configured delay, which may be zero or negative.
    pub fn delay(&self) -> i32 {
        self.delay
    }

    /// Ticks to pause for, or `None` when this trigger never pauses.
    pub fn pause_ticks(&self) -> Option<u64> {
        u64::try_from(self.delay).ok().filter(|&t| t > 0)
    }

    pub fn description(&self) -> String {
        format!("Delay for {} ticks", self.delay)
    }
}

// ── Trigger ───────────────────────────────────────────────────────────────────

/// A unit of scripted behaviour attached to a waypoint.
///
/// Persisted as a tagged record, e.g. `{"type": "delay", "delay": 40}`.
/// Identity is positional: a waypoint's triggers are addressed by index.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Trigger {
    Delay(DelayTrigger),

    /// Move the NPC instantly to `destination`.
    Teleport { destination: Point },

    /// Change the NPC's movement speed multiplier.
    Speed { modifier: f32 },

    /// Fire a named scripted hook on the NPC.
    Signal { name: String },
}

impl Trigger {
    pub fn delay(ticks: i32) -> Self {
        Trigger::Delay(DelayTrigger::new(ticks))
    }

    pub fn signal(name: impl Into<String>) -> Self {
        Trigger::Signal { name: name.into() }
    }

    /// Short human-readable form, as shown in trigger listings.
    pub fn description(&self) -> String {
        match self {
            Trigger::Delay(d)                 => d.description(),
            Trigger::Teleport { destination } => format!("Teleport to {destination}"),
            Trigger::Speed { modifier }       => format!("Speed change to {modifier}"),
            Trigger::Signal { name }          => format!("Signal {name:?}"),
        }
    }

    /// Apply this trigger to `npc`, which has just reached the waypoint at
    /// `at`.
    pub fn on_waypoint_reached<A: Npc + ?Sized>(
        &self,
        npc: &mut A,
        at:  Point,
    ) -> TriggerResult<TriggerEffect> {
        debug!(npc = %npc.id(), waypoint = %at, trigger = %self, "running trigger");
        match self {
            Trigger::Delay(d) => Ok(match d.pause_ticks() {
                Some(ticks) => TriggerEffect::Pause(ticks),
                None        => TriggerEffect::Continue,
            }),
            Trigger::Teleport { destination } => {
                npc.teleport(*destination)?;
                Ok(TriggerEffect::Continue)
            }
            Trigger::Speed { modifier } => {
                npc.set_speed_modifier(*modifier);
                Ok(TriggerEffect::Continue)
            }
            Trigger::Signal { name } => {
                npc.signal(name)?;
                Ok(TriggerEffect::Continue)
            }
        }
    }
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description())
    }
}
