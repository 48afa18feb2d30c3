//! The simulated NPC: a position plus the state triggers act on.

use npc_core::{AgentId, Locatable, Movable, Point};
use npc_waypoint::{Npc, RouteFollower, TriggerError, TriggerResult};
use tracing::debug;

/// Pause flag of the route an NPC is walking.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RouteState {
    paused: bool,
}

impl RouteFollower for RouteState {
    fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    fn is_paused(&self) -> bool {
        self.paused
    }
}

/// An NPC living in the simulation.
///
/// Movement is rejected while the NPC is despawned or anchored.  Signals are
/// recorded in arrival order so callers can see which scripted hooks fired.
#[derive(Clone, Debug)]
pub struct SimNpc {
    id:             AgentId,
    location:       Point,
    spawned:        bool,
    anchored:       bool,
    speed_modifier: f32,
    signals:        Vec<String>,
    route:          RouteState,
}

impl SimNpc {
    pub fn new(id: AgentId, location: Point) -> Self {
        Self {
            id,
            location,
            spawned:        true,
            anchored:       false,
            speed_modifier: 1.0,
            signals:        Vec::new(),
            route:          RouteState::default(),
        }
    }

    pub fn despawn(&mut self) {
        debug!(npc = %self.id, "despawned");
        self.spawned = false;
    }

    /// Pin the NPC in place; every move is refused until released.
    pub fn set_anchored(&mut self, anchored: bool) {
        self.anchored = anchored;
    }

    pub fn speed_modifier(&self) -> f32 {
        self.speed_modifier
    }

    /// Names of every signal delivered so far, oldest first.
    pub fn signals(&self) -> &[String] {
        &self.signals
    }

    pub fn route(&self) -> &RouteState {
        &self.route
    }
}

impl Locatable for SimNpc {
    fn location(&self) -> Point {
        self.location
    }
}

impl Movable for SimNpc {
    fn move_to(&mut self, to: Point) -> bool {
        if !self.spawned || self.anchored {
            return false;
        }
        self.location = to;
        true
    }
}

impl Npc for SimNpc {
    fn id(&self) -> AgentId {
        self.id
    }

    fn is_spawned(&self) -> bool {
        self.spawned
    }

    fn teleport(&mut self, to: Point) -> TriggerResult<()> {
        if !self.spawned {
            return Err(TriggerError::NotSpawned);
        }
        debug!(npc = %self.id, from = %self.location, to = %to, "teleport");
        self.location = to;
        Ok(())
    }

    fn set_speed_modifier(&mut self, modifier: f32) {
        self.speed_modifier = modifier;
    }

    fn signal(&mut self, name: &str) -> TriggerResult<()> {
        if !self.spawned {
            return Err(TriggerError::NotSpawned);
        }
        debug!(npc = %self.id, signal = name, "signal");
        self.signals.push(name.to_string());
        Ok(())
    }

    fn route_follower(&mut self) -> Option<&mut dyn RouteFollower> {
        Some(&mut self.route)
    }
}
