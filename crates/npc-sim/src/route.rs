//! `RouteWalker`: walks one NPC through its waypoints, one leg at a time.

use std::cell::RefCell;
use std::rc::Rc;

use npc_core::{AgentId, Locatable, Point};
use npc_navigation::{CancelReason, LinearFollower, NavigationStrategy, NavigatorParameters};
use npc_schedule::Scheduler;
use npc_waypoint::{ChainOutcome, Npc, RouteFollower, SharedWaypoint, Waypoint, on_reach};
use tracing::{debug, trace, warn};

use crate::SimNpc;

/// Shared handle to a simulated NPC.
pub type NpcHandle = Rc<RefCell<SimNpc>>;

type Leg = NavigationStrategy<NpcHandle, LinearFollower<NpcHandle>>;

/// What a walker did during one tick.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum WalkEvent {
    /// Paused by a trigger, despawned, or otherwise waiting.
    Idle,
    /// Still travelling toward waypoint `index`.
    Moving { index: usize },
    /// Arrived at waypoint `index` and ran its triggers.
    Reached { index: usize, at: Point, outcome: ChainOutcome },
    /// The leg toward waypoint `index` was abandoned.
    Cancelled { index: usize, target: Point, reason: CancelReason },
    /// A non-cyclic route ran out of waypoints this tick.
    Finished,
}

/// Drives one NPC along an ordered list of waypoints.
///
/// Each leg is a fresh [`NavigationStrategy`] toward the next waypoint.  On
/// arrival the waypoint's trigger chain runs; on cancellation the walker
/// logs and moves on to the following waypoint without retrying.  While the
/// NPC's route is paused the walker does nothing.
///
/// The NPC's speed modifier is read when a leg starts, so a speed trigger
/// takes effect from the next leg.
pub struct RouteWalker {
    npc:      NpcHandle,
    route:    Vec<SharedWaypoint>,
    params:   NavigatorParameters,
    cyclic:   bool,
    next:     usize,
    leg:      Option<Leg>,
    finished: bool,
}

impl RouteWalker {
    pub fn new(npc: NpcHandle, route: Vec<Waypoint>, params: NavigatorParameters, cyclic: bool) -> Self {
        Self {
            npc,
            route: route.into_iter().map(|w| Rc::new(RefCell::new(w))).collect(),
            params,
            cyclic,
            next: 0,
            leg: None,
            finished: false,
        }
    }

    pub fn npc(&self) -> &NpcHandle {
        &self.npc
    }

    pub fn npc_id(&self) -> AgentId {
        self.npc.borrow().id()
    }

    /// Waypoints are shared, so editing one here is seen by chains paused
    /// on it.
    pub fn route(&self) -> &[SharedWaypoint] {
        &self.route
    }

    /// Index of the waypoint currently (or next) being walked to.
    pub fn next_index(&self) -> usize {
        self.next
    }

    pub fn is_cyclic(&self) -> bool {
        self.cyclic
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Target of the leg in progress, if any.
    pub fn current_target(&self) -> Option<Point> {
        self.leg.as_ref().map(|leg| leg.target())
    }

    /// Abandon the current leg and stop walking for good.
    pub fn stop(&mut self) {
        if let Some(mut leg) = self.leg.take() {
            leg.cancel(CancelReason::Stopped);
        }
        self.finished = true;
    }

    /// Advance one tick.
    pub fn tick(&mut self, scheduler: &mut dyn Scheduler) -> WalkEvent {
        if self.finished {
            return WalkEvent::Idle;
        }
        if !self.npc.borrow().is_spawned() {
            return match self.leg.take() {
                Some(mut leg) => {
                    leg.cancel(CancelReason::Despawned);
                    self.cancelled(leg)
                }
                None => WalkEvent::Idle,
            };
        }
        if self.npc.borrow().route().is_paused() {
            return WalkEvent::Idle;
        }

        if self.leg.is_none() {
            if self.next >= self.route.len() {
                if self.cyclic && !self.route.is_empty() {
                    self.next = 0;
                } else {
                    debug!(npc = %self.npc_id(), "route finished");
                    self.finished = true;
                    return WalkEvent::Finished;
                }
            }
            self.leg = Some(self.start_leg());
        }

        let Some(leg) = self.leg.as_mut() else {
            return WalkEvent::Idle;
        };
        if !leg.update() {
            trace!(npc = %self.npc_id(), at = %self.npc.location(), index = self.next, "moving");
            return WalkEvent::Moving { index: self.next };
        }

        let Some(mut leg) = self.leg.take() else {
            return WalkEvent::Idle;
        };
        if leg.cancel_reason().is_some() {
            return self.cancelled(leg);
        }
        // The follower ran out of path without entering the arrival box.
        if !self.npc.location().within_arrival(leg.target(), leg.params().distance_margin) {
            leg.cancel(CancelReason::Unreachable);
            return self.cancelled(leg);
        }

        let index = self.next;
        let waypoint = Rc::clone(&self.route[index]);
        let at = waypoint.borrow().location();
        debug!(npc = %self.npc_id(), index, waypoint = %at, "waypoint reached");
        self.next += 1;
        let outcome = on_reach(&waypoint, &self.npc, scheduler);
        WalkEvent::Reached { index, at, outcome }
    }

    fn start_leg(&self) -> Leg {
        let target = self.route[self.next].borrow().location();
        let modifier = f64::from(self.npc.borrow().speed_modifier()).max(0.0);
        let params = self.params.clone().with_speed(self.params.speed * modifier);
        let follower = LinearFollower::new(Rc::clone(&self.npc), [target], &params);
        trace!(npc = %self.npc_id(), index = self.next, destination = %target, speed = params.speed, "leg started");
        NavigationStrategy::new(Rc::clone(&self.npc), follower, target, params)
    }

    fn cancelled(&mut self, leg: Leg) -> WalkEvent {
        let index = self.next;
        let target = leg.target();
        // Only reached through paths that set a reason.
        let reason = leg.cancel_reason().unwrap_or(CancelReason::Stopped);
        warn!(npc = %self.npc_id(), index, destination = %target, %reason, "navigation cancelled; skipping waypoint");
        self.next += 1;
        WalkEvent::Cancelled { index, target, reason }
    }
}
