//! The trigger engine: runs a waypoint's triggers with pause/resume.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use npc_core::TaskId;
use npc_schedule::Scheduler;
use tracing::{debug, warn};

use crate::{Npc, TriggerEffect, Waypoint};

/// A waypoint shared between the route that owns it and any trigger chains
/// paused on it.
pub type SharedWaypoint = Rc<RefCell<Waypoint>>;

/// How far one synchronous pass through a trigger chain got.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ChainOutcome {
    /// Every remaining trigger ran.  `ran` counts triggers invoked in this
    /// pass, including ones that failed.
    Completed { ran: usize },

    /// A delay paused the chain.  `task` will resume it at index `next`
    /// after `ticks` ticks.
    Paused { next: usize, ticks: u64, task: TaskId },
}

/// Run the triggers of `waypoint` for `npc`, which has just arrived there.
///
/// Triggers run synchronously in index order until one asks for a pause.  At
/// that point the NPC's route is paused, a resume task is registered with
/// `scheduler`, and control returns.  When the task fires it unpauses the
/// route and continues from the next index against the waypoint's trigger
/// list as it is at that moment.
///
/// A trigger that returns an error is logged and skipped; the chain carries
/// on with the next trigger.
///
/// Every reach runs the chain from index 0, whatever the NPC's state;
/// triggers that cannot apply to it report an error and are skipped.
///
/// The resume task holds the waypoint and NPC weakly.  If either has been
/// dropped, or the NPC is no longer spawned, the resume is a silent no-op.
pub fn on_reach<A: Npc + 'static>(
    waypoint:  &SharedWaypoint,
    npc:       &Rc<RefCell<A>>,
    scheduler: &mut dyn Scheduler,
) -> ChainOutcome {
    if waypoint.borrow().triggers().is_empty() {
        return ChainOutcome::Completed { ran: 0 };
    }
    run_chain(waypoint, npc, 0, scheduler)
}

fn run_chain<A: Npc + 'static>(
    wp:        &SharedWaypoint,
    agent:     &Rc<RefCell<A>>,
    start:     usize,
    scheduler: &mut dyn Scheduler,
) -> ChainOutcome {
    let mut ran = 0;
    let mut index = start;
    loop {
        // Re-read the live list each step; no borrow of the waypoint is held
        // while a trigger runs.
        let (trigger, at) = {
            let wp = wp.borrow();
            match wp.triggers().get(index) {
                Some(t) => (t.clone(), wp.location()),
                None    => break,
            }
        };

        let effect = trigger.on_waypoint_reached(&mut *agent.borrow_mut(), at);
        ran += 1;

        match effect {
            Ok(TriggerEffect::Continue) => {}
            Ok(TriggerEffect::Pause(ticks)) => {
                set_route_paused(agent, true);
                let next = index + 1;
                let (waypoint, npc) = (Rc::downgrade(wp), Rc::downgrade(agent));
                let task = scheduler.schedule_once(
                    ticks,
                    Box::new(move |scheduler: &mut dyn Scheduler| resume(waypoint, npc, next, scheduler)),
                );
                debug!(npc = %agent.borrow().id(), waypoint = %at, next, ticks, "trigger chain paused");
                return ChainOutcome::Paused { next, ticks, task };
            }
            Err(e) => {
                warn!(npc = %agent.borrow().id(), waypoint = %at, index, %trigger, error = %e, "trigger failed; continuing");
            }
        }
        index += 1;
    }

    ChainOutcome::Completed { ran }
}

fn resume<A: Npc + 'static>(
    waypoint:  Weak<RefCell<Waypoint>>,
    npc:       Weak<RefCell<A>>,
    next:      usize,
    scheduler: &mut dyn Scheduler,
) {
    let Some(agent) = npc.upgrade() else {
        debug!(next, "resume for dropped npc ignored");
        return;
    };
    if !agent.borrow().is_spawned() {
        debug!(npc = %agent.borrow().id(), next, "npc despawned; trigger chain abandoned");
        return;
    }
    set_route_paused(&agent, false);
    let Some(wp) = waypoint.upgrade() else {
        debug!(npc = %agent.borrow().id(), next, "resume for dropped waypoint ignored");
        return;
    };
    run_chain(&wp, &agent, next, scheduler);
}

fn set_route_paused<A: Npc>(agent: &Rc<RefCell<A>>, paused: bool) {
    let mut agent = agent.borrow_mut();
    if let Some(route) = agent.route_follower() {
        route.set_paused(paused);
    }
}
