//! The `Sim` struct and its tick loop.

use npc_core::{AgentId, SimClock, SimConfig, Tick};
use npc_schedule::TickScheduler;

use crate::{NpcHandle, RouteWalker, SimObserver, WalkEvent};

/// The main simulation runner.
///
/// Each tick runs two phases:
///
/// 1. **Resume**: the scheduler catches up to the current tick, firing any
///    trigger chains whose delay has elapsed.  A resumed chain unpauses its
///    route before the walkers run, so the NPC moves on that same tick.
/// 2. **Walk**: every [`RouteWalker`] advances one step, in the order NPCs
///    were added.  Arrivals run trigger chains synchronously; delays inside
///    them register new resume tasks with the scheduler.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim {
    /// Global configuration (total ticks, tick duration).
    pub config: SimConfig,

    /// Simulation clock: tracks the current tick and maps to wall time.
    pub clock: SimClock,

    /// Deferred trigger-chain resumes.
    pub scheduler: TickScheduler,

    /// One walker per NPC.
    pub walkers: Vec<RouteWalker>,
}

impl Sim {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run the simulation from the current tick to `config.end_tick()`.
    ///
    /// Calls observer hooks at every tick boundary.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) {
        while self.clock.current_tick < self.config.end_tick() {
            self.step(observer);
        }
        observer.on_sim_end(self.clock.current_tick);
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`).
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) {
        for _ in 0..n {
            self.step(observer);
        }
    }

    /// The NPC with `id`, if it was added to this simulation.
    pub fn npc(&self, id: AgentId) -> Option<&NpcHandle> {
        self.walker(id).map(RouteWalker::npc)
    }

    pub fn walker(&self, id: AgentId) -> Option<&RouteWalker> {
        self.walkers.iter().find(|w| w.npc_id() == id)
    }

    pub fn walker_mut(&mut self, id: AgentId) -> Option<&mut RouteWalker> {
        self.walkers.iter_mut().find(|w| w.npc_id() == id)
    }

    /// `true` once every walker has finished its route.  Cyclic routes never
    /// finish on their own.
    pub fn is_idle(&self) -> bool {
        self.walkers.iter().all(RouteWalker::is_finished)
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn step<O: SimObserver>(&mut self, observer: &mut O) {
        let now = self.clock.current_tick;
        observer.on_tick_start(now);
        let (resumed, moving) = self.process_tick(now, observer);
        observer.on_tick_end(now, resumed, moving);
        self.clock.advance();
    }

    fn process_tick<O: SimObserver>(&mut self, now: Tick, observer: &mut O) -> (usize, usize) {
        // ── Phase 1: fire due resumes ─────────────────────────────────────
        let resumed = self.scheduler.advance_to(now);

        // ── Phase 2: walkers ──────────────────────────────────────────────
        let mut moving = 0;
        for walker in &mut self.walkers {
            match walker.tick(&mut self.scheduler) {
                WalkEvent::Moving { .. } => moving += 1,
                WalkEvent::Reached { index, at, outcome } => {
                    observer.on_waypoint_reached(now, walker.npc_id(), index, at, outcome);
                }
                WalkEvent::Cancelled { index, target, reason } => {
                    observer.on_navigation_cancelled(now, walker.npc_id(), index, target, reason);
                }
                WalkEvent::Idle | WalkEvent::Finished => {}
            }
        }
        (resumed, moving)
    }
}
