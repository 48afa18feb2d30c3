//! Simulation observer trait for progress reporting and data collection.

use npc_core::{AgentId, Point, Tick};
use npc_navigation::CancelReason;
use npc_waypoint::ChainOutcome;

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// tick loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: arrival printer
///
/// ```rust,ignore
/// struct ArrivalPrinter;
///
/// impl SimObserver for ArrivalPrinter {
///     fn on_waypoint_reached(&mut self, tick: Tick, npc: AgentId, index: usize, at: Point, _: ChainOutcome) {
///         println!("{tick}: {npc} reached waypoint {index} at {at}");
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called after an NPC arrived at waypoint `index` and its trigger chain
    /// ran as far as it could this tick.
    fn on_waypoint_reached(
        &mut self,
        _tick:    Tick,
        _npc:     AgentId,
        _index:   usize,
        _at:      Point,
        _outcome: ChainOutcome,
    ) {}

    /// Called when a leg toward waypoint `index` was abandoned.
    fn on_navigation_cancelled(
        &mut self,
        _tick:   Tick,
        _npc:    AgentId,
        _index:  usize,
        _target: Point,
        _reason: CancelReason,
    ) {}

    /// Called at the end of each tick.
    ///
    /// `resumed` is the number of deferred trigger-chain resumes that fired
    /// this tick; `moving` is the number of NPCs that walked.
    fn on_tick_end(&mut self, _tick: Tick, _resumed: usize, _moving: usize) {}

    /// Called once after the final tick completes.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want progress callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
