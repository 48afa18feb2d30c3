//! The `Scheduler` trait: the injected delayed-task collaborator.

use npc_core::{TaskId, Tick};

/// A one-shot deferred callback.  Receives the scheduler that ran it so it
/// can schedule further work.
pub type Task = Box<dyn FnOnce(&mut dyn Scheduler)>;

/// Registers one-shot callbacks to run on the driver's thread after a number
/// of ticks.
///
/// Implementations guarantee "at least": a task never fires earlier than
/// `delay_ticks` after it was scheduled, but may fire later.  A delay of zero
/// is treated as one tick so a task never runs inside the call that
/// scheduled it.
pub trait Scheduler {
    /// The tick the scheduler is currently at.
    fn now(&self) -> Tick;

    /// Run `task` once, no earlier than `delay_ticks` ticks from now.
    fn schedule_once(&mut self, delay_ticks: u64, task: Task) -> TaskId;

    /// Drop a pending task.  Returns `false` if it already ran or was never
    /// scheduled here.
    fn cancel(&mut self, id: TaskId) -> bool;
}
