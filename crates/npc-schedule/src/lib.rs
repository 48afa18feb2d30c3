//! `npc-schedule`: deferred same-thread tasks keyed by tick.
//!
//! # Crate layout
//!
//! | Module             | Contents                                             |
//! |--------------------|------------------------------------------------------|
//! | [`scheduler`]      | `Scheduler` trait, `Task` type                       |
//! | [`tick_scheduler`] | `TickScheduler` (`BTreeMap<Tick, Vec<Task>>`)        |
//!
//! # Execution model
//!
//! Everything is single-threaded and cooperative.  A task is a boxed
//! `FnOnce` that receives the scheduler when it fires, so a task can register
//! follow-up work (a trigger chain that pauses twice re-schedules itself from
//! inside its own resume task).  Suspension is always "return now, be called
//! again later"; nothing blocks.
//!
//! A task scheduled with delay `d` at tick `t` fires during the first
//! `TickScheduler::tick` that reaches `t + max(d, 1)`.

pub mod scheduler;
pub mod tick_scheduler;

#[cfg(test)]
mod tests;

pub use scheduler::{Scheduler, Task};
pub use tick_scheduler::TickScheduler;
