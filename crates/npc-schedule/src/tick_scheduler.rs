//! `TickScheduler`: sparse per-tick task queue.
//!
//! Tasks are bucketed by the tick they become due.  Each `tick()` advances
//! the clock by one and drains every bucket at or before the new tick, in
//! ascending tick order and, within a tick, in scheduling order.  Ticks with
//! no tasks cost nothing beyond a `BTreeMap` peek.

use std::collections::{BTreeMap, HashMap};

use npc_core::{TaskId, Tick};
use tracing::trace;

use crate::{Scheduler, Task};

/// A deterministic scheduler driven by explicit `tick()` calls.
///
/// This is both the production scheduler used by `npc-sim` and the fake
/// clock used in tests: nothing fires until the owner advances it.
#[derive(Default)]
pub struct TickScheduler {
    inner:   BTreeMap<Tick, Vec<(TaskId, Task)>>,
    /// `TaskId → due tick` for every pending task, used by `cancel`.
    index:   HashMap<TaskId, Tick>,
    now:     Tick,
    next_id: u64,
}

impl TickScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// A scheduler whose clock starts at `start` instead of tick 0.
    pub fn starting_at(start: Tick) -> Self {
        Self { now: start, ..Self::default() }
    }

    /// Advance one tick and run every task that is now due.  Returns the
    /// number of tasks run.
    pub fn tick(&mut self) -> usize {
        self.now = self.now + 1;
        self.run_due()
    }

    /// Advance `n` ticks, returning the total number of tasks run.
    pub fn run_ticks(&mut self, n: u64) -> usize {
        (0..n).map(|_| self.tick()).sum()
    }

    /// Tick forward until the clock reads `target`, running due tasks along
    /// the way.  A `target` at or before the current tick is a no-op.
    pub fn advance_to(&mut self, target: Tick) -> usize {
        let mut ran = 0;
        while self.now < target {
            ran += self.tick();
        }
        ran
    }

    /// Run every task due at or before the current tick without advancing.
    ///
    /// Tasks scheduled by a running task always land in a future tick, so
    /// this loop terminates.
    pub fn run_due(&mut self) -> usize {
        let mut ran = 0;
        while let Some(entry) = self.inner.first_entry() {
            if *entry.key() > self.now {
                break;
            }
            let due = entry.remove();
            for (id, task) in due {
                // Cancelled by an earlier task in the same batch.
                if self.index.remove(&id).is_none() {
                    continue;
                }
                trace!(task = %id, tick = %self.now, "running scheduled task");
                task(self);
                ran += 1;
            }
        }
        ran
    }

    /// The earliest tick with at least one pending task, or `None` if empty.
    pub fn next_tick(&self) -> Option<Tick> {
        self.inner.keys().next().copied()
    }

    /// Total number of pending tasks.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// `true` if `id` is still waiting to run.
    pub fn is_pending(&self, id: TaskId) -> bool {
        self.index.contains_key(&id)
    }
}

impl Scheduler for TickScheduler {
    fn now(&self) -> Tick {
        self.now
    }

    fn schedule_once(&mut self, delay_ticks: u64, task: Task) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        // `Tick + u64` saturates, so an enormous delay never wraps.
        let due = self.now + delay_ticks.max(1);
        self.inner.entry(due).or_default().push((id, task));
        self.index.insert(id, due);
        trace!(task = %id, due = %due, "scheduled task");
        id
    }

    fn cancel(&mut self, id: TaskId) -> bool {
        let Some(due) = self.index.remove(&id) else {
            return false;
        };
        if let Some(bucket) = self.inner.get_mut(&due) {
            bucket.retain(|(queued, _)| *queued != id);
            if bucket.is_empty() {
                self.inner.remove(&due);
            }
        }
        true
    }
}
