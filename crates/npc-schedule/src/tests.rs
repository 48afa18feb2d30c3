//! Unit tests for npc-schedule.

use std::cell::RefCell;
use std::rc::Rc;

use npc_core::Tick;

use crate::{Scheduler, Task, TickScheduler};

// ── Helpers ───────────────────────────────────────────────────────────────────

type Log = Rc<RefCell<Vec<(&'static str, Tick)>>>;

/// A task that records `label` and the tick it ran at.
fn record(log: &Log, label: &'static str) -> Task {
    let log = Rc::clone(log);
    Box::new(move |s: &mut dyn Scheduler| log.borrow_mut().push((label, s.now())))
}

// ── Timing ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod timing {
    use super::*;

    #[test]
    fn fires_exactly_at_delay() {
        let log: Log = Rc::default();
        let mut s = TickScheduler::new();
        s.schedule_once(5, record(&log, "a"));

        assert_eq!(s.run_ticks(4), 0);
        assert!(log.borrow().is_empty());
        assert_eq!(s.tick(), 1);
        assert_eq!(*log.borrow(), vec![("a", Tick(5))]);
        assert!(s.is_empty());
    }

    #[test]
    fn zero_delay_runs_next_tick() {
        let log: Log = Rc::default();
        let mut s = TickScheduler::new();
        s.schedule_once(0, record(&log, "a"));
        assert_eq!(s.run_due(), 0);
        assert_eq!(s.tick(), 1);
        assert_eq!(*log.borrow(), vec![("a", Tick(1))]);
    }

    #[test]
    fn same_tick_runs_in_scheduling_order() {
        let log: Log = Rc::default();
        let mut s = TickScheduler::new();
        s.schedule_once(2, record(&log, "first"));
        s.schedule_once(1, record(&log, "early"));
        s.schedule_once(2, record(&log, "second"));
        s.run_ticks(2);
        let labels: Vec<_> = log.borrow().iter().map(|(l, _)| *l).collect();
        assert_eq!(labels, vec!["early", "first", "second"]);
    }

    #[test]
    fn huge_delay_never_fires_early() {
        let log: Log = Rc::default();
        let mut s = TickScheduler::starting_at(Tick(10));
        let id = s.schedule_once(u64::MAX, record(&log, "far"));
        assert_eq!(s.next_tick(), Some(Tick(u64::MAX)));
        assert_eq!(s.run_ticks(1_000), 0);
        assert!(log.borrow().is_empty());
        assert!(s.is_pending(id));
    }

    #[test]
    fn advance_to_catches_up() {
        let log: Log = Rc::default();
        let mut s = TickScheduler::new();
        s.schedule_once(2, record(&log, "a"));
        s.schedule_once(7, record(&log, "b"));
        assert_eq!(s.advance_to(Tick(5)), 1);
        assert_eq!(s.now(), Tick(5));
        assert_eq!(s.advance_to(Tick(3)), 0);
        assert_eq!(s.now(), Tick(5));
        assert_eq!(s.advance_to(Tick(7)), 1);
        assert_eq!(*log.borrow(), vec![("a", Tick(2)), ("b", Tick(7))]);
    }

    #[test]
    fn starting_at_offsets_due_ticks() {
        let mut s = TickScheduler::starting_at(Tick(100));
        let log: Log = Rc::default();
        s.schedule_once(3, record(&log, "a"));
        assert_eq!(s.next_tick(), Some(Tick(103)));
    }
}

// ── Re-entrancy ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod reentrancy {
    use super::*;

    #[test]
    fn task_can_reschedule_itself() {
        let log: Log = Rc::default();
        let mut s = TickScheduler::new();
        let inner = record(&log, "second");
        let outer_log = Rc::clone(&log);
        s.schedule_once(
            2,
            Box::new(move |s: &mut dyn Scheduler| {
                outer_log.borrow_mut().push(("first", s.now()));
                s.schedule_once(3, inner);
            }),
        );

        s.run_ticks(10);
        assert_eq!(*log.borrow(), vec![("first", Tick(2)), ("second", Tick(5))]);
    }

    #[test]
    fn task_scheduled_with_zero_delay_from_task_waits_a_tick() {
        let log: Log = Rc::default();
        let mut s = TickScheduler::new();
        let inner = record(&log, "inner");
        s.schedule_once(1, Box::new(move |s: &mut dyn Scheduler| {
            s.schedule_once(0, inner);
        }));
        assert_eq!(s.tick(), 1);
        assert!(log.borrow().is_empty());
        assert_eq!(s.tick(), 1);
        assert_eq!(*log.borrow(), vec![("inner", Tick(2))]);
    }
}

// ── Cancellation ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod cancellation {
    use super::*;

    #[test]
    fn cancelled_task_never_runs() {
        let log: Log = Rc::default();
        let mut s = TickScheduler::new();
        let id = s.schedule_once(3, record(&log, "a"));
        assert!(s.is_pending(id));
        assert!(s.cancel(id));
        assert!(!s.is_pending(id));
        assert!(!s.cancel(id));
        s.run_ticks(5);
        assert!(log.borrow().is_empty());
        assert_eq!(s.next_tick(), None);
    }

    #[test]
    fn cancel_from_earlier_task_in_same_tick() {
        let log: Log = Rc::default();
        let mut s = TickScheduler::new();
        let victim_slot: Rc<RefCell<Option<npc_core::TaskId>>> = Rc::default();
        let slot = Rc::clone(&victim_slot);
        s.schedule_once(1, Box::new(move |s: &mut dyn Scheduler| {
            if let Some(id) = slot.borrow_mut().take() {
                assert!(s.cancel(id));
            }
        }));
        let victim = s.schedule_once(1, record(&log, "victim"));
        *victim_slot.borrow_mut() = Some(victim);

        assert_eq!(s.tick(), 1);
        assert!(log.borrow().is_empty());
        assert!(s.is_empty());
    }

    #[test]
    fn cancel_unknown_id_is_false() {
        let mut s = TickScheduler::new();
        assert!(!s.cancel(npc_core::TaskId(42)));
    }

    #[test]
    fn len_tracks_pending() {
        let log: Log = Rc::default();
        let mut s = TickScheduler::new();
        s.schedule_once(1, record(&log, "a"));
        let b = s.schedule_once(2, record(&log, "b"));
        assert_eq!(s.len(), 2);
        s.cancel(b);
        assert_eq!(s.len(), 1);
        s.tick();
        assert_eq!(s.len(), 0);
    }
}
