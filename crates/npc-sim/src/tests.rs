//! Integration tests for npc-sim.

use npc_core::{AgentId, Locatable, Point, SimConfig, Tick};
use npc_navigation::{CancelReason, NavigatorParameters};
use npc_waypoint::{ChainOutcome, RouteFollower, Trigger, Waypoint};

use crate::{NoopObserver, SimBuilder, SimNpc, SimObserver};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn test_config(total_ticks: u64) -> SimConfig {
    SimConfig { tick_duration_ms: 50, total_ticks }
}

fn at(x: f64) -> Point {
    Point::new(x, 64.0, 0.5)
}

fn params(speed: f64) -> NavigatorParameters {
    NavigatorParameters::default().with_speed(speed)
}

fn signals(sim: &crate::Sim, id: AgentId) -> Vec<String> {
    sim.npc(id).map(|n| n.borrow().signals().to_vec()).unwrap_or_default()
}

fn x_of(sim: &crate::Sim, id: AgentId) -> f64 {
    sim.npc(id).map(|n| n.location().x).unwrap_or(f64::NAN)
}

#[derive(Debug, PartialEq)]
enum Event {
    Reached { tick: u64, index: usize },
    Cancelled { tick: u64, index: usize, reason: CancelReason },
}

#[derive(Default)]
struct Recorder {
    events:  Vec<Event>,
    ticks:   u64,
    ended:   Option<Tick>,
    resumed: usize,
}

impl SimObserver for Recorder {
    fn on_tick_start(&mut self, _tick: Tick) {
        self.ticks += 1;
    }

    fn on_waypoint_reached(&mut self, tick: Tick, _npc: AgentId, index: usize, _at: Point, _outcome: ChainOutcome) {
        self.events.push(Event::Reached { tick: tick.0, index });
    }

    fn on_navigation_cancelled(
        &mut self,
        tick:    Tick,
        _npc:    AgentId,
        index:   usize,
        _target: Point,
        reason:  CancelReason,
    ) {
        self.events.push(Event::Cancelled { tick: tick.0, index, reason });
    }

    fn on_tick_end(&mut self, _tick: Tick, resumed: usize, _moving: usize) {
        self.resumed += resumed;
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        self.ended = Some(final_tick);
    }
}

const ID: AgentId = AgentId(0);

// ── SimBuilder validation ─────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;
    use crate::SimError;

    #[test]
    fn builds_successfully_with_defaults() {
        let sim = SimBuilder::new(test_config(10))
            .npc(SimNpc::new(ID, at(0.5)), vec![Waypoint::new(at(3.5))])
            .build()
            .unwrap();
        assert_eq!(sim.walkers.len(), 1);
        assert!(sim.npc(ID).is_some());
        assert!(sim.npc(AgentId(7)).is_none());
    }

    #[test]
    fn zero_tick_duration_errors() {
        let config = SimConfig { tick_duration_ms: 0, total_ticks: 10 };
        assert!(matches!(SimBuilder::new(config).build(), Err(SimError::Config(_))));
    }

    #[test]
    fn invalid_params_error() {
        let result = SimBuilder::new(test_config(10)).params(params(0.0)).build();
        assert!(matches!(result, Err(SimError::Navigation(_))));
    }

    #[test]
    fn duplicate_npc_errors() {
        let result = SimBuilder::new(test_config(10))
            .npc(SimNpc::new(ID, at(0.5)), vec![])
            .patrol(SimNpc::new(ID, at(5.5)), vec![])
            .build();
        assert!(matches!(result, Err(SimError::DuplicateNpc(id)) if id == ID));
    }
}

// ── Basic run ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod run_tests {
    use super::*;

    #[test]
    fn runs_to_end_tick() {
        let mut sim = SimBuilder::new(test_config(10)).build().unwrap();
        let mut rec = Recorder::default();
        sim.run(&mut rec);
        assert_eq!(sim.clock.current_tick, Tick(10));
        assert_eq!(rec.ticks, 10);
        assert_eq!(rec.ended, Some(Tick(10)));
    }

    #[test]
    fn run_ticks_advances_clock() {
        let mut sim = SimBuilder::new(test_config(100)).build().unwrap();
        sim.run_ticks(5, &mut NoopObserver);
        assert_eq!(sim.clock.current_tick, Tick(5));
        sim.run_ticks(3, &mut NoopObserver);
        assert_eq!(sim.clock.current_tick, Tick(8));
    }

    #[test]
    fn one_way_route_finishes() {
        let route = vec![Waypoint::new(at(1.5)), Waypoint::new(at(3.5))];
        let mut sim = SimBuilder::new(test_config(50))
            .params(params(1.0))
            .npc(SimNpc::new(ID, at(0.5)), route)
            .build()
            .unwrap();
        let mut rec = Recorder::default();
        sim.run(&mut rec);

        assert!(sim.is_idle());
        let reached: Vec<usize> = rec
            .events
            .iter()
            .filter_map(|e| match e {
                Event::Reached { index, .. } => Some(*index),
                Event::Cancelled { .. } => None,
            })
            .collect();
        assert_eq!(reached, vec![0, 1]);
    }
}

// ── Walking and triggers ──────────────────────────────────────────────────────

#[cfg(test)]
mod walk_tests {
    use super::*;

    #[test]
    fn arrival_is_reported_inside_margin() {
        // Start 2 blocks away at 0.5/tick; the default margin (2.0) admits
        // horizontal distance² ≤ 2, i.e. ≤ ~1.41 blocks, after two steps.
        let mut sim = SimBuilder::new(test_config(10))
            .params(params(0.5))
            .npc(SimNpc::new(ID, at(0.5)), vec![Waypoint::new(at(2.5))])
            .build()
            .unwrap();
        let mut rec = Recorder::default();
        sim.run_ticks(3, &mut rec);
        assert_eq!(rec.events, vec![Event::Reached { tick: 1, index: 0 }]);
        assert!((x_of(&sim, ID) - 1.5).abs() < 1e-9);
    }

    #[test]
    fn delay_holds_npc_in_place() {
        let route = vec![
            Waypoint::with_triggers(at(0.5), vec![
                Trigger::signal("a"),
                Trigger::delay(5),
                Trigger::signal("b"),
            ]),
            Waypoint::new(at(10.5)),
        ];
        let mut sim = SimBuilder::new(test_config(100))
            .params(params(0.5))
            .npc(SimNpc::new(ID, at(0.5)), route)
            .build()
            .unwrap();

        // Tick 0: already at waypoint 0, chain pauses until tick 5.
        sim.run_ticks(5, &mut NoopObserver);
        assert_eq!(signals(&sim, ID), vec!["a"]);
        assert_eq!(x_of(&sim, ID), 0.5);
        assert!(sim.npc(ID).is_some_and(|n| n.borrow().route().is_paused()));

        // Tick 5: resume fires first, then the walker takes its first step.
        let mut rec = Recorder::default();
        sim.run_ticks(1, &mut rec);
        assert_eq!(rec.resumed, 1);
        assert_eq!(signals(&sim, ID), vec!["a", "b"]);
        assert!((x_of(&sim, ID) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn patrol_repeats_triggers_every_lap() {
        let route = vec![
            Waypoint::with_triggers(at(0.5), vec![Trigger::signal("p0")]),
            Waypoint::with_triggers(at(4.5), vec![Trigger::signal("p1")]),
        ];
        let mut sim = SimBuilder::new(test_config(100))
            .params(params(1.0))
            .patrol(SimNpc::new(ID, at(0.5)), route)
            .build()
            .unwrap();

        // p0 at tick 0, p1 at tick 3, p0 again at tick 5.
        sim.run_ticks(6, &mut NoopObserver);
        assert_eq!(signals(&sim, ID), vec!["p0", "p1", "p0"]);
        assert!(!sim.is_idle());
    }

    #[test]
    fn teleport_trigger_moves_npc() {
        let route = vec![Waypoint::with_triggers(at(0.5), vec![Trigger::Teleport {
            destination: Point::new(20.5, 70.0, 3.5),
        }])];
        let mut sim = SimBuilder::new(test_config(10))
            .npc(SimNpc::new(ID, at(0.5)), route)
            .build()
            .unwrap();
        sim.run_ticks(1, &mut NoopObserver);
        assert_eq!(sim.npc(ID).map(|n| n.location()), Some(Point::new(20.5, 70.0, 3.5)));
    }

    #[test]
    fn speed_trigger_applies_to_next_leg() {
        let route = vec![
            Waypoint::with_triggers(at(0.5), vec![Trigger::Speed { modifier: 2.0 }]),
            Waypoint::new(at(20.5)),
        ];
        let mut sim = SimBuilder::new(test_config(100))
            .params(params(0.5))
            .npc(SimNpc::new(ID, at(0.5)), route)
            .build()
            .unwrap();
        sim.run_ticks(2, &mut NoopObserver);
        assert!((x_of(&sim, ID) - 1.5).abs() < 1e-9);
    }

    #[test]
    fn walkers_share_one_scheduler() {
        let pause = |x| Waypoint::with_triggers(at(x), vec![Trigger::delay(3), Trigger::signal("go")]);
        let mut sim = SimBuilder::new(test_config(100))
            .npc(SimNpc::new(AgentId(0), at(0.5)), vec![pause(0.5)])
            .npc(SimNpc::new(AgentId(1), at(9.5)), vec![pause(9.5)])
            .build()
            .unwrap();
        sim.run_ticks(1, &mut NoopObserver);
        assert_eq!(sim.scheduler.len(), 2);
        sim.run_ticks(3, &mut NoopObserver);
        assert_eq!(signals(&sim, AgentId(0)), vec!["go"]);
        assert_eq!(signals(&sim, AgentId(1)), vec!["go"]);
    }
}

// ── Cancellation ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod cancel_tests {
    use super::*;

    #[test]
    fn stuck_leg_is_skipped() {
        let mut npc = SimNpc::new(ID, at(0.5));
        npc.set_anchored(true);
        let route = vec![
            Waypoint::with_triggers(at(10.5), vec![Trigger::signal("far")]),
            Waypoint::with_triggers(at(0.5), vec![Trigger::signal("home")]),
        ];
        let mut sim = SimBuilder::new(test_config(100))
            .params(params(1.0).with_stationary_ticks(3))
            .npc(npc, route)
            .build()
            .unwrap();
        let mut rec = Recorder::default();
        sim.run_ticks(5, &mut rec);

        assert_eq!(rec.events, vec![
            Event::Cancelled { tick: 2, index: 0, reason: CancelReason::Stuck },
            Event::Reached { tick: 3, index: 1 },
        ]);
        assert_eq!(signals(&sim, ID), vec!["home"]);
    }

    #[test]
    fn despawn_cancels_leg() {
        let mut sim = SimBuilder::new(test_config(100))
            .params(params(0.5))
            .npc(SimNpc::new(ID, at(0.5)), vec![Waypoint::new(at(10.5))])
            .build()
            .unwrap();
        let mut rec = Recorder::default();
        sim.run_ticks(1, &mut rec);
        if let Some(n) = sim.npc(ID) {
            n.borrow_mut().despawn();
        }
        sim.run_ticks(3, &mut rec);
        assert_eq!(rec.events, vec![Event::Cancelled { tick: 1, index: 0, reason: CancelReason::Despawned }]);
        assert!((x_of(&sim, ID) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn despawn_during_pause_drops_rest_of_chain() {
        let route = vec![Waypoint::with_triggers(at(0.5), vec![Trigger::delay(2), Trigger::signal("late")])];
        let mut sim = SimBuilder::new(test_config(100))
            .npc(SimNpc::new(ID, at(0.5)), route)
            .build()
            .unwrap();
        sim.run_ticks(1, &mut NoopObserver);
        if let Some(n) = sim.npc(ID) {
            n.borrow_mut().despawn();
        }
        sim.run_ticks(5, &mut NoopObserver);
        assert!(signals(&sim, ID).is_empty());
        assert!(sim.scheduler.is_empty());
    }

    #[test]
    fn stop_ends_walk() {
        let mut sim = SimBuilder::new(test_config(100))
            .params(params(0.5))
            .patrol(SimNpc::new(ID, at(0.5)), vec![Waypoint::new(at(10.5)), Waypoint::new(at(0.5))])
            .build()
            .unwrap();
        sim.run_ticks(2, &mut NoopObserver);
        if let Some(w) = sim.walker_mut(ID) {
            w.stop();
        }
        sim.run_ticks(5, &mut NoopObserver);
        assert!(sim.is_idle());
        assert!((x_of(&sim, ID) - 1.5).abs() < 1e-9);
    }
}
