//! Fluent builder for constructing a [`Sim`].

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use npc_core::{SimConfig, Tick};
use npc_navigation::NavigatorParameters;
use npc_schedule::TickScheduler;
use npc_waypoint::{Npc, Waypoint};

use crate::{RouteWalker, Sim, SimError, SimNpc, SimResult};

/// Fluent builder for [`Sim`].
///
/// # Optional inputs (have defaults)
///
/// | Method            | Default                          |
/// |-------------------|----------------------------------|
/// | `.params(p)`      | `NavigatorParameters::default()` |
/// | `.npc(n, route)`  | no NPCs                          |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(config)
///     .params(NavigatorParameters::default().with_speed(0.5))
///     .patrol(SimNpc::new(AgentId(0), start), route)
///     .build()?;
/// sim.run(&mut NoopObserver);
/// ```
pub struct SimBuilder {
    config: SimConfig,
    params: NavigatorParameters,
    npcs:   Vec<(SimNpc, Vec<Waypoint>, bool)>,
}

impl SimBuilder {
    pub fn new(config: SimConfig) -> Self {
        Self {
            config,
            params: NavigatorParameters::default(),
            npcs:   Vec::new(),
        }
    }

    /// Navigator parameters shared by every leg of every NPC.
    pub fn params(mut self, params: NavigatorParameters) -> Self {
        self.params = params;
        self
    }

    /// Add an NPC that walks `route` once and then stands still.
    pub fn npc(mut self, npc: SimNpc, route: Vec<Waypoint>) -> Self {
        self.npcs.push((npc, route, false));
        self
    }

    /// Add an NPC that walks `route` in a loop, re-running each waypoint's
    /// triggers on every visit.
    pub fn patrol(mut self, npc: SimNpc, route: Vec<Waypoint>) -> Self {
        self.npcs.push((npc, route, true));
        self
    }

    /// Validate inputs and return a ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim> {
        self.config.validate()?;
        self.params.validate()?;

        let mut seen = HashSet::new();
        for (npc, _, _) in &self.npcs {
            if !seen.insert(npc.id()) {
                return Err(SimError::DuplicateNpc(npc.id()));
            }
        }

        let walkers = self
            .npcs
            .into_iter()
            .map(|(npc, route, cyclic)| {
                RouteWalker::new(Rc::new(RefCell::new(npc)), route, self.params.clone(), cyclic)
            })
            .collect();

        Ok(Sim {
            clock:     self.config.make_clock(),
            config:    self.config,
            scheduler: TickScheduler::starting_at(Tick::ZERO),
            walkers,
        })
    }
}
