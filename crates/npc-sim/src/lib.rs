//! `npc-sim`: tick loop that walks NPCs along waypoint routes.
//!
//! # Tick loop
//!
//! ```text
//! for tick in 0..config.total_ticks:
//!   ① Resume: scheduler.advance_to(tick) fires trigger chains whose
//!              delay has elapsed (each unpauses its NPC's route).
//!   ② Walk:   for each RouteWalker, in insertion order:
//!                paused          → idle
//!                no leg          → start NavigationStrategy toward next waypoint
//!                leg arrived     → on_reach(waypoint, npc); next waypoint
//!                leg cancelled   → warn; next waypoint (no retry)
//! ```
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use npc_core::{AgentId, Point, SimConfig};
//! use npc_sim::{NoopObserver, SimBuilder, SimNpc};
//!
//! let route = npc_waypoint::load_route_csv(path)?;
//! let mut sim = SimBuilder::new(SimConfig::default())
//!     .patrol(SimNpc::new(AgentId(0), Point::new(0.5, 64.0, 0.5)), route)
//!     .build()?;
//! sim.run(&mut NoopObserver);
//! ```

pub mod builder;
pub mod error;
pub mod npc;
pub mod observer;
pub mod route;
pub mod sim;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use npc::{RouteState, SimNpc};
pub use observer::{NoopObserver, SimObserver};
pub use route::{NpcHandle, RouteWalker, WalkEvent};
pub use sim::Sim;
