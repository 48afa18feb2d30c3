//! `npc-waypoint`: route stops and the triggers that run when one is reached.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                        |
//! |--------------|-----------------------------------------------------------------|
//! | [`npc`]      | `Npc` and `RouteFollower` capability traits                     |
//! | [`trigger`]  | `Trigger` enum, `DelayTrigger`, `TriggerEffect`                 |
//! | [`waypoint`] | `Waypoint` - location + ordered trigger list                    |
//! | [`engine`]   | `on_reach` - runs a trigger chain with pause/resume             |
//! | [`persist`]  | JSON route save/load (fail-closed per record)                   |
//! | [`loader`]   | `load_route_csv`, `load_route_reader`                           |
//! | [`error`]    | `TriggerError`, `WaypointError`, result aliases                 |
//!
//! # Trigger chains (summary)
//!
//! ```text
//! on_reach(waypoint, npc)
//!   i = 0
//!   loop:
//!     effect = triggers[i].on_waypoint_reached(npc, location)
//!     Continue  → i += 1
//!     Pause(n)  → route.set_paused(true)
//!                 schedule_once(n, { route.set_paused(false); resume at i + 1 })
//!                 return
//! ```
//!
//! Every `on_reach` call owns its own cursor (captured by the resume task),
//! so overlapping reaches of the same waypoint never share progress.

pub mod engine;
pub mod error;
pub mod loader;
pub mod npc;
pub mod persist;
pub mod trigger;
pub mod waypoint;


pub use engine::{ChainOutcome, SharedWaypoint, on_reach};
pub use error::{TriggerError, TriggerResult, WaypointError, WaypointResult};
pub use loader::{load_route_csv, load_route_reader};
pub use npc::{Npc, RouteFollower};
pub use persist::{load_route_json, save_route_json};
pub use trigger::{DelayTrigger, Trigger, TriggerEffect};
pub use waypoint::Waypoint;
