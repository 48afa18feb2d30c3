//! `npc-core`: foundational types for NPC navigation and waypoint routes.
//!
//! This crate is a dependency of every other `npc-*` crate.  It intentionally
//! has no `npc-*` dependencies and minimal external ones (only `thiserror`,
//! plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `AgentId`, `TaskId`                                   |
//! | [`geo`]         | `Point`, block-centred arrival geometry               |
//! | [`time`]        | `Tick`, `SimClock`, `SimConfig`                       |
//! | [`handle`]      | `Locatable`, `Movable` agent-handle traits            |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect |
//! |---------|--------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types; required by `npc-waypoint` persistence. |

pub mod error;
pub mod geo;
pub mod handle;
pub mod ids;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use geo::Point;
pub use handle::{Locatable, Movable};
pub use ids::{AgentId, TaskId};
pub use time::{SimClock, SimConfig, Tick};
