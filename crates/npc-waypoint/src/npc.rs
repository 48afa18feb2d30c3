//! Capabilities the trigger engine needs from the NPC it runs against.

use npc_core::{AgentId, Locatable, Point};

use crate::TriggerResult;

/// Pause control exposed by whatever iterates a route for one NPC.
///
/// The flag is last-writer-wins: overlapping trigger chains that pause and
/// unpause the same route race on it, and the outcome depends on the order
/// their resume tasks fire.
pub trait RouteFollower {
    fn set_paused(&mut self, paused: bool);

    fn is_paused(&self) -> bool;
}

/// The NPC a trigger chain acts on.
///
/// Triggers only reach the world through these methods, so tests can record
/// every effect with a plain struct.
pub trait Npc: Locatable {
    fn id(&self) -> AgentId;

    /// `false` once the NPC has been removed from the world.  Pending resume
    /// tasks for a despawned NPC become no-ops.
    fn is_spawned(&self) -> bool;

    fn teleport(&mut self, to: Point) -> TriggerResult<()>;

    fn set_speed_modifier(&mut self, modifier: f32);

    /// Deliver a named scripted hook.
    fn signal(&mut self, name: &str) -> TriggerResult<()>;

    /// The route currently driving this NPC, if any.
    fn route_follower(&mut self) -> Option<&mut dyn RouteFollower>;
}
