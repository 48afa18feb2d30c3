//! The path-follower seam.

use std::fmt;

use npc_core::Point;

/// Why navigation stopped short of (or at) its target.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CancelReason {
    /// No progress for too many consecutive ticks.
    Stuck,
    /// Movement was physically blocked.
    Obstructed,
    /// The follower found no way to the target.
    Unreachable,
    /// The NPC left the world mid-navigation.
    Despawned,
    /// Superseded by a newer navigation request.
    Replaced,
    /// Stopped explicitly by the caller.
    Stopped,
}

impl fmt::Display for CancelReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CancelReason::Stuck       => "stuck",
            CancelReason::Obstructed  => "obstructed",
            CancelReason::Unreachable => "unreachable",
            CancelReason::Despawned   => "despawned",
            CancelReason::Replaced    => "replaced",
            CancelReason::Stopped     => "stopped",
        };
        f.write_str(s)
    }
}

/// Opaque per-agent path executor wrapped by
/// [`NavigationStrategy`][crate::NavigationStrategy].
///
/// The path search itself lives behind this trait; implementations only need
/// to advance movement one tick at a time and report failure.
pub trait PathFollower {
    /// A failure surfaced by the follower, if any.  Once `Some` it should
    /// stay `Some`.
    fn cancel_reason(&self) -> Option<CancelReason>;

    /// The remaining planned path.  Reflects live state: a fresh call after
    /// `update()` may yield a shorter sequence.
    fn path(&self) -> impl Iterator<Item = Point> + '_;

    /// Halt movement.  Must be idempotent.
    fn stop(&mut self);

    /// Advance one tick.  Returns `true` when the follower considers itself
    /// finished (path exhausted, stopped, or failed).
    fn update(&mut self) -> bool;
}
