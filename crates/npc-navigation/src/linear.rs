//! A follower that walks straight segments between path points.

use std::collections::VecDeque;

use npc_core::{Movable, Point};
use tracing::debug;

use crate::{CancelReason, NavigatorParameters, PathFollower};

/// Squared distance below which two points are treated as the same spot.
const REACHED_EPSILON_SQ: f64 = 1e-6;

/// Moves a [`Movable`] handle along a list of points at a fixed speed,
/// without any obstacle awareness.
///
/// The handle may refuse a move (returning `false` from
/// [`Movable::move_to`]); ticks without progress are counted, and after
/// `stationary_ticks` of them the follower cancels with
/// [`CancelReason::Stuck`].
pub struct LinearFollower<H: Movable> {
    handle:           H,
    path:             VecDeque<Point>,
    speed:            f64,
    stationary_ticks: u32,
    idle_ticks:       u32,
    cancel_reason:    Option<CancelReason>,
}

impl<H: Movable> LinearFollower<H> {
    pub fn new(handle: H, path: impl IntoIterator<Item = Point>, params: &NavigatorParameters) -> Self {
        Self {
            handle,
            path:             path.into_iter().collect(),
            speed:            params.speed,
            stationary_ticks: params.stationary_ticks,
            idle_ticks:       0,
            cancel_reason:    None,
        }
    }

    /// Consecutive ticks without progress so far.
    pub fn idle_ticks(&self) -> u32 {
        self.idle_ticks
    }

    fn drop_reached(&mut self, at: Point) {
        while let Some(&p) = self.path.front() {
            if at.distance_squared(p) >= REACHED_EPSILON_SQ {
                break;
            }
            self.path.pop_front();
        }
    }
}

impl<H: Movable> PathFollower for LinearFollower<H> {
    fn cancel_reason(&self) -> Option<CancelReason> {
        self.cancel_reason
    }

    fn path(&self) -> impl Iterator<Item = Point> + '_ {
        self.path.iter().copied()
    }

    fn stop(&mut self) {
        self.path.clear();
    }

    fn update(&mut self) -> bool {
        if self.cancel_reason.is_some() {
            return true;
        }
        let from = self.handle.location();
        self.drop_reached(from);
        let Some(&next) = self.path.front() else {
            return true;
        };

        let moved = self.handle.move_to(from.step_toward(next, self.speed));
        let at = self.handle.location();
        if moved && at.distance_squared(from) >= REACHED_EPSILON_SQ {
            self.idle_ticks = 0;
        } else {
            self.idle_ticks += 1;
            if self.stationary_ticks > 0 && self.idle_ticks >= self.stationary_ticks {
                debug!(at = %at, idle = self.idle_ticks, "follower stuck");
                self.cancel_reason = Some(CancelReason::Stuck);
                self.path.clear();
                return true;
            }
        }

        self.drop_reached(at);
        self.path.is_empty()
    }
}
