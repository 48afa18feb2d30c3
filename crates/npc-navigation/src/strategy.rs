//! `NavigationStrategy`: drives one NPC toward one fixed target.

use std::fmt;

use npc_core::{Locatable, Point};
use tracing::{debug, trace};

use crate::{CancelReason, NavigationError, NavigationResult, NavigatorParameters, PathFollower};

/// Advances one agent toward one target each tick and reports when it is
/// done, either by arriving or by being cancelled.
///
/// # Type parameters
///
/// - `H: Locatable`: handle used to read the agent's position each tick.
/// - `F: PathFollower`: the movement collaborator.  Swap it at compile time
///   for a different follower with no runtime overhead.
pub struct NavigationStrategy<H: Locatable, F: PathFollower> {
    handle:        H,
    follower:      F,
    params:        NavigatorParameters,
    target:        Point,
    cancel_reason: Option<CancelReason>,
}

impl<H: Locatable, F: PathFollower> NavigationStrategy<H, F> {
    /// Navigate toward `target`.
    pub fn new(handle: H, follower: F, target: Point, params: NavigatorParameters) -> Self {
        Self {
            handle,
            follower,
            params,
            target,
            cancel_reason: None,
        }
    }

    /// Navigate along a precomputed `path`; the target is its last point.
    ///
    /// `follower` is expected to have been built from the same path.
    pub fn along_path(
        handle:   H,
        follower: F,
        path:     &[Point],
        params:   NavigatorParameters,
    ) -> NavigationResult<Self> {
        let target = *path.last().ok_or(NavigationError::EmptyPath)?;
        Ok(Self::new(handle, follower, target, params))
    }

    /// Advance one tick.  Returns `true` when navigation is finished, either
    /// because the agent arrived or because it was cancelled.
    pub fn update(&mut self) -> bool {
        if let Some(reason) = self.follower.cancel_reason() {
            self.set_cancel_reason(reason);
        }
        if self.cancel_reason.is_some() {
            return true;
        }

        let was_finished = self.follower.update();
        self.params.run();

        let loc = self.handle.location();
        if loc.within_arrival(self.target, self.params.distance_margin) {
            trace!(destination = %self.target, at = %loc, "arrived");
            self.stop();
            return true;
        }

        // The follower may have failed during this step.
        if let Some(reason) = self.follower.cancel_reason() {
            self.set_cancel_reason(reason);
            return true;
        }
        was_finished
    }

    /// Stop the underlying follower.  Idempotent.
    pub fn stop(&mut self) {
        self.follower.stop();
    }

    /// Cancel from outside (e.g. superseded by a new request).  The first
    /// reason recorded is kept.
    pub fn cancel(&mut self, reason: CancelReason) {
        self.set_cancel_reason(reason);
        self.stop();
    }

    /// The live planned path, straight from the follower.
    pub fn path(&self) -> impl Iterator<Item = Point> + '_ {
        self.follower.path()
    }

    pub fn target(&self) -> Point {
        self.target
    }

    pub fn cancel_reason(&self) -> Option<CancelReason> {
        self.cancel_reason
    }

    pub fn params(&self) -> &NavigatorParameters {
        &self.params
    }

    pub fn follower(&self) -> &F {
        &self.follower
    }

    fn set_cancel_reason(&mut self, reason: CancelReason) {
        if self.cancel_reason.is_none() {
            debug!(destination = %self.target, %reason, "navigation cancelled");
            self.cancel_reason = Some(reason);
        }
    }
}

impl<H: Locatable, F: PathFollower> fmt::Display for NavigationStrategy<H, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NavigationStrategy [target={}]", self.target)
    }
}
