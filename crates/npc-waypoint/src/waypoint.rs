//! A stop along a route.

use std::fmt;
use std::fmt::Write as _;

use npc_core::Point;
use serde::{Deserialize, Serialize};

use crate::Trigger;
use crate::persist::WaypointRecord;

/// A location plus an ordered list of triggers that run on arrival.
///
/// Two waypoints are equal when both the location and the trigger list (by
/// content and order) are equal.  Waypoints outlive any single navigation
/// attempt and may be reached many times; each reach runs the list afresh.
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "WaypointRecord")]
pub struct Waypoint {
    location: Point,
    triggers: Vec<Trigger>,
}

impl Waypoint {
    pub fn new(location: Point) -> Self {
        Self { location, triggers: Vec::new() }
    }

    pub fn with_triggers(location: Point, triggers: Vec<Trigger>) -> Self {
        Self { location, triggers }
    }

    pub fn location(&self) -> Point {
        self.location
    }

    pub fn triggers(&self) -> &[Trigger] {
        &self.triggers
    }

    pub fn add_trigger(&mut self, trigger: Trigger) {
        self.triggers.push(trigger);
    }

    /// Remove the trigger at `index`, shifting later ones down.
    ///
    /// Chains paused on this waypoint resume by index against the list as it
    /// is when they wake, so removing (or adding before) their cursor makes
    /// them skip (or repeat) a trigger.
    pub fn remove_trigger(&mut self, index: usize) -> Option<Trigger> {
        (index < self.triggers.len()).then(|| self.triggers.remove(index))
    }

    /// Distance in blocks to another waypoint.
    pub fn distance_to(&self, other: &Waypoint) -> f64 {
        self.location.distance(other.location)
    }

    /// One `- description` line per trigger, for listings.
    pub fn describe_triggers(&self) -> String {
        let mut out = String::new();
        for trigger in &self.triggers {
            let _ = write!(out, "\n    - {}", trigger.description());
        }
        out
    }
}

impl fmt::Display for Waypoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Waypoint {} [{} triggers]", self.location, self.triggers.len())
    }
}
