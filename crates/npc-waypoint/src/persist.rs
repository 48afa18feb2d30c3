//! JSON persistence for routes.
//!
//! # Format
//!
//! A route is an array of waypoint records:
//!
//! ```json
//! [
//!   { "location": { "x": 10.5, "y": 64.0, "z": 20.5 },
//!     "triggers": [ { "type": "signal", "name": "wave" },
//!                   { "type": "delay", "delay": 40 } ] }
//! ]
//! ```
//!
//! Loading fails closed per record: a trigger record that does not decode is
//! logged and dropped from its waypoint, and a waypoint record without a
//! usable location is logged and dropped from the route.  The rest of the
//! route still loads.

use std::io::{Read, Write};

use npc_core::Point;
use serde::Deserialize;
use tracing::warn;

use crate::{Trigger, Waypoint, WaypointResult};

/// Wire form of a [`Waypoint`].  Triggers stay untyped until each is decoded
/// on its own so one bad record cannot fail the whole waypoint.
#[derive(Deserialize)]
pub(crate) struct WaypointRecord {
    location: Point,
    #[serde(default)]
    triggers: Vec<serde_json::Value>,
}

impl From<WaypointRecord> for Waypoint {
    fn from(record: WaypointRecord) -> Self {
        let triggers = record
            .triggers
            .into_iter()
            .enumerate()
            .filter_map(|(index, raw)| match serde_json::from_value::<Trigger>(raw) {
                Ok(trigger) => Some(trigger),
                Err(e) => {
                    warn!(location = %record.location, index, error = %e, "skipping malformed trigger record");
                    None
                }
            })
            .collect();
        Waypoint::with_triggers(record.location, triggers)
    }
}

/// Write `route` as a pretty-printed JSON array.
pub fn save_route_json<W: Write>(writer: W, route: &[Waypoint]) -> WaypointResult<()> {
    serde_json::to_writer_pretty(writer, route)?;
    Ok(())
}

/// Read a route written by [`save_route_json`] (or authored by hand).
///
/// Only a document that is not a JSON array at all is an error; individual
/// bad records are skipped.
pub fn load_route_json<R: Read>(reader: R) -> WaypointResult<Vec<Waypoint>> {
    let records: Vec<serde_json::Value> = serde_json::from_reader(reader)?;
    let route = records
        .into_iter()
        .enumerate()
        .filter_map(|(index, raw)| match serde_json::from_value::<Waypoint>(raw) {
            Ok(waypoint) => Some(waypoint),
            Err(e) => {
                warn!(index, error = %e, "skipping malformed waypoint record");
                None
            }
        })
        .collect();
    Ok(route)
}
