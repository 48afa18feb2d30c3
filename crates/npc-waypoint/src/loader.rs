//! CSV route loader.
//!
//! # CSV format
//!
//! One row per trigger; a waypoint with no triggers has a single row with an
//! empty `trigger` column.  Rows for the same waypoint repeat its location.
//!
//! ```csv
//! waypoint,x,y,z,trigger,value
//! 0,10.5,64,20.5,signal,wave
//! 0,10.5,64,20.5,delay,40
//! 1,30.5,64,20.5,,
//! 2,30.5,64,40.5,teleport,10.5 64 40.5
//! ```
//!
//! **`trigger`** field:
//!
//! | Value      | `value` column          | Trigger                          |
//! |------------|-------------------------|----------------------------------|
//! | *(empty)*  | ignored                 | none                             |
//! | `delay`    | ticks (i32)             | `Trigger::Delay`                 |
//! | `teleport` | point, `x y z`          | `Trigger::Teleport`              |
//! | `speed`    | multiplier (f32)        | `Trigger::Speed`                 |
//! | `signal`   | hook name               | `Trigger::Signal`                |
//!
//! Waypoints are ordered by the `waypoint` column; triggers keep file order.
//! A row whose trigger cannot be parsed is logged and skipped, while a row
//! whose location columns are malformed fails the load.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use npc_core::Point;
use serde::Deserialize;
use tracing::warn;

use crate::{Trigger, Waypoint, WaypointError, WaypointResult};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct RouteRecord {
    waypoint: u32,
    x:        f64,
    y:        f64,
    z:        f64,
    #[serde(default)]
    trigger:  String,
    #[serde(default)]
    value:    String,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a route from a CSV file.
pub fn load_route_csv(path: &Path) -> WaypointResult<Vec<Waypoint>> {
    let file = std::fs::File::open(path)?;
    load_route_reader(file)
}

/// Like [`load_route_csv`] but accepts any `Read` source.
pub fn load_route_reader<R: Read>(reader: R) -> WaypointResult<Vec<Waypoint>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut by_index: BTreeMap<u32, Waypoint> = BTreeMap::new();

    for (line, result) in csv_reader.deserialize::<RouteRecord>().enumerate() {
        let row = result.map_err(|e| WaypointError::Parse(e.to_string()))?;
        let location = Point::new(row.x, row.y, row.z);
        let waypoint = by_index
            .entry(row.waypoint)
            .or_insert_with(|| Waypoint::new(location));
        if waypoint.location() != location {
            warn!(
                waypoint = row.waypoint,
                first = %waypoint.location(),
                row = %location,
                "conflicting location for waypoint; keeping the first"
            );
        }

        if row.trigger.is_empty() {
            continue;
        }
        match parse_trigger(&row.trigger, &row.value) {
            Ok(trigger) => waypoint.add_trigger(trigger),
            Err(e) => warn!(record = line + 1, waypoint = row.waypoint, error = %e, "skipping malformed trigger"),
        }
    }

    Ok(by_index.into_values().collect())
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn parse_trigger(kind: &str, value: &str) -> WaypointResult<Trigger> {
    let bad = |what: &str| WaypointError::Parse(format!("invalid {kind} value {value:?}: expected {what}"));
    match kind {
        "delay" => value.parse::<i32>().map(Trigger::delay).map_err(|_| bad("an integer tick count")),
        "teleport" => value
            .parse::<Point>()
            .map(|destination| Trigger::Teleport { destination })
            .map_err(|_| bad("a point \"x y z\"")),
        "speed" => value
            .parse::<f32>()
            .map(|modifier| Trigger::Speed { modifier })
            .map_err(|_| bad("a number")),
        "signal" if !value.is_empty() => Ok(Trigger::signal(value)),
        "signal" => Err(bad("a hook name")),
        other => Err(WaypointError::Parse(format!("unknown trigger type {other:?}"))),
    }
}
