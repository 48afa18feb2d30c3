//! patrol: two guards walking waypoint routes around a courtyard.
//!
//! The guard routes are embedded as CSV.  Pass a JSON config file as the
//! first argument to override the simulation length or navigator tuning:
//!
//! ```json
//! { "sim": { "total_ticks": 600 }, "navigator": { "speed": 0.5 } }
//! ```
//!
//! Set `RUST_LOG=debug` to watch trigger chains pause and resume.

use std::fs::File;
use std::io::Cursor;
use std::time::Instant;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use npc_core::{AgentId, Locatable, Point, SimConfig, Tick};
use npc_navigation::{CancelReason, NavigatorParameters};
use npc_sim::{SimBuilder, SimNpc, SimObserver};
use npc_waypoint::{ChainOutcome, Npc, load_route_reader};

// ── Routes ────────────────────────────────────────────────────────────────────

// North guard: loops the courtyard, pausing at the gate and the well.
const NORTH_ROUTE_CSV: &str = "\
waypoint,x,y,z,trigger,value\n\
0,10.5,64,10.5,signal,salute\n\
0,10.5,64,10.5,delay,40\n\
1,20.5,64,10.5,,\n\
2,20.5,64,20.5,signal,draw_water\n\
2,20.5,64,20.5,delay,20\n\
2,20.5,64,20.5,speed,1.5\n\
3,10.5,64,20.5,speed,1.0\n\
";

// South guard: walks to the tower once, climbs, and keeps watch.
const SOUTH_ROUTE_CSV: &str = "\
waypoint,x,y,z,trigger,value\n\
0,4.5,64,4.5,,\n\
1,4.5,64,14.5,signal,open_door\n\
1,4.5,64,14.5,delay,10\n\
1,4.5,64,14.5,teleport,4.5 80 14.5\n\
1,4.5,64,14.5,signal,keep_watch\n\
";

// ── Config ────────────────────────────────────────────────────────────────────

#[derive(Default, Deserialize)]
#[serde(default)]
struct DemoConfig {
    sim:       SimConfig,
    navigator: NavigatorParameters,
}

fn load_config() -> Result<DemoConfig> {
    let Some(path) = std::env::args().nth(1) else {
        return Ok(DemoConfig {
            navigator: NavigatorParameters::default().with_speed(0.5),
            ..DemoConfig::default()
        });
    };
    let file = File::open(&path).with_context(|| format!("opening config {path}"))?;
    serde_json::from_reader(file).with_context(|| format!("parsing config {path}"))
}

// ── Observer ──────────────────────────────────────────────────────────────────

#[derive(Default)]
struct PatrolLog {
    arrivals:      usize,
    cancellations: usize,
    resumes:       usize,
}

impl SimObserver for PatrolLog {
    fn on_waypoint_reached(&mut self, tick: Tick, npc: AgentId, index: usize, at: Point, outcome: ChainOutcome) {
        self.arrivals += 1;
        let note = match outcome {
            ChainOutcome::Paused { ticks, .. } => format!("holding {ticks} ticks"),
            ChainOutcome::Completed { ran } => format!("{ran} triggers"),
        };
        println!("{:>6}  {:<12} reached #{index} {at}  ({note})", tick.to_string(), npc.to_string());
    }

    fn on_navigation_cancelled(
        &mut self,
        tick:   Tick,
        npc:    AgentId,
        index:  usize,
        target: Point,
        reason: CancelReason,
    ) {
        self.cancellations += 1;
        println!("{:>6}  {:<12} gave up on #{index} {target}: {reason}", tick.to_string(), npc.to_string());
    }

    fn on_tick_end(&mut self, _tick: Tick, resumed: usize, _moving: usize) {
        self.resumes += resumed;
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        info!(%final_tick, "simulation finished");
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

/// `RUST_LOG` when set and parseable, `info` otherwise.
fn env_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .filter(|d| !d.trim().is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(std::env::var("RUST_LOG").ok().as_deref()))
        .with_writer(std::io::stderr)
        .init();

    let config = load_config()?;
    let north = load_route_reader(Cursor::new(NORTH_ROUTE_CSV)).context("north route")?;
    let south = load_route_reader(Cursor::new(SOUTH_ROUTE_CSV)).context("south route")?;

    println!("=== patrol ===");
    println!(
        "Ticks: {}  |  Tick: {} ms  |  Speed: {} blocks/tick",
        config.sim.total_ticks, config.sim.tick_duration_ms, config.navigator.speed
    );
    for (name, route) in [("north", &north), ("south", &south)] {
        println!("{name} route:");
        for waypoint in route {
            println!("  {waypoint}{}", waypoint.describe_triggers());
        }
    }
    println!();

    let mut sim = SimBuilder::new(config.sim)
        .params(config.navigator)
        .patrol(SimNpc::new(AgentId(0), Point::new(10.5, 64.0, 20.5)), north)
        .npc(SimNpc::new(AgentId(1), Point::new(0.5, 64.0, 0.5)), south)
        .build()?;

    let mut log = PatrolLog::default();
    let t0 = Instant::now();
    sim.run(&mut log);
    let elapsed = t0.elapsed();

    println!();
    println!("Simulation complete in {:.3} s ({})", elapsed.as_secs_f64(), sim.clock);
    println!(
        "  arrivals: {}  |  cancellations: {}  |  resumes: {}",
        log.arrivals, log.cancellations, log.resumes
    );
    println!();

    println!("{:<12} {:<28} {:<8} Signals", "NPC", "Location", "Spawned");
    println!("{}", "-".repeat(64));
    for walker in &sim.walkers {
        let npc = walker.npc().borrow();
        println!(
            "{:<12} {:<28} {:<8} {}",
            npc.id().to_string(),
            npc.location().to_string(),
            if npc.is_spawned() { "yes" } else { "no" },
            npc.signals().join(", "),
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use tracing_subscriber::filter::LevelFilter;

    use super::env_filter;

    #[test]
    fn rust_log_debug_is_honoured() {
        assert_eq!(env_filter(Some("debug")).max_level_hint(), Some(LevelFilter::DEBUG));
    }

    #[test]
    fn defaults_to_info() {
        assert_eq!(env_filter(None).max_level_hint(), Some(LevelFilter::INFO));
        assert_eq!(env_filter(Some("  ")).max_level_hint(), Some(LevelFilter::INFO));
    }
}
