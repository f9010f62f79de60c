//! pasture: a handful of shepherds tending their flocks.
//!
//! Each shepherd gets a hut, a satchel with shears, an axe and some wheat,
//! and a flock scattered around the hut.  The run writes status CSVs and
//! prints the final roster.
//!
//! ```text
//! cargo run -p pasture -- [config.json] [roster page]
//! RUST_LOG=debug cargo run -p pasture
//! ```
//!
//! Set `"log_format": "json"` in the config file for one JSON object per
//! log line.

mod config;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use ca_core::{BlockPos, BuildingId, CitizenId, DyeColor, ItemKind, ItemStack, ToolType};
use ca_herd::{CreatureKind, Herdsman, Hut, Inventory, Satchel, Shepherd, Tool};
use ca_output::{CsvWriter, RosterPage, StatusObserver};
use ca_sim::SimBuilder;
use ca_world::Pasture;

use config::{DemoConfig, LogFormat};

const HUT_Y: i32 = 64;
/// Sheep are scattered at most this far from their hut on each axis.
const FLOCK_SPREAD: i32 = 8;

fn init_logging(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let config_path = args.next().map(PathBuf::from);
    let roster_page: usize = args.next().map(|p| p.parse::<usize>()).transpose()?.unwrap_or(1);

    let cfg = DemoConfig::load(config_path.as_deref())?;
    init_logging(cfg.log_format);
    info!(
        shepherds = cfg.shepherds,
        sheep_per_hut = cfg.sheep_per_hut,
        ticks = cfg.sim.total_ticks,
        seed = cfg.sim.seed,
        "pasture demo"
    );

    // 1. World: one flock per hut.
    let huts: Vec<Hut> = (0..cfg.shepherds)
        .map(|i| Hut::new(BuildingId(i), cfg.hut_level, BlockPos::new(i as i32 * cfg.hut_spacing, HUT_Y, 0)))
        .collect();
    let mut pasture = Pasture::new(cfg.sim.seed);
    for hut in &huts {
        pasture.scatter(CreatureKind::Sheep, hut.pos, FLOCK_SPREAD, cfg.sheep_per_hut);
    }
    info!(sheep = pasture.len(), "flocks placed");

    // 2. One shared registry for every shepherd.
    let registry = Shepherd::registry::<Pasture, Satchel>(cfg.policy.clone(), cfg.shepherd.clone())?;

    // 3. Citizens.
    let mut builder = SimBuilder::new(cfg.sim.clone(), pasture);
    for (i, hut) in huts.iter().enumerate() {
        let citizen = CitizenId(i as u32);
        let mut satchel = Satchel::new(cfg.satchel_slots)
            .with_tool(Tool::new(ToolType::Shears))
            .with_tool(Tool::new(ToolType::Axe));
        if cfg.starting_wheat > 0 {
            satchel.add_item(ItemStack::new(ItemKind::Wheat, cfg.starting_wheat))?;
        }
        let herdsman = Herdsman::new(citizen, *hut, satchel, cfg.sim.seed);
        builder = builder.agent(citizen, herdsman, registry.clone());
    }
    let mut sim = builder.build()?;

    // 4. Run with CSV output.
    let writer = CsvWriter::new(&cfg.output_dir)?;
    let mut obs = StatusObserver::new(writer, &cfg.sim);

    let t0 = Instant::now();
    sim.run(&mut obs)?;
    let elapsed = t0.elapsed();

    if let Some(e) = obs.take_error() {
        warn!(error = %e, "status output incomplete");
    }

    // 5. Summary.
    let stored_wool: u32 = DyeColor::ALL.iter().map(|&c| sim.world.stored_count(ItemKind::Wool(c))).sum();
    info!(
        elapsed_s = elapsed.as_secs_f64(),
        sim_time = %sim.clock,
        status_rows = obs.rows_written(),
        handler_errors = obs.agent_errors(),
        sheep_left = sim.world.len(),
        wool_stored = stored_wool,
        mutton_stored = sim.world.stored_count(ItemKind::Mutton),
        "simulation complete"
    );

    for citizen in sim.citizens() {
        if let Some(agent) = sim.agent(citizen) {
            let h = &agent.context;
            info!(
                %citizen,
                state = %agent.machine.state(),
                actions = h.actions_done,
                experience = h.experience(),
                wool_carried = DyeColor::ALL.iter().map(|&c| h.inventory.count(ItemKind::Wool(c))).sum::<u32>(),
                shears = ?h.inventory.tools().iter().find(|t| t.kind == ToolType::Shears).map(|t| t.durability),
                "shepherd"
            );
        }
    }

    let snapshot = sim.snapshot();
    print!("{}", RosterPage::new(&snapshot, roster_page));
    Ok(())
}
