use std::fs;
use std::fs::File;
use std::io::BufReader;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use log::{debug, info, warn};
use rand::SeedableRng;
use rand::prelude::SmallRng;

use furnish_rs::collision::SatCollision;
use furnish_rs::entities::{Room, RoomSnapshot};
use furnish_rs::geometry::{RotationStrategy, TrigRotation};
use furnish_rs::io::{room_to_svg, write_layout, write_svg};
use furnish_rs::raster::Bresenham;

use rmhc::config::RmhcConfig;
use rmhc::factories::{
    ArmchairFactory, BedFactory, ChairFactory, CupboardFactory, DeskFactory, DoorFactory,
    ItemFactory, PouffeFactory, TableFactory,
};
use rmhc::io;
use rmhc::io::RmhcOutput;
use rmhc::io::cli::Cli;
use rmhc::optimizer::{RmhcOptimizer, SearchState};
use rmhc::population::PopulationOptimizer;

fn main() -> Result<()> {
    let args = Cli::parse();
    io::init_logger(args.log_level)?;

    let config = match &args.config_file {
        None => {
            warn!("[MAIN] No config file provided, use --config-file to provide a custom config");
            RmhcConfig::default()
        }
        Some(config_file) => {
            let file = File::open(config_file)?;
            let reader = BufReader::new(file);
            serde_json::from_reader(reader).context("incorrect config file format")?
        }
    };

    info!("Successfully parsed RmhcConfig: {config:?}");

    let rng = match config.prng_seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_os_rng(),
    };

    let room = build_room(args.width, args.height)?;

    if !args.solution_folder.exists() {
        fs::create_dir_all(&args.solution_folder).with_context(|| {
            format!("could not create solution folder: {:?}", args.solution_folder)
        })?;
    }

    let (mut room, best, state, iterations) = match config.n_candidates {
        0 | 1 => {
            let mut optimizer = RmhcOptimizer::new(room, config, rng)?;
            let best = optimizer.solve()?;
            (
                optimizer.room,
                best,
                optimizer.state,
                optimizer.n_iterations,
            )
        }
        n => {
            let mut optimizer = PopulationOptimizer::new(room, config, rng)?;
            let best = optimizer.solve()?;
            let mut room = optimizer.candidates[0].clone();
            room.restore(&best)?;
            (room, best, optimizer.state, optimizer.n_generations * n)
        }
    };

    report(&mut room, &best, state, iterations, config, &args)
}

fn build_room(width: f64, height: f64) -> Result<Room> {
    let rotator: Arc<dyn RotationStrategy> = Arc::new(TrigRotation);

    let factories: Vec<Box<dyn ItemFactory>> = vec![
        Box::new(BedFactory),
        Box::new(TableFactory),
        Box::new(TableFactory),
        Box::new(ChairFactory),
        Box::new(PouffeFactory),
        Box::new(ArmchairFactory),
        Box::new(CupboardFactory),
        Box::new(DeskFactory),
    ];

    let mut items = Vec::with_capacity(factories.len());
    for factory in &factories {
        let mut item = factory.get_item()?;
        item.set_rotation_strategy(Some(rotator.clone()));
        // start every item at the room center; the search spreads them out from there
        let center = item.center();
        item.translate(width / 2.0 - center.x(), height / 2.0 - center.y());
        items.push(item);
    }

    let mut door = DoorFactory.get_item()?;
    let center = door.center();
    // the door sits centered along the bottom wall
    door.translate(width / 2.0 - center.x(), door.height() / 2.0 - center.y());

    Room::new(width, height, vec![door], items, Arc::new(SatCollision))
}

fn report(
    room: &mut Room,
    best: &RoomSnapshot,
    state: SearchState,
    iterations: usize,
    config: RmhcConfig,
    args: &Cli,
) -> Result<()> {
    // fire-and-forget diagnostics; failures are logged by the writers and never fatal
    write_layout(room, &args.solution_folder.join("layout.json"));
    write_svg(
        &room_to_svg(room, "rmhc best layout"),
        &args.solution_folder.join("layout.svg"),
    );

    let grid = room.rasterize(&Bresenham)?;
    debug!("[MAIN] best layout occupancy:\n{}", grid.render());

    let output = RmhcOutput::new(
        config,
        iterations,
        state,
        best.penalty,
        furnish_rs::io::compose_layout(room),
    );
    io::write_json(&output, &args.solution_folder.join("solution.json"))
}
