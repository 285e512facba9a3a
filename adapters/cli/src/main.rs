#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs an interactive Rogue Grid session.

mod input;
mod turn;

use std::{
    fs,
    io::{self, Write},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info};
use rogue_grid_core::{EntityId, WorldConfig, DEFAULT_WANDER_PROBABILITY};
use rogue_grid_system_bootstrap::Bootstrap;
use rogue_grid_world::{parse_with_config, Entity};

use crate::turn::read_turn;

const DEFAULT_MAP: &str = "\
######################
#                    #
#                    #
#             e      #
#                    #
#       @            #
#                    #
#           #        #
#                    #
#       ##           #
#        #           #
#                    #
######################";

/// Command-line arguments accepted by the Rogue Grid binary.
#[derive(Debug, Parser)]
#[command(name = "rogue-grid", about = "Turn-based grid simulation in the terminal")]
struct CliArgs {
    /// Path to an ASCII map; the built-in arena is used when omitted.
    #[arg(long)]
    map: Option<PathBuf>,
    /// Seed for the world's random generator.
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Number of players taking turns at the keyboard.
    #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(u8).range(1..))]
    players: u8,
    /// Chance that an enemy attempts a step each tick.
    #[arg(long, default_value_t = DEFAULT_WANDER_PROBABILITY)]
    wander_probability: f64,
}

/// Entry point for the Rogue Grid command-line interface.
fn main() -> Result<()> {
    env_logger::init();
    let args = CliArgs::parse();

    let source = match &args.map {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read map {}", path.display()))?,
        None => DEFAULT_MAP.to_owned(),
    };
    let config = WorldConfig {
        seed: args.seed,
        wander_probability: args.wander_probability,
    };
    let mut world = parse_with_config(&source, config).context("failed to parse map")?;

    let bootstrap = Bootstrap::default();
    println!("{}", bootstrap.welcome_banner());
    info!("{}", bootstrap.describe(&world));
    let joins = bootstrap.spawn_players(&world, usize::from(args.players));
    let _ = world.update(joins);

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut stdout = io::stdout();
    loop {
        write!(stdout, "{world}")?;

        let players: Vec<EntityId> = world.players().map(Entity::id).collect();
        let turn = read_turn(&players, &mut input, &mut stdout)?;
        let report = world.update(turn.actions);
        debug!(
            "tick resolved in {} rounds with {} relocations",
            report.rounds, report.relocations
        );
        if turn.finished {
            write!(stdout, "{world}")?;
            info!("session ended");
            return Ok(());
        }
    }
}
