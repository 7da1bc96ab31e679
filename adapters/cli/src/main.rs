#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that generates a maze and prints it with its spawn points.

mod ascii;

use anyhow::{Context, Result};
use clap::Parser;
use labyrinth_core::CellCoord;
use labyrinth_system_bootstrap::{Maze, MazeConfig, DEFAULT_SEED};
use log::info;

/// Command-line arguments accepted by the labyrinth binary.
#[derive(Debug, Parser)]
#[command(name = "labyrinth", about = "Generate a maze and place spaced-out spawn points")]
struct CliArgs {
    /// Number of columns in the maze.
    #[arg(long, default_value_t = 10)]
    columns: u32,
    /// Number of rows in the maze.
    #[arg(long, default_value_t = 10)]
    rows: u32,
    /// Square maze size; overrides --columns and --rows.
    #[arg(long)]
    size: Option<u32>,
    /// Seed for every random decision.
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,
    /// Extra walls to break after generation.
    #[arg(long, default_value_t = 0)]
    wall_breaks: u32,
    /// Number of spawn locations to place.
    #[arg(long, default_value_t = 0)]
    spawns: usize,
    /// Fixed generation start written as COLUMN,ROW.
    #[arg(long, value_parser = parse_cell)]
    start: Option<CellCoord>,
}

impl CliArgs {
    fn config(&self) -> MazeConfig {
        let config = match self.size {
            Some(size) => MazeConfig::square(size),
            None => MazeConfig::new(self.columns, self.rows),
        }
        .with_seed(self.seed)
        .with_wall_breaks(self.wall_breaks);

        match self.start {
            Some(start) => config.with_start(start),
            None => config,
        }
    }
}

/// Entry point for the labyrinth command-line interface.
fn main() -> Result<()> {
    env_logger::init();
    let args = CliArgs::parse();
    let config = args.config();

    let mut maze = Maze::from_config(config).with_context(|| {
        format!(
            "failed to generate a {}x{} maze",
            config.columns(),
            config.rows()
        )
    })?;
    let spawns = maze
        .start_locations(args.spawns)
        .with_context(|| format!("failed to place {} spawn locations", args.spawns))?;
    info!("placed {} spawn locations", spawns.len());

    print!("{}", ascii::draw(&maze, &spawns)?);
    println!("seed: {:#x}", config.seed());
    println!("open edges: {}", maze.open_edge_count());
    println!("broken walls: {}", maze.broken_walls());
    for (index, spawn) in spawns.iter().enumerate() {
        println!("spawn {index}: {spawn}");
    }

    Ok(())
}

fn parse_cell(value: &str) -> Result<CellCoord, String> {
    let (column, row) = value
        .split_once(',')
        .ok_or_else(|| format!("expected COLUMN,ROW but found '{value}'"))?;
    let column = column
        .trim()
        .parse()
        .map_err(|error| format!("invalid column '{column}': {error}"))?;
    let row = row
        .trim()
        .parse()
        .map_err(|error| format!("invalid row '{row}': {error}"))?;
    Ok(CellCoord::new(column, row))
}
