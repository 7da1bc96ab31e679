#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Level bootstrap that assembles a playable maze from the individual systems.
//!
//! [`Maze`] is the surface the surrounding game area talks to: it generates a
//! spanning tree on construction, optionally breaks extra walls, and answers
//! adjacency, wall, and spawn queries in grid coordinates. All randomness flows
//! from one seeded [`ChaCha8Rng`], so a configuration always reproduces the
//! same maze and the same spawn sequence.

use labyrinth_core::{CellCoord, Direction, GridSize, MazeError};
use labyrinth_system_generation as generation;
use labyrinth_system_pathfinding::PathFinder;
use labyrinth_system_spawning::SpawnPlacer;
use labyrinth_system_wall_breaking::WallBreaker;
use labyrinth_world::GridGraph;
use log::debug;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Seed used when callers do not supply one.
pub const DEFAULT_SEED: u64 = 0x42f0_e1eb_d4a5_3c21;

/// Configuration parameters required to construct a [`Maze`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MazeConfig {
    columns: u32,
    rows: u32,
    seed: u64,
    start: Option<CellCoord>,
    wall_breaks: u32,
}

impl MazeConfig {
    /// Creates a configuration for a `columns x rows` maze.
    #[must_use]
    pub const fn new(columns: u32, rows: u32) -> Self {
        Self {
            columns,
            rows,
            seed: DEFAULT_SEED,
            start: None,
            wall_breaks: 0,
        }
    }

    /// Creates a configuration for a square maze.
    #[must_use]
    pub const fn square(size: u32) -> Self {
        Self::new(size, size)
    }

    /// Uses the provided seed for every random decision.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Starts the backtracking walk from a fixed cell instead of a random one.
    #[must_use]
    pub const fn with_start(mut self, start: CellCoord) -> Self {
        self.start = Some(start);
        self
    }

    /// Breaks the given number of extra walls right after generation.
    #[must_use]
    pub const fn with_wall_breaks(mut self, wall_breaks: u32) -> Self {
        self.wall_breaks = wall_breaks;
        self
    }

    /// Number of columns in the maze.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows in the maze.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Seed feeding the maze's random source.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Fixed generation start, if any.
    #[must_use]
    pub const fn start(&self) -> Option<CellCoord> {
        self.start
    }

    /// Number of extra walls broken during construction.
    #[must_use]
    pub const fn wall_breaks(&self) -> u32 {
        self.wall_breaks
    }
}

/// Generated maze plus the spawn state of the level that owns it.
#[derive(Clone, Debug)]
pub struct Maze {
    graph: GridGraph,
    rng: ChaCha8Rng,
    placer: SpawnPlacer,
    generation_start: CellCoord,
    broken_walls: u32,
}

impl Maze {
    /// Generates a `columns x rows` maze with the default seed.
    ///
    /// # Errors
    ///
    /// Returns [`MazeError::InvalidDimensions`] when either dimension is zero.
    pub fn new(columns: u32, rows: u32) -> Result<Self, MazeError> {
        Self::from_config(MazeConfig::new(columns, rows))
    }

    /// Generates a square maze with the default seed.
    ///
    /// # Errors
    ///
    /// Returns [`MazeError::InvalidDimensions`] when `size` is zero.
    pub fn square(size: u32) -> Result<Self, MazeError> {
        Self::from_config(MazeConfig::square(size))
    }

    /// Generates a maze as described by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`MazeError::InvalidDimensions`] for zero-sized grids and
    /// [`MazeError::OutOfBounds`] when the configured start lies outside them.
    pub fn from_config(config: MazeConfig) -> Result<Self, MazeError> {
        let mut graph = GridGraph::with_size(GridSize::new(config.columns, config.rows)?);
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);

        let generation_start = match config.start {
            Some(start) => {
                generation::generate_from(&mut graph, start, &mut rng)?;
                start
            }
            None => generation::generate(&mut graph, &mut rng)?,
        };
        let broken_walls =
            WallBreaker::default().break_walls(&mut graph, config.wall_breaks, &mut rng)?;
        let placer = SpawnPlacer::new(graph.random_cell(&mut rng));

        debug!(
            "bootstrapped {} maze with seed {:#x}: {} open edges, {broken_walls} broken walls",
            graph.size(),
            config.seed,
            graph.open_edge_count()
        );

        Ok(Self {
            graph,
            rng,
            placer,
            generation_start,
            broken_walls,
        })
    }

    /// Underlying grid graph.
    #[must_use]
    pub const fn graph(&self) -> &GridGraph {
        &self.graph
    }

    /// Number of columns (maze width).
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.graph.width()
    }

    /// Number of rows (maze height).
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.graph.height()
    }

    /// Cell the backtracking walk started from.
    #[must_use]
    pub const fn generation_start(&self) -> CellCoord {
        self.generation_start
    }

    /// Total number of extra walls broken so far.
    #[must_use]
    pub const fn broken_walls(&self) -> u32 {
        self.broken_walls
    }

    /// Number of open edges in the maze.
    #[must_use]
    pub const fn open_edge_count(&self) -> usize {
        self.graph.open_edge_count()
    }

    /// Reports whether the cell lies inside the maze.
    #[must_use]
    pub const fn in_bounds(&self, cell: CellCoord) -> bool {
        self.graph.in_bounds(cell)
    }

    /// Cells reachable from `cell` through a single open edge.
    ///
    /// # Errors
    ///
    /// Returns [`MazeError::OutOfBounds`] when `cell` lies outside the maze.
    pub fn maze_adjacent(&self, cell: CellCoord) -> Result<Vec<CellCoord>, MazeError> {
        self.graph.maze_neighbors(cell)
    }

    /// Grid neighbors of `cell` still separated from it by a wall.
    ///
    /// # Errors
    ///
    /// Returns [`MazeError::OutOfBounds`] when `cell` lies outside the maze.
    pub fn not_maze_adjacent(&self, cell: CellCoord) -> Result<Vec<CellCoord>, MazeError> {
        self.graph.non_maze_neighbors(cell)
    }

    /// Reports whether a wall blocks movement from `cell` in `direction`.
    ///
    /// # Errors
    ///
    /// Returns [`MazeError::OutOfBounds`] when `cell` lies outside the maze.
    pub fn is_wall(&self, cell: CellCoord, direction: Direction) -> Result<bool, MazeError> {
        self.graph.is_wall(cell, direction)
    }

    /// Every blocked `(cell, direction)` side, as consumed by wall renderers.
    pub fn walls(&self) -> impl Iterator<Item = (CellCoord, Direction)> + '_ {
        self.graph.walls()
    }

    /// Opens the wall between two grid-adjacent cells.
    ///
    /// # Errors
    ///
    /// See [`GridGraph::connect`].
    pub fn connect(&mut self, from: CellCoord, to: CellCoord) -> Result<(), MazeError> {
        self.graph.connect(from, to)
    }

    /// Breaks up to `count` extra walls and returns how many were broken.
    ///
    /// # Errors
    ///
    /// See [`WallBreaker::break_walls`].
    pub fn break_walls(&mut self, count: u32) -> Result<u32, MazeError> {
        let broken = WallBreaker::default().break_walls(&mut self.graph, count, &mut self.rng)?;
        self.broken_walls += broken;
        Ok(broken)
    }

    /// Uniformly samples a cell of the maze.
    pub fn random_cell(&mut self) -> CellCoord {
        self.graph.random_cell(&mut self.rng)
    }

    /// Next well-separated spawn location for the level.
    ///
    /// # Errors
    ///
    /// Returns [`MazeError::SpawnsExhausted`] once every cell has been claimed.
    pub fn next_start_location(&mut self) -> Result<CellCoord, MazeError> {
        self.placer.next_spawn(&self.graph)
    }

    /// Next `count` spawn locations in placement order.
    ///
    /// # Errors
    ///
    /// See [`Maze::next_start_location`].
    pub fn start_locations(&mut self, count: usize) -> Result<Vec<CellCoord>, MazeError> {
        self.placer.spawn_batch(&self.graph, count)
    }

    /// Spawn placement state, including every claimed cell.
    #[must_use]
    pub const fn spawn_placer(&self) -> &SpawnPlacer {
        &self.placer
    }

    /// Breadth-first search over the maze from one or more source cells.
    ///
    /// # Errors
    ///
    /// See [`PathFinder::search`].
    pub fn search(&self, sources: &[CellCoord]) -> Result<PathFinder, MazeError> {
        PathFinder::search(&self.graph, sources)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_builders_override_defaults() {
        let config = MazeConfig::square(7)
            .with_seed(9)
            .with_start(CellCoord::new(1, 2))
            .with_wall_breaks(4);

        assert_eq!(config.columns(), 7);
        assert_eq!(config.rows(), 7);
        assert_eq!(config.seed(), 9);
        assert_eq!(config.start(), Some(CellCoord::new(1, 2)));
        assert_eq!(config.wall_breaks(), 4);
        assert_eq!(MazeConfig::new(3, 4).seed(), DEFAULT_SEED);
    }

    #[test]
    fn square_constructor_builds_square_maze() {
        let maze = Maze::square(13).expect("valid size");

        assert_eq!(maze.width(), 13);
        assert_eq!(maze.height(), 13);
        assert_eq!(maze.open_edge_count(), 13 * 13 - 1);
    }

    #[test]
    fn zero_sized_mazes_are_rejected() {
        assert_eq!(
            Maze::new(0, 5).map(|maze| maze.width()),
            Err(MazeError::InvalidDimensions {
                columns: 0,
                rows: 5
            })
        );
    }

    #[test]
    fn configured_start_is_recorded() {
        let start = CellCoord::new(2, 1);
        let maze = Maze::from_config(MazeConfig::new(4, 3).with_start(start)).expect("valid");

        assert_eq!(maze.generation_start(), start);
    }

    #[test]
    fn out_of_bounds_start_is_rejected() {
        let result = Maze::from_config(MazeConfig::new(4, 3).with_start(CellCoord::new(4, 0)));

        assert!(matches!(result, Err(MazeError::OutOfBounds { .. })));
    }
}
