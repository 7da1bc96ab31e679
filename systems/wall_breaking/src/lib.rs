#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Opens extra walls in a generated maze to introduce loops and alternate routes.

use labyrinth_core::{CellCoord, MazeError};
use labyrinth_world::GridGraph;
use log::{debug, trace};
use rand::{seq::SliceRandom, Rng};

/// Random cell picks attempted per wall before falling back to a full scan.
pub const DEFAULT_RETRY_LIMIT: u32 = 32;

/// Best-effort wall breaker.
///
/// Each requested wall is placed by sampling random cells until one still has
/// a walled grid neighbor. After `retry_limit` fruitless samples the breaker
/// scans the whole grid for candidates and picks one of those instead; when
/// the scan comes up empty every wall is already open and the breaker stops.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WallBreaker {
    retry_limit: u32,
}

impl Default for WallBreaker {
    fn default() -> Self {
        Self::new(DEFAULT_RETRY_LIMIT)
    }
}

impl WallBreaker {
    /// Creates a wall breaker that samples up to `retry_limit` cells per wall.
    #[must_use]
    pub const fn new(retry_limit: u32) -> Self {
        Self { retry_limit }
    }

    /// Number of random samples attempted per wall before scanning.
    #[must_use]
    pub const fn retry_limit(&self) -> u32 {
        self.retry_limit
    }

    /// Opens up to `count` additional walls and returns how many were opened.
    ///
    /// # Errors
    ///
    /// Propagates graph errors, which only occur if the graph's adjacency
    /// invariants were already broken.
    pub fn break_walls<R>(
        &self,
        graph: &mut GridGraph,
        count: u32,
        rng: &mut R,
    ) -> Result<u32, MazeError>
    where
        R: Rng + ?Sized,
    {
        let mut broken = 0;
        while broken < count {
            let Some((cell, walled)) = self.pick_candidate(graph, rng)? else {
                debug!("no walls left to break after opening {broken} of {count}");
                break;
            };
            let Some(&other) = walled.choose(rng) else {
                break;
            };

            trace!("breaking wall {cell} -> {other}");
            graph.connect(cell, other)?;
            broken += 1;
        }

        debug!(
            "broke {broken} walls, maze now has {} open edges",
            graph.open_edge_count()
        );
        Ok(broken)
    }

    fn pick_candidate<R>(
        &self,
        graph: &GridGraph,
        rng: &mut R,
    ) -> Result<Option<(CellCoord, Vec<CellCoord>)>, MazeError>
    where
        R: Rng + ?Sized,
    {
        for _ in 0..self.retry_limit {
            let cell = graph.random_cell(rng);
            let walled = graph.non_maze_neighbors(cell)?;
            if !walled.is_empty() {
                return Ok(Some((cell, walled)));
            }
        }

        let mut candidates = Vec::new();
        for cell in graph.cells() {
            if !graph.non_maze_neighbors(cell)?.is_empty() {
                candidates.push(cell);
            }
        }

        let Some(&cell) = candidates.choose(rng) else {
            return Ok(None);
        };
        Ok(Some((cell, graph.non_maze_neighbors(cell)?)))
    }
}

/// Opens up to `count` walls using the default retry limit.
///
/// # Errors
///
/// See [`WallBreaker::break_walls`].
pub fn break_walls<R>(graph: &mut GridGraph, count: u32, rng: &mut R) -> Result<u32, MazeError>
where
    R: Rng + ?Sized,
{
    WallBreaker::default().break_walls(graph, count, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn fully_open(columns: u32, rows: u32) -> GridGraph {
        let mut graph = GridGraph::new(columns, rows).expect("valid size");
        let cells: Vec<_> = graph.cells().collect();
        for cell in cells {
            for neighbor in graph.non_maze_neighbors(cell).expect("in bounds") {
                graph.connect(cell, neighbor).expect("walled neighbor");
            }
        }
        graph
    }

    #[test]
    fn breaks_requested_number_of_walls() {
        let mut graph = GridGraph::new(4, 4).expect("valid size");
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        let broken = break_walls(&mut graph, 5, &mut rng).expect("valid graph");

        assert_eq!(broken, 5);
        assert_eq!(graph.open_edge_count(), 5);
    }

    #[test]
    fn fully_open_grid_is_a_no_op() {
        let mut graph = fully_open(2, 2);
        assert_eq!(graph.open_edge_count(), 4);
        let mut rng = ChaCha8Rng::seed_from_u64(8);

        let broken = break_walls(&mut graph, 3, &mut rng).expect("valid graph");

        assert_eq!(broken, 0);
        assert_eq!(graph.open_edge_count(), 4);
    }

    #[test]
    fn single_cell_grid_has_nothing_to_break() {
        let mut graph = GridGraph::new(1, 1).expect("valid size");
        let mut rng = ChaCha8Rng::seed_from_u64(8);

        assert_eq!(break_walls(&mut graph, 10, &mut rng), Ok(0));
    }

    #[test]
    fn stops_early_when_candidates_run_out() {
        // A 3x1 corridor has exactly two interior walls.
        let mut graph = GridGraph::new(3, 1).expect("valid size");
        let mut rng = ChaCha8Rng::seed_from_u64(21);

        let broken = break_walls(&mut graph, 5, &mut rng).expect("valid graph");

        assert_eq!(broken, 2);
        assert_eq!(graph.open_edge_count(), 2);
    }

    #[test]
    fn zero_retry_limit_still_finds_candidates_by_scanning() {
        let mut graph = GridGraph::new(3, 3).expect("valid size");
        let mut rng = ChaCha8Rng::seed_from_u64(2);

        let broken = WallBreaker::new(0)
            .break_walls(&mut graph, 12, &mut rng)
            .expect("valid graph");

        assert_eq!(broken, 12);
        assert_eq!(graph, fully_open(3, 3));
    }
}
