#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Randomized recursive-backtracking maze generation.
//!
//! The generator carves a perfect maze (a spanning tree over every cell) into
//! a freshly walled [`GridGraph`]. A cell counts as visited as soon as it owns
//! an open edge, so the graph itself records the traversal and no separate
//! visited set is kept. The walk runs on an explicit frame stack instead of
//! native recursion, so depth is bounded by heap memory rather than the call
//! stack even when the path snakes through every cell.

use labyrinth_core::{CellCoord, MazeError};
use labyrinth_world::GridGraph;
use log::{debug, trace};
use rand::{seq::SliceRandom, Rng};

/// Carves a spanning tree into `graph` starting from a random cell.
///
/// Returns the start cell the walk began from.
///
/// # Errors
///
/// Propagates [`MazeError::InvalidConnection`] if `graph` already contained
/// open edges that collide with the walk.
pub fn generate<R>(graph: &mut GridGraph, rng: &mut R) -> Result<CellCoord, MazeError>
where
    R: Rng + ?Sized,
{
    let start = graph.random_cell(rng);
    generate_from(graph, start, rng)?;
    Ok(start)
}

/// Carves a spanning tree into `graph` starting from `start`.
///
/// The graph must not contain open edges yet; every cell ends up reachable
/// from `start` and exactly `cell_count - 1` edges are opened.
///
/// # Errors
///
/// Returns [`MazeError::OutOfBounds`] when `start` lies outside the grid.
pub fn generate_from<R>(
    graph: &mut GridGraph,
    start: CellCoord,
    rng: &mut R,
) -> Result<(), MazeError>
where
    R: Rng + ?Sized,
{
    debug_assert_eq!(
        graph.open_edge_count(),
        0,
        "generation expects a fully walled graph"
    );

    let mut stack = vec![Frame::enter(graph, start, rng)?];

    while let Some(frame) = stack.last_mut() {
        let Some(next) = frame.advance() else {
            let _ = stack.pop();
            continue;
        };
        let current = frame.cell;

        if graph.has_openings(next)? {
            continue;
        }

        trace!("carving {current} -> {next}");
        graph.connect(current, next)?;
        stack.push(Frame::enter(graph, next, rng)?);
    }

    debug!(
        "carved {} maze from {start} with {} open edges",
        graph.size(),
        graph.open_edge_count()
    );
    Ok(())
}

/// Pending work for one cell of the backtracking walk.
#[derive(Debug)]
struct Frame {
    cell: CellCoord,
    candidates: Vec<CellCoord>,
    cursor: usize,
}

impl Frame {
    fn enter<R>(graph: &GridGraph, cell: CellCoord, rng: &mut R) -> Result<Self, MazeError>
    where
        R: Rng + ?Sized,
    {
        let mut candidates = graph.grid_neighbors(cell)?;
        candidates.shuffle(rng);
        Ok(Self {
            cell,
            candidates,
            cursor: 0,
        })
    }

    fn advance(&mut self) -> Option<CellCoord> {
        let next = self.candidates.get(self.cursor).copied()?;
        self.cursor += 1;
        Some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn single_cell_grid_is_a_trivial_maze() {
        let mut graph = GridGraph::new(1, 1).expect("valid size");
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let start = generate(&mut graph, &mut rng).expect("generation succeeds");

        assert_eq!(start, CellCoord::new(0, 0));
        assert_eq!(graph.open_edge_count(), 0);
    }

    #[test]
    fn corridor_grid_connects_every_neighbor() {
        let mut graph = GridGraph::new(6, 1).expect("valid size");
        let mut rng = ChaCha8Rng::seed_from_u64(99);

        generate_from(&mut graph, CellCoord::new(2, 0), &mut rng).expect("generation succeeds");

        assert_eq!(graph.open_edge_count(), 5);
        for column in 1..6 {
            assert!(graph
                .is_connected(CellCoord::new(column - 1, 0), CellCoord::new(column, 0))
                .expect("in bounds"));
        }
    }

    #[test]
    fn rejects_out_of_bounds_start() {
        let mut graph = GridGraph::new(3, 3).expect("valid size");
        let mut rng = ChaCha8Rng::seed_from_u64(5);

        let result = generate_from(&mut graph, CellCoord::new(3, 0), &mut rng);

        assert!(matches!(result, Err(MazeError::OutOfBounds { .. })));
        assert_eq!(graph.open_edge_count(), 0);
    }

    #[test]
    fn frames_yield_each_candidate_once() {
        let graph = GridGraph::new(3, 3).expect("valid size");
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mut frame = Frame::enter(&graph, CellCoord::new(1, 1), &mut rng).expect("in bounds");

        let mut seen = Vec::new();
        while let Some(cell) = frame.advance() {
            seen.push(cell);
        }
        seen.sort();

        assert_eq!(
            seen,
            vec![
                CellCoord::new(0, 1),
                CellCoord::new(1, 0),
                CellCoord::new(1, 2),
                CellCoord::new(2, 1),
            ]
        );
    }
}
