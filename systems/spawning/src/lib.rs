#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Spawn placement that keeps successive spawn locations well separated.
//!
//! [`next_spawn`] works on a caller-owned sequence of claimed cells, and
//! [`SpawnPlacer`] wraps one such sequence: the seed cell plus every cell on
//! the paths that led to earlier spawns. Each request runs a
//! multi-source search from that set, takes the cell farthest from it as the
//! next spawn, and claims the shortest path to it. Claiming whole corridors
//! keeps later requests from settling on the same branch. On a tree-shaped maze
//! this greedy farthest-point choice approximates maximising the minimum
//! pairwise distance; once loops exist the result is a heuristic.

use std::collections::HashSet;

use labyrinth_core::{CellCoord, MazeError};
use labyrinth_system_pathfinding::PathFinder;
use labyrinth_world::GridGraph;
use log::debug;

/// Picks the cell farthest from `claimed` and appends the path leading to it.
///
/// The new spawn is the last cell the multi-source search reaches; every cell
/// on its shortest path except the already claimed source is pushed onto
/// `claimed`, ending with the spawn itself.
///
/// # Errors
///
/// Returns [`MazeError::NoSources`] when `claimed` is empty,
/// [`MazeError::OutOfBounds`] when a claimed cell lies outside `graph`, and
/// [`MazeError::SpawnsExhausted`] when every cell reachable from the claimed
/// cells is already claimed. `claimed` is left untouched on error.
pub fn next_spawn(
    graph: &GridGraph,
    claimed: &mut Vec<CellCoord>,
) -> Result<CellCoord, MazeError> {
    let search = PathFinder::search(graph, claimed)?;
    let target = search.most_distant();
    if search.farthest_distance() == 0 {
        return Err(MazeError::SpawnsExhausted);
    }

    let path = search.shortest_path(target)?;
    claimed.extend(path.iter().skip(1).copied());

    debug!(
        "spawn placed at {target}, {} hops from claimed tree of {} cells",
        path.len() - 1,
        claimed.len()
    );
    Ok(target)
}

/// Claimed-path tree that drives spawn placement.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpawnPlacer {
    claimed: Vec<CellCoord>,
    lookup: HashSet<CellCoord>,
    spawns: Vec<CellCoord>,
}

impl SpawnPlacer {
    /// Creates a placer whose claimed tree starts at `seed`.
    #[must_use]
    pub fn new(seed: CellCoord) -> Self {
        Self {
            claimed: vec![seed],
            lookup: HashSet::from([seed]),
            spawns: Vec::new(),
        }
    }

    /// Cells claimed so far, in the order they were claimed.
    #[must_use]
    pub fn claimed(&self) -> &[CellCoord] {
        &self.claimed
    }

    /// Spawn locations handed out so far.
    #[must_use]
    pub fn spawns(&self) -> &[CellCoord] {
        &self.spawns
    }

    /// Reports whether the cell already belongs to the claimed tree.
    #[must_use]
    pub fn is_claimed(&self, cell: CellCoord) -> bool {
        self.lookup.contains(&cell)
    }

    /// Chooses the next spawn location and claims the path leading to it.
    ///
    /// # Errors
    ///
    /// See [`next_spawn`].
    pub fn next_spawn(&mut self, graph: &GridGraph) -> Result<CellCoord, MazeError> {
        let before = self.claimed.len();
        let target = next_spawn(graph, &mut self.claimed)?;
        self.lookup.extend(self.claimed[before..].iter().copied());
        self.spawns.push(target);
        Ok(target)
    }

    /// Chooses `count` spawn locations in sequence.
    ///
    /// # Errors
    ///
    /// Stops at the first failing request and returns its error; spawns placed
    /// before the failure stay claimed.
    pub fn spawn_batch(
        &mut self,
        graph: &GridGraph,
        count: usize,
    ) -> Result<Vec<CellCoord>, MazeError> {
        let mut placed = Vec::with_capacity(count);
        for _ in 0..count {
            placed.push(self.next_spawn(graph)?);
        }
        Ok(placed)
    }
}
