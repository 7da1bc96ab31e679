#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Multi-source breadth-first search over a maze's open edges.

use std::collections::VecDeque;

use labyrinth_core::{CellCoord, GridSize, MazeError};
use labyrinth_world::GridGraph;

/// Immutable result of a breadth-first search seeded from one or more cells.
///
/// Distances count open-edge hops to the nearest source. Cells the search
/// never reached hold [`PathFinder::unreachable_distance`], which equals the
/// grid's cell count and therefore exceeds every real distance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathFinder {
    size: GridSize,
    sources: Vec<CellCoord>,
    distances: Vec<usize>,
    previous: Vec<Option<usize>>,
    most_distant: CellCoord,
    reached: usize,
}

impl PathFinder {
    /// Runs the search from a single source cell.
    ///
    /// # Errors
    ///
    /// Returns [`MazeError::OutOfBounds`] when `source` lies outside the grid.
    pub fn from_cell(graph: &GridGraph, source: CellCoord) -> Result<Self, MazeError> {
        Self::search(graph, &[source])
    }

    /// Runs the search from every provided source simultaneously.
    ///
    /// Duplicate sources are ignored after their first occurrence.
    ///
    /// # Errors
    ///
    /// Returns [`MazeError::NoSources`] when `sources` is empty and
    /// [`MazeError::OutOfBounds`] when any source lies outside the grid.
    pub fn search(graph: &GridGraph, sources: &[CellCoord]) -> Result<Self, MazeError> {
        if sources.is_empty() {
            return Err(MazeError::NoSources);
        }

        let cell_count = graph.cell_count();
        let unreachable = cell_count;
        let mut distances = vec![unreachable; cell_count];
        let mut previous = vec![None; cell_count];
        let mut queue = VecDeque::with_capacity(cell_count);
        let mut unique_sources = Vec::with_capacity(sources.len());

        for &source in sources {
            let index = graph.index(source).ok_or(MazeError::OutOfBounds {
                cell: source,
                size: graph.size(),
            })?;
            if distances[index] == 0 {
                continue;
            }
            distances[index] = 0;
            unique_sources.push(source);
            queue.push_back((source, index));
        }

        let mut most_distant = sources[0];
        let mut reached = 0;

        while let Some((cell, index)) = queue.pop_front() {
            most_distant = cell;
            reached += 1;
            let next_distance = distances[index] + 1;

            for neighbor in graph.open_neighbors(cell) {
                let Some(neighbor_index) = graph.index(neighbor) else {
                    continue;
                };

                if distances[neighbor_index] <= next_distance {
                    continue;
                }

                distances[neighbor_index] = next_distance;
                previous[neighbor_index] = Some(index);
                queue.push_back((neighbor, neighbor_index));
            }
        }

        Ok(Self {
            size: graph.size(),
            sources: unique_sources,
            distances,
            previous,
            most_distant,
            reached,
        })
    }

    /// Cells the search was seeded from, without duplicates.
    #[must_use]
    pub fn sources(&self) -> &[CellCoord] {
        &self.sources
    }

    /// Last cell removed from the frontier, which lies at maximum distance.
    #[must_use]
    pub const fn most_distant(&self) -> CellCoord {
        self.most_distant
    }

    /// Distance of [`PathFinder::most_distant`] from the source set.
    #[must_use]
    pub fn farthest_distance(&self) -> usize {
        self.size
            .index(self.most_distant)
            .and_then(|index| self.distances.get(index).copied())
            .unwrap_or(0)
    }

    /// Sentinel distance stored for cells the search never reached.
    #[must_use]
    pub fn unreachable_distance(&self) -> usize {
        self.distances.len()
    }

    /// Number of cells the search reached, sources included.
    #[must_use]
    pub const fn reached_count(&self) -> usize {
        self.reached
    }

    /// Dense distances stored in row-major order.
    #[must_use]
    pub fn distances(&self) -> &[usize] {
        &self.distances
    }

    /// Hop distance from the nearest source, or the unreachable sentinel.
    ///
    /// # Errors
    ///
    /// Returns [`MazeError::OutOfBounds`] when `cell` lies outside the searched grid.
    pub fn distance(&self, cell: CellCoord) -> Result<usize, MazeError> {
        let index = self.checked_index(cell)?;
        Ok(self.distances[index])
    }

    /// Reports whether the search reached `cell`.
    ///
    /// # Errors
    ///
    /// Returns [`MazeError::OutOfBounds`] when `cell` lies outside the searched grid.
    pub fn is_reachable(&self, cell: CellCoord) -> Result<bool, MazeError> {
        Ok(self.distance(cell)? < self.unreachable_distance())
    }

    /// Predecessor of `cell` on a shortest path, `None` for sources and unreached cells.
    ///
    /// # Errors
    ///
    /// Returns [`MazeError::OutOfBounds`] when `cell` lies outside the searched grid.
    pub fn previous(&self, cell: CellCoord) -> Result<Option<CellCoord>, MazeError> {
        let index = self.checked_index(cell)?;
        Ok(self.previous[index].and_then(|offset| self.cell_at(offset)))
    }

    /// Shortest path from the nearest source to `target`.
    ///
    /// The first element is a source cell and the last element is `target`.
    ///
    /// # Errors
    ///
    /// Returns [`MazeError::OutOfBounds`] when `target` lies outside the searched
    /// grid and [`MazeError::UnreachableCell`] when the search never reached it.
    pub fn shortest_path(&self, target: CellCoord) -> Result<Vec<CellCoord>, MazeError> {
        let mut index = self.checked_index(target)?;
        let length = self.distances[index];
        if length >= self.unreachable_distance() {
            return Err(MazeError::UnreachableCell { cell: target });
        }

        let mut path = Vec::with_capacity(length + 1);
        path.push(target);
        while let Some(offset) = self.previous[index] {
            path.extend(self.cell_at(offset));
            index = offset;
        }
        path.reverse();
        Ok(path)
    }

    fn checked_index(&self, cell: CellCoord) -> Result<usize, MazeError> {
        self.size.index(cell).ok_or(MazeError::OutOfBounds {
            cell,
            size: self.size,
        })
    }

    fn cell_at(&self, index: usize) -> Option<CellCoord> {
        self.size.cell_at(index)
    }
}
