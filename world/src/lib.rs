#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative grid graph that backs every generated maze.
//!
//! The graph owns a fixed `columns x rows` cell universe and records which
//! grid-adjacent cell pairs are open (no wall between them). Openings are
//! stored as one packed direction mask per cell, so adjacency is symmetric by
//! construction: [`GridGraph::connect`] sets the matching bit on both
//! endpoints. Systems mutate the graph only while a level is being set up and
//! treat it as read-only afterwards.

use labyrinth_core::{CellCoord, ConnectionFault, Direction, GridSize, MazeError};
use rand::Rng;

/// Grid of cells joined by open edges.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridGraph {
    size: GridSize,
    openings: Vec<u8>,
    open_edges: usize,
}

impl GridGraph {
    /// Creates a fully walled graph with the provided dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`MazeError::InvalidDimensions`] when either dimension is zero.
    pub fn new(columns: u32, rows: u32) -> Result<Self, MazeError> {
        Ok(Self::with_size(GridSize::new(columns, rows)?))
    }

    /// Creates a fully walled graph from a validated size descriptor.
    #[must_use]
    pub fn with_size(size: GridSize) -> Self {
        Self {
            size,
            openings: vec![0; size.cell_count()],
            open_edges: 0,
        }
    }

    /// Dimensions of the grid.
    #[must_use]
    pub const fn size(&self) -> GridSize {
        self.size
    }

    /// Number of columns (grid width).
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.size.columns()
    }

    /// Number of rows (grid height).
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.size.rows()
    }

    /// Total number of cells.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.openings.len()
    }

    /// Number of open edges currently present in the graph.
    #[must_use]
    pub const fn open_edge_count(&self) -> usize {
        self.open_edges
    }

    /// Reports whether the cell lies inside the grid.
    #[must_use]
    pub const fn in_bounds(&self, cell: CellCoord) -> bool {
        self.size.contains(cell)
    }

    /// Row-major index of the cell, if it lies inside the grid.
    #[must_use]
    pub fn index(&self, cell: CellCoord) -> Option<usize> {
        self.size.index(cell)
    }

    /// Cell stored at the provided row-major index.
    #[must_use]
    pub fn cell_at(&self, index: usize) -> Option<CellCoord> {
        self.size.cell_at(index)
    }

    /// Iterator over every cell in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = CellCoord> + '_ {
        (0..self.cell_count()).filter_map(|index| self.size.cell_at(index))
    }

    /// In-bounds neighbor of `cell` in the provided direction, ignoring walls.
    #[must_use]
    pub fn neighbor(&self, cell: CellCoord, direction: Direction) -> Option<CellCoord> {
        cell.step(direction)
            .filter(|candidate| self.in_bounds(*candidate))
    }

    /// Grid-adjacent in-bounds cells, ignoring walls, in [`Direction::ALL`] order.
    ///
    /// # Errors
    ///
    /// Returns [`MazeError::OutOfBounds`] when `cell` lies outside the grid.
    pub fn grid_neighbors(&self, cell: CellCoord) -> Result<Vec<CellCoord>, MazeError> {
        let _ = self.checked_index(cell)?;
        Ok(self.grid_neighbors_unchecked(cell).collect())
    }

    /// Grid-adjacent cells joined to `cell` by an open edge.
    ///
    /// # Errors
    ///
    /// Returns [`MazeError::OutOfBounds`] when `cell` lies outside the grid.
    pub fn maze_neighbors(&self, cell: CellCoord) -> Result<Vec<CellCoord>, MazeError> {
        let index = self.checked_index(cell)?;
        let mask = self.openings[index];
        Ok(self.masked_neighbors(cell, mask).collect())
    }

    /// Grid-adjacent cells still separated from `cell` by a wall.
    ///
    /// # Errors
    ///
    /// Returns [`MazeError::OutOfBounds`] when `cell` lies outside the grid.
    pub fn non_maze_neighbors(&self, cell: CellCoord) -> Result<Vec<CellCoord>, MazeError> {
        let index = self.checked_index(cell)?;
        let mask = !self.openings[index] & 0b1111;
        Ok(self.masked_neighbors(cell, mask).collect())
    }

    /// Reports whether movement from `cell` in `direction` is blocked.
    ///
    /// The grid border always counts as a wall.
    ///
    /// # Errors
    ///
    /// Returns [`MazeError::OutOfBounds`] when `cell` lies outside the grid.
    pub fn is_wall(&self, cell: CellCoord, direction: Direction) -> Result<bool, MazeError> {
        let index = self.checked_index(cell)?;
        if self.neighbor(cell, direction).is_none() {
            return Ok(true);
        }
        Ok(self.openings[index] & direction.bit() == 0)
    }

    /// Reports whether the two cells are joined by an open edge.
    ///
    /// # Errors
    ///
    /// Returns [`MazeError::OutOfBounds`] when either cell lies outside the grid.
    pub fn is_connected(&self, from: CellCoord, to: CellCoord) -> Result<bool, MazeError> {
        let index = self.checked_index(from)?;
        let _ = self.checked_index(to)?;
        Ok(Direction::between(from, to)
            .is_some_and(|direction| self.openings[index] & direction.bit() != 0))
    }

    /// Reports whether the cell has at least one open edge.
    ///
    /// # Errors
    ///
    /// Returns [`MazeError::OutOfBounds`] when `cell` lies outside the grid.
    pub fn has_openings(&self, cell: CellCoord) -> Result<bool, MazeError> {
        let index = self.checked_index(cell)?;
        Ok(self.openings[index] != 0)
    }

    /// Opens the wall between two grid-adjacent cells.
    ///
    /// # Errors
    ///
    /// Returns [`MazeError::OutOfBounds`] when either cell lies outside the grid
    /// and [`MazeError::InvalidConnection`] when the cells are identical, not
    /// grid-adjacent, or already connected.
    pub fn connect(&mut self, from: CellCoord, to: CellCoord) -> Result<(), MazeError> {
        let from_index = self.checked_index(from)?;
        let to_index = self.checked_index(to)?;

        let invalid = |reason| MazeError::InvalidConnection { from, to, reason };
        if from == to {
            return Err(invalid(ConnectionFault::SameCell));
        }
        let direction =
            Direction::between(from, to).ok_or(invalid(ConnectionFault::NotGridAdjacent))?;
        if self.openings[from_index] & direction.bit() != 0 {
            return Err(invalid(ConnectionFault::AlreadyConnected));
        }

        self.openings[from_index] |= direction.bit();
        self.openings[to_index] |= direction.opposite().bit();
        self.open_edges += 1;
        Ok(())
    }

    /// Uniformly samples an in-bounds cell using the supplied random source.
    pub fn random_cell<R>(&self, rng: &mut R) -> CellCoord
    where
        R: Rng + ?Sized,
    {
        CellCoord::new(
            rng.gen_range(0..self.width()),
            rng.gen_range(0..self.height()),
        )
    }

    /// Every `(cell, direction)` pair for which [`GridGraph::is_wall`] holds.
    ///
    /// Interior walls appear twice, once from each side, and border walls once.
    pub fn walls(&self) -> impl Iterator<Item = (CellCoord, Direction)> + '_ {
        self.openings
            .iter()
            .enumerate()
            .filter_map(|(index, mask)| self.size.cell_at(index).map(|cell| (cell, *mask)))
            .flat_map(|(cell, mask)| {
                Direction::ALL
                    .into_iter()
                    .filter(move |direction| mask & direction.bit() == 0)
                    .map(move |direction| (cell, direction))
            })
    }

    /// Iterator over the open neighbors of an in-bounds cell without allocating.
    pub fn open_neighbors(&self, cell: CellCoord) -> impl Iterator<Item = CellCoord> + '_ {
        let mask = self.index(cell).map_or(0, |index| self.openings[index]);
        self.masked_neighbors(cell, mask)
    }

    /// Iterator over the in-bounds grid neighbors of a cell, ignoring walls.
    pub fn grid_neighbors_unchecked(
        &self,
        cell: CellCoord,
    ) -> impl Iterator<Item = CellCoord> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(move |direction| self.neighbor(cell, direction))
    }

    fn masked_neighbors(
        &self,
        cell: CellCoord,
        mask: u8,
    ) -> impl Iterator<Item = CellCoord> + '_ {
        Direction::ALL
            .into_iter()
            .filter(move |direction| mask & direction.bit() != 0)
            .filter_map(move |direction| self.neighbor(cell, direction))
    }

    fn checked_index(&self, cell: CellCoord) -> Result<usize, MazeError> {
        self.index(cell).ok_or(MazeError::OutOfBounds {
            cell,
            size: self.size,
        })
    }
}
