#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the labyrinth crates.
//!
//! This crate defines the value types every other crate speaks in. The world
//! crate owns a grid graph addressed by [`CellCoord`] values, systems carve,
//! perturb, and search that graph, and every fallible operation reports
//! failures through the single [`MazeError`] taxonomy defined here. Nothing in
//! this crate knows about pixels, textures, or engine objects.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Computes the Manhattan distance between two cell coordinates.
    #[must_use]
    pub fn manhattan_distance(self, other: CellCoord) -> u64 {
        u64::from(self.column().abs_diff(other.column()))
            + u64::from(self.row().abs_diff(other.row()))
    }

    /// Reports whether the two cells share an edge in the 4-connected grid.
    #[must_use]
    pub fn is_grid_adjacent(self, other: CellCoord) -> bool {
        self.manhattan_distance(other) == 1
    }

    /// Cell one step away in the provided direction.
    ///
    /// Returns `None` when the step would leave the non-negative quadrant. The
    /// upper bounds of a concrete grid are checked by the grid itself.
    #[must_use]
    pub fn step(self, direction: Direction) -> Option<CellCoord> {
        match direction {
            Direction::North => self.row.checked_sub(1).map(|row| Self::new(self.column, row)),
            Direction::East => self
                .column
                .checked_add(1)
                .map(|column| Self::new(column, self.row)),
            Direction::South => self.row.checked_add(1).map(|row| Self::new(self.column, row)),
            Direction::West => self
                .column
                .checked_sub(1)
                .map(|column| Self::new(column, self.row)),
        }
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.column, self.row)
    }
}

/// Cardinal directions connecting a cell to its grid neighbors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    North,
    /// Movement toward increasing column indices.
    East,
    /// Movement toward increasing row indices.
    South,
    /// Movement toward decreasing column indices.
    West,
}

impl Direction {
    /// Every direction in the canonical neighbor order used across the workspace.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Direction pointing the opposite way.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::East => Self::West,
            Self::South => Self::North,
            Self::West => Self::East,
        }
    }

    /// Direction leading from `from` to `to` when the cells are grid-adjacent.
    #[must_use]
    pub fn between(from: CellCoord, to: CellCoord) -> Option<Self> {
        if !from.is_grid_adjacent(to) {
            return None;
        }

        if from.column() != to.column() {
            if to.column() > from.column() {
                Some(Self::East)
            } else {
                Some(Self::West)
            }
        } else if to.row() > from.row() {
            Some(Self::South)
        } else {
            Some(Self::North)
        }
    }

    /// Bit assigned to the direction inside packed opening masks.
    #[must_use]
    pub const fn bit(self) -> u8 {
        match self {
            Self::North => 0b0001,
            Self::East => 0b0010,
            Self::South => 0b0100,
            Self::West => 0b1000,
        }
    }
}

/// Dimensions of a grid measured in whole cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridSize {
    columns: u32,
    rows: u32,
}

impl GridSize {
    /// Creates a size descriptor, rejecting grids without any cells.
    ///
    /// # Errors
    ///
    /// Returns [`MazeError::InvalidDimensions`] when either dimension is zero or
    /// the total cell count does not fit in memory addressing.
    pub fn new(columns: u32, rows: u32) -> Result<Self, MazeError> {
        let count = u64::from(columns) * u64::from(rows);
        if columns == 0 || rows == 0 || usize::try_from(count).is_err() {
            return Err(MazeError::InvalidDimensions { columns, rows });
        }
        Ok(Self { columns, rows })
    }

    /// Number of columns (grid width).
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows (grid height).
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Total number of cells contained in the grid.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.columns as usize * self.rows as usize
    }

    /// Reports whether the cell lies inside `[0, columns) x [0, rows)`.
    #[must_use]
    pub const fn contains(&self, cell: CellCoord) -> bool {
        cell.column() < self.columns && cell.row() < self.rows
    }

    /// Row-major index of the cell, if it lies inside the grid.
    #[must_use]
    pub fn index(&self, cell: CellCoord) -> Option<usize> {
        if !self.contains(cell) {
            return None;
        }
        let row = usize::try_from(cell.row()).ok()?;
        let column = usize::try_from(cell.column()).ok()?;
        let width = usize::try_from(self.columns).ok()?;
        row.checked_mul(width)?.checked_add(column)
    }

    /// Cell stored at the provided row-major index.
    #[must_use]
    pub fn cell_at(&self, index: usize) -> Option<CellCoord> {
        if index >= self.cell_count() {
            return None;
        }
        let width = usize::try_from(self.columns).ok()?;
        let column = u32::try_from(index % width).ok()?;
        let row = u32::try_from(index / width).ok()?;
        Some(CellCoord::new(column, row))
    }
}

impl fmt::Display for GridSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.columns, self.rows)
    }
}

/// Reasons a connection request between two cells is rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConnectionFault {
    /// Both endpoints name the same cell.
    SameCell,
    /// The endpoints do not share an edge in the grid.
    NotGridAdjacent,
    /// The endpoints are already connected by an open edge.
    AlreadyConnected,
}

impl fmt::Display for ConnectionFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SameCell => write!(f, "a cell cannot connect to itself"),
            Self::NotGridAdjacent => write!(f, "cells are not grid-adjacent"),
            Self::AlreadyConnected => write!(f, "cells are already connected"),
        }
    }
}

/// Failures reported by maze construction, mutation, and queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum MazeError {
    /// A coordinate referenced a cell outside the grid.
    #[error("cell {cell} lies outside the {size} grid")]
    OutOfBounds {
        /// Offending cell.
        cell: CellCoord,
        /// Dimensions of the grid that was queried.
        size: GridSize,
    },
    /// A connection request violated the adjacency invariants.
    #[error("cannot connect {from} to {to}: {reason}")]
    InvalidConnection {
        /// First endpoint of the requested edge.
        from: CellCoord,
        /// Second endpoint of the requested edge.
        to: CellCoord,
        /// Specific invariant the request violated.
        reason: ConnectionFault,
    },
    /// A path was requested to a cell the search never reached.
    #[error("cell {cell} is unreachable from the search sources")]
    UnreachableCell {
        /// Cell the caller asked a path for.
        cell: CellCoord,
    },
    /// A grid was requested with a zero-sized dimension.
    #[error("grid dimensions {columns}x{rows} must both be positive")]
    InvalidDimensions {
        /// Requested column count.
        columns: u32,
        /// Requested row count.
        rows: u32,
    },
    /// A breadth-first search was started without any source cells.
    #[error("breadth-first search requires at least one source cell")]
    NoSources,
    /// Every reachable cell has already been claimed by earlier spawns.
    #[error("no unclaimed cell remains for another spawn location")]
    SpawnsExhausted,
}
