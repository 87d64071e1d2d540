//! [`Board`] is the fixed-size 2D array of cells that every engine mutates in place.

use crate::{Error, Result};

/// A rectangular grid of cells addressed by `(x, y)` with `x` in `[0, W)` and
/// `y` in `[0, H)`.
///
/// The board is created once per run, mutated in place by the owning engine,
/// and never resizes. Every coordinate in range holds exactly one cell.
/// Access outside the range fails with [`Error::CoordOutOfBounds`]; it is
/// never clamped.
///
/// Coordinates use the panel convention: `x` selects the column (the long,
/// 32-wide axis on the physical panel) and `y` the row within that column.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board<C, const W: usize, const H: usize> {
    cells: [[C; H]; W],
}

impl<C: Copy + Default, const W: usize, const H: usize> Board<C, W, H> {
    /// Board width in cells.
    pub const WIDTH: usize = W;
    /// Board height in cells.
    pub const HEIGHT: usize = H;
    /// Total number of cells.
    pub const LEN: usize = W * H;

    /// Create a board with every cell set to the cell type's default
    /// (all dead / all wall).
    #[must_use]
    pub fn new() -> Self {
        Self {
            cells: [[C::default(); H]; W],
        }
    }

    /// Whether `(x, y)` addresses a cell on this board.
    #[must_use]
    pub fn in_bounds(&self, x: usize, y: usize) -> bool {
        x < W && y < H
    }

    /// Borrow the cell at `(x, y)`.
    ///
    /// # Errors
    ///
    /// [`Error::CoordOutOfBounds`] if either coordinate is out of range.
    pub fn cell(&self, x: usize, y: usize) -> Result<&C> {
        self.cells
            .get(x)
            .and_then(|column| column.get(y))
            .ok_or(Error::CoordOutOfBounds {
                x,
                y,
                width: W,
                height: H,
            })
    }

    /// Mutably borrow the cell at `(x, y)`.
    ///
    /// # Errors
    ///
    /// [`Error::CoordOutOfBounds`] if either coordinate is out of range.
    pub fn cell_mut(&mut self, x: usize, y: usize) -> Result<&mut C> {
        self.cells
            .get_mut(x)
            .and_then(|column| column.get_mut(y))
            .ok_or(Error::CoordOutOfBounds {
                x,
                y,
                width: W,
                height: H,
            })
    }

    /// Replace the cell at `(x, y)`.
    ///
    /// # Errors
    ///
    /// [`Error::CoordOutOfBounds`] if either coordinate is out of range.
    pub fn set(&mut self, x: usize, y: usize, cell: C) -> Result<()> {
        *self.cell_mut(x, y)? = cell;
        Ok(())
    }

    /// Iterate over `(x, y, &cell)` in x-major order.
    ///
    /// The order matters: the Life engine's canonical state key folds the
    /// board's bits in exactly this order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &C)> {
        self.cells.iter().enumerate().flat_map(|(x, column)| {
            column
                .iter()
                .enumerate()
                .map(move |(y, cell)| (x, y, cell))
        })
    }

    /// Iterate mutably over `(x, y, &mut cell)` in x-major order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (usize, usize, &mut C)> {
        self.cells.iter_mut().enumerate().flat_map(|(x, column)| {
            column
                .iter_mut()
                .enumerate()
                .map(move |(y, cell)| (x, y, cell))
        })
    }

    /// Reset every cell to its default.
    pub fn clear(&mut self) {
        self.cells = [[C::default(); H]; W];
    }
}

impl<C: Copy + Default, const W: usize, const H: usize> Default for Board<C, W, H> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn access_in_bounds() {
        let mut board = Board::<u8, 4, 3>::new();
        assert_eq!(*board.cell(3, 2).unwrap(), 0);
        board.set(3, 2, 7).unwrap();
        assert_eq!(*board.cell(3, 2).unwrap(), 7);
    }

    #[test]
    fn access_out_of_bounds_fails_fast() {
        let mut board = Board::<u8, 4, 3>::new();
        assert_eq!(
            board.cell(4, 0),
            Err(Error::CoordOutOfBounds {
                x: 4,
                y: 0,
                width: 4,
                height: 3
            })
        );
        assert!(board.cell_mut(0, 3).is_err());
        assert!(board.set(4, 3, 1).is_err());
    }

    #[test]
    fn iter_is_x_major_and_covers_every_cell() {
        let board = Board::<u8, 3, 2>::new();
        let coords: Vec<_> = board.iter().map(|(x, y, _)| (x, y)).collect();
        assert_eq!(coords, [(0, 0), (0, 1), (1, 0), (1, 1), (2, 0), (2, 1)]);
    }
}
