use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Immutable copy of everything a view layer renders.
///
/// Owning the cells means the grid counters can never be driven out of sync through it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub rows: usize,
    pub columns: usize,
    pub status: GameStatus,
    pub remaining_mines: isize,
    /// Indexed by `(row, column)`.
    pub cells: Array2<Cell>,
}

impl Snapshot {
    pub fn from_game(game: &Game) -> Self {
        let rows = game.row_count();
        let columns = game.column_count();
        let squares = game.squares();

        Self {
            rows,
            columns,
            status: game.status(),
            remaining_mines: game.remaining_mine_count(),
            cells: Array2::from_shape_fn((rows, columns), |(row, column)| {
                squares[row * columns + column]
            }),
        }
    }

    /// Cell at a row-major index, `None` when out of range.
    pub fn cell(&self, index: CellIndex) -> Option<Cell> {
        if self.columns == 0 {
            return None;
        }
        self.cells
            .get((index / self.columns, index % self.columns))
            .copied()
    }

    pub fn validate(&self) -> Result<()> {
        if self.rows == 0 || self.columns == 0 {
            return Err(GameError::InvalidDimensions {
                rows: self.rows,
                columns: self.columns,
            });
        }
        if self.cells.dim() != (self.rows, self.columns) {
            return Err(GameError::InvalidBoardShape);
        }
        Ok(())
    }
}
