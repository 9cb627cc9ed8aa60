#![no_std]

extern crate alloc;

use core::ops::BitOr;
use serde::{Deserialize, Serialize};

pub use cell::*;
pub use error::*;
pub use game::*;
pub use grid::*;
pub use sampling::*;
pub use snapshot::*;
pub use types::*;

mod cell;
mod error;
mod game;
mod grid;
mod sampling;
mod snapshot;
mod types;

/// Board dimensions and mine count of a new game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub rows: usize,
    pub columns: usize,
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(rows: usize, columns: usize, mines: CellCount) -> Self {
        Self {
            rows,
            columns,
            mines,
        }
    }

    pub fn new(rows: usize, columns: usize, mines: CellCount) -> Result<Self> {
        let config = Self::new_unchecked(rows, columns, mines);
        config.validate()?;
        Ok(config)
    }

    /// Forces the values into range instead of failing: at least one row and column, at most one mine per cell.
    pub fn new_clamped(rows: usize, columns: usize, mines: CellCount) -> Self {
        let rows = rows.max(1);
        let columns = columns.max(1);
        let mines = mines.min(rows.saturating_mul(columns));
        Self::new_unchecked(rows, columns, mines)
    }

    pub const fn beginner() -> Self {
        Self::new_unchecked(9, 9, 10)
    }

    pub const fn intermediate() -> Self {
        Self::new_unchecked(16, 16, 40)
    }

    pub const fn expert() -> Self {
        Self::new_unchecked(16, 30, 99)
    }

    pub fn validate(&self) -> Result<()> {
        let cells = match mult(self.rows, self.columns) {
            Some(cells) if cells > 0 => cells,
            _ => {
                return Err(GameError::InvalidDimensions {
                    rows: self.rows,
                    columns: self.columns,
                });
            }
        };
        if self.mines > cells {
            return Err(GameError::TooManyMines {
                mines: self.mines,
                cells,
            });
        }
        Ok(())
    }

    pub const fn cell_count(&self) -> CellCount {
        self.rows.saturating_mul(self.columns)
    }

    pub const fn safe_cell_count(&self) -> CellCount {
        self.cell_count().saturating_sub(self.mines)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::beginner()
    }
}

/// Outcome of toggling a flag
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkOutcome {
    NoChange,
    Flagged,
    Unflagged,
}

impl MarkOutcome {
    /// Whether this outcome could have caused an update to the game
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

/// Outcome of revealing one or more cells
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    Exploded,
    Won,
}

impl RevealOutcome {
    /// Whether this outcome could have caused an update to the game
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            Exploded => true,
            Won => true,
        }
    }
}

/// Used to merge outcomes when revealing several cells at once
impl BitOr for RevealOutcome {
    type Output = RevealOutcome;

    fn bitor(self, rhs: Self) -> Self::Output {
        use RevealOutcome::*;
        match (self, rhs) {
            // explode has priority
            (Exploded, _) => Exploded,
            (_, Exploded) => Exploded,
            // then win
            (Won, _) => Won,
            (_, Won) => Won,
            (Revealed, _) => Revealed,
            (_, Revealed) => Revealed,
            (NoChange, NoChange) => NoChange,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_are_valid() {
        for config in [
            GameConfig::beginner(),
            GameConfig::intermediate(),
            GameConfig::expert(),
        ] {
            assert_eq!(config.validate(), Ok(()));
        }
        assert_eq!(GameConfig::expert().cell_count(), 480);
        assert_eq!(GameConfig::expert().safe_cell_count(), 381);
    }

    #[test]
    fn new_validates() {
        assert_eq!(GameConfig::new(9, 9, 81), Ok(GameConfig::new_unchecked(9, 9, 81)));
        assert_eq!(GameConfig::new(4, 4, 0), Ok(GameConfig::new_unchecked(4, 4, 0)));
        assert_eq!(
            GameConfig::new(9, 9, 82),
            Err(GameError::TooManyMines { mines: 82, cells: 81 })
        );
        assert_eq!(
            GameConfig::new(0, 0, 0),
            Err(GameError::InvalidDimensions { rows: 0, columns: 0 })
        );
        assert_eq!(
            GameConfig::new(usize::MAX, 2, 0),
            Err(GameError::InvalidDimensions {
                rows: usize::MAX,
                columns: 2
            })
        );
    }

    #[test]
    fn new_clamped_forces_range() {
        assert_eq!(GameConfig::new_clamped(0, 0, 5), GameConfig::new_unchecked(1, 1, 1));
        assert_eq!(GameConfig::new_clamped(3, 3, 100), GameConfig::new_unchecked(3, 3, 9));
        assert_eq!(GameConfig::new_clamped(3, 3, 0), GameConfig::new_unchecked(3, 3, 0));
    }

    #[test]
    fn reveal_outcomes_merge_by_priority() {
        use RevealOutcome::*;

        assert_eq!(NoChange | NoChange, NoChange);
        assert_eq!(NoChange | Revealed, Revealed);
        assert_eq!(Revealed | Won, Won);
        assert_eq!(Won | Exploded, Exploded);
        assert_eq!(Exploded | NoChange, Exploded);
        assert!(!NoChange.has_update());
        assert!(Won.has_update());
        assert!(MarkOutcome::Unflagged.has_update());
    }
}
