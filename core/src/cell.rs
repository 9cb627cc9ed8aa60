use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    #[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct CellFlags: u8 {
        const MINE     = 1;
        const REVEALED = 1 << 1;
        const FLAGGED  = 1 << 2;
        const EXPLODED = 1 << 3;
    }
}

/// State of a single board position.
///
/// The adjacency count is maintained for every cell, mined or not, but it only carries meaning for cells without a
/// mine.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    flags: CellFlags,
    adjacent_mines: u8,
}

impl Cell {
    pub fn flags(self) -> CellFlags {
        self.flags
    }

    pub fn has_mine(self) -> bool {
        self.flags.contains(CellFlags::MINE)
    }

    pub fn is_revealed(self) -> bool {
        self.flags.contains(CellFlags::REVEALED)
    }

    pub fn is_flagged(self) -> bool {
        self.flags.contains(CellFlags::FLAGGED)
    }

    /// Only the mine that ended the game is exploded.
    pub fn is_exploded(self) -> bool {
        self.flags.contains(CellFlags::EXPLODED)
    }

    /// Flag placed on a cell without a mine.
    pub fn is_wrong_flag(self) -> bool {
        self.is_flagged() && !self.has_mine()
    }

    pub const fn adjacent_mine_count(self) -> u8 {
        self.adjacent_mines
    }

    pub(crate) fn set(&mut self, flags: CellFlags, value: bool) {
        self.flags.set(flags, value);
    }

    pub(crate) fn increment_adjacent(&mut self) {
        debug_assert!(self.adjacent_mines < 8);
        self.adjacent_mines += 1;
    }

    pub(crate) fn decrement_adjacent(&mut self) {
        debug_assert!(self.adjacent_mines > 0);
        self.adjacent_mines -= 1;
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            flags: CellFlags::empty(),
            adjacent_mines: 0,
        }
    }
}
