use alloc::vec::Vec;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - Running -> Won
/// - Running -> Lost
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// Moves are accepted
    Running,
    /// Every safe cell was revealed
    Won,
    /// A mine was revealed
    Lost,
}

impl GameStatus {
    pub const fn is_over(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }

    pub const fn is_won(self) -> bool {
        matches!(self, Self::Won)
    }
}

impl Default for GameStatus {
    fn default() -> Self {
        Self::Running
    }
}

/// A single match: one grid plus the rules applied to it.
///
/// Rule violations (acting after the game ended, revealing a flag, flagging a revealed cell, chording on a mismatched
/// flag count) are not errors, they leave the state untouched and report [`RevealOutcome::NoChange`] or
/// [`MarkOutcome::NoChange`]. Only out-of-range indexes are rejected with an error.
#[derive(Clone, Debug)]
pub struct Game {
    grid: Grid,
    status: GameStatus,
    rng: SmallRng,
}

impl Game {
    /// Wraps an already populated grid. `seed` drives first-move mine relocation.
    pub fn new(grid: Grid, seed: u64) -> Self {
        Self {
            grid,
            status: GameStatus::default(),
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Builds a board and scatters `mines` uniformly at random over it.
    pub fn build<R: Rng + ?Sized>(
        rows: usize,
        columns: usize,
        mines: CellCount,
        rng: &mut R,
    ) -> Result<Self> {
        Self::from_config(GameConfig::new(rows, columns, mines)?, rng)
    }

    /// Same as [`Game::build`] with a generator seeded from `seed`, the whole match is then reproducible.
    pub fn build_seeded(rows: usize, columns: usize, mines: CellCount, seed: u64) -> Result<Self> {
        Self::build(rows, columns, mines, &mut SmallRng::seed_from_u64(seed))
    }

    pub fn from_config<R: Rng + ?Sized>(config: GameConfig, rng: &mut R) -> Result<Self> {
        config.validate()?;

        let mut grid = Grid::new(config.rows, config.columns)?;
        for index in sample_indexes(grid.square_count(), config.mines, rng) {
            grid.place_mine_at(index);
        }
        log::debug!(
            "New game: {}x{} with {} mines",
            config.rows,
            config.columns,
            grid.mine_count()
        );

        Ok(Self::new(grid, rng.random()))
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_over(&self) -> bool {
        self.status.is_over()
    }

    pub fn is_won(&self) -> bool {
        self.status.is_won()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn row_count(&self) -> usize {
        self.grid.row_count()
    }

    pub fn column_count(&self) -> usize {
        self.grid.column_count()
    }

    pub fn squares(&self) -> &[Cell] {
        self.grid.squares()
    }

    pub fn cell(&self, index: CellIndex) -> Result<Cell> {
        let index = self.grid.validate_index(index)?;
        Ok(self.grid.cell(index))
    }

    /// Mines minus flags. Goes negative when the player places more flags than there are mines.
    pub fn remaining_mine_count(&self) -> isize {
        (self.grid.mine_count() as isize) - (self.grid.flag_count() as isize)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::from_game(self)
    }

    pub fn toggle_flag(&mut self, index: CellIndex) -> Result<MarkOutcome> {
        use MarkOutcome::*;

        let index = self.grid.validate_index(index)?;

        if self.status.is_over() {
            log::trace!("Ignoring flag at {index}, game already ended");
            return Ok(NoChange);
        }
        if self.grid.is_revealed_at(index) {
            log::trace!("Ignoring flag at {index}, cell already revealed");
            return Ok(NoChange);
        }

        Ok(if self.grid.is_flagged_at(index) {
            self.grid.clear_flag_at(index);
            Unflagged
        } else {
            self.grid.place_flag_at(index);
            Flagged
        })
    }

    /// Reveals a cell, flooding through zero-count regions.
    ///
    /// The first reveal of a match never hits a mine: a mine found there is moved to a random free cell first.
    pub fn reveal(&mut self, index: CellIndex) -> Result<RevealOutcome> {
        let index = self.grid.validate_index(index)?;
        Ok(self.reveal_unflagged(index))
    }

    /// Chord: when the number of flagged neighbors of a revealed cell equals its mine count, reveals every other
    /// neighbor. Any other flag count does nothing.
    pub fn reveal_adjacent(&mut self, index: CellIndex) -> Result<RevealOutcome> {
        let index = self.grid.validate_index(index)?;

        if self.status.is_over() || !self.grid.is_revealed_at(index) {
            return Ok(RevealOutcome::NoChange);
        }

        let flagged = self.adjacent_flag_count(index);
        let expected = self.grid.adjacent_mine_count_at(index);
        if flagged != expected {
            log::trace!("Ignoring chord at {index}, {flagged} flags around a {expected}");
            return Ok(RevealOutcome::NoChange);
        }

        Ok(self
            .grid
            .iter_adjacent(index)
            .map(|neighbor| self.reveal_unflagged(neighbor))
            .fold(RevealOutcome::NoChange, core::ops::BitOr::bitor))
    }

    fn reveal_unflagged(&mut self, index: CellIndex) -> RevealOutcome {
        if self.status.is_over() {
            log::trace!("Ignoring reveal at {index}, game already ended");
            return RevealOutcome::NoChange;
        }
        if self.grid.is_flagged_at(index) {
            log::trace!("Ignoring reveal at {index}, cell is flagged");
            return RevealOutcome::NoChange;
        }

        if self.is_protected_reveal(index) {
            self.move_mine(index);
        }
        self.flood_reveal(index)
    }

    /// Reveals `origin` and, through a worklist, every cell reachable over zero-count cells. Stale flags on the way
    /// are removed.
    fn flood_reveal(&mut self, origin: CellIndex) -> RevealOutcome {
        let mut outcome = RevealOutcome::NoChange;
        let mut pending: Vec<CellIndex> = Vec::from([origin]);

        while let Some(index) = pending.pop() {
            if !self.grid.reveal_at(index) {
                continue;
            }
            self.grid.clear_flag_at(index);

            if self.grid.contains_mine_at(index) {
                self.explode(index);
                return RevealOutcome::Exploded;
            }
            if self.all_safe_revealed() {
                self.win();
                return RevealOutcome::Won;
            }
            if self.grid.adjacent_mine_count_at(index) == 0 {
                pending.extend(
                    self.grid
                        .iter_adjacent(index)
                        .filter(|&neighbor| !self.grid.is_revealed_at(neighbor)),
                );
            }
            outcome = RevealOutcome::Revealed;
        }

        outcome
    }

    fn is_protected_reveal(&self, index: CellIndex) -> bool {
        self.grid.reveal_count() == 0 && self.grid.contains_mine_at(index)
    }

    fn move_mine(&mut self, index: CellIndex) {
        let Some(target) = random_free_index(&self.grid, &mut self.rng) else {
            log::warn!("No free cell to move the mine at {index} to, first move is not protected");
            return;
        };

        self.grid.clear_mine_at(index);
        self.grid.place_mine_at(target);
        log::debug!("Moved mine from {index} to {target} to protect the first move");
    }

    fn all_safe_revealed(&self) -> bool {
        self.grid.reveal_count() >= self.grid.safe_count()
    }

    /// Ends the game lost, showing every mine and every flag. Flags stay in place.
    fn explode(&mut self, index: CellIndex) {
        self.grid.mark_exploded_at(index);
        for i in 0..self.grid.square_count() {
            let cell = self.grid.cell(i);
            if cell.has_mine() || cell.is_flagged() {
                self.grid.reveal_at(i);
            }
        }
        self.status = GameStatus::Lost;
        log::debug!("Game lost, mine exploded at {index}");
    }

    /// Ends the game won, flagging and revealing every mine.
    fn win(&mut self) {
        self.status = GameStatus::Won;
        for i in 0..self.grid.square_count() {
            if self.grid.contains_mine_at(i) {
                self.grid.place_flag_at(i);
            }
            if self.grid.is_flagged_at(i) {
                self.grid.reveal_at(i);
            }
        }
        log::debug!("Game won");
    }

    fn adjacent_flag_count(&self, index: CellIndex) -> u8 {
        let count = self
            .grid
            .iter_adjacent(index)
            .filter(|&neighbor| self.grid.is_flagged_at(neighbor))
            .count();
        // at most eight neighbors
        count as u8
    }
}
