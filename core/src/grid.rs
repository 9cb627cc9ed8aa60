use alloc::vec;
use alloc::vec::Vec;
use smallvec::SmallVec;

use crate::*;

/// Fixed-size board of cells with running mine, flag and reveal totals.
///
/// The grid knows adjacency and keeps its counters in step with the cells, but enforces no game rules. Operations
/// taking an index panic when it is outside `0..square_count()`; use [`Grid::validate_index`] for untrusted input.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    rows: usize,
    columns: usize,
    cells: Vec<Cell>,
    mine_count: CellCount,
    flag_count: CellCount,
    reveal_count: CellCount,
}

impl Grid {
    /// Creates an empty grid, every cell blank.
    pub fn new(rows: usize, columns: usize) -> Result<Self> {
        let square_count = match mult(rows, columns) {
            Some(count) if count > 0 => count,
            _ => return Err(GameError::InvalidDimensions { rows, columns }),
        };

        Ok(Self {
            rows,
            columns,
            cells: vec![Cell::default(); square_count],
            mine_count: 0,
            flag_count: 0,
            reveal_count: 0,
        })
    }

    /// Creates a grid with mines at the given indexes; duplicates are placed once.
    pub fn from_mine_indexes(rows: usize, columns: usize, mines: &[CellIndex]) -> Result<Self> {
        let mut grid = Self::new(rows, columns)?;
        for &index in mines {
            let index = grid.validate_index(index)?;
            grid.place_mine_at(index);
        }
        Ok(grid)
    }

    pub fn row_count(&self) -> usize {
        self.rows
    }

    pub fn column_count(&self) -> usize {
        self.columns
    }

    pub fn square_count(&self) -> CellCount {
        self.cells.len()
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn flag_count(&self) -> CellCount {
        self.flag_count
    }

    pub fn reveal_count(&self) -> CellCount {
        self.reveal_count
    }

    pub fn safe_count(&self) -> CellCount {
        self.square_count() - self.mine_count
    }

    /// Row-major view of every cell.
    pub fn squares(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cell(&self, index: CellIndex) -> Cell {
        self.cells[self.checked(index)]
    }

    pub fn validate_index(&self, index: CellIndex) -> Result<CellIndex> {
        if index < self.square_count() {
            Ok(index)
        } else {
            Err(GameError::IndexOutOfRange {
                index,
                len: self.square_count(),
            })
        }
    }

    pub fn coords_of(&self, index: CellIndex) -> Coord2 {
        let index = self.checked(index);
        (index / self.columns, index % self.columns)
    }

    pub fn index_of(&self, (row, column): Coord2) -> Option<CellIndex> {
        (row < self.rows && column < self.columns).then(|| row * self.columns + column)
    }

    /// Neighbors of `index` in compass order (NW, N, NE, E, SE, S, SW, W), never wrapping across an edge.
    pub fn iter_adjacent(&self, index: CellIndex) -> NeighborIter {
        NeighborIter::new(self.coords_of(index), (self.rows, self.columns))
    }

    pub fn for_each_adjacent(&self, index: CellIndex, visit: impl FnMut(CellIndex)) {
        self.iter_adjacent(index).for_each(visit);
    }

    pub fn adjacent_indexes(&self, index: CellIndex) -> SmallVec<[CellIndex; 8]> {
        self.iter_adjacent(index).collect()
    }

    pub fn contains_mine_at(&self, index: CellIndex) -> bool {
        self.cell(index).has_mine()
    }

    pub fn is_revealed_at(&self, index: CellIndex) -> bool {
        self.cell(index).is_revealed()
    }

    pub fn is_flagged_at(&self, index: CellIndex) -> bool {
        self.cell(index).is_flagged()
    }

    pub fn adjacent_mine_count_at(&self, index: CellIndex) -> u8 {
        self.cell(index).adjacent_mine_count()
    }

    /// Places a mine and bumps the count of every neighbor. Returns `false` if a mine was already there.
    pub fn place_mine_at(&mut self, index: CellIndex) -> bool {
        if !self.update_flag(index, CellFlags::MINE, true) {
            return false;
        }
        self.mine_count += 1;
        for neighbor in self.iter_adjacent(index) {
            self.cells[neighbor].increment_adjacent();
        }
        true
    }

    /// Removes a mine and lowers the count of every neighbor. Returns `false` if there was no mine.
    pub fn clear_mine_at(&mut self, index: CellIndex) -> bool {
        if !self.update_flag(index, CellFlags::MINE, false) {
            return false;
        }
        self.mine_count -= 1;
        for neighbor in self.iter_adjacent(index) {
            self.cells[neighbor].decrement_adjacent();
        }
        true
    }

    /// Reveal and flag setters return whether the cell changed, counters only move when it did.
    pub fn reveal_at(&mut self, index: CellIndex) -> bool {
        let changed = self.update_flag(index, CellFlags::REVEALED, true);
        if changed {
            self.reveal_count += 1;
        }
        changed
    }

    pub fn place_flag_at(&mut self, index: CellIndex) -> bool {
        let changed = self.update_flag(index, CellFlags::FLAGGED, true);
        if changed {
            self.flag_count += 1;
        }
        changed
    }

    pub fn clear_flag_at(&mut self, index: CellIndex) -> bool {
        let changed = self.update_flag(index, CellFlags::FLAGGED, false);
        if changed {
            self.flag_count -= 1;
        }
        changed
    }

    pub(crate) fn mark_exploded_at(&mut self, index: CellIndex) {
        self.update_flag(index, CellFlags::EXPLODED, true);
    }

    /// Sets or clears `flag`, returning whether the cell changed.
    fn update_flag(&mut self, index: CellIndex, flag: CellFlags, value: bool) -> bool {
        let cell = &mut self.cells[index];
        if cell.flags().contains(flag) == value {
            return false;
        }
        cell.set(flag, value);
        true
    }

    fn checked(&self, index: CellIndex) -> CellIndex {
        assert!(
            index < self.square_count(),
            "cell index {} out of range for a board of {} cells",
            index,
            self.square_count()
        );
        index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    //   0  1  2  3  4
    //   5  6  7  8  9
    //  10 11 12 13 14
    //  15 16 17 18 19
    fn grid_4x5() -> Grid {
        Grid::new(4, 5).unwrap()
    }

    fn adjacent(grid: &Grid, index: CellIndex) -> Vec<CellIndex> {
        grid.iter_adjacent(index).collect()
    }

    fn assert_counts_match(grid: &Grid) {
        let squares = grid.squares();
        assert_eq!(grid.mine_count(), squares.iter().filter(|c| c.has_mine()).count());
        assert_eq!(grid.flag_count(), squares.iter().filter(|c| c.is_flagged()).count());
        assert_eq!(grid.reveal_count(), squares.iter().filter(|c| c.is_revealed()).count());
        for index in 0..grid.square_count() {
            let mined_neighbors = grid
                .iter_adjacent(index)
                .filter(|&n| grid.contains_mine_at(n))
                .count();
            assert_eq!(usize::from(grid.adjacent_mine_count_at(index)), mined_neighbors);
        }
    }

    #[test]
    fn new_grid_is_blank() {
        let grid = Grid::new(7, 9).unwrap();

        assert_eq!(grid.row_count(), 7);
        assert_eq!(grid.column_count(), 9);
        assert_eq!(grid.square_count(), 63);
        assert_eq!(grid.squares().len(), 63);
        assert_eq!(grid.mine_count(), 0);
        assert_eq!(grid.flag_count(), 0);
        assert_eq!(grid.reveal_count(), 0);
        assert!(grid.squares().iter().all(|&cell| cell == Cell::default()));
    }

    #[test]
    fn new_rejects_empty_dimensions() {
        assert_eq!(
            Grid::new(0, 5),
            Err(GameError::InvalidDimensions { rows: 0, columns: 5 })
        );
        assert_eq!(
            Grid::new(3, 0),
            Err(GameError::InvalidDimensions { rows: 3, columns: 0 })
        );
    }

    #[test]
    fn adjacent_indexes_follow_compass_order() {
        let grid = grid_4x5();

        assert_eq!(adjacent(&grid, 12), [6, 7, 8, 13, 18, 17, 16, 11]);
        assert_eq!(adjacent(&grid, 0), [1, 6, 5]);
        assert_eq!(adjacent(&grid, 2), [3, 8, 7, 6, 1]);
        assert_eq!(adjacent(&grid, 4), [9, 8, 3]);
        assert_eq!(adjacent(&grid, 14), [8, 9, 19, 18, 13]);
        assert_eq!(adjacent(&grid, 19), [13, 14, 18]);
        assert_eq!(adjacent(&grid, 17), [11, 12, 13, 18, 16]);
        assert_eq!(adjacent(&grid, 15), [10, 11, 16]);
        assert_eq!(adjacent(&grid, 5), [0, 1, 6, 11, 10]);
    }

    #[test]
    fn adjacency_is_symmetric_and_never_wraps() {
        let grid = grid_4x5();

        for i in 0..grid.square_count() {
            let neighbors = grid.adjacent_indexes(i);
            let (row, column) = grid.coords_of(i);
            let on_row_edge = row == 0 || row == 3;
            let on_column_edge = column == 0 || column == 4;
            let expected = match (on_row_edge, on_column_edge) {
                (true, true) => 3,
                (true, false) | (false, true) => 5,
                (false, false) => 8,
            };
            assert_eq!(neighbors.len(), expected, "neighbor count of {i}");

            for j in 0..grid.square_count() {
                assert_eq!(
                    neighbors.contains(&j),
                    grid.adjacent_indexes(j).contains(&i),
                    "symmetry between {i} and {j}"
                );
            }
        }

        assert!(!grid.adjacent_indexes(4).contains(&5));
        assert!(!grid.adjacent_indexes(5).contains(&4));
    }

    #[test]
    fn for_each_adjacent_visits_the_same_cells() {
        let grid = grid_4x5();
        let mut visited = Vec::new();

        grid.for_each_adjacent(7, |index| visited.push(index));

        assert_eq!(visited, adjacent(&grid, 7));
    }

    #[test]
    fn placing_a_mine_updates_neighbors() {
        let mut grid = grid_4x5();

        assert!(grid.place_mine_at(12));

        assert!(grid.contains_mine_at(12));
        assert_eq!(grid.mine_count(), 1);
        for index in [6, 7, 8, 13, 18, 17, 16, 11] {
            assert_eq!(grid.adjacent_mine_count_at(index), 1);
        }
        assert_eq!(grid.adjacent_mine_count_at(12), 0);
        assert_eq!(grid.adjacent_mine_count_at(0), 0);
        assert_counts_match(&grid);
    }

    #[test]
    fn placing_a_mine_twice_is_a_no_op() {
        let mut grid = grid_4x5();

        assert!(grid.place_mine_at(6));
        assert!(!grid.place_mine_at(6));

        assert_eq!(grid.mine_count(), 1);
        assert_eq!(grid.adjacent_mine_count_at(0), 1);
        assert_counts_match(&grid);
    }

    #[test]
    fn clearing_a_mine_restores_counts() {
        let mut grid = grid_4x5();
        grid.place_mine_at(6);
        grid.place_mine_at(7);

        assert!(grid.clear_mine_at(6));
        assert!(!grid.clear_mine_at(6));
        assert!(!grid.clear_mine_at(0));

        assert_eq!(grid.mine_count(), 1);
        assert_eq!(grid.adjacent_mine_count_at(0), 0);
        assert_eq!(grid.adjacent_mine_count_at(1), 1);
        assert_eq!(grid.adjacent_mine_count_at(6), 1);
        assert_counts_match(&grid);
    }

    #[test]
    fn neighbor_counts_track_mixed_placement_and_removal() {
        let mut grid = grid_4x5();
        for index in [0, 1, 6, 12, 19, 13, 14] {
            grid.place_mine_at(index);
        }
        for index in [1, 13, 2] {
            grid.clear_mine_at(index);
        }
        grid.place_mine_at(13);

        assert_eq!(grid.mine_count(), 6);
        assert_counts_match(&grid);
    }

    #[test]
    fn flags_and_reveals_are_counted_once() {
        let mut grid = grid_4x5();

        assert!(grid.place_flag_at(3));
        assert!(!grid.place_flag_at(3));
        assert_eq!(grid.flag_count(), 1);

        assert!(grid.clear_flag_at(3));
        assert!(!grid.clear_flag_at(3));
        assert_eq!(grid.flag_count(), 0);

        assert!(grid.reveal_at(8));
        assert!(!grid.reveal_at(8));
        assert!(grid.is_revealed_at(8));
        assert_eq!(grid.reveal_count(), 1);
        assert_counts_match(&grid);
    }

    #[test]
    fn from_mine_indexes_places_each_mine_once() {
        let grid = Grid::from_mine_indexes(3, 4, &[3, 8, 3]).unwrap();

        assert_eq!(grid.mine_count(), 2);
        assert!(grid.contains_mine_at(3));
        assert!(grid.contains_mine_at(8));
    }

    #[test]
    fn from_mine_indexes_rejects_out_of_range() {
        assert_eq!(
            Grid::from_mine_indexes(3, 4, &[12]),
            Err(GameError::IndexOutOfRange { index: 12, len: 12 })
        );
    }

    #[test]
    fn coordinate_conversions_are_row_major() {
        let grid = grid_4x5();

        assert_eq!(grid.coords_of(13), (2, 3));
        assert_eq!(grid.index_of((2, 3)), Some(13));
        assert_eq!(grid.index_of((4, 0)), None);
        assert_eq!(grid.index_of((0, 5)), None);
        assert_eq!(grid.validate_index(19), Ok(19));
        assert_eq!(
            grid.validate_index(20),
            Err(GameError::IndexOutOfRange { index: 20, len: 20 })
        );
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn out_of_range_index_panics() {
        grid_4x5().contains_mine_at(20);
    }
}
