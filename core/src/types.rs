/// Position of a cell in the row-major cell sequence.
pub type CellIndex = usize;

/// Count type used for mine, flag, reveal and total-cell counts.
pub type CellCount = usize;

/// Two-dimensional coordinates `(row, column)`.
pub type Coord2 = (usize, usize);

/// Number of cells on a `rows` by `columns` board, `None` on overflow.
pub const fn mult(rows: usize, columns: usize) -> Option<CellCount> {
    rows.checked_mul(columns)
}

/// `(row, column)` deltas in compass order: NW, N, NE, E, SE, S, SW, W.
const DISPLACEMENTS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
];

/// Applies `delta` to `coords`, returning a value only when it remains in bounds.
fn apply_delta(coords: Coord2, delta: (isize, isize), bounds: Coord2) -> Option<Coord2> {
    let (row, column) = coords;
    let (d_row, d_column) = delta;
    let (rows, columns) = bounds;

    let next_row = row.checked_add_signed(d_row)?;
    if next_row >= rows {
        return None;
    }

    let next_column = column.checked_add_signed(d_column)?;
    if next_column >= columns {
        return None;
    }

    Some((next_row, next_column))
}

/// Iterates over the in-bounds neighbors of a cell as row-major indexes.
///
/// Holds no borrow of the board, so callers may mutate cells while walking the neighbors.
#[derive(Clone, Debug)]
pub struct NeighborIter {
    center: Coord2,
    bounds: Coord2,
    index: u8,
}

impl NeighborIter {
    pub(crate) fn new(center: Coord2, bounds: Coord2) -> Self {
        Self {
            center,
            bounds,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = CellIndex;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if usize::from(self.index) >= DISPLACEMENTS.len() {
                return None;
            }

            let next_item =
                apply_delta(self.center, DISPLACEMENTS[self.index as usize], self.bounds);
            self.index += 1;

            if let Some((row, column)) = next_item {
                return Some(row * self.bounds.1 + column);
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(DISPLACEMENTS.len() - usize::from(self.index)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn neighbors(index: CellIndex, bounds: Coord2) -> Vec<CellIndex> {
        let center = (index / bounds.1, index % bounds.1);
        NeighborIter::new(center, bounds).collect()
    }

    #[test]
    fn single_cell_board_has_no_neighbors() {
        assert!(neighbors(0, (1, 1)).is_empty());
    }

    #[test]
    fn single_row_board_only_has_east_and_west() {
        assert_eq!(neighbors(0, (1, 3)), [1]);
        assert_eq!(neighbors(1, (1, 3)), [2, 0]);
        assert_eq!(neighbors(2, (1, 3)), [1]);
    }

    #[test]
    fn single_column_board_only_has_north_and_south() {
        assert_eq!(neighbors(1, (3, 1)), [0, 2]);
    }

    #[test]
    fn mult_reports_overflow() {
        assert_eq!(mult(16, 30), Some(480));
        assert_eq!(mult(usize::MAX, 2), None);
    }
}
