use alloc::vec::Vec;
use rand::Rng;

use crate::*;

/// Picks `k` distinct indexes from `0..n`, every one of the C(n, k) subsets being equally likely.
///
/// Partial Fisher-Yates shuffle: step `i` draws uniformly among the `n - i` candidates not yet picked and swaps the
/// pick out of the candidate range. Requests above `n` are capped at `n`.
pub fn sample_indexes<R: Rng + ?Sized>(n: CellCount, k: CellCount, rng: &mut R) -> Vec<CellIndex> {
    if k > n {
        log::warn!("Cannot sample {k} distinct indexes out of {n}, sampling all of them");
    }
    let k = k.min(n);

    let mut pool: Vec<CellIndex> = (0..n).collect();
    for i in 0..k {
        let j = rng.random_range(i..n);
        pool.swap(i, j);
    }
    pool.truncate(k);
    pool
}

/// Uniformly picks one cell without a mine, `None` when every cell is mined.
pub fn random_free_index<R: Rng + ?Sized>(grid: &Grid, rng: &mut R) -> Option<CellIndex> {
    let free_count = grid.safe_count();
    if free_count == 0 {
        return None;
    }

    let nth = rng.random_range(0..free_count);
    grid.squares()
        .iter()
        .enumerate()
        .filter(|(_, cell)| !cell.has_mine())
        .nth(nth)
        .map(|(index, _)| index)
}
