use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid board dimensions {rows}x{columns}")]
    InvalidDimensions { rows: usize, columns: usize },
    #[error("Too many mines, requested {mines} but the board only has {cells} cells")]
    TooManyMines { mines: usize, cells: usize },
    #[error("Cell index {index} out of range for a board of {len} cells")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("Board shape does not match declared size")]
    InvalidBoardShape,
}

pub type Result<T> = core::result::Result<T, GameError>;
