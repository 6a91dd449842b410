use thiserror::Error;

use crate::{CellCount, Coord, Coord2};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates {coords:?} on a board of size {size}")]
    InvalidCoords { coords: Coord2, size: Coord },
    #[error("Too many mines, requested {requested} but the board only has {cells} cells")]
    TooManyMines { requested: CellCount, cells: CellCount },
    #[error("Board size must be at least 1")]
    EmptyBoard,
    #[error("Mine layout does not match the requested board configuration")]
    LayoutMismatch,
}

impl GameError {
    /// Whether this error comes from a board configuration rather than from a coordinate.
    pub const fn is_invalid_configuration(&self) -> bool {
        matches!(
            self,
            Self::TooManyMines { .. } | Self::EmptyBoard | Self::LayoutMismatch
        )
    }
}

pub type Result<T> = core::result::Result<T, GameError>;
