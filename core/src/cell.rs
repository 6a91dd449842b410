use serde::{Deserialize, Serialize};

/// Player-visible state stored per cell by the board.
///
/// `revealed` only ever goes from `false` to `true` within one game. A flag left on a revealed cell is kept but
/// carries no meaning.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellState {
    pub revealed: bool,
    pub flagged: bool,
}

/// Read-only snapshot of everything the board knows about one cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub mine: bool,
    pub revealed: bool,
    pub flagged: bool,
    pub adjacent_mines: u8,
}

impl Cell {
    /// What a renderer should draw for this cell, `won` being the current derived win condition.
    pub const fn appearance(self, won: bool) -> Appearance {
        use Appearance::*;

        match (self.revealed, self.mine) {
            (true, true) => Mine,
            (true, false) => Number(self.adjacent_mines),
            // once every safe cell is open the rest can only be mines
            (false, _) if won => Mine,
            (false, _) if self.flagged => Flag,
            (false, _) => Blank,
        }
    }
}

/// Semantic drawing state, one image per variant (and per number 0-8).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Appearance {
    Blank,
    Flag,
    Mine,
    Number(u8),
}

impl Appearance {
    /// Name of the image a renderer would load for this state.
    ///
    /// # Panics
    ///
    /// Panics on a number above 8, no cell has more neighbors.
    pub fn image_name(self) -> &'static str {
        const NUMBERS: [&str; 9] = ["0", "1", "2", "3", "4", "5", "6", "7", "8"];

        match self {
            Self::Blank => "Normal",
            Self::Flag => "Flag",
            Self::Mine => "Mine",
            Self::Number(n) => NUMBERS[usize::from(n)],
        }
    }
}
