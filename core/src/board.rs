use std::collections::VecDeque;

use ndarray::{Array2, Zip};
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};

use crate::*;

/// Derived game condition, recomputed from the cells on every query.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    Playing,
    Won,
    Lost,
}

impl GameStatus {
    pub const fn is_over(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// Square minesweeper board: mine layout, per-cell player state and the placer used to refill it on reset.
///
/// The board enforces no turn order. Revealing after a loss or flagging a revealed cell is allowed, gating those is
/// left to whoever drives the board (see [`Session`]).
#[derive(Clone, Debug)]
pub struct Board<P = ProbingPlacer<SmallRng>> {
    config: GameConfig,
    placer: P,
    layout: MineLayout,
    cells: Array2<CellState>,
}

impl Board {
    /// Random board of edge `size` with `mines` mines.
    pub fn new(size: Coord, mines: CellCount) -> Result<Self> {
        Self::with_placer(GameConfig::new(size, mines)?, ProbingPlacer::from_entropy())
    }

    /// Like [`Board::new`] but reproducible for a given seed, across resets too.
    pub fn with_seed(size: Coord, mines: CellCount, seed: u64) -> Result<Self> {
        Self::with_placer(GameConfig::new(size, mines)?, ProbingPlacer::from_seed(seed))
    }
}

impl Board<FixedPlacer> {
    /// Board that always uses `layout`, resets included.
    pub fn from_layout(layout: MineLayout) -> Self {
        let config = layout.game_config();
        let size = layout.size();
        Self {
            config,
            placer: FixedPlacer::new(layout.clone()),
            layout,
            cells: square_array(size),
        }
    }
}

impl<P: MinePlacer> Board<P> {
    pub fn with_placer(config: GameConfig, mut placer: P) -> Result<Self> {
        config.validate()?;
        let layout = placer.place(config)?;
        log::debug!("New board {:?}", config);
        Ok(Self {
            config,
            placer,
            cells: square_array(layout.size()),
            layout,
        })
    }

    /// Places a fresh set of mines and hides every cell again.
    ///
    /// Fails when the configured mine count no longer fits the board, in which case the current game is kept
    /// untouched.
    pub fn reset(&mut self) -> Result<()> {
        let layout = self.placer.place(self.config).inspect_err(|err| {
            log::warn!("Refusing to reset board with {:?}: {}", self.config, err);
        })?;
        self.cells = square_array(layout.size());
        self.layout = layout;
        log::debug!("Board reset with {:?}", self.config);
        Ok(())
    }

    /// Takes effect on the next [`Board::reset`], and is only validated then.
    pub fn set_num_mines(&mut self, mines: CellCount) {
        log::debug!("Mine count set to {} for the next board", mines);
        self.config = GameConfig::new_unchecked(self.config.size, mines);
    }

    /// Flips the flag on a cell, revealed or not.
    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<FlagOutcome> {
        let coords = self.layout.validate_coords(coords)?;
        let cell = &mut self.cells[coords.to_nd_index()];
        cell.flagged = !cell.flagged;
        Ok(if cell.flagged {
            FlagOutcome::Flagged
        } else {
            FlagOutcome::Unflagged
        })
    }

    /// Reveals a cell, flooding outwards through cells without adjacent mines.
    ///
    /// Revealing a mine reveals every mine on the board. Flags neither stop the flood nor get cleared by it.
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.layout.validate_coords(coords)?;

        if self.cells[coords.to_nd_index()].revealed {
            return Ok(RevealOutcome::NoChange);
        }

        let mut revealed: CellCount = 0;
        let mut to_visit = VecDeque::from([coords]);

        while let Some(visit_coords) = to_visit.pop_front() {
            let cell = &mut self.cells[visit_coords.to_nd_index()];
            // queued more than once by different zero neighbors
            if cell.revealed {
                continue;
            }
            cell.revealed = true;
            revealed += 1;

            let adjacent_mines = self.layout.adjacent_mine_count(visit_coords);
            log::trace!(
                "Revealed cell at {:?}, adjacent mines: {}",
                visit_coords,
                adjacent_mines
            );

            if adjacent_mines == 0 {
                to_visit.extend(
                    self.layout
                        .iter_neighbors(visit_coords)
                        .filter(|&pos| !self.cells[pos.to_nd_index()].revealed),
                );
            }
        }

        if self.layout.contains_mine(coords) {
            log::debug!("Mine hit at {:?}", coords);
            self.reveal_mines();
            Ok(RevealOutcome::HitMine)
        } else if self.is_won() {
            log::debug!("Board cleared with {:?}", coords);
            Ok(RevealOutcome::Won)
        } else {
            Ok(RevealOutcome::Revealed(revealed))
        }
    }

    /// Reveals every mine, leaving safe cells as they are.
    pub fn reveal_mines(&mut self) {
        Zip::from(&mut self.cells)
            .and(self.layout.mine_mask())
            .for_each(|cell, &is_mine| {
                if is_mine {
                    cell.revealed = true;
                }
            });
    }
}

impl<P> Board<P> {
    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn size(&self) -> Coord {
        self.layout.size()
    }

    /// Configured mine count, which after [`Board::set_num_mines`] may differ from the mines currently placed.
    pub fn num_mines(&self) -> CellCount {
        self.config.mines
    }

    pub fn placed_mines(&self) -> CellCount {
        self.layout.mine_count()
    }

    pub fn layout(&self) -> &MineLayout {
        &self.layout
    }

    pub fn placer(&self) -> &P {
        &self.placer
    }

    /// # Panics
    ///
    /// Panics if `coords` is outside the board.
    pub fn is_revealed(&self, coords: Coord2) -> bool {
        self.cells[coords.to_nd_index()].revealed
    }

    /// # Panics
    ///
    /// Panics if `coords` is outside the board.
    pub fn is_mine(&self, coords: Coord2) -> bool {
        self.layout.contains_mine(coords)
    }

    /// # Panics
    ///
    /// Panics if `coords` is outside the board.
    pub fn is_flag(&self, coords: Coord2) -> bool {
        self.cells[coords.to_nd_index()].flagged
    }

    /// # Panics
    ///
    /// Panics if `coords` is outside the board.
    pub fn num_adjacent_mines(&self, coords: Coord2) -> u8 {
        if let Err(err) = self.layout.validate_coords(coords) {
            panic!("{err}");
        }
        self.layout.adjacent_mine_count(coords)
    }

    /// # Panics
    ///
    /// Panics if `coords` is outside the board.
    pub fn cell(&self, coords: Coord2) -> Cell {
        let state = self.cells[coords.to_nd_index()];
        Cell {
            mine: self.layout.contains_mine(coords),
            revealed: state.revealed,
            flagged: state.flagged,
            adjacent_mines: self.layout.adjacent_mine_count(coords),
        }
    }

    pub fn try_cell(&self, coords: Coord2) -> Result<Cell> {
        let coords = self.layout.validate_coords(coords)?;
        Ok(self.cell(coords))
    }

    /// Drawing state of one cell.
    ///
    /// # Panics
    ///
    /// Panics if `coords` is outside the board.
    pub fn appearance(&self, coords: Coord2) -> Appearance {
        self.cell(coords).appearance(self.is_won())
    }

    /// Drawing state of every cell, indexed by `(x, y)`.
    pub fn appearances(&self) -> Array2<Appearance> {
        let won = self.is_won();
        Array2::from_shape_fn(self.cells.dim(), |(x, y)| {
            // both axes are below the board size, which fits in a Coord
            self.cell((x as Coord, y as Coord)).appearance(won)
        })
    }

    /// Loss signal: at least one mine has been revealed.
    pub fn has_revealed_mine(&self) -> bool {
        self.cells
            .iter()
            .zip(self.layout.mine_mask())
            .any(|(cell, &is_mine)| cell.revealed && is_mine)
    }

    /// Revealed cells that are not mines.
    pub fn revealed_safe_count(&self) -> CellCount {
        let mut count = 0;
        for (cell, &is_mine) in self.cells.iter().zip(self.layout.mine_mask()) {
            if cell.revealed && !is_mine {
                count += 1;
            }
        }
        count
    }

    pub fn revealed_count(&self) -> CellCount {
        let mut count = 0;
        for cell in &self.cells {
            if cell.revealed {
                count += 1;
            }
        }
        count
    }

    /// Flags on cells that are still hidden.
    pub fn flagged_count(&self) -> CellCount {
        let mut count = 0;
        for cell in &self.cells {
            if cell.flagged && !cell.revealed {
                count += 1;
            }
        }
        count
    }

    /// How many mines have not been flagged yet, negative when there are more flags than mines.
    pub fn mines_left(&self) -> i32 {
        i32::from(self.layout.mine_count()) - i32::from(self.flagged_count())
    }

    pub fn is_won(&self) -> bool {
        self.revealed_safe_count() == self.layout.safe_cell_count() && !self.has_revealed_mine()
    }

    pub fn is_lost(&self) -> bool {
        self.has_revealed_mine()
    }

    pub fn status(&self) -> GameStatus {
        if self.is_lost() {
            GameStatus::Lost
        } else if self.is_won() {
            GameStatus::Won
        } else {
            GameStatus::Playing
        }
    }

    pub fn is_over(&self) -> bool {
        self.status().is_over()
    }

    /// All coordinates, row by row.
    pub fn iter_coords(&self) -> impl Iterator<Item = Coord2> + use<P> {
        self.layout.iter_coords()
    }
}
