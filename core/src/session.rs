use rand::rngs::SmallRng;

use crate::*;

/// Handle returned by [`Session::subscribe`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

pub type Listener<P> = Box<dyn FnMut(&Board<P>)>;

/// Owns a board and tells listeners whenever it changed.
///
/// Listeners run synchronously, in registration order, after the mutation has completed. They get no description of
/// what changed and read whatever they need back from the board. Failed mutations notify nobody.
pub struct Session<P = ProbingPlacer<SmallRng>> {
    board: Board<P>,
    listeners: Vec<(ListenerId, Listener<P>)>,
    next_id: u64,
}

impl<P: MinePlacer> Session<P> {
    pub fn new(board: Board<P>) -> Self {
        Self {
            board,
            listeners: Vec::new(),
            next_id: 0,
        }
    }

    pub fn board(&self) -> &Board<P> {
        &self.board
    }

    pub fn into_board(self) -> Board<P> {
        self.board
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&Board<P>) + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns `false` when `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    pub fn reset(&mut self) -> Result<()> {
        self.board.reset()?;
        self.notify();
        Ok(())
    }

    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let outcome = self.board.reveal(coords)?;
        self.notify();
        Ok(outcome)
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<FlagOutcome> {
        let outcome = self.board.toggle_flag(coords)?;
        self.notify();
        Ok(outcome)
    }

    pub fn reveal_mines(&mut self) {
        self.board.reveal_mines();
        self.notify();
    }

    pub fn set_num_mines(&mut self, mines: CellCount) {
        self.board.set_num_mines(mines);
        self.notify();
    }

    /// Switches to the preset's mine count and starts a new board, keeping the current board size.
    ///
    /// Listeners hear about it once, even when the new board is refused, since the configured mine count changed
    /// either way.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) -> Result<()> {
        log::debug!("Difficulty set to {}", difficulty);
        self.board.set_num_mines(difficulty.mines());
        let result = self.board.reset();
        self.notify();
        result
    }

    /// Main-button press: reveals a cell unless it is already revealed, flagged, or the game is lost.
    pub fn primary(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let cell = self.board.try_cell(coords)?;
        if cell.revealed || cell.flagged || self.board.has_revealed_mine() {
            return Ok(RevealOutcome::NoChange);
        }
        self.reveal(coords)
    }

    /// Secondary-button press: toggles the flag unless the cell is revealed or the game is lost.
    pub fn secondary(&mut self, coords: Coord2) -> Result<Option<FlagOutcome>> {
        let cell = self.board.try_cell(coords)?;
        if cell.revealed || self.board.has_revealed_mine() {
            return Ok(None);
        }
        self.toggle_flag(coords).map(Some)
    }

    fn notify(&mut self) {
        log::trace!("Notifying {} listeners", self.listeners.len());
        for (_, listener) in &mut self.listeners {
            listener(&self.board);
        }
    }
}

impl Session {
    /// Session on a fresh board built from `settings`.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Ok(Self::new(settings.build_board()?))
    }
}
