use crate::*;
pub use probing::*;

mod probing;

/// Source of mine layouts, called once on construction and again on every reset.
pub trait MinePlacer {
    fn place(&mut self, config: GameConfig) -> Result<MineLayout>;
}

/// Always hands out the same layout, for replaying a known board.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedPlacer {
    layout: MineLayout,
}

impl FixedPlacer {
    pub fn new(layout: MineLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &MineLayout {
        &self.layout
    }
}

impl MinePlacer for FixedPlacer {
    fn place(&mut self, config: GameConfig) -> Result<MineLayout> {
        config.validate()?;
        if config != self.layout.game_config() {
            log::warn!(
                "Fixed layout {:?} cannot serve requested {:?}",
                self.layout.game_config(),
                config
            );
            return Err(GameError::LayoutMismatch);
        }
        Ok(self.layout.clone())
    }
}
