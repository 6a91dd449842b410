use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::*;

/// Board edge length and mine count.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord,
    pub mines: CellCount,
}

impl GameConfig {
    /// Skips validation, placement checks the config again when it runs.
    pub const fn new_unchecked(size: Coord, mines: CellCount) -> Self {
        Self { size, mines }
    }

    pub fn new(size: Coord, mines: CellCount) -> Result<Self> {
        let config = Self::new_unchecked(size, mines);
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.size == 0 {
            return Err(GameError::EmptyBoard);
        }

        let cells = self.total_cells();
        if self.mines > cells {
            return Err(GameError::TooManyMines {
                requested: self.mines,
                cells,
            });
        }

        Ok(())
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size, self.size)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells().saturating_sub(self.mines)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Difficulty::default().config()
    }
}

/// Board presets, all on the same 10x10 board with increasing mine density.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Self::Easy, Self::Medium, Self::Hard];

    pub const BOARD_SIZE: Coord = 10;

    pub const fn mines(self) -> CellCount {
        match self {
            Self::Easy => 10,
            Self::Medium => 15,
            Self::Hard => 20,
        }
    }

    pub const fn config(self) -> GameConfig {
        GameConfig::new_unchecked(Self::BOARD_SIZE, self.mines())
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Difficulty {
    type Err = ConfigError;

    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|difficulty| difficulty.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ConfigError::UnknownDifficulty(s.to_owned()))
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not parse settings: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Could not write settings: {0}")]
    Write(#[from] toml::ser::Error),
    #[error("Unknown difficulty {0:?}")]
    UnknownDifficulty(String),
    #[error(transparent)]
    Game(#[from] GameError),
}

/// User-facing game settings, stored as TOML.
///
/// `size` and `mines` override the preset picked by `difficulty` when present, `seed` makes mine placement
/// reproducible.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub difficulty: Difficulty,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<Coord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mines: Option<CellCount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Settings {
    pub fn from_toml_str(s: &str) -> core::result::Result<Self, ConfigError> {
        let settings: Self = toml::from_str(s)?;
        log::debug!("Loaded settings: {:?}", settings);
        Ok(settings)
    }

    pub fn to_toml_string(&self) -> core::result::Result<String, ConfigError> {
        Ok(toml::to_string(self)?)
    }

    /// Effective, validated configuration.
    pub fn game_config(&self) -> Result<GameConfig> {
        let preset = self.difficulty.config();
        GameConfig::new(
            self.size.unwrap_or(preset.size),
            self.mines.unwrap_or(preset.mines),
        )
    }

    /// Builds a board for these settings, seeded when `seed` is set.
    pub fn build_board(&self) -> Result<Board> {
        let config = self.game_config()?;
        let placer = match self.seed {
            Some(seed) => ProbingPlacer::from_seed(seed),
            None => ProbingPlacer::from_entropy(),
        };
        Board::with_placer(config, placer)
    }
}
