use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use board::*;
pub use cell::*;
pub use config::*;
pub use error::*;
pub use placement::*;
pub use session::*;
pub use types::*;

mod board;
mod cell;
mod config;
mod error;
mod placement;
mod session;
mod types;

/// Where the mines are on a square board.
///
/// Serialized as the bare mine mask, size and mine count are recomputed when reading it back.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Array2<bool>", into = "Array2<bool>")]
pub struct MineLayout {
    size: Coord,
    mine_mask: Array2<bool>,
    mine_count: CellCount,
}

impl MineLayout {
    /// Board of edge `size` without any mine.
    pub fn empty(size: Coord) -> Self {
        Self {
            size,
            mine_mask: square_array(size),
            mine_count: 0,
        }
    }

    pub fn from_mine_mask(mine_mask: Array2<bool>) -> Result<Self> {
        let (size_x, size_y) = mine_mask.dim();
        if size_x == 0 {
            return Err(GameError::EmptyBoard);
        }
        if size_x != size_y {
            return Err(GameError::LayoutMismatch);
        }
        let size = Coord::try_from(size_x).map_err(|_| GameError::LayoutMismatch)?;

        let mut layout = Self::empty(size);
        for (coords, _) in mine_mask.indexed_iter().filter(|&(_, &is_mine)| is_mine) {
            // both axes are below `size`, which fits in a Coord
            layout.insert_mine((coords.0 as Coord, coords.1 as Coord));
        }
        Ok(layout)
    }

    /// Duplicated coordinates collapse into a single mine.
    pub fn from_mine_coords(size: Coord, mine_coords: &[Coord2]) -> Result<Self> {
        if size == 0 {
            return Err(GameError::EmptyBoard);
        }

        let mut layout = Self::empty(size);
        for &coords in mine_coords {
            let coords = layout.validate_coords(coords)?;
            layout.insert_mine(coords);
        }
        Ok(layout)
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig::new_unchecked(self.size, self.mine_count)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if coords.0 < self.size && coords.1 < self.size {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords {
                coords,
                size: self.size,
            })
        }
    }

    pub fn size(&self) -> Coord {
        self.size
    }

    pub fn total_cells(&self) -> CellCount {
        mult(self.size, self.size)
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn mine_mask(&self) -> &Array2<bool> {
        &self.mine_mask
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self[coords]
    }

    /// Mines among the up to 8 neighbors, clipped at the board edges.
    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        let mut count = 0;
        for pos in self.iter_neighbors(coords) {
            if self[pos] {
                count += 1;
            }
        }
        count
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        NeighborIter::new(coords, self.size)
    }

    /// All coordinates, row by row.
    pub fn iter_coords(&self) -> impl Iterator<Item = Coord2> + use<> {
        let size = self.size;
        (0..size).flat_map(move |y| (0..size).map(move |x| (x, y)))
    }

    pub fn iter_mines(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.iter_coords().filter(|&coords| self[coords])
    }

    /// Returns `false` when the cell already held a mine.
    pub(crate) fn insert_mine(&mut self, coords: Coord2) -> bool {
        let cell = &mut self.mine_mask[coords.to_nd_index()];
        if *cell {
            return false;
        }
        *cell = true;
        self.mine_count += 1;
        true
    }
}

impl TryFrom<Array2<bool>> for MineLayout {
    type Error = GameError;

    fn try_from(mine_mask: Array2<bool>) -> Result<Self> {
        Self::from_mine_mask(mine_mask)
    }
}

impl From<MineLayout> for Array2<bool> {
    fn from(layout: MineLayout) -> Self {
        layout.mine_mask
    }
}

impl Index<Coord2> for MineLayout {
    type Output = bool;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.mine_mask[coords.to_nd_index()]
    }
}

/// Outcome of toggling a flag.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlagOutcome {
    Flagged,
    Unflagged,
}

impl FlagOutcome {
    pub const fn is_flagged(self) -> bool {
        matches!(self, Self::Flagged)
    }
}

/// Outcome of revealing a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    /// The cell was already revealed
    NoChange,
    /// This many cells were revealed, the game goes on
    Revealed(CellCount),
    /// The cell held a mine, every mine is now revealed
    HitMine,
    /// The last safe cells were revealed
    Won,
}

impl RevealOutcome {
    /// Whether this outcome could have caused an update to the board
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }

    /// Whether the game ended with this move
    pub const fn is_final(self) -> bool {
        matches!(self, Self::HitMine | Self::Won)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adjacency_counts_clip_at_edges() {
        let layout = MineLayout::from_mine_mask(Array2::from_elem([5, 5], true)).unwrap();

        assert_eq!(layout.adjacent_mine_count((0, 0)), 3);
        assert_eq!(layout.adjacent_mine_count((4, 4)), 3);
        assert_eq!(layout.adjacent_mine_count((2, 0)), 5);
        assert_eq!(layout.adjacent_mine_count((0, 3)), 5);
        assert_eq!(layout.adjacent_mine_count((2, 2)), 8);
    }

    #[test]
    fn duplicate_mine_coords_collapse() {
        let layout = MineLayout::from_mine_coords(3, &[(1, 1), (1, 1), (0, 2)]).unwrap();

        assert_eq!(layout.mine_count(), 2);
        assert_eq!(layout.safe_cell_count(), 7);
        assert_eq!(layout.game_config(), GameConfig::new_unchecked(3, 2));
    }

    #[test]
    fn mine_coords_outside_board_are_rejected() {
        assert_eq!(
            MineLayout::from_mine_coords(3, &[(3, 0)]),
            Err(GameError::InvalidCoords {
                coords: (3, 0),
                size: 3
            })
        );
        assert_eq!(
            MineLayout::from_mine_coords(0, &[]),
            Err(GameError::EmptyBoard)
        );
    }

    #[test]
    fn mine_mask_must_be_square() {
        assert_eq!(
            MineLayout::from_mine_mask(Array2::from_elem([2, 3], false)),
            Err(GameError::LayoutMismatch)
        );
        assert_eq!(
            MineLayout::from_mine_mask(Array2::from_elem([0, 0], false)),
            Err(GameError::EmptyBoard)
        );
    }

    #[test]
    fn mask_and_coords_agree() {
        let mut mask = Array2::from_elem([4, 4], false);
        mask[[1, 2]] = true;
        mask[[3, 0]] = true;

        let from_mask = MineLayout::from_mine_mask(mask).unwrap();
        let from_coords = MineLayout::from_mine_coords(4, &[(3, 0), (1, 2)]).unwrap();

        assert_eq!(from_mask, from_coords);
        assert_eq!(from_mask.iter_mines().collect::<Vec<_>>(), vec![(3, 0), (1, 2)]);
    }

    #[test]
    fn deserialized_layout_recounts_mines() {
        let layout: MineLayout =
            serde_json::from_str(r#"{"v":1,"dim":[2,2],"data":[true,false,false,true]}"#).unwrap();

        assert_eq!(layout.size(), 2);
        assert_eq!(layout.mine_count(), 2);
        assert_eq!(layout.iter_mines().collect::<Vec<_>>(), vec![(0, 0), (1, 1)]);
    }

    #[test]
    fn deserialized_layout_must_be_square() {
        let result = serde_json::from_str::<MineLayout>(
            r#"{"v":1,"dim":[2,3],"data":[true,false,false,true,false,false]}"#,
        );

        assert!(result.is_err());
    }

    #[test]
    fn deserialized_layout_ignores_stale_counts() {
        // only the mask is read, a claimed size or mine count cannot disagree with it
        let result = serde_json::from_str::<MineLayout>(
            r#"{"size":5,"mine_mask":{"v":1,"dim":[2,2],"data":[true,false,false,false]},"mine_count":7}"#,
        );

        assert!(result.is_err());
    }

    #[test]
    fn serialized_layout_reads_back_equal() {
        let layout = MineLayout::from_mine_coords(4, &[(3, 0), (1, 2)]).unwrap();

        let text = serde_json::to_string(&layout).unwrap();

        assert_eq!(serde_json::from_str::<MineLayout>(&text).unwrap(), layout);
    }

    #[test]
    fn outcomes_report_updates() {
        assert!(!RevealOutcome::NoChange.has_update());
        assert!(RevealOutcome::Revealed(3).has_update());
        assert!(RevealOutcome::HitMine.is_final());
        assert!(!RevealOutcome::Revealed(1).is_final());
        assert!(FlagOutcome::Flagged.is_flagged());
    }
}
