use rand::prelude::*;
use rand::rngs::SmallRng;

use super::*;

/// Uniform placement that resolves collisions by probing forward.
///
/// Each mine draws a uniform index over all cells; when that cell already holds a mine the mine moves to the next
/// free cell, wrapping around the end of the board. Exactly `config.mines` distinct cells end up mined and the whole
/// placement never takes more than `O(size²)` steps.
#[derive(Clone, Debug)]
pub struct ProbingPlacer<R> {
    rng: R,
}

impl<R: Rng> ProbingPlacer<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl ProbingPlacer<SmallRng> {
    pub fn from_seed(seed: u64) -> Self {
        Self::new(SmallRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(SmallRng::from_os_rng())
    }
}

impl<R: Rng> MinePlacer for ProbingPlacer<R> {
    fn place(&mut self, config: GameConfig) -> Result<MineLayout> {
        config.validate()?;

        let total_cells = config.total_cells();
        let mut layout = MineLayout::empty(config.size);
        let mut collisions = 0usize;

        for _ in 0..config.mines {
            let mut index: CellCount = self.rng.random_range(0..total_cells);
            // fewer mines than cells were placed so far, so a free cell exists
            while layout.contains_mine(index_to_coords(index, config.size)) {
                log::trace!("Cell {} already mined, probing forward", index);
                collisions += 1;
                index = (index + 1) % total_cells;
            }
            let coords = index_to_coords(index, config.size);
            log::trace!("Mine placed at {:?}", coords);
            layout.insert_mine(coords);
        }

        log::debug!(
            "Placed {} mines on a {}x{} board ({} probe steps)",
            layout.mine_count(),
            config.size,
            config.size,
            collisions
        );
        Ok(layout)
    }
}

#[cfg(test)]
mod tests {
    use rand::RngCore;

    use super::*;

    #[test]
    fn places_exact_mine_count() {
        let mut placer = ProbingPlacer::from_seed(1);

        for mines in [0, 1, 5, 24, 25] {
            let layout = placer.place(GameConfig::new_unchecked(5, mines)).unwrap();
            assert_eq!(layout.mine_count(), mines);
            assert_eq!(layout.iter_mines().count(), usize::from(mines));
        }
    }

    #[test]
    fn full_board_is_all_mines() {
        let layout = ProbingPlacer::from_seed(3)
            .place(GameConfig::new_unchecked(4, 16))
            .unwrap();

        assert!(layout.iter_coords().all(|coords| layout.contains_mine(coords)));
    }

    #[test]
    fn same_seed_same_layout() {
        let config = GameConfig::new_unchecked(10, 15);

        let first = ProbingPlacer::from_seed(99).place(config).unwrap();
        let second = ProbingPlacer::from_seed(99).place(config).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn rejects_oversized_config_without_placing() {
        let mut placer = ProbingPlacer::from_seed(0);

        assert_eq!(
            placer.place(GameConfig::new_unchecked(2, 5)),
            Err(GameError::TooManyMines {
                requested: 5,
                cells: 4
            })
        );
        assert_eq!(
            placer.place(GameConfig::new_unchecked(0, 0)),
            Err(GameError::EmptyBoard)
        );
    }

    /// Generator that always draws zero.
    struct ZeroRng;

    impl RngCore for ZeroRng {
        fn next_u32(&mut self) -> u32 {
            0
        }

        fn next_u64(&mut self) -> u64 {
            0
        }

        fn fill_bytes(&mut self, dst: &mut [u8]) {
            dst.fill(0);
        }
    }

    #[test]
    fn collisions_probe_forward_to_next_free_cell() {
        let mut placer = ProbingPlacer::new(ZeroRng);

        let layout = placer.place(GameConfig::new_unchecked(2, 3)).unwrap();

        let mines: Vec<_> = layout.iter_mines().collect();
        assert_eq!(mines, vec![(0, 0), (1, 0), (0, 1)]);
        assert!(!layout.contains_mine((1, 1)));
    }
}
