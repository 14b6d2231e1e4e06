use rand::prelude::*;
use rand::rngs::SmallRng;

use super::*;

/// Uniformly random placement that keeps the excluded cell free.
#[derive(Clone, Debug)]
pub struct RandomMineGenerator<R = SmallRng> {
    rng: R,
    placement: Placement,
}

impl RandomMineGenerator<SmallRng> {
    /// Seeded from the thread-local generator, for normal play.
    pub fn from_entropy() -> Self {
        Self::new(SmallRng::from_rng(&mut rand::rng()))
    }

    /// Repeatable placement, meant for tests and benchmarks.
    pub fn seeded(seed: u64) -> Self {
        Self::new(SmallRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomMineGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            placement: Placement::default(),
        }
    }

    pub fn with_placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

    fn place_by_rejection(
        &mut self,
        mines: &mut Array2<bool>,
        config: BoardConfig,
        excluded: CellCount,
    ) -> Result<()> {
        let total_cells = config.total_cells();
        let cells = mines.as_slice_mut().ok_or(GameError::InvalidBoardShape)?;
        let mut mines_placed = 0;
        let mut rejected: usize = 0;

        while mines_placed < config.mines {
            let index = self.rng.random_range(0..total_cells);
            let cell = &mut cells[usize::from(index)];
            if index == excluded || *cell {
                rejected += 1;
                continue;
            }
            *cell = true;
            mines_placed += 1;
        }

        log::trace!("Rejection sampling discarded {} draws", rejected);
        Ok(())
    }

    fn place_by_shuffle(
        &mut self,
        mines: &mut Array2<bool>,
        config: BoardConfig,
        excluded: CellCount,
    ) -> Result<()> {
        let cells = mines.as_slice_mut().ok_or(GameError::InvalidBoardShape)?;
        let mut positions: Vec<CellCount> = (0..config.total_cells())
            .filter(|&index| index != excluded)
            .collect();

        let mine_count = usize::from(config.mines);
        for i in 0..mine_count {
            let j = self.rng.random_range(i..positions.len());
            positions.swap(i, j);
        }

        for &index in &positions[..mine_count] {
            cells[usize::from(index)] = true;
        }
        Ok(())
    }
}

impl<R: Rng> MineGenerator for RandomMineGenerator<R> {
    fn generate(mut self, config: BoardConfig, excluded: Coord2) -> Result<Array2<bool>> {
        let config = BoardConfig::new(config.width, config.height, config.mines)?;
        let mut mines: Array2<bool> = Array2::default(config.size().to_nd_index());
        let excluded = to_linear(excluded, config.width);

        let placement = self.placement.resolve(config);
        log::debug!(
            "Placing {} mines on {}x{} using {:?}",
            config.mines,
            config.width,
            config.height,
            placement
        );

        match placement {
            Placement::Shuffle => self.place_by_shuffle(&mut mines, config, excluded)?,
            _ => self.place_by_rejection(&mut mines, config, excluded)?,
        }

        // double check mine count
        let count = mines.iter().filter(|&&mine| mine).count();
        if count != usize::from(config.mines) {
            log::warn!(
                "Generated mine count mismatch, actual: {}, requested: {}",
                count,
                config.mines
            );
            return Err(GameError::MineCountMismatch);
        }
        Ok(mines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mine_coords(mines: &Array2<bool>, width: Coord) -> Vec<Coord2> {
        mines
            .iter()
            .enumerate()
            .filter(|&(_, &mine)| mine)
            .map(|(index, _)| from_linear(index as CellCount, width))
            .collect()
    }

    #[test]
    fn both_strategies_respect_count_and_exclusion() {
        let config = BoardConfig::new(9, 7, 20).unwrap();
        for placement in [Placement::Rejection, Placement::Shuffle] {
            for seed in 0..50 {
                let excluded = ((seed % 9) as Coord, (seed % 7) as Coord);
                let mines = RandomMineGenerator::seeded(seed)
                    .with_placement(placement)
                    .generate(config, excluded)
                    .unwrap();
                assert_eq!(mines.dim(), (7, 9));
                let coords = mine_coords(&mines, 9);
                assert_eq!(coords.len(), 20);
                assert!(!coords.contains(&excluded));
            }
        }
    }

    #[test]
    fn saturated_board_leaves_only_excluded_cell() {
        let config = BoardConfig::new(4, 4, 15).unwrap();
        let excluded: Coord2 = (2, 3);
        let mines = RandomMineGenerator::seeded(7).generate(config, excluded).unwrap();
        assert!(!mines[excluded.to_nd_index()]);
        assert_eq!(mines.iter().filter(|&&mine| mine).count(), 15);
    }

    #[test]
    fn auto_placement_switches_on_density() {
        let sparse = BoardConfig::new(9, 9, 10).unwrap();
        let dense = BoardConfig::new(9, 9, 60).unwrap();
        assert_eq!(Placement::Auto.resolve(sparse), Placement::Rejection);
        assert_eq!(Placement::Auto.resolve(dense), Placement::Shuffle);
        assert_eq!(Placement::Rejection.resolve(dense), Placement::Rejection);
    }

    #[test]
    fn same_seed_same_layout() {
        let config = BoardConfig::new(16, 16, 40).unwrap();
        let a = RandomMineGenerator::seeded(42).generate(config, (0, 0)).unwrap();
        let b = RandomMineGenerator::seeded(42).generate(config, (0, 0)).unwrap();
        assert_eq!(a, b);
    }
}
