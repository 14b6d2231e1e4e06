use super::*;

/// Places mines on a caller-chosen set of cells, for deterministic setups.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedMineGenerator {
    mines: Vec<Coord2>,
}

impl FixedMineGenerator {
    pub fn new(mines: impl Into<Vec<Coord2>>) -> Self {
        Self {
            mines: mines.into(),
        }
    }
}

impl MineGenerator for FixedMineGenerator {
    fn generate(self, config: BoardConfig, excluded: Coord2) -> Result<Array2<bool>> {
        let mut mines: Array2<bool> = Array2::default(config.size().to_nd_index());

        for coords in self.mines {
            if !config.contains(coords) {
                return Err(GameError::InvalidBoardShape);
            }
            if coords == excluded {
                log::warn!("Fixed layout puts a mine on the first revealed cell {:?}", coords);
                return Err(GameError::MineCountMismatch);
            }
            mines[coords.to_nd_index()] = true;
        }

        if mines.iter().filter(|&&mine| mine).count() != usize::from(config.mines) {
            return Err(GameError::MineCountMismatch);
        }
        Ok(mines)
    }
}
