use ndarray::Array2;

use crate::*;
pub use fixed::*;
pub use random::*;

mod fixed;
mod random;

/// Decides where mines go once the first revealed cell is known.
///
/// Implementations must return a mask of shape `(height, width)` holding exactly `config.mines`
/// mines, none of them on `excluded`. The board double checks this before adopting the layout.
pub trait MineGenerator {
    fn generate(self, config: BoardConfig, excluded: Coord2) -> Result<Array2<bool>>;
}

/// How a random generator picks mine positions.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Placement {
    /// Rejection sampling for sparse boards, partial shuffle once more than half of the
    /// placeable cells are mines.
    #[default]
    Auto,
    /// Draw random cells until enough distinct free ones were hit.
    Rejection,
    /// Partial Fisher-Yates over every placeable linear index.
    Shuffle,
}

impl Placement {
    pub(crate) fn resolve(self, config: BoardConfig) -> Self {
        match self {
            Self::Auto => {
                let placeable = config.total_cells() - 1;
                if config.mines.saturating_mul(2) > placeable {
                    Self::Shuffle
                } else {
                    Self::Rejection
                }
            }
            other => other,
        }
    }
}
