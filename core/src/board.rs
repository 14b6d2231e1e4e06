use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// The minefield and the only mutator of its cells.
///
/// Mines are placed lazily: until the first reveal the board holds no mines at all, and the first
/// revealed cell is excluded from placement.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(into = "BoardRecord", try_from = "BoardRecord")]
pub struct Board {
    config: BoardConfig,
    cells: Array2<Cell>,
    first_click_pending: bool,
}

impl Board {
    pub fn new(config: BoardConfig) -> Self {
        Self {
            config,
            cells: Array2::default(config.size().to_nd_index()),
            first_click_pending: true,
        }
    }

    pub fn with_size(width: Coord, height: Coord, mine_count: CellCount) -> Result<Self> {
        Ok(Self::new(BoardConfig::new(width, height, mine_count)?))
    }

    /// Rebuilds a board from row-major cells, rejecting anything a live board could not reach.
    pub fn from_cells(
        config: BoardConfig,
        first_click_pending: bool,
        cells: Vec<Cell>,
    ) -> Result<Self> {
        let config = BoardConfig::new(config.width, config.height, config.mines)?;
        let cells = Array2::from_shape_vec(config.size().to_nd_index(), cells)
            .map_err(|_| GameError::InvalidBoardShape)?;
        let board = Self {
            config,
            cells,
            first_click_pending,
        };
        board.validate()?;
        Ok(board)
    }

    fn validate(&self) -> Result<()> {
        let mines = self.cells.iter().filter(|cell| cell.contains_mine()).count();

        if self.first_click_pending {
            if mines != 0 {
                return Err(GameError::MineCountMismatch);
            }
            if self.cells.iter().any(Cell::is_revealed) {
                return Err(GameError::RevealedBeforePlacement);
            }
        } else if mines != usize::from(self.config.mines) {
            return Err(GameError::MineCountMismatch);
        }

        // without mines every stored count must be 0
        for coords in self.coords() {
            let cell = self.cells[coords.to_nd_index()];
            let expected = if cell.contains_mine() {
                0
            } else {
                self.count_adjacent_mines(coords)
            };
            if cell.adjacent_mines() != expected {
                return Err(GameError::InconsistentAdjacency(coords.0, coords.1));
            }
        }
        Ok(())
    }

    pub fn config(&self) -> BoardConfig {
        self.config
    }

    pub fn width(&self) -> Coord {
        self.config.width
    }

    pub fn height(&self) -> Coord {
        self.config.height
    }

    pub fn size(&self) -> Coord2 {
        self.config.size()
    }

    pub fn mine_count(&self) -> CellCount {
        self.config.mines
    }

    pub fn first_click_pending(&self) -> bool {
        self.first_click_pending
    }

    /// The cell at `coords`, or `None` when out of range.
    pub fn cell(&self, coords: Coord2) -> Option<Cell> {
        self.config
            .contains(coords)
            .then(|| self.cells[coords.to_nd_index()])
    }

    /// All cells in row-major order, `y` outer and `x` inner.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Every coordinate in row-major order.
    pub fn coords(&self) -> impl Iterator<Item = Coord2> + use<> {
        let (width, height) = self.size();
        (0..height).flat_map(move |y| (0..width).map(move |x| (x, y)))
    }

    /// Places mines on the first call and then reveals; later calls behave like
    /// [`Board::reveal_cell`].
    pub fn first_reveal(&mut self, coords: Coord2) -> RevealOutcome {
        if !self.first_click_pending {
            return self.reveal_cell(coords);
        }
        match self.first_reveal_with(coords, RandomMineGenerator::from_entropy()) {
            Ok(outcome) => outcome,
            Err(err) => {
                log::error!("Mine placement failed: {}", err);
                RevealOutcome::NoChange
            }
        }
    }

    /// Like [`Board::first_reveal`] with an explicit placement strategy.
    pub fn first_reveal_with<G: MineGenerator>(
        &mut self,
        coords: Coord2,
        generator: G,
    ) -> Result<RevealOutcome> {
        if !self.config.contains(coords) || !self.cells[coords.to_nd_index()].is_hidden() {
            return Ok(RevealOutcome::NoChange);
        }
        self.place_mines_with(coords, generator)?;
        Ok(self.reveal_cell(coords))
    }

    /// Randomly places every mine anywhere but `excluded`, then computes adjacency.
    pub fn place_mines(&mut self, excluded: Coord2) -> Result<()> {
        self.place_mines_with(excluded, RandomMineGenerator::from_entropy())
    }

    /// No-op once mines exist or when `excluded` is out of range.
    pub fn place_mines_with<G: MineGenerator>(
        &mut self,
        excluded: Coord2,
        generator: G,
    ) -> Result<()> {
        if !self.first_click_pending || !self.config.contains(excluded) {
            return Ok(());
        }

        let mines = generator.generate(self.config, excluded)?;
        if mines.dim() != self.cells.dim() {
            return Err(GameError::InvalidBoardShape);
        }
        let placed = mines.iter().filter(|&&mine| mine).count();
        if placed != usize::from(self.config.mines) || mines[excluded.to_nd_index()] {
            return Err(GameError::MineCountMismatch);
        }

        for (cell, &mine) in self.cells.iter_mut().zip(mines.iter()) {
            cell.set_mine(mine);
        }
        self.calculate_adjacent_mines();
        self.first_click_pending = false;
        log::debug!(
            "Placed {} mines, first cell {:?} kept safe",
            self.config.mines,
            excluded
        );
        Ok(())
    }

    fn calculate_adjacent_mines(&mut self) {
        let size = self.size();
        for coords in self.coords() {
            if !self.cells[coords.to_nd_index()].contains_mine() {
                continue;
            }
            for pos in NeighborIter::new(coords, size) {
                self.cells[pos.to_nd_index()].increment_adjacent_mines();
            }
        }
    }

    fn count_adjacent_mines(&self, coords: Coord2) -> u8 {
        NeighborIter::new(coords, self.size())
            .filter(|&pos| self.cells[pos.to_nd_index()].contains_mine())
            .count() as u8
    }

    /// Reveals a hidden cell, flood-filling from zero-adjacency cells.
    ///
    /// Out-of-range, revealed and flagged targets are ignored. Before mines exist this routes
    /// through [`Board::first_reveal`] so the first revealed cell is always safe.
    pub fn reveal_cell(&mut self, coords: Coord2) -> RevealOutcome {
        if !self.config.contains(coords) {
            return RevealOutcome::NoChange;
        }
        if !self.cells[coords.to_nd_index()].is_hidden() {
            return RevealOutcome::NoChange;
        }
        if self.first_click_pending {
            return self.first_reveal(coords);
        }

        let cell = &mut self.cells[coords.to_nd_index()];
        if cell.contains_mine() {
            cell.reveal();
            log::debug!("Revealed mine at {:?}", coords);
            return RevealOutcome::HitMine;
        }

        let revealed = self.flood_reveal(coords);
        log::trace!("Reveal at {:?} opened {} cells", coords, revealed);

        if self.check_win_condition() {
            log::debug!("All safe cells revealed");
            RevealOutcome::Won
        } else {
            RevealOutcome::Revealed
        }
    }

    /// Worklist flood-fill. A cell is only pushed while hidden and only opened once, so every
    /// cell is visited at most once.
    fn flood_reveal(&mut self, start: Coord2) -> usize {
        let size = self.size();
        let mut revealed = 0;
        let mut to_visit = vec![start];

        while let Some(coords) = to_visit.pop() {
            let cell = &mut self.cells[coords.to_nd_index()];
            if !cell.is_hidden() || cell.contains_mine() {
                continue;
            }
            cell.reveal();
            revealed += 1;

            if cell.adjacent_mines() == 0 {
                to_visit.extend(
                    NeighborIter::new(coords, size)
                        .filter(|&pos| self.cells[pos.to_nd_index()].is_hidden()),
                );
            }
        }
        revealed
    }

    pub fn flag_cell(&mut self, coords: Coord2) -> FlagOutcome {
        if !self.config.contains(coords) {
            return FlagOutcome::NoChange;
        }
        let cell = &mut self.cells[coords.to_nd_index()];
        if cell.is_revealed() {
            return FlagOutcome::NoChange;
        }
        cell.toggle_flag();
        FlagOutcome::Changed
    }

    /// Every non-mine cell is revealed. Mines may still be hidden or flagged.
    pub fn check_win_condition(&self) -> bool {
        self.cells
            .iter()
            .all(|cell| cell.contains_mine() || cell.is_revealed())
    }

    pub fn check_loss_condition(&self) -> bool {
        self.cells
            .iter()
            .any(|cell| cell.contains_mine() && cell.is_revealed())
    }

    pub fn count_flagged_cells(&self) -> CellCount {
        self.cells.iter().filter(|cell| cell.is_flagged()).count() as CellCount
    }

    /// Mines minus flags, negative when the player over-flags.
    pub fn mines_remaining(&self) -> i32 {
        i32::from(self.config.mines) - i32::from(self.count_flagged_cells())
    }
}
