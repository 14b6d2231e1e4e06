use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::*;

/// Persisted form of a single cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellRecord {
    pub state: CellState,
    pub is_mine: bool,
    pub adjacent_mines: u8,
}

impl From<Cell> for CellRecord {
    fn from(cell: Cell) -> Self {
        Self {
            state: cell.state(),
            is_mine: cell.contains_mine(),
            adjacent_mines: cell.adjacent_mines(),
        }
    }
}

impl From<CellRecord> for Cell {
    fn from(record: CellRecord) -> Self {
        Cell::from_parts(record.state, record.is_mine, record.adjacent_mines)
    }
}

/// Persisted form of a board, cells in row-major order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardRecord {
    pub width: Coord,
    pub height: Coord,
    pub mine_count: CellCount,
    pub first_click_pending: bool,
    pub cells: Vec<CellRecord>,
}

impl From<&Board> for BoardRecord {
    fn from(board: &Board) -> Self {
        Self {
            width: board.width(),
            height: board.height(),
            mine_count: board.mine_count(),
            first_click_pending: board.first_click_pending(),
            cells: board.cells().map(|&cell| cell.into()).collect(),
        }
    }
}

impl From<Board> for BoardRecord {
    fn from(board: Board) -> Self {
        Self::from(&board)
    }
}

impl TryFrom<BoardRecord> for Board {
    type Error = GameError;

    fn try_from(record: BoardRecord) -> Result<Self> {
        // dimensions first, the grid is only allocated once they are known
        let config = BoardConfig::new(record.width, record.height, record.mine_count)?;
        let cells = record.cells.into_iter().map(Cell::from).collect();
        Board::from_cells(config, record.first_click_pending, cells)
    }
}

/// Everything written to a save file: session metadata plus the board.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveRecord {
    pub elapsed_time: f32,
    pub flag_count: CellCount,
    pub difficulty: Difficulty,
    pub board: BoardRecord,
}

impl SaveRecord {
    pub fn to_json(&self) -> core::result::Result<String, SaveError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> core::result::Result<Self, SaveError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Writes the record, replacing any previous file. Failures are reported once.
    pub fn save(&self, path: impl AsRef<Path>) -> core::result::Result<(), SaveError> {
        let path = path.as_ref();
        fs::write(path, self.to_json()?)?;
        log::debug!("Saved game to {}", path.display());
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> core::result::Result<Self, SaveError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let record = Self::from_json(&json)?;
        log::debug!("Loaded game from {}", path.display());
        Ok(record)
    }

    /// Validates and rebuilds the stored board.
    pub fn to_board(&self) -> Result<Board> {
        Board::try_from(self.board.clone())
    }
}
