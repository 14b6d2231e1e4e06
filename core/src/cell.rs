use serde::{Deserialize, Serialize};

use crate::GameError;

/// Player-visible concealment state of a single cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum CellState {
    #[default]
    Hidden,
    Revealed,
    Flagged,
}

impl CellState {
    /// Integer code used by the save file.
    pub const fn code(self) -> u8 {
        match self {
            Self::Hidden => 0,
            Self::Revealed => 1,
            Self::Flagged => 2,
        }
    }
}

impl From<CellState> for u8 {
    fn from(state: CellState) -> Self {
        state.code()
    }
}

impl TryFrom<u8> for CellState {
    type Error = GameError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::Hidden),
            1 => Ok(Self::Revealed),
            2 => Ok(Self::Flagged),
            other => Err(GameError::InvalidCellState(other)),
        }
    }
}

/// One board square. Transitions are guarded, illegal ones are ignored.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Cell {
    state: CellState,
    is_mine: bool,
    adjacent_mines: u8,
}

impl Cell {
    pub(crate) const fn from_parts(state: CellState, is_mine: bool, adjacent_mines: u8) -> Self {
        Self {
            state,
            is_mine,
            adjacent_mines,
        }
    }

    pub fn reveal(&mut self) {
        if self.state == CellState::Hidden {
            self.state = CellState::Revealed;
        }
    }

    pub fn toggle_flag(&mut self) {
        self.state = match self.state {
            CellState::Hidden => CellState::Flagged,
            CellState::Flagged => CellState::Hidden,
            CellState::Revealed => CellState::Revealed,
        };
    }

    /// Only the board calls this, and only while mines are still unplaced.
    pub(crate) fn set_mine(&mut self, mine: bool) {
        self.is_mine = mine;
        if mine {
            self.adjacent_mines = 0;
        }
    }

    pub(crate) fn increment_adjacent_mines(&mut self) {
        if !self.is_mine {
            self.adjacent_mines += 1;
        }
    }

    pub const fn state(&self) -> CellState {
        self.state
    }

    pub const fn contains_mine(&self) -> bool {
        self.is_mine
    }

    /// Mines in the 8-neighbourhood. Always 0 for a mine cell, which is not meaningful.
    pub const fn adjacent_mines(&self) -> u8 {
        self.adjacent_mines
    }

    pub const fn is_hidden(&self) -> bool {
        matches!(self.state, CellState::Hidden)
    }

    pub const fn is_revealed(&self) -> bool {
        matches!(self.state, CellState::Revealed)
    }

    pub const fn is_flagged(&self) -> bool {
        matches!(self.state, CellState::Flagged)
    }
}
