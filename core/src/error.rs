use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Board dimensions must be positive")]
    InvalidDimensions,
    #[error("Board needs at least one mine")]
    NoMines,
    #[error("Too many mines, at least one cell must stay safe")]
    TooManyMines,
    #[error("Board shape does not match declared size")]
    InvalidBoardShape,
    #[error("Unknown cell state code {0}")]
    InvalidCellState(u8),
    #[error("Unknown difficulty code {0}")]
    InvalidDifficulty(u8),
    #[error("Mine layout does not match declared mine count")]
    MineCountMismatch,
    #[error("Stored adjacent mine count is inconsistent at ({0}, {1})")]
    InconsistentAdjacency(u8, u8),
    #[error("Cells were revealed before mines were placed")]
    RevealedBeforePlacement,
    #[error("Elapsed time must be a finite, non-negative number of seconds")]
    InvalidElapsedTime,
}

pub type Result<T> = core::result::Result<T, GameError>;

/// Failure while saving or loading a game, always recoverable by starting a fresh game.
#[derive(Error, Debug)]
pub enum SaveError {
    #[error("Could not access save file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Save file is malformed: {0}")]
    Format(#[from] serde_json::Error),
    #[error("Save file holds an invalid game: {0}")]
    Invalid(#[from] GameError),
}
