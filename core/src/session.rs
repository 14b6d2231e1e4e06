use core::time::Duration;
use serde::{Deserialize, Serialize};
use std::path::Path;
use web_time::Instant;

use crate::*;

/// Preset board sizes offered to the player.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Self::Easy, Self::Medium, Self::Hard];

    pub const fn config(self) -> BoardConfig {
        match self {
            Self::Easy => BoardConfig::new_unchecked(9, 9, 10),
            Self::Medium => BoardConfig::new_unchecked(16, 16, 40),
            Self::Hard => BoardConfig::new_unchecked(30, 16, 99),
        }
    }

    /// Integer code used by the save file.
    pub const fn code(self) -> u8 {
        match self {
            Self::Easy => 0,
            Self::Medium => 1,
            Self::Hard => 2,
        }
    }
}

impl From<Difficulty> for u8 {
    fn from(difficulty: Difficulty) -> Self {
        difficulty.code()
    }
}

impl TryFrom<u8> for Difficulty {
    type Error = GameError;

    fn try_from(code: u8) -> Result<Self> {
        match code {
            0 => Ok(Self::Easy),
            1 => Ok(Self::Medium),
            2 => Ok(Self::Hard),
            other => Err(GameError::InvalidDifficulty(other)),
        }
    }
}

/// Stopwatch that can be paused and resumed with previously accumulated time.
///
/// Time carried over from a save is kept as the saved `f32` so a resumed timer that never ran
/// reports it back unchanged.
#[derive(Clone, Debug, Default)]
pub struct Timer {
    started_at: Option<Instant>,
    accumulated: Duration,
    resumed_secs: f32,
}

impl Timer {
    /// Timer holding `secs` seconds, not running.
    pub fn resumed_from(secs: f32) -> Result<Self> {
        // also rejects values too large for a Duration
        Duration::try_from_secs_f32(secs).map_err(|_| GameError::InvalidElapsedTime)?;
        Ok(Self {
            started_at: None,
            accumulated: Duration::ZERO,
            resumed_secs: secs,
        })
    }

    pub fn start(&mut self) {
        if self.started_at.is_none() {
            self.started_at = Some(Instant::now());
        }
    }

    pub fn stop(&mut self) {
        if let Some(started_at) = self.started_at.take() {
            self.accumulated += started_at.elapsed();
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_running(&self) -> bool {
        self.started_at.is_some()
    }

    /// Time measured by this timer, excluding any resumed time.
    fn measured(&self) -> Duration {
        match self.started_at {
            Some(started_at) => self.accumulated + started_at.elapsed(),
            None => self.accumulated,
        }
    }

    pub fn elapsed(&self) -> Duration {
        Duration::try_from_secs_f32(self.resumed_secs).unwrap_or_default() + self.measured()
    }

    pub fn elapsed_secs(&self) -> f32 {
        self.resumed_secs + self.measured().as_secs_f32()
    }
}

/// One game from the player's point of view: the board plus timer, flag counter, and difficulty.
///
/// Commands are ignored once the game is over. The timer starts with the first reveal that
/// changes the board and stops when the game is won or lost.
#[derive(Clone, Debug)]
pub struct GameSession {
    board: Board,
    difficulty: Difficulty,
    timer: Timer,
    flag_count: CellCount,
    game_over: bool,
}

impl GameSession {
    pub fn new(difficulty: Difficulty) -> Self {
        Self::from_board(Board::new(difficulty.config()), difficulty)
    }

    pub fn from_board(board: Board, difficulty: Difficulty) -> Self {
        let mut session = Self {
            flag_count: board.count_flagged_cells(),
            board,
            difficulty,
            timer: Timer::default(),
            game_over: false,
        };
        session.check_game_over();
        session
    }

    /// Throws the current board away and starts over.
    pub fn start_game(&mut self, difficulty: Difficulty) {
        log::info!("Starting new {:?} game", difficulty);
        *self = Self::new(difficulty);
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn flag_count(&self) -> CellCount {
        self.flag_count
    }

    pub fn mines_remaining(&self) -> i32 {
        i32::from(self.board.mine_count()) - i32::from(self.flag_count)
    }

    pub fn elapsed_secs(&self) -> f32 {
        self.timer.elapsed_secs()
    }

    pub fn is_over(&self) -> bool {
        self.game_over
    }

    pub fn is_won(&self) -> bool {
        self.game_over && self.board.check_win_condition() && !self.board.check_loss_condition()
    }

    pub fn is_lost(&self) -> bool {
        self.board.check_loss_condition()
    }

    pub fn reveal(&mut self, coords: Coord2) -> RevealOutcome {
        if self.game_over {
            return RevealOutcome::NoChange;
        }
        let outcome = self.board.first_reveal(coords);
        if outcome.has_update() {
            self.timer.start();
            self.check_game_over();
        }
        outcome
    }

    pub fn flag(&mut self, coords: Coord2) -> FlagOutcome {
        if self.game_over {
            return FlagOutcome::NoChange;
        }
        let outcome = self.board.flag_cell(coords);
        if outcome.has_update() {
            self.flag_count = self.board.count_flagged_cells();
        }
        outcome
    }

    fn check_game_over(&mut self) {
        if self.game_over {
            return;
        }
        let lost = self.board.check_loss_condition();
        if lost || (!self.board.first_click_pending() && self.board.check_win_condition()) {
            self.end_game(!lost);
        }
    }

    fn end_game(&mut self, won: bool) {
        self.timer.stop();
        self.game_over = true;
        log::debug!(
            "Game {} after {:.1}s",
            if won { "won" } else { "lost" },
            self.timer.elapsed_secs()
        );
    }

    pub fn to_record(&self) -> SaveRecord {
        SaveRecord {
            elapsed_time: self.elapsed_secs(),
            flag_count: self.flag_count,
            difficulty: self.difficulty,
            board: BoardRecord::from(&self.board),
        }
    }

    pub fn from_record(record: &SaveRecord) -> core::result::Result<Self, SaveError> {
        let board = record.to_board()?;
        let timer = Timer::resumed_from(record.elapsed_time)?;

        let mut session = Self::from_board(board, record.difficulty);
        if session.flag_count != record.flag_count {
            log::warn!(
                "Saved flag count {} does not match board, using {}",
                record.flag_count,
                session.flag_count
            );
        }
        session.timer = timer;
        if !session.game_over && !session.board.first_click_pending() {
            session.timer.start();
        }
        Ok(session)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> core::result::Result<(), SaveError> {
        self.to_record().save(path)
    }

    pub fn load(path: impl AsRef<Path>) -> core::result::Result<Self, SaveError> {
        Self::from_record(&SaveRecord::load(path)?)
    }

    /// Loads a saved game, or starts a fresh `difficulty` game when the save is missing or bad.
    pub fn load_or_new(path: impl AsRef<Path>, difficulty: Difficulty) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(session) => session,
            Err(err) => {
                log::warn!(
                    "Could not load game from {}, starting fresh: {}",
                    path.display(),
                    err
                );
                Self::new(difficulty)
            }
        }
    }
}
