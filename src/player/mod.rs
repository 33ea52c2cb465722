mod board;
mod deduction;
#[cfg(feature = "test-utils")]
pub mod test_utils;

pub use board::{PlayerBoard, PlayerCell};

use crate::{Action, Cell, Game, GameError, Position};
use deduction::deduce;
use log::{debug, trace, warn};
use rand::prelude::*;
use std::collections::{HashSet, VecDeque};

/// Automated player for a single board.
///
/// Knowledge accumulates turn over turn: positions proven to be mines stay
/// proven, and queued actions are paid out one per turn so a driver can
/// pace the session for display. Create a fresh player per game; nothing
/// is shared between sessions.
pub struct AiPlayer {
    pending_reveals: VecDeque<Position>,
    pending_flags: VecDeque<Position>,
    confirmed_mines: HashSet<Position>,
    initialized: bool,
    rng: StdRng,
}

impl Default for AiPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl AiPlayer {
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    /// Reproducible opening move, for tests and benchmarks.
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            pending_reveals: VecDeque::new(),
            pending_flags: VecDeque::new(),
            confirmed_mines: HashSet::new(),
            initialized: false,
            rng,
        }
    }

    /// Positions proven to hide mines so far this session.
    pub fn known_mines(&self) -> &HashSet<Position> {
        &self.confirmed_mines
    }

    /// Attempts one action against the board.
    ///
    /// `Ok(true)` means a reveal or flag was applied; `Ok(false)` means the
    /// board offers no provable move and the caller must guess or stop.
    /// Errors only surface a broken board contract and do not occur when
    /// the game is still in progress.
    pub fn take_turn(&mut self, game: &mut Game) -> Result<bool, GameError> {
        if !self.initialized && game.revealed_count() == 0 {
            self.initialized = true;
            let pos = self.pick_opening(game.dimensions());
            debug!("opening move at {pos:?}");
            game.perform_action(pos, Action::Reveal)?;
            return Ok(true);
        }
        self.initialized = true;

        if self.apply_queued(game)? {
            return Ok(true);
        }

        self.run_deduction(game);

        if self.apply_queued(game)? {
            return Ok(true);
        }

        debug!(
            "no provable moves left, {} mines known",
            self.confirmed_mines.len()
        );
        Ok(false)
    }

    /// A central opening statistically uncovers the most area, so both
    /// coordinates are drawn from the middle third of their dimension.
    fn pick_opening(&mut self, (width, height): (u32, u32)) -> Position {
        let x = self.rng.gen_range(0..(width / 3).max(1)) + width / 3;
        let y = self.rng.gen_range(0..(height / 3).max(1)) + height / 3;
        Position::new(x as i32, y as i32)
    }

    /// Pays out one queued action: reveals first, then flags. Queue entries
    /// are re-validated against the board, since its state may have moved
    /// on since they were enqueued.
    fn apply_queued(&mut self, game: &mut Game) -> Result<bool, GameError> {
        while let Some(pos) = self.pending_reveals.pop_front() {
            if game.get_cell(pos)?.is_revealed() {
                trace!("dropping stale reveal of {pos:?}");
                continue;
            }
            debug_assert!(
                !game.get_cell(pos)?.is_mine(),
                "deduction queued a mine {pos:?} for reveal"
            );
            game.perform_action(pos, Action::Reveal)?;
            return Ok(true);
        }

        while let Some(pos) = self.pending_flags.pop_front() {
            match game.get_cell(pos)? {
                cell if cell.is_revealed() => {
                    trace!("dropping stale flag of {pos:?}");
                    continue;
                }
                Cell::Flagged(_) | Cell::Questioned(_) => {
                    // Should not happen when the engine is the only one
                    // placing markers; recover by resetting the marker.
                    warn!("duplicate flag at {pos:?}, clearing stale marker");
                    game.clear_flag(pos)?;
                }
                _ => {}
            }
            debug_assert!(
                game.get_cell(pos)?.is_mine(),
                "deduction queued a safe cell {pos:?} for flagging"
            );
            game.perform_action(pos, Action::Flag)?;
            return Ok(true);
        }

        Ok(false)
    }

    /// Runs one deduction pass and folds its conclusions into the queues.
    fn run_deduction(&mut self, game: &Game) {
        let board = PlayerBoard::new(game);
        let result = deduce(&board, &self.confirmed_mines);

        for pos in result.mines {
            if self.confirmed_mines.insert(pos) {
                self.pending_flags.push_back(pos);
            }
        }
        for pos in result.safe {
            // A confirmed mine must never be queued for reveal.
            if !self.confirmed_mines.contains(&pos) && !self.pending_reveals.contains(&pos) {
                self.pending_reveals.push_back(pos);
            }
        }

        trace!(
            "deduction pass queued {} reveals, {} flags",
            self.pending_reveals.len(),
            self.pending_flags.len()
        );
    }
}
