use super::AiPlayer;
use crate::{Action, Board, Cell, Game, GameState, Position};
use rand::prelude::*;
use std::collections::HashSet;

/// Configuration for test board generation.
#[derive(Debug, Clone)]
pub struct TestBoardConfig {
    pub width: u32,
    pub height: u32,
    pub mine_density: f64,
    pub revealed_percentage: f64,
}

impl Default for TestBoardConfig {
    fn default() -> Self {
        Self {
            width: 8,
            height: 8,
            mine_density: 0.15,
            revealed_percentage: 0.3,
        }
    }
}

/// Generates partially revealed games with known mine layouts.
pub struct TestBoardGenerator {
    config: TestBoardConfig,
    rng: StdRng,
}

impl TestBoardGenerator {
    pub fn new(config: TestBoardConfig) -> Self {
        Self {
            config,
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_seed(config: TestBoardConfig, seed: u64) -> Self {
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Generates a game with at least one safe cell revealed, so a player
    /// session starts with deduction rather than a blind opening.
    pub fn generate(&mut self) -> (Game, HashSet<Position>) {
        let cells = self.config.width as f64 * self.config.height as f64;
        let mines_count = (cells * self.config.mine_density) as u32;
        let board = Board::new(self.config.width, self.config.height, mines_count).unwrap();

        let mine_positions: HashSet<Position> = board
            .cells
            .iter()
            .filter_map(|(&pos, &cell)| match cell {
                Cell::Hidden(true) => Some(pos),
                _ => None,
            })
            .collect();

        let mut game = Game::with_board(board);
        let target = ((cells * self.config.revealed_percentage) as u32).max(1);

        // Flood fill can overshoot the target, so bound the attempts rather
        // than the revealed count.
        for _ in 0..cells as u32 * 4 {
            if game.revealed_count() >= target || game.state() != GameState::Playing {
                break;
            }
            let x = self.rng.gen_range(0..self.config.width) as i32;
            let y = self.rng.gen_range(0..self.config.height) as i32;
            let pos = Position::new(x, y);

            if !mine_positions.contains(&pos)
                && !game.get_cell(pos).unwrap().is_revealed()
            {
                game.perform_action(pos, Action::Reveal).unwrap();
            }
        }

        (game, mine_positions)
    }

    pub fn generate_batch(&mut self, count: usize) -> Vec<(Game, HashSet<Position>)> {
        (0..count).map(|_| self.generate()).collect()
    }
}

/// Plays a full session on a pre-revealed game and checks every piece of
/// accumulated knowledge against ground truth.
///
/// The session starts from revealed cells, so the player never guesses;
/// losing the game, flagging a safe cell, or shrinking the known-mine set
/// all count as failures.
pub fn validate_player(game: &mut Game, mine_positions: &HashSet<Position>, seed: u64) -> bool {
    let mut player = AiPlayer::with_seed(seed);
    let mut previously_known = 0;
    let mut turns = 0;

    while game.state() == GameState::Playing {
        match player.take_turn(game) {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => {
                println!("player hit a board error: {e}");
                return false;
            }
        }

        turns += 1;
        if turns > 10_000 {
            println!("player failed to terminate");
            return false;
        }

        if player.known_mines().len() < previously_known {
            println!("known mines shrank from {previously_known}");
            return false;
        }
        previously_known = player.known_mines().len();

        for pos in player.known_mines() {
            if !mine_positions.contains(pos) {
                println!("player confirmed safe position {pos:?} as mine");
                return false;
            }
        }
    }

    if game.state() == GameState::Lost {
        println!("player revealed a mine");
        return false;
    }
    true
}
