use crate::{Board, BoardIterator, Cell, GameError, Position};
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Playing,
    Won,
    Lost,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Reveal,
    Flag,
}

#[derive(Debug)]
pub struct Game {
    board: Board,
    state: GameState,
    revealed_count: u32,
}

impl Game {
    pub fn new(width: u32, height: u32, mines_count: u32) -> Result<Self, GameError> {
        Ok(Self::with_board(Board::new(width, height, mines_count)?))
    }

    /// Wraps a prepared board, picking up any cells it already has revealed.
    pub fn with_board(board: Board) -> Self {
        let revealed_count = board.revealed_count();
        Self {
            board,
            state: GameState::Playing,
            revealed_count,
        }
    }

    pub fn get_cell(&self, pos: Position) -> Result<Cell, GameError> {
        self.board.get_cell(pos)
    }

    pub fn neighbors(&self, pos: Position) -> Vec<Position> {
        self.board.neighbors(pos)
    }

    pub fn iter_positions(&self) -> BoardIterator {
        self.board.iter_positions()
    }

    pub fn perform_action(&mut self, pos: Position, action: Action) -> Result<(), GameError> {
        if self.state != GameState::Playing {
            return Err(GameError::InvalidGameState);
        }

        match action {
            Action::Reveal => self.reveal(pos),
            Action::Flag => self.toggle_flag(pos),
        }
    }

    fn reveal(&mut self, pos: Position) -> Result<(), GameError> {
        match self.board.get_cell(pos)? {
            Cell::Revealed(_) => return Err(GameError::AlreadyRevealed(pos)),
            // Marked cells are protected from reveal, as in classic rules.
            Cell::Flagged(_) | Cell::Questioned(_) => return Ok(()),
            Cell::Hidden(true) => {
                self.board.cells.insert(pos, Cell::Revealed(0));
                self.state = GameState::Lost;
                return Ok(());
            }
            Cell::Hidden(false) => {
                let mut to_reveal = HashSet::new();
                to_reveal.insert(pos);

                // Flood fill: zero-hint cells pull their whole neighborhood
                // into the next batch.
                while !to_reveal.is_empty() {
                    let mut next_batch = HashSet::new();

                    for &current in &to_reveal {
                        if let Cell::Hidden(false) = self.board.get_cell(current)? {
                            let adjacent_mines = self.board.count_adjacent_mines(current);
                            self.revealed_count += 1;
                            self.board
                                .cells
                                .insert(current, Cell::Revealed(adjacent_mines));

                            if adjacent_mines == 0 {
                                for neighbor in self.board.neighbors(current) {
                                    if let Ok(Cell::Hidden(false)) = self.board.get_cell(neighbor)
                                    {
                                        next_batch.insert(neighbor);
                                    }
                                }
                            }
                        }
                    }

                    to_reveal = next_batch;
                }
            }
        }

        self.check_win_condition();
        Ok(())
    }

    /// Cycles the flag marker: none -> flagged -> questioned -> none.
    fn toggle_flag(&mut self, pos: Position) -> Result<(), GameError> {
        let next = match self.board.get_cell(pos)? {
            Cell::Hidden(mine) => Cell::Flagged(mine),
            Cell::Flagged(mine) => Cell::Questioned(mine),
            Cell::Questioned(mine) => Cell::Hidden(mine),
            Cell::Revealed(_) => return Ok(()),
        };
        self.board.cells.insert(pos, next);
        Ok(())
    }

    /// Resets any flag or question marker back to plain hidden.
    pub fn clear_flag(&mut self, pos: Position) -> Result<(), GameError> {
        if let Cell::Flagged(mine) | Cell::Questioned(mine) = self.board.get_cell(pos)? {
            self.board.cells.insert(pos, Cell::Hidden(mine));
        }
        Ok(())
    }

    fn check_win_condition(&mut self) {
        let (width, height) = self.board.dimensions();
        let total_non_mine_cells = (width * height) - self.board.mines_count();

        if self.revealed_count == total_non_mine_cells {
            self.state = GameState::Won;
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn revealed_count(&self) -> u32 {
        self.revealed_count
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.board.dimensions()
    }

    pub fn mines_count(&self) -> u32 {
        self.board.mines_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corner_mine_game() -> Game {
        Game::with_board(Board::with_mines(4, 4, [Position::new(0, 0)]).unwrap())
    }

    #[test]
    fn test_reveal_floods_from_zero_hint() {
        let mut game = corner_mine_game();
        game.perform_action(Position::new(3, 3), Action::Reveal).unwrap();

        // Everything except the mine is connected through zero-hint cells.
        assert_eq!(game.revealed_count(), 15);
        assert_eq!(game.state(), GameState::Won);
        assert_eq!(
            game.get_cell(Position::new(1, 1)).unwrap(),
            Cell::Revealed(1)
        );
    }

    #[test]
    fn test_reveal_mine_loses() {
        let mut game = corner_mine_game();
        game.perform_action(Position::new(0, 0), Action::Reveal).unwrap();
        assert_eq!(game.state(), GameState::Lost);
    }

    #[test]
    fn test_flag_cycle() {
        let mut game = corner_mine_game();
        let pos = Position::new(0, 0);

        game.perform_action(pos, Action::Flag).unwrap();
        assert_eq!(game.get_cell(pos).unwrap(), Cell::Flagged(true));

        game.perform_action(pos, Action::Flag).unwrap();
        assert_eq!(game.get_cell(pos).unwrap(), Cell::Questioned(true));

        game.perform_action(pos, Action::Flag).unwrap();
        assert_eq!(game.get_cell(pos).unwrap(), Cell::Hidden(true));
    }

    #[test]
    fn test_clear_flag_resets_marker() {
        let mut game = corner_mine_game();
        let pos = Position::new(0, 0);

        game.perform_action(pos, Action::Flag).unwrap();
        game.clear_flag(pos).unwrap();
        assert_eq!(game.get_cell(pos).unwrap(), Cell::Hidden(true));

        // Clearing an unmarked cell is a no-op.
        game.clear_flag(Position::new(1, 1)).unwrap();
        assert_eq!(game.get_cell(Position::new(1, 1)).unwrap(), Cell::Hidden(false));
    }

    #[test]
    fn test_reveal_skips_marked_cells() {
        let mut game = corner_mine_game();
        let pos = Position::new(0, 0);

        game.perform_action(pos, Action::Flag).unwrap();
        game.perform_action(pos, Action::Reveal).unwrap();

        assert_eq!(game.get_cell(pos).unwrap(), Cell::Flagged(true));
        assert_eq!(game.state(), GameState::Playing);
    }

    #[test]
    fn test_reveal_twice_is_an_error() {
        let board =
            Board::with_mines(4, 4, [Position::new(0, 0), Position::new(3, 0)]).unwrap();
        let mut game = Game::with_board(board);
        let pos = Position::new(3, 3);

        game.perform_action(pos, Action::Reveal).unwrap();
        assert_eq!(game.state(), GameState::Playing);
        assert!(matches!(
            game.perform_action(pos, Action::Reveal),
            Err(GameError::AlreadyRevealed(_))
        ));
    }

    #[test]
    fn test_no_actions_after_loss() {
        let mut game = corner_mine_game();
        game.perform_action(Position::new(0, 0), Action::Reveal).unwrap();
        assert!(matches!(
            game.perform_action(Position::new(1, 1), Action::Reveal),
            Err(GameError::InvalidGameState)
        ));
    }
}
