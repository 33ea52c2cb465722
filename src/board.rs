use crate::{GameError, Position};
use rand::Rng;
use std::collections::HashMap;

/// A single cell on the minefield.
///
/// The bool payload is the ground-truth mine placement, carried through the
/// flag cycle so marking a cell never loses it. `Revealed` stores the
/// adjacent-mine hint instead; a revealed cell can no longer be a live mine
/// in a running game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Hidden(bool),
    Revealed(u8),
    Flagged(bool),
    Questioned(bool),
}

impl Cell {
    pub fn is_mine(self) -> bool {
        matches!(
            self,
            Cell::Hidden(true) | Cell::Flagged(true) | Cell::Questioned(true)
        )
    }

    pub fn is_revealed(self) -> bool {
        matches!(self, Cell::Revealed(_))
    }
}

#[derive(Debug, Clone)]
pub struct Board {
    pub cells: HashMap<Position, Cell>,
    width: u32,
    height: u32,
    mines_count: u32,
}

impl Board {
    /// Creates a board with `mines_count` mines placed uniformly at random.
    pub fn new(width: u32, height: u32, mines_count: u32) -> Result<Self, GameError> {
        if mines_count >= width * height {
            return Err(GameError::TooManyMines {
                width,
                height,
                mines: mines_count,
            });
        }

        let mut board = Board {
            cells: HashMap::new(),
            width,
            height,
            mines_count,
        };
        board.initialize_cells();
        board.place_mines();
        Ok(board)
    }

    /// Creates a board with mines at fixed positions, for scripted games.
    pub fn with_mines<I>(width: u32, height: u32, mines: I) -> Result<Self, GameError>
    where
        I: IntoIterator<Item = Position>,
    {
        let mut board = Board {
            cells: HashMap::new(),
            width,
            height,
            mines_count: 0,
        };
        board.initialize_cells();

        for pos in mines {
            if !board.is_within_bounds(pos) {
                return Err(GameError::OutOfBounds(pos));
            }
            if let Some(Cell::Hidden(false)) = board.cells.get(&pos) {
                board.cells.insert(pos, Cell::Hidden(true));
                board.mines_count += 1;
            }
        }

        if board.mines_count >= width * height {
            return Err(GameError::TooManyMines {
                width,
                height,
                mines: board.mines_count,
            });
        }
        Ok(board)
    }

    fn initialize_cells(&mut self) {
        for y in 0..self.height {
            for x in 0..self.width {
                self.cells
                    .insert(Position::new(x as i32, y as i32), Cell::Hidden(false));
            }
        }
    }

    fn place_mines(&mut self) {
        let mut rng = rand::thread_rng();
        let mut mines_placed = 0;

        while mines_placed < self.mines_count {
            let x = rng.gen_range(0..self.width) as i32;
            let y = rng.gen_range(0..self.height) as i32;
            let pos = Position::new(x, y);

            if let Some(Cell::Hidden(false)) = self.cells.get(&pos) {
                self.cells.insert(pos, Cell::Hidden(true));
                mines_placed += 1;
            }
        }
    }

    pub fn is_within_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.width as i32 && pos.y >= 0 && pos.y < self.height as i32
    }

    pub fn get_cell(&self, pos: Position) -> Result<Cell, GameError> {
        self.cells
            .get(&pos)
            .copied()
            .ok_or(GameError::OutOfBounds(pos))
    }

    /// In-bounds adjacent positions, ≤8 of them.
    pub fn neighbors(&self, pos: Position) -> Vec<Position> {
        pos.neighbors()
            .filter(|p| self.is_within_bounds(*p))
            .collect()
    }

    pub fn count_adjacent_mines(&self, pos: Position) -> u8 {
        pos.neighbors()
            .filter_map(|p| self.cells.get(&p))
            .filter(|cell| cell.is_mine())
            .count() as u8
    }

    pub fn revealed_count(&self) -> u32 {
        self.cells.values().filter(|c| c.is_revealed()).count() as u32
    }

    /// Row-major traversal of every position on the board.
    pub fn iter_positions(&self) -> BoardIterator {
        BoardIterator {
            width: self.width,
            height: self.height,
            next: 0,
        }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn mines_count(&self) -> u32 {
        self.mines_count
    }
}

#[derive(Debug, Clone)]
pub struct BoardIterator {
    width: u32,
    height: u32,
    next: u32,
}

impl Iterator for BoardIterator {
    type Item = Position;

    fn next(&mut self) -> Option<Position> {
        if self.next >= self.width * self.height {
            return None;
        }
        let pos = Position::new(
            (self.next % self.width) as i32,
            (self.next / self.width) as i32,
        );
        self.next += 1;
        Some(pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_board_places_requested_mines() {
        let board = Board::new(8, 8, 10).unwrap();
        let mines = board.cells.values().filter(|c| c.is_mine()).count();
        assert_eq!(mines, 10);
        assert_eq!(board.cells.len(), 64);
    }

    #[test]
    fn test_too_many_mines_rejected() {
        assert!(matches!(
            Board::new(3, 3, 9),
            Err(GameError::TooManyMines { .. })
        ));
    }

    #[test]
    fn test_scripted_mines_land_where_asked() {
        let layout = [Position::new(0, 0), Position::new(2, 1)];
        let board = Board::with_mines(3, 2, layout).unwrap();

        assert_eq!(board.mines_count(), 2);
        for pos in layout {
            assert!(board.get_cell(pos).unwrap().is_mine());
        }
        assert!(!board.get_cell(Position::new(1, 1)).unwrap().is_mine());
    }

    #[test]
    fn test_scripted_mines_out_of_bounds() {
        let result = Board::with_mines(3, 3, [Position::new(3, 0)]);
        assert!(matches!(result, Err(GameError::OutOfBounds(_))));
    }

    #[test]
    fn test_adjacent_mine_counts() {
        let board = Board::with_mines(3, 3, [Position::new(0, 0), Position::new(1, 0)]).unwrap();

        assert_eq!(board.count_adjacent_mines(Position::new(0, 1)), 2);
        assert_eq!(board.count_adjacent_mines(Position::new(2, 1)), 1);
        assert_eq!(board.count_adjacent_mines(Position::new(2, 2)), 0);
    }

    #[test]
    fn test_neighbors_clipped_at_edges() {
        let board = Board::new(3, 3, 1).unwrap();
        assert_eq!(board.neighbors(Position::new(0, 0)).len(), 3);
        assert_eq!(board.neighbors(Position::new(1, 0)).len(), 5);
        assert_eq!(board.neighbors(Position::new(1, 1)).len(), 8);
    }

    #[test]
    fn test_iter_positions_row_major() {
        let board = Board::new(3, 2, 1).unwrap();
        let positions: Vec<Position> = board.iter_positions().collect();

        assert_eq!(positions.len(), 6);
        assert_eq!(positions[0], Position::new(0, 0));
        assert_eq!(positions[1], Position::new(1, 0));
        assert_eq!(positions[3], Position::new(0, 1));
        assert_eq!(positions[5], Position::new(2, 1));
    }
}
