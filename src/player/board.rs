use crate::{BoardIterator, Cell, Game, Position};

/// What the player is allowed to see in a cell. Mine placement stays with
/// the `Game`; deduction only ever reasons from hints and markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerCell {
    Covered,
    Revealed(u8),
    Flagged,
    Questioned,
}

/// Read-only view of a game for the deduction pass.
#[derive(Debug)]
pub struct PlayerBoard<'a> {
    game: &'a Game,
}

impl<'a> PlayerBoard<'a> {
    pub fn new(game: &'a Game) -> Self {
        Self { game }
    }

    pub fn get(&self, pos: Position) -> Option<PlayerCell> {
        self.game.get_cell(pos).ok().map(|cell| match cell {
            Cell::Hidden(_) => PlayerCell::Covered,
            Cell::Revealed(n) => PlayerCell::Revealed(n),
            Cell::Flagged(_) => PlayerCell::Flagged,
            Cell::Questioned(_) => PlayerCell::Questioned,
        })
    }

    /// The numeric hint of a revealed cell, `None` otherwise.
    pub fn hint(&self, pos: Position) -> Option<u8> {
        match self.get(pos) {
            Some(PlayerCell::Revealed(n)) => Some(n),
            _ => None,
        }
    }

    pub fn is_flagged(&self, pos: Position) -> bool {
        matches!(self.get(pos), Some(PlayerCell::Flagged))
    }

    /// Adjacent cells that are not yet revealed, whatever their marker.
    pub fn hidden_neighbors(&self, pos: Position) -> Vec<Position> {
        self.game
            .neighbors(pos)
            .into_iter()
            .filter(|&p| !matches!(self.get(p), Some(PlayerCell::Revealed(_))))
            .collect()
    }

    /// Revealed cells with a positive hint and at least one hidden
    /// neighbor, in row-major order so deduction output is deterministic.
    pub fn sensors(&self) -> Vec<Position> {
        self.iter_positions()
            .filter(|&pos| {
                matches!(self.get(pos), Some(PlayerCell::Revealed(n)) if n > 0)
                    && !self.hidden_neighbors(pos).is_empty()
            })
            .collect()
    }

    pub fn iter_positions(&self) -> BoardIterator {
        self.game.iter_positions()
    }

    pub fn revealed_count(&self) -> u32 {
        self.game.revealed_count()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.game.dimensions()
    }
}
