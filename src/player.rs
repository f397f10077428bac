//! Anything that can pick a column for the game driver

use crate::{board::Color, engine::Engine, error::GameError, grid::Grid};

pub trait Player {
    fn name(&self) -> &str;

    /// Picks the column to play for `color` on `board`
    fn next_move(&mut self, board: &Grid, color: Color) -> Result<usize, GameError>;
}

impl Player for Engine {
    fn name(&self) -> &str {
        Engine::name(self)
    }

    fn next_move(&mut self, board: &Grid, color: Color) -> Result<usize, GameError> {
        self.choose_move(board, color)
    }
}
