//! The board interface consumed by the engine

use std::fmt;
use std::ops::Neg;

/// One of the two players, as a signed unit value
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum Color {
    PlayerOne,
    PlayerTwo,
}

impl Color {
    /// `1` for player one, `-1` for player two
    pub const fn sign(self) -> i32 {
        match self {
            Color::PlayerOne => 1,
            Color::PlayerTwo => -1,
        }
    }

    /// The symbol used for this color in textual boards
    pub const fn symbol(self) -> char {
        match self {
            Color::PlayerOne => 'X',
            Color::PlayerTwo => 'O',
        }
    }
}

impl Neg for Color {
    type Output = Color;

    fn neg(self) -> Self::Output {
        match self {
            Color::PlayerOne => Color::PlayerTwo,
            Color::PlayerTwo => Color::PlayerOne,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Color::PlayerOne => write!(f, "Player 1"),
            Color::PlayerTwo => write!(f, "Player 2"),
        }
    }
}

/// A square, gravity filled game board
///
/// Rows are counted from the bottom: row 0 is where a token dropped into an
/// empty column lands. A cell above an empty cell in the same column is
/// always empty.
pub trait Board: Clone {
    /// The number of rows and columns
    ///
    /// Must lie in `MIN_SIZE..=MAX_SIZE`. [`Engine::search`] rejects any
    /// other size with [`GameError::SizeOutOfRange`], and [`evaluate`]
    /// panics on boards wider than `MAX_SIZE`.
    ///
    /// [`Engine::search`]: crate::Engine::search
    /// [`GameError::SizeOutOfRange`]: crate::GameError::SizeOutOfRange
    /// [`evaluate`]: crate::evaluator::evaluate
    fn size(&self) -> usize;

    /// The token in a cell, `None` if empty
    fn color_at(&self, row: usize, column: usize) -> Option<Color>;

    /// Whether `column` exists and is not full
    fn can_play(&self, column: usize) -> bool;

    /// Places a token in the lowest empty cell of `column`
    ///
    /// The column must be playable.
    fn drop_token(&mut self, column: usize, color: Color);

    /// Removes the topmost token of `column`, exactly undoing the last
    /// `drop_token` on it
    fn undo(&mut self, column: usize);

    /// Whether the topmost token of `column` belongs to `color` and is part
    /// of four or more in a line
    fn completes_four(&self, column: usize, color: Color) -> bool;

    /// The legal columns in ascending order
    fn playable_columns(&self) -> Vec<usize> {
        (0..self.size()).filter(|&c| self.can_play(c)).collect()
    }
}
