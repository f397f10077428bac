//! The authoritative game state and the turn driver

use log::debug;

use crate::{
    board::{Board, Color},
    error::GameError,
    grid::Grid,
    player::Player,
};

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum GameState {
    Playing,
    Won(Color),
    Draw,
}

#[derive(Clone, Debug)]
pub struct Game {
    board: Grid,
    to_move: Color,
    /// The moves played so far as 1-indexed base-36 column digits
    pub record: String,
    state: GameState,
}

impl Game {
    /// Starts an empty game, player one to move
    pub fn new(size: usize) -> Result<Self, GameError> {
        Ok(Self {
            board: Grid::new(size)?,
            to_move: Color::PlayerOne,
            record: String::new(),
            state: GameState::Playing,
        })
    }

    /// Replays a move string such as `"4453"`
    ///
    /// Each character is a 1-indexed column in base 36 (`a` is column 10).
    /// The string must not end or continue past a finished game.
    pub fn from_moves<S: AsRef<str>>(size: usize, moves: S) -> Result<Self, GameError> {
        let mut game = Self::new(size)?;

        for column_char in moves.as_ref().chars() {
            if game.state != GameState::Playing {
                return Err(GameError::GameOver);
            }
            match column_char.to_digit(36) {
                Some(column) if column >= 1 => {
                    game.play_checked(column as usize)?;
                }
                _ => return Err(GameError::InvalidMove(column_char)),
            }
        }
        if game.state != GameState::Playing {
            return Err(GameError::GameOver);
        }
        Ok(game)
    }

    pub fn board(&self) -> &Grid {
        &self.board
    }

    pub fn to_move(&self) -> Color {
        self.to_move
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    /// Plays a 1-indexed column for the side to move
    pub fn play_checked(&mut self, column_one_indexed: usize) -> Result<GameState, GameError> {
        if self.state != GameState::Playing {
            return Err(GameError::GameOver);
        }
        let size = self.board.size();
        if column_one_indexed < 1 || column_one_indexed > size {
            return Err(GameError::ColumnOutOfRange {
                column: column_one_indexed,
                size,
            });
        }
        let column = column_one_indexed - 1;
        if !self.board.can_play(column) {
            return Err(GameError::ColumnFull {
                column: column_one_indexed,
            });
        }

        self.board.drop_token(column, self.to_move);
        self.record
            .push(std::char::from_digit(column_one_indexed as u32, 36).unwrap_or('?'));

        self.state = if self.board.completes_four(column, self.to_move) {
            GameState::Won(self.to_move)
        } else if self.board.is_full() {
            GameState::Draw
        } else {
            GameState::Playing
        };
        self.to_move = -self.to_move;

        Ok(self.state)
    }

    /// Lets two players take turns from the current position until the game ends
    ///
    /// `first` plays whichever color is to move now.
    pub fn play_out<P, Q>(&mut self, first: &mut P, second: &mut Q) -> Result<GameState, GameError>
    where
        P: Player + ?Sized,
        Q: Player + ?Sized,
    {
        let first_color = self.to_move;
        while self.state == GameState::Playing {
            let column = if self.to_move == first_color {
                first.next_move(&self.board, self.to_move)?
            } else {
                second.next_move(&self.board, self.to_move)?
            };
            debug!("{} plays column {}", self.to_move, column + 1);
            self.play_checked(column + 1)?;
        }
        Ok(self.state)
    }
}
