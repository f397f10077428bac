//! A minimax agent for playing 'Connect 4' style games on an N×N board
//!
//! The agent runs a depth-bounded minimax search with alpha-beta pruning,
//! scoring the frontier with a static evaluation of every row, column
//! and diagonal for partially built four-in-a-row threats.
//!
//! # Basic Usage
//!
//! ```
//! use c4_minimax::{engine::Engine, game::Game};
//!
//!# use std::error::Error;
//!# fn main() -> Result<(), Box<dyn Error>> {
//! // player one has three stacked in column 1 and can win right away
//! let game = Game::from_moves(7, "121212")?;
//! let mut engine = Engine::new(4);
//! let column = engine.choose_move(game.board(), game.to_move())?;
//!
//! assert_eq!(column, 0);
//!# Ok(())
//!# }
//! ```

use static_assertions::*;
pub use anyhow;

pub mod error;

pub mod score;

pub mod board;

pub mod grid;

pub mod evaluator;

pub mod engine;

pub mod player;

pub mod game;

pub mod arena;

mod test;

pub use board::{Board, Color};
pub use engine::{Engine, SearchOutcome};
pub use error::GameError;
pub use grid::Grid;

/// The length of a line needed to win
pub const CONNECT: usize = 4;

/// The smallest supported board side
pub const MIN_SIZE: usize = CONNECT;

/// The largest supported board side
pub const MAX_SIZE: usize = 16;

/// The board side used when none is given
pub const DEFAULT_SIZE: usize = 8;

/// The search depth used when none is given
pub const DEFAULT_DEPTH: u32 = 5;

/// The longest possible game, in plies
pub const MAX_PLY: usize = MAX_SIZE * MAX_SIZE;

// base-36 move strings can only address 35 columns
const_assert!(MAX_SIZE <= 35);
const_assert!(MIN_SIZE <= DEFAULT_SIZE && DEFAULT_SIZE <= MAX_SIZE);
