//! Errors raised by the board, the game driver and the engine

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("board size {size} is out of range ({min}-{max})")]
    SizeOutOfRange { size: usize, min: usize, max: usize },

    #[error("Invalid move, column {column} out of range. Columns must be between 1 and {size}")]
    ColumnOutOfRange { column: usize, size: usize },

    #[error("Invalid move, column {column} full")]
    ColumnFull { column: usize },

    #[error("Invalid position, game is over")]
    GameOver,

    #[error("no legal moves remain")]
    NoLegalMoves,

    #[error("could not parse '{0}' as a valid move")]
    InvalidMove(char),

    #[error("could not parse '{cell}' as a cell in row {row}")]
    InvalidCell { cell: char, row: usize },

    #[error("expected {size} rows of {size} cells")]
    RaggedRows { size: usize },

    #[error("token at row {row}, column {column} is floating above an empty cell")]
    FloatingToken { row: usize, column: usize },
}
