//! Static evaluation of a position
//!
//! Every column, row and diagonal long enough to hold four is scanned with
//! the same run-length scorer. A run that can still grow to four through the
//! empty cells directly around it is worth `10^(len-1)` to its owner, so one
//! open three outweighs any pile of open twos. A run that cannot is worth
//! nothing, and a completed four short-circuits the whole evaluation.

use crate::{
    board::{Board, Color},
    score::*,
    CONNECT, MAX_SIZE,
};

/// A straight line of cells across the board
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Line {
    pub start: (usize, usize),
    pub step: (isize, isize),
    pub len: usize,
}

impl Line {
    /// Column `column`, bottom to top
    pub fn column(size: usize, column: usize) -> Self {
        Self {
            start: (0, column),
            step: (1, 0),
            len: size,
        }
    }

    /// Row `row`, left to right
    pub fn row(size: usize, row: usize) -> Self {
        Self {
            start: (row, 0),
            step: (0, 1),
            len: size,
        }
    }

    /// All diagonals of at least four cells, rising to the right then
    /// falling to the right
    pub fn diagonals(size: usize) -> impl Iterator<Item = Line> {
        // no diagonal fits on a board narrower than four
        let span = (size + 1).saturating_sub(CONNECT);

        let rising = (0..span)
            .map(move |column| (0, column))
            .chain((1..span).map(|row| (row, 0)))
            .map(move |(row, column)| Line {
                start: (row, column),
                step: (1, 1),
                len: size - row.max(column),
            });

        let falling = (CONNECT - 1..size)
            .map(|column| (0, column))
            .chain((1..span).map(move |row| (row, size - 1)))
            .map(move |(row, column)| Line {
                start: (row, column),
                step: (1, -1),
                len: (size - row).min(column + 1),
            });

        rising.chain(falling)
    }

    /// The (row, column) coordinates along the line
    pub fn cells(self) -> impl Iterator<Item = (usize, usize)> {
        let (row, column) = self.start;
        let (d_row, d_column) = self.step;
        (0..self.len as isize).map(move |i| {
            (
                (row as isize + i * d_row) as usize,
                (column as isize + i * d_column) as usize,
            )
        })
    }
}

/// The outcome of scoring a single line
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum LineValue {
    /// Sum of the live runs, from the evaluating color's perspective
    Open(Score),
    /// The line holds four in a row for this color
    Won(Color),
}

/// Scores a line of cells from the perspective of `color`
pub fn score_line(cells: &[Option<Color>], color: Color) -> LineValue {
    let mut total = 0;
    let mut idx = 0;

    while idx < cells.len() {
        let owner = match cells[idx] {
            Some(owner) => owner,
            None => {
                idx += 1;
                continue;
            }
        };

        let start = idx;
        while idx < cells.len() && cells[idx] == Some(owner) {
            idx += 1;
        }
        let run = idx - start;
        if run >= CONNECT {
            return LineValue::Won(owner);
        }

        let before = cells[..start].iter().rev().take_while(|c| c.is_none()).count();
        let after = cells[idx..].iter().take_while(|c| c.is_none()).count();
        if run + before + after >= CONNECT {
            total += owner.sign() * color.sign() * 10i32.pow(run as u32 - 1);
        }
    }
    LineValue::Open(total)
}

fn gather<'a, B: Board>(board: &B, line: Line, buffer: &'a mut [Option<Color>; MAX_SIZE]) -> &'a [Option<Color>] {
    for (slot, (row, column)) in buffer.iter_mut().zip(line.cells()) {
        *slot = board.color_at(row, column);
    }
    &buffer[..line.len]
}

/// Estimates how favourable `board` is for `color`
///
/// Positive scores favour `color`. A completed four on the board returns
/// the [`WIN`] sentinel signed toward its owner; any other position stays
/// within `[-HEURISTIC_MAX, HEURISTIC_MAX]`. Swapping `color` negates the
/// result.
///
/// # Panics
/// If `board.size()` exceeds `MAX_SIZE`.
pub fn evaluate<B: Board>(board: &B, color: Color) -> Score {
    let size = board.size();
    assert!(size <= MAX_SIZE, "board size {} exceeds {}", size, MAX_SIZE);
    let mut buffer = [None; MAX_SIZE];
    let mut total: Score = 0;

    for idx in (0..size).rev() {
        match score_line(gather(board, Line::column(size, idx), &mut buffer), color) {
            LineValue::Won(owner) => return sentinel(owner, color),
            LineValue::Open(score) => total += score,
        }
        // weight rows by their height, lower rows fill first
        match score_line(gather(board, Line::row(size, idx), &mut buffer), color) {
            LineValue::Won(owner) => return sentinel(owner, color),
            LineValue::Open(score) => total += 10 * score / (idx as Score + 1),
        }
    }

    // keeps rows and columns alone from leaving the heuristic band
    if total > HEURISTIC_MAX {
        return WIN;
    }
    if total < -HEURISTIC_MAX {
        return -WIN;
    }

    for line in Line::diagonals(size) {
        match score_line(gather(board, line, &mut buffer), color) {
            LineValue::Won(owner) => return sentinel(owner, color),
            LineValue::Open(score) => total += score,
        }
    }

    total.clamp(-HEURISTIC_MAX, HEURISTIC_MAX)
}
