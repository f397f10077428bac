use anyhow::Result;
use crossterm::{
    style::{style, Attribute, Color as TermColor, PrintStyledContent},
    QueueableCommand,
};

use std::fmt;
use std::io::{stdout, Write};

use crate::{board::*, error::GameError, CONNECT, MAX_SIZE, MIN_SIZE};

/// An N×N board backed by a flat cell array
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Grid {
    size: usize,
    cells: Vec<Option<Color>>, // cells are stored left-to-right, bottom-to-top
    heights: Vec<usize>,
}

impl Grid {
    pub fn new(size: usize) -> Result<Self, GameError> {
        if !(MIN_SIZE..=MAX_SIZE).contains(&size) {
            return Err(GameError::SizeOutOfRange {
                size,
                min: MIN_SIZE,
                max: MAX_SIZE,
            });
        }
        Ok(Self {
            size,
            cells: vec![None; size * size],
            heights: vec![0; size],
        })
    }

    /// Builds a board from rows of text, top row first
    ///
    /// `X` is a player one token, `O` a player two token and `.` an empty
    /// cell. Whitespace is ignored.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self, GameError> {
        let mut grid = Self::new(rows.len())?;
        let size = grid.size;

        for (idx, text) in rows.iter().enumerate() {
            let row = size - 1 - idx;
            let cells: Vec<char> = text
                .as_ref()
                .chars()
                .filter(|c| !c.is_whitespace())
                .collect();
            if cells.len() != size {
                return Err(GameError::RaggedRows { size });
            }
            for (column, &cell) in cells.iter().enumerate() {
                grid.cells[column + size * row] = match cell {
                    'X' | 'x' => Some(Color::PlayerOne),
                    'O' | 'o' => Some(Color::PlayerTwo),
                    '.' => None,
                    _ => return Err(GameError::InvalidCell { cell, row }),
                };
            }
        }

        // recount heights, rejecting tokens that hang over a hole
        for column in 0..size {
            let height = (0..size)
                .take_while(|&row| grid.color_at(row, column).is_some())
                .count();
            if let Some(row) = (height..size).find(|&row| grid.color_at(row, column).is_some()) {
                return Err(GameError::FloatingToken { row, column });
            }
            grid.heights[column] = height;
        }
        Ok(grid)
    }

    pub fn is_full(&self) -> bool {
        self.heights.iter().all(|&h| h == self.size)
    }

    pub fn display(&self) -> Result<()> {
        let mut stdout = stdout();

        let cols: String = (1..=self.size)
            .map(|x| std::char::from_digit(x as u32, 36).unwrap_or('?'))
            .collect();
        stdout.queue(PrintStyledContent(style(cols + "\n")))?;

        for row in (0..self.size).rev() {
            for column in 0..self.size {
                stdout.queue(PrintStyledContent(
                    style("O")
                        .attribute(Attribute::Bold)
                        .on(TermColor::DarkBlue)
                        .with(match self.color_at(row, column) {
                            Some(Color::PlayerOne) => TermColor::Red,
                            Some(Color::PlayerTwo) => TermColor::Yellow,
                            None => TermColor::DarkBlue,
                        }),
                ))?;
            }
            stdout.queue(PrintStyledContent(style("\n")))?;
        }
        stdout.flush()?;
        Ok(())
    }

    // length of the run through (row, column) along (d_row, d_column), both ways
    fn run_through(&self, row: usize, column: usize, d_row: isize, d_column: isize, color: Color) -> usize {
        let mut run = 1;
        for dir in [-1isize, 1].iter() {
            let mut r = row as isize + dir * d_row;
            let mut c = column as isize + dir * d_column;
            loop {
                if r < 0
                    || c < 0
                    || r >= self.size as isize
                    || c >= self.size as isize
                    || self.cells[c as usize + self.size * r as usize] != Some(color)
                {
                    break;
                }
                r += dir * d_row;
                c += dir * d_column;
                run += 1;
            }
        }
        run
    }
}

impl Board for Grid {
    fn size(&self) -> usize {
        self.size
    }

    fn color_at(&self, row: usize, column: usize) -> Option<Color> {
        self.cells[column + self.size * row]
    }

    fn can_play(&self, column: usize) -> bool {
        column < self.size && self.heights[column] < self.size
    }

    fn drop_token(&mut self, column: usize, color: Color) {
        debug_assert!(self.can_play(column), "column {} is not playable", column);
        self.cells[column + self.size * self.heights[column]] = Some(color);
        self.heights[column] += 1;
    }

    fn undo(&mut self, column: usize) {
        debug_assert!(self.heights[column] > 0, "column {} is empty", column);
        self.heights[column] -= 1;
        self.cells[column + self.size * self.heights[column]] = None;
    }

    fn completes_four(&self, column: usize, color: Color) -> bool {
        let height = self.heights[column];
        if height == 0 {
            return false;
        }
        let row = height - 1;
        if self.color_at(row, column) != Some(color) {
            return false;
        }

        // vertical, horizontal and both diagonals
        [(1, 0), (0, 1), (1, 1), (1, -1)]
            .iter()
            .any(|&(d_row, d_column)| self.run_through(row, column, d_row, d_column, color) >= CONNECT)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in (0..self.size).rev() {
            for column in 0..self.size {
                let symbol = self.color_at(row, column).map_or('.', Color::symbol);
                write!(f, "{}", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
