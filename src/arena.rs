//! Batches of engine-vs-engine games from random openings
//!
//! Each game owns its engines and board, so games run side by side on the
//! rayon pool while every search stays single threaded.

use anyhow::{Context, Result};
use indicatif::*;
use log::debug;
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use rayon::prelude::*;

use std::time::{Duration, Instant};

use crate::{
    board::Board,
    engine::Engine,
    game::{Game, GameState},
};

#[derive(Clone, Debug)]
pub struct ArenaConfig {
    pub size: usize,
    /// Search depths of the first and second engine
    pub depths: (u32, u32),
    pub games: usize,
    /// Random plies played before the engines take over
    pub opening_plies: usize,
    pub seed: u64,
    pub show_progress: bool,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            size: crate::DEFAULT_SIZE,
            depths: (crate::DEFAULT_DEPTH, crate::DEFAULT_DEPTH),
            games: 20,
            opening_plies: 2,
            seed: 0,
            show_progress: true,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ArenaReport {
    pub first_wins: usize,
    pub second_wins: usize,
    pub draws: usize,
    /// Positions scored by the evaluator, both engines, all games
    pub evaluations: usize,
    pub elapsed: Duration,
}

impl ArenaReport {
    pub fn games(&self) -> usize {
        self.first_wins + self.second_wins + self.draws
    }
}

#[derive(Copy, Clone, Debug)]
enum Outcome {
    FirstWin,
    SecondWin,
    Draw,
}

/// Plays random legal moves that neither win nor fill the board
pub fn random_opening(size: usize, plies: usize, rng: &mut StdRng) -> Result<Game> {
    let mut game = Game::new(size)?;
    for _ in 0..plies {
        let color = game.to_move();
        let quiet: Vec<usize> = game
            .board()
            .playable_columns()
            .into_iter()
            .filter(|&column| {
                let mut board = game.board().clone();
                board.drop_token(column, color);
                !board.completes_four(column, color) && !board.is_full()
            })
            .collect();
        match quiet.choose(rng) {
            Some(&column) => {
                game.play_checked(column + 1)?;
            }
            None => break,
        }
    }
    Ok(game)
}

fn play_game(config: &ArenaConfig, index: usize) -> Result<(Outcome, usize)> {
    let mut rng = StdRng::seed_from_u64(config.seed.wrapping_add(index as u64));
    let mut game = random_opening(config.size, config.opening_plies, &mut rng)?;

    let mut first = Engine::new(config.depths.0);
    let mut second = Engine::new(config.depths.1);

    // swap sides every game
    let first_color = if index % 2 == 0 { game.to_move() } else { -game.to_move() };
    let result = if first_color == game.to_move() {
        game.play_out(&mut first, &mut second)
    } else {
        game.play_out(&mut second, &mut first)
    };
    let state = result.with_context(|| format!("game {} ({}) failed", index, game.record))?;

    let outcome = match state {
        GameState::Won(color) if color == first_color => Outcome::FirstWin,
        GameState::Won(_) => Outcome::SecondWin,
        _ => Outcome::Draw,
    };
    debug!("game {}: {} -> {:?}", index, game.record, outcome);

    Ok((outcome, first.total_evaluations + second.total_evaluations))
}

/// Plays `config.games` games between two engines
pub fn run(config: &ArenaConfig) -> Result<ArenaReport> {
    let start = Instant::now();

    let progress = if config.show_progress {
        ProgressBar::new(config.games as u64)
    } else {
        ProgressBar::hidden()
    };
    progress.set_style(
        ProgressStyle::default_bar()
            .template("Playing games: {bar:40.cyan/blue} {pos}/{len} ~{eta} remaining")
            .progress_chars("█▓▒░  "),
    );

    let results = (0..config.games)
        .into_par_iter()
        .map(|index| {
            let result = play_game(config, index);
            progress.inc(1);
            result
        })
        .collect::<Result<Vec<_>>>()?;
    progress.finish();

    let mut report = ArenaReport::default();
    for (outcome, evaluations) in results {
        match outcome {
            Outcome::FirstWin => report.first_wins += 1,
            Outcome::SecondWin => report.second_wins += 1,
            Outcome::Draw => report.draws += 1,
        }
        report.evaluations += evaluations;
    }
    report.elapsed = start.elapsed();
    Ok(report)
}

