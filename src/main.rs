use anyhow::Result;
use clap::{Parser, Subcommand};

use std::cmp::Ordering;
use std::io::{stdin, stdout, Write};

use c4_minimax::{
    arena::{self, ArenaConfig},
    game::{Game, GameState},
    score::{is_proven, plies_to_result},
    *,
};

#[derive(Parser)]
#[command(name = "c4_minimax", about = "Play four-in-a-row against a minimax agent")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Play an interactive game
    Play {
        /// Rows and columns of the board
        #[arg(long, default_value_t = DEFAULT_SIZE)]
        size: usize,

        /// Search depth of the AI players, in plies
        #[arg(long, default_value_t = DEFAULT_DEPTH)]
        depth: u32,

        /// Player 1 is AI controlled
        #[arg(long)]
        ai_one: bool,

        /// Player 2 is AI controlled
        #[arg(long)]
        ai_two: bool,

        /// Log search statistics for every AI move
        #[arg(long)]
        stats: bool,
    },
    /// Play a batch of AI-vs-AI games and report the tally
    Arena {
        #[arg(long, default_value_t = DEFAULT_SIZE)]
        size: usize,

        /// Search depth of the first engine
        #[arg(long, default_value_t = DEFAULT_DEPTH)]
        depth_one: u32,

        /// Search depth of the second engine
        #[arg(long, default_value_t = DEFAULT_DEPTH)]
        depth_two: u32,

        #[arg(long, default_value_t = 20)]
        games: usize,

        /// Random moves played before the engines take over
        #[arg(long, default_value_t = 2)]
        opening_plies: usize,

        #[arg(long, default_value_t = 0)]
        seed: u64,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    match Cli::parse().command {
        Command::Play {
            size,
            depth,
            ai_one,
            ai_two,
            stats,
        } => play(size, depth, (ai_one, ai_two), stats),
        Command::Arena {
            size,
            depth_one,
            depth_two,
            games,
            opening_plies,
            seed,
        } => {
            let config = ArenaConfig {
                size,
                depths: (depth_one, depth_two),
                games,
                opening_plies,
                seed,
                show_progress: true,
            };
            let report = arena::run(&config)?;
            println!(
                "{} games in {:.1}s: depth {} won {}, depth {} won {}, {} drawn",
                report.games(),
                report.elapsed.as_secs_f64(),
                depth_one,
                report.first_wins,
                depth_two,
                report.second_wins,
                report.draws
            );
            println!("Positions explored: {}", report.evaluations);
            Ok(())
        }
    }
}

fn play(size: usize, depth: u32, ai_players: (bool, bool), stats: bool) -> Result<()> {
    let mut game = Game::new(size)?;
    let mut engines = (
        Engine::new(depth).with_stats(stats),
        Engine::new(depth).with_stats(stats),
    );

    let stdin = stdin();

    println!("Welcome to Connect 4 on a {}x{} board\n", size, size);

    // game loop
    loop {
        game.board().display().expect("Failed to draw board!");

        match game.state() {
            GameState::Playing => {
                let color = game.to_move();
                let player_one = color == Color::PlayerOne;
                let next_move =
                    // AI player
                    if (player_one && ai_players.0) || (!player_one && ai_players.1) {
                        let engine = if player_one { &mut engines.0 } else { &mut engines.1 };
                        println!("{} is thinking...", engine.name());
                        stdout().flush().expect("Failed to flush to stdout!");

                        // slow down play if both players are AI
                        if ai_players == (true, true) {
                            std::thread::sleep(std::time::Duration::new(1, 0));
                        }

                        let outcome = engine.search(game.board(), color)?;

                        if is_proven(outcome.score) {
                            let plies = plies_to_result(outcome.score).unwrap_or_default();
                            let ply_string = if plies == 1 { "ply" } else { "plies" };
                            match outcome.score.cmp(&0) {
                                Ordering::Greater => println!("{} can force a win within {} {}.", color, plies, ply_string),
                                _ => println!("{} can force a win within {} {}.", -color, plies, ply_string),
                            }
                        }
                        if stats {
                            println!(
                                "Positions explored: {}, time: {:.3}ms, moves played: {}",
                                engine.evaluations,
                                engine.last_elapsed.as_secs_f64() * 1000.0,
                                engine.moves_played
                            );
                        }

                        println!("Best move: {}", outcome.column + 1);
                        outcome.column + 1

                    // human player
                    } else {
                        print!("Move input > ");
                        stdout().flush().expect("Failed to flush to stdout!");
                        let mut input_str = String::new();
                        stdin.read_line(&mut input_str)?;

                        match input_str.trim().chars().next().and_then(|c| c.to_digit(36)) {
                            None => {
                                println!("Invalid column: {}", input_str.trim());
                                continue;
                            }
                            Some(column) => column as usize,
                        }
                    };

                if let Err(err) = game.play_checked(next_move) {
                    println!("{}", err);
                    // try the move again
                    continue;
                }
            }

            // end states
            GameState::Won(color) => {
                println!("{} wins!", color);
                break;
            }
            GameState::Draw => {
                println!("Draw!");
                break;
            }
        }
    }
    println!("Moves: {}", game.record);
    Ok(())
}
