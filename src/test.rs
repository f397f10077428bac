#[cfg(test)]
pub mod test {
    use anyhow::Result;
    use proptest::prelude::*;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    use crate::{
        arena::{self, random_opening, ArenaConfig},
        engine::SearchOutcome,
        evaluator::*,
        game::{Game, GameState},
        score::*,
        Board, Color, Engine, GameError, Grid, MAX_SIZE, MIN_SIZE,
    };
    use Color::*;

    // an empty board of any size, bypassing the checks in `Grid::new`
    #[derive(Clone)]
    struct Blank(usize);

    impl Board for Blank {
        fn size(&self) -> usize {
            self.0
        }

        fn color_at(&self, _row: usize, _column: usize) -> Option<Color> {
            None
        }

        fn can_play(&self, column: usize) -> bool {
            column < self.0
        }

        fn drop_token(&mut self, _column: usize, _color: Color) {}

        fn undo(&mut self, _column: usize) {}

        fn completes_four(&self, _column: usize, _color: Color) -> bool {
            false
        }
    }

    fn random_game(size: usize, seed: u64) -> Result<Game> {
        let mut rng = StdRng::seed_from_u64(seed);
        let plies = rng.gen_range(0..size * size);
        random_opening(size, plies, &mut rng)
    }

    // plain minimax over the same tree as the engine, without pruning
    fn full_minimax(board: &mut Grid, column: usize, mover: Color, color: Color, depth: u32, ply: u32) -> Score {
        if board.completes_four(column, mover) {
            return if mover == color { win_in(ply) } else { loss_in(ply) };
        }
        if depth == 0 {
            return evaluate(board, color);
        }

        let next = -mover;
        let mut values = vec![];
        for reply in board.playable_columns() {
            board.drop_token(reply, next);
            values.push(full_minimax(board, reply, next, color, depth - 1, ply + 1));
            board.undo(reply);
        }
        let best = if next == color {
            values.into_iter().max()
        } else {
            values.into_iter().min()
        };
        best.unwrap_or_else(|| evaluate(board, color))
    }

    fn full_search(board: &Grid, color: Color, depth: u32) -> Option<SearchOutcome> {
        let mut board = board.clone();
        let mut best: Option<SearchOutcome> = None;
        for column in board.playable_columns() {
            board.drop_token(column, color);
            let score = full_minimax(&mut board, column, color, color, depth.saturating_sub(1), 1);
            board.undo(column);
            if best.map_or(true, |best| score > best.score) {
                best = Some(SearchOutcome { column, score });
            }
        }
        best
    }

    #[test]
    pub fn open_three_in_a_column() -> Result<()> {
        let mut board = Grid::from_rows(&["....", "X...", "X...", "X..."])?;

        let score = evaluate(&board, PlayerOne);
        assert!(score > 0 && !is_proven(score));
        // column 100, rows 10 + 5 + 3, rising diagonal 1
        assert_eq!(score, 119);
        assert_eq!(evaluate(&board, PlayerTwo), -119);

        board.drop_token(0, PlayerOne);
        assert!(board.completes_four(0, PlayerOne));
        assert_eq!(evaluate(&board, PlayerOne), WIN);
        assert_eq!(evaluate(&board, PlayerTwo), -WIN);
        Ok(())
    }

    #[test]
    pub fn row_and_diagonal_fours_are_wins() -> Result<()> {
        let row = Grid::from_rows(&["....", "....", "O...", "XXXX"])?;
        assert_eq!(evaluate(&row, PlayerOne), WIN);
        assert_eq!(evaluate(&row, PlayerTwo), -WIN);

        let rising = Grid::from_rows(&["...O", "..OX", ".OXX", "OXXX"])?;
        assert_eq!(evaluate(&rising, PlayerTwo), WIN);
        assert_eq!(evaluate(&rising, PlayerOne), -WIN);

        let falling = Grid::from_rows(&["X...", "OX..", "OOX.", "OOOX"])?;
        assert_eq!(evaluate(&falling, PlayerOne), WIN);
        assert_eq!(evaluate(&falling, PlayerTwo), -WIN);
        Ok(())
    }

    #[test]
    pub fn blocked_three_is_dead() -> Result<()> {
        let open = Grid::from_rows(&["....", "....", "....", "XXX."])?;
        let blocked = Grid::from_rows(&["....", "....", "....", "XXXO"])?;

        let mut buffer = [None; 4];
        for (column, slot) in buffer.iter_mut().enumerate() {
            *slot = blocked.color_at(0, column);
        }
        assert_eq!(score_line(&buffer, PlayerOne), LineValue::Open(0));

        // the open bottom row alone is worth 10 * 100
        assert_eq!(evaluate(&open, PlayerOne), 1004);
        assert_eq!(evaluate(&blocked, PlayerOne), 2);
        assert_eq!(evaluate(&blocked, PlayerTwo), -2);
        Ok(())
    }

    #[test]
    pub fn empty_board_is_level() -> Result<()> {
        for size in 4..=MAX_SIZE {
            let board = Grid::new(size)?;
            assert_eq!(evaluate(&board, PlayerOne), 0);
            assert_eq!(evaluate(&board, PlayerTwo), 0);
        }
        Ok(())
    }

    #[test]
    pub fn depth_zero_takes_the_only_win() -> Result<()> {
        let board = Grid::from_rows(&[".....", ".....", "..X..", "..X..", "OOX.O"])?;

        let mut engine = Engine::new(0);
        let outcome = engine.search(&board, PlayerOne)?;
        assert_eq!(outcome, SearchOutcome { column: 2, score: win_in(1) });
        Ok(())
    }

    #[test]
    pub fn blocks_an_open_three() -> Result<()> {
        let board = Grid::from_rows(&[".....", ".....", ".....", "XX...", "OOO.."])?;

        let mut engine = Engine::new(2);
        assert_eq!(engine.choose_move(&board, PlayerOne)?, 3);
        Ok(())
    }

    #[test]
    pub fn prefers_the_quicker_win() -> Result<()> {
        // the second column wins at once, anything but that or a block loses to the bottom row
        let board = Grid::from_rows(&["......", "......", ".X....", ".X....", ".X.O..", "XOOO.."])?;

        for depth in 0..=4 {
            let mut engine = Engine::new(depth);
            let outcome = engine.search(&board, PlayerOne)?;
            assert_eq!(outcome.column, 1, "depth {}", depth);
            assert_eq!(outcome.score, win_in(1));
        }
        Ok(())
    }

    #[test]
    pub fn never_misses_an_immediate_win() -> Result<()> {
        let mut checked = 0;
        for seed in 0..300 {
            let game = random_game(5, seed)?;
            let color = game.to_move();
            let board = game.board();

            let winning: Vec<usize> = board
                .playable_columns()
                .into_iter()
                .filter(|&column| {
                    let mut next = board.clone();
                    next.drop_token(column, color);
                    next.completes_four(column, color)
                })
                .collect();
            if winning.is_empty() {
                continue;
            }
            checked += 1;

            for depth in 0..=4 {
                let column = Engine::new(depth).choose_move(board, color)?;
                assert!(winning.contains(&column), "seed {} depth {}", seed, depth);
            }
        }
        assert!(checked > 0);
        Ok(())
    }

    #[test]
    pub fn search_leaves_the_board_alone() -> Result<()> {
        let game = random_game(6, 7)?;
        let before = game.board().clone();

        let mut engine = Engine::new(4);
        engine.choose_move(game.board(), game.to_move())?;

        assert_eq!(game.board(), &before);
        assert!(engine.node_count >= engine.evaluations);
        assert_eq!(engine.moves_played, 1);
        Ok(())
    }

    #[test]
    pub fn full_board_has_no_moves() -> Result<()> {
        let board = Grid::from_rows(&["XXOO", "OOXX", "XXOO", "OOXX"])?;
        assert!(board.is_full());

        let err = Engine::new(3).choose_move(&board, PlayerOne).unwrap_err();
        assert_eq!(err, GameError::NoLegalMoves);
        Ok(())
    }

    #[test]
    pub fn fours_in_every_direction() -> Result<()> {
        let horizontal = Grid::from_rows(&["....", "....", "....", "XXXX"])?;
        assert!(horizontal.completes_four(2, PlayerOne));
        assert!(!horizontal.completes_four(2, PlayerTwo));

        let rising = Grid::from_rows(&["...O", "..OX", ".OXX", "OXXX"])?;
        assert!(rising.completes_four(3, PlayerTwo));

        let falling = Grid::from_rows(&["X...", "OX..", "OOX.", "OOOX"])?;
        assert!(falling.completes_four(0, PlayerOne));
        assert!(falling.completes_four(3, PlayerOne));

        let three = Grid::from_rows(&["....", "X...", "X...", "X..."])?;
        assert!(!three.completes_four(0, PlayerOne));
        assert!(!three.completes_four(1, PlayerOne));
        assert_eq!(three.to_string(), "....\nX...\nX...\nX...\n");
        Ok(())
    }

    #[test]
    pub fn rejects_bad_boards() {
        assert_eq!(
            Grid::new(3).unwrap_err(),
            GameError::SizeOutOfRange { size: 3, min: 4, max: MAX_SIZE }
        );
        assert_eq!(
            Grid::from_rows(&["....", "X...", "....", "...."]).unwrap_err(),
            GameError::FloatingToken { row: 2, column: 0 }
        );
        assert_eq!(
            Grid::from_rows(&["....", "....", "...", "...."]).unwrap_err(),
            GameError::RaggedRows { size: 4 }
        );
        assert_eq!(
            Grid::from_rows(&["....", "....", "....", "..#."]).unwrap_err(),
            GameError::InvalidCell { cell: '#', row: 0 }
        );
    }

    #[test]
    pub fn search_rejects_unsupported_sizes() -> Result<()> {
        for size in [0, 2, MIN_SIZE - 1, MAX_SIZE + 1, 20] {
            let err = Engine::new(1).search(&Blank(size), PlayerOne).unwrap_err();
            assert_eq!(err, GameError::SizeOutOfRange { size, min: MIN_SIZE, max: MAX_SIZE });
        }

        // small boards hold no line long enough to score
        assert_eq!(evaluate(&Blank(2), PlayerOne), 0);
        assert_eq!(Engine::new(1).search(&Blank(MAX_SIZE), PlayerOne)?.column, 0);
        Ok(())
    }

    #[test]
    pub fn game_record_and_states() -> Result<()> {
        let mut game = Game::from_moves(4, "1212")?;
        assert_eq!(game.to_move(), PlayerOne);

        assert_eq!(game.play_checked(5).unwrap_err(), GameError::ColumnOutOfRange { column: 5, size: 4 });
        assert_eq!(game.play_checked(3)?, GameState::Playing);
        assert_eq!(game.play_checked(1)?, GameState::Playing);
        assert_eq!(game.play_checked(1)?, GameState::Playing);
        assert_eq!(game.play_checked(1).unwrap_err(), GameError::ColumnFull { column: 1 });
        assert_eq!(game.play_checked(2)?, GameState::Playing);
        assert_eq!(game.play_checked(4)?, GameState::Playing);
        // player two stacks four in column 2
        assert_eq!(game.play_checked(2)?, GameState::Won(PlayerTwo));
        assert_eq!(game.play_checked(4).unwrap_err(), GameError::GameOver);
        assert_eq!(game.record, "1212311242");
        assert_eq!(game.to_move(), PlayerOne);

        assert_eq!(Game::from_moves(4, "1212121").unwrap_err(), GameError::GameOver);
        assert_eq!(Game::from_moves(4, "12z").unwrap_err(), GameError::ColumnOutOfRange { column: 35, size: 4 });
        assert_eq!(Game::from_moves(4, "1-").unwrap_err(), GameError::InvalidMove('-'));
        Ok(())
    }

    #[test]
    pub fn engines_finish_games() -> Result<()> {
        let mut game = Game::new(5)?;
        let mut first = Engine::new(3);
        let mut second = Engine::default();
        assert_eq!(second.name(), "Minimax player (depth 5)");

        let state = game.play_out(&mut first, &mut second)?;
        assert_ne!(state, GameState::Playing);
        assert_eq!(first.moves_played + second.moves_played, game.record.len());
        Ok(())
    }

    #[test]
    pub fn arena_tallies_every_game() -> Result<()> {
        let config = ArenaConfig {
            size: 4,
            depths: (1, 3),
            games: 6,
            opening_plies: 2,
            seed: 11,
            show_progress: false,
        };
        let report = arena::run(&config)?;
        assert_eq!(report.games(), 6);
        assert!(report.evaluations > 0);

        // seeded openings replay identically
        assert_eq!(arena::run(&config)?.first_wins, report.first_wins);
        Ok(())
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        /// Property: pruning never changes the chosen column or its value
        #[test]
        fn pruned_search_matches_full_minimax(seed in any::<u64>(), size in 4usize..=6, depth in 0u32..=4) {
            let game = random_game(size, seed).unwrap();
            if game.board().is_full() {
                return Ok(());
            }
            let expected = full_search(game.board(), game.to_move(), depth);
            let outcome = Engine::new(depth).search(game.board(), game.to_move()).ok();
            prop_assert_eq!(outcome, expected);
        }

        /// Property: the evaluation flips sign with the perspective and stays heuristic
        #[test]
        fn evaluation_is_antisymmetric(seed in any::<u64>(), size in 4usize..=MAX_SIZE) {
            let game = random_game(size, seed).unwrap();
            let board = game.board();

            let score = evaluate(board, PlayerOne);
            prop_assert_eq!(score, -evaluate(board, PlayerTwo));
            prop_assert_eq!(score, evaluate(board, PlayerOne));
            prop_assert!(!is_proven(score));
        }
    }
}
