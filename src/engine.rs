//! A depth-bounded minimax agent with alpha-beta pruning

use log::{debug, info};

use std::time::{Duration, Instant};

use crate::{
    board::{Board, Color},
    error::GameError,
    evaluator::evaluate,
    score::*,
    DEFAULT_DEPTH, MAX_SIZE, MIN_SIZE,
};

/// The column picked by a search and the value it was given
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct SearchOutcome {
    pub column: usize,
    pub score: Score,
}

/// An agent choosing moves by minimax search
///
/// # Notes
/// The root is a maximising node for the color to move and columns are
/// tried in ascending order. The first column whose value beats every
/// column before it is chosen, so ties go to the leftmost column.
///
/// # Depth
/// `depth` counts plies including the root move. Once it runs out the
/// position is scored by [`evaluate`]. Depths 0 and 1 both score the
/// position straight after the root move.
///
/// # Position Scoring
/// Scores are from the perspective of the color to move at the root. A four
/// completed `n` plies below the root is worth `WIN - n` to its owner, so the
/// quickest win is always preferred and an immediate win is never missed.
///
/// [`evaluate`]: crate::evaluator::evaluate
#[derive(Clone, Debug)]
pub struct Engine {
    depth: u32,
    stats: bool,
    name: String,

    /// The number of nodes searched for the last move (for diagnostics only)
    pub node_count: usize,
    /// The number of positions scored by the evaluator for the last move
    pub evaluations: usize,
    /// The number of positions scored over every move so far
    pub total_evaluations: usize,
    /// The number of moves this `Engine` has chosen
    pub moves_played: usize,
    /// Wall time spent on the last move
    pub last_elapsed: Duration,
}

impl Engine {
    /// Creates a new `Engine` searching to a given depth
    pub fn new(depth: u32) -> Self {
        Self {
            depth,
            stats: false,
            name: format!("Minimax player (depth {})", depth),
            node_count: 0,
            evaluations: 0,
            total_evaluations: 0,
            moves_played: 0,
            last_elapsed: Duration::default(),
        }
    }

    /// Logs the statistics of every move at info level
    pub fn with_stats(mut self, stats: bool) -> Self {
        self.stats = stats;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Chooses the column to play for `color`
    pub fn choose_move<B: Board>(&mut self, board: &B, color: Color) -> Result<usize, GameError> {
        self.search(board, color).map(|outcome| outcome.column)
    }

    /// Searches the position, returning the chosen column and its value
    ///
    /// Fails with [`GameError::SizeOutOfRange`] if the board size is outside
    /// `MIN_SIZE..=MAX_SIZE` and with [`GameError::NoLegalMoves`] if every
    /// column is full. The caller's board is left untouched.
    pub fn search<B: Board>(&mut self, board: &B, color: Color) -> Result<SearchOutcome, GameError> {
        let size = board.size();
        if !(MIN_SIZE..=MAX_SIZE).contains(&size) {
            return Err(GameError::SizeOutOfRange {
                size,
                min: MIN_SIZE,
                max: MAX_SIZE,
            });
        }

        let start = Instant::now();
        self.node_count = 0;
        self.evaluations = 0;

        // moves are applied and undone on a private copy
        let mut board = board.clone();
        let mut alpha = -INFINITY;
        let mut best: Option<SearchOutcome> = None;

        for column in 0..board.size() {
            if !board.can_play(column) {
                continue;
            }
            board.drop_token(column, color);
            let score = self.min_value(&mut board, column, color, alpha, INFINITY, self.depth.saturating_sub(1), 1);
            board.undo(column);

            if best.map_or(true, |best| score > best.score) {
                best = Some(SearchOutcome { column, score });
            }
            alpha = alpha.max(score);
        }

        let outcome = best.ok_or(GameError::NoLegalMoves)?;
        self.moves_played += 1;
        self.total_evaluations += self.evaluations;
        self.last_elapsed = start.elapsed();

        let report = format!(
            "{} played column {} (score {}), {} nodes, {} positions explored in {:.3}ms",
            color,
            outcome.column + 1,
            outcome.score,
            self.node_count,
            self.evaluations,
            self.last_elapsed.as_secs_f64() * 1000.0
        );
        if self.stats {
            info!("{}", report);
        } else {
            debug!("{}", report);
        }
        Ok(outcome)
    }

    fn static_value<B: Board>(&mut self, board: &B, color: Color) -> Score {
        self.evaluations += 1;
        evaluate(board, color)
    }

    /// Value of the node reached after `color` played `column`, opponent to move
    #[allow(clippy::too_many_arguments)]
    fn min_value<B: Board>(
        &mut self,
        board: &mut B,
        column: usize,
        color: Color,
        alpha: Score,
        mut beta: Score,
        depth: u32,
        ply: u32,
    ) -> Score {
        self.node_count += 1;

        if board.completes_four(column, color) {
            return win_in(ply);
        }
        if depth == 0 {
            return self.static_value(board, color);
        }

        let mut value = INFINITY;
        for reply in 0..board.size() {
            if !board.can_play(reply) {
                continue;
            }
            board.drop_token(reply, -color);
            value = value.min(self.max_value(board, reply, color, alpha, beta, depth - 1, ply + 1));
            board.undo(reply);

            // the maximiser already has something at least this good elsewhere
            if value <= alpha {
                break;
            }
            beta = beta.min(value);
        }

        // full board
        if value == INFINITY {
            return self.static_value(board, color);
        }
        value
    }

    /// Value of the node reached after the opponent of `color` played `column`
    #[allow(clippy::too_many_arguments)]
    fn max_value<B: Board>(
        &mut self,
        board: &mut B,
        column: usize,
        color: Color,
        mut alpha: Score,
        beta: Score,
        depth: u32,
        ply: u32,
    ) -> Score {
        self.node_count += 1;

        if board.completes_four(column, -color) {
            return loss_in(ply);
        }
        if depth == 0 {
            return self.static_value(board, color);
        }

        let mut value = -INFINITY;
        for reply in 0..board.size() {
            if !board.can_play(reply) {
                continue;
            }
            board.drop_token(reply, color);
            value = value.max(self.min_value(board, reply, color, alpha, beta, depth - 1, ply + 1));
            board.undo(reply);

            // the minimiser already has something at least this good elsewhere
            if value >= beta {
                break;
            }
            alpha = alpha.max(value);
        }

        if value == -INFINITY {
            return self.static_value(board, color);
        }
        value
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(DEFAULT_DEPTH)
    }
}
