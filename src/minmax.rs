//! Depth-bounded minimax search with alpha-beta pruning.
//!
//! The searching side maximizes, its opponent minimizes. Every tried move is
//! played on a private copy of the board, so sibling branches never see each
//! other's chips and the root can be split across the rayon pool.

use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use tracing::{debug, info};

use crate::error::SearchError;
use crate::eval::score_position;
use crate::game::{Gameboard, Player};

/// Standard search depth in plies.
pub const DEFAULT_DEPTH: usize = 5;

/// Score of a position the searching side has won.
pub const WIN_SCORE: i64 = 100_000_000_000_000;

/// Loss score of [`TerminalScores::Legacy`].
pub const LEGACY_LOSS_SCORE: i64 = -10_000_000_000_000;

/// Scores assigned to decided positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminalScores {
    /// A loss weighs exactly as much as a win.
    #[default]
    Symmetric,
    /// A loss is ten times smaller than a win.
    Legacy,
}

impl TerminalScores {
    #[must_use]
    pub const fn win(self) -> i64 {
        WIN_SCORE
    }

    #[must_use]
    pub const fn loss(self) -> i64 {
        match self {
            Self::Symmetric => -WIN_SCORE,
            Self::Legacy => LEGACY_LOSS_SCORE,
        }
    }
}

/// Picks the column a search node reports before any child has been scored.
pub trait TieBreak: Send {
    /// `legal` is never empty and sorted ascending.
    fn default_column(&mut self, legal: &[usize]) -> usize;
}

/// Always starts from the lowest legal column.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstLegal;

impl TieBreak for FirstLegal {
    fn default_column(&mut self, legal: &[usize]) -> usize {
        legal[0]
    }
}

/// Starts from a uniformly random legal column.
#[derive(Debug, Clone)]
pub struct RandomLegal {
    rng: StdRng,
}

impl RandomLegal {
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomLegal {
    fn default() -> Self {
        Self::new()
    }
}

impl TieBreak for RandomLegal {
    fn default_column(&mut self, legal: &[usize]) -> usize {
        legal[self.rng.random_range(0..legal.len())]
    }
}

/// Counters collected while searching.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Visited nodes, root included.
    pub nodes: u64,
    /// Nodes whose remaining siblings were pruned.
    pub cutoffs: u64,
    /// Whether the time budget stopped the root before every column was tried.
    pub truncated: bool,
}

impl SearchStats {
    fn merge(&mut self, other: &Self) {
        self.nodes += other.nodes;
        self.cutoffs += other.cutoffs;
        self.truncated |= other.truncated;
    }
}

/// Outcome of a root search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    pub column: usize,
    pub score: i64,
    pub depth: usize,
    pub stats: SearchStats,
}

/// Score of a node the search does not expand, or `None` if it must be
/// expanded.
fn cutoff_score<const W: usize, const H: usize>(
    board: &Gameboard<W, H>,
    side: Player,
    scores: TerminalScores,
    depth: usize,
) -> Option<i64> {
    if board.has_four_in_a_row(side) {
        Some(scores.win())
    } else if board.has_four_in_a_row(side.opponent()) {
        Some(scores.loss())
    } else if board.legal_columns().next().is_none() {
        Some(0)
    } else if depth == 0 {
        Some(score_position(board, side))
    } else {
        None
    }
}

/// State of one sequential alpha-beta search.
struct AlphaBeta<'a> {
    side: Player,
    scores: TerminalScores,
    tie_break: &'a mut dyn TieBreak,
    stats: SearchStats,
}

impl AlphaBeta<'_> {
    /// Recursive alpha-beta step. The returned column is `None` (the level
    /// above knows which column led here) for every node that is not expanded.
    fn search<const W: usize, const H: usize>(
        &mut self,
        board: &Gameboard<W, H>,
        depth: usize,
        mut alpha: i64,
        mut beta: i64,
        maximizing: bool,
        deadline: Option<Instant>,
    ) -> (Option<usize>, i64) {
        self.stats.nodes += 1;

        if let Some(score) = cutoff_score(board, self.side, self.scores, depth) {
            return (None, score);
        }

        let legal: Vec<usize> = board.legal_columns().collect();
        let mover = if maximizing {
            self.side
        } else {
            self.side.opponent()
        };

        let mut best_col = self.tie_break.default_column(&legal);
        let mut best_score = if maximizing { i64::MIN } else { i64::MAX };

        for (i, &col) in legal.iter().enumerate() {
            if i > 0 && deadline.is_some_and(|deadline| Instant::now() >= deadline) {
                self.stats.truncated = true;
                break;
            }

            let child = board.with_move(col, mover);
            let (_, score) = self.search(&child, depth - 1, alpha, beta, !maximizing, None);

            if maximizing {
                if score > best_score {
                    best_score = score;
                    best_col = col;
                }
                alpha = alpha.max(best_score);
            } else {
                if score < best_score {
                    best_score = score;
                    best_col = col;
                }
                beta = beta.min(best_score);
            }

            if alpha >= beta {
                self.stats.cutoffs += 1;
                break;
            }
        }

        (Some(best_col), best_score)
    }
}

/// Move search for one side, configured with the builder methods.
pub struct Searcher {
    depth: usize,
    scores: TerminalScores,
    tie_break: Box<dyn TieBreak>,
    parallel: bool,
    time_budget: Option<Duration>,
}

impl Searcher {
    /// Sequential search to `depth` plies with [`FirstLegal`] tie-breaking and
    /// [`TerminalScores::Symmetric`].
    #[must_use]
    pub fn new(depth: usize) -> Self {
        Self {
            depth,
            scores: TerminalScores::default(),
            tie_break: Box::new(FirstLegal),
            parallel: false,
            time_budget: None,
        }
    }

    #[must_use]
    pub fn with_terminal_scores(mut self, scores: TerminalScores) -> Self {
        self.scores = scores;
        self
    }

    #[must_use]
    pub fn with_tie_break(mut self, tie_break: Box<dyn TieBreak>) -> Self {
        self.tie_break = tie_break;
        self
    }

    /// Searches every root column on its own rayon task.
    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Stops trying further root columns once `budget` has elapsed. Only the
    /// sequential search honours the budget.
    #[must_use]
    pub fn with_time_budget(mut self, budget: Option<Duration>) -> Self {
        self.time_budget = budget;
        self
    }

    #[must_use]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// Picks the best column for `side` on `board`.
    pub fn search<const W: usize, const H: usize>(
        &mut self,
        board: &Gameboard<W, H>,
        side: Player,
    ) -> Result<SearchResult, SearchError> {
        if self.depth == 0 {
            return Err(SearchError::ZeroDepth);
        }
        if board.is_game_over() {
            return Err(SearchError::EmptyLegalMoves);
        }

        let started = Instant::now();
        let (column, score, stats) = if self.parallel {
            self.search_parallel(board, side)
        } else {
            self.search_sequential(board, side, started)
        };

        let result = SearchResult {
            column,
            score,
            depth: self.depth,
            stats,
        };
        if stats.truncated {
            info!(
                budget_ms = self.time_budget.map_or(0, |b| b.as_millis() as u64),
                column, "time budget exhausted, returning best column so far"
            );
        }
        debug!(
            column,
            score,
            depth = self.depth,
            nodes = stats.nodes,
            cutoffs = stats.cutoffs,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "search finished"
        );
        Ok(result)
    }

    fn search_sequential<const W: usize, const H: usize>(
        &mut self,
        board: &Gameboard<W, H>,
        side: Player,
        started: Instant,
    ) -> (usize, i64, SearchStats) {
        let mut alpha_beta = AlphaBeta {
            side,
            scores: self.scores,
            tie_break: self.tie_break.as_mut(),
            stats: SearchStats::default(),
        };
        let deadline = self.time_budget.map(|budget| started + budget);
        let (column, score) =
            alpha_beta.search(board, self.depth, i64::MIN, i64::MAX, true, deadline);

        // the root is expanded, so it always reports a column
        let column = column.unwrap_or_default();
        (column, score, alpha_beta.stats)
    }

    /// Root columns are searched independently with the full window. Branches
    /// below the root break ties with [`FirstLegal`], which does not change
    /// any score.
    fn search_parallel<const W: usize, const H: usize>(
        &mut self,
        board: &Gameboard<W, H>,
        side: Player,
    ) -> (usize, i64, SearchStats) {
        let legal: Vec<usize> = board.legal_columns().collect();
        let depth = self.depth;
        let scores = self.scores;

        let branches: Vec<(usize, i64, SearchStats)> = legal
            .par_iter()
            .map(|&col| {
                let child = board.with_move(col, side);
                let mut tie_break = FirstLegal;
                let mut alpha_beta = AlphaBeta {
                    side,
                    scores,
                    tie_break: &mut tie_break,
                    stats: SearchStats::default(),
                };
                let (_, score) =
                    alpha_beta.search(&child, depth - 1, i64::MIN, i64::MAX, false, None);
                (col, score, alpha_beta.stats)
            })
            .collect();

        let mut stats = SearchStats {
            nodes: 1,
            ..SearchStats::default()
        };
        let mut best_col = self.tie_break.default_column(&legal);
        let mut best_score = i64::MIN;
        for (col, score, branch_stats) in &branches {
            stats.merge(branch_stats);
            if *score > best_score {
                best_score = *score;
                best_col = *col;
            }
        }
        (best_col, best_score, stats)
    }
}

impl std::fmt::Debug for Searcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Searcher")
            .field("depth", &self.depth)
            .field("scores", &self.scores)
            .field("parallel", &self.parallel)
            .field("time_budget", &self.time_budget)
            .finish_non_exhaustive()
    }
}

/// Alpha-beta search to `depth` plies for `side` with the default policies.
/// Returns the chosen column and its score.
pub fn choose_move<const W: usize, const H: usize>(
    board: &Gameboard<W, H>,
    depth: usize,
    side: Player,
) -> Result<(usize, i64), SearchError> {
    Searcher::new(depth)
        .search(board, side)
        .map(|result| (result.column, result.score))
}

/// Plain minimax without pruning, scored exactly like the alpha-beta search.
/// Exponentially slower; useful as a reference.
#[must_use]
pub fn minimax<const W: usize, const H: usize>(
    board: &Gameboard<W, H>,
    depth: usize,
    side: Player,
    scores: TerminalScores,
) -> (Option<usize>, i64) {
    fn step<const W: usize, const H: usize>(
        board: &Gameboard<W, H>,
        depth: usize,
        side: Player,
        scores: TerminalScores,
        maximizing: bool,
    ) -> (Option<usize>, i64) {
        if let Some(score) = cutoff_score(board, side, scores, depth) {
            return (None, score);
        }

        let mover = if maximizing { side } else { side.opponent() };
        let mut best: Option<(usize, i64)> = None;
        for col in board.legal_columns() {
            let (_, score) = step(&board.with_move(col, mover), depth - 1, side, scores, !maximizing);
            let better = best.is_none_or(|(_, best_score)| {
                if maximizing {
                    score > best_score
                } else {
                    score < best_score
                }
            });
            if better {
                best = Some((col, score));
            }
        }

        match best {
            Some((col, score)) => (Some(col), score),
            None => (None, 0),
        }
    }

    step(board, depth, side, scores, true)
}
