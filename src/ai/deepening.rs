use std::time::{Duration, Instant};

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::error::SearchError;
use crate::game::{Board, Player};

use super::minimax::{Searcher, NEG_INF, POS_INF};
use super::timing::MoveTimingObserver;

/// Hard ceiling on the iterative deepening loop.
pub const MAX_SEARCH_DEPTH: u32 = 15;

/// Search limits, loadable from the `[search]` table of the config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Wall-clock budget per move, in seconds.
    pub time_budget_secs: f64,
    pub max_depth: u32,
    /// Nodes a single depth iteration may visit before it is abandoned.
    pub max_nodes: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            time_budget_secs: 3.0,
            max_depth: MAX_SEARCH_DEPTH,
            max_nodes: None,
        }
    }
}

impl SearchConfig {
    pub fn time_budget(&self) -> Duration {
        budget_from_secs(self.time_budget_secs)
    }
}

/// Convert a budget in seconds. Negative and NaN budgets become zero,
/// budgets too large for a `Duration` saturate.
pub fn budget_from_secs(secs: f64) -> Duration {
    Duration::try_from_secs_f64(secs).unwrap_or(if secs > 0.0 {
        Duration::MAX
    } else {
        Duration::ZERO
    })
}

/// The move picked by [`IterativeDeepening::choose_move`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub column: usize,
    /// Deepest search depth that ran to completion.
    pub completed_depth: u32,
    /// Score backing `column`; `None` when no search produced a move and the
    /// first legal column was used instead.
    pub score: Option<i32>,
    pub elapsed: Duration,
}

/// Iterative deepening driver around the alpha-beta searcher.
///
/// The time budget is checked only between depth iterations. A started
/// iteration always runs to the end, so a decision can overshoot the budget
/// by the length of one iteration.
#[derive(Debug, Clone)]
pub struct IterativeDeepening {
    config: SearchConfig,
    searcher: Searcher,
}

impl IterativeDeepening {
    pub fn new(config: SearchConfig) -> Self {
        let searcher = Searcher::new(config.max_nodes);
        IterativeDeepening { config, searcher }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Pick a column for `side_to_move` within `time_budget`.
    ///
    /// Exhausting the node budget ends the loop and keeps the move of the
    /// last completed depth. Other search errors are returned.
    pub fn choose_move(
        &mut self,
        board: &Board,
        side_to_move: Player,
        time_budget: Duration,
    ) -> Result<Decision, SearchError> {
        let start = Instant::now();
        let maximizing = side_to_move.is_maximizing();
        let mut best: Option<(usize, i32)> = None;
        let mut completed_depth = 0;
        let mut depth = 1;
        let max_depth = self.config.max_depth.min(MAX_SEARCH_DEPTH);

        while start.elapsed() < time_budget && depth <= max_depth {
            let depth_start = Instant::now();
            match self
                .searcher
                .search(board, depth, maximizing, NEG_INF, POS_INF)
            {
                Ok(result) => {
                    debug!(
                        "depth {}: score {} move {:?} ({} nodes, {:.3} s)",
                        depth,
                        result.score,
                        result.best_move,
                        self.searcher.nodes(),
                        depth_start.elapsed().as_secs_f64()
                    );
                    if let Some(column) = result.best_move {
                        best = Some((column, result.score));
                    }
                    completed_depth = depth;
                    depth += 1;
                }
                Err(err) if err.is_recoverable() => {
                    warn!("Stopping search at depth {}: {}", depth, err);
                    break;
                }
                Err(err) => return Err(err),
            }
        }

        info!("Final search depth: {}", completed_depth);

        let (column, score) = match best {
            Some((column, score)) => (column, Some(score)),
            None => {
                let column = board
                    .legal_moves()
                    .first()
                    .copied()
                    .ok_or(SearchError::NoLegalMoves)?;
                debug!("No search result, falling back to column {}", column);
                (column, None)
            }
        };

        Ok(Decision {
            column,
            completed_depth,
            score,
            elapsed: start.elapsed(),
        })
    }

    /// [`choose_move`](Self::choose_move), reporting the total time taken to
    /// `observer` whether or not a move was found.
    pub fn choose_move_observed(
        &mut self,
        board: &Board,
        side_to_move: Player,
        time_budget: Duration,
        observer: &mut dyn MoveTimingObserver,
    ) -> Result<Decision, SearchError> {
        let start = Instant::now();
        let decision = self.choose_move(board, side_to_move, time_budget);
        observer.observe(start.elapsed());
        decision
    }
}

impl Default for IterativeDeepening {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}

/// Pick a column for `side_to_move` with the default limits and a budget in
/// seconds.
pub fn choose_move(
    board: &Board,
    side_to_move: Player,
    time_budget_secs: f64,
) -> Result<usize, SearchError> {
    IterativeDeepening::default()
        .choose_move(board, side_to_move, budget_from_secs(time_budget_secs))
        .map(|decision| decision.column)
}
