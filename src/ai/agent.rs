use std::time::Duration;

use crate::error::SearchError;
use crate::game::GameState;

use super::deepening::{Decision, IterativeDeepening, SearchConfig};
use super::timing::{MoveTimingObserver, TimingLog};

/// Universal interface for all move-picking agents.
pub trait Agent {
    /// Select an action (column) for the player to move in `state`.
    fn select_action(&mut self, state: &GameState) -> Result<usize, SearchError>;

    /// Return the agent's display name.
    fn name(&self) -> &str;
}

/// Agent that plays the iterative deepening alpha-beta search under a fixed
/// time budget, timing every decision.
pub struct AlphaBetaAgent {
    engine: IterativeDeepening,
    time_budget: Duration,
    timings: TimingLog,
    last_decision: Option<Decision>,
}

impl AlphaBetaAgent {
    pub fn new(config: SearchConfig) -> Self {
        AlphaBetaAgent {
            time_budget: config.time_budget(),
            engine: IterativeDeepening::new(config),
            timings: TimingLog::new(),
            last_decision: None,
        }
    }

    /// Move times recorded so far.
    pub fn timings(&self) -> &TimingLog {
        &self.timings
    }

    pub fn last_decision(&self) -> Option<Decision> {
        self.last_decision
    }
}

impl Default for AlphaBetaAgent {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}

impl Agent for AlphaBetaAgent {
    fn select_action(&mut self, state: &GameState) -> Result<usize, SearchError> {
        let observer: &mut dyn MoveTimingObserver = &mut self.timings;
        let decision = self.engine.choose_move_observed(
            state.board(),
            state.current_player(),
            self.time_budget,
            observer,
        )?;
        self.last_decision = Some(decision);
        Ok(decision.column)
    }

    fn name(&self) -> &str {
        "Alpha-beta"
    }
}
