mod agent;
mod deepening;
mod evaluate;
mod minimax;
mod random;
mod timing;

pub use agent::{Agent, AlphaBetaAgent};
pub use deepening::{
    budget_from_secs, choose_move, Decision, IterativeDeepening, SearchConfig, MAX_SEARCH_DEPTH,
};
pub use evaluate::score;
pub use minimax::{order_moves, search, SearchResult, Searcher, NEG_INF, POS_INF};
pub use random::RandomAgent;
pub use timing::{MoveTimingObserver, TimingLog};
