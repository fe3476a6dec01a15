use crate::error::SearchError;
use crate::game::{Board, Player};

use super::evaluate::score;

/// Bounds of the initial search window.
pub const NEG_INF: i32 = i32::MIN;
pub const POS_INF: i32 = i32::MAX;

/// Score of a node and the column that achieves it. `best_move` is `None` at
/// terminal nodes and at the depth horizon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    pub score: i32,
    pub best_move: Option<usize>,
}

impl SearchResult {
    fn leaf(score: i32) -> Self {
        SearchResult {
            score,
            best_move: None,
        }
    }
}

/// Column ordering: center-first for better alpha-beta pruning. Columns at
/// equal distance from `columns / 2` keep ascending order, so the left one
/// is tried first.
pub fn order_moves(mut moves: Vec<usize>, columns: usize) -> Vec<usize> {
    let center = columns / 2;
    moves.sort_by_key(|&col| col.abs_diff(center));
    moves
}

/// Depth-limited minimax with alpha-beta pruning. The AI is the maximizing
/// side and every leaf is scored from its perspective.
#[derive(Debug, Clone, Default)]
pub struct Searcher {
    node_limit: Option<u64>,
    nodes: u64,
    root_depth: u32,
}

impl Searcher {
    /// `node_limit` caps the nodes visited by a single call to [`search`](Self::search).
    pub fn new(node_limit: Option<u64>) -> Self {
        Searcher {
            node_limit,
            nodes: 0,
            root_depth: 0,
        }
    }

    pub fn unbounded() -> Self {
        Self::new(None)
    }

    /// Nodes visited by the most recent search.
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    pub fn search(
        &mut self,
        board: &Board,
        depth: u32,
        maximizing: bool,
        alpha: i32,
        beta: i32,
    ) -> Result<SearchResult, SearchError> {
        self.nodes = 0;
        self.root_depth = depth;
        self.alpha_beta(board, depth, maximizing, alpha, beta)
    }

    fn visit(&mut self) -> Result<(), SearchError> {
        self.nodes += 1;
        match self.node_limit {
            Some(limit) if self.nodes > limit => Err(SearchError::NodeBudgetExhausted {
                limit,
                depth: self.root_depth,
            }),
            _ => Ok(()),
        }
    }

    fn alpha_beta(
        &mut self,
        board: &Board,
        depth: u32,
        maximizing: bool,
        mut alpha: i32,
        mut beta: i32,
    ) -> Result<SearchResult, SearchError> {
        self.visit()?;

        let outcome = board.outcome();
        if depth == 0 || outcome.is_terminal() {
            return Ok(SearchResult::leaf(score(outcome, Player::Ai)));
        }

        let moves = order_moves(board.legal_moves(), board.columns());

        if maximizing {
            let mut best = SearchResult::leaf(NEG_INF);
            for col in moves {
                let Ok(child) = board.apply_move(col, Player::Ai) else {
                    continue;
                };
                let reply = self.alpha_beta(&child, depth - 1, false, alpha, beta)?;
                if reply.score > best.score {
                    best = SearchResult {
                        score: reply.score,
                        best_move: Some(col),
                    };
                }
                alpha = alpha.max(best.score);
                if alpha >= beta {
                    break;
                }
            }
            Ok(best)
        } else {
            let mut best = SearchResult::leaf(POS_INF);
            for col in moves {
                let Ok(child) = board.apply_move(col, Player::Human) else {
                    continue;
                };
                let reply = self.alpha_beta(&child, depth - 1, true, alpha, beta)?;
                if reply.score < best.score {
                    best = SearchResult {
                        score: reply.score,
                        best_move: Some(col),
                    };
                }
                beta = beta.min(best.score);
                if beta <= alpha {
                    break;
                }
            }
            Ok(best)
        }
    }
}

/// Run a search without a node budget.
pub fn search(board: &Board, depth: u32, maximizing: bool, alpha: i32, beta: i32) -> SearchResult {
    match Searcher::unbounded().search(board, depth, maximizing, alpha, beta) {
        Ok(result) => result,
        Err(err) => unreachable!("search without a node budget failed: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameOutcome;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    /// Plain minimax, no pruning.
    fn exhaustive(board: &Board, depth: u32, maximizing: bool) -> i32 {
        let outcome = board.outcome();
        if depth == 0 || outcome.is_terminal() {
            return score(outcome, Player::Ai);
        }
        let player = if maximizing { Player::Ai } else { Player::Human };
        let scores = board
            .legal_moves()
            .into_iter()
            .filter_map(|col| board.apply_move(col, player).ok())
            .map(|child| exhaustive(&child, depth - 1, !maximizing));
        if maximizing {
            scores.max().unwrap_or(NEG_INF)
        } else {
            scores.min().unwrap_or(POS_INF)
        }
    }

    fn random_position(rng: &mut StdRng, plies: usize) -> (Board, bool) {
        let mut board = Board::default();
        let mut player = if rng.random_bool(0.5) {
            Player::Ai
        } else {
            Player::Human
        };
        for _ in 0..plies {
            if board.outcome().is_terminal() {
                break;
            }
            let moves = board.legal_moves();
            let col = moves[rng.random_range(0..moves.len())];
            board = board.apply_move(col, player).unwrap();
            player = player.other();
        }
        (board, player.is_maximizing())
    }

    // --- Ordering ---

    #[test]
    fn center_first_order() {
        assert_eq!(order_moves((0..7).collect(), 7), vec![3, 2, 4, 1, 5, 0, 6]);
        assert_eq!(order_moves((0..6).collect(), 6), vec![3, 2, 4, 1, 5, 0]);
        assert_eq!(order_moves(vec![0, 1, 5, 6], 7), vec![1, 5, 0, 6]);
    }

    #[test]
    fn empty_board_prefers_center_on_ties() {
        let result = search(&Board::default(), 1, true, NEG_INF, POS_INF);
        assert_eq!(
            result,
            SearchResult {
                score: 0,
                best_move: Some(3)
            }
        );
    }

    #[test]
    fn full_center_column_is_skipped() {
        let mut board = Board::default();
        for i in 0..6 {
            let player = if i % 2 == 0 { Player::Human } else { Player::Ai };
            board.drop_piece(3, player).unwrap();
        }
        let result = search(&board, 1, true, NEG_INF, POS_INF);
        assert_eq!(result.best_move, Some(2));
    }

    // --- Leaves ---

    #[test]
    fn depth_zero_returns_static_score() {
        let result = search(&Board::default(), 0, true, NEG_INF, POS_INF);
        assert_eq!(result, SearchResult::leaf(0));
    }

    #[test]
    fn terminal_root_has_no_move() {
        let board = Board::from_rows(&[
            ".......", //
            ".......", //
            ".......", //
            ".......", //
            ".......", //
            "OOOOXXX",
        ])
        .unwrap();
        let result = search(&board, 5, false, NEG_INF, POS_INF);
        assert_eq!(result, SearchResult::leaf(1));
    }

    #[test]
    fn drawn_board_scores_zero() {
        let board = Board::from_rows(&[
            "XXOOXXO", //
            "OOXXOOX", //
            "XXOOXXO", //
            "OOXXOOX", //
            "XXOOXXO", //
            "OOXXOOX",
        ])
        .unwrap();
        assert_eq!(board.outcome(), GameOutcome::Draw);
        let result = search(&board, 4, true, NEG_INF, POS_INF);
        assert_eq!(result, SearchResult::leaf(0));
    }

    // --- Tactics ---

    #[test]
    fn takes_winning_move() {
        let board = Board::from_rows(&[
            ".......", //
            ".......", //
            ".......", //
            ".......", //
            "X......", //
            "OOO..XX",
        ])
        .unwrap();
        for depth in 1..=5 {
            let result = search(&board, depth, true, NEG_INF, POS_INF);
            assert_eq!(
                result,
                SearchResult {
                    score: 1,
                    best_move: Some(3)
                },
                "depth {depth}"
            );
        }
    }

    #[test]
    fn blocks_opponent_win() {
        let board = Board::from_rows(&[
            ".......", //
            ".......", //
            ".......", //
            ".......", //
            "......O", //
            "XXX...O",
        ])
        .unwrap();
        let result = search(&board, 2, true, NEG_INF, POS_INF);
        assert_eq!(
            result,
            SearchResult {
                score: 0,
                best_move: Some(3)
            }
        );
    }

    #[test]
    fn minimizing_side_takes_its_win() {
        let board = Board::from_rows(&[
            ".......", //
            ".......", //
            ".......", //
            ".......", //
            "......O", //
            "XXX...O",
        ])
        .unwrap();
        let result = search(&board, 3, false, NEG_INF, POS_INF);
        assert_eq!(
            result,
            SearchResult {
                score: -1,
                best_move: Some(3)
            }
        );
    }

    #[test]
    fn prefers_win_over_block() {
        // Both sides threaten column 3; the side to move wins there.
        let board = Board::from_rows(&[
            ".......", //
            ".......", //
            ".......", //
            ".......", //
            "XXX....", //
            "OOO....",
        ])
        .unwrap();
        let result = search(&board, 4, true, NEG_INF, POS_INF);
        assert_eq!(result.best_move, Some(3));
        assert_eq!(result.score, 1);
    }

    // --- Properties ---

    #[test]
    fn pruning_matches_exhaustive_minimax() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..25 {
            let plies = rng.random_range(0..20);
            let (board, maximizing) = random_position(&mut rng, plies);
            for depth in 0..=4 {
                let pruned = search(&board, depth, maximizing, NEG_INF, POS_INF);
                assert_eq!(
                    pruned.score,
                    exhaustive(&board, depth, maximizing),
                    "depth {depth} on\n{board}"
                );
            }
        }
    }

    #[test]
    fn repeated_searches_agree() {
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..10 {
            let (board, maximizing) = random_position(&mut rng, 12);
            let first = search(&board, 5, maximizing, NEG_INF, POS_INF);
            for _ in 0..3 {
                assert_eq!(search(&board, 5, maximizing, NEG_INF, POS_INF), first);
            }
        }
    }

    #[test]
    fn search_does_not_touch_input_board() {
        let board = Board::from_rows(&[
            ".......", //
            ".......", //
            ".......", //
            "...X...", //
            "..OO...", //
            ".XOXX..",
        ])
        .unwrap();
        let snapshot = board.clone();
        search(&board, 5, true, NEG_INF, POS_INF);
        assert_eq!(board, snapshot);
    }

    // --- Node budget ---

    #[test]
    fn node_budget_aborts_search() {
        let mut searcher = Searcher::new(Some(5));
        let err = searcher
            .search(&Board::default(), 4, true, NEG_INF, POS_INF)
            .unwrap_err();
        assert_eq!(err, SearchError::NodeBudgetExhausted { limit: 5, depth: 4 });
    }

    #[test]
    fn node_count_resets_per_search() {
        let mut searcher = Searcher::new(Some(8));
        // Root plus seven children.
        let result = searcher
            .search(&Board::default(), 1, true, NEG_INF, POS_INF)
            .unwrap();
        assert_eq!(result.best_move, Some(3));
        assert_eq!(searcher.nodes(), 8);
        assert!(searcher
            .search(&Board::default(), 1, true, NEG_INF, POS_INF)
            .is_ok());
    }
}
