use super::board::{Board, GameOutcome, Rejected};
use super::player::Player;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error(transparent)]
    Rejected(#[from] Rejected),

    #[error("the game is already over")]
    GameOver,
}

/// Board plus turn bookkeeping for a game in progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    current_player: Player,
    outcome: GameOutcome,
}

impl GameState {
    /// Start a game on `board` with `first` to move.
    pub fn new(board: Board, first: Player) -> Self {
        let outcome = board.outcome();
        GameState {
            board,
            current_player: first,
            outcome,
        }
    }

    /// Standard 6x7 game, human first.
    pub fn initial() -> Self {
        Self::new(Board::default(), Player::Human)
    }

    /// Get current player
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Get reference to board
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn outcome(&self) -> GameOutcome {
        self.outcome
    }

    /// Check if game is over
    pub fn is_terminal(&self) -> bool {
        self.outcome.is_terminal()
    }

    /// Get list of legal columns (not full)
    pub fn legal_actions(&self) -> Vec<usize> {
        if self.is_terminal() {
            return Vec::new();
        }
        self.board.legal_moves()
    }

    /// Apply a move and return new state (immutable)
    pub fn apply_move(&self, column: usize) -> Result<GameState, MoveError> {
        let mut next = self.clone();
        next.apply_move_mut(column)?;
        Ok(next)
    }

    /// Apply a move in place. A rejected column leaves the turn unchanged.
    pub fn apply_move_mut(&mut self, column: usize) -> Result<(), MoveError> {
        if self.is_terminal() {
            return Err(MoveError::GameOver);
        }

        self.board.drop_piece(column, self.current_player)?;
        self.outcome = self.board.outcome();
        self.current_player = self.current_player.other();

        Ok(())
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::initial()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Cell;

    #[test]
    fn test_initial_state() {
        let state = GameState::initial();
        assert_eq!(state.current_player(), Player::Human);
        assert!(!state.is_terminal());
        assert_eq!(state.legal_actions().len(), 7);
    }

    #[test]
    fn test_apply_move() {
        let state = GameState::initial();
        let new_state = state.apply_move(3).unwrap();

        assert_eq!(new_state.current_player(), Player::Ai);
        assert_eq!(new_state.board().get(5, 3), Cell::Occupied(Player::Human));
        assert_eq!(state.board().get(5, 3), Cell::Empty);
    }

    #[test]
    fn test_ai_first() {
        let state = GameState::new(Board::default(), Player::Ai);
        let state = state.apply_move(0).unwrap();
        assert_eq!(state.board().get(5, 0), Cell::Occupied(Player::Ai));
        assert_eq!(state.current_player(), Player::Human);
    }

    #[test]
    fn test_rejected_move_keeps_turn() {
        let mut state = GameState::initial();
        for _ in 0..6 {
            state.apply_move_mut(0).unwrap();
        }
        let before = state.current_player();

        assert_eq!(
            state.apply_move_mut(0),
            Err(MoveError::Rejected(Rejected::ColumnFull(0)))
        );
        assert_eq!(state.current_player(), before);
        assert!(!state.legal_actions().contains(&0));
    }

    #[test]
    fn test_win_detection() {
        let mut state = GameState::initial();

        // Human wins with horizontal line
        for col in 0..4 {
            state = state.apply_move(col).unwrap(); // Human
            if col < 3 {
                state = state.apply_move(col).unwrap(); // AI (row above)
            }
        }

        assert!(state.is_terminal());
        assert_eq!(state.outcome(), GameOutcome::Win(Player::Human));
        assert!(state.legal_actions().is_empty());
        assert_eq!(state.apply_move(6), Err(MoveError::GameOver));
    }

    #[test]
    fn test_draw() {
        // Fills the board column by column; no line of four forms at any point.
        let moves = [
            2, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 1, 1, 2, 2, 2, 2, 2, 3, 3, 3, 3, 3, 3, 6, 4, 4, 4,
            4, 4, 4, 5, 5, 5, 5, 5, 5, 6, 6, 6, 6, 6,
        ];
        let mut state = GameState::initial();
        for (turn, &col) in moves.iter().enumerate() {
            assert!(!state.is_terminal(), "game ended early at move {turn}");
            state = state.apply_move(col).unwrap();
        }

        assert_eq!(state.outcome(), GameOutcome::Draw);
        assert!(state.board().is_full());
        assert!(state.legal_actions().is_empty());
        assert_eq!(state.apply_move(0), Err(MoveError::GameOver));
    }
}
