use crate::game::{GameOutcome, Player};

/// Score of a position as seen by `perspective`: 1 for a win, -1 for a
/// loss, 0 for a draw or a position still in progress.
pub fn score(outcome: GameOutcome, perspective: Player) -> i32 {
    match outcome {
        GameOutcome::Win(winner) if winner == perspective => 1,
        GameOutcome::Win(_) => -1,
        GameOutcome::Draw | GameOutcome::InProgress => 0,
    }
}
