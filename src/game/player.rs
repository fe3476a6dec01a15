#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    Human,
    Ai,
}

impl Player {
    /// Get the other player
    pub fn other(self) -> Player {
        match self {
            Player::Human => Player::Ai,
            Player::Ai => Player::Human,
        }
    }

    /// The player the search maximizes for.
    pub fn is_maximizing(self) -> bool {
        self == Player::Ai
    }

    /// Board mark used when rendering
    pub fn mark(self) -> char {
        match self {
            Player::Human => 'X',
            Player::Ai => 'O',
        }
    }

    /// Get player name for display
    pub fn name(self) -> &'static str {
        match self {
            Player::Human => "Human",
            Player::Ai => "AI",
        }
    }
}
