use crate::Player;

/// Why [`BoardEngine::attempt_move()`](crate::BoardEngine::attempt_move) refused a move.
///
/// A refused move never changes the board or the turn state, so callers are
/// free to ignore it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IllegalMove {
    GameFinished,
    OutOfBounds { row: usize, col: usize },
    Occupied { row: usize, col: usize, owner: Player },
}

impl std::error::Error for IllegalMove {}

impl std::fmt::Display for IllegalMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IllegalMove::GameFinished => {
                write!(f, "The game is already finished, no more moves are accepted")
            }
            IllegalMove::OutOfBounds { row, col } => {
                write!(f, "Cell ({}, {}) is outside of the board", row, col)
            }
            IllegalMove::Occupied { row, col, owner } => {
                write!(f, "Cell ({}, {}) is already taken by player {}", row, col, owner)
            }
        }
    }
}

/// The error type for [`GameConfig::validate()`](crate::GameConfig::validate).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InvalidConfig {
    ZeroWidth,
    ZeroHeight,
    BoardTooLarge,
    ZeroWinLength,
    ZeroCellSize,
}

impl std::error::Error for InvalidConfig {}

impl std::fmt::Display for InvalidConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidConfig::ZeroWidth => write!(f, "The board must be at least one cell wide"),
            InvalidConfig::ZeroHeight => write!(f, "The board must be at least one cell high"),
            InvalidConfig::BoardTooLarge => write!(f, "The board has too many cells"),
            InvalidConfig::ZeroWinLength => {
                write!(f, "At least one cell in a row must be required to win")
            }
            InvalidConfig::ZeroCellSize => {
                write!(f, "Cell width and height must both be greater than zero")
            }
        }
    }
}
