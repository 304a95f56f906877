use std::fmt;

use super::types::{Mark, Position};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidMoveReason {
    OutOfBounds { board_size: usize },
    EmptyMark,
    CellMismatch { expected: Mark, found: Mark },
}

impl fmt::Display for InvalidMoveReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidMoveReason::OutOfBounds { board_size } => {
                write!(f, "outside of {}x{} board", board_size, board_size)
            }
            InvalidMoveReason::EmptyMark => write!(f, "move mark is empty"),
            InvalidMoveReason::CellMismatch { expected, found } => {
                write!(f, "cell holds {} instead of {}", found, expected)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetectError {
    InvalidMove {
        position: Position,
        reason: InvalidMoveReason,
    },
    InvalidWinLength,
}

impl fmt::Display for DetectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DetectError::InvalidMove { position, reason } => {
                write!(f, "Invalid move at {}: {}", position, reason)
            }
            DetectError::InvalidWinLength => write!(f, "Win length must be at least 1"),
        }
    }
}

impl std::error::Error for DetectError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    GameOver,
    NotYourTurn,
    OutOfBounds(Position),
    CellOccupied(Position),
    Detect(DetectError),
}

impl fmt::Display for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveError::GameOver => write!(f, "Game is already over"),
            MoveError::NotYourTurn => write!(f, "Not your turn"),
            MoveError::OutOfBounds(position) => write!(f, "Position {} out of bounds", position),
            MoveError::CellOccupied(position) => write!(f, "Cell {} is already marked", position),
            MoveError::Detect(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for MoveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MoveError::Detect(e) => Some(e),
            _ => None,
        }
    }
}

impl From<DetectError> for MoveError {
    fn from(e: DetectError) -> Self {
        MoveError::Detect(e)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardParseError {
    Empty,
    UnknownSymbol { line: usize, symbol: char },
    NotSquare { line: usize, expected: usize, found: usize },
    RowCount { expected: usize, found: usize },
}

impl fmt::Display for BoardParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardParseError::Empty => write!(f, "Board has no rows"),
            BoardParseError::UnknownSymbol { line, symbol } => {
                write!(f, "Unknown symbol '{}' on line {}", symbol, line)
            }
            BoardParseError::NotSquare { line, expected, found } => write!(
                f,
                "Line {} has {} cells, expected {} for a square board",
                line, found, expected
            ),
            BoardParseError::RowCount { expected, found } => {
                write!(f, "Board has {} rows, expected {}", found, expected)
            }
        }
    }
}

impl std::error::Error for BoardParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_error_display() {
        let err = DetectError::InvalidMove {
            position: Position::new(3, 20),
            reason: InvalidMoveReason::OutOfBounds { board_size: 15 },
        };
        assert_eq!(err.to_string(), "Invalid move at (3, 20): outside of 15x15 board");
    }

    #[test]
    fn test_move_error_wraps_detect_error() {
        let err: MoveError = DetectError::InvalidWinLength.into();
        assert_eq!(err.to_string(), "Win length must be at least 1");
        assert!(std::error::Error::source(&err).is_some());
    }
}
