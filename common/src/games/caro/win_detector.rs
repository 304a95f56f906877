use super::board::Board;
use super::error::{DetectError, InvalidMoveReason};
use super::types::{Mark, Position, WinningLine};

pub const CLASSIC_WIN_LENGTH: usize = 5;

/// Row and column steps in check order: horizontal, vertical, diagonal, anti-diagonal.
/// The first direction that reaches the win length is the one reported.
pub const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// Checks whether the stone `mark` at `(row, col)` completes a line of at least
/// `win_length` stones. The move must already be applied to `board`.
///
/// Returns the whole contiguous run (overlines are not clipped), ordered along
/// the direction vector.
pub fn detect_win(
    board: &Board,
    row: usize,
    col: usize,
    mark: Mark,
    win_length: usize,
) -> Result<Option<WinningLine>, DetectError> {
    if win_length == 0 {
        return Err(DetectError::InvalidWinLength);
    }
    validate_move(board, row, col, mark)?;

    if board.size() < win_length {
        return Ok(None);
    }

    for (d_row, d_col) in DIRECTIONS {
        let forward = run_length(board, row, col, mark, d_row, d_col);
        let backward = run_length(board, row, col, mark, -d_row, -d_col);
        let total = forward + backward + 1;
        if total < win_length {
            continue;
        }

        let Some((start_row, start_col)) =
            offset(row, col, -d_row * backward as isize, -d_col * backward as isize)
        else {
            continue;
        };
        let cells = (0..total)
            .filter_map(|i| offset(start_row, start_col, d_row * i as isize, d_col * i as isize))
            .map(|(r, c)| Position::new(r, c))
            .collect();
        return Ok(Some(WinningLine::new(mark, cells)));
    }

    Ok(None)
}

/// Classic five-in-a-row check, regardless of any configured win condition.
pub fn detect_five(
    board: &Board,
    row: usize,
    col: usize,
    mark: Mark,
) -> Result<Option<WinningLine>, DetectError> {
    detect_win(board, row, col, mark, CLASSIC_WIN_LENGTH)
}

/// `false` when there is no line or the line is empty.
pub fn is_winning_cell(row: usize, col: usize, winning_line: Option<&WinningLine>) -> bool {
    winning_line.is_some_and(|line| line.contains(row, col))
}

fn validate_move(board: &Board, row: usize, col: usize, mark: Mark) -> Result<(), DetectError> {
    let position = Position::new(row, col);
    if mark == Mark::Empty {
        return Err(DetectError::InvalidMove {
            position,
            reason: InvalidMoveReason::EmptyMark,
        });
    }
    let Some(found) = board.get(row, col) else {
        return Err(DetectError::InvalidMove {
            position,
            reason: InvalidMoveReason::OutOfBounds {
                board_size: board.size(),
            },
        });
    };
    if found != mark {
        return Err(DetectError::InvalidMove {
            position,
            reason: InvalidMoveReason::CellMismatch {
                expected: mark,
                found,
            },
        });
    }
    Ok(())
}

/// Number of consecutive `mark` cells after `(row, col)` in the given direction.
fn run_length(board: &Board, row: usize, col: usize, mark: Mark, d_row: isize, d_col: isize) -> usize {
    let mut count = 0;
    let (mut r, mut c) = (row, col);
    while let Some((next_r, next_c)) = offset(r, c, d_row, d_col) {
        if board.get(next_r, next_c) != Some(mark) {
            break;
        }
        count += 1;
        r = next_r;
        c = next_c;
    }
    count
}

fn offset(row: usize, col: usize, d_row: isize, d_col: isize) -> Option<(usize, usize)> {
    Some((row.checked_add_signed(d_row)?, col.checked_add_signed(d_col)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with(size: usize, stones: &[(usize, usize, Mark)]) -> Board {
        let mut board = Board::new(size);
        for &(row, col, mark) in stones {
            board.set(row, col, mark);
        }
        board
    }

    fn positions(cells: &[(usize, usize)]) -> Vec<Position> {
        cells.iter().map(|&(r, c)| Position::new(r, c)).collect()
    }

    #[test]
    fn test_no_win_on_sparse_board() {
        let board = board_with(
            15,
            &[
                (7, 7, Mark::X),
                (7, 8, Mark::X),
                (7, 10, Mark::X),
                (8, 8, Mark::X),
                (6, 6, Mark::O),
                (7, 9, Mark::O),
            ],
        );
        assert_eq!(detect_five(&board, 7, 7, Mark::X).unwrap(), None);
        assert_eq!(detect_five(&board, 7, 9, Mark::O).unwrap(), None);
    }

    #[test]
    fn test_four_in_a_row_is_not_a_win() {
        let stones: Vec<_> = (3..7).map(|col| (7, col, Mark::X)).collect();
        let board = board_with(15, &stones);
        assert_eq!(detect_five(&board, 7, 6, Mark::X).unwrap(), None);
    }

    #[test]
    fn test_horizontal_win() {
        let stones: Vec<_> = (3..=7).map(|col| (7, col, Mark::X)).collect();
        let board = board_with(15, &stones);
        let line = detect_five(&board, 7, 7, Mark::X).unwrap().unwrap();
        assert_eq!(
            line.cells(),
            positions(&[(7, 3), (7, 4), (7, 5), (7, 6), (7, 7)]).as_slice()
        );
        assert_eq!(line.mark(), Mark::X);
    }

    #[test]
    fn test_vertical_win() {
        let stones: Vec<_> = (2..=6).map(|row| (row, 4, Mark::O)).collect();
        let board = board_with(15, &stones);
        let line = detect_five(&board, 2, 4, Mark::O).unwrap().unwrap();
        assert_eq!(
            line.cells(),
            positions(&[(2, 4), (3, 4), (4, 4), (5, 4), (6, 4)]).as_slice()
        );
    }

    #[test]
    fn test_diagonal_win_ordered_along_direction() {
        let stones: Vec<_> = (0..5).map(|i| (4 + i, 2 + i, Mark::X)).collect();
        let board = board_with(15, &stones);
        let line = detect_five(&board, 6, 4, Mark::X).unwrap().unwrap();
        assert_eq!(
            line.cells(),
            positions(&[(4, 2), (5, 3), (6, 4), (7, 5), (8, 6)]).as_slice()
        );
    }

    #[test]
    fn test_anti_diagonal_win_ordered_along_direction() {
        let stones: Vec<_> = (0..5).map(|i| (3 + i, 10 - i, Mark::O)).collect();
        let board = board_with(15, &stones);
        let line = detect_five(&board, 5, 8, Mark::O).unwrap().unwrap();
        assert_eq!(
            line.cells(),
            positions(&[(3, 10), (4, 9), (5, 8), (6, 7), (7, 6)]).as_slice()
        );
    }

    #[test]
    fn test_horizontal_wins_tie_break_over_vertical() {
        let mut stones: Vec<_> = (3..=7).map(|col| (7, col, Mark::X)).collect();
        stones.extend((3..=7).map(|row| (row, 5, Mark::X)));
        let board = board_with(15, &stones);
        let line = detect_five(&board, 7, 5, Mark::X).unwrap().unwrap();
        assert!(line.cells().iter().all(|p| p.row == 7));
        assert_eq!(line.len(), 5);
    }

    #[test]
    fn test_vertical_wins_tie_break_over_diagonals() {
        let mut stones: Vec<_> = (0..5).map(|row| (row, 4, Mark::O)).collect();
        stones.extend((0..5).map(|i| (i, i, Mark::O)));
        let board = board_with(15, &stones);
        let line = detect_five(&board, 4, 4, Mark::O).unwrap().unwrap();
        assert!(line.cells().iter().all(|p| p.col == 4));
    }

    #[test]
    fn test_diagonal_wins_tie_break_over_anti_diagonal() {
        let mut stones: Vec<_> = (0..5).map(|i| (5 + i, 5 + i, Mark::X)).collect();
        stones.extend((0..5).map(|i| (5 + i, 9 - i, Mark::X)));
        let board = board_with(15, &stones);
        let line = detect_five(&board, 7, 7, Mark::X).unwrap().unwrap();
        assert_eq!(line.start(), Some(Position::new(5, 5)));
        assert_eq!(line.end(), Some(Position::new(9, 9)));
    }

    #[test]
    fn test_overline_is_returned_whole() {
        let stones: Vec<_> = (2..=7).map(|col| (0, col, Mark::X)).collect();
        let board = board_with(15, &stones);
        let line = detect_five(&board, 0, 4, Mark::X).unwrap().unwrap();
        assert_eq!(line.len(), 6);
        assert_eq!(line.start(), Some(Position::new(0, 2)));
        assert_eq!(line.end(), Some(Position::new(0, 7)));
    }

    #[test]
    fn test_line_stops_at_opponent_stone() {
        let board = board_with(
            15,
            &[
                (7, 2, Mark::O),
                (7, 3, Mark::X),
                (7, 4, Mark::X),
                (7, 5, Mark::X),
                (7, 6, Mark::X),
                (7, 7, Mark::O),
            ],
        );
        assert_eq!(detect_five(&board, 7, 4, Mark::X).unwrap(), None);
    }

    #[test]
    fn test_lines_touching_board_edges() {
        let stones: Vec<_> = (10..15).map(|col| (14, col, Mark::X)).collect();
        let board = board_with(15, &stones);
        let line = detect_five(&board, 14, 14, Mark::X).unwrap().unwrap();
        assert_eq!(line.start(), Some(Position::new(14, 10)));

        let stones: Vec<_> = (0..5).map(|i| (i, 4 - i, Mark::O)).collect();
        let board = board_with(5, &stones);
        let line = detect_five(&board, 0, 4, Mark::O).unwrap().unwrap();
        assert_eq!(line.start(), Some(Position::new(0, 4)));
        assert_eq!(line.end(), Some(Position::new(4, 0)));
    }

    #[test]
    fn test_board_smaller_than_five_never_wins() {
        let full_row = vec![vec![Mark::X; 4]; 4];
        let board = Board::from_rows(full_row).unwrap();
        for row in 0..4 {
            for col in 0..4 {
                assert_eq!(detect_five(&board, row, col, Mark::X).unwrap(), None);
            }
        }
    }

    #[test]
    fn test_configured_win_length() {
        let stones: Vec<_> = (0..3).map(|row| (row, 0, Mark::X)).collect();
        let board = board_with(15, &stones);
        assert_eq!(detect_five(&board, 1, 0, Mark::X).unwrap(), None);
        let line = detect_win(&board, 1, 0, Mark::X, 3).unwrap().unwrap();
        assert_eq!(line.cells(), positions(&[(0, 0), (1, 0), (2, 0)]).as_slice());
        assert!(detect_win(&board, 1, 0, Mark::X, 4).unwrap().is_none());
    }

    #[test]
    fn test_detection_is_idempotent() {
        let stones: Vec<_> = (0..5).map(|i| (i + 1, i + 1, Mark::X)).collect();
        let board = board_with(15, &stones);
        let first = detect_five(&board, 3, 3, Mark::X).unwrap();
        let second = detect_five(&board, 3, 3, Mark::X).unwrap();
        assert_eq!(first, second);
        assert!(first.is_some());
    }

    #[test]
    fn test_invalid_moves_are_rejected() {
        let board = board_with(15, &[(0, 0, Mark::X)]);
        assert!(matches!(
            detect_five(&board, 15, 0, Mark::X),
            Err(DetectError::InvalidMove {
                reason: InvalidMoveReason::OutOfBounds { board_size: 15 },
                ..
            })
        ));
        assert!(matches!(
            detect_five(&board, 0, 0, Mark::O),
            Err(DetectError::InvalidMove {
                reason: InvalidMoveReason::CellMismatch { .. },
                ..
            })
        ));
        assert!(matches!(
            detect_five(&board, 1, 1, Mark::Empty),
            Err(DetectError::InvalidMove {
                reason: InvalidMoveReason::EmptyMark,
                ..
            })
        ));
        assert_eq!(
            detect_win(&board, 0, 0, Mark::X, 0),
            Err(DetectError::InvalidWinLength)
        );
    }

    #[test]
    fn test_single_stone_wins_with_length_one() {
        let board = board_with(1, &[(0, 0, Mark::O)]);
        let line = detect_win(&board, 0, 0, Mark::O, 1).unwrap().unwrap();
        assert_eq!(line.cells(), positions(&[(0, 0)]).as_slice());
    }

    #[test]
    fn test_is_winning_cell() {
        let stones: Vec<_> = (3..=7).map(|col| (7, col, Mark::X)).collect();
        let board = board_with(15, &stones);
        let line = detect_five(&board, 7, 7, Mark::X).unwrap().unwrap();
        assert!(is_winning_cell(7, 5, Some(&line)));
        assert!(!is_winning_cell(8, 5, Some(&line)));
        assert!(!is_winning_cell(7, 5, None));

        let empty = WinningLine::new(Mark::X, Vec::new());
        assert!(!is_winning_cell(0, 0, Some(&empty)));
    }
}
