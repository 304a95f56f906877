use serde::{Deserialize, Serialize};

use crate::games::SessionRng;
use super::board::Board;
use super::game_state::CaroGameState;
use super::types::{Mark, Position};
use super::win_detector::{DIRECTIONS, detect_win};

const NEIGHBOURHOOD: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BotType {
    Random,
    Heuristic,
}

pub struct BotInput {
    pub board: Board,
    pub win_length: usize,
    pub current_mark: Mark,
}

impl BotInput {
    pub fn from_game_state(state: &CaroGameState) -> Self {
        Self {
            board: state.board.clone(),
            win_length: state.win_length,
            current_mark: state.current_mark,
        }
    }
}

pub fn calculate_move(bot_type: BotType, input: BotInput, rng: &mut SessionRng) -> Option<Position> {
    match bot_type {
        BotType::Random => calculate_random_move(&input, rng),
        BotType::Heuristic => calculate_heuristic_move(input, rng),
    }
}

fn calculate_random_move(input: &BotInput, rng: &mut SessionRng) -> Option<Position> {
    let available_moves = input.board.available_moves();
    rng.choose(&available_moves).copied()
}

pub fn calculate_heuristic_move(input: BotInput, rng: &mut SessionRng) -> Option<Position> {
    let bot_mark = input.current_mark;
    let opponent_mark = bot_mark.opponent()?;
    let mut board = input.board;

    if board.is_empty() {
        let center = board.size() / 2;
        return board
            .in_bounds(center, center)
            .then_some(Position::new(center, center));
    }

    let candidates = candidate_moves(&board);
    if candidates.is_empty() {
        return None;
    }

    if let Some(pos) = find_winning_move(&mut board, bot_mark, input.win_length, &candidates) {
        return Some(pos);
    }
    if let Some(pos) = find_winning_move(&mut board, opponent_mark, input.win_length, &candidates) {
        return Some(pos);
    }

    let mut best_score = i64::MIN;
    let mut best_moves = Vec::new();
    for &pos in &candidates {
        let score = score_cell(&board, pos, bot_mark, input.win_length) * 10
            + score_cell(&board, pos, opponent_mark, input.win_length) * 9;
        if score > best_score {
            best_score = score;
            best_moves.clear();
            best_moves.push(pos);
        } else if score == best_score {
            best_moves.push(pos);
        }
    }

    rng.choose(&best_moves).copied()
}

/// Empty cells within a small distance of any stone.
fn candidate_moves(board: &Board) -> Vec<Position> {
    board
        .available_moves()
        .into_iter()
        .filter(|pos| has_neighbour(board, *pos))
        .collect()
}

fn has_neighbour(board: &Board, pos: Position) -> bool {
    (pos.row.saturating_sub(NEIGHBOURHOOD)..=pos.row + NEIGHBOURHOOD).any(|row| {
        (pos.col.saturating_sub(NEIGHBOURHOOD)..=pos.col + NEIGHBOURHOOD)
            .any(|col| matches!(board.get(row, col), Some(Mark::X | Mark::O)))
    })
}

fn find_winning_move(
    board: &mut Board,
    mark: Mark,
    win_length: usize,
    moves: &[Position],
) -> Option<Position> {
    for &pos in moves {
        board.set(pos.row, pos.col, mark);
        let wins = matches!(detect_win(board, pos.row, pos.col, mark, win_length), Ok(Some(_)));
        board.set(pos.row, pos.col, Mark::Empty);

        if wins {
            return Some(pos);
        }
    }
    None
}

/// Value of a stone of `mark` at the empty cell `pos`, summed over the four directions.
fn score_cell(board: &Board, pos: Position, mark: Mark, win_length: usize) -> i64 {
    DIRECTIONS
        .iter()
        .map(|&(d_row, d_col)| {
            let (forward, forward_open) = extend(board, pos, mark, d_row, d_col);
            let (backward, backward_open) = extend(board, pos, mark, -d_row, -d_col);
            let open_ends = forward_open as i64 + backward_open as i64;
            line_value(forward + backward + 1, open_ends, win_length)
        })
        .sum()
}

fn line_value(length: usize, open_ends: i64, win_length: usize) -> i64 {
    if length >= win_length {
        return 1_000_000;
    }
    if open_ends == 0 {
        return 0;
    }
    let missing = (win_length - length) as u32;
    10_i64.pow(5u32.saturating_sub(missing)) * open_ends
}

/// Run of `mark` next to `pos` in one direction, and whether the cell past it is empty.
fn extend(board: &Board, pos: Position, mark: Mark, d_row: isize, d_col: isize) -> (usize, bool) {
    let mut count = 0;
    let (mut row, mut col) = (pos.row, pos.col);
    loop {
        let (Some(next_row), Some(next_col)) =
            (row.checked_add_signed(d_row), col.checked_add_signed(d_col))
        else {
            return (count, false);
        };
        match board.get(next_row, next_col) {
            Some(cell) if cell == mark => {
                count += 1;
                row = next_row;
                col = next_col;
            }
            Some(Mark::Empty) => return (count, true),
            _ => return (count, false),
        }
    }
}
