use std::io::Write;
use std::path::Path;

use caro_common::games::caro::{Board, Mark, WinningLine, detect_win};
use caro_common::log;

use crate::error::CliError;

pub struct CheckRequest {
    pub row: usize,
    pub col: usize,
    pub mark: Option<Mark>,
    pub win_length: usize,
}

pub fn run_check_file(
    path: &Path,
    request: &CheckRequest,
    output: &mut impl Write,
) -> Result<Option<WinningLine>, CliError> {
    let content = std::fs::read_to_string(path)?;
    let board = Board::parse(&content)?;
    log!("Loaded {}x{} board from {}", board.size(), board.size(), path.display());
    run_check(&board, request, output)
}

/// Without an explicit mark the stone already on the cell is checked.
pub fn run_check(
    board: &Board,
    request: &CheckRequest,
    output: &mut impl Write,
) -> Result<Option<WinningLine>, CliError> {
    let mark = request
        .mark
        .or_else(|| board.get(request.row, request.col))
        .unwrap_or(Mark::Empty);

    let line = detect_win(board, request.row, request.col, mark, request.win_length)?;

    match line {
        Some(ref line) => {
            write!(output, "{}", board.render(line.cells()))?;
            writeln!(output, "{} wins: {}", mark, line)?;
        }
        None => {
            writeln!(
                output,
                "No winner: {} at ({}, {}) does not complete {} in a row",
                mark, request.row, request.col, request.win_length
            )?;
        }
    }

    Ok(line)
}
