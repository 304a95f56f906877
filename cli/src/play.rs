use std::io::{BufRead, Write};

use caro_common::games::SessionRng;
use caro_common::games::caro::{
    BotInput, BotType, CaroGameState, GameStatus, MoveError, RoomSettings, calculate_move,
};
use caro_common::{PlayerId, log};

use crate::error::CliError;

enum HumanAction {
    Move { row: usize, col: usize },
    Resign,
}

fn parse_human_action(line: &str) -> Result<HumanAction, String> {
    let trimmed = line.trim();
    if trimmed.eq_ignore_ascii_case("resign") || trimmed.eq_ignore_ascii_case("quit") {
        return Ok(HumanAction::Resign);
    }

    let parts: Vec<&str> = trimmed
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .collect();
    let [row, col] = parts.as_slice() else {
        return Err("Enter a move as 'row col', or 'resign'".to_string());
    };
    let row = row.parse::<usize>().map_err(|_| format!("'{}' is not a row number", row))?;
    let col = col.parse::<usize>().map_err(|_| format!("'{}' is not a column number", col))?;
    Ok(HumanAction::Move { row, col })
}

/// Human versus bot on a line-based terminal. End of input counts as resigning.
pub fn run_game(
    input: &mut impl BufRead,
    output: &mut impl Write,
    settings: &RoomSettings,
    human: PlayerId,
    bot: PlayerId,
    bot_type: BotType,
    rng: &mut SessionRng,
) -> Result<CaroGameState, CliError> {
    let mut state = CaroGameState::new(settings, [human.clone(), bot.clone()], rng)
        .map_err(CliError::Settings)?;

    writeln!(
        output,
        "{} is X, {} is O. {} in a row wins.",
        state.player_x, state.player_o, state.win_length
    )?;

    while state.status == GameStatus::InProgress {
        if state.current_player == bot {
            let bot_input = BotInput::from_game_state(&state);
            let Some(pos) = calculate_move(bot_type, bot_input, rng) else {
                break;
            };
            state.place_mark(&bot, pos.row, pos.col)?;
            writeln!(output, "{} plays {}", bot, pos)?;
            continue;
        }

        write!(output, "{}", state.board.render(&[]))?;
        write!(output, "{} ({}) > ", human, state.current_mark)?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            state.forfeit(&human).map_err(CliError::Settings)?;
            break;
        }

        match parse_human_action(&line) {
            Ok(HumanAction::Resign) => {
                state.forfeit(&human).map_err(CliError::Settings)?;
            }
            Ok(HumanAction::Move { row, col }) => match state.place_mark(&human, row, col) {
                Ok(_) => {}
                Err(e @ (MoveError::OutOfBounds(_) | MoveError::CellOccupied(_))) => {
                    writeln!(output, "{}", e)?;
                }
                Err(e) => return Err(e.into()),
            },
            Err(message) => writeln!(output, "{}", message)?,
        }
    }

    print_result(&state, output)?;
    Ok(state)
}

pub fn print_result(state: &CaroGameState, output: &mut impl Write) -> Result<(), CliError> {
    let highlight = state
        .winning_line
        .as_ref()
        .map(|line| line.cells())
        .unwrap_or(&[]);
    write!(output, "{}", state.board.render(highlight))?;

    match (state.get_winner(), &state.forfeited_by) {
        (Some(winner), Some(loser)) => writeln!(output, "{} resigned, {} wins", loser, winner)?,
        (Some(winner), None) => {
            let line = state.winning_line.as_ref().map(|l| l.to_string()).unwrap_or_default();
            writeln!(output, "{} wins with {}", winner, line)?
        }
        (None, _) => writeln!(output, "Draw")?,
    }
    log!("Game finished with status {:?} after {} moves", state.status, state.moves.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use caro_common::games::caro::{FirstPlayerMode, Mark};
    use std::io::Cursor;

    fn play_with_input(text: &str, settings: &RoomSettings) -> (CaroGameState, String) {
        let mut input = Cursor::new(text.as_bytes().to_vec());
        let mut output = Vec::new();
        let mut rng = SessionRng::new(11);
        let state = run_game(
            &mut input,
            &mut output,
            settings,
            PlayerId::new("human"),
            PlayerId::new("bot"),
            BotType::Heuristic,
            &mut rng,
        )
        .unwrap();
        (state, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_parse_human_action() {
        assert!(matches!(parse_human_action("7 8\n"), Ok(HumanAction::Move { row: 7, col: 8 })));
        assert!(matches!(parse_human_action(" 3,4 "), Ok(HumanAction::Move { row: 3, col: 4 })));
        assert!(matches!(parse_human_action("RESIGN"), Ok(HumanAction::Resign)));
        assert!(parse_human_action("7").is_err());
        assert!(parse_human_action("a b").is_err());
        assert!(parse_human_action("1 2 3").is_err());
    }

    #[test]
    fn test_resign_hands_win_to_bot() {
        let (state, output) = play_with_input("resign\n", &RoomSettings::default());
        assert_eq!(state.status, GameStatus::OWon);
        assert_eq!(state.get_winner(), Some(PlayerId::new("bot")));
        assert!(output.contains("human resigned, bot wins"));
    }

    #[test]
    fn test_bad_input_is_reported_and_end_of_input_resigns() {
        let (state, output) = play_with_input("hello\n99 99\n7 7\n", &RoomSettings::default());
        assert!(output.contains("Enter a move"));
        assert!(output.contains("out of bounds"));
        assert_eq!(state.moves.len(), 2);
        assert_eq!(state.board.get(7, 7), Some(Mark::X));
        assert_eq!(state.forfeited_by, Some(PlayerId::new("human")));
    }

    #[test]
    fn test_occupied_cell_is_reported() {
        let (state, output) = play_with_input("7 7\n7 7\n", &RoomSettings::default());
        assert!(output.contains("already marked"));
        assert_eq!(state.moves.len(), 2);
    }

    #[test]
    fn test_bot_moves_first_when_it_is_x() {
        let settings = RoomSettings {
            first_player: FirstPlayerMode::Random,
            ..RoomSettings::default()
        };
        let mut rng = SessionRng::new(11);
        let mut output = Vec::new();
        let state = run_game(
            &mut Cursor::new(Vec::new()),
            &mut output,
            &settings,
            PlayerId::new("human"),
            PlayerId::new("bot"),
            BotType::Heuristic,
            &mut rng,
        )
        .unwrap();
        if state.player_x == PlayerId::new("bot") {
            assert_eq!(state.moves.len(), 1);
            assert_eq!(state.board.get(7, 7), Some(Mark::X));
        } else {
            assert!(state.moves.is_empty());
        }
        assert_eq!(state.forfeited_by, Some(PlayerId::new("human")));
    }
}
