use std::io::Write;
use std::path::Path;

use caro_common::games::caro::{CaroGameState, load_record};
use caro_common::log;

use crate::error::CliError;
use crate::play::print_result;

pub fn run_replay(path: &Path, output: &mut impl Write) -> Result<CaroGameState, CliError> {
    let record = load_record(path)?;
    log!(
        "Replaying {} ({} moves, {}x{})",
        record.room_id,
        record.moves.len(),
        record.settings.board_size,
        record.settings.board_size
    );
    writeln!(
        output,
        "Room {} played {}: {} (X) vs {} (O)",
        record.room_id, record.created_at, record.player_x, record.player_o
    )?;

    let state = record.replay()?;
    if state.status.is_finished() {
        print_result(&state, output)?;
    } else {
        write!(output, "{}", state.board.render(&[]))?;
        writeln!(output, "Unfinished game, {} to move", state.current_player)?;
    }
    Ok(state)
}
