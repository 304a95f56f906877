mod board;
mod bot_controller;
mod error;
mod game_state;
mod record;
mod settings;
mod types;
mod win_detector;

pub use board::Board;
pub use bot_controller::{BotInput, BotType, calculate_heuristic_move, calculate_move};
pub use error::{BoardParseError, DetectError, InvalidMoveReason, MoveError};
pub use game_state::CaroGameState;
pub use record::{
    GameRecord, RECORD_FILE_EXTENSION, RECORD_VERSION, RecordError, RecordedMove, load_record,
    save_record,
};
pub use settings::{BOARD_SIZES, MAX_WIN_CONDITION, MIN_WIN_CONDITION, RoomSettings, WinRule};
pub use types::{FirstPlayerMode, GameStatus, Mark, Position, WinningLine};
pub use win_detector::{CLASSIC_WIN_LENGTH, DIRECTIONS, detect_five, detect_win, is_winning_cell};
