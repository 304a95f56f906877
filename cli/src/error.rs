use std::fmt;

use caro_common::config::ConfigError;
use caro_common::games::caro::{BoardParseError, DetectError, MoveError, RecordError};

#[derive(Debug)]
pub enum CliError {
    Io(std::io::Error),
    Config(ConfigError),
    BoardParse(BoardParseError),
    Detect(DetectError),
    Move(MoveError),
    Record(RecordError),
    Settings(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Io(e) => write!(f, "IO error: {}", e),
            CliError::Config(e) => write!(f, "{}", e),
            CliError::BoardParse(e) => write!(f, "Bad board file: {}", e),
            CliError::Detect(e) => write!(f, "{}", e),
            CliError::Move(e) => write!(f, "{}", e),
            CliError::Record(e) => write!(f, "Bad game record: {}", e),
            CliError::Settings(e) => write!(f, "Invalid settings: {}", e),
        }
    }
}

impl std::error::Error for CliError {}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e)
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        CliError::Config(e)
    }
}

impl From<BoardParseError> for CliError {
    fn from(e: BoardParseError) -> Self {
        CliError::BoardParse(e)
    }
}

impl From<DetectError> for CliError {
    fn from(e: DetectError) -> Self {
        CliError::Detect(e)
    }
}

impl From<MoveError> for CliError {
    fn from(e: MoveError) -> Self {
        CliError::Move(e)
    }
}

impl From<RecordError> for CliError {
    fn from(e: RecordError) -> Self {
        CliError::Record(e)
    }
}
