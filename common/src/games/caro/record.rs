use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use crate::games::SessionRng;
use crate::identifiers::{PlayerId, RoomId};
use super::error::MoveError;
use super::game_state::CaroGameState;
use super::settings::RoomSettings;
use super::types::{FirstPlayerMode, Mark};

pub const RECORD_VERSION: u32 = 1;
pub const RECORD_FILE_EXTENSION: &str = "caro.yaml";

#[derive(Debug)]
pub enum RecordError {
    Io(std::io::Error),
    Yaml(serde_yaml_ng::Error),
    UnsupportedVersion { found: u32, expected: u32 },
    InvalidSettings(String),
    Forfeit(String),
    Move { index: usize, source: MoveError },
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordError::Io(e) => write!(f, "IO error: {}", e),
            RecordError::Yaml(e) => write!(f, "YAML error: {}", e),
            RecordError::UnsupportedVersion { found, expected } => {
                write!(f, "Unsupported record version: found {}, expected {}", found, expected)
            }
            RecordError::InvalidSettings(e) => write!(f, "Invalid room settings: {}", e),
            RecordError::Forfeit(e) => write!(f, "Invalid forfeit: {}", e),
            RecordError::Move { index, source } => write!(f, "Move #{} rejected: {}", index + 1, source),
        }
    }
}

impl std::error::Error for RecordError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RecordError::Io(e) => Some(e),
            RecordError::Yaml(e) => Some(e),
            RecordError::Move { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<std::io::Error> for RecordError {
    fn from(e: std::io::Error) -> Self {
        RecordError::Io(e)
    }
}

impl From<serde_yaml_ng::Error> for RecordError {
    fn from(e: serde_yaml_ng::Error) -> Self {
        RecordError::Yaml(e)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordedMove {
    pub row: usize,
    pub col: usize,
    pub mark: Mark,
}

/// Finished or abandoned game, enough to replay it move by move.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    pub version: u32,
    pub room_id: RoomId,
    pub created_at: String,
    pub settings: RoomSettings,
    pub player_x: PlayerId,
    pub player_o: PlayerId,
    pub moves: Vec<RecordedMove>,
    #[serde(default)]
    pub forfeited_by: Option<PlayerId>,
}

impl GameRecord {
    pub fn from_game(state: &CaroGameState, settings: &RoomSettings, room_id: impl Into<RoomId>) -> Self {
        let moves = state
            .moves
            .iter()
            .enumerate()
            .map(|(index, pos)| RecordedMove {
                row: pos.row,
                col: pos.col,
                mark: if index % 2 == 0 { Mark::X } else { Mark::O },
            })
            .collect();

        Self {
            version: RECORD_VERSION,
            room_id: room_id.into(),
            created_at: Local::now().to_rfc3339(),
            settings: settings.clone(),
            player_x: state.player_x.clone(),
            player_o: state.player_o.clone(),
            moves,
            forfeited_by: state.forfeited_by.clone(),
        }
    }

    /// Plays every move again on a fresh board and returns the resulting state.
    pub fn replay(&self) -> Result<CaroGameState, RecordError> {
        if self.version != RECORD_VERSION {
            return Err(RecordError::UnsupportedVersion {
                found: self.version,
                expected: RECORD_VERSION,
            });
        }

        let settings = RoomSettings {
            first_player: FirstPlayerMode::Host,
            ..self.settings.clone()
        };
        let mut rng = SessionRng::new(0);
        let mut state = CaroGameState::new(
            &settings,
            [self.player_x.clone(), self.player_o.clone()],
            &mut rng,
        )
        .map_err(RecordError::InvalidSettings)?;

        for (index, recorded) in self.moves.iter().enumerate() {
            if recorded.mark != state.current_mark {
                return Err(RecordError::Move {
                    index,
                    source: MoveError::NotYourTurn,
                });
            }
            let player = state.current_player.clone();
            state
                .place_mark(&player, recorded.row, recorded.col)
                .map_err(|source| RecordError::Move { index, source })?;
        }

        if let Some(ref loser) = self.forfeited_by {
            state.forfeit(loser).map_err(RecordError::Forfeit)?;
        }

        Ok(state)
    }

    pub fn to_yaml(&self) -> Result<String, RecordError> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    pub fn from_yaml(content: &str) -> Result<Self, RecordError> {
        Ok(serde_yaml_ng::from_str(content)?)
    }
}

pub fn save_record(path: &Path, record: &GameRecord) -> Result<(), RecordError> {
    std::fs::write(path, record.to_yaml()?)?;
    Ok(())
}

pub fn load_record(path: &Path) -> Result<GameRecord, RecordError> {
    let content = std::fs::read_to_string(path)?;
    GameRecord::from_yaml(&content)
}
