use serde::{Deserialize, Serialize};

use crate::config::Validate;
use super::types::FirstPlayerMode;
use super::win_detector::CLASSIC_WIN_LENGTH;

pub const BOARD_SIZES: [usize; 2] = [15, 19];
pub const MIN_WIN_CONDITION: usize = 3;
pub const MAX_WIN_CONDITION: usize = 5;

/// How the win length is chosen for a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WinRule {
    /// Always five in a row, whatever `win_condition` says.
    Classic,
    #[default]
    RoomSetting,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomSettings {
    pub board_size: usize,
    pub win_condition: usize,
    pub first_player: FirstPlayerMode,
    #[serde(default)]
    pub win_rule: WinRule,
}

impl RoomSettings {
    pub fn win_length(&self) -> usize {
        match self.win_rule {
            WinRule::Classic => CLASSIC_WIN_LENGTH,
            WinRule::RoomSetting => self.win_condition,
        }
    }
}

impl Default for RoomSettings {
    fn default() -> Self {
        Self {
            board_size: 15,
            win_condition: CLASSIC_WIN_LENGTH,
            first_player: FirstPlayerMode::Host,
            win_rule: WinRule::RoomSetting,
        }
    }
}

impl Validate for RoomSettings {
    fn validate(&self) -> Result<(), String> {
        if !BOARD_SIZES.contains(&self.board_size) {
            return Err(format!(
                "Board size must be one of {:?}, got {}",
                BOARD_SIZES, self.board_size
            ));
        }
        if self.win_condition < MIN_WIN_CONDITION || self.win_condition > MAX_WIN_CONDITION {
            return Err(format!(
                "Win condition must be between {} and {}, got {}",
                MIN_WIN_CONDITION, MAX_WIN_CONDITION, self.win_condition
            ));
        }
        if self.win_length() > self.board_size {
            return Err(format!(
                "Win length ({}) cannot exceed board size ({})",
                self.win_length(),
                self.board_size
            ));
        }
        Ok(())
    }
}
