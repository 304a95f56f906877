use caro_common::config::{ConfigManager, FileContentConfigProvider, Validate, YamlConfigSerializer};
use caro_common::games::caro::{BotType, RoomSettings};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = "caro_cli_config.yaml";

fn get_config_path() -> PathBuf {
    if let Ok(exe_path) = std::env::current_exe()
        && let Some(exe_dir) = exe_path.parent()
    {
        return exe_dir.join(CONFIG_FILE_NAME);
    }
    PathBuf::from(CONFIG_FILE_NAME)
}

pub fn get_config_manager(
    path: Option<&Path>,
) -> ConfigManager<FileContentConfigProvider, Config, YamlConfigSerializer> {
    match path {
        Some(path) => ConfigManager::from_yaml_file(path),
        None => ConfigManager::from_yaml_file(get_config_path()),
    }
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct Config {
    pub player_name: String,
    pub room: RoomSettings,
    pub bot: BotType,
    pub record_dir: Option<String>,
    #[serde(default)]
    pub use_log_prefix: bool,
}

impl Validate for Config {
    fn validate(&self) -> Result<(), String> {
        if self.player_name.trim().is_empty() {
            return Err("player_name must not be empty".to_string());
        }
        self.room.validate()?;
        if let Some(ref dir) = self.record_dir
            && dir.trim().is_empty()
        {
            return Err("record_dir must not be empty when set".to_string());
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            player_name: "Player".to_string(),
            room: RoomSettings::default(),
            bot: BotType::Heuristic,
            record_dir: None,
            use_log_prefix: false,
        }
    }
}
