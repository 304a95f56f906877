use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use super::{
    ConfigContentProvider, ConfigError, ConfigSerializer, FileContentConfigProvider, Validate,
    YamlConfigSerializer,
};

/// Loads a config once, caches it, and validates on every read from storage and every write.
pub struct ConfigManager<TConfigContentProvider, TConfig, TConfigSerializer = YamlConfigSerializer>
where
    TConfigContentProvider: ConfigContentProvider,
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
    TConfigSerializer: ConfigSerializer<TConfig>,
{
    config_serializer: TConfigSerializer,
    config_content_provider: TConfigContentProvider,
    config: Arc<Mutex<Option<TConfig>>>,
}

impl<TConfig> ConfigManager<FileContentConfigProvider, TConfig, YamlConfigSerializer>
where
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
{
    pub fn from_yaml_file(file_path: impl AsRef<Path>) -> Self {
        Self::new(
            FileContentConfigProvider::new(file_path.as_ref()),
            YamlConfigSerializer::new(),
        )
    }
}

impl<TConfigContentProvider, TConfig, TConfigSerializer>
    ConfigManager<TConfigContentProvider, TConfig, TConfigSerializer>
where
    TConfigContentProvider: ConfigContentProvider,
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
    TConfigSerializer: ConfigSerializer<TConfig>,
{
    pub fn new(
        config_content_provider: TConfigContentProvider,
        config_serializer: TConfigSerializer,
    ) -> Self {
        Self {
            config: Arc::new(Mutex::new(None)),
            config_content_provider,
            config_serializer,
        }
    }

    pub fn get_config(&self) -> Result<TConfig, ConfigError> {
        let mut current = self.lock_cache();

        if let Some(config) = current.as_ref() {
            return Ok(config.clone());
        }

        let Some(config_data) = self.config_content_provider.get_config_content()? else {
            return Ok(TConfig::default());
        };

        let config = self.config_serializer.deserialize(&config_data)?;
        config.validate().map_err(ConfigError::Validation)?;

        *current = Some(config.clone());
        Ok(config)
    }

    pub fn set_config(&self, config: &TConfig) -> Result<(), ConfigError> {
        config.validate().map_err(ConfigError::Validation)?;

        let serialized_config = self.config_serializer.serialize(config)?;
        self.config_content_provider
            .set_config_content(&serialized_config)?;

        *self.lock_cache() = Some(config.clone());
        Ok(())
    }

    fn lock_cache(&self) -> MutexGuard<'_, Option<TConfig>> {
        self.config
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct SampleConfig {
        board_size: u32,
        name: String,
    }

    impl Default for SampleConfig {
        fn default() -> Self {
            Self {
                board_size: 15,
                name: "default".to_string(),
            }
        }
    }

    impl Validate for SampleConfig {
        fn validate(&self) -> Result<(), String> {
            if self.board_size == 0 {
                return Err("board_size must be positive".to_string());
            }
            Ok(())
        }
    }

    fn get_temp_file_path() -> std::path::PathBuf {
        let random_number: u32 = rand::random();
        std::env::temp_dir().join(format!("temp_caro_config_manager_{}.yaml", random_number))
    }

    #[test]
    fn test_missing_file_returns_default() {
        let manager: ConfigManager<_, SampleConfig, _> =
            ConfigManager::from_yaml_file("this_file_does_not_exist.yaml");
        assert_eq!(manager.get_config().unwrap(), SampleConfig::default());
    }

    #[test]
    fn test_set_then_get_round_trips_through_file() {
        let file_path = get_temp_file_path();
        let config = SampleConfig {
            board_size: 19,
            name: "saved".to_string(),
        };

        let manager: ConfigManager<_, SampleConfig, _> = ConfigManager::from_yaml_file(&file_path);
        manager.set_config(&config).unwrap();
        assert_eq!(manager.get_config().unwrap(), config);

        let fresh: ConfigManager<_, SampleConfig, _> = ConfigManager::from_yaml_file(&file_path);
        assert_eq!(fresh.get_config().unwrap(), config);

        let _ = std::fs::remove_file(file_path);
    }

    #[test]
    fn test_invalid_config_is_not_saved() {
        let file_path = get_temp_file_path();
        let manager: ConfigManager<_, SampleConfig, _> = ConfigManager::from_yaml_file(&file_path);
        let invalid = SampleConfig {
            board_size: 0,
            name: "broken".to_string(),
        };
        assert!(matches!(
            manager.set_config(&invalid),
            Err(ConfigError::Validation(_))
        ));
        assert!(!file_path.exists());
    }

    #[test]
    fn test_invalid_file_content_is_rejected() {
        let file_path = get_temp_file_path();
        let provider = FileContentConfigProvider::new(&file_path);
        provider.set_config_content("board_size: 0\nname: zero\n").unwrap();

        let manager: ConfigManager<_, SampleConfig, _> =
            ConfigManager::new(provider, YamlConfigSerializer::new());
        assert!(matches!(
            manager.get_config(),
            Err(ConfigError::Validation(_))
        ));

        std::fs::write(&file_path, "board_size: [not, a, number]").unwrap();
        let manager: ConfigManager<_, SampleConfig, _> = ConfigManager::from_yaml_file(&file_path);
        assert!(matches!(
            manager.get_config(),
            Err(ConfigError::Deserialize(_))
        ));

        let _ = std::fs::remove_file(file_path);
    }
}
