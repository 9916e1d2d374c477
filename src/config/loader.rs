use super::Config;
use crate::error::ConfigError;
use anyhow::{Context, Result};
use directories::UserDirs;
use std::fs;
use std::path::{Path, PathBuf};

impl Config {
    pub fn load_or_init() -> Result<Self> {
        let home = UserDirs::new()
            .map(|u| u.home_dir().to_path_buf())
            .context("Could not find home directory")?;
        Self::load_or_init_in(&home.join(".writewise"))
    }

    /// Load `config.toml` from `data_dir`, writing a default one on first run.
    pub fn load_or_init_in(data_dir: &Path) -> Result<Self> {
        let config_path = data_dir.join("config.toml");

        if !data_dir.exists() {
            fs::create_dir_all(data_dir).context("Failed to create .writewise directory")?;
        }

        if config_path.exists() {
            let contents = fs::read_to_string(&config_path).map_err(ConfigError::Io)?;
            let mut config: Config = toml::from_str(&contents)
                .map_err(|err| ConfigError::Load(format!("{}: {err}", config_path.display())))?;
            config.config_path.clone_from(&config_path);
            config.data_dir = data_dir.to_path_buf();
            config.validate()?;
            Ok(config)
        } else {
            let config = Self {
                config_path,
                data_dir: data_dir.to_path_buf(),
                first_run: true,
                ..Self::default()
            };
            config.validate()?;
            config.save()?;
            Ok(config)
        }
    }

    pub fn save(&self) -> Result<()> {
        let toml_str = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(&self.config_path, toml_str).context("Failed to write config file")?;
        Ok(())
    }

    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.history.task_library_capacity == 0 {
            return Err(ConfigError::Validation(
                "history.task_library_capacity must be at least 1".into(),
            ));
        }
        if self.history.assessment_history_capacity == 0 {
            return Err(ConfigError::Validation(
                "history.assessment_history_capacity must be at least 1".into(),
            ));
        }
        if !(0.0..=2.0).contains(&self.default_temperature) {
            return Err(ConfigError::Validation(format!(
                "default_temperature must be within [0.0, 2.0], got {}",
                self.default_temperature
            )));
        }
        if self.default_model.trim().is_empty() {
            return Err(ConfigError::Validation("default_model must not be empty".into()));
        }
        Ok(())
    }

    pub fn database_path(&self) -> PathBuf {
        self.storage.path.as_deref().map_or_else(
            || self.data_dir.join("state.db"),
            |p| PathBuf::from(shellexpand::tilde(p).into_owned()),
        )
    }

    pub fn export_dir(&self) -> PathBuf {
        self.export.directory.as_deref().map_or_else(
            || PathBuf::from("."),
            |p| PathBuf::from(shellexpand::tilde(p).into_owned()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::Config;
    use tempfile::TempDir;

    #[test]
    fn first_run_writes_default_config() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join(".writewise");

        let config = Config::load_or_init_in(&dir).unwrap();

        assert!(dir.join("config.toml").exists());
        assert!(config.first_run);
        assert_eq!(config.default_model, "gemini-2.5-flash");
        assert_eq!(config.history.task_library_capacity, 5);
        assert_eq!(config.database_path(), dir.join("state.db"));
    }

    #[test]
    fn existing_config_is_reloaded() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(
            tmp.path().join("config.toml"),
            "default_model = \"gemini-2.0-pro\"\n\n[history]\nassessment_history_capacity = 10\n",
        )
        .unwrap();

        let config = Config::load_or_init_in(tmp.path()).unwrap();

        assert!(!config.first_run);
        assert_eq!(config.default_model, "gemini-2.0-pro");
        assert_eq!(config.history.assessment_history_capacity, 10);
        assert_eq!(config.history.task_library_capacity, 5);
    }

    #[test]
    fn zero_capacity_is_rejected() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(
            tmp.path().join("config.toml"),
            "[history]\ntask_library_capacity = 0\n",
        )
        .unwrap();

        let err = Config::load_or_init_in(tmp.path()).unwrap_err();
        assert!(err.to_string().contains("task_library_capacity"));
    }

    #[test]
    fn malformed_file_reports_its_path() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("config.toml"), "default_model = [\n").unwrap();

        let err = Config::load_or_init_in(tmp.path()).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("failed to load config"));
        assert!(message.contains("config.toml"));
    }

    #[test]
    fn out_of_range_temperature_is_rejected() {
        let config = Config {
            default_temperature: 3.5,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn explicit_storage_path_overrides_default() {
        let config = Config {
            storage: crate::config::StorageConfig {
                path: Some("/var/tmp/ww.db".into()),
                ..Default::default()
            },
            ..Config::default()
        };
        assert_eq!(config.database_path(), std::path::PathBuf::from("/var/tmp/ww.db"));
    }
}
