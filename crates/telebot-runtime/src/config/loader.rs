//! Layered configuration loading with figment.
//!
//! Sources are merged in this order, later ones winning:
//!
//! 1. built-in defaults
//! 2. the profile file, e.g. `telebot.production.toml`
//! 3. the main file, `telebot.toml`/`config.toml` or `telebot.yaml`/`telebot.yml`/`config.yaml`/`config.yml`
//! 4. `TELEBOT_*` environment variables, nested with `__`
//! 5. values set through [`ConfigLoader::set`] and [`ConfigLoader::merge`]
//!
//! TOML files need the `toml-config` feature and YAML files `yaml-config`.
//! With both enabled, one file of each format may be merged, TOML first.
//!
//! ```text
//! TELEBOT_TIMEOUT_SECS=60            -> timeout_secs = 60
//! TELEBOT_LOGGING__LEVEL=debug       -> logging.level = "debug"
//! TELEBOT_BOTS__DICE__TOKEN=123:ABC  -> bots.dice.token = "123:ABC"
//! ```
//!
//! ```rust,ignore
//! let config = ConfigLoader::new()
//!     .file("./config/telebot.toml")
//!     .set("default", "dice")
//!     .load()?;
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use figment::Figment;
#[cfg(any(feature = "toml-config", feature = "yaml-config"))]
use figment::providers::Format;
use figment::providers::{Env, Serialized};
use serde::Serialize;
use tracing::{debug, info, warn};

use super::error::{ConfigError, ConfigResult};
use super::schema::TeleBotConfig;
use super::validation::validate_config;

const ENV_PREFIX: &str = "TELEBOT_";

/// Selects which profile file is merged below the main file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Profile {
    #[default]
    Development,
    Production,
    Custom(String),
}

impl Profile {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
            Self::Custom(name) => name,
        }
    }

    /// Case-insensitive; `dev` and `prod` are accepted.
    pub fn parse(name: &str) -> Self {
        let name = name.to_lowercase();
        match name.as_str() {
            "dev" | "development" => Self::Development,
            "prod" | "production" => Self::Production,
            _ => Self::Custom(name),
        }
    }

    /// Profile named by `TELEBOT_PROFILE`, or development.
    pub fn from_env() -> Self {
        match std::env::var(format!("{ENV_PREFIX}PROFILE")) {
            Ok(name) => Self::parse(&name),
            Err(_) => Self::default(),
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A config file format compiled into this build.
#[derive(Debug, Clone, Copy)]
enum FileFormat {
    #[cfg(feature = "toml-config")]
    Toml,
    #[cfg(feature = "yaml-config")]
    Yaml,
}

impl FileFormat {
    const ENABLED: &'static [Self] = &[
        #[cfg(feature = "toml-config")]
        Self::Toml,
        #[cfg(feature = "yaml-config")]
        Self::Yaml,
    ];

    /// File names searched for, most specific first.
    fn file_names(self) -> &'static [&'static str] {
        match self {
            #[cfg(feature = "toml-config")]
            Self::Toml => &["telebot.toml", "config.toml"],
            #[cfg(feature = "yaml-config")]
            Self::Yaml => &["telebot.yaml", "telebot.yml", "config.yaml", "config.yml"],
        }
    }

    fn for_extension(ext: &str) -> Option<Self> {
        Self::ENABLED
            .iter()
            .copied()
            .find(|format| format.file_names().iter().any(|name| name.ends_with(&format!(".{ext}"))))
    }

    fn merge_into(self, figment: Figment, path: &Path) -> Figment {
        match self {
            #[cfg(feature = "toml-config")]
            Self::Toml => figment.merge(figment::providers::Toml::file(path)),
            #[cfg(feature = "yaml-config")]
            Self::Yaml => figment.merge(figment::providers::Yaml::file(path)),
        }
    }
}

/// Builds a [`TeleBotConfig`] from files, environment and overrides.
pub struct ConfigLoader {
    profile: Profile,
    file: Option<PathBuf>,
    search_paths: Vec<PathBuf>,
    env: bool,
    overrides: Figment,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Searches the default locations and reads the environment.
    pub fn new() -> Self {
        Self {
            profile: Profile::from_env(),
            file: None,
            search_paths: Vec::new(),
            env: true,
            overrides: Figment::new(),
        }
    }

    pub fn profile(mut self, profile: impl AsRef<str>) -> Self {
        self.profile = Profile::parse(profile.as_ref());
        self
    }

    /// Adds a directory to search. Once any is added, the defaults
    /// (working directory, then `<config dir>/telebot`) are no longer used.
    pub fn search_path(mut self, dir: impl Into<PathBuf>) -> Self {
        self.search_paths.push(dir.into());
        self
    }

    pub fn with_current_dir(self) -> Self {
        match std::env::current_dir() {
            Ok(cwd) => self.search_path(cwd),
            Err(_) => self,
        }
    }

    pub fn with_user_config_dir(self) -> Self {
        match dirs::config_dir() {
            Some(dir) => self.search_path(dir.join("telebot")),
            None => self,
        }
    }

    /// Reads exactly this file instead of searching. It must exist.
    pub fn file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = Some(path.into());
        self
    }

    pub fn with_env(mut self) -> Self {
        self.env = true;
        self
    }

    pub fn without_env(mut self) -> Self {
        self.env = false;
        self
    }

    /// Sets one value by dotted key, e.g. `"bots.dice.token"`.
    pub fn set<T: Serialize>(mut self, key: &str, value: T) -> Self {
        self.overrides = self.overrides.merge(Serialized::default(key, value));
        self
    }

    /// Lays a whole configuration over every other source.
    pub fn merge(mut self, config: TeleBotConfig) -> Self {
        self.overrides = self.overrides.merge(Serialized::defaults(config));
        self
    }

    /// Loads and validates.
    pub fn load(self) -> ConfigResult<TeleBotConfig> {
        let config = self.extract()?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Loads without validating.
    pub fn extract(self) -> ConfigResult<TeleBotConfig> {
        let profile = self.profile.clone();
        let config: TeleBotConfig = self.figment()?.extract()?;
        debug!(
            %profile,
            bots = config.bots.len(),
            level = %config.logging.level,
            "Configuration loaded"
        );
        Ok(config)
    }

    fn figment(self) -> ConfigResult<Figment> {
        let defaults = Figment::from(Serialized::defaults(TeleBotConfig::default()));

        let mut figment = match &self.file {
            Some(path) => Self::merge_file(defaults, path)?,
            None => self.merge_found_files(defaults),
        };
        if self.env {
            figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));
        }
        Ok(figment.merge(self.overrides))
    }

    fn merge_file(figment: Figment, path: &Path) -> ConfigResult<Figment> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or_default();
        let format =
            FileFormat::for_extension(ext).ok_or_else(|| ConfigError::UnsupportedFormat(ext.to_owned()))?;
        info!(path = %path.display(), "Loading configuration file");
        Ok(format.merge_into(figment, path))
    }

    fn dirs(&self) -> Vec<PathBuf> {
        if !self.search_paths.is_empty() {
            return self.search_paths.clone();
        }
        std::env::current_dir()
            .ok()
            .into_iter()
            .chain(dirs::config_dir().map(|dir| dir.join("telebot")))
            .collect()
    }

    /// Merges the first main file found per format, each above its profile file.
    fn merge_found_files(&self, mut figment: Figment) -> Figment {
        let dirs = self.dirs();
        let mut found = false;

        for &format in FileFormat::ENABLED {
            if let Some(main) = self.find(format, &dirs) {
                if let Some(profiled) = self.profile_variant(&main).filter(|p| p.exists()) {
                    debug!(path = %profiled.display(), "Loading profile configuration");
                    figment = format.merge_into(figment, &profiled);
                }
                info!(path = %main.display(), "Loading configuration file");
                figment = format.merge_into(figment, &main);
                found = true;
            }
        }

        if !found {
            warn!("No configuration file found, using defaults");
        }
        figment
    }

    fn find(&self, format: FileFormat, dirs: &[PathBuf]) -> Option<PathBuf> {
        dirs.iter()
            .flat_map(|dir| format.file_names().iter().map(move |name| dir.join(name)))
            .find(|path| path.exists())
    }

    /// `telebot.toml` -> `telebot.<profile>.toml`.
    fn profile_variant(&self, path: &Path) -> Option<PathBuf> {
        let stem = path.file_stem()?.to_str()?;
        let ext = path.extension()?.to_str()?;
        Some(path.with_file_name(format!("{stem}.{}.{ext}", self.profile)))
    }
}

/// Loads and validates the configuration from the default locations.
pub fn load_config() -> ConfigResult<TeleBotConfig> {
    ConfigLoader::new().load()
}

/// Loads and validates `path` merged with the environment.
pub fn load_config_from_file(path: impl Into<PathBuf>) -> ConfigResult<TeleBotConfig> {
    ConfigLoader::new().file(path).load()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BotConfig, LogLevel};

    fn nowhere() -> PathBuf {
        std::env::temp_dir().join("telebot-loader-tests-nonexistent")
    }

    fn isolated() -> ConfigLoader {
        ConfigLoader::new().search_path(nowhere()).without_env()
    }

    #[test]
    fn test_defaults_without_sources() {
        let config = isolated().extract().unwrap();

        assert_eq!(config.logging.level, LogLevel::Info);
        assert_eq!(config.timeout_secs, 30);
        assert!(config.bots.is_empty());
    }

    #[test]
    fn test_defaults_fail_validation() {
        let err = isolated().load().unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError { .. }));
    }

    #[test]
    fn test_set_by_key() {
        let config = isolated()
            .set("bots.dice.token", "123:ABC")
            .set("logging.level", "debug")
            .load()
            .unwrap();

        assert_eq!(config.bots["dice"].token, "123:ABC");
        assert_eq!(config.logging.level, LogLevel::Debug);
        assert_eq!(config.default_bot_name(), Some("dice"));
    }

    #[test]
    fn test_merge_whole_config() {
        let config = isolated()
            .merge(TeleBotConfig {
                timeout_secs: 60,
                ..TeleBotConfig::default().with_bot("main", BotConfig::new("1:A"))
            })
            .load()
            .unwrap();

        assert_eq!(config.timeout_secs, 60);
        assert_eq!(config.bots["main"].token, "1:A");
    }

    #[test]
    fn test_missing_file() {
        let err = ConfigLoader::new()
            .file(nowhere().join("telebot.toml"))
            .load()
            .unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(_)));
    }

    #[test]
    fn test_profile_variant() {
        let loader = isolated().profile("prod");
        assert_eq!(
            loader.profile_variant(Path::new("/etc/telebot/telebot.toml")),
            Some(PathBuf::from("/etc/telebot/telebot.production.toml"))
        );
    }

    #[test]
    fn test_profile_parse() {
        assert_eq!(Profile::parse("prod"), Profile::Production);
        assert_eq!(Profile::parse("Development"), Profile::Development);
        assert_eq!(Profile::parse("Staging").as_str(), "staging");
    }
}
