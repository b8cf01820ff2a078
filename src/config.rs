// RUST LEARNING: `serde` derives JSON conversion, `thiserror` derives the Error trait
use crate::validate::{same_folder_name, validate_folder_name, NameError};
use log::debug;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::NamedTempFile;
use thiserror::Error;

/// Parent directory holding every add-in version on a stock install
pub const DEFAULT_BASE_DIR: &str = r"C:\Tagetik";
pub const DEFAULT_ACTIVE_FOLDER: &str = "Tagetik Excel .NET Client";
pub const DEFAULT_PREVIOUS_FOLDER: &str = "default_client_please_rename";
pub const DEFAULT_PROCESS_NAME: &str = "excel";
pub const DEFAULT_STOP_TIMEOUT: Duration = Duration::from_secs(10);

pub const SETTINGS_ENV: &str = "FSW_SETTINGS";
pub const STOP_TIMEOUT_ENV: &str = "FSW_STOP_TIMEOUT_SECS";
pub const MAX_STOP_TIMEOUT: Duration = Duration::from_secs(60 * 60);

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Settings file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("Settings file {} is corrupt: {source}", .path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("IO error: {0}")]
    // RUST LEARNING: `#[from]` lets `?` convert std::io::Error into ConfigError::Io
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid setting: {0}")]
    Invalid(String),
    #[error(transparent)]
    InvalidName(#[from] NameError),
    #[error("Config directory not found")]
    ConfigDirNotFound,
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// A JSON document on disk with typed load/save
pub struct FileConfig<T> {
    file_path: PathBuf,
    // RUST LEARNING: PhantomData ties the struct to T without storing a T
    _marker: std::marker::PhantomData<T>,
}

impl<T> FileConfig<T>
where
    T: DeserializeOwned + Serialize,
{
    pub fn new(file_path: PathBuf) -> Self {
        Self {
            file_path,
            _marker: std::marker::PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    pub fn exists(&self) -> bool {
        self.file_path.is_file()
    }

    pub fn load(&self) -> Result<T> {
        debug!("Loading settings from: {}", self.file_path.display());
        let contents = match fs::read_to_string(&self.file_path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Err(ConfigError::NotFound(self.file_path.clone()));
            }
            Err(err) => return Err(err.into()),
        };

        let config = serde_json::from_str(&contents).map_err(|source| ConfigError::Corrupt {
            path: self.file_path.clone(),
            source,
        })?;
        debug!("Settings loaded successfully");
        Ok(config)
    }

    /// Write through a sibling temp file so a crash never leaves a truncated file behind
    pub fn save(&self, data: &T) -> Result<()> {
        debug!("Updating settings at: {}", self.file_path.display());
        let parent = match self.file_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent)?;

        let contents = serde_json::to_string_pretty(data)?;
        let mut tmp = NamedTempFile::new_in(parent)?;
        tmp.write_all(contents.as_bytes())?;
        tmp.flush()?;
        // RUST LEARNING: PersistError carries the temp file back; we only keep the io::Error
        tmp.persist(&self.file_path).map_err(|e| e.error)?;
        debug!("Settings saved successfully");
        Ok(())
    }

    /// Write `defaults` if nothing exists yet. Returns true when the file was created.
    pub fn ensure_initialized(&self, defaults: &T) -> Result<bool> {
        if self.exists() {
            return Ok(false);
        }
        debug!(
            "No settings at {}, writing defaults",
            self.file_path.display()
        );
        self.save(defaults)?;
        Ok(true)
    }

    // RUST LEARNING: Method with closure parameter
    // - `F: FnOnce(&mut T) -> Result<()>` lets the closure reject the change before anything is written
    pub fn try_update_config<F>(&self, updater: F) -> Result<T>
    where
        F: FnOnce(&mut T) -> Result<()>,
    {
        let mut config = self.load()?;
        updater(&mut config)?;
        self.save(&config)?;
        Ok(config)
    }
}

// RUST LEARNING: `#[serde(rename = "...")]` maps Rust field names onto the on-disk keys
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Settings {
    #[serde(rename = "defaults")]
    pub locations: Locations,
    #[serde(rename = "activesettings")]
    pub archive: ArchiveState,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Locations {
    #[serde(rename = "tgkdir")]
    pub base_dir: PathBuf,
    #[serde(rename = "tgkfolder")]
    pub active_folder: String,
    // Older settings files predate this key
    #[serde(rename = "process", default = "default_process_name")]
    pub process_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ArchiveState {
    /// Name the active folder is archived under on the next swap
    #[serde(rename = "olddirectory")]
    pub previous_folder: String,
}

fn default_process_name() -> String {
    DEFAULT_PROCESS_NAME.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            locations: Locations {
                base_dir: PathBuf::from(DEFAULT_BASE_DIR),
                active_folder: DEFAULT_ACTIVE_FOLDER.to_string(),
                process_name: default_process_name(),
            },
            archive: ArchiveState {
                previous_folder: DEFAULT_PREVIOUS_FOLDER.to_string(),
            },
        }
    }
}

/// One field change, validated before it is applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsUpdate {
    BaseDir(PathBuf),
    DefaultBaseDir,
    ActiveFolder(String),
    PreviousFolder(String),
    ProcessName(String),
}

impl Settings {
    pub fn base_dir(&self) -> &Path {
        &self.locations.base_dir
    }

    pub fn active_folder(&self) -> &str {
        &self.locations.active_folder
    }

    pub fn previous_folder(&self) -> &str {
        &self.archive.previous_folder
    }

    pub fn process_name(&self) -> &str {
        &self.locations.process_name
    }

    pub fn folder_path(&self, name: &str) -> PathBuf {
        self.locations.base_dir.join(name)
    }

    pub fn active_path(&self) -> PathBuf {
        self.folder_path(&self.locations.active_folder)
    }

    pub fn archive_path(&self) -> PathBuf {
        self.folder_path(&self.archive.previous_folder)
    }

    pub fn apply(&mut self, update: SettingsUpdate) -> Result<()> {
        debug!("Applying settings update: {:?}", update);
        match update {
            SettingsUpdate::BaseDir(path) => {
                if !path.is_dir() {
                    return Err(ConfigError::Invalid(format!(
                        "base directory does not exist: {}",
                        path.display()
                    )));
                }
                self.locations.base_dir = path;
            }
            SettingsUpdate::DefaultBaseDir => {
                self.locations.base_dir = PathBuf::from(DEFAULT_BASE_DIR);
            }
            SettingsUpdate::ActiveFolder(name) => {
                validate_folder_name(&name)?;
                if same_folder_name(&name, &self.archive.previous_folder) {
                    return Err(ConfigError::Invalid(format!(
                        "active folder name '{}' equals the previous folder name",
                        name
                    )));
                }
                self.locations.active_folder = name;
            }
            SettingsUpdate::PreviousFolder(name) => {
                validate_folder_name(&name)?;
                if same_folder_name(&name, &self.locations.active_folder) {
                    return Err(ConfigError::Invalid(format!(
                        "previous folder name '{}' equals the active folder name",
                        name
                    )));
                }
                self.archive.previous_folder = name;
            }
            SettingsUpdate::ProcessName(name) => {
                if name.trim().is_empty() {
                    return Err(ConfigError::Invalid(
                        "process name must not be empty".to_string(),
                    ));
                }
                self.locations.process_name = name;
            }
        }
        Ok(())
    }
}

/// Parse `FSW_STOP_TIMEOUT_SECS`: whole seconds, at most `MAX_STOP_TIMEOUT`
pub fn parse_stop_timeout(raw: &str) -> Result<Duration> {
    let timeout = raw
        .trim()
        .parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|_| {
            ConfigError::Invalid(format!(
                "{} must be a whole number of seconds, got '{}'",
                STOP_TIMEOUT_ENV, raw
            ))
        })?;
    if timeout > MAX_STOP_TIMEOUT {
        return Err(ConfigError::Invalid(format!(
            "{} must be at most {} seconds",
            STOP_TIMEOUT_ENV,
            MAX_STOP_TIMEOUT.as_secs()
        )));
    }
    Ok(timeout)
}

pub struct Config {
    pub settings: FileConfig<Settings>,
    pub stop_timeout: Duration,
}

impl Config {
    /// Resolve the settings path: explicit override, then `$FSW_SETTINGS`, then the user config dir
    pub fn new(settings_override: Option<PathBuf>) -> Result<Self> {
        let settings_path = match settings_override {
            Some(path) => path,
            None => match std::env::var_os(SETTINGS_ENV) {
                Some(path) => PathBuf::from(path),
                None => dirs::config_dir()
                    .ok_or(ConfigError::ConfigDirNotFound)?
                    .join("fsw")
                    .join("settings.json"),
            },
        };

        let stop_timeout = match std::env::var(STOP_TIMEOUT_ENV) {
            Ok(raw) => parse_stop_timeout(&raw)?,
            Err(_) => DEFAULT_STOP_TIMEOUT,
        };

        Ok(Self::with_path(settings_path, stop_timeout))
    }

    pub fn with_path(settings_path: PathBuf, stop_timeout: Duration) -> Self {
        debug!("Settings path: {}", settings_path.display());
        Self {
            settings: FileConfig::new(settings_path),
            stop_timeout,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(temp_dir: &TempDir) -> FileConfig<Settings> {
        FileConfig::new(temp_dir.path().join("settings.json"))
    }

    #[test]
    fn test_load_missing_file_is_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_in(&temp_dir);

        match store.load() {
            Err(ConfigError::NotFound(path)) => assert_eq!(path, store.path()),
            other => panic!("Expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_load_corrupt_file() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_in(&temp_dir);
        fs::write(store.path(), "{ not json").unwrap();

        assert!(matches!(store.load(), Err(ConfigError::Corrupt { .. })));
    }

    #[test]
    fn test_ensure_initialized_is_idempotent() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let store = store_in(&temp_dir);

        assert!(store.ensure_initialized(&Settings::default())?);
        let mut settings = store.load()?;
        settings.archive.previous_folder = "kept".to_string();
        store.save(&settings)?;

        // Second call must not clobber the existing file
        assert!(!store.ensure_initialized(&Settings::default())?);
        assert_eq!(store.load()?.previous_folder(), "kept");
        Ok(())
    }

    #[test]
    fn test_on_disk_field_names() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let store = store_in(&temp_dir);
        store.save(&Settings::default())?;

        let raw: serde_json::Value = serde_json::from_str(&fs::read_to_string(store.path())?)?;
        assert_eq!(raw["defaults"]["tgkdir"], DEFAULT_BASE_DIR);
        assert_eq!(raw["defaults"]["tgkfolder"], DEFAULT_ACTIVE_FOLDER);
        assert_eq!(raw["defaults"]["process"], DEFAULT_PROCESS_NAME);
        assert_eq!(raw["activesettings"]["olddirectory"], DEFAULT_PREVIOUS_FOLDER);
        Ok(())
    }

    #[test]
    fn test_legacy_file_without_process_key() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let store = store_in(&temp_dir);
        fs::write(
            store.path(),
            r#"{
    "defaults": { "tgkdir": "/base", "tgkfolder": "v1" },
    "activesettings": { "olddirectory": "backup" }
}"#,
        )?;

        let settings = store.load()?;
        assert_eq!(settings.base_dir(), Path::new("/base"));
        assert_eq!(settings.active_folder(), "v1");
        assert_eq!(settings.previous_folder(), "backup");
        assert_eq!(settings.process_name(), DEFAULT_PROCESS_NAME);
        Ok(())
    }

    #[test]
    fn test_save_leaves_no_temp_files() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let store = store_in(&temp_dir);
        store.save(&Settings::default())?;
        store.save(&Settings::default())?;

        let entries: Vec<_> = fs::read_dir(temp_dir.path())?.collect();
        assert_eq!(entries.len(), 1);
        Ok(())
    }

    #[test]
    fn test_apply_rejects_forbidden_names() {
        let mut settings = Settings::default();

        let err = settings
            .apply(SettingsUpdate::PreviousFolder("old:v1".to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidName(NameError::Forbidden { ch: ':', .. })));

        let err = settings
            .apply(SettingsUpdate::ActiveFolder(String::new()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidName(NameError::Empty)));

        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_apply_keeps_previous_distinct_from_active() {
        let mut settings = Settings::default();

        let err = settings
            .apply(SettingsUpdate::PreviousFolder(DEFAULT_ACTIVE_FOLDER.to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = settings
            .apply(SettingsUpdate::ActiveFolder(DEFAULT_PREVIOUS_FOLDER.to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_apply_previous_differing_from_active_only_by_case() {
        let mut settings = Settings::default();

        let result = settings.apply(SettingsUpdate::PreviousFolder(
            DEFAULT_ACTIVE_FOLDER.to_uppercase(),
        ));
        assert_eq!(result.is_err(), cfg!(windows));
    }

    #[test]
    fn test_parse_stop_timeout() {
        assert_eq!(parse_stop_timeout(" 30 ").unwrap(), Duration::from_secs(30));
        assert_eq!(parse_stop_timeout("3600").unwrap(), MAX_STOP_TIMEOUT);
        assert!(matches!(parse_stop_timeout("3601"), Err(ConfigError::Invalid(_))));
        assert!(matches!(
            parse_stop_timeout(&u64::MAX.to_string()),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(parse_stop_timeout("ten"), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_apply_base_dir_must_exist() {
        let temp_dir = TempDir::new().unwrap();
        let mut settings = Settings::default();

        let missing = temp_dir.path().join("nope");
        assert!(settings.apply(SettingsUpdate::BaseDir(missing)).is_err());

        settings
            .apply(SettingsUpdate::BaseDir(temp_dir.path().to_path_buf()))
            .unwrap();
        assert_eq!(settings.base_dir(), temp_dir.path());

        settings.apply(SettingsUpdate::DefaultBaseDir).unwrap();
        assert_eq!(settings.base_dir(), Path::new(DEFAULT_BASE_DIR));
    }

    #[test]
    fn test_try_update_config_rejection_writes_nothing() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let store = store_in(&temp_dir);
        store.save(&Settings::default())?;

        let result = store.try_update_config(|s| {
            s.apply(SettingsUpdate::ProcessName("winword".to_string()))?;
            s.apply(SettingsUpdate::PreviousFolder("bad|name".to_string()))
        });
        assert!(result.is_err());
        assert_eq!(store.load()?, Settings::default());
        Ok(())
    }
}
