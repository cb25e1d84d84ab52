//! User settings at ~/.config/teamtrack/config.toml

use std::path::{Path, PathBuf};

use ::config::{Config, File, FileFormat};
use serde::{Deserialize, Serialize};

use crate::error::{TrackerError, TrackerResult};
use crate::roster::SortKey;
use crate::store::FileStore;
use crate::view::Layout;

static DEFAULT_DATA_DIR: &str = "~/.teamtrack";

fn default_data_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_DIR)
}

fn is_default_data_dir(p: &PathBuf) -> bool {
    *p == default_data_dir()
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Where the members, events and notes files live
    #[serde(default = "default_data_dir", skip_serializing_if = "is_default_data_dir")]
    pub data_dir: PathBuf,

    /// Roster layout used when none is given on the command line
    #[serde(default)]
    pub default_layout: Layout,

    /// Roster ordering used when none is given on the command line
    #[serde(default)]
    pub default_sort: SortKey,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            data_dir: default_data_dir(),
            default_layout: Layout::default(),
            default_sort: SortKey::default(),
        }
    }
}

impl Settings {
    pub fn config_path() -> TrackerResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| TrackerError::Config("Could not determine config directory".into()))?
            .join("teamtrack");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the standard location, creating a commented-out default
    /// file on first run.
    pub fn load() -> TrackerResult<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> TrackerResult<Self> {
        if !path.exists() {
            Self::create_default_config(path)?;
        }

        Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml).required(false))
            .build()
            .map_err(|e| TrackerError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| TrackerError::Config(e.to_string()))
    }

    /// Data directory with `~` expanded.
    pub fn data_path(&self) -> PathBuf {
        let full_path_str = shellexpand::tilde(&self.data_dir.to_string_lossy()).into_owned();
        PathBuf::from(full_path_str)
    }

    /// Data directory as configured, keeping `~` for display.
    pub fn display_path(&self) -> &Path {
        &self.data_dir
    }

    pub fn store(&self) -> FileStore {
        FileStore::new(self.data_path())
    }

    pub fn save_to(&self, path: &Path) -> TrackerResult<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| TrackerError::Config(e.to_string()))?;

        std::fs::write(path, content)
            .map_err(|e| TrackerError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> TrackerResult<()> {
        let contents = format!(
            "\
# teamtrack configuration

# Where members, events and notes are stored:
# data_dir = \"{}\"

# Roster layout when --layout is not given (cards, table, board, compact):
# default_layout = \"cards\"

# Roster order when --sort is not given (name, status, priority, dueDate):
# default_sort = \"name\"
",
            DEFAULT_DATA_DIR
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                TrackerError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| TrackerError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}
