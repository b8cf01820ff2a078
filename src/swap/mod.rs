pub mod folders;
pub mod swapper;

use crate::config::ConfigError;
use crate::validate::NameError;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SwapError {
    #[error(transparent)]
    Settings(#[from] ConfigError),
    #[error(transparent)]
    InvalidName(#[from] NameError),
    #[error("'{0}' is already the active folder")]
    IncomingIsActive(String),
    #[error("Previous folder name '{0}' equals the active folder name")]
    PreviousIsActive(String),
    #[error("Incoming folder does not exist: {}", .0.display())]
    IncomingNotFound(PathBuf),
    #[error("Active folder does not exist: {}", .0.display())]
    ActiveMissing(PathBuf),
    #[error("Archive target is already occupied: {}", .0.display())]
    ArchiveOccupied(PathBuf),
    #[error("Base directory does not exist: {}", .0.display())]
    BaseMissing(PathBuf),
    #[error("Failed to rename {} to {}: {source}", .from.display(), .to.display())]
    Rename {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(
        "Partial swap: the active folder was archived to {} but {} could not be moved to {}: {source}. Run `fsw repair` to restore the archived folder",
        .archived.display(),
        .incoming.display(),
        .active.display()
    )]
    PartialSwap {
        archived: PathBuf,
        incoming: PathBuf,
        active: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(
        "Folders were swapped but settings could not be saved (previous folder should now be '{previous_folder}'): {source}"
    )]
    SettingsStale {
        previous_folder: String,
        #[source]
        source: ConfigError,
    },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Nothing to repair: {0}")]
    NothingToRepair(String),
}

impl SwapError {
    /// True when disk or settings were left half-updated and need an operator
    pub fn is_partial(&self) -> bool {
        matches!(
            self,
            SwapError::PartialSwap { .. } | SwapError::SettingsStale { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, SwapError>;

/// Steps of a single swap, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapPhase {
    Validating,
    Archiving,
    Promoting,
    Persisting,
    Done,
}

impl fmt::Display for SwapPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SwapPhase::Validating => "validating",
            SwapPhase::Archiving => "archiving",
            SwapPhase::Promoting => "promoting",
            SwapPhase::Persisting => "persisting",
            SwapPhase::Done => "done",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapReport {
    /// Folder that is active now
    pub promoted: String,
    /// Name the previously active folder was archived under
    pub archived_as: String,
    pub active_path: PathBuf,
    pub archive_path: PathBuf,
}

/// What the base directory looks like relative to the settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Layout {
    Healthy,
    BaseMissing(PathBuf),
    ActiveMissing { active: PathBuf, archive_present: bool },
    ArchiveOccupied(PathBuf),
}

impl Layout {
    pub fn is_healthy(&self) -> bool {
        matches!(self, Layout::Healthy)
    }
}

pub use folders::{FolderOps, StdFolders};
pub use swapper::DirectorySwapper;
