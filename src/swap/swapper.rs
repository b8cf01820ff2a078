use crate::config::{FileConfig, Settings};
use crate::swap::{FolderOps, Layout, Result, StdFolders, SwapError, SwapPhase, SwapReport};
use crate::validate::{same_folder_name, validate_folder_name};
use log::{debug, info, warn};
use std::path::PathBuf;

/// Paths of one swap, resolved and checked before anything is renamed
struct SwapPlan {
    incoming: PathBuf,
    active: PathBuf,
    archive: PathBuf,
}

/// Exchanges the active folder with a named sibling and records the new archive name
pub struct DirectorySwapper<'a, F: FolderOps = StdFolders> {
    store: &'a FileConfig<Settings>,
    folders: F,
}

impl<'a> DirectorySwapper<'a, StdFolders> {
    pub fn new(store: &'a FileConfig<Settings>) -> Self {
        Self::with_folders(store, StdFolders)
    }
}

impl<'a, F: FolderOps> DirectorySwapper<'a, F> {
    pub fn with_folders(store: &'a FileConfig<Settings>, folders: F) -> Self {
        Self { store, folders }
    }

    fn enter(&self, phase: SwapPhase) {
        debug!("Swap phase: {}", phase);
    }

    /// Swap `incoming` into the active slot.
    ///
    /// The active folder is renamed to the stored previous name first, then the
    /// incoming folder takes the active name. Afterwards the previous name is set
    /// to `incoming`, so the next swap puts the current folder back under its own name.
    pub fn swap(&self, incoming: &str) -> Result<SwapReport> {
        self.enter(SwapPhase::Validating);
        let mut settings = self.store.load()?;
        let plan = self.plan(&settings, incoming)?;

        self.enter(SwapPhase::Archiving);
        self.folders
            .rename(&plan.active, &plan.archive)
            .map_err(|source| SwapError::Rename {
                from: plan.active.clone(),
                to: plan.archive.clone(),
                source,
            })?;

        self.enter(SwapPhase::Promoting);
        if let Err(source) = self.folders.rename(&plan.incoming, &plan.active) {
            warn!(
                "Promoting {} failed after the active folder was archived to {}",
                plan.incoming.display(),
                plan.archive.display()
            );
            return Err(SwapError::PartialSwap {
                archived: plan.archive,
                incoming: plan.incoming,
                active: plan.active,
                source,
            });
        }

        self.enter(SwapPhase::Persisting);
        let archived_as =
            std::mem::replace(&mut settings.archive.previous_folder, incoming.to_string());
        self.store
            .save(&settings)
            .map_err(|source| SwapError::SettingsStale {
                previous_folder: incoming.to_string(),
                source,
            })?;

        self.enter(SwapPhase::Done);
        info!(
            "Swapped '{}' into {} (previous active archived as '{}')",
            incoming,
            plan.active.display(),
            archived_as
        );

        Ok(SwapReport {
            promoted: incoming.to_string(),
            archived_as,
            active_path: plan.active,
            archive_path: plan.archive,
        })
    }

    fn plan(&self, settings: &Settings, incoming: &str) -> Result<SwapPlan> {
        validate_folder_name(incoming)?;

        let active_name = settings.active_folder();
        if same_folder_name(incoming, active_name) {
            return Err(SwapError::IncomingIsActive(incoming.to_string()));
        }
        if same_folder_name(settings.previous_folder(), active_name) {
            return Err(SwapError::PreviousIsActive(active_name.to_string()));
        }

        let incoming_path = settings.folder_path(incoming);
        if !self.folders.is_dir(&incoming_path) {
            return Err(SwapError::IncomingNotFound(incoming_path));
        }

        let active = settings.active_path();
        if !self.folders.is_dir(&active) {
            return Err(SwapError::ActiveMissing(active));
        }
        // Another spelling of the active folder, e.g. different case on NTFS or a link
        if self.folders.same_dir(&incoming_path, &active) {
            return Err(SwapError::IncomingIsActive(incoming.to_string()));
        }

        // A POSIX rename would quietly replace an empty directory here
        let archive = settings.archive_path();
        if self.folders.exists(&archive) {
            return Err(SwapError::ArchiveOccupied(archive));
        }

        Ok(SwapPlan {
            incoming: incoming_path,
            active,
            archive,
        })
    }

    /// Subfolders that can be swapped in, sorted by name
    pub fn candidates(&self) -> Result<Vec<String>> {
        let settings = self.store.load()?;
        let base = settings.base_dir();
        if !self.folders.is_dir(base) {
            return Err(SwapError::BaseMissing(base.to_path_buf()));
        }

        let mut names = self.folders.list_dirs(base)?;
        names.retain(|name| !same_folder_name(name, settings.active_folder()));
        names.sort();
        Ok(names)
    }

    pub fn diagnose(&self) -> Result<Layout> {
        let settings = self.store.load()?;
        Ok(self.layout_of(&settings))
    }

    fn layout_of(&self, settings: &Settings) -> Layout {
        let base = settings.base_dir();
        if !self.folders.is_dir(base) {
            return Layout::BaseMissing(base.to_path_buf());
        }

        let active = settings.active_path();
        let archive = settings.archive_path();
        if !self.folders.is_dir(&active) {
            return Layout::ActiveMissing {
                active,
                archive_present: self.folders.is_dir(&archive),
            };
        }
        if self.folders.exists(&archive) {
            return Layout::ArchiveOccupied(archive);
        }
        Layout::Healthy
    }

    /// Undo the first half of an interrupted swap by moving the archive back into the active slot
    pub fn repair(&self) -> Result<SwapReport> {
        let settings = self.store.load()?;
        let (active, archive) = match self.layout_of(&settings) {
            Layout::ActiveMissing {
                active,
                archive_present: true,
            } => (active, settings.archive_path()),
            Layout::ActiveMissing {
                archive_present: false,
                ..
            } => {
                return Err(SwapError::NothingToRepair(format!(
                    "the active folder is missing and there is no archived folder '{}' to restore",
                    settings.previous_folder()
                )));
            }
            Layout::BaseMissing(base) => return Err(SwapError::BaseMissing(base)),
            Layout::Healthy | Layout::ArchiveOccupied(_) => {
                return Err(SwapError::NothingToRepair(
                    "the active folder is present".to_string(),
                ));
            }
        };

        info!(
            "Restoring {} to {}",
            archive.display(),
            active.display()
        );
        self.folders
            .rename(&archive, &active)
            .map_err(|source| SwapError::Rename {
                from: archive.clone(),
                to: active.clone(),
                source,
            })?;

        Ok(SwapReport {
            promoted: settings.previous_folder().to_string(),
            archived_as: settings.previous_folder().to_string(),
            active_path: active,
            archive_path: archive,
        })
    }
}
