use crate::cli::prompts::{confirm_repair, print_cancelled};
use crate::config::Config;
use crate::error::FswResult;
use crate::swap::{DirectorySwapper, Layout};
use clap::Args;
use colored::Colorize;

#[derive(Args)]
pub struct RepairCommand {
    /// Restore without confirmation
    #[arg(short, long)]
    yes: bool,
}

impl RepairCommand {
    pub fn execute(&self, config: &Config) -> FswResult<()> {
        let settings = config.settings.load()?;
        let swapper = DirectorySwapper::new(&config.settings);

        let layout = swapper.diagnose()?;
        if layout.is_healthy() {
            println!("{} Nothing to repair", "Info:".blue());
            return Ok(());
        }

        // Only prompt when there is something the repair can actually do
        if matches!(
            layout,
            Layout::ActiveMissing {
                archive_present: true,
                ..
            }
        ) && !self.yes
            && !confirm_repair(settings.previous_folder(), settings.active_folder())?
        {
            print_cancelled();
            return Ok(());
        }

        let report = swapper.repair()?;
        println!(
            "{} Restored '{}' to {}",
            "Success:".green(),
            report.archived_as,
            report.active_path.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ArchiveState, Locations, Settings};
    use std::fs;
    use std::path::PathBuf;
    use std::time::Duration;
    use tempfile::TempDir;

    fn setup() -> (TempDir, Config, PathBuf) {
        let temp_dir = TempDir::new().unwrap();
        let base = temp_dir.path().join("base");
        fs::create_dir_all(base.join("v1")).unwrap();
        fs::create_dir_all(base.join("v2")).unwrap();

        let config =
            Config::with_path(temp_dir.path().join("settings.json"), Duration::from_secs(1));
        config
            .settings
            .save(&Settings {
                locations: Locations {
                    base_dir: base.clone(),
                    active_folder: "v1".to_string(),
                    process_name: "excel".to_string(),
                },
                archive: ArchiveState {
                    previous_folder: "backup".to_string(),
                },
            })
            .unwrap();
        (temp_dir, config, base)
    }

    #[test]
    fn test_repair_restores_interrupted_swap() {
        let (_temp_dir, config, base) = setup();
        // Archive step done, promote step never happened
        fs::rename(base.join("v1"), base.join("backup")).unwrap();

        RepairCommand { yes: true }.execute(&config).unwrap();

        assert!(base.join("v1").is_dir());
        assert!(!base.join("backup").exists());
        assert!(base.join("v2").is_dir());
    }

    #[test]
    fn test_repair_of_healthy_layout_is_a_no_op() {
        let (_temp_dir, config, base) = setup();

        RepairCommand { yes: true }.execute(&config).unwrap();

        assert!(base.join("v1").is_dir());
        assert!(base.join("v2").is_dir());
    }

    #[test]
    fn test_repair_without_archive_fails() {
        let (_temp_dir, config, base) = setup();
        fs::remove_dir(base.join("v1")).unwrap();

        assert!(RepairCommand { yes: true }.execute(&config).is_err());
    }
}
