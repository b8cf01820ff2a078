use crate::config::{Config, SettingsUpdate, DEFAULT_BASE_DIR};
use clap::Args;
use colored::Colorize;
use std::path::Path;

#[derive(Args)]
pub struct SetBaseDirCommand {
    /// Directory that holds the active folder and every swappable version
    path: String,
}

impl SetBaseDirCommand {
    pub fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let path = Path::new(&self.path);

        // Validate that the directory exists
        if !path.is_dir() {
            anyhow::bail!("Directory does not exist: {}", self.path);
        }

        // Convert to absolute path
        let absolute_path = path.canonicalize()?;
        config
            .settings
            .try_update_config(|s| s.apply(SettingsUpdate::BaseDir(absolute_path.clone())))?;

        println!(
            "{} Base directory set to {}",
            "Success:".green(),
            absolute_path.display()
        );
        Ok(())
    }
}

#[derive(Args)]
pub struct SetDefaultBaseDirCommand;

impl SetDefaultBaseDirCommand {
    pub fn execute(&self, config: &Config) -> anyhow::Result<()> {
        config
            .settings
            .try_update_config(|s| s.apply(SettingsUpdate::DefaultBaseDir))?;

        println!(
            "{} {} set as base directory",
            "Success:".green(),
            DEFAULT_BASE_DIR
        );
        Ok(())
    }
}
