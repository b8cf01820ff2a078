use crate::config::{Config, SettingsUpdate};
use clap::Args;
use colored::Colorize;

// RUST LEARNING: A shared helper keeps the three setters down to one line of logic each
fn apply(config: &Config, update: SettingsUpdate, label: &str, value: &str) -> anyhow::Result<()> {
    config.settings.try_update_config(|s| s.apply(update))?;
    println!("{} {} set to '{}'", "Success:".green(), label, value.cyan());
    Ok(())
}

#[derive(Args)]
pub struct SetActiveFolderNameCommand {
    /// Name of the folder the host application loads the add-in from
    name: String,
}

impl SetActiveFolderNameCommand {
    pub fn execute(&self, config: &Config) -> anyhow::Result<()> {
        apply(
            config,
            SettingsUpdate::ActiveFolder(self.name.clone()),
            "Active folder name",
            &self.name,
        )
    }
}

#[derive(Args)]
pub struct SetPreviousNameCommand {
    /// Name the active folder is archived under on the next swap
    name: String,
}

impl SetPreviousNameCommand {
    pub fn execute(&self, config: &Config) -> anyhow::Result<()> {
        apply(
            config,
            SettingsUpdate::PreviousFolder(self.name.clone()),
            "Previous folder name",
            &self.name,
        )
    }
}

#[derive(Args)]
pub struct SetProcessNameCommand {
    /// Program restarted around a swap, e.g. excel
    name: String,
}

impl SetProcessNameCommand {
    pub fn execute(&self, config: &Config) -> anyhow::Result<()> {
        crate::process::check_process_name(&self.name)?;
        apply(
            config,
            SettingsUpdate::ProcessName(self.name.clone()),
            "Process name",
            &self.name,
        )
    }
}
