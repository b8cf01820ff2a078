use crate::config::Config;
use crate::swap::{DirectorySwapper, Layout};
use clap::Args;
use colored::Colorize;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, ContentArrangement, Table};

#[derive(Args)]
pub struct StatusCommand;

impl StatusCommand {
    pub fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let settings = config.settings.load()?;
        let swapper = DirectorySwapper::new(&config.settings);
        let layout = swapper.diagnose()?;

        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec![
            Cell::new("Setting").fg(comfy_table::Color::Green),
            Cell::new("Value").fg(comfy_table::Color::Green),
        ]);
        table.add_row(vec![
            Cell::new("Settings file"),
            Cell::new(config.settings.path().display()),
        ]);
        table.add_row(vec![
            Cell::new("Base directory"),
            Cell::new(settings.base_dir().display()),
        ]);
        table.add_row(vec![
            Cell::new("Active folder"),
            Cell::new(settings.active_folder()).fg(comfy_table::Color::Cyan),
        ]);
        table.add_row(vec![
            Cell::new("Next archive name"),
            Cell::new(settings.previous_folder()),
        ]);
        table.add_row(vec![
            Cell::new("Host process"),
            Cell::new(crate::process::normalize_process_name(settings.process_name())),
        ]);
        println!("{table}");

        match &layout {
            Layout::Healthy => {
                let candidates = swapper.candidates()?;
                if candidates.is_empty() {
                    println!("{} No other folders to swap in", "Info:".blue());
                } else {
                    println!("{} Available versions:", "Healthy".green());
                    for name in &candidates {
                        println!("  - {}", name);
                    }
                }
            }
            Layout::BaseMissing(base) => {
                println!(
                    "{} Base directory {} does not exist. Use {}",
                    "Error:".red(),
                    base.display(),
                    "fsw set-base-dir <path>".cyan()
                );
            }
            Layout::ActiveMissing {
                active,
                archive_present,
            } => {
                println!(
                    "{} Active folder {} is missing",
                    "Error:".red(),
                    active.display()
                );
                if *archive_present {
                    println!(
                        "  An interrupted swap left it archived as '{}'. Run {} to restore it.",
                        settings.previous_folder(),
                        "fsw repair".cyan()
                    );
                }
            }
            Layout::ArchiveOccupied(archive) => {
                println!(
                    "{} {} already exists, so the next swap cannot archive the active folder. Use {}",
                    "Warning:".yellow(),
                    archive.display(),
                    "fsw set-previous-name <name>".cyan()
                );
            }
        }

        Ok(())
    }
}
