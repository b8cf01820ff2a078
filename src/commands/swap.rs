use crate::cli::prompts::{confirm_close_process, print_cancelled};
use crate::config::Config;
use crate::error::FswResult;
use crate::process::{CoordinatorError, ProcessControl, ProcessCoordinator, SystemProcesses};
use crate::swap::{DirectorySwapper, FolderOps, SwapError, SwapReport};
use clap::Args;
use colored::Colorize;

#[derive(Args)]
pub struct SwapCommand {
    /// Name of the folder under the base directory to make active
    name: String,

    /// Swap folders without closing and restarting the host application
    #[arg(long)]
    no_restart: bool,

    /// Close the host application without asking
    #[arg(short, long)]
    yes: bool,
}

impl SwapCommand {
    pub fn execute(&self, config: &Config) -> FswResult<()> {
        let coordinator = ProcessCoordinator::new(
            DirectorySwapper::new(&config.settings),
            SystemProcesses,
            config.stop_timeout,
        );
        self.run(config, &coordinator)
    }

    fn run<F: FolderOps, P: ProcessControl>(
        &self,
        config: &Config,
        coordinator: &ProcessCoordinator<'_, F, P>,
    ) -> FswResult<()> {
        let settings = config.settings.load()?;
        let process_name = settings.process_name();

        let result = if self.no_restart {
            coordinator.swap_only(&self.name)
        } else {
            if !self.yes && !confirm_close_process(process_name)? {
                print_cancelled();
                return Ok(());
            }
            coordinator.swap_and_restart(process_name, &self.name)
        };

        match result {
            Ok(report) => {
                print_report(&report);
                Ok(())
            }
            Err(CoordinatorError::Restart { report, source }) => {
                print_report(&report);
                Err(anyhow::anyhow!("Restarting {} failed: {}", process_name, source).into())
            }
            Err(CoordinatorError::Swap(err)) => {
                print_swap_hint(&err);
                Err(err.into())
            }
            Err(err) => Err(anyhow::Error::from(err).into()),
        }
    }
}

pub(crate) fn print_report(report: &SwapReport) {
    println!(
        "{} Swapped in '{}'",
        "Success:".green(),
        report.promoted.cyan()
    );
    println!(
        "  Previous version archived as '{}' at {}",
        report.archived_as,
        report.archive_path.display()
    );
}

fn print_swap_hint(err: &SwapError) {
    match err {
        SwapError::PartialSwap { .. } => {
            eprintln!(
                "{} The base directory is half swapped. Run {} to inspect it and {} to restore the archived folder.",
                "Warning:".yellow(),
                "fsw status".cyan(),
                "fsw repair".cyan()
            );
        }
        SwapError::SettingsStale {
            previous_folder, ..
        } => {
            eprintln!(
                "{} Folders were swapped but settings are stale. Fix them with {}",
                "Warning:".yellow(),
                format!("fsw set-previous-name \"{}\"", previous_folder).cyan()
            );
        }
        SwapError::ArchiveOccupied(_) => {
            eprintln!(
                "{} Pick a free archive name with {}",
                "Hint:".yellow(),
                "fsw set-previous-name <name>".cyan()
            );
        }
        _ => {}
    }
}
