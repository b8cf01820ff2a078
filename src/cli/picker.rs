use crate::cli::prompts::{confirm_close_process, print_cancelled};
use crate::config::{Config, DEFAULT_PREVIOUS_FOLDER};
use crate::error::FswResult;
use crate::process::{CoordinatorError, ProcessCoordinator, SystemProcesses};
use crate::swap::{DirectorySwapper, FolderOps, SwapError, SwapReport};
use colored::Colorize;
use dialoguer::theme::ColorfulTheme;
use dialoguer::Select;
use log::debug;

/// Outcome of the last action, shown above the list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerStatus {
    Swapped(SwapReport),
    Failed { name: String, message: String },
    Cancelled,
}

/// Everything the picker renders. Rebuilt from disk after each swap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerState {
    pub active_folder: String,
    /// Version name the active folder currently holds
    pub active_version: String,
    pub choices: Vec<String>,
    pub cursor: usize,
    pub status: Option<PickerStatus>,
}

impl PickerState {
    pub fn load<F: FolderOps>(
        swapper: &DirectorySwapper<'_, F>,
        config: &Config,
    ) -> Result<Self, SwapError> {
        let mut state = Self {
            active_folder: String::new(),
            active_version: String::new(),
            choices: Vec::new(),
            cursor: 0,
            status: None,
        };
        state.refresh(swapper, config)?;
        Ok(state)
    }

    /// Re-read choices and the active version, keeping the status and clamping the cursor
    pub fn refresh<F: FolderOps>(
        &mut self,
        swapper: &DirectorySwapper<'_, F>,
        config: &Config,
    ) -> Result<(), SwapError> {
        let settings = config.settings.load()?;
        self.active_folder = settings.active_folder().to_string();
        self.active_version = settings.previous_folder().to_string();
        self.choices = swapper.candidates()?;
        self.cursor = self.cursor.min(self.choices.len().saturating_sub(1));
        Ok(())
    }

    pub fn record(&mut self, name: &str, result: Result<SwapReport, CoordinatorError>) {
        self.status = Some(match result {
            Ok(report) => PickerStatus::Swapped(report),
            Err(err) => PickerStatus::Failed {
                name: name.to_string(),
                message: err.to_string(),
            },
        });
    }

    pub fn status_line(&self) -> Option<String> {
        match self.status.as_ref()? {
            PickerStatus::Swapped(report) => Some(format!(
                "{} Swapped in '{}', previous version archived as '{}'",
                "Success:".green(),
                report.promoted,
                report.archived_as
            )),
            PickerStatus::Failed { name, message } => Some(format!(
                "{} Swapping in '{}' failed: {}",
                "Error:".red(),
                name,
                message
            )),
            PickerStatus::Cancelled => Some(format!("{} Swap cancelled", "Info:".blue())),
        }
    }

    pub fn header(&self) -> String {
        // Fresh settings only hold the placeholder, which says nothing about the installed version
        let version = if self.active_version == DEFAULT_PREVIOUS_FOLDER {
            "unknown".dimmed()
        } else {
            self.active_version.cyan()
        };
        format!(
            "Currently active: {} {}",
            version,
            format!("(in '{}')", self.active_folder).dimmed()
        )
    }
}

/// Interactive loop: pick a folder, swap it in, show the result, repeat until ESC
pub fn run_picker(config: &Config, no_restart: bool, yes: bool) -> FswResult<()> {
    // RUST LEARNING: The theme is a plain value handed to each prompt, not global state
    let theme = ColorfulTheme::default();
    let coordinator = ProcessCoordinator::new(
        DirectorySwapper::new(&config.settings),
        SystemProcesses,
        config.stop_timeout,
    );
    let mut state = PickerState::load(coordinator.swapper(), config)?;

    loop {
        println!();
        println!("{}", state.header());
        if let Some(line) = state.status_line() {
            println!("{}", line);
        }

        if state.choices.is_empty() {
            println!(
                "{} No other folders to swap in under {}",
                "Info:".blue(),
                config.settings.load()?.base_dir().display()
            );
            return Ok(());
        }

        let selection = Select::with_theme(&theme)
            .with_prompt("Which version do you want to swap in? (ESC to quit)")
            .items(&state.choices)
            .default(state.cursor)
            .interact_opt()?;

        let Some(index) = selection else {
            debug!("Picker closed");
            return Ok(());
        };
        state.cursor = index;
        let name = state.choices[index].clone();

        let result = if no_restart {
            coordinator.swap_only(&name)
        } else {
            let process_name = config.settings.load()?.process_name().to_string();
            if !yes && !confirm_close_process(&process_name)? {
                print_cancelled();
                state.status = Some(PickerStatus::Cancelled);
                continue;
            }
            coordinator.swap_and_restart(&process_name, &name)
        };

        state.record(&name, result);
        state.refresh(coordinator.swapper(), config)?;
    }
}
