use crate::error::FswResult;
use crate::process::normalize_process_name;
use colored::Colorize;
use inquire::Confirm;

/// Ask before the host application gets closed for a swap
pub(crate) fn confirm_close_process(process_name: &str) -> FswResult<bool> {
    let message = close_process_message(process_name);
    let value = Confirm::new(&message)
        .with_default(true)
        .with_help_message("Unsaved work in the application will be lost")
        .prompt()?;
    Ok(value)
}

pub(crate) fn close_process_message(process_name: &str) -> String {
    format!(
        "This will close {} and start it again after the swap. Continue?",
        normalize_process_name(process_name)
    )
}

/// Ask before moving the archived folder back into the active slot
pub(crate) fn confirm_repair(archive: &str, active: &str) -> FswResult<bool> {
    let value = Confirm::new(&format!(
        "Restore '{}' as the active folder '{}'?",
        archive, active
    ))
    .with_default(false)
    .prompt()?;
    Ok(value)
}

pub(crate) fn print_cancelled() {
    println!("{} Operation cancelled", "Info:".blue());
}
