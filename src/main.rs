use clap::{Parser, Subcommand};
use fsw::{
    run_picker, CompletionsCommand, Config, FswError, FswResult, RepairCommand,
    SetActiveFolderNameCommand, SetBaseDirCommand, SetDefaultBaseDirCommand,
    SetPreviousNameCommand, SetProcessNameCommand, Settings, StatusCommand, SwapCommand, VERSION,
};
use log::debug;
use std::path::PathBuf;

// RUST LEARNING: `#[derive(Parser)]` generates the command-line parsing code for the struct
#[derive(Parser)]
#[command(name = "fsw")]
#[command(
    about = "Folder Swapper - swap versioned add-in folders and restart the host application"
)]
#[command(version = VERSION)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Enable debug logging
    #[arg(short = 'd', long, global = true)]
    debug: bool,

    /// Use this settings file instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    settings: Option<PathBuf>,

    /// Picker only: swap without closing and restarting the host application
    #[arg(long)]
    no_restart: bool,

    /// Picker only: close the host application without asking
    #[arg(short, long)]
    yes: bool,
}

// RUST LEARNING: each variant wraps the `Args` struct of one subcommand
#[derive(Subcommand)]
enum Commands {
    /// Swap a folder into the active slot, restarting the host application
    #[command(alias = "sw")]
    Swap(SwapCommand),

    /// Set the directory that holds all add-in versions
    #[command(name = "set-base-dir")]
    SetBaseDir(SetBaseDirCommand),

    /// Reset the base directory to the stock location
    #[command(name = "set-default-base-dir")]
    SetDefaultBaseDir(SetDefaultBaseDirCommand),

    /// Set the name of the active add-in folder
    #[command(name = "set-active-folder-name")]
    SetActiveFolderName(SetActiveFolderNameCommand),

    /// Set the name the active folder is archived under on the next swap
    #[command(name = "set-previous-name")]
    SetPreviousName(SetPreviousNameCommand),

    /// Set the host application restarted around a swap
    #[command(name = "set-process-name")]
    SetProcessName(SetProcessNameCommand),

    /// Show settings, available versions and base directory health
    Status(StatusCommand),

    /// Restore the archived folder after an interrupted swap
    Repair(RepairCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}

fn init_logging(debug: bool) {
    let mut builder = if debug {
        let mut builder = env_logger::Builder::new();
        builder.parse_filters("fsw=debug");
        builder
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
    };
    builder.init();
}

fn run(cli: Cli) -> FswResult<()> {
    if let Some(Commands::Completions(cmd)) = &cli.command {
        cmd.generate_completions::<Cli>();
        return Ok(());
    }

    let config = Config::new(cli.settings)?;
    if config.settings.ensure_initialized(&Settings::default())? {
        debug!(
            "Created default settings at {}",
            config.settings.path().display()
        );
    }

    match cli.command {
        Some(Commands::Swap(cmd)) => cmd.execute(&config),
        Some(Commands::SetBaseDir(cmd)) => Ok(cmd.execute(&config)?),
        Some(Commands::SetDefaultBaseDir(cmd)) => Ok(cmd.execute(&config)?),
        Some(Commands::SetActiveFolderName(cmd)) => Ok(cmd.execute(&config)?),
        Some(Commands::SetPreviousName(cmd)) => Ok(cmd.execute(&config)?),
        Some(Commands::SetProcessName(cmd)) => Ok(cmd.execute(&config)?),
        Some(Commands::Status(cmd)) => Ok(cmd.execute(&config)?),
        Some(Commands::Repair(cmd)) => cmd.execute(&config),
        Some(Commands::Completions(_)) => Ok(()),
        // RUST LEARNING: `None` handles the case where no subcommand was given
        None => run_picker(&config, cli.no_restart, cli.yes),
    }
}

// RUST LEARNING: `main` returning `anyhow::Result<()>` prints `Error: ...` and exits non-zero on Err
fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug);

    match run(cli) {
        Ok(()) => Ok(()),
        Err(FswError::UserInterrupted) => {
            std::process::exit(0);
        }
        Err(FswError::Other(err)) => Err(err),
    }
}
