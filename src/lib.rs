//! # Folder Swapper (FSW)
//!
//! A Rust library and CLI tool for swapping which versioned add-in folder is
//! active inside a fixed parent directory, closing and restarting the host
//! application around the rename.
//!
//! ## Library Usage
//!
//! The swap state machine ([`DirectorySwapper`]), settings persistence
//! ([`config::FileConfig`]) and process coordination ([`ProcessCoordinator`])
//! are usable without the CLI.
//!
//! RUST LEARNING: `//!` comments are "inner doc comments" for modules/crates
//! - `//` is regular comment, `///` is doc comment for items, `//!` is for the containing item

// RUST LEARNING: `pub mod` declares a public module backed by `name.rs` or `name/mod.rs`
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod process;
pub mod swap;
pub mod validate;

// RUST LEARNING: `pub use` re-exports items so users can write `fsw::Config`
pub use cli::run_picker;
pub use config::{Config, Settings, SettingsUpdate};
pub use error::{FswError, FswResult};
pub use process::{ProcessControl, ProcessCoordinator, SystemProcesses};
pub use swap::{DirectorySwapper, Layout, SwapError, SwapReport};
pub use validate::{is_valid_folder_name, validate_folder_name};

pub use commands::{
    CompletionsCommand, RepairCommand, SetActiveFolderNameCommand, SetBaseDirCommand,
    SetDefaultBaseDirCommand, SetPreviousNameCommand, SetProcessNameCommand, StatusCommand,
    SwapCommand,
};

/// The current version of the crate
// RUST LEARNING: `env!()` reads CARGO_PKG_VERSION from Cargo.toml at compile time
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
