pub mod completions;
pub mod repair;
pub mod set_base_dir;
pub mod set_name;
pub mod status;
pub mod swap;

pub use completions::CompletionsCommand;
pub use repair::RepairCommand;
pub use set_base_dir::{SetBaseDirCommand, SetDefaultBaseDirCommand};
pub use set_name::{SetActiveFolderNameCommand, SetPreviousNameCommand, SetProcessNameCommand};
pub use status::StatusCommand;
pub use swap::SwapCommand;
