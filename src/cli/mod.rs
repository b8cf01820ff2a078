pub mod picker;
pub(crate) mod prompts;

pub use picker::{run_picker, PickerState, PickerStatus};
