//! Application domain model.
//!
//! Pure logic with no FFI dependencies: layer selection state and the
//! constants shared by the hotkey core and the shell.

pub mod constants;
pub mod layer_state;

pub use constants::*;
pub use layer_state::{LayerState, ShellAction};
