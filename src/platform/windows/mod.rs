//! Windows-specific implementation using the Win32 API.
//!
//! - Input handling (global layer hotkeys, modifier polling)
//! - The application shell (main window and message loop)

pub mod app;
pub mod input;

pub use app::run;
