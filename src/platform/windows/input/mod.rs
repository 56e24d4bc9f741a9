//! Input handling for Windows (global hotkeys, modifier state).

pub mod hotkeys;

pub use hotkeys::{from_hwnd, modifiers_held, to_hwnd, Win32Hotkeys, TIMER_HIDE_POLL};
