//! Keyboard layer visualizer core.
//!
//! Everything outside `platform` is free of FFI so tests can run as normal
//! integration tests on any host, using `hotkey::MemoryBackend` in place of
//! the Win32 hotkey API.

pub mod config;
pub mod events;
pub mod hotkey;
pub mod logging;
pub mod model;
pub mod platform;

// Re-export the types the shell wires together
pub use config::Config;
pub use events::{AppEvent, EventBus, EventPublisher};
pub use hotkey::{HotkeyError, HotkeyIdentity, HotkeyRegistry, LayerHotkeys, Modifiers, WindowHandle};
pub use model::{LayerState, ShellAction};
