//! Global hotkey registration and dispatch.
//!
//! - [`binding`]: one OS registration (`HotkeyBinding`)
//! - [`registry`]: the bindings an application owns, and `WM_HOTKEY` matching
//! - [`layers`]: one hotkey per keyboard layer on top of the registry
//! - [`backend`]: the OS facility behind it all, plus an in-memory stand-in
//!
//! The Win32 backend lives in `platform::windows::input`.

pub mod backend;
pub mod binding;
pub mod error;
pub mod identity;
pub mod layers;
pub mod modifiers;
pub mod registry;

pub use backend::{HotkeyBackend, MemoryBackend};
pub use binding::HotkeyBinding;
pub use error::HotkeyError;
pub use identity::{HotkeyIdentity, WindowHandle};
pub use layers::{layer_key, LayerHotkeys};
pub use modifiers::{KeyCombo, Modifiers, ParseModifiersError};
pub use registry::HotkeyRegistry;
