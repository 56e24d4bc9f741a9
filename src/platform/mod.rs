//! Platform-specific implementations.
//!
//! Only Windows has a shell. The hotkey core itself is portable and runs
//! anywhere against `hotkey::MemoryBackend`.

#[cfg(target_os = "windows")]
pub mod windows;
