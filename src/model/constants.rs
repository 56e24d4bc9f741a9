//! Application constants and default values.
//!
//! This module contains the Win32 message and key codes the hotkey core
//! relies on, config defaults and validation limits.

// === Win32 Messages ===

/// Message kind posted to the owning window when a registered hotkey fires.
pub const WM_HOTKEY_MSG: u32 = 0x0312;

// === Hotkey Ids ===

/// Lowest id an application may pass to `RegisterHotKey`.
pub const MIN_HOTKEY_ID: u32 = 0x0001;

/// Highest id an application may pass to `RegisterHotKey`.
/// Ids above this are reserved for shared DLLs.
pub const MAX_HOTKEY_ID: u32 = 0xBFFF;

// === Virtual Keys ===

/// Virtual key code for '0' on the number row.
pub const VK_0: u32 = 0x30;

/// Virtual key code for '1' on the number row.
pub const VK_1: u32 = 0x31;

/// Number of layers reachable from the number row ('1'..'9' then '0').
pub const MAX_LAYER_HOTKEYS: usize = 10;

// === Config Defaults ===

/// Default modifier held together with the layer number.
pub const DEFAULT_MODIFIERS: &str = "ctrl";

/// Default number of keyboard layers.
pub const DEFAULT_LAYER_COUNT: usize = 4;

/// Default interval for polling the modifier while peeking at a layer.
pub const DEFAULT_HIDE_POLL_MS: u64 = 200;

// === Validation Limits ===

/// Minimum number of layers.
pub const MIN_LAYER_COUNT: usize = 1;

/// Minimum hide poll interval in milliseconds.
pub const MIN_HIDE_POLL_MS: u64 = 50;

/// Maximum hide poll interval in milliseconds.
pub const MAX_HIDE_POLL_MS: u64 = 2000;
