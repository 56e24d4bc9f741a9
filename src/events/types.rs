//! Application events for inter-module communication.
//!
//! These events represent high-level actions published by the window
//! procedure (hotkeys, arrow keys, timers) and handled by the dispatcher.
//! This module is pure Rust with no FFI dependencies, making it fully testable.

/// Application-level events.
///
/// Events flow from producers (layer hotkeys, arrow keys, the hide
/// timer) through the EventBus to the dispatcher, which applies them to the
/// layer state and the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    // === Input Events ===
    /// Show the given layer (layer hotkey)
    ShowLayer(usize),

    /// Cycle to the next layer
    NextLayer,

    /// Cycle to the previous layer
    PreviousLayer,

    // === Window Events ===
    /// Window was minimized by the user
    Minimize,

    /// Bring the window back
    Restore,

    /// The hotkey modifier is no longer held while peeking at a layer
    ModifierReleased,

    /// Close the application
    Quit,
}

impl AppEvent {
    /// Returns true if this event selects a layer.
    pub fn changes_layer(&self) -> bool {
        matches!(
            self,
            AppEvent::ShowLayer(_) | AppEvent::NextLayer | AppEvent::PreviousLayer
        )
    }

    /// Returns a human-readable description of the event for debugging.
    pub fn description(&self) -> &'static str {
        match self {
            AppEvent::ShowLayer(_) => "Show layer",
            AppEvent::NextLayer => "Next layer",
            AppEvent::PreviousLayer => "Previous layer",
            AppEvent::Minimize => "Minimize window",
            AppEvent::Restore => "Restore window",
            AppEvent::ModifierReleased => "Hotkey modifier released",
            AppEvent::Quit => "Quit",
        }
    }
}
