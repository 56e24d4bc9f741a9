//! Layer selection state (pure Rust, no FFI).
//!
//! Tracks which keyboard layer is shown and whether the window is minimized,
//! and turns application events into window actions.

use crate::events::AppEvent;

/// What the shell should do with its window after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellAction {
    /// Nothing to do.
    None,
    /// Redraw the selected layer and bring the window to the front.
    Show,
    /// Like `Show`, but minimize again once the hotkey modifier is released.
    Peek,
    /// Minimize the window.
    Minimize,
    /// Leave the message loop.
    Exit,
}

/// Selected layer and window visibility.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerState {
    available: usize,
    selected: usize,
    minimized: bool,
}

impl LayerState {
    /// Start on layer 0 with the window visible.
    pub fn new(available: usize) -> Self {
        Self {
            available,
            selected: 0,
            minimized: false,
        }
    }

    pub fn available(&self) -> usize {
        self.available
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn is_minimized(&self) -> bool {
        self.minimized
    }

    /// Select a layer. Returns true if the selection changed.
    ///
    /// Requests for layers that don't exist are ignored.
    pub fn select(&mut self, layer: usize) -> bool {
        if layer >= self.available {
            log::warn!(
                "ignoring layer {} (only {} available)",
                layer,
                self.available
            );
            return false;
        }
        let changed = self.selected != layer;
        self.selected = layer;
        changed
    }

    /// Cycle forward, wrapping to layer 0.
    pub fn next(&mut self) -> bool {
        if self.available == 0 {
            return false;
        }
        self.select((self.selected + 1) % self.available)
    }

    /// Cycle backward, wrapping to the last layer.
    pub fn previous(&mut self) -> bool {
        if self.available == 0 {
            return false;
        }
        self.select((self.selected + self.available - 1) % self.available)
    }

    /// Apply an event and return what the shell should do with the window.
    ///
    /// A layer event while minimized is a peek: the window comes up but the
    /// state stays minimized, so releasing the modifier minimizes it again.
    pub fn apply(&mut self, event: &AppEvent) -> ShellAction {
        match *event {
            AppEvent::ShowLayer(layer) if layer < self.available => {
                self.select(layer);
                self.reveal()
            }
            AppEvent::ShowLayer(layer) => {
                log::warn!("no layer {} to show", layer);
                ShellAction::None
            }
            AppEvent::NextLayer => {
                self.next();
                self.reveal()
            }
            AppEvent::PreviousLayer => {
                self.previous();
                self.reveal()
            }
            AppEvent::Minimize => {
                if self.minimized {
                    ShellAction::None
                } else {
                    self.minimized = true;
                    ShellAction::Minimize
                }
            }
            AppEvent::Restore => {
                self.minimized = false;
                ShellAction::Show
            }
            AppEvent::ModifierReleased => {
                if self.minimized {
                    ShellAction::Minimize
                } else {
                    ShellAction::None
                }
            }
            AppEvent::Quit => ShellAction::Exit,
        }
    }

    fn reveal(&self) -> ShellAction {
        if self.minimized {
            ShellAction::Peek
        } else {
            ShellAction::Show
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_on_first_layer_visible() {
        let state = LayerState::new(4);
        assert_eq!(state.selected(), 0);
        assert_eq!(state.available(), 4);
        assert!(!state.is_minimized());
    }

    #[test]
    fn select_reports_change() {
        let mut state = LayerState::new(3);
        assert!(state.select(2));
        assert!(!state.select(2));
        assert_eq!(state.selected(), 2);
    }

    #[test]
    fn cycling_on_empty_keymap_is_noop() {
        let mut state = LayerState::new(0);
        assert!(!state.next());
        assert!(!state.previous());
        assert_eq!(state.selected(), 0);
    }
}
