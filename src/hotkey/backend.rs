//! The OS hotkey facility the registry drives.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use super::identity::{HotkeyIdentity, WindowHandle};
use super::modifiers::{KeyCombo, Modifiers};

/// System-wide hotkey registration.
///
/// On Windows this is `RegisterHotKey`/`UnregisterHotKey`. Both calls are
/// synchronous and return whether the OS accepted them.
pub trait HotkeyBackend {
    /// Register `modifiers + virtual_key` for `window` under `id`.
    fn register(
        &self,
        window: WindowHandle,
        id: HotkeyIdentity,
        modifiers: Modifiers,
        virtual_key: u32,
    ) -> bool;

    /// Release the registration for `(window, id)`.
    fn unregister(&self, window: WindowHandle, id: HotkeyIdentity) -> bool;
}

#[derive(Debug, Default)]
struct MemoryState {
    active: HashMap<(WindowHandle, HotkeyIdentity), KeyCombo>,
    reserved: HashSet<KeyCombo>,
    register_calls: usize,
    unregister_calls: usize,
}

/// In-process hotkey namespace.
///
/// Behaves like the Windows one: a combination can be owned by a single
/// registration at a time across all windows, reserved combinations are
/// refused, and unregistering something unknown fails. Clones share state,
/// so a test can keep one handle and give another to the registry.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    state: Rc<RefCell<MemoryState>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a combination as taken, as if another application owned it.
    pub fn reserve(&self, modifiers: Modifiers, virtual_key: u32) {
        self.state
            .borrow_mut()
            .reserved
            .insert(KeyCombo::new(modifiers, virtual_key).normalized());
    }

    /// Give a reserved combination back.
    pub fn release(&self, modifiers: Modifiers, virtual_key: u32) {
        self.state
            .borrow_mut()
            .reserved
            .remove(&KeyCombo::new(modifiers, virtual_key).normalized());
    }

    pub fn is_registered(&self, window: WindowHandle, id: HotkeyIdentity) -> bool {
        self.state.borrow().active.contains_key(&(window, id))
    }

    /// Number of live registrations.
    pub fn active_count(&self) -> usize {
        self.state.borrow().active.len()
    }

    /// Total `register` calls, accepted or not.
    pub fn register_calls(&self) -> usize {
        self.state.borrow().register_calls
    }

    /// Total `unregister` calls, accepted or not.
    pub fn unregister_calls(&self) -> usize {
        self.state.borrow().unregister_calls
    }
}

impl HotkeyBackend for MemoryBackend {
    fn register(
        &self,
        window: WindowHandle,
        id: HotkeyIdentity,
        modifiers: Modifiers,
        virtual_key: u32,
    ) -> bool {
        let mut state = self.state.borrow_mut();
        state.register_calls += 1;

        let combo = KeyCombo::new(modifiers, virtual_key).normalized();
        if state.reserved.contains(&combo)
            || state.active.contains_key(&(window, id))
            || state.active.values().any(|owned| *owned == combo)
        {
            return false;
        }
        state.active.insert((window, id), combo);
        true
    }

    fn unregister(&self, window: WindowHandle, id: HotkeyIdentity) -> bool {
        let mut state = self.state.borrow_mut();
        state.unregister_calls += 1;
        state.active.remove(&(window, id)).is_some()
    }
}
