//! The set of hotkeys an application owns.

use std::collections::HashMap;

use super::backend::HotkeyBackend;
use super::binding::HotkeyBinding;
use super::error::HotkeyError;
use super::identity::{HotkeyIdentity, WindowHandle};
use super::modifiers::Modifiers;
use crate::model::constants::{MAX_HOTKEY_ID, MIN_HOTKEY_ID, WM_HOTKEY_MSG};

/// Active hotkey bindings keyed by identity.
///
/// Every stored binding is registered with the OS; failed registrations are
/// never stored. Must be used from the thread that runs the message loop.
/// Dropping the registry unregisters everything it holds.
pub struct HotkeyRegistry<B: HotkeyBackend> {
    backend: B,
    bindings: HashMap<HotkeyIdentity, HotkeyBinding<B>>,
}

impl<B: HotkeyBackend + Clone> HotkeyRegistry<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            bindings: HashMap::new(),
        }
    }

    /// Register `modifiers + virtual_key` for `window` and keep it.
    ///
    /// Adding the same combination for the same window again is refused
    /// with `DuplicateBinding` before the OS is asked, so one combination is
    /// never registered twice. If the derived identity already belongs to a
    /// different combination, the next free id in the range is used instead.
    /// If the OS rejects the combination nothing is stored.
    pub fn add(
        &mut self,
        modifiers: Modifiers,
        virtual_key: u32,
        window: WindowHandle,
    ) -> Result<HotkeyIdentity, HotkeyError> {
        let mut binding =
            HotkeyBinding::new(modifiers, virtual_key, window, self.backend.clone())?;
        if let Some(existing) = self.find(modifiers, virtual_key, window) {
            return Err(HotkeyError::DuplicateBinding(existing));
        }

        let derived = binding.identity();
        let identity = self
            .free_identity(derived)
            .ok_or(HotkeyError::IdentitiesExhausted(binding.combo()))?;
        if identity != derived {
            log::debug!(
                "hotkey id {} is taken, {} uses {}",
                derived,
                binding.combo(),
                identity
            );
            binding.reassign(identity);
        }

        if let Err(e) = binding.register() {
            log::debug!("hotkey {} not stored: {}", identity, e);
            return Err(e);
        }
        log::debug!("registered {} as hotkey {}", binding.combo(), identity);
        self.bindings.insert(identity, binding);
        Ok(identity)
    }

    /// First unused id at or after `start`, wrapping once around the range.
    fn free_identity(&self, start: HotkeyIdentity) -> Option<HotkeyIdentity> {
        let span = (MAX_HOTKEY_ID - MIN_HOTKEY_ID + 1) as usize;
        std::iter::successors(Some(start), |id| Some(id.next()))
            .take(span)
            .find(|id| !self.bindings.contains_key(id))
    }
}

impl<B: HotkeyBackend> HotkeyRegistry<B> {
    /// Unregister and forget every binding.
    pub fn clear(&mut self) {
        if self.bindings.is_empty() {
            return;
        }
        log::debug!("releasing {} hotkeys", self.bindings.len());
        for (_, mut binding) in self.bindings.drain() {
            binding.unregister();
        }
    }

    /// Match a window message against the registered hotkeys.
    ///
    /// Called for every message the window receives, so anything that is not
    /// `WM_HOTKEY` returns straight away.
    pub fn match_message(&self, message: u32, wparam: usize) -> Option<HotkeyIdentity> {
        if message != WM_HOTKEY_MSG {
            return None;
        }
        let identity = HotkeyIdentity::from_wparam(wparam)?;
        self.bindings.contains_key(&identity).then_some(identity)
    }

    /// Identity of the binding for exactly this combination and window.
    pub fn find(
        &self,
        modifiers: Modifiers,
        virtual_key: u32,
        window: WindowHandle,
    ) -> Option<HotkeyIdentity> {
        self.bindings
            .values()
            .find(|binding| binding.matches(modifiers, virtual_key, window))
            .map(|binding| binding.identity())
    }

    pub fn get(&self, identity: HotkeyIdentity) -> Option<&HotkeyBinding<B>> {
        self.bindings.get(&identity)
    }

    pub fn contains(&self, identity: HotkeyIdentity) -> bool {
        self.bindings.contains_key(&identity)
    }

    pub fn identities(&self) -> impl Iterator<Item = HotkeyIdentity> + '_ {
        self.bindings.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

impl<B: HotkeyBackend> Drop for HotkeyRegistry<B> {
    fn drop(&mut self) {
        self.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hotkey::{KeyCombo, MemoryBackend};

    const WINDOW: WindowHandle = WindowHandle::from_raw(0x1A2B);

    #[test]
    fn add_stores_only_confirmed_registrations() {
        let backend = MemoryBackend::new();
        backend.reserve(Modifiers::CONTROL, 0x32);
        let mut registry = HotkeyRegistry::new(backend.clone());

        let first = registry.add(Modifiers::CONTROL, 0x31, WINDOW).unwrap();
        let second = registry.add(Modifiers::CONTROL, 0x32, WINDOW);

        assert_eq!(
            second,
            Err(HotkeyError::RegistrationRejected(KeyCombo::new(Modifiers::CONTROL, 0x32)))
        );
        assert_eq!(registry.len(), 1);
        assert!(registry.contains(first));
        assert!(registry.get(first).unwrap().is_registered());
    }

    #[test]
    fn rejected_binding_can_be_retried_after_release() {
        let backend = MemoryBackend::new();
        backend.reserve(Modifiers::ALT, 0x41);
        let mut registry = HotkeyRegistry::new(backend.clone());

        assert!(registry.add(Modifiers::ALT, 0x41, WINDOW).is_err());
        backend.release(Modifiers::ALT, 0x41);
        assert!(registry.add(Modifiers::ALT, 0x41, WINDOW).is_ok());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn null_window_is_refused_without_os_call() {
        let backend = MemoryBackend::new();
        let mut registry = HotkeyRegistry::new(backend.clone());
        assert_eq!(
            registry.add(Modifiers::CONTROL, 0x31, WindowHandle::from_raw(0)),
            Err(HotkeyError::InvalidWindow)
        );
        assert_eq!(backend.register_calls(), 0);
    }

    #[test]
    fn drop_unregisters_everything() {
        let backend = MemoryBackend::new();
        {
            let mut registry = HotkeyRegistry::new(backend.clone());
            registry.add(Modifiers::CONTROL, 0x31, WINDOW).unwrap();
            registry.add(Modifiers::CONTROL, 0x32, WINDOW).unwrap();
            assert_eq!(backend.active_count(), 2);
        }
        assert_eq!(backend.active_count(), 0);
    }

    #[test]
    fn identity_clash_moves_to_next_free_id() {
        // Both derive to #56AD on this window
        let backend = MemoryBackend::new();
        let mut registry = HotkeyRegistry::new(backend.clone());

        let alt = registry.add(Modifiers::ALT, 0x74, WINDOW).unwrap();
        let ctrl = registry.add(Modifiers::CONTROL, 0x01, WINDOW).unwrap();

        assert_eq!(alt, HotkeyIdentity::derive(Modifiers::CONTROL, 0x01, WINDOW));
        assert_eq!(ctrl, alt.next());
        assert_eq!(registry.len(), 2);
        assert!(backend.is_registered(WINDOW, ctrl));
        assert_eq!(registry.match_message(WM_HOTKEY_MSG, ctrl.value() as usize), Some(ctrl));
        assert_eq!(registry.get(ctrl).unwrap().combo(), KeyCombo::new(Modifiers::CONTROL, 0x01));
    }

    #[test]
    fn re_adding_moved_combination_is_still_a_duplicate() {
        let mut registry = HotkeyRegistry::new(MemoryBackend::new());
        registry.add(Modifiers::ALT, 0x74, WINDOW).unwrap();
        let ctrl = registry.add(Modifiers::CONTROL, 0x01, WINDOW).unwrap();

        assert_eq!(
            registry.add(Modifiers::CONTROL, 0x01, WINDOW),
            Err(HotkeyError::DuplicateBinding(ctrl))
        );
        assert_eq!(registry.find(Modifiers::CONTROL, 0x01, WINDOW), Some(ctrl));
    }

    #[test]
    fn message_payload_outside_id_range_is_ignored() {
        let mut registry = HotkeyRegistry::new(MemoryBackend::new());
        registry.add(Modifiers::CONTROL, 0x31, WINDOW).unwrap();
        assert_eq!(registry.match_message(WM_HOTKEY_MSG, usize::MAX), None);
    }
}
