//! A single global hotkey registration.

use super::backend::HotkeyBackend;
use super::error::HotkeyError;
use super::identity::{HotkeyIdentity, WindowHandle};
use super::modifiers::{KeyCombo, Modifiers};

/// One combination registered (or registrable) with the OS for one window.
///
/// The inputs are fixed at construction, so the identity never goes stale.
/// Dropping a registered binding unregisters it.
pub struct HotkeyBinding<B: HotkeyBackend> {
    identity: HotkeyIdentity,
    combo: KeyCombo,
    window: WindowHandle,
    registered: bool,
    backend: B,
}

impl<B: HotkeyBackend> HotkeyBinding<B> {
    /// Create an unregistered binding.
    pub fn new(
        modifiers: Modifiers,
        virtual_key: u32,
        window: WindowHandle,
        backend: B,
    ) -> Result<Self, HotkeyError> {
        if window.is_null() {
            return Err(HotkeyError::InvalidWindow);
        }
        Ok(Self {
            identity: HotkeyIdentity::derive(modifiers, virtual_key, window),
            combo: KeyCombo::new(modifiers, virtual_key),
            window,
            registered: false,
            backend,
        })
    }

    /// Register with the OS. Already registered is not an error.
    pub fn register(&mut self) -> Result<(), HotkeyError> {
        if self.registered {
            return Ok(());
        }
        let accepted = self.backend.register(
            self.window,
            self.identity,
            self.combo.modifiers,
            self.combo.virtual_key,
        );
        if !accepted {
            return Err(HotkeyError::RegistrationRejected(self.combo));
        }
        self.registered = true;
        Ok(())
    }

    /// Move an unregistered binding to another id.
    ///
    /// Used by the registry when the derived id already belongs to a
    /// different combination. Ignored once registered.
    pub(crate) fn reassign(&mut self, identity: HotkeyIdentity) {
        if !self.registered {
            self.identity = identity;
        }
    }

    /// True if this binding was built from exactly these inputs.
    pub fn matches(&self, modifiers: Modifiers, virtual_key: u32, window: WindowHandle) -> bool {
        self.combo == KeyCombo::new(modifiers, virtual_key) && self.window == window
    }

    /// Release the OS registration. No-op when not registered.
    pub fn unregister(&mut self) {
        if !self.registered {
            return;
        }
        self.registered = false;
        if !self.backend.unregister(self.window, self.identity) {
            // Window already destroyed; the OS dropped the hotkey with it.
            log::debug!("hotkey {} ({}) was already released", self.identity, self.combo);
        }
    }

    pub fn identity(&self) -> HotkeyIdentity {
        self.identity
    }

    pub fn combo(&self) -> KeyCombo {
        self.combo
    }

    pub fn modifiers(&self) -> Modifiers {
        self.combo.modifiers
    }

    pub fn virtual_key(&self) -> u32 {
        self.combo.virtual_key
    }

    pub fn window(&self) -> WindowHandle {
        self.window
    }

    pub fn is_registered(&self) -> bool {
        self.registered
    }
}

impl<B: HotkeyBackend> Drop for HotkeyBinding<B> {
    fn drop(&mut self) {
        self.unregister();
    }
}

impl<B: HotkeyBackend> std::fmt::Debug for HotkeyBinding<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HotkeyBinding")
            .field("identity", &self.identity)
            .field("combo", &self.combo)
            .field("window", &self.window)
            .field("registered", &self.registered)
            .finish()
    }
}
