use thiserror::Error;

use super::identity::HotkeyIdentity;
use super::modifiers::KeyCombo;

/// Why a hotkey could not be bound.
///
/// None of these are fatal: a layer whose hotkey fails stays reachable by
/// cycling through layers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HotkeyError {
    /// The same combination is already bound to the same window, under
    /// the given identity.
    #[error("hotkey {0} is already bound")]
    DuplicateBinding(HotkeyIdentity),

    /// Every application hotkey id is in use.
    #[error("no free hotkey id left for {0}")]
    IdentitiesExhausted(KeyCombo),

    /// The OS refused the combination.
    #[error("{0} is taken by another application or reserved by the system")]
    RegistrationRejected(KeyCombo),

    /// Hotkeys need an owner window to be delivered to.
    #[error("hotkey owner window handle is null")]
    InvalidWindow,
}
