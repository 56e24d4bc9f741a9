//! Hotkey identities and owner window handles.

use std::fmt;

use super::modifiers::Modifiers;
use crate::model::constants::{MAX_HOTKEY_ID, MIN_HOTKEY_ID};

/// Opaque handle of the window that owns a hotkey (`HWND` on Windows).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowHandle(isize);

impl WindowHandle {
    pub const fn from_raw(raw: isize) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> isize {
        self.0
    }

    pub const fn is_null(self) -> bool {
        self.0 == 0
    }
}

/// Id a hotkey is registered under, and the `wParam` of its `WM_HOTKEY`.
///
/// Derived from (modifiers, virtual key, window), so the same combination on
/// the same window always gets the same identity. Always within
/// `MIN_HOTKEY_ID..=MAX_HOTKEY_ID`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HotkeyIdentity(u32);

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

impl HotkeyIdentity {
    /// FNV-1a over the three inputs, folded into the application id range.
    pub fn derive(modifiers: Modifiers, virtual_key: u32, window: WindowHandle) -> Self {
        let bytes = modifiers
            .bits()
            .to_le_bytes()
            .into_iter()
            .chain(virtual_key.to_le_bytes())
            .chain((window.raw() as i64).to_le_bytes());

        let hash = bytes.fold(FNV_OFFSET, |hash, byte| {
            (hash ^ u64::from(byte)).wrapping_mul(FNV_PRIME)
        });

        let span = u64::from(MAX_HOTKEY_ID - MIN_HOTKEY_ID + 1);
        Self((hash % span) as u32 + MIN_HOTKEY_ID)
    }

    /// Read the identity carried in a `WM_HOTKEY` `wParam`.
    ///
    /// Returns `None` for values no application hotkey can have, such as the
    /// negative ids the system uses for Alt+Tab style snapshots.
    pub fn from_wparam(wparam: usize) -> Option<Self> {
        u32::try_from(wparam)
            .ok()
            .filter(|id| (MIN_HOTKEY_ID..=MAX_HOTKEY_ID).contains(id))
            .map(Self)
    }

    /// The following id, wrapping from the top of the range to the bottom.
    pub fn next(self) -> Self {
        if self.0 >= MAX_HOTKEY_ID {
            Self(MIN_HOTKEY_ID)
        } else {
            Self(self.0 + 1)
        }
    }

    pub const fn value(self) -> u32 {
        self.0
    }

    /// The id as `RegisterHotKey` takes it.
    pub const fn as_i32(self) -> i32 {
        // MAX_HOTKEY_ID < i32::MAX
        self.0 as i32
    }
}

impl fmt::Display for HotkeyIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:04X}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: WindowHandle = WindowHandle::from_raw(0x1A2B);

    #[test]
    fn derive_is_deterministic() {
        let a = HotkeyIdentity::derive(Modifiers::CONTROL, 0x31, WINDOW);
        let b = HotkeyIdentity::derive(Modifiers::CONTROL, 0x31, WINDOW);
        assert_eq!(a, b);
    }

    #[test]
    fn derive_stays_in_application_range() {
        for vk in 0x30..0x5B {
            for mods in [Modifiers::empty(), Modifiers::CONTROL, Modifiers::ALT | Modifiers::SHIFT] {
                let id = HotkeyIdentity::derive(mods, vk, WINDOW);
                assert!((MIN_HOTKEY_ID..=MAX_HOTKEY_ID).contains(&id.value()));
            }
        }
    }

    #[test]
    fn number_row_identities_are_distinct() {
        let mut ids: Vec<_> = (0x30..=0x39)
            .map(|vk| HotkeyIdentity::derive(Modifiers::CONTROL, vk, WINDOW))
            .collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 10);
    }

    #[test]
    fn from_wparam_round_trips_and_rejects_out_of_range() {
        let id = HotkeyIdentity::derive(Modifiers::CONTROL, 0x31, WINDOW);
        assert_eq!(HotkeyIdentity::from_wparam(id.value() as usize), Some(id));
        assert_eq!(HotkeyIdentity::from_wparam(0), None);
        assert_eq!(HotkeyIdentity::from_wparam(0xC000), None);
        assert_eq!(HotkeyIdentity::from_wparam(usize::MAX), None);
    }

    #[test]
    fn next_wraps_inside_application_range() {
        let last = HotkeyIdentity::from_wparam(MAX_HOTKEY_ID as usize).unwrap();
        assert_eq!(last.next().value(), MIN_HOTKEY_ID);
        let first = HotkeyIdentity::from_wparam(MIN_HOTKEY_ID as usize).unwrap();
        assert_eq!(first.next().value(), MIN_HOTKEY_ID + 1);
    }

    #[test]
    fn null_window_handle() {
        assert!(WindowHandle::from_raw(0).is_null());
        assert!(!WINDOW.is_null());
    }
}
