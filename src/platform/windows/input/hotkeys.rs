//! Global hotkeys via Win32 `RegisterHotKey`.

use std::ffi::c_void;

use windows::Win32::Foundation::HWND;
use windows::Win32::UI::Input::KeyboardAndMouse::{
    GetAsyncKeyState, RegisterHotKey, UnregisterHotKey, HOT_KEY_MODIFIERS, VIRTUAL_KEY, VK_CONTROL,
    VK_LWIN, VK_MENU, VK_RWIN, VK_SHIFT,
};

use crate::hotkey::{HotkeyBackend, HotkeyIdentity, KeyCombo, Modifiers, WindowHandle};

// Timer used to poll the modifier while peeking at a layer
pub const TIMER_HIDE_POLL: usize = 1;

/// The system hotkey table. Hotkeys are delivered as `WM_HOTKEY` to the
/// owning window's message queue.
#[derive(Debug, Clone, Copy, Default)]
pub struct Win32Hotkeys;

impl HotkeyBackend for Win32Hotkeys {
    fn register(
        &self,
        window: WindowHandle,
        id: HotkeyIdentity,
        modifiers: Modifiers,
        virtual_key: u32,
    ) -> bool {
        // SAFETY: plain Win32 call; a stale window handle makes it fail, not crash.
        let result = unsafe {
            RegisterHotKey(
                Some(to_hwnd(window)),
                id.as_i32(),
                HOT_KEY_MODIFIERS(modifiers.bits()),
                virtual_key,
            )
        };
        if let Err(e) = &result {
            log::debug!(
                "RegisterHotKey({}, {}) failed: {}",
                id,
                KeyCombo::new(modifiers, virtual_key),
                e
            );
        }
        result.is_ok()
    }

    fn unregister(&self, window: WindowHandle, id: HotkeyIdentity) -> bool {
        // SAFETY: as above.
        unsafe { UnregisterHotKey(Some(to_hwnd(window)), id.as_i32()) }.is_ok()
    }
}

pub fn to_hwnd(window: WindowHandle) -> HWND {
    HWND(window.raw() as *mut c_void)
}

pub fn from_hwnd(hwnd: HWND) -> WindowHandle {
    WindowHandle::from_raw(hwnd.0 as isize)
}

fn key_down(vk: VIRTUAL_KEY) -> bool {
    // SAFETY: reads the async key state, no pointers involved.
    let state = unsafe { GetAsyncKeyState(i32::from(vk.0)) };
    state < 0
}

/// True while every modifier key in `modifiers` is physically held.
///
/// An empty mask counts as released.
pub fn modifiers_held(modifiers: Modifiers) -> bool {
    let checks = [
        (Modifiers::CONTROL, key_down(VK_CONTROL)),
        (Modifiers::ALT, key_down(VK_MENU)),
        (Modifiers::SHIFT, key_down(VK_SHIFT)),
        (Modifiers::WIN, key_down(VK_LWIN) || key_down(VK_RWIN)),
    ];
    let mut any = false;
    for (flag, down) in checks {
        if modifiers.contains(flag) {
            if !down {
                return false;
            }
            any = true;
        }
    }
    any
}
