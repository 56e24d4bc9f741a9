//! Windows entry point and application shell.
//!
//! Owns the main window and the layer hotkeys. The window procedure only
//! translates messages into `AppEvent`s; the message loop drains them and
//! applies them to the layer state outside of any window callback.

use std::cell::RefCell;

use windows::core::{w, HSTRING};
use windows::Win32::Foundation::{HWND, LPARAM, LRESULT, WPARAM};
use windows::Win32::System::LibraryLoader::GetModuleHandleW;
use windows::Win32::UI::Input::KeyboardAndMouse::{VK_ESCAPE, VK_LEFT, VK_RIGHT};
use windows::Win32::UI::WindowsAndMessaging::{
    CreateWindowExW, DefWindowProcW, DestroyWindow, DispatchMessageW, GetMessageW, KillTimer,
    LoadCursorW, PostQuitMessage, RegisterClassW, SetForegroundWindow, SetTimer, SetWindowTextW,
    ShowWindow, TranslateMessage, CS_HREDRAW, CS_VREDRAW, CW_USEDEFAULT, IDC_ARROW, MSG,
    SC_MINIMIZE, SC_RESTORE, SW_MINIMIZE, SW_RESTORE, SW_SHOW, WINDOW_EX_STYLE, WM_CLOSE,
    WM_DESTROY, WM_KEYDOWN, WM_SYSCOMMAND, WM_TIMER, WNDCLASSW, WS_OVERLAPPEDWINDOW,
};

use super::input::{from_hwnd, modifiers_held, Win32Hotkeys, TIMER_HIDE_POLL};
use crate::config::Config;
use crate::events::{AppEvent, EventBus, EventPublisher};
use crate::hotkey::{LayerHotkeys, Modifiers};
use crate::model::{LayerState, ShellAction, DEFAULT_MODIFIERS};

/// Everything the window procedure and the dispatcher share.
struct Shell {
    hotkeys: LayerHotkeys<Win32Hotkeys>,
    layers: LayerState,
    publisher: EventPublisher,
    modifiers: Modifiers,
    hide_poll_ms: u32,
}

impl Shell {
    fn title(&self) -> String {
        let layer = self.layers.selected();
        match self.hotkeys.combo_for_layer(layer) {
            Some(combo) => format!("KeyViz - layer {} ({})", layer, combo),
            None => format!("KeyViz - layer {}", layer),
        }
    }
}

thread_local! {
    static SHELL: RefCell<Option<Shell>> = const { RefCell::new(None) };
}

/// Run `f` on the shell unless it is missing or already borrowed.
///
/// `ShowWindow` and friends re-enter the window procedure synchronously, so
/// a borrow may still be live higher up the stack.
fn with_shell<R>(f: impl FnOnce(&mut Shell) -> R) -> Option<R> {
    SHELL.with(|s| {
        let mut shell = s.try_borrow_mut().ok()?;
        shell.as_mut().map(f)
    })
}

fn publish(event: AppEvent) {
    with_shell(|shell| shell.publisher.publish(event));
}

/// Main entry point for Windows.
pub fn run() {
    if let Err(e) = run_app() {
        log::error!("KeyViz error: {}", e);
        std::process::exit(1);
    }
}

fn run_app() -> windows::core::Result<()> {
    let config = Config::load();
    let modifiers = config.hotkey_modifiers().unwrap_or_else(|e| {
        log::warn!("{}; using {}", e, DEFAULT_MODIFIERS);
        Modifiers::CONTROL
    });

    unsafe {
        let instance = GetModuleHandleW(None)?;
        let class_name = w!("KeyVizWindow");

        let wc = WNDCLASSW {
            style: CS_HREDRAW | CS_VREDRAW,
            lpfnWndProc: Some(wndproc),
            hInstance: instance.into(),
            hCursor: LoadCursorW(None, IDC_ARROW)?,
            lpszClassName: class_name,
            ..Default::default()
        };
        RegisterClassW(&wc);

        let hwnd = CreateWindowExW(
            WINDOW_EX_STYLE::default(),
            class_name,
            w!("KeyViz"),
            WS_OVERLAPPEDWINDOW,
            CW_USEDEFAULT,
            CW_USEDEFAULT,
            800,
            320,
            None,
            None,
            Some(instance.into()),
            None,
        )?;

        // One hotkey per layer, owned by the main window
        let mut hotkeys = LayerHotkeys::new(Win32Hotkeys);
        hotkeys.bind(from_hwnd(hwnd), modifiers, config.layer_count);

        let bus = EventBus::new();
        SHELL.with(|s| {
            *s.borrow_mut() = Some(Shell {
                hotkeys,
                layers: LayerState::new(config.layer_count),
                publisher: bus.publisher(),
                modifiers,
                hide_poll_ms: config.hide_poll_ms as u32,
            })
        });

        refresh_title(hwnd);
        let _ = ShowWindow(hwnd, SW_SHOW);

        // Message loop
        let mut msg = MSG::default();
        while GetMessageW(&mut msg, None, 0, 0).as_bool() {
            let _ = TranslateMessage(&msg);
            DispatchMessageW(&msg);

            for event in bus.drain() {
                dispatch(hwnd, event);
            }
        }

        // Hotkeys were released on WM_DESTROY; this drops the rest.
        SHELL.with(|s| s.borrow_mut().take());

        Ok(())
    }
}

/// Apply one event to the layer state and act on the window.
fn dispatch(hwnd: HWND, event: AppEvent) {
    let Some((action, poll_ms)) = with_shell(|shell| {
        let action = shell.layers.apply(&event);
        log::debug!("{} -> {:?}", event.description(), action);
        (action, shell.hide_poll_ms)
    }) else {
        return;
    };

    unsafe {
        match action {
            ShellAction::None => {}
            ShellAction::Show | ShellAction::Peek => {
                refresh_title(hwnd);
                let _ = ShowWindow(hwnd, SW_RESTORE);
                let _ = SetForegroundWindow(hwnd);
                if action == ShellAction::Peek {
                    SetTimer(Some(hwnd), TIMER_HIDE_POLL, poll_ms, None);
                }
            }
            ShellAction::Minimize => {
                let _ = KillTimer(Some(hwnd), TIMER_HIDE_POLL);
                let _ = ShowWindow(hwnd, SW_MINIMIZE);
            }
            ShellAction::Exit => {
                let _ = DestroyWindow(hwnd);
            }
        }
    }
}

fn refresh_title(hwnd: HWND) {
    if let Some(title) = with_shell(|shell| shell.title()) {
        log::info!("{}", title);
        unsafe {
            let _ = SetWindowTextW(hwnd, &HSTRING::from(title));
        }
    }
}

extern "system" fn wndproc(hwnd: HWND, msg: u32, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
    // Every message goes past the hotkey table first
    let hotkey = with_shell(|shell| shell.hotkeys.event_for_message(msg, wparam.0));
    if let Some(event) = hotkey.flatten() {
        publish(event);
        return LRESULT(0);
    }

    unsafe {
        match msg {
            WM_SYSCOMMAND => {
                match (wparam.0 & 0xFFF0) as u32 {
                    SC_MINIMIZE => publish(AppEvent::Minimize),
                    SC_RESTORE => publish(AppEvent::Restore),
                    _ => {}
                }
                DefWindowProcW(hwnd, msg, wparam, lparam)
            }

            WM_KEYDOWN => {
                match wparam.0 as u16 {
                    vk if vk == VK_RIGHT.0 => publish(AppEvent::NextLayer),
                    vk if vk == VK_LEFT.0 => publish(AppEvent::PreviousLayer),
                    vk if vk == VK_ESCAPE.0 => publish(AppEvent::Minimize),
                    _ => {}
                }
                LRESULT(0)
            }

            WM_TIMER => {
                if wparam.0 == TIMER_HIDE_POLL {
                    let held = with_shell(|shell| modifiers_held(shell.modifiers));
                    if held != Some(true) {
                        let _ = KillTimer(Some(hwnd), TIMER_HIDE_POLL);
                        publish(AppEvent::ModifierReleased);
                    }
                }
                LRESULT(0)
            }

            WM_CLOSE => {
                publish(AppEvent::Quit);
                LRESULT(0)
            }

            WM_DESTROY => {
                with_shell(|shell| shell.hotkeys.clear());
                PostQuitMessage(0);
                LRESULT(0)
            }

            _ => DefWindowProcW(hwnd, msg, wparam, lparam),
        }
    }
}
