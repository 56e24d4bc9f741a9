//! One global hotkey per keyboard layer.
//!
//! Layer `n` is bound to the modifier plus the number-row key `n + 1`, with
//! the tenth layer on '0'. Layers past that are only reachable by cycling
//! with the arrow keys.

use std::collections::HashMap;

use super::backend::HotkeyBackend;
use super::identity::{HotkeyIdentity, WindowHandle};
use super::modifiers::{KeyCombo, Modifiers};
use super::registry::HotkeyRegistry;
use crate::events::AppEvent;
use crate::model::constants::{MAX_LAYER_HOTKEYS, VK_0, VK_1};

/// Number-row virtual key for a layer, if it has one.
pub fn layer_key(layer: usize) -> Option<u32> {
    match layer {
        0..=8 => Some(VK_1 + layer as u32),
        9 => Some(VK_0),
        _ => None,
    }
}

/// Layer hotkeys and the layer each identity selects.
pub struct LayerHotkeys<B: HotkeyBackend> {
    registry: HotkeyRegistry<B>,
    layers: HashMap<HotkeyIdentity, usize>,
}

impl<B: HotkeyBackend + Clone> LayerHotkeys<B> {
    pub fn new(backend: B) -> Self {
        Self {
            registry: HotkeyRegistry::new(backend),
            layers: HashMap::new(),
        }
    }

    /// Bind hotkeys for layers `0..layer_count`. Returns how many were bound.
    ///
    /// A layer whose combination is taken is still reachable by cycling, so
    /// failures are logged and skipped.
    pub fn bind(
        &mut self,
        window: WindowHandle,
        modifiers: Modifiers,
        layer_count: usize,
    ) -> usize {
        if layer_count > MAX_LAYER_HOTKEYS {
            log::warn!(
                "{} layers but only {} number keys; layers {}..{} have no hotkey",
                layer_count,
                MAX_LAYER_HOTKEYS,
                MAX_LAYER_HOTKEYS,
                layer_count - 1
            );
        }

        let mut bound = 0;
        for layer in 0..layer_count {
            let Some(vk) = layer_key(layer) else {
                break;
            };
            match self.registry.add(modifiers, vk, window) {
                Ok(identity) => {
                    self.layers.insert(identity, layer);
                    bound += 1;
                }
                Err(e) => log::warn!("layer {} has no hotkey: {}", layer, e),
            }
        }
        log::info!("bound {} of {} layer hotkeys", bound, layer_count);
        bound
    }
}

impl<B: HotkeyBackend> LayerHotkeys<B> {
    /// Layer selected by a window message, if it is one of our hotkeys.
    pub fn layer_for_message(&self, message: u32, wparam: usize) -> Option<usize> {
        let identity = self.registry.match_message(message, wparam)?;
        self.layers.get(&identity).copied()
    }

    /// Translate a window message into an application event.
    pub fn event_for_message(&self, message: u32, wparam: usize) -> Option<AppEvent> {
        self.layer_for_message(message, wparam).map(AppEvent::ShowLayer)
    }

    /// The combination bound to a layer.
    pub fn combo_for_layer(&self, layer: usize) -> Option<KeyCombo> {
        self.layers
            .iter()
            .find(|(_, l)| **l == layer)
            .and_then(|(identity, _)| self.registry.get(*identity))
            .map(|binding| binding.combo())
    }

    /// Unregister all layer hotkeys.
    pub fn clear(&mut self) {
        self.registry.clear();
        self.layers.clear();
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn registry(&self) -> &HotkeyRegistry<B> {
        &self.registry
    }
}
