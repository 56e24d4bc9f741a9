//! Event queue between the window procedure and the dispatcher.
//!
//! The window procedure runs re-entrantly inside `DispatchMessageW`, so it
//! only publishes; the message loop drains the queue after each message and
//! applies the events with full access to the application state.

use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

use super::types::AppEvent;

/// Event queue backed by an mpsc channel.
///
/// # Example
///
/// ```
/// use keyviz::events::{AppEvent, EventBus};
///
/// let bus = EventBus::new();
/// let publisher = bus.publisher();
///
/// publisher.publish(AppEvent::ShowLayer(1));
///
/// assert_eq!(bus.drain(), vec![AppEvent::ShowLayer(1)]);
/// ```
pub struct EventBus {
    sender: Sender<AppEvent>,
    receiver: Receiver<AppEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::channel();
        Self { sender, receiver }
    }

    /// Get a publisher handle. Publishers are cheap to clone.
    pub fn publisher(&self) -> EventPublisher {
        EventPublisher {
            sender: self.sender.clone(),
        }
    }

    /// Receive the next event without blocking.
    pub fn try_recv(&self) -> Option<AppEvent> {
        match self.receiver.try_recv() {
            Ok(event) => Some(event),
            // The bus holds a sender itself, so Disconnected cannot happen
            // while it is alive.
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    /// Drain all pending events in publish order.
    pub fn drain(&self) -> Vec<AppEvent> {
        std::iter::from_fn(|| self.try_recv()).collect()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// A cloneable event publisher.
#[derive(Clone)]
pub struct EventPublisher {
    sender: Sender<AppEvent>,
}

impl EventPublisher {
    /// Queue an event for the next drain.
    ///
    /// If the bus has been dropped (app shutting down) the event is discarded.
    pub fn publish(&self, event: AppEvent) {
        if self.sender.send(event).is_err() {
            log::trace!("event bus closed, dropping {:?}", event);
        }
    }
}
