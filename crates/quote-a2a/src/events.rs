//! Outbound event queue
//!
//! Executors write reply events into an [`EventQueue`]; the request handler
//! drains the paired [`EventReceiver`] once the executor returns.

use crate::{A2AError, Message, Result};
use tokio::sync::mpsc;

/// Event emitted by an executor
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// A reply message
    Message(Message),
}

/// Create a connected queue/receiver pair
pub fn event_channel() -> (EventQueue, EventReceiver) {
    let (sender, receiver) = mpsc::unbounded_channel();
    (EventQueue { sender }, EventReceiver { receiver })
}

/// Write side of the event channel
#[derive(Debug, Clone)]
pub struct EventQueue {
    sender: mpsc::UnboundedSender<Event>,
}

impl EventQueue {
    /// Enqueue an event
    ///
    /// Fails with [`A2AError::QueueClosed`] when the receiver is gone.
    pub async fn enqueue_event(&self, event: Event) -> Result<()> {
        self.sender.send(event).map_err(|_| A2AError::QueueClosed)
    }
}

/// Read side of the event channel
#[derive(Debug)]
pub struct EventReceiver {
    receiver: mpsc::UnboundedReceiver<Event>,
}

impl EventReceiver {
    /// Wait for the next event; `None` once every queue handle is dropped
    pub async fn recv(&mut self) -> Option<Event> {
        self.receiver.recv().await
    }

    /// Drain all events that are already buffered
    pub fn drain(&mut self) -> Vec<Event> {
        let mut events = Vec::new();
        while let Ok(event) = self.receiver.try_recv() {
            events.push(event);
        }
        events
    }
}
