//! Shared types for the client driver.
//!
//! This module defines:
//! - channel aliases carrying decoded events to the application
//! - `ChannelSink`: the `EventSink` that feeds such a channel

use tokio::sync::mpsc;
use tracing::trace;
use tws_core::{Event, EventSink};

/// Decoded events, in wire order, from the driver to the application.
pub type EventTx = mpsc::UnboundedSender<Event>;
pub type EventRx = mpsc::UnboundedReceiver<Event>;

/// Forwards every emitted event into an unbounded channel.
///
/// Once the receiver is gone events are dropped; the connection itself
/// keeps going until it is closed.
#[derive(Debug, Clone)]
pub struct ChannelSink(pub EventTx);

impl ChannelSink {
    pub fn new(tx: EventTx) -> Self {
        ChannelSink(tx)
    }
}

impl EventSink for ChannelSink {
    fn emit(&mut self, event: Event) {
        if let Err(e) = self.0.send(event) {
            trace!(kind = e.0.kind(), "event receiver dropped");
        }
    }
}
