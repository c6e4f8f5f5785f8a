//! Event bus — broadcast-style event dispatch with pluggable sinks.
//!
//! Events are queued on a `std::sync::mpsc` channel when emitted and
//! handed to every registered sink on [`EventBus::flush`].

use std::sync::mpsc;

use crate::events::BenchEvent;
use crate::sinks::EventSink;

/// Broadcast event bus for harness telemetry.
pub struct EventBus {
    sender: mpsc::Sender<BenchEvent>,
    receiver: mpsc::Receiver<BenchEvent>,
    sinks: Vec<Box<dyn EventSink>>,
    /// Disabled bus is a no-op.
    enabled: bool,
}

impl EventBus {
    /// Creates a new event bus with no sinks.
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            sender,
            receiver,
            sinks: Vec::new(),
            enabled: true,
        }
    }

    /// Registers a sink to receive events.
    pub fn add_sink(&mut self, sink: Box<dyn EventSink>) {
        self.sinks.push(sink);
    }

    /// Builder-style variant of [`EventBus::add_sink`].
    pub fn with_sink(mut self, sink: impl EventSink + 'static) -> Self {
        self.add_sink(Box::new(sink));
        self
    }

    /// Enables or disables the bus. Disabled bus drops events silently.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Queues an event. No-op when disabled.
    pub fn emit(&self, event: BenchEvent) {
        if !self.enabled {
            return;
        }
        // The receiver lives in `self`, so sending cannot fail.
        let _ = self.sender.send(event);
    }

    /// Dispatches all queued events to the registered sinks.
    pub fn flush(&mut self) {
        while let Ok(event) = self.receiver.try_recv() {
            for sink in &mut self.sinks {
                sink.handle(&event);
            }
        }
    }

    /// Flushes, then lets every sink finalize.
    pub fn finish(&mut self) {
        self.flush();
        for sink in &mut self.sinks {
            sink.finalize();
        }
    }

    /// Returns the number of registered sinks.
    pub fn sink_count(&self) -> usize {
        self.sinks.len()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
