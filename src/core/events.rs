//! Input event sources polled once per frame

use std::time::Duration;

use crossbeam::channel::{self, Receiver, Sender, TryRecvError};
use gauges_core::InputEvent;

/// Supplier of input events for the application loop
pub trait EventSource {
    /// Events due at or before `now`, in delivery order
    fn poll_events(&mut self, now: Duration) -> Vec<InputEvent>;

    /// True once the source will never yield another event
    fn is_exhausted(&self) -> bool {
        false
    }
}

/// Deterministic, timestamped event script
#[derive(Debug, Clone, Default)]
pub struct ScriptedEvents {
    events: Vec<InputEvent>,
    next: usize,
}

impl ScriptedEvents {
    pub fn new(mut events: Vec<InputEvent>) -> Self {
        // Stable sort keeps the scripted order for equal timestamps
        events.sort_by_key(|event| event.at);
        Self { events, next: 0 }
    }

    pub fn remaining(&self) -> usize {
        self.events.len() - self.next
    }
}

impl EventSource for ScriptedEvents {
    fn poll_events(&mut self, now: Duration) -> Vec<InputEvent> {
        let due = self.events[self.next..]
            .iter()
            .take_while(|event| event.at <= now)
            .count();
        let batch = self.events[self.next..self.next + due].to_vec();
        self.next += due;
        batch
    }

    fn is_exhausted(&self) -> bool {
        self.next >= self.events.len()
    }
}

/// Events fed from another thread, typically a windowing backend
#[derive(Debug)]
pub struct ChannelEvents {
    receiver: Receiver<InputEvent>,
    disconnected: bool,
}

impl ChannelEvents {
    /// Event source plus the sender a producer thread keeps
    pub fn new() -> (Self, Sender<InputEvent>) {
        let (sender, receiver) = channel::unbounded();
        (
            Self {
                receiver,
                disconnected: false,
            },
            sender,
        )
    }
}

impl EventSource for ChannelEvents {
    fn poll_events(&mut self, _now: Duration) -> Vec<InputEvent> {
        let mut events = Vec::new();
        loop {
            match self.receiver.try_recv() {
                Ok(event) => events.push(event),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    if !self.disconnected {
                        log::debug!("Event channel closed");
                    }
                    self.disconnected = true;
                    break;
                }
            }
        }
        events
    }

    fn is_exhausted(&self) -> bool {
        self.disconnected
    }
}
