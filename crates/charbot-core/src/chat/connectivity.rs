//! Single-slot connectivity indicator.

use std::sync::atomic::{AtomicBool, Ordering};

use charbot_types::connectivity::ConnectivityStatus;
use charbot_types::event::ExchangeEvent;

use crate::event::bus::EventBus;

/// Last-write-wins connectivity flag shared by the token manager and the
/// exchange engine. No history, no debouncing.
#[derive(Debug)]
pub struct Connectivity {
    connected: AtomicBool,
    events: EventBus,
}

impl Connectivity {
    /// Starts as `Connected`, the optimistic state shown before any exchange.
    pub fn new(events: EventBus) -> Self {
        Self {
            connected: AtomicBool::new(true),
            events,
        }
    }

    pub fn set(&self, status: ConnectivityStatus) {
        self.connected.store(status.is_connected(), Ordering::Release);
        self.events
            .publish(ExchangeEvent::ConnectivityChanged { status });
    }

    pub fn get(&self) -> ConnectivityStatus {
        if self.connected.load(Ordering::Acquire) {
            ConnectivityStatus::Connected
        } else {
            ConnectivityStatus::Disconnected
        }
    }
}
