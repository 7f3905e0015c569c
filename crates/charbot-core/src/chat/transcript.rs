//! Append-only transcript store.
//!
//! Holds the ordered message sequence for one conversation. There is no
//! removal or in-place update; readers get cloned snapshots.

use std::sync::{PoisonError, RwLock};

use charbot_types::event::ExchangeEvent;
use charbot_types::message::Message;

use crate::event::bus::EventBus;

#[derive(Debug)]
pub struct TranscriptStore {
    messages: RwLock<Vec<Message>>,
    events: EventBus,
}

impl TranscriptStore {
    pub fn new(events: EventBus) -> Self {
        Self {
            messages: RwLock::new(Vec::new()),
            events,
        }
    }

    /// Add a message to the end of the transcript.
    pub fn append(&self, message: Message) {
        self.messages
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message.clone());
        self.events
            .publish(ExchangeEvent::MessageAppended { message });
    }

    /// Snapshot of the full ordered sequence. Does not update live.
    pub fn all(&self) -> Vec<Message> {
        self.messages
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.messages
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn last(&self) -> Option<Message> {
        self.messages
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }
}
