use crate::db::motions::EventStore;
use crate::libs::event::MotionEvent;
use crate::libs::messages::Message;
use crate::{msg_debug, msg_error};

/// Best-effort, at-most-once writer in front of an [`EventStore`].
///
/// The write runs synchronously on the caller's thread. A failure is logged
/// and the event is dropped: no retry, no buffer.
pub struct EventRecorder {
    store: Box<dyn EventStore>,
}

impl EventRecorder {
    pub fn new(store: Box<dyn EventStore>) -> Self {
        Self { store }
    }

    /// Writes `event` and reports whether it reached the store.
    pub fn record(&self, event: MotionEvent) -> bool {
        msg_debug!(Message::SavingEvent(event.to_string()));
        match self.store.append(&event) {
            Ok(()) => true,
            Err(e) => {
                msg_error!(Message::EventSaveFailed(e.to_string()));
                msg_error!(Message::EventDropped(event.to_string()));
                false
            }
        }
    }
}
