//! Change Notifier
//!
//! Cache mutations are appended to a pending buffer instead of being pushed to
//! subscribers one by one. A debounce timer is re-armed on every append; when it fires
//! the whole buffer is delivered as a single batch. Listing a directory creates one
//! node per child, so subscribers see one batch per burst of population.

pub mod debounce;

use crate::types::ChangeEvent;
use debounce::DebounceScheduler;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tracing::{debug, trace};

/// Batch of change events delivered together
pub type ChangeBatch = Vec<ChangeEvent>;

/// Notifier configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotifierConfig {
    /// Quiet period before a buffered batch is delivered
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

fn default_debounce_ms() -> u64 {
    5
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
        }
    }
}

impl NotifierConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

struct NotifierState {
    buffer: Mutex<ChangeBatch>,
    subscribers: Mutex<Vec<UnboundedSender<ChangeBatch>>>,
    scheduler: Mutex<DebounceScheduler>,
}

impl NotifierState {
    fn deliver(&self) {
        let batch = std::mem::take(&mut *self.buffer.lock());
        if batch.is_empty() {
            return;
        }
        let mut subscribers = self.subscribers.lock();
        debug!(
            events = batch.len(),
            subscribers = subscribers.len(),
            "Delivering change batch"
        );
        subscribers.retain(|subscriber| subscriber.send(batch.clone()).is_ok());
    }
}

/// Handle to the shared notifier; clones deliver to the same subscribers
#[derive(Clone)]
pub struct ChangeNotifier {
    state: Arc<NotifierState>,
}

impl ChangeNotifier {
    pub fn new(config: &NotifierConfig) -> Self {
        Self {
            state: Arc::new(NotifierState {
                buffer: Mutex::new(Vec::new()),
                subscribers: Mutex::new(Vec::new()),
                scheduler: Mutex::new(DebounceScheduler::new(config.delay())),
            }),
        }
    }

    /// Register a subscriber. Each received item is one debounced batch.
    pub fn subscribe(&self) -> UnboundedReceiver<ChangeBatch> {
        let (sender, receiver) = unbounded_channel();
        self.state.subscribers.lock().push(sender);
        receiver
    }

    /// Buffer events and re-arm the debounce timer
    pub fn fire<I>(&self, events: I)
    where
        I: IntoIterator<Item = ChangeEvent>,
    {
        let pending = {
            let mut buffer = self.state.buffer.lock();
            buffer.extend(events);
            buffer.len()
        };
        if pending == 0 {
            return;
        }
        trace!(pending, "Buffered change events");

        // The timer only holds a weak reference: a notifier dropped before the
        // timer fires loses its final batch.
        let weak: Weak<NotifierState> = Arc::downgrade(&self.state);
        self.state.scheduler.lock().schedule(move || {
            if let Some(state) = weak.upgrade() {
                state.deliver();
            }
        });
    }

    /// Deliver any buffered events now
    pub fn flush(&self) {
        self.state.scheduler.lock().flush();
        self.state.deliver();
    }

    /// Stop the timer and drop buffered events and subscribers
    pub fn dispose(&self) {
        self.state.scheduler.lock().cancel();
        self.state.buffer.lock().clear();
        self.state.subscribers.lock().clear();
    }

    pub fn pending(&self) -> usize {
        self.state.buffer.lock().len()
    }
}

impl std::fmt::Debug for ChangeNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeNotifier")
            .field("pending", &self.pending())
            .field("subscribers", &self.state.subscribers.lock().len())
            .finish()
    }
}
