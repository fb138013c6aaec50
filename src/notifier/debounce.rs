//! Re-armable debounce timer
//!
//! Owns a single pending callback and the tokio task that will run it. Every call to
//! [`DebounceScheduler::schedule`] replaces the callback and restarts the delay.

use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::trace;

type Callback = Box<dyn FnOnce() + Send + 'static>;

pub struct DebounceScheduler {
    delay: Duration,
    pending: Arc<Mutex<Option<Callback>>>,
    timer: Option<JoinHandle<()>>,
}

impl DebounceScheduler {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: Arc::new(Mutex::new(None)),
            timer: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Arm (or re-arm) the timer to run `callback` once the delay has passed
    /// without another call to `schedule`.
    ///
    /// Outside a tokio runtime there is nothing to defer onto, so the callback runs
    /// immediately.
    pub fn schedule<F>(&mut self, callback: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.abort_timer();
        *self.pending.lock() = Some(Box::new(callback));

        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            trace!("no runtime for debounce timer, firing immediately");
            self.flush();
            return;
        };

        let pending = Arc::clone(&self.pending);
        let delay = self.delay;
        self.timer = Some(runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            let callback = pending.lock().take();
            if let Some(callback) = callback {
                callback();
            }
        }));
    }

    /// Run the pending callback now, if any, and disarm the timer.
    pub fn flush(&mut self) {
        self.abort_timer();
        let callback = self.pending.lock().take();
        if let Some(callback) = callback {
            callback();
        }
    }

    /// Disarm the timer and drop the pending callback without running it.
    pub fn cancel(&mut self) {
        self.abort_timer();
        self.pending.lock().take();
    }

    pub fn is_armed(&self) -> bool {
        self.pending.lock().is_some()
    }

    fn abort_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}

impl Drop for DebounceScheduler {
    fn drop(&mut self) {
        self.abort_timer();
    }
}
