//! Visibility-gated periodic task.
//!
//! The runner owns one tokio task at a time. Each tick first sleeps the
//! configured delay, then runs the callback only if the injected
//! visibility predicate allows it. Stopping (or dropping the runner)
//! aborts the task, so a delay change can never leave two timers alive.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

type Callback = Arc<dyn Fn() + Send + Sync>;
type Predicate = Arc<dyn Fn() -> bool + Send + Sync>;
type Hook = Box<dyn Fn() + Send + Sync>;

/// Runs a callback at a fixed interval while the owning component is visible.
///
/// `start` must be called from within a tokio runtime.
pub struct PollingRunner {
    delay: Duration,
    tick: Callback,
    visible: Predicate,
    before_start: Option<Hook>,
    after_stop: Option<Hook>,
    handle: Option<JoinHandle<()>>,
}

impl PollingRunner {
    pub fn new(delay: Duration, tick: impl Fn() + Send + Sync + 'static) -> Self {
        PollingRunner {
            delay,
            tick: Arc::new(tick),
            visible: Arc::new(|| true),
            before_start: None,
            after_stop: None,
            handle: None,
        }
    }

    /// Inject the visibility predicate checked before every tick.
    pub fn visibility(mut self, visible: impl Fn() -> bool + Send + Sync + 'static) -> Self {
        self.visible = Arc::new(visible);
        self
    }

    /// Extra action to run just before the timer starts.
    pub fn on_start(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
        self.before_start = Some(Box::new(hook));
        self
    }

    /// Extra action to run just after the timer stops.
    pub fn on_stop(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
        self.after_stop = Some(Box::new(hook));
        self
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    /// Start the periodic task. Any previously running task is cancelled
    /// first, so timers never overlap.
    pub fn start(&mut self) {
        self.cancel();
        if let Some(hook) = &self.before_start {
            hook();
        }
        let delay = self.delay;
        let tick = Arc::clone(&self.tick);
        let visible = Arc::clone(&self.visible);
        self.handle = Some(tokio::spawn(async move {
            loop {
                tokio::time::sleep(delay).await;
                if visible() {
                    tick();
                }
            }
        }));
    }

    /// Cancel the periodic task. Stopping an unstarted runner is a no-op.
    pub fn stop(&mut self) {
        if self.cancel() {
            if let Some(hook) = &self.after_stop {
                hook();
            }
        }
    }

    /// Change the interval: the running timer is cancelled before the new one
    /// starts, so the previously scheduled tick can never fire afterwards and
    /// the first new tick comes no earlier than the new delay.
    pub fn change_delay(&mut self, delay: Duration) {
        self.delay = delay;
        self.stop();
        self.start();
    }

    fn cancel(&mut self) -> bool {
        match self.handle.take() {
            Some(handle) => {
                handle.abort();
                true
            }
            None => false,
        }
    }
}

impl Drop for PollingRunner {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl std::fmt::Debug for PollingRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PollingRunner")
            .field("delay", &self.delay)
            .field("running", &self.is_running())
            .finish()
    }
}
