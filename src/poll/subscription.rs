//! Subscriptions: one live binding between a consumer and a descriptor.
//!
//! Every attempt gets a fresh token. Results are delivered only while
//! their token is still current and the subscription is active. The token
//! check and the callback run under one subscription-scoped lock, so a
//! concurrent `unsubscribe` either wins (result dropped) or loses (result
//! already delivered). The lock is reentrant so callbacks may call back
//! into their own subscription.

use std::cell::RefCell;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::ReentrantMutex;
use serde::de::DeserializeOwned;
use tokio::task::JoinHandle;

use crate::api::{self, RequestDescriptor, Transport};
use crate::poll::state::FetchState;

pub(crate) type StateCallback<T> = Box<dyn Fn(FetchState<T>) + Send + Sync>;

/// Per-subscription options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubscribeOptions {
    /// Repeat every `interval`, measured from the end of the previous
    /// attempt. `None` fetches once.
    pub interval: Option<Duration>,
    /// Suspend polling while the consumer reports itself hidden, and
    /// refetch immediately once it becomes visible again.
    pub pause_when_hidden: bool,
    /// Per-attempt timeout. `None` uses the client default.
    pub timeout: Option<Duration>,
    /// The consumer is hidden when subscribing. The initial attempt still
    /// runs; with `pause_when_hidden` no repeat is scheduled until the
    /// consumer reports itself visible.
    pub start_hidden: bool,
}

impl SubscribeOptions {
    pub fn once() -> Self {
        Self::default()
    }

    pub fn polling(interval: Duration) -> Self {
        Self {
            interval: Some(interval),
            ..Self::default()
        }
    }

    pub fn pause_when_hidden(mut self, pause: bool) -> Self {
        self.pause_when_hidden = pause;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn start_hidden(mut self, hidden: bool) -> Self {
        self.start_hidden = hidden;
        self
    }
}

struct Core {
    descriptor: RequestDescriptor,
    token: u64,
    disposed: bool,
    visible: bool,
    task: Option<JoinHandle<()>>,
}

pub(crate) struct Shared<T> {
    transport: Arc<dyn Transport>,
    options: SubscribeOptions,
    timeout: Duration,
    on_state_change: StateCallback<T>,
    gate: ReentrantMutex<RefCell<Core>>,
}

impl<T> Shared<T>
where
    T: DeserializeOwned + Send + 'static,
{
    pub(crate) fn new(
        transport: Arc<dyn Transport>,
        descriptor: RequestDescriptor,
        options: SubscribeOptions,
        timeout: Duration,
        on_state_change: StateCallback<T>,
    ) -> Arc<Self> {
        let visible = !options.start_hidden;
        Arc::new(Self {
            transport,
            options,
            timeout,
            on_state_change,
            gate: ReentrantMutex::new(RefCell::new(Core {
                descriptor,
                token: 0,
                disposed: false,
                visible,
                task: None,
            })),
        })
    }

    /// Supersede whatever is running and start a new attempt now.
    ///
    /// Emits `Loading` synchronously before the network call is spawned.
    pub(crate) fn begin_attempt(self: &Arc<Self>) {
        let guard = self.gate.lock();
        let token = {
            let mut core = guard.borrow_mut();
            if core.disposed {
                return;
            }
            core.token += 1;
            if let Some(task) = core.task.take() {
                task.abort();
            }
            core.token
        };

        tracing::trace!(token, "Starting fetch attempt");
        (self.on_state_change)(FetchState::Loading);

        let shared = Arc::clone(self);
        let handle = tokio::spawn(async move { shared.run(token).await });

        let mut core = guard.borrow_mut();
        if core.token == token && !core.disposed {
            core.task = Some(handle);
        } else {
            // The Loading callback already superseded this attempt.
            handle.abort();
        }
    }

    /// Attempt chain: fetch, deliver, then keep polling while allowed.
    async fn run(self: Arc<Self>, mut token: u64) {
        loop {
            let Some(descriptor) = self.current_descriptor(token) else {
                return;
            };

            let result =
                api::fetch_json::<T>(self.transport.as_ref(), descriptor.clone(), self.timeout)
                    .await;
            if let Err(e) = &result {
                tracing::warn!(target_endpoint = %descriptor, error = %e, "Fetch failed");
            }

            if !self.deliver(token, FetchState::from_result(result)) {
                return;
            }

            let Some(interval) = self.options.interval else {
                return;
            };
            if !self.may_schedule(token) {
                tracing::debug!(target_endpoint = %descriptor, "Polling paused while hidden");
                return;
            }

            tokio::time::sleep(interval).await;

            match self.next_scheduled_token(token) {
                Some(next) => token = next,
                None => return,
            }
        }
    }

    fn current_descriptor(&self, token: u64) -> Option<RequestDescriptor> {
        let guard = self.gate.lock();
        let core = guard.borrow();
        (core.token == token && !core.disposed).then(|| core.descriptor.clone())
    }

    /// Hands `state` to the consumer if `token` is still current.
    ///
    /// Returns `false` when the result was discarded.
    pub(crate) fn deliver(&self, token: u64, state: FetchState<T>) -> bool {
        let guard = self.gate.lock();
        let current = {
            let core = guard.borrow();
            core.token == token && !core.disposed
        };
        if !current {
            tracing::trace!(token, "Discarding superseded result");
            return false;
        }
        (self.on_state_change)(state);
        true
    }

    fn may_schedule(&self, token: u64) -> bool {
        let guard = self.gate.lock();
        let core = guard.borrow();
        core.token == token
            && !core.disposed
            && (core.visible || !self.options.pause_when_hidden)
    }

    /// Claims the next token for a scheduled repeat and emits `Loading`.
    fn next_scheduled_token(&self, token: u64) -> Option<u64> {
        let guard = self.gate.lock();
        let next = {
            let mut core = guard.borrow_mut();
            if core.token != token || core.disposed {
                return None;
            }
            if self.options.pause_when_hidden && !core.visible {
                return None;
            }
            core.token += 1;
            core.token
        };
        (self.on_state_change)(FetchState::Loading);
        Some(next)
    }

    fn set_descriptor(self: &Arc<Self>, descriptor: RequestDescriptor) {
        let guard = self.gate.lock();
        {
            let mut core = guard.borrow_mut();
            if core.disposed || core.descriptor == descriptor {
                return;
            }
            tracing::debug!(from = %core.descriptor, to = %descriptor, "Descriptor changed");
            core.descriptor = descriptor;
        }
        self.begin_attempt();
    }

    fn set_visible(self: &Arc<Self>, visible: bool) {
        let guard = self.gate.lock();
        let resume = {
            let mut core = guard.borrow_mut();
            if core.disposed {
                return;
            }
            let was_visible = core.visible;
            core.visible = visible;
            self.options.pause_when_hidden && visible && !was_visible
        };
        if resume {
            tracing::debug!("Consumer visible again, refetching");
            self.begin_attempt();
        }
    }

    fn dispose(&self) {
        let guard = self.gate.lock();
        let mut core = guard.borrow_mut();
        if core.disposed {
            return;
        }
        core.disposed = true;
        core.token += 1;
        if let Some(task) = core.task.take() {
            task.abort();
        }
        tracing::debug!(endpoint = %core.descriptor, "Subscription disposed");
    }

    fn is_active(&self) -> bool {
        !self.gate.lock().borrow().disposed
    }

    fn descriptor(&self) -> RequestDescriptor {
        self.gate.lock().borrow().descriptor.clone()
    }
}

/// Handle returned by [`PollingClient::subscribe`](super::PollingClient::subscribe).
///
/// Dropping the handle unsubscribes.
pub struct Subscription<T>
where
    T: DeserializeOwned + Send + 'static,
{
    shared: Arc<Shared<T>>,
}

impl<T> Subscription<T>
where
    T: DeserializeOwned + Send + 'static,
{
    pub(crate) fn new(shared: Arc<Shared<T>>) -> Self {
        Self { shared }
    }

    /// Cancel the in-flight call and stop polling. Idempotent.
    pub fn unsubscribe(&self) {
        self.shared.dispose();
    }

    /// Start a new attempt now, superseding any in-flight one.
    pub fn refetch(&self) {
        self.shared.begin_attempt();
    }

    /// Point the subscription at another descriptor.
    ///
    /// No-op when `descriptor` equals the current one by value.
    pub fn set_descriptor(&self, descriptor: RequestDescriptor) {
        self.shared.set_descriptor(descriptor);
    }

    /// Report whether the consumer is currently visible.
    pub fn set_visible(&self, visible: bool) {
        self.shared.set_visible(visible);
    }

    pub fn is_active(&self) -> bool {
        self.shared.is_active()
    }

    pub fn descriptor(&self) -> RequestDescriptor {
        self.shared.descriptor()
    }
}

impl<T> Drop for Subscription<T>
where
    T: DeserializeOwned + Send + 'static,
{
    fn drop(&mut self) {
        self.shared.dispose();
    }
}
