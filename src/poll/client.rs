use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::api::{ApiClient, RequestDescriptor, Transport};
use crate::poll::state::FetchState;
use crate::poll::subscription::{Shared, SubscribeOptions, Subscription};

/// Factory for polling subscriptions sharing one transport.
///
/// Every page uses this one primitive, parameterized by descriptor and
/// options, instead of carrying its own fetch loop.
#[derive(Clone)]
pub struct PollingClient {
    transport: Arc<dyn Transport>,
    default_timeout: Duration,
}

impl PollingClient {
    pub fn new(transport: Arc<dyn Transport>, default_timeout: Duration) -> Self {
        Self {
            transport,
            default_timeout,
        }
    }

    /// Subscribe on the same transport and timeout as `api`.
    pub fn from_api(api: &ApiClient) -> Self {
        Self::new(api.transport(), api.timeout())
    }

    /// Start fetching `descriptor` and report every state transition.
    ///
    /// `on_state_change` receives `Loading` before this returns, then the
    /// result of each attempt from a Tokio task. Must be called from
    /// within a Tokio runtime.
    pub fn subscribe<T, F>(
        &self,
        descriptor: RequestDescriptor,
        on_state_change: F,
        options: SubscribeOptions,
    ) -> Subscription<T>
    where
        T: DeserializeOwned + Send + 'static,
        F: Fn(FetchState<T>) + Send + Sync + 'static,
    {
        let timeout = options.timeout.unwrap_or(self.default_timeout);
        tracing::debug!(
            endpoint = %descriptor,
            interval_ms = options.interval.map(|i| i.as_millis() as u64),
            pause_when_hidden = options.pause_when_hidden,
            "Subscribing"
        );

        let shared = Shared::new(
            Arc::clone(&self.transport),
            descriptor,
            options,
            timeout,
            Box::new(on_state_change),
        );
        shared.begin_attempt();
        Subscription::new(shared)
    }
}
