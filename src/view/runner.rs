//! Page controller: owns one page's state and toasts, and drives it from
//! a polling subscription.

use std::future::Future;
use std::time::Instant;

use serde::de::DeserializeOwned;
use tokio::sync::mpsc;

use crate::api::RequestDescriptor;
use crate::poll::{FetchState, PollingClient, SubscribeOptions};
use crate::view::mvi::{Reducer, View};
use crate::view::toast::{ToastLevel, Toasts};

pub struct PageRunner<P>
where
    P: Reducer + View<State = <P as Reducer>::State>,
{
    state: <P as Reducer>::State,
    toasts: Toasts,
}

impl<P> Default for PageRunner<P>
where
    P: Reducer + View<State = <P as Reducer>::State>,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<P> PageRunner<P>
where
    P: Reducer + View<State = <P as Reducer>::State>,
{
    pub fn new() -> Self {
        Self {
            state: Default::default(),
            toasts: Toasts::default(),
        }
    }

    pub fn state(&self) -> &<P as Reducer>::State {
        &self.state
    }

    pub fn toasts(&self) -> &Toasts {
        &self.toasts
    }

    pub fn dispatch(&mut self, intent: <P as Reducer>::Intent) {
        let state = std::mem::take(&mut self.state);
        self.state = P::reduce(state, intent);
    }

    /// Raise an error toast for failed fetches.
    pub fn observe<T>(&mut self, fetch: &FetchState<T>, now: Instant) {
        if let FetchState::Failure(e) = fetch {
            self.toasts.push(ToastLevel::Error, e.user_message(), now);
        }
    }

    pub fn notify(&mut self, level: ToastLevel, message: impl Into<String>, now: Instant) {
        self.toasts.push(level, message, now);
    }

    /// Page lines followed by the live toasts.
    pub fn render(&mut self, now: Instant) -> Vec<String> {
        self.toasts.prune(now);
        let mut lines = P::render(&self.state);
        lines.extend(self.toasts.lines());
        lines
    }
}

/// Subscribe to `descriptor` and re-render the page on every state change
/// until `shutdown` resolves.
///
/// Values received on `visibility` are forwarded to
/// [`Subscription::set_visible`](crate::poll::Subscription::set_visible).
/// A closed channel leaves visibility unchanged.
///
/// Returns the final page state.
pub async fn watch<P, T, F, S>(
    polling: &PollingClient,
    descriptor: RequestDescriptor,
    options: SubscribeOptions,
    into_intent: F,
    mut sink: S,
    mut visibility: mpsc::UnboundedReceiver<bool>,
    shutdown: impl Future<Output = ()>,
) -> <P as Reducer>::State
where
    P: Reducer + View<State = <P as Reducer>::State>,
    T: DeserializeOwned + Send + 'static,
    F: Fn(FetchState<T>) -> <P as Reducer>::Intent,
    S: FnMut(&[String]),
{
    let (tx, mut rx) = mpsc::unbounded_channel();
    let subscription = polling.subscribe(
        descriptor,
        move |state: FetchState<T>| {
            if tx.send(state).is_err() {
                tracing::trace!("Page runner gone, dropping state");
            }
        },
        options,
    );

    let mut runner = PageRunner::<P>::new();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => break,
            Some(visible) = visibility.recv() => {
                tracing::debug!(visible, "Page visibility changed");
                subscription.set_visible(visible);
            }
            received = rx.recv() => {
                let Some(fetch) = received else { break };
                let now = Instant::now();
                runner.observe(&fetch, now);
                runner.dispatch(into_intent(fetch));
                sink(&runner.render(now));
            }
        }
    }

    subscription.unsubscribe();
    runner.state
}
