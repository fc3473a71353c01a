//! In-process transport with scripted responses, for deterministic timing
//! tests under a paused Tokio clock.

#![allow(dead_code)]

use automation_dash::api::{HttpRequest, HttpResponse, Transport, TransportError, TransportFuture};
use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

/// One scripted reply.
#[derive(Debug, Clone)]
pub struct Reply {
    pub outcome: Result<HttpResponse, String>,
    pub delay: Duration,
}

impl Reply {
    pub fn json(body: &str) -> Self {
        Self::status(200, body)
    }

    pub fn status(status: u16, body: &str) -> Self {
        Self {
            outcome: Ok(HttpResponse::new(status, body.as_bytes().to_vec())),
            delay: Duration::ZERO,
        }
    }

    /// A connection-level failure.
    pub fn unreachable(message: &str) -> Self {
        Self {
            outcome: Err(message.to_string()),
            delay: Duration::ZERO,
        }
    }

    pub fn after(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

/// A request as seen by the transport.
#[derive(Debug, Clone)]
pub struct Call {
    pub target: String,
    pub started: Instant,
}

#[derive(Default)]
struct Script {
    queued: HashMap<String, VecDeque<Reply>>,
    fallback: HashMap<String, Reply>,
    calls: Vec<Call>,
}

/// Responses are keyed by the rendered descriptor (`/api/x?a=1`). A target
/// answers from its queue first, then repeats its fallback reply.
#[derive(Clone, Default)]
pub struct ScriptedTransport {
    script: Arc<Mutex<Script>>,
    in_flight: Arc<AtomicUsize>,
    max_in_flight: Arc<AtomicUsize>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, target: &str, reply: Reply) -> &Self {
        self.script
            .lock()
            .queued
            .entry(target.to_string())
            .or_default()
            .push_back(reply);
        self
    }

    pub fn always(&self, target: &str, reply: Reply) -> &Self {
        self.script.lock().fallback.insert(target.to_string(), reply);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.script.lock().calls.clone()
    }

    pub fn call_count(&self) -> usize {
        self.script.lock().calls.len()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    fn next_reply(&self, target: &str) -> Reply {
        let mut script = self.script.lock();
        script.calls.push(Call {
            target: target.to_string(),
            started: Instant::now(),
        });
        if let Some(reply) = script.queued.get_mut(target).and_then(VecDeque::pop_front) {
            return reply;
        }
        script
            .fallback
            .get(target)
            .cloned()
            .unwrap_or_else(|| Reply::status(404, r#"{"error": "not scripted"}"#))
    }
}

/// Decrements the in-flight counter even when the call is aborted.
struct InFlight(Arc<AtomicUsize>);

impl Drop for InFlight {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl Transport for ScriptedTransport {
    fn execute(&self, request: HttpRequest) -> TransportFuture<'_> {
        Box::pin(async move {
            let reply = self.next_reply(&request.descriptor.to_string());

            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(now, Ordering::SeqCst);
            let _guard = InFlight(Arc::clone(&self.in_flight));

            if !reply.delay.is_zero() {
                tokio::time::sleep(reply.delay).await;
            }
            reply.outcome.map_err(TransportError::Connection)
        })
    }
}
