//! Polling data client.
//!
//! A subscription fetches a [`RequestDescriptor`](crate::api::RequestDescriptor),
//! reports [`FetchState`] transitions to its consumer, and optionally
//! repeats on a fixed interval. Superseded or disposed attempts never
//! reach the consumer.

mod client;
mod state;
mod subscription;

pub use client::PollingClient;
pub use state::FetchState;
pub use subscription::{SubscribeOptions, Subscription};
