//! REST API access: descriptors, the transport seam, payload models and
//! the typed client.

mod client;
mod descriptor;
pub mod endpoints;
mod error;
pub mod models;
mod transport;

pub(crate) use client::fetch_json;
pub use client::ApiClient;
pub use descriptor::{HttpMethod, HttpRequest, RequestDescriptor};
pub use endpoints::JobAction;
pub use error::{FetchError, TransportError};
pub use transport::{HttpResponse, HttpTransport, Transport, TransportFuture};
