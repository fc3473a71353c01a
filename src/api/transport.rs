//! The HTTP seam: a small trait so the polling client and the typed API
//! client can run against reqwest in production and scripted transports
//! in tests.

use std::future::Future;
use std::pin::Pin;

use reqwest::header::ACCEPT;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use crate::api::descriptor::{HttpMethod, HttpRequest, RequestDescriptor};
use crate::api::error::{FetchError, TransportError};
use crate::config::ApiConfig;

pub type TransportFuture<'a> =
    Pin<Box<dyn Future<Output = Result<HttpResponse, TransportError>> + Send + 'a>>;

/// Executes HTTP requests against the backend.
///
/// Implementations own connection pooling; callers treat them as opaque
/// and share a single instance behind an `Arc`.
pub trait Transport: Send + Sync {
    fn execute(&self, request: HttpRequest) -> TransportFuture<'_>;
}

/// Raw response: status plus the unparsed body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decodes a JSON body.
    ///
    /// Non-2xx responses fail with `Http` before the body is looked at,
    /// so HTML error pages never reach the JSON parser.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, FetchError> {
        if !self.is_success() {
            return Err(FetchError::Http {
                status: self.status,
            });
        }
        serde_json::from_slice(&self.body).map_err(|e| FetchError::Decode {
            message: e.to_string(),
        })
    }

    /// Returns the body of a successful response.
    pub fn into_bytes(self) -> Result<Vec<u8>, FetchError> {
        if !self.is_success() {
            return Err(FetchError::Http {
                status: self.status,
            });
        }
        Ok(self.body)
    }
}

/// [`Transport`] backed by a pooled `reqwest::Client`.
pub struct HttpTransport {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl HttpTransport {
    pub fn new(config: &ApiConfig) -> Result<Self, TransportError> {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout())
            .pool_idle_timeout(config.pool_idle_timeout())
            .pool_max_idle_per_host(config.pool_max_idle_per_host as usize)
            .build()
            .map_err(TransportError::Client)?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url_for(&self, descriptor: &RequestDescriptor) -> Result<Url, TransportError> {
        let raw = format!("{}{}", self.base_url, descriptor.endpoint());
        let mut url = Url::parse(&raw).map_err(|e| TransportError::InvalidUrl {
            url: raw.clone(),
            message: e.to_string(),
        })?;

        if !descriptor.params().is_empty() {
            let mut query = url.query_pairs_mut();
            for (key, value) in descriptor.params() {
                query.append_pair(key, value);
            }
        }

        Ok(url)
    }
}

impl Transport for HttpTransport {
    fn execute(&self, request: HttpRequest) -> TransportFuture<'_> {
        Box::pin(async move {
            let url = self.url_for(&request.descriptor)?;
            let url_text = url.to_string();

            let mut builder = match request.method {
                HttpMethod::Get => self.client.get(url),
                HttpMethod::Post => self.client.post(url),
            };
            builder = builder.header(ACCEPT, "application/json");

            if let Some(key) = &self.api_key {
                builder = builder.bearer_auth(key);
            }
            if let Some(body) = &request.body {
                builder = builder.json(body);
            }

            let response = builder
                .send()
                .await
                .map_err(|e| TransportError::Request {
                    url: url_text.clone(),
                    source: e,
                })?;

            let status = response.status().as_u16();
            let body = response
                .bytes()
                .await
                .map_err(|e| TransportError::Request {
                    url: url_text,
                    source: e,
                })?;

            Ok(HttpResponse::new(status, body.to_vec()))
        })
    }
}
