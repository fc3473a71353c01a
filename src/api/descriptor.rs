//! Request descriptors and the requests built from them.

use std::collections::BTreeMap;
use std::fmt;

/// Identifies what to fetch: an endpoint path plus query parameters.
///
/// Two descriptors are equal when both the endpoint and the full parameter
/// set match. Parameters are kept sorted so insertion order never matters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestDescriptor {
    endpoint: String,
    params: BTreeMap<String, String>,
}

impl RequestDescriptor {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            params: BTreeMap::new(),
        }
    }

    /// Adds (or replaces) a query parameter.
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn params(&self) -> &BTreeMap<String, String> {
        &self.params
    }
}

impl fmt::Display for RequestDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.endpoint)?;
        let mut separator = '?';
        for (key, value) in &self.params {
            write!(f, "{}{}={}", separator, key, value)?;
            separator = '&';
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpMethod::Get => write!(f, "GET"),
            HttpMethod::Post => write!(f, "POST"),
        }
    }
}

/// A request handed to a [`Transport`](super::Transport).
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub descriptor: RequestDescriptor,
    pub body: Option<serde_json::Value>,
}

impl HttpRequest {
    pub fn get(descriptor: RequestDescriptor) -> Self {
        Self {
            method: HttpMethod::Get,
            descriptor,
            body: None,
        }
    }

    pub fn post(descriptor: RequestDescriptor, body: Option<serde_json::Value>) -> Self {
        Self {
            method: HttpMethod::Post,
            descriptor,
            body,
        }
    }
}
