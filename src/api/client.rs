//! Typed one-shot calls against the automation backend.

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::time::timeout;

use crate::api::descriptor::{HttpRequest, RequestDescriptor};
use crate::api::endpoints::{self, JobAction};
use crate::api::error::{FetchError, TransportError};
use crate::api::models::{
    ActionResponse, ConfigSnapshot, DataRecords, DiscrepancyList, GenerateReportRequest, JobList,
    NewProduct, Product, ProductsPayload, ReportList, RevenueSummary, StatusReport, SyncRequest,
    SyncResult,
};
use crate::api::transport::{HttpResponse, HttpTransport, Transport};
use crate::config::ApiConfig;

/// Runs one request with a timeout, mapping every failure into a
/// [`FetchError`]. Shared by the typed client and the polling client.
pub(crate) async fn send(
    transport: &dyn Transport,
    request: HttpRequest,
    limit: Duration,
) -> Result<HttpResponse, FetchError> {
    let method = request.method;
    let target = request.descriptor.to_string();

    match timeout(limit, transport.execute(request)).await {
        Ok(Ok(response)) => {
            tracing::debug!(%method, %target, status = response.status, "Request completed");
            Ok(response)
        }
        Ok(Err(e)) => {
            tracing::debug!(%method, %target, error = %e, "Request failed");
            Err(FetchError::from(e))
        }
        Err(_) => {
            tracing::debug!(%method, %target, timeout_ms = limit.as_millis() as u64, "Request timed out");
            Err(FetchError::timeout(limit))
        }
    }
}

/// GET `descriptor` and decode the JSON body as `T`.
pub(crate) async fn fetch_json<T: DeserializeOwned>(
    transport: &dyn Transport,
    descriptor: RequestDescriptor,
    limit: Duration,
) -> Result<T, FetchError> {
    send(transport, HttpRequest::get(descriptor), limit)
        .await?
        .json()
}

#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    timeout: Duration,
}

impl ApiClient {
    pub fn new(transport: Arc<dyn Transport>, timeout: Duration) -> Self {
        Self { transport, timeout }
    }

    /// Build a client talking to `config.base_url` through reqwest.
    pub fn from_config(config: &ApiConfig) -> Result<Self, TransportError> {
        let transport = HttpTransport::new(config)?;
        Ok(Self::new(Arc::new(transport), config.timeout()))
    }

    /// The shared transport, for building polling clients on the same pool.
    pub fn transport(&self) -> Arc<dyn Transport> {
        Arc::clone(&self.transport)
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub async fn get_json<T: DeserializeOwned>(
        &self,
        descriptor: RequestDescriptor,
    ) -> Result<T, FetchError> {
        fetch_json(self.transport.as_ref(), descriptor, self.timeout).await
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        descriptor: RequestDescriptor,
        body: Option<&B>,
    ) -> Result<T, FetchError> {
        let body = body
            .map(serde_json::to_value)
            .transpose()
            .map_err(|e| FetchError::Decode {
                message: format!("failed to encode request body: {}", e),
            })?;
        send(
            self.transport.as_ref(),
            HttpRequest::post(descriptor, body),
            self.timeout,
        )
        .await?
        .json()
    }

    pub async fn status(&self) -> Result<StatusReport, FetchError> {
        self.get_json(endpoints::status()).await
    }

    pub async fn jobs(&self) -> Result<JobList, FetchError> {
        self.get_json(endpoints::jobs()).await
    }

    pub async fn pause_job(&self, job_id: &str) -> Result<ActionResponse, FetchError> {
        self.job_action(job_id, JobAction::Pause).await
    }

    pub async fn resume_job(&self, job_id: &str) -> Result<ActionResponse, FetchError> {
        self.job_action(job_id, JobAction::Resume).await
    }

    pub async fn job_action(
        &self,
        job_id: &str,
        action: JobAction,
    ) -> Result<ActionResponse, FetchError> {
        tracing::info!(job_id, action = action.as_str(), "Sending job action");
        self.post_json::<(), _>(endpoints::job_action(job_id, action), None)
            .await
    }

    pub async fn reports(&self) -> Result<ReportList, FetchError> {
        self.get_json(endpoints::reports()).await
    }

    pub async fn generate_report(
        &self,
        request: &GenerateReportRequest,
    ) -> Result<ActionResponse, FetchError> {
        tracing::info!(
            report_type = %request.report_type,
            format = %request.format,
            "Requesting report generation"
        );
        self.post_json(endpoints::generate_report(), Some(request))
            .await
    }

    /// Raw bytes of a generated report (CSV, JSON, HTML or PNG).
    pub async fn download_report(&self, filename: &str) -> Result<Vec<u8>, FetchError> {
        send(
            self.transport.as_ref(),
            HttpRequest::get(endpoints::download_report(filename)),
            self.timeout,
        )
        .await?
        .into_bytes()
    }

    pub async fn config(&self) -> Result<ConfigSnapshot, FetchError> {
        self.get_json(endpoints::config()).await
    }

    pub async fn products(&self) -> Result<Vec<Product>, FetchError> {
        let payload: ProductsPayload = self.get_json(endpoints::products()).await?;
        Ok(payload.into_products())
    }

    pub async fn create_product(
        &self,
        product: &NewProduct,
    ) -> Result<serde_json::Value, FetchError> {
        tracing::info!(sku = %product.sku, "Creating product");
        self.post_json(endpoints::products(), Some(product)).await
    }

    pub async fn revenue(&self, days: u32) -> Result<RevenueSummary, FetchError> {
        self.get_json(endpoints::revenue(days)).await
    }

    pub async fn discrepancies(&self) -> Result<DiscrepancyList, FetchError> {
        self.get_json(endpoints::discrepancies()).await
    }

    pub async fn sync_inventory(&self, request: &SyncRequest) -> Result<SyncResult, FetchError> {
        tracing::info!(platforms = request.platforms.len(), "Triggering inventory sync");
        self.post_json(endpoints::sync_inventory(), Some(request))
            .await
    }

    pub async fn data(
        &self,
        data_type: Option<&str>,
        limit: u32,
        days: u32,
    ) -> Result<DataRecords, FetchError> {
        self.get_json(endpoints::data(data_type, limit, days)).await
    }
}
