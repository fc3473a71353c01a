//! Typed payloads exchanged with the automation backend.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// `GET /api/status`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StatusReport {
    #[serde(default)]
    pub timestamp: Option<String>,
    pub database: DatabaseStatus,
    pub scheduler: SchedulerStatus,
    pub api: ApiStatus,
    #[serde(default)]
    pub notifications: Option<Notifications>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DatabaseStatus {
    pub total_records: u64,
    pub recent_24h: u64,
    #[serde(default)]
    pub connected: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SchedulerStatus {
    pub running: bool,
    pub jobs_count: u64,
    #[serde(default)]
    pub jobs: Vec<ScheduledJobRef>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScheduledJobRef {
    pub id: String,
    #[serde(default)]
    pub next_run: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApiStatus {
    pub configured: bool,
    pub base_url: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Notifications {
    pub unread: u64,
}

/// `GET /api/jobs`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct JobList {
    pub jobs: Vec<Job>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Job {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    /// ISO 8601 timestamp of the next run, absent for paused jobs.
    #[serde(default)]
    pub next_run: Option<String>,
    pub trigger: String,
    #[serde(default)]
    pub kwargs: Option<Map<String, Value>>,
    #[serde(default)]
    pub func_name: Option<String>,
}

impl Job {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}

/// Acknowledgement returned by the POST endpoints.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ActionResponse {
    pub message: String,
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub filename: Option<String>,
}

/// `GET /api/reports`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ReportList {
    pub reports: Vec<ReportFile>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ReportFile {
    pub filename: String,
    pub size: u64,
    pub created: String,
    pub modified: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportType {
    Daily,
    Weekly,
    Trend,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    Csv,
    Json,
    Html,
}

impl FromStr for ReportType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "daily" => Ok(ReportType::Daily),
            "weekly" => Ok(ReportType::Weekly),
            "trend" => Ok(ReportType::Trend),
            other => Err(format!("unknown report type '{}'", other)),
        }
    }
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(ReportFormat::Csv),
            "json" => Ok(ReportFormat::Json),
            "html" => Ok(ReportFormat::Html),
            other => Err(format!("unknown report format '{}'", other)),
        }
    }
}

impl fmt::Display for ReportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportType::Daily => write!(f, "daily"),
            ReportType::Weekly => write!(f, "weekly"),
            ReportType::Trend => write!(f, "trend"),
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportFormat::Csv => write!(f, "csv"),
            ReportFormat::Json => write!(f, "json"),
            ReportFormat::Html => write!(f, "html"),
        }
    }
}

/// `POST /api/reports/generate` body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerateReportRequest {
    pub report_type: ReportType,
    pub format: ReportFormat,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_type: Option<String>,
    /// Window for trend reports.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days: Option<u32>,
}

impl GenerateReportRequest {
    pub fn new(report_type: ReportType, format: ReportFormat) -> Self {
        Self {
            report_type,
            format,
            data_type: None,
            days: None,
        }
    }
}

/// `GET /api/config`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ConfigSnapshot {
    #[serde(default)]
    pub api: Map<String, Value>,
    #[serde(default)]
    pub database: Map<String, Value>,
    #[serde(default)]
    pub scheduler: Map<String, Value>,
    pub reporting: ReportingSettings,
    #[serde(default)]
    pub data_processing: Option<Map<String, Value>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ReportingSettings {
    pub output_dir: String,
    pub default_format: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    pub name: String,
    pub sku: String,
}

/// `GET /api/products` is served either bare or wrapped in `{ "products": [...] }`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ProductsPayload {
    Wrapped { products: Vec<Product> },
    Bare(Vec<Product>),
}

impl ProductsPayload {
    pub fn into_products(self) -> Vec<Product> {
        match self {
            ProductsPayload::Wrapped { products } => products,
            ProductsPayload::Bare(products) => products,
        }
    }
}

/// `POST /api/products` body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewProduct {
    pub name: String,
    pub sku: String,
}

/// `GET /api/ecommerce/revenue`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RevenueSummary {
    pub total_revenue: f64,
    pub avg_daily_revenue: f64,
    pub daily_revenue: Vec<DailyRevenue>,
    pub currency: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DailyRevenue {
    pub date: String,
    pub revenue: f64,
    pub orders: u64,
}

/// `GET /api/ecommerce/discrepancies`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DiscrepancyList {
    pub discrepancies: Vec<Discrepancy>,
    pub total_count: u64,
    pub critical_count: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Discrepancy {
    pub sku: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub platforms: Vec<String>,
    pub severity: String,
    #[serde(default)]
    pub prices: Option<BTreeMap<String, f64>>,
    #[serde(default)]
    pub quantities: Option<BTreeMap<String, i64>>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// A storefront taking part in an inventory sync.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Platform {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl Platform {
    /// Platform for a backend type id, with the display name the backend
    /// uses for the built-in integrations.
    pub fn from_kind(kind: &str) -> Self {
        let kind = kind.trim().to_ascii_lowercase();
        let name = match kind.as_str() {
            "shopify" => "Shopify".to_string(),
            "amazon" => "Amazon".to_string(),
            "ebay" => "eBay".to_string(),
            other => other.to_string(),
        };
        Self { name, kind }
    }
}

/// `POST /api/ecommerce/sync` body.
///
/// The backend syncs nothing when the body carries no platform list, so
/// the default names every built-in integration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncRequest {
    pub platforms: Vec<Platform>,
}

impl Default for SyncRequest {
    fn default() -> Self {
        Self::for_kinds(["shopify", "amazon", "ebay"])
    }
}

impl SyncRequest {
    pub fn for_kinds<'a>(kinds: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            platforms: kinds.into_iter().map(Platform::from_kind).collect(),
        }
    }
}

/// `POST /api/ecommerce/sync`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SyncResult {
    pub success: bool,
    pub message: String,
    #[serde(default)]
    pub report: Option<Value>,
}

/// `GET /api/data`: stored records matching the filters.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DataRecords {
    pub data: Vec<Map<String, Value>>,
    pub count: u64,
    pub filters: DataFilters,
}

/// Filters the backend applied, echoed back with the records.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DataFilters {
    #[serde(rename = "type", default)]
    pub data_type: Option<String>,
    pub days: u32,
    pub limit: u32,
}
