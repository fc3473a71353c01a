//! Request descriptors for the backend's REST endpoints.

use crate::api::descriptor::RequestDescriptor;

pub const STATUS: &str = "/api/status";
pub const JOBS: &str = "/api/jobs";
pub const REPORTS: &str = "/api/reports";
pub const REPORTS_GENERATE: &str = "/api/reports/generate";
pub const CONFIG: &str = "/api/config";
pub const DATA: &str = "/api/data";
pub const PRODUCTS: &str = "/api/products";
pub const ECOMMERCE_REVENUE: &str = "/api/ecommerce/revenue";
pub const ECOMMERCE_DISCREPANCIES: &str = "/api/ecommerce/discrepancies";
pub const ECOMMERCE_SYNC: &str = "/api/ecommerce/sync";

/// Scheduler action on a single job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobAction {
    Pause,
    Resume,
}

impl JobAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobAction::Pause => "pause",
            JobAction::Resume => "resume",
        }
    }
}

pub fn status() -> RequestDescriptor {
    RequestDescriptor::new(STATUS)
}

pub fn jobs() -> RequestDescriptor {
    RequestDescriptor::new(JOBS)
}

pub fn job_action(job_id: &str, action: JobAction) -> RequestDescriptor {
    RequestDescriptor::new(format!(
        "{}/{}/{}",
        JOBS,
        encode_segment(job_id),
        action.as_str()
    ))
}

pub fn reports() -> RequestDescriptor {
    RequestDescriptor::new(REPORTS)
}

pub fn generate_report() -> RequestDescriptor {
    RequestDescriptor::new(REPORTS_GENERATE)
}

pub fn download_report(filename: &str) -> RequestDescriptor {
    RequestDescriptor::new(format!("{}/download/{}", REPORTS, encode_segment(filename)))
}

pub fn config() -> RequestDescriptor {
    RequestDescriptor::new(CONFIG)
}

/// Stored records of `data_type` (all types when `None`) from the last
/// `days` days, at most `limit` of them.
pub fn data(data_type: Option<&str>, limit: u32, days: u32) -> RequestDescriptor {
    let descriptor = RequestDescriptor::new(DATA)
        .with_param("limit", limit.to_string())
        .with_param("days", days.to_string());
    match data_type {
        Some(data_type) => descriptor.with_param("type", data_type),
        None => descriptor,
    }
}

pub fn products() -> RequestDescriptor {
    RequestDescriptor::new(PRODUCTS)
}

pub fn revenue(days: u32) -> RequestDescriptor {
    RequestDescriptor::new(ECOMMERCE_REVENUE).with_param("days", days.to_string())
}

pub fn discrepancies() -> RequestDescriptor {
    RequestDescriptor::new(ECOMMERCE_DISCREPANCIES)
}

pub fn sync_inventory() -> RequestDescriptor {
    RequestDescriptor::new(ECOMMERCE_SYNC)
}

/// Percent-encodes everything outside the RFC 3986 unreserved set so ids
/// and file names stay a single path segment.
fn encode_segment(segment: &str) -> String {
    let mut encoded = String::with_capacity(segment.len());
    for byte in segment.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                encoded.push(byte as char)
            }
            _ => encoded.push_str(&format!("%{:02X}", byte)),
        }
    }
    encoded
}
