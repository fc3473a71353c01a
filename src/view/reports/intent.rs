use crate::api::models::{ActionResponse, ReportList};
use crate::api::FetchError;
use crate::poll::FetchState;
use crate::view::mvi::Intent;

#[derive(Debug, Clone)]
pub enum ReportsIntent {
    Fetched(FetchState<ReportList>),
    Generated(Result<ActionResponse, FetchError>),
}

impl Intent for ReportsIntent {}
