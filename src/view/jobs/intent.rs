use crate::api::models::JobList;
use crate::api::{FetchError, JobAction};
use crate::poll::FetchState;
use crate::view::mvi::Intent;

#[derive(Debug, Clone)]
pub enum JobsIntent {
    Fetched(FetchState<JobList>),
    Select(String),
    ClearSelection,
    ActionSucceeded {
        job_id: String,
        action: JobAction,
        message: String,
    },
    ActionFailed {
        job_id: String,
        action: JobAction,
        error: FetchError,
    },
}

impl Intent for JobsIntent {}
