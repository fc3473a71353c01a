use std::collections::BTreeSet;

use crate::api::models::{Job, JobList};
use crate::view::mvi::UiState;
use crate::view::remote::Remote;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct JobsState {
    pub jobs: Remote<JobList>,
    /// Job the user is acting on. Cleared when it disappears from the list.
    pub selected: Option<String>,
    /// Jobs paused from this page. Dropped once a refresh lists the job
    /// with a next run time, or no longer lists it.
    pub paused: BTreeSet<String>,
    /// Outcome of the most recent pause/resume.
    pub last_message: Option<String>,
}

impl UiState for JobsState {}

impl JobsState {
    pub fn job(&self, job_id: &str) -> Option<&Job> {
        self.jobs
            .data()
            .and_then(|list| list.jobs.iter().find(|j| j.id == job_id))
    }

    /// A job counts as paused when we paused it or the scheduler reports
    /// no next run time.
    pub fn is_paused(&self, job: &Job) -> bool {
        self.paused.contains(&job.id) || job.next_run.is_none()
    }
}
