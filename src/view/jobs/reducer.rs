use crate::api::JobAction;
use crate::poll::FetchState;
use crate::view::jobs::intent::JobsIntent;
use crate::view::jobs::state::JobsState;
use crate::view::mvi::{Reducer, View};

pub struct JobsPage;

impl Reducer for JobsPage {
    type State = JobsState;
    type Intent = JobsIntent;

    fn reduce(mut state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            JobsIntent::Fetched(fetch) => {
                if let FetchState::Success(list) = &fetch {
                    let still_listed =
                        |id: &String| list.jobs.iter().any(|job| &job.id == id);
                    if !state.selected.as_ref().is_some_and(still_listed) {
                        state.selected = None;
                    }
                    // A scheduled next run means the scheduler has the job active again
                    state.paused.retain(|id| {
                        list.jobs
                            .iter()
                            .any(|job| &job.id == id && job.next_run.is_none())
                    });
                }
                state.jobs.apply(fetch);
            }
            JobsIntent::Select(job_id) => {
                // Only jobs we know about can be selected
                if state.job(&job_id).is_some() {
                    state.selected = Some(job_id);
                }
            }
            JobsIntent::ClearSelection => state.selected = None,
            JobsIntent::ActionSucceeded {
                job_id,
                action,
                message,
            } => {
                match action {
                    JobAction::Pause => {
                        state.paused.insert(job_id);
                    }
                    JobAction::Resume => {
                        state.paused.remove(&job_id);
                    }
                }
                state.last_message = Some(message);
            }
            JobsIntent::ActionFailed {
                job_id,
                action,
                error,
            } => {
                state.last_message = Some(format!(
                    "Failed to {} job {}: {}",
                    action.as_str(),
                    job_id,
                    error.user_message()
                ));
            }
        }
        state
    }
}

impl View for JobsPage {
    type State = JobsState;

    fn render(state: &Self::State) -> Vec<String> {
        let mut lines = vec!["== Scheduled Jobs ==".to_string()];
        lines.extend(state.jobs.banner());

        if let Some(list) = state.jobs.data() {
            if list.jobs.is_empty() {
                lines.push("No scheduled jobs".to_string());
            } else {
                lines.push(format!(
                    "  {:<20} {:<20} {:<28} {:<20} {}",
                    "ID", "NAME", "NEXT RUN", "TRIGGER", "STATE"
                ));
                for job in &list.jobs {
                    let marker = if state.selected.as_deref() == Some(job.id.as_str()) {
                        '>'
                    } else {
                        ' '
                    };
                    let run_state = if state.is_paused(job) { "paused" } else { "active" };
                    lines.push(format!(
                        "{} {:<20} {:<20} {:<28} {:<20} {}",
                        marker,
                        job.id,
                        job.display_name(),
                        job.next_run.as_deref().unwrap_or("-"),
                        job.trigger,
                        run_state
                    ));
                }
            }
        }

        if let Some(message) = &state.last_message {
            lines.push(message.clone());
        }
        lines
    }
}
