use crate::api::FetchError;
use crate::poll::FetchState;

/// Remote data as a page sees it.
///
/// Unlike [`FetchState`], the last successful payload survives later
/// `Loading` and `Failure` transitions so the page keeps showing it.
#[derive(Debug, Clone, PartialEq)]
pub struct Remote<T> {
    data: Option<T>,
    loading: bool,
    error: Option<FetchError>,
}

impl<T> Default for Remote<T> {
    fn default() -> Self {
        Self {
            data: None,
            loading: false,
            error: None,
        }
    }
}

impl<T> Remote<T> {
    pub fn apply(&mut self, state: FetchState<T>) {
        match state {
            FetchState::Idle => self.loading = false,
            FetchState::Loading => self.loading = true,
            FetchState::Success(payload) => {
                self.data = Some(payload);
                self.loading = false;
                self.error = None;
            }
            FetchState::Failure(e) => {
                self.loading = false;
                self.error = Some(e);
            }
        }
    }

    pub fn with(mut self, state: FetchState<T>) -> Self {
        self.apply(state);
        self
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&FetchError> {
        self.error.as_ref()
    }

    /// Status line shown above the page body, if any.
    pub fn banner(&self) -> Option<String> {
        if let Some(e) = &self.error {
            return Some(format!("Error: {}", e.user_message()));
        }
        if self.loading && self.data.is_none() {
            return Some("Loading...".to_string());
        }
        None
    }
}
