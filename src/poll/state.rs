use crate::api::FetchError;

/// Observable state of a subscription.
///
/// Per attempt the transitions are `Idle`/previous → `Loading` →
/// `Success` | `Failure`.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchState<T> {
    Idle,
    Loading,
    Success(T),
    Failure(FetchError),
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        FetchState::Idle
    }
}

impl<T> FetchState<T> {
    pub fn from_result(result: Result<T, FetchError>) -> Self {
        match result {
            Ok(payload) => FetchState::Success(payload),
            Err(e) => FetchState::Failure(e),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    pub fn payload(&self) -> Option<&T> {
        match self {
            FetchState::Success(payload) => Some(payload),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&FetchError> {
        match self {
            FetchState::Failure(e) => Some(e),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> FetchState<U> {
        match self {
            FetchState::Idle => FetchState::Idle,
            FetchState::Loading => FetchState::Loading,
            FetchState::Success(payload) => FetchState::Success(f(payload)),
            FetchState::Failure(e) => FetchState::Failure(e),
        }
    }
}
