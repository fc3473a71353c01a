use super::state::UiState;

/// Pure mapping from page state to text lines.
pub trait View {
    type State: UiState;

    fn render(state: &Self::State) -> Vec<String>;
}
