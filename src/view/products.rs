//! Products page: catalog listing and product creation.

use crate::api::models::Product;
use crate::api::FetchError;
use crate::poll::FetchState;
use crate::view::mvi::{Intent, Reducer, UiState, View};
use crate::view::remote::Remote;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProductsState {
    pub products: Remote<Vec<Product>>,
    pub last_message: Option<String>,
}

impl UiState for ProductsState {}

#[derive(Debug, Clone)]
pub enum ProductsIntent {
    Fetched(FetchState<Vec<Product>>),
    Created { sku: String },
    CreateFailed { sku: String, error: FetchError },
}

impl Intent for ProductsIntent {}

pub struct ProductsPage;

impl Reducer for ProductsPage {
    type State = ProductsState;
    type Intent = ProductsIntent;

    fn reduce(mut state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            ProductsIntent::Fetched(fetch) => state.products.apply(fetch),
            ProductsIntent::Created { sku } => {
                state.last_message = Some(format!("Product {} created", sku));
            }
            ProductsIntent::CreateFailed { sku, error } => {
                state.last_message = Some(format!(
                    "Failed to create product {}: {}",
                    sku,
                    error.user_message()
                ));
            }
        }
        state
    }
}

impl View for ProductsPage {
    type State = ProductsState;

    fn render(state: &Self::State) -> Vec<String> {
        let mut lines = vec!["== Products ==".to_string()];
        lines.extend(state.products.banner());

        if let Some(products) = state.products.data() {
            if products.is_empty() {
                lines.push("No products".to_string());
            }
            for product in products {
                lines.push(format!("{:<20} {}", product.sku, product.name));
            }
        }

        if let Some(message) = &state.last_message {
            lines.push(message.clone());
        }
        lines
    }
}
