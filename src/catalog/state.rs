use crate::model::{Product, ProductId};
use crate::mvi::UiState;

/// Running product list: the last fetched list plus local additions.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProductListState {
    pub products: Vec<Product>,
}

impl UiState for ProductListState {}

impl ProductListState {
    pub fn find(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }
}
