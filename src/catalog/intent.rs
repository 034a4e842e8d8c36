use crate::model::Product;
use crate::mvi::Intent;

#[derive(Debug, Clone)]
pub enum ProductListIntent {
    /// A freshly joined product list arrived; it replaces the running list.
    Refresh(Vec<Product>),
    /// A product was added locally; it goes after the current entries.
    Append(Product),
}

impl Intent for ProductListIntent {}
