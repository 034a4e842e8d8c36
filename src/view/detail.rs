use std::sync::Arc;

use serde::Serialize;

use crate::model::{Product, Supplier};
use crate::reactive::{catch_into, combine_latest3, map, ErrorChannel, ViewStream};
use crate::sources::ProductSource;

/// Everything the detail screen renders, in one value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailView {
    pub product: Option<Product>,
    pub page_title: Option<String>,
    pub suppliers: Vec<Supplier>,
}

pub fn page_title_for(product: Option<&Product>) -> Option<String> {
    product.map(|p| format!("Product Detail for: {}", p.product_name))
}

/// Detail screen for the selected product.
///
/// The composite [`view`](Self::view) emits once the product, its title and
/// its suppliers have each produced a value. Errors are reported on
/// [`errors`](Self::errors) and never block the other branches.
pub struct DetailViewModel {
    product: ViewStream<Option<Product>>,
    page_title: ViewStream<Option<String>>,
    suppliers: ViewStream<Vec<Supplier>>,
    view: ViewStream<DetailView>,
    errors: ErrorChannel,
}

impl DetailViewModel {
    /// Must be called within a tokio runtime.
    pub fn new(source: &Arc<ProductSource>) -> Self {
        let errors = ErrorChannel::new();

        let product = catch_into(source.selected_product(), errors.clone());
        let page_title = map(product.resubscribe(), |p| page_title_for(p.as_ref()));
        let suppliers = catch_into(source.selected_product_suppliers(), errors.clone());

        let view = combine_latest3(
            product.resubscribe(),
            page_title.resubscribe(),
            suppliers.resubscribe(),
            |product: &Option<Product>, page_title: &Option<String>, suppliers: &Vec<Supplier>| {
                DetailView {
                    product: product.clone(),
                    page_title: page_title.clone(),
                    suppliers: suppliers.clone(),
                }
            },
        );

        Self {
            product,
            page_title,
            suppliers,
            view,
            errors,
        }
    }

    pub fn product(&self) -> ViewStream<Option<Product>> {
        self.product.resubscribe()
    }

    pub fn page_title(&self) -> ViewStream<Option<String>> {
        self.page_title.resubscribe()
    }

    pub fn suppliers(&self) -> ViewStream<Vec<Supplier>> {
        self.suppliers.resubscribe()
    }

    pub fn view(&self) -> ViewStream<DetailView> {
        self.view.resubscribe()
    }

    pub fn errors(&self) -> &ErrorChannel {
        &self.errors
    }
}
