use std::sync::Arc;

use crate::catalog::filter_by_category;
use crate::model::{Category, CategoryFilter, CategoryId, Product};
use crate::reactive::{catch_into, combine_latest, ErrorChannel, Publisher, ViewStream};
use crate::sources::{CategorySource, ProductSource};

const PAGE_TITLE: &str = "Product List";

/// Product list screen: products filtered by the selected category, and
/// the category list for the filter control.
pub struct ListViewModel {
    source: Arc<ProductSource>,
    category_selected: Publisher<CategoryFilter>,
    products: ViewStream<Vec<Product>>,
    categories: ViewStream<Arc<Vec<Category>>>,
    errors: ErrorChannel,
}

impl ListViewModel {
    /// Must be called within a tokio runtime.
    pub fn new(products: &Arc<ProductSource>, categories: &Arc<CategorySource>) -> Self {
        let errors = ErrorChannel::new();
        let category_selected = Publisher::with_value(CategoryFilter::All);

        let filtered = combine_latest(
            products.products(),
            category_selected.subscribe(),
            |list: &Vec<Product>, filter: &CategoryFilter| filter_by_category(list, *filter),
        );

        Self {
            source: Arc::clone(products),
            products: catch_into(filtered, errors.clone()),
            categories: catch_into(categories.stream(), errors.clone()),
            category_selected,
            errors,
        }
    }

    pub fn page_title(&self) -> &'static str {
        PAGE_TITLE
    }

    /// Products of the selected category (all products when none is
    /// selected), including locally added ones.
    pub fn products(&self) -> ViewStream<Vec<Product>> {
        self.products.resubscribe()
    }

    pub fn categories(&self) -> ViewStream<Arc<Vec<Category>>> {
        self.categories.resubscribe()
    }

    pub fn errors(&self) -> &ErrorChannel {
        &self.errors
    }

    /// Filter by `id`; `0` clears the filter.
    pub fn select_category(&self, id: CategoryId) {
        let filter = CategoryFilter::from(id);
        tracing::debug!(?filter, "Category filter changed");
        self.category_selected.emit(filter);
    }

    pub fn category_filter(&self) -> CategoryFilter {
        self.category_selected.latest().unwrap_or_default()
    }

    /// The list screen's add action: appends the placeholder product.
    pub fn add_product(&self) {
        self.source.add_product(None);
    }
}
