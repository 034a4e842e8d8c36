use crate::model::{Category, CategoryFilter, Product};

/// Markup applied to backend prices unless configured otherwise.
pub const DEFAULT_MARKUP: f64 = 1.5;

/// Price shown to the user: the backend price times `markup`, or zero
/// when the backend sent none.
pub fn marked_up_price(price: Option<f64>, markup: f64) -> f64 {
    price.map_or(0.0, |p| p * markup)
}

/// A fetched product as the views see it: marked-up price, search key, and
/// the name of its category if `categories` has one with a matching id.
pub fn annotate(product: &Product, categories: &[Category], markup: f64) -> Product {
    Product {
        price: Some(marked_up_price(product.price, markup)),
        search_key: Some(vec![product.product_name.clone()]),
        category: categories
            .iter()
            .find(|c| c.id == product.category_id)
            .map(|c| c.name.clone()),
        ..product.clone()
    }
}

/// A locally added product. Unlike [`annotate`], a category name the caller
/// already set is kept; otherwise it is looked up in `categories`.
pub fn annotate_added(product: Product, categories: Option<&[Category]>, markup: f64) -> Product {
    let category = product.category.clone().or_else(|| {
        categories?
            .iter()
            .find(|c| c.id == product.category_id)
            .map(|c| c.name.clone())
    });

    Product {
        price: Some(marked_up_price(product.price, markup)),
        search_key: Some(vec![product.product_name.clone()]),
        category,
        ..product
    }
}

pub fn join_categories(products: &[Product], categories: &[Category], markup: f64) -> Vec<Product> {
    products
        .iter()
        .map(|product| annotate(product, categories, markup))
        .collect()
}

pub fn filter_by_category(products: &[Product], filter: CategoryFilter) -> Vec<Product> {
    products
        .iter()
        .filter(|p| filter.matches(p))
        .cloned()
        .collect()
}

/// Product added when the user asks to add one without details.
pub fn placeholder_product() -> Product {
    Product {
        id: 42,
        product_name: "Another One".to_string(),
        product_code: "TBX-0042".to_string(),
        description: "Our new product".to_string(),
        price: Some(8.9),
        category_id: 3,
        category: Some("Toolbox".to_string()),
        quantity_in_stock: 30,
        supplier_ids: None,
        search_key: None,
    }
}
