//! Catalog composition: the category join, price markup, category
//! filtering, and the running product list with its local additions.

mod intent;
mod join;
mod reducer;
mod state;

pub use intent::ProductListIntent;
pub use join::{
    annotate, annotate_added, filter_by_category, join_categories, marked_up_price,
    placeholder_product, DEFAULT_MARKUP,
};
pub use reducer::ProductListReducer;
pub use state::ProductListState;
