use serde::{Deserialize, Serialize};

use super::Product;

pub type CategoryId = u32;

/// Product category, used only as a join key for products.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

/// Category filter selected on the product list.
///
/// The list screen reports category ids as plain numbers where `0`
/// means "no filter"; `From<CategoryId>` applies that convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(CategoryId),
}

impl CategoryFilter {
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(id) => product.category_id == *id,
        }
    }
}

impl From<CategoryId> for CategoryFilter {
    fn from(id: CategoryId) -> Self {
        if id == 0 {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(id)
        }
    }
}
