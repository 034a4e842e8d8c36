use serde::{Deserialize, Serialize};

use super::{CategoryId, SupplierId};

pub type ProductId = u32;

/// A catalog product.
///
/// `price` is the backend price until the product has been through the
/// category join, after which it always holds the marked-up value.
/// `category` is only set once a matching category was found.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub product_name: String,
    #[serde(default)]
    pub product_code: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: Option<f64>,
    pub category_id: CategoryId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default)]
    pub quantity_in_stock: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplier_ids: Option<Vec<SupplierId>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_key: Option<Vec<String>>,
}

impl Product {
    /// Supplier ids of this product; empty when the backend sent none.
    pub fn supplier_ids(&self) -> &[SupplierId] {
        self.supplier_ids.as_deref().unwrap_or(&[])
    }
}
