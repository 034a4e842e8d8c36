use serde::{Deserialize, Serialize};

pub type SupplierId = u32;

/// A product supplier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    pub id: SupplierId,
    #[serde(default)]
    pub supplier_name: String,
    #[serde(default)]
    pub cost: Option<f64>,
    #[serde(default)]
    pub min_quantity: Option<u32>,
}
