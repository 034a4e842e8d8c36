//! Catalog domain types as the backend serves them.
//!
//! Field names follow the backend's camelCase JSON. Values are never
//! mutated in place: every derivation (category join, markup, filtering)
//! builds new values.

mod category;
mod product;
mod supplier;

pub use category::{Category, CategoryFilter, CategoryId};
pub use product::{Product, ProductId};
pub use supplier::{Supplier, SupplierId};
