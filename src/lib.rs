//! Client-side composition layer of a product catalog.
//!
//! Fetches products, categories and suppliers over HTTP, joins them into
//! view models, and reacts to user actions (select a product, filter by
//! category, add a product locally).
//!
//! - [`sources`] own the backend fetches, their caches, and action state.
//! - [`view`] combines source streams into fail-soft view models.
//! - [`reactive`] provides the latest-value streams both are built on.

pub mod backend;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod mvi;
pub mod reactive;
pub mod sources;
pub mod view;

pub use backend::{CatalogBackend, HttpBackend};
pub use config::Config;
pub use error::FetchError;
pub use sources::Sources;
pub use view::{DetailView, DetailViewModel, ListViewModel};
