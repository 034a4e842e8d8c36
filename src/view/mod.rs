//! View models: read-only combinations of source streams, each with its
//! own error channel.
//!
//! A view model's streams are fail-soft: a failed fetch is reported on
//! the view's [`ErrorChannel`](crate::reactive::ErrorChannel) and the
//! affected stream goes quiet, while the view's other streams keep working.

mod detail;
mod list;

pub use detail::{page_title_for, DetailView, DetailViewModel};
pub use list::ListViewModel;
