//! Latest-value streams for view binding.
//!
//! ```text
//! Cached fetch ──→ Publisher ──→ ViewStream ──→ combinators ──→ view model
//!                                   ↑                              │
//!                  user action ─────┘                ErrorChannel ←┘
//! ```
//!
//! - [`Publisher`] / [`ViewStream`]: a `watch` channel of [`Emission`]s. A new
//!   subscriber first sees the current value, then every later one
//!   (intermediate values may coalesce). A failure ends the subscriber's
//!   stream after it is delivered.
//! - [`Cached`]: memoized single fetch shared by every observer.
//! - Combinators spawn a task per derived stream; the task exits when its
//!   inputs close or nobody observes the output any more.

mod cache;
mod combine;
mod errors;
mod stream;

pub use cache::Cached;
pub use combine::{catch_into, combine_latest, combine_latest3, from_future, map};
pub use errors::ErrorChannel;
pub use stream::{Emission, Publisher, ViewStream};
