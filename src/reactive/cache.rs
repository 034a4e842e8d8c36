use std::future::Future;

use futures::future::{BoxFuture, FutureExt, Shared};
use parking_lot::Mutex;

use crate::error::FetchError;

type Attempt<T> = Shared<BoxFuture<'static, Result<T, FetchError>>>;

enum Slot<T> {
    Empty,
    /// In flight, or finished with an error.
    Fetching(Attempt<T>),
    Ready(T),
}

/// Memoized fetch: one attempt is shared by every caller, and a successful
/// result is kept and handed out without another request.
///
/// A failed attempt is replayed to every caller until [`clear_failure`] or
/// [`invalidate`] lets the next caller fetch again.
///
/// [`clear_failure`]: Cached::clear_failure
/// [`invalidate`]: Cached::invalidate
pub struct Cached<T> {
    slot: Mutex<Slot<T>>,
}

impl<T: Clone + Send + Sync + 'static> Cached<T> {
    pub fn new() -> Self {
        Self {
            slot: Mutex::new(Slot::Empty),
        }
    }

    pub async fn get_or_fetch<F, Fut>(&self, fetch: F) -> Result<T, FetchError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, FetchError>> + Send + 'static,
    {
        let attempt = {
            let mut slot = self.slot.lock();
            match &*slot {
                Slot::Ready(value) => return Ok(value.clone()),
                Slot::Fetching(attempt) => attempt.clone(),
                Slot::Empty => {
                    let attempt = fetch().boxed().shared();
                    *slot = Slot::Fetching(attempt.clone());
                    attempt
                }
            }
        };

        let result = attempt.clone().await;

        if let Ok(value) = &result {
            let mut slot = self.slot.lock();
            // an invalidated attempt must not land in the fresh slot
            if matches!(&*slot, Slot::Fetching(current) if current.ptr_eq(&attempt)) {
                *slot = Slot::Ready(value.clone());
            }
        }
        result
    }

    /// Cached value, if a fetch has succeeded.
    pub fn peek(&self) -> Option<T> {
        match &*self.slot.lock() {
            Slot::Ready(value) => Some(value.clone()),
            _ => None,
        }
    }

    /// Forget a failed attempt so the next call fetches again. Returns
    /// whether there was one.
    pub fn clear_failure(&self) -> bool {
        let mut slot = self.slot.lock();
        let failed = matches!(&*slot, Slot::Fetching(attempt) if matches!(attempt.peek(), Some(Err(_))));
        if failed {
            *slot = Slot::Empty;
        }
        failed
    }

    /// Drop the cached value; the next call fetches again.
    ///
    /// An attempt already in flight still completes for its own callers but
    /// is not seen by callers arriving after this.
    pub fn invalidate(&self) {
        *self.slot.lock() = Slot::Empty;
    }
}

impl<T: Clone + Send + Sync + 'static> Default for Cached<T> {
    fn default() -> Self {
        Self::new()
    }
}
