use futures::stream::{self, BoxStream, StreamExt};
use tokio::sync::watch;

use crate::error::FetchError;

/// State of a stream: nothing yet, a value, or a terminal failure.
#[derive(Debug, Clone)]
pub enum Emission<T> {
    Pending,
    Value(T),
    Failed(FetchError),
}

/// Owning side of a [`ViewStream`].
pub struct Publisher<T> {
    tx: watch::Sender<Emission<T>>,
}

impl<T: Clone> Publisher<T> {
    /// A publisher that has not emitted yet.
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(Emission::Pending);
        Self { tx }
    }

    /// A publisher primed with `value`, replayed to the first subscriber.
    pub fn with_value(value: T) -> Self {
        let (tx, _rx) = watch::channel(Emission::Value(value));
        Self { tx }
    }

    pub fn emit(&self, value: T) {
        self.tx.send_replace(Emission::Value(value));
    }

    pub fn fail(&self, error: FetchError) {
        self.tx.send_replace(Emission::Failed(error));
    }

    /// Put a failed stream back to pending so a retry can be observed.
    /// Returns whether the stream had failed.
    pub fn clear_failure(&self) -> bool {
        self.tx.send_if_modified(|emission| {
            if matches!(emission, Emission::Failed(_)) {
                *emission = Emission::Pending;
                true
            } else {
                false
            }
        })
    }

    pub fn subscribe(&self) -> ViewStream<T> {
        ViewStream::new(self.tx.subscribe())
    }

    /// Last emitted value, if the stream holds one.
    pub fn latest(&self) -> Option<T> {
        match &*self.tx.borrow() {
            Emission::Value(value) => Some(value.clone()),
            _ => None,
        }
    }

    /// Resolves once every subscriber is gone.
    pub async fn closed(&self) {
        self.tx.closed().await
    }
}

impl<T: Clone> Default for Publisher<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Subscriber side: replays the current value, then follows updates.
pub struct ViewStream<T> {
    rx: watch::Receiver<Emission<T>>,
    replayed: bool,
    finished: bool,
}

impl<T: Clone> ViewStream<T> {
    fn new(rx: watch::Receiver<Emission<T>>) -> Self {
        Self {
            rx,
            replayed: false,
            finished: false,
        }
    }

    /// A fresh subscriber on the same source, starting from the current value.
    pub fn resubscribe(&self) -> Self {
        Self::new(self.rx.clone())
    }

    /// Current value without waiting.
    pub fn latest(&self) -> Option<T> {
        match &*self.rx.borrow() {
            Emission::Value(value) => Some(value.clone()),
            _ => None,
        }
    }

    /// Next value or failure.
    ///
    /// Returns `None` once the publisher is gone, or after a failure has
    /// been returned.
    pub async fn next(&mut self) -> Option<Result<T, FetchError>> {
        if self.finished {
            return None;
        }

        if !self.replayed {
            self.replayed = true;
            if let Some(item) = self.take_current() {
                return Some(item);
            }
        }

        loop {
            // changed() reports an unseen value before it reports closure
            if self.rx.changed().await.is_err() {
                self.finished = true;
                return None;
            }
            if let Some(item) = self.take_current() {
                return Some(item);
            }
        }
    }

    fn take_current(&mut self) -> Option<Result<T, FetchError>> {
        let item = match &*self.rx.borrow_and_update() {
            Emission::Pending => None,
            Emission::Value(value) => Some(Ok(value.clone())),
            Emission::Failed(error) => Some(Err(error.clone())),
        };
        if matches!(item, Some(Err(_))) {
            self.finished = true;
        }
        item
    }
}

impl<T: Clone + Send + Sync + 'static> ViewStream<T> {
    pub fn into_stream(self) -> BoxStream<'static, Result<T, FetchError>> {
        stream::unfold(self, |mut view| async move {
            view.next().await.map(|item| (item, view))
        })
        .boxed()
    }
}
