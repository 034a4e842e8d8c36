//! Fetching many resources by id under one of three concurrency policies.
//!
//! Every policy yields results as a stream and ends right after the first
//! failed fetch.

use std::future::Future;
use std::pin::Pin;

use futures::future;
use futures::stream::{self, BoxStream, StreamExt};
use serde::{Deserialize, Serialize};

use crate::error::FetchError;

/// How a sequence of ids is turned into fetches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum FetchPolicy {
    /// One fetch at a time; results in id order.
    Serial,
    /// All fetches at once (up to the limit); results in completion order.
    Concurrent,
    /// A new id discards the in-flight fetch; only the latest one's result
    /// is delivered.
    Latest,
}

enum SwitchStep<I, T> {
    Next(Option<I>),
    Done(Result<T, FetchError>),
}

struct Switch<I, F, Fut> {
    ids: BoxStream<'static, I>,
    fetch: F,
    inflight: Option<Pin<Box<Fut>>>,
    ids_done: bool,
}

pub fn fetch_many<I, T, F, Fut>(
    policy: FetchPolicy,
    ids: BoxStream<'static, I>,
    limit: usize,
    fetch: F,
) -> BoxStream<'static, Result<T, FetchError>>
where
    I: Send + 'static,
    T: Send + 'static,
    F: Fn(I) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<T, FetchError>> + Send + 'static,
{
    let results = match policy {
        FetchPolicy::Serial => ids.then(fetch).boxed(),
        FetchPolicy::Concurrent => ids.map(fetch).buffer_unordered(limit.max(1)).boxed(),
        FetchPolicy::Latest => switch_latest(ids, fetch),
    };
    stop_after_error(results)
}

fn switch_latest<I, T, F, Fut>(
    ids: BoxStream<'static, I>,
    fetch: F,
) -> BoxStream<'static, Result<T, FetchError>>
where
    I: Send + 'static,
    T: Send + 'static,
    F: Fn(I) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<T, FetchError>> + Send + 'static,
{
    let state = Switch {
        ids,
        fetch,
        inflight: None,
        ids_done: false,
    };

    stream::unfold(state, |mut st| async move {
        loop {
            match st.inflight.take() {
                None if st.ids_done => return None,
                None => match st.ids.next().await {
                    Some(id) => st.inflight = Some(Box::pin((st.fetch)(id))),
                    None => st.ids_done = true,
                },
                Some(pending) if st.ids_done => {
                    let result = pending.await;
                    return Some((result, st));
                }
                Some(mut pending) => {
                    let step = tokio::select! {
                        biased;
                        next = st.ids.next() => SwitchStep::Next(next),
                        result = &mut pending => SwitchStep::Done(result),
                    };
                    match step {
                        SwitchStep::Next(Some(id)) => {
                            tracing::debug!("Discarding superseded fetch");
                            st.inflight = Some(Box::pin((st.fetch)(id)));
                        }
                        SwitchStep::Next(None) => {
                            st.ids_done = true;
                            st.inflight = Some(pending);
                        }
                        SwitchStep::Done(result) => return Some((result, st)),
                    }
                }
            }
        }
    })
    .boxed()
}

fn stop_after_error<T: Send + 'static>(
    results: BoxStream<'static, Result<T, FetchError>>,
) -> BoxStream<'static, Result<T, FetchError>> {
    results
        .scan(false, |failed, item| {
            if *failed {
                return future::ready(None);
            }
            *failed = item.is_err();
            future::ready(Some(item))
        })
        .boxed()
}
