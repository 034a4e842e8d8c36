use std::future::Future;

use crate::error::FetchError;
use crate::reactive::{ErrorChannel, Publisher, ViewStream};

enum Side<A, B> {
    Left(Option<Result<A, FetchError>>),
    Right(Option<Result<B, FetchError>>),
}

/// Run `fut` once and publish its outcome.
pub fn from_future<T, Fut>(fut: Fut) -> ViewStream<T>
where
    T: Clone + Send + Sync + 'static,
    Fut: Future<Output = Result<T, FetchError>> + Send + 'static,
{
    let out = Publisher::new();
    let stream = out.subscribe();

    tokio::spawn(async move {
        tokio::select! {
            _ = out.closed() => {}
            result = fut => match result {
                Ok(value) => out.emit(value),
                Err(error) => out.fail(error),
            },
        }
    });

    stream
}

/// Apply `f` to every value of `source`. Failures pass through.
pub fn map<T, U, F>(mut source: ViewStream<T>, f: F) -> ViewStream<U>
where
    T: Clone + Send + Sync + 'static,
    U: Clone + Send + Sync + 'static,
    F: Fn(T) -> U + Send + 'static,
{
    let out = Publisher::new();
    let stream = out.subscribe();

    tokio::spawn(async move {
        loop {
            let item = tokio::select! {
                _ = out.closed() => break,
                item = source.next() => item,
            };
            match item {
                Some(Ok(value)) => out.emit(f(value)),
                Some(Err(error)) => {
                    out.fail(error);
                    break;
                }
                None => break,
            }
        }
    });

    stream
}

/// Emit `f(left, right)` whenever either input changes, once both have
/// produced a value.
///
/// A failure on either input fails the output. An input that closes before
/// its first value closes the output.
pub fn combine_latest<A, B, U, F>(
    mut left: ViewStream<A>,
    mut right: ViewStream<B>,
    f: F,
) -> ViewStream<U>
where
    A: Clone + Send + Sync + 'static,
    B: Clone + Send + Sync + 'static,
    U: Clone + Send + Sync + 'static,
    F: Fn(&A, &B) -> U + Send + 'static,
{
    let out = Publisher::new();
    let stream = out.subscribe();

    tokio::spawn(async move {
        let mut latest_left: Option<A> = None;
        let mut latest_right: Option<B> = None;
        let mut left_open = true;
        let mut right_open = true;

        while left_open || right_open {
            let side = tokio::select! {
                _ = out.closed() => break,
                item = left.next(), if left_open => Side::Left(item),
                item = right.next(), if right_open => Side::Right(item),
            };

            match side {
                Side::Left(Some(Ok(value))) => latest_left = Some(value),
                Side::Right(Some(Ok(value))) => latest_right = Some(value),
                Side::Left(Some(Err(error))) | Side::Right(Some(Err(error))) => {
                    out.fail(error);
                    break;
                }
                Side::Left(None) => {
                    if latest_left.is_none() {
                        break;
                    }
                    left_open = false;
                    continue;
                }
                Side::Right(None) => {
                    if latest_right.is_none() {
                        break;
                    }
                    right_open = false;
                    continue;
                }
            }

            if let (Some(a), Some(b)) = (&latest_left, &latest_right) {
                out.emit(f(a, b));
            }
        }
    });

    stream
}

/// Three-input [`combine_latest`].
pub fn combine_latest3<A, B, C, U, F>(
    first: ViewStream<A>,
    second: ViewStream<B>,
    third: ViewStream<C>,
    f: F,
) -> ViewStream<U>
where
    A: Clone + Send + Sync + 'static,
    B: Clone + Send + Sync + 'static,
    C: Clone + Send + Sync + 'static,
    U: Clone + Send + Sync + 'static,
    F: Fn(&A, &B, &C) -> U + Send + 'static,
{
    let pair = combine_latest(first, second, |a: &A, b: &B| (a.clone(), b.clone()));
    combine_latest(pair, third, move |ab: &(A, B), c: &C| f(&ab.0, &ab.1, c))
}

/// Forward values of `source`; on failure, push the message to `errors`
/// and close quietly instead of failing downstream.
pub fn catch_into<T>(mut source: ViewStream<T>, errors: ErrorChannel) -> ViewStream<T>
where
    T: Clone + Send + Sync + 'static,
{
    let out = Publisher::new();
    let stream = out.subscribe();

    tokio::spawn(async move {
        loop {
            let item = tokio::select! {
                _ = out.closed() => break,
                item = source.next() => item,
            };
            match item {
                Some(Ok(value)) => out.emit(value),
                Some(Err(error)) => {
                    errors.push(&error);
                    break;
                }
                None => break,
            }
        }
    });

    stream
}
