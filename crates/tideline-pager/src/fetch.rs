//! Page source seams.
//!
//! The pager talks to its backend through two collaborators:
//!
//! - **initial fetch**: `(page_size) -> newest page`
//! - **page fetch**: `(cursor, page_size) -> up to page_size items strictly
//!   after cursor`; a `None` cursor means "from the start"
//!
//! Both are stored as boxed async closures so the pager stays a plain struct.
//! Backends that prefer a trait implement [`PageSource`] and hand it to
//! [`TimelinePagerBuilder::source`](crate::TimelinePagerBuilder::source).

use std::sync::Arc;

use async_trait::async_trait;
use futures::future::BoxFuture;

use crate::page::Fetched;

/// Fetches the newest page.
pub type InitialFetchFn<T, E> =
    Box<dyn Fn(usize) -> BoxFuture<'static, Result<Fetched<T>, E>> + Send + Sync>;

/// Fetches the page following a cursor key.
pub type FetchPageFn<T, K, E> =
    Box<dyn Fn(Option<K>, usize) -> BoxFuture<'static, Result<Fetched<T>, E>> + Send + Sync>;

/// A backend that serves a keyed, ordered feed page by page.
#[async_trait]
pub trait PageSource<T: Send + 'static>: Send + Sync + 'static {
    type Key: Send + 'static;
    type Error: std::error::Error + Send + 'static;

    /// The newest `page_size` items.
    async fn initial(&self, page_size: usize) -> Result<Fetched<T>, Self::Error>;

    /// Up to `page_size` items strictly after `cursor` in feed order.
    async fn page(
        &self,
        cursor: Option<Self::Key>,
        page_size: usize,
    ) -> Result<Fetched<T>, Self::Error>;
}

/// Adapt a [`PageSource`] into the pager's two collaborator closures.
pub(crate) fn split_source<T, S>(
    source: Arc<S>,
) -> (InitialFetchFn<T, S::Error>, FetchPageFn<T, S::Key, S::Error>)
where
    T: Send + 'static,
    S: PageSource<T>,
{
    let initial_source = source.clone();
    let initial: InitialFetchFn<T, S::Error> = Box::new(move |page_size| {
        let source = initial_source.clone();
        Box::pin(async move { source.initial(page_size).await })
    });

    let fetch: FetchPageFn<T, S::Key, S::Error> = Box::new(move |cursor, page_size| {
        let source = source.clone();
        Box::pin(async move { source.page(cursor, page_size).await })
    });

    (initial, fetch)
}
