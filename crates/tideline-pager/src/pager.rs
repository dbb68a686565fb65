//! Cursor-paged timeline state machine.
//!
//! A [`TimelinePager`] presents a window over a keyed feed that can only be
//! read forward from a cursor key. It keeps:
//!
//! - `data`: the page the viewer sees
//! - `next`: the page after `data`, prefetched so "can go forward" is known
//! - `keys`: a stack of boundary keys, one pushed at initial load and one per
//!   fetch of `next` (`None` marks "no further data")
//! - `index`: forward steps taken from the live edge
//!
//! # State Machine
//!
//! ```text
//! +----------------+
//! |     Inert      | data=[], next=[], keys=[], index=0
//! +-------+--------+
//!         | initial_fetch() / reset()
//!         v
//! +----------------+   fetch_next()      +----------------+
//! |   Live edge    | ------------------> |   Paged back   |
//! |   index == 0   | <------------------ |   index > 0    |
//! +----------------+   fetch_previous()  +----------------+
//!   add_latest_item()                      fetch_next() / fetch_previous()
//! ```
//!
//! Every navigation sets the loading flag for the duration of its fetch and
//! clears it on success and on failure. A failed fetch leaves the window as it
//! was except for the outgoing page copied into the opposite slot; retrying
//! the same operation lands in the intended state.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures::FutureExt;
use serde::Serialize;
use tracing::{debug, error, info, trace, warn};

use crate::config::PagerConfig;
use crate::constants::PREVIOUS_KEY_OFFSET;
use crate::error::{ConfigError, InsertError, TimelineError};
use crate::fetch::{split_source, FetchPageFn, InitialFetchFn, PageSource};
use crate::key::KeyFn;
use crate::page::Fetched;
use crate::view::EmptyTimeline;

/// Windowed, cursor-paged view over a keyed feed.
pub struct TimelinePager<T, K, E> {
    initial_fetch: InitialFetchFn<T, E>,
    fetch_page: FetchPageFn<T, K, E>,
    key_of: KeyFn<T, K>,
    page_size: usize,
    /// Items presented to the viewer.
    data: Vec<T>,
    /// Prefetched page immediately following `data`.
    next: Vec<T>,
    /// Boundary keys seen so far (`None` = feed exhausted at that fetch).
    keys: Vec<Option<K>>,
    /// Forward steps from the live edge.
    index: usize,
    is_loading: bool,
}

/// Serializable summary of a pager's state, for logs and diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineSnapshot<K> {
    pub index: usize,
    pub is_live: bool,
    pub is_loading: bool,
    pub data_len: usize,
    pub next_len: usize,
    pub keys: Vec<Option<K>>,
    pub next_key: Option<K>,
    pub previous_key: Option<K>,
}

impl<T, K, E> TimelinePager<T, K, E>
where
    T: Clone + Send + 'static,
    K: Clone + PartialEq + fmt::Debug + Send + 'static,
    E: std::error::Error + Send + 'static,
{
    pub fn builder() -> TimelinePagerBuilder<T, K, E> {
        TimelinePagerBuilder::new()
    }

    /// Placeholder with the same read-only shape, for use before a real pager
    /// exists.
    pub fn empty() -> EmptyTimeline<T> {
        EmptyTimeline::new()
    }

    // ── Navigation ───────────────────────────────────────────────────────

    /// Load the newest page and prefetch the one after it.
    ///
    /// Resets depth, key history and the prefetched page. When the feed is
    /// empty the pager stays inert.
    pub async fn initial_fetch(&mut self) -> Result<&Self, TimelineError<E>> {
        self.is_loading = true;
        self.index = 0;
        self.keys.clear();
        self.next.clear();

        let fut = (self.initial_fetch)(self.page_size);
        self.data = match fut.await {
            Ok(fetched) => fetched.flatten(),
            Err(e) => return Err(self.fail(e)),
        };

        if let Some(key) = self.data.last().map(|last| (self.key_of)(last)) {
            let fut = (self.fetch_page)(Some(key.clone()), self.page_size);
            self.next = match fut.await {
                Ok(fetched) => fetched.flatten(),
                Err(e) => return Err(self.fail(e)),
            };
            self.keys.push(Some(key));
            self.push_boundary_key();
        }
        self.is_loading = false;

        info!(
            "Timeline loaded at live edge: {} items, {} prefetched, page_size={}",
            self.data.len(),
            self.next.len(),
            self.page_size
        );
        Ok(&*self)
    }

    /// Start over from the live edge. Same as [`initial_fetch`](Self::initial_fetch).
    pub async fn reset(&mut self) -> Result<&Self, TimelineError<E>> {
        self.initial_fetch().await
    }

    /// Present the prefetched page and prefetch the one after it.
    ///
    /// Refused (logged, not an error) when there is nothing prefetched or a
    /// fetch is in flight; the refusal also clears the loading flag.
    pub async fn fetch_next(&mut self) -> Result<&Self, TimelineError<E>> {
        if !self.can_fetch_next() {
            error!(
                index = self.index,
                loading = self.is_loading,
                next_len = self.next.len(),
                "Timeline cannot fetch next"
            );
            self.is_loading = false;
            return Ok(&*self);
        }

        self.is_loading = true;
        self.data = self.next.clone();
        let cursor = self.next_key_value();
        debug!("Fetching next page after {:?} (index {})", cursor, self.index);

        let fut = (self.fetch_page)(cursor, self.page_size);
        self.next = match fut.await {
            Ok(fetched) => fetched.flatten(),
            Err(e) => return Err(self.fail(e)),
        };
        self.push_boundary_key();
        self.index += 1;
        self.is_loading = false;

        Ok(&*self)
    }

    /// Step back one page toward the live edge.
    ///
    /// At the live edge (or while loading) this refreshes to live instead.
    pub async fn fetch_previous(&mut self) -> Result<&Self, TimelineError<E>> {
        if !self.can_fetch_previous() {
            debug!(
                "Previous requested at index {} (loading={}), refreshing to live",
                self.index, self.is_loading
            );
            return self.initial_fetch().await;
        }

        self.is_loading = true;
        self.next = self.data.clone();
        let cursor = self.previous_key_value();
        debug!("Fetching previous page after {:?} (index {})", cursor, self.index);

        let fut = (self.fetch_page)(cursor, self.page_size);
        self.data = match fut.await {
            Ok(fetched) => fetched.flatten(),
            Err(e) => return Err(self.fail(e)),
        };
        self.keys.pop();
        self.index -= 1;
        self.is_loading = false;

        Ok(&*self)
    }

    /// Insert a newly observed item at the head of the live window.
    ///
    /// Only the current head is checked for duplicates. Both window slots keep
    /// their length: the old tail of `data` moves to the front of `next`, the
    /// old tail of `next` falls off, and the last history key becomes that
    /// item's key.
    pub fn add_latest_item(&mut self, item: T) -> Result<&Self, InsertError<K>> {
        if !self.is_live() {
            error!("Rejected live insertion at index {}", self.index);
            return Err(InsertError::NotLive { index: self.index });
        }

        let key = (self.key_of)(&item);
        if let Some(head) = self.data.first() {
            if (self.key_of)(head) == key {
                error!("Rejected duplicate head item {:?}", key);
                return Err(InsertError::Duplicate { key });
            }
        }

        if self.data.is_empty() {
            self.data.push(item);
            return Ok(&*self);
        }

        self.data.insert(0, item);
        if let Some(overflow) = self.data.pop() {
            self.next.insert(0, overflow);
        }
        if let Some(dropped) = self.next.pop() {
            let boundary = (self.key_of)(&dropped);
            trace!("Live insert {:?}: boundary key now {:?}", key, boundary);
            self.keys.pop();
            self.keys.push(Some(boundary));
        }

        Ok(&*self)
    }

    // ── Derived state ────────────────────────────────────────────────────

    pub fn can_fetch_next(&self) -> bool {
        !self.next.is_empty() && !self.is_loading
    }

    pub fn can_fetch_previous(&self) -> bool {
        self.index > 0 && !self.is_loading
    }

    /// Key of the last prefetched item: the cursor for the next forward step.
    pub fn next_key_value(&self) -> Option<K> {
        self.next.last().map(|item| (self.key_of)(item))
    }

    /// Cursor for the next backward step: `keys[len - 4]`.
    ///
    /// `None` when the history is too short or holds the exhaustion sentinel
    /// there; page sources read that as "from the start".
    pub fn previous_key_value(&self) -> Option<K> {
        self.keys
            .len()
            .checked_sub(PREVIOUS_KEY_OFFSET)
            .and_then(|i| self.keys[i].clone())
    }

    pub fn is_live(&self) -> bool {
        self.index == 0
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn next(&self) -> &[T] {
        &self.next
    }

    pub fn keys(&self) -> &[Option<K>] {
        &self.keys
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Key of an item, as this pager sees it.
    pub fn key_of(&self, item: &T) -> K {
        (self.key_of)(item)
    }

    pub fn snapshot(&self) -> TimelineSnapshot<K> {
        TimelineSnapshot {
            index: self.index,
            is_live: self.is_live(),
            is_loading: self.is_loading,
            data_len: self.data.len(),
            next_len: self.next.len(),
            keys: self.keys.clone(),
            next_key: self.next_key_value(),
            previous_key: self.previous_key_value(),
        }
    }

    // =========================================================================
    // Internal helpers
    // =========================================================================

    /// Record the boundary key for a freshly fetched `next`.
    fn push_boundary_key(&mut self) {
        let key = self.next_key_value();
        trace!("Boundary key {:?} (history depth {})", key, self.keys.len() + 1);
        self.keys.push(key);
    }

    /// Clear the loading gate and wrap a collaborator failure.
    fn fail(&mut self, e: E) -> TimelineError<E> {
        self.is_loading = false;
        warn!("Timeline fetch failed at index {}: {}", self.index, e);
        TimelineError::Fetch(e)
    }
}

impl<T, K, E> fmt::Debug for TimelinePager<T, K, E>
where
    T: fmt::Debug,
    K: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimelinePager")
            .field("page_size", &self.page_size)
            .field("data", &self.data)
            .field("next", &self.next)
            .field("keys", &self.keys)
            .field("index", &self.index)
            .field("is_loading", &self.is_loading)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Collects collaborators and configuration for a [`TimelinePager`].
pub struct TimelinePagerBuilder<T, K, E> {
    initial_fetch: Option<InitialFetchFn<T, E>>,
    fetch_page: Option<FetchPageFn<T, K, E>>,
    key_of: Option<KeyFn<T, K>>,
    config: PagerConfig,
}

impl<T, K, E> Default for TimelinePagerBuilder<T, K, E> {
    fn default() -> Self {
        Self {
            initial_fetch: None,
            fetch_page: None,
            key_of: None,
            config: PagerConfig::default(),
        }
    }
}

impl<T, K, E> TimelinePagerBuilder<T, K, E>
where
    T: Clone + Send + 'static,
    K: Clone + PartialEq + fmt::Debug + Send + 'static,
    E: std::error::Error + Send + 'static,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Collaborator returning the newest page for a page size.
    pub fn initial_fetch<F, Fut, R>(mut self, f: F) -> Self
    where
        F: Fn(usize) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<R, E>> + Send + 'static,
        R: Into<Fetched<T>>,
    {
        self.initial_fetch = Some(Box::new(move |page_size| {
            f(page_size).map(|r| r.map(Into::into)).boxed()
        }));
        self
    }

    /// Collaborator returning the page after a cursor key.
    pub fn fetch_page<F, Fut, R>(mut self, f: F) -> Self
    where
        F: Fn(Option<K>, usize) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<R, E>> + Send + 'static,
        R: Into<Fetched<T>>,
    {
        self.fetch_page = Some(Box::new(move |cursor, page_size| {
            f(cursor, page_size).map(|r| r.map(Into::into)).boxed()
        }));
        self
    }

    /// Use a [`PageSource`] for both collaborators.
    pub fn source<S>(mut self, source: Arc<S>) -> Self
    where
        S: PageSource<T, Key = K, Error = E>,
    {
        let (initial, fetch) = split_source(source);
        self.initial_fetch = Some(initial);
        self.fetch_page = Some(fetch);
        self
    }

    /// Key extractor; its values must uniquely order items in fetch order.
    pub fn key<F>(mut self, f: F) -> Self
    where
        F: Fn(&T) -> K + Send + Sync + 'static,
    {
        self.key_of = Some(Arc::new(f));
        self
    }

    pub fn page_size(mut self, page_size: usize) -> Self {
        self.config.page_size = page_size;
        self
    }

    pub fn config(mut self, config: PagerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> Result<TimelinePager<T, K, E>, ConfigError> {
        let initial_fetch = self.initial_fetch.ok_or(ConfigError::MissingInitialFetch)?;
        let fetch_page = self.fetch_page.ok_or(ConfigError::MissingFetchPage)?;
        let key_of = self.key_of.ok_or(ConfigError::MissingKey)?;
        self.config.validate()?;

        Ok(TimelinePager {
            initial_fetch,
            fetch_page,
            key_of,
            page_size: self.config.page_size,
            data: Vec::new(),
            next: Vec::new(),
            keys: Vec::new(),
            index: 0,
            is_loading: false,
        })
    }
}
