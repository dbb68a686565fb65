//! The shape UI layers bind to.
//!
//! [`Timeline`] is the read-and-navigate surface shared by a live
//! [`TimelinePager`] and the [`EmptyTimeline`] placeholder shown before any
//! pager has been constructed.

use std::convert::Infallible;
use std::fmt;
use std::marker::PhantomData;

use async_trait::async_trait;

use crate::error::TimelineError;
use crate::pager::TimelinePager;

#[async_trait]
pub trait Timeline<T>: Send {
    type Error: std::error::Error + Send + 'static;

    /// Items currently presented.
    fn data(&self) -> &[T];

    fn can_fetch_next(&self) -> bool;

    fn can_fetch_previous(&self) -> bool;

    fn is_live(&self) -> bool;

    async fn fetch_next(&mut self) -> Result<(), Self::Error>;

    async fn fetch_previous(&mut self) -> Result<(), Self::Error>;

    async fn reset(&mut self) -> Result<(), Self::Error>;
}

#[async_trait]
impl<T, K, E> Timeline<T> for TimelinePager<T, K, E>
where
    T: Clone + Send + 'static,
    K: Clone + PartialEq + fmt::Debug + Send + 'static,
    E: std::error::Error + Send + 'static,
{
    type Error = TimelineError<E>;

    fn data(&self) -> &[T] {
        TimelinePager::data(self)
    }

    fn can_fetch_next(&self) -> bool {
        TimelinePager::can_fetch_next(self)
    }

    fn can_fetch_previous(&self) -> bool {
        TimelinePager::can_fetch_previous(self)
    }

    fn is_live(&self) -> bool {
        TimelinePager::is_live(self)
    }

    async fn fetch_next(&mut self) -> Result<(), Self::Error> {
        TimelinePager::fetch_next(self).await.map(|_| ())
    }

    async fn fetch_previous(&mut self) -> Result<(), Self::Error> {
        TimelinePager::fetch_previous(self).await.map(|_| ())
    }

    async fn reset(&mut self) -> Result<(), Self::Error> {
        TimelinePager::reset(self).await.map(|_| ())
    }
}

/// Placeholder timeline: no data, nothing to navigate, navigation is a no-op.
pub struct EmptyTimeline<T> {
    _items: PhantomData<fn() -> T>,
}

impl<T> EmptyTimeline<T> {
    pub fn new() -> Self {
        Self { _items: PhantomData }
    }
}

impl<T> Default for EmptyTimeline<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for EmptyTimeline<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("EmptyTimeline")
    }
}

#[async_trait]
impl<T> Timeline<T> for EmptyTimeline<T> {
    type Error = Infallible;

    fn data(&self) -> &[T] {
        &[]
    }

    fn can_fetch_next(&self) -> bool {
        false
    }

    fn can_fetch_previous(&self) -> bool {
        false
    }

    fn is_live(&self) -> bool {
        true
    }

    async fn fetch_next(&mut self) -> Result<(), Infallible> {
        Ok(())
    }

    async fn fetch_previous(&mut self) -> Result<(), Infallible> {
        Ok(())
    }

    async fn reset(&mut self) -> Result<(), Infallible> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_empty_timeline_is_inert() {
        let mut empty: EmptyTimeline<u32> = EmptyTimeline::new();
        assert!(empty.data().is_empty());
        assert!(!empty.can_fetch_next());
        assert!(!empty.can_fetch_previous());

        empty.fetch_next().await.unwrap();
        empty.fetch_previous().await.unwrap();
        empty.reset().await.unwrap();
        assert!(empty.data().is_empty());
    }
}
