//! Fetch results and window normalization.
//!
//! Page sources may hand back either a flat run of items or a batch of
//! sub-pages (e.g. a backend that answers one request with several pages).
//! The pager only ever stores flat windows, so every result goes through
//! [`Fetched::flatten`] before it is assigned to `data` or `next`.

/// Items returned by a page source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fetched<T> {
    /// A flat, ordered run of items.
    Items(Vec<T>),
    /// Several ordered sub-pages; concatenated in order on flatten.
    Pages(Vec<Vec<T>>),
}

impl<T> Fetched<T> {
    /// An empty result (end of feed).
    pub fn empty() -> Self {
        Fetched::Items(Vec::new())
    }

    /// Flatten one level into a single ordered sequence.
    pub fn flatten(self) -> Vec<T> {
        match self {
            Fetched::Items(items) => items,
            Fetched::Pages(pages) => pages.into_iter().flatten().collect(),
        }
    }

    /// Total item count across all sub-pages.
    pub fn len(&self) -> usize {
        match self {
            Fetched::Items(items) => items.len(),
            Fetched::Pages(pages) => pages.iter().map(Vec::len).sum(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T> Default for Fetched<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> From<Vec<T>> for Fetched<T> {
    fn from(items: Vec<T>) -> Self {
        Fetched::Items(items)
    }
}

impl<T> From<Vec<Vec<T>>> for Fetched<T> {
    fn from(pages: Vec<Vec<T>>) -> Self {
        Fetched::Pages(pages)
    }
}

impl<T> FromIterator<T> for Fetched<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Fetched::Items(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flatten_items_is_identity() {
        let fetched = Fetched::<u32>::from(vec![3, 2, 1]);
        assert_eq!(fetched.flatten(), vec![3, 2, 1]);
    }

    #[test]
    fn test_flatten_pages_concatenates_in_order() {
        let fetched = Fetched::Pages(vec![vec![9, 8], vec![], vec![7], vec![6, 5]]);
        assert_eq!(fetched.len(), 5);
        assert_eq!(fetched.flatten(), vec![9, 8, 7, 6, 5]);
    }

    #[test]
    fn test_from_nested_vec_is_pages() {
        let fetched = Fetched::<u32>::from(vec![vec![4, 3], vec![2]]);
        assert_eq!(fetched, Fetched::Pages(vec![vec![4, 3], vec![2]]));
        assert_eq!(fetched.flatten(), vec![4, 3, 2]);
    }

    #[test]
    fn test_flatten_only_one_level() {
        // Items that are themselves sequences stay intact
        let fetched: Fetched<Vec<u32>> = Fetched::Items(vec![vec![1, 2], vec![3]]);
        assert_eq!(fetched.flatten(), vec![vec![1, 2], vec![3]]);
    }

    #[test]
    fn test_empty() {
        let fetched: Fetched<u8> = Fetched::default();
        assert!(fetched.is_empty());
        assert!(Fetched::<u8>::Pages(vec![vec![], vec![]]).is_empty());
    }
}
