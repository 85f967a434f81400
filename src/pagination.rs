//! Cursor-based auto-pagination.
//!
//! A [`PageIterator`] turns a "fetch one page" capability into a flat,
//! lazily-fetched sequence of items. Every list endpoint in
//! [`resources`](crate::resources) hands one out through `list_auto_paginate`,
//! but any [`PageFetcher`] works, including a plain closure:
//!
//! ```
//! use billingio::pagination::{Page, PageIterator};
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let mut iter = PageIterator::new(|cursor: Option<String>| async move {
//!     Ok::<_, std::convert::Infallible>(match cursor.as_deref() {
//!         None => Page { items: vec!["a", "b"], has_more: true, next_cursor: Some("p2".into()) },
//!         _ => Page { items: vec!["c"], has_more: false, next_cursor: None },
//!     })
//! });
//!
//! let mut seen = Vec::new();
//! while iter.advance().await {
//!     seen.extend(iter.current().copied());
//! }
//! assert_eq!(seen, ["a", "b", "c"]);
//! assert!(iter.last_error().is_none());
//! # });
//! ```

use futures_util::Stream;

/// One page of results as reported by a [`PageFetcher`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Whether the server reports further pages.
    pub has_more: bool,
    /// Cursor to present on the next fetch.
    pub next_cursor: Option<String>,
}

/// Fetches a single page given the cursor of that page (`None` for the first).
pub trait PageFetcher {
    type Item;
    type Error;

    fn fetch_page(
        &mut self,
        cursor: Option<String>,
    ) -> impl Future<Output = Result<Page<Self::Item>, Self::Error>>;
}

impl<F, Fut, T, E> PageFetcher for F
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<Page<T>, E>>,
{
    type Item = T;
    type Error = E;

    fn fetch_page(&mut self, cursor: Option<String>) -> impl Future<Output = Result<Page<T>, E>> {
        self(cursor)
    }
}

/// A lazy iterator over every item of a paginated listing.
///
/// Drive it with [`advance`](PageIterator::advance) and read the item with
/// [`current`](PageIterator::current). `current` is only meaningful after an
/// `advance` that returned `true`; otherwise it returns `None`.
///
/// An instance performs exactly one traversal. The first fetch error ends it
/// for good and stays available through [`last_error`](PageIterator::last_error).
/// Nothing is retried.
pub struct PageIterator<F: PageFetcher> {
    fetcher: F,
    page: Vec<F::Item>,
    /// Invariant: `position <= page.len()`.
    position: usize,
    cursor: Option<String>,
    has_more: bool,
    started: bool,
    error: Option<F::Error>,
    empty_page_limit: usize,
}

impl<F: PageFetcher> PageIterator<F> {
    pub fn new(fetcher: F) -> Self {
        PageIterator {
            fetcher,
            page: Vec::new(),
            position: 0,
            cursor: None,
            // Assume at least one page until told otherwise.
            has_more: true,
            started: false,
            error: None,
            empty_page_limit: 0,
        }
    }

    /// Allow up to `limit` consecutive empty pages that still report
    /// `has_more` to be skipped instead of ending the traversal.
    ///
    /// Defaults to 0: the first empty page ends the traversal.
    pub fn with_empty_page_limit(mut self, limit: usize) -> Self {
        self.empty_page_limit = limit;
        self
    }

    /// Move to the next item, fetching the next page when the current one is
    /// exhausted.
    ///
    /// Returns `false` once the traversal is over, either because no items
    /// remain or because a fetch failed; check [`last_error`](Self::last_error)
    /// to tell them apart.
    pub async fn advance(&mut self) -> bool {
        if self.error.is_some() {
            return false;
        }

        if self.started && self.position < self.page.len() {
            self.position += 1;
            if self.position < self.page.len() {
                return true;
            }
        }

        let mut empty_pages = 0;
        loop {
            if self.started && !self.has_more {
                return false;
            }

            if !self.fetch_next_page().await {
                return false;
            }

            if !self.page.is_empty() {
                return true;
            }

            empty_pages += 1;
            if !self.has_more || empty_pages > self.empty_page_limit {
                // An empty page ends the traversal; never fetch again.
                self.has_more = false;
                return false;
            }
        }
    }

    /// The item at the current position.
    pub fn current(&self) -> Option<&F::Item> {
        self.page.get(self.position)
    }

    /// The error that ended the traversal, if any.
    pub fn last_error(&self) -> Option<&F::Error> {
        self.error.as_ref()
    }

    /// Drain the remaining items into a `Vec`, or return the error that ended
    /// the traversal.
    pub async fn try_collect(mut self) -> Result<Vec<F::Item>, F::Error>
    where
        F::Item: Clone,
    {
        let mut items = Vec::new();
        while self.advance().await {
            items.extend(self.current().cloned());
        }
        match self.error.take() {
            Some(err) => Err(err),
            None => Ok(items),
        }
    }

    /// Adapt the traversal into a [`Stream`].
    ///
    /// The stream yields every item as `Ok`, then the terminal error once as
    /// `Err` if the traversal failed, then ends.
    pub fn into_stream(self) -> impl Stream<Item = Result<F::Item, F::Error>>
    where
        F::Item: Clone,
    {
        futures_util::stream::unfold(Some(self), |state| async move {
            let mut iter = state?;
            if iter.advance().await {
                let item = iter.current().cloned()?;
                Some((Ok(item), Some(iter)))
            } else {
                iter.error.take().map(|err| (Err(err), None))
            }
        })
    }

    /// Fetch the page at the current cursor. Returns `false` if the fetch
    /// failed, in which case the error is recorded.
    async fn fetch_next_page(&mut self) -> bool {
        self.started = true;

        let page = match self.fetcher.fetch_page(self.cursor.clone()).await {
            Ok(page) => page,
            Err(err) => {
                self.error = Some(err);
                return false;
            }
        };

        #[cfg(feature = "tracing")]
        tracing::debug!(
            "Fetched page: items={}, has_more={}, next_cursor={:?}",
            page.items.len(),
            page.has_more,
            page.next_cursor
        );

        self.has_more = page.has_more;
        self.cursor = page.next_cursor;
        self.page = page.items;
        self.position = 0;

        // Fetching again with no cursor would restart from the first page.
        if self.has_more && self.cursor.is_none() {
            #[cfg(feature = "tracing")]
            tracing::warn!("Page reported has_more without a next_cursor; ending traversal");
            self.has_more = false;
        }

        true
    }
}

impl<F> std::fmt::Debug for PageIterator<F>
where
    F: PageFetcher,
    F::Item: std::fmt::Debug,
    F::Error: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageIterator")
            .field("page", &self.page)
            .field("position", &self.position)
            .field("cursor", &self.cursor)
            .field("has_more", &self.has_more)
            .field("started", &self.started)
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;

    /// Serves a fixed script of pages and records every cursor it was asked for.
    struct Script {
        pages: VecDeque<Result<Page<&'static str>, String>>,
        cursors: Vec<Option<String>>,
    }

    impl Script {
        fn new(pages: Vec<Result<Page<&'static str>, String>>) -> Self {
            Script {
                pages: pages.into(),
                cursors: Vec::new(),
            }
        }
    }

    impl PageFetcher for Script {
        type Item = &'static str;
        type Error = String;

        async fn fetch_page(&mut self, cursor: Option<String>) -> Result<Page<&'static str>, String> {
            self.cursors.push(cursor);
            self.pages
                .pop_front()
                .unwrap_or_else(|| Err("script exhausted".to_string()))
        }
    }

    fn page(items: &[&'static str], next: Option<&str>) -> Result<Page<&'static str>, String> {
        Ok(Page {
            items: items.to_vec(),
            has_more: next.is_some(),
            next_cursor: next.map(str::to_string),
        })
    }

    async fn drain<F: PageFetcher<Item = &'static str>>(iter: &mut PageIterator<F>) -> Vec<&'static str> {
        let mut seen = Vec::new();
        while iter.advance().await {
            seen.push(*iter.current().unwrap());
        }
        seen
    }

    #[tokio::test]
    async fn test_flattens_pages_in_order() {
        let mut iter = PageIterator::new(Script::new(vec![
            page(&["a", "b"], Some("c1")),
            page(&["c"], None),
        ]));

        assert_eq!(drain(&mut iter).await, ["a", "b", "c"]);
        assert!(!iter.advance().await);
        assert!(iter.last_error().is_none());
        assert_eq!(iter.fetcher.cursors, [None, Some("c1".to_string())]);
    }

    #[tokio::test]
    async fn test_empty_first_page() {
        let mut iter = PageIterator::new(Script::new(vec![page(&[], None)]));

        assert!(!iter.advance().await);
        assert!(iter.current().is_none());
        assert!(iter.last_error().is_none());
        assert!(!iter.advance().await);
        assert_eq!(iter.fetcher.cursors.len(), 1);
    }

    #[tokio::test]
    async fn test_current_is_none_before_advance() {
        let iter = PageIterator::new(Script::new(vec![page(&["a"], None)]));
        assert!(iter.current().is_none());
    }

    #[tokio::test]
    async fn test_error_is_sticky_and_not_retried() {
        let mut iter = PageIterator::new(Script::new(vec![
            page(&["a"], Some("c1")),
            Err("boom".to_string()),
            page(&["never"], None),
        ]));

        assert!(iter.advance().await);
        assert_eq!(iter.current(), Some(&"a"));
        assert!(!iter.advance().await);
        assert_eq!(iter.last_error().map(String::as_str), Some("boom"));

        for _ in 0..3 {
            assert!(!iter.advance().await);
        }
        assert_eq!(iter.last_error().map(String::as_str), Some("boom"));
        assert_eq!(iter.fetcher.cursors.len(), 2);
    }

    #[tokio::test]
    async fn test_error_on_first_fetch() {
        let mut iter = PageIterator::new(Script::new(vec![Err("down".to_string())]));

        assert!(!iter.advance().await);
        assert_eq!(iter.last_error().map(String::as_str), Some("down"));
    }

    #[tokio::test]
    async fn test_empty_page_with_has_more_ends_traversal_by_default() {
        let mut iter = PageIterator::new(Script::new(vec![
            page(&["a"], Some("c1")),
            page(&[], Some("c2")),
            page(&["b"], None),
        ]));

        assert_eq!(drain(&mut iter).await, ["a"]);
        assert!(!iter.advance().await);
        assert!(iter.last_error().is_none());
        assert_eq!(iter.fetcher.cursors.len(), 2);
    }

    #[tokio::test]
    async fn test_empty_page_limit_skips_bounded_run() {
        let mut iter = PageIterator::new(Script::new(vec![
            page(&["a"], Some("c1")),
            page(&[], Some("c2")),
            page(&[], Some("c3")),
            page(&["b"], None),
        ]))
        .with_empty_page_limit(2);

        assert_eq!(drain(&mut iter).await, ["a", "b"]);
        assert_eq!(
            iter.fetcher.cursors,
            [
                None,
                Some("c1".to_string()),
                Some("c2".to_string()),
                Some("c3".to_string())
            ]
        );
    }

    #[tokio::test]
    async fn test_empty_page_limit_is_finite() {
        let mut iter = PageIterator::new(Script::new(vec![
            page(&[], Some("c1")),
            page(&[], Some("c2")),
            page(&[], Some("c3")),
            page(&["unreached"], None),
        ]))
        .with_empty_page_limit(1);

        assert!(!iter.advance().await);
        assert!(iter.last_error().is_none());
        assert_eq!(iter.fetcher.cursors.len(), 2);
    }

    #[tokio::test]
    async fn test_has_more_without_cursor_stops() {
        let mut iter = PageIterator::new(Script::new(vec![
            Ok(Page {
                items: vec!["a"],
                has_more: true,
                next_cursor: None,
            }),
            page(&["restarted"], None),
        ]));

        assert_eq!(drain(&mut iter).await, ["a"]);
        assert_eq!(iter.fetcher.cursors.len(), 1);
    }

    #[tokio::test]
    async fn test_position_stays_in_bounds_after_exhaustion() {
        let mut iter = PageIterator::new(Script::new(vec![page(&["a", "b"], None)]));

        drain(&mut iter).await;
        for _ in 0..5 {
            assert!(!iter.advance().await);
        }
        assert_eq!(iter.position, iter.page.len());
    }

    #[tokio::test]
    async fn test_try_collect() {
        let iter = PageIterator::new(Script::new(vec![
            page(&["a"], Some("c1")),
            page(&["b", "c"], None),
        ]));
        assert_eq!(iter.try_collect().await.unwrap(), ["a", "b", "c"]);

        let failing = PageIterator::new(Script::new(vec![
            page(&["a"], Some("c1")),
            Err("boom".to_string()),
        ]));
        assert_eq!(failing.try_collect().await.unwrap_err(), "boom");
    }

    #[tokio::test]
    async fn test_into_stream_yields_error_once() {
        use futures_util::StreamExt;

        let iter = PageIterator::new(Script::new(vec![
            page(&["a"], Some("c1")),
            Err("boom".to_string()),
        ]));

        let results: Vec<_> = iter.into_stream().collect().await;

        assert_eq!(results, [Ok("a"), Err("boom".to_string())]);
    }
}
