//! Offset pagination shared by search and feed endpoints.

use crate::error::Result;
use tracing::{debug, warn};

/// One fetched page.
#[derive(Debug)]
pub struct Page<T> {
    /// Records kept from this page (after any filtering or joining).
    pub items: Vec<T>,
    /// Number of raw records the server returned. Drives the offset and
    /// the empty-page stop, independently of how many `items` survived.
    pub raw_len: usize,
}

impl<T> Page<T> {
    /// A page where every raw record was kept.
    pub fn full(items: Vec<T>) -> Self {
        let raw_len = items.len();
        Self { items, raw_len }
    }
}

/// Walks `start`/`count` pages until enough results are collected.
///
/// Stops when the accumulated results reach `limit`, when a page comes back
/// empty, or once `ceil(limit / page_size) * max_repeated` requests have been
/// issued (a server that keeps answering without useful records cannot keep
/// the loop alive).
#[derive(Debug, Clone, Copy)]
pub struct Paginator {
    limit: usize,
    page_size: usize,
    max_requests: usize,
    start: usize,
}

impl Paginator {
    /// `limit = None` collects until the server runs dry. `page_ceiling` is
    /// the largest page the endpoint serves.
    pub fn new(limit: Option<usize>, page_ceiling: usize, max_repeated: usize) -> Self {
        let limit = limit.unwrap_or(usize::MAX);
        let page_size = limit.min(page_ceiling).max(1);
        let max_requests = limit.div_ceil(page_size).saturating_mul(max_repeated);
        Self {
            limit,
            page_size,
            max_requests,
            start: 0,
        }
    }

    /// Begin at offset `start` instead of 0. The limit and request ceiling
    /// still count from there.
    #[must_use]
    pub fn starting_at(mut self, start: usize) -> Self {
        self.start = start;
        self
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Run the loop. `fetch(start, count)` returns the page at `start`.
    ///
    /// The accumulator belongs to this call only.
    pub fn run<T, F>(&self, mut fetch: F) -> Result<Vec<T>>
    where
        F: FnMut(usize, usize) -> Result<Page<T>>,
    {
        let mut results = Vec::new();
        let mut start = self.start;
        let mut requests = 0;

        while results.len() < self.limit {
            if requests >= self.max_requests {
                warn!(requests, collected = results.len(), "pagination request ceiling reached");
                break;
            }
            let page = fetch(start, self.page_size)?;
            requests += 1;
            if page.raw_len == 0 {
                break;
            }
            start += page.raw_len;
            results.extend(page.items);
            results.truncate(self.limit);
            debug!(collected = results.len(), start, "results grew");
        }

        Ok(results)
    }
}
