use std::collections::{HashSet, VecDeque};

use url::Url;

use crate::url::normalize_url;

/// A URL waiting to be crawled, together with its distance from the seed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontierEntry {
    pub url: Url,
    pub depth: usize,
}

/// FIFO frontier with a built-in visited set
///
/// URLs are normalized on the way in and admitted at most once for the
/// lifetime of the frontier, so a page can never be scheduled twice even
/// when many pages link to it. Entries come back out in the order they
/// were admitted, which makes the traversal breadth-first.
#[derive(Debug, Default)]
pub struct Frontier {
    queue: VecDeque<FrontierEntry>,
    visited: HashSet<Url>,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Admits a URL at the given depth unless it was seen before.
    ///
    /// Returns true if the URL was actually enqueued. Fragment variants of
    /// the same page collapse to one entry because normalization strips
    /// the fragment before the visited check.
    pub fn enqueue(&mut self, url: &Url, depth: usize) -> bool {
        let url = normalize_url(url);
        if !self.visited.insert(url.clone()) {
            return false;
        }
        self.queue.push_back(FrontierEntry { url, depth });
        true
    }

    /// Removes and returns the oldest entry, if any.
    pub fn dequeue(&mut self) -> Option<FrontierEntry> {
        self.queue.pop_front()
    }

    /// Number of entries still waiting.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
