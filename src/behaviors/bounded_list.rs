//! Newest-first list with a size bound.

use std::collections::VecDeque;

const DEFAULT_LIMIT: usize = 100;

/// A list that keeps its newest element first and evicts from the tail once
/// the configured limit is exceeded.
#[derive(Debug, Clone)]
pub struct BoundedReverseList<T> {
    limit: usize,
    items: VecDeque<T>,
}

impl<T> BoundedReverseList<T> {
    pub fn new(limit: usize) -> Self {
        BoundedReverseList {
            limit,
            items: VecDeque::new(),
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Add an element at the top, evicting tail elements that exceed the
    /// limit.
    pub fn add_first(&mut self, item: T) {
        self.items.push_front(item);
        while self.items.len() > self.limit {
            self.items.pop_back();
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn first(&self) -> Option<&T> {
        self.items.front()
    }

    pub fn last(&self) -> Option<&T> {
        self.items.back()
    }

    /// Newest-first iteration.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }
}

impl<T> Default for BoundedReverseList<T> {
    fn default() -> Self {
        Self::new(DEFAULT_LIMIT)
    }
}
