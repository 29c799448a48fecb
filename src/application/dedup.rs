use crate::domain::model::SearchResult;
use std::collections::HashSet;

/// Insertion-ordered set of results keyed by restaurant id.
///
/// The first result seen for an id wins; later duplicates are dropped.
#[derive(Debug, Default)]
pub struct OrderedResultSet {
    seen: HashSet<String>,
    results: Vec<SearchResult>,
}

impl OrderedResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` if a result with the same id was already present.
    pub fn insert(&mut self, result: SearchResult) -> bool {
        if self.seen.insert(result.restaurant_id.clone()) {
            self.results.push(result);
            true
        } else {
            false
        }
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn into_vec(self) -> Vec<SearchResult> {
        self.results
    }
}

impl Extend<SearchResult> for OrderedResultSet {
    fn extend<I: IntoIterator<Item = SearchResult>>(&mut self, iter: I) {
        for result in iter {
            self.insert(result);
        }
    }
}

impl FromIterator<SearchResult> for OrderedResultSet {
    fn from_iter<I: IntoIterator<Item = SearchResult>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}
