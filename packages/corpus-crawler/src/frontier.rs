//! Randomized worklist of discovered-but-not-yet-visited page titles.

use crate::error::EmptyFrontierError;

/// An unordered exploration stack for crawl work.
///
/// `extract` picks a uniformly random entry, swaps it with the last element,
/// and pops: O(1) removal with no re-shuffling of the remainder. Link
/// density varies wildly between pages, so popping in insertion order (FIFO
/// or LIFO) would systematically over- or under-sample heavily-linked hub
/// pages.
pub struct Frontier {
    entries: Vec<String>,
    rng: fastrand::Rng,
}

impl Frontier {
    /// Create an empty frontier.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            rng: fastrand::Rng::new(),
        }
    }

    /// Create an empty frontier with a fixed RNG seed, for reproducible
    /// extraction order.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            entries: Vec::new(),
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    /// Append a page title to the worklist.
    pub fn insert(&mut self, title: impl Into<String>) {
        self.entries.push(title.into());
    }

    /// Remove and return one title chosen uniformly at random.
    pub fn extract(&mut self) -> Result<String, EmptyFrontierError> {
        if self.entries.is_empty() {
            return Err(EmptyFrontierError);
        }
        let index = self.rng.usize(..self.entries.len());
        let last = self.entries.len() - 1;
        self.entries.swap(index, last);
        self.entries.pop().ok_or(EmptyFrontierError)
    }

    /// Number of titles currently awaiting a crawl tick.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for Frontier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_on_empty_frontier_fails() {
        let mut frontier = Frontier::new();
        assert_eq!(frontier.extract(), Err(EmptyFrontierError));
    }

    #[test]
    fn test_extraction_preserves_contents_as_multiset() {
        let mut frontier = Frontier::with_seed(7);
        let inserted = ["Alpha", "Beta", "Gamma", "Delta", "Epsilon"];
        for title in inserted {
            frontier.insert(title);
        }
        assert_eq!(frontier.len(), inserted.len());

        let mut extracted = Vec::new();
        while !frontier.is_empty() {
            extracted.push(frontier.extract().unwrap());
        }
        extracted.sort();

        let mut expected: Vec<_> = inserted.iter().map(|s| s.to_string()).collect();
        expected.sort();
        assert_eq!(extracted, expected);
        assert_eq!(frontier.extract(), Err(EmptyFrontierError));
    }

    #[test]
    fn test_interleaved_inserts_and_extracts() {
        let mut frontier = Frontier::with_seed(42);
        frontier.insert("One");
        frontier.insert("Two");
        let first = frontier.extract().unwrap();
        frontier.insert("Three");
        assert_eq!(frontier.len(), 2);

        let mut all = vec![first, frontier.extract().unwrap(), frontier.extract().unwrap()];
        all.sort();
        assert_eq!(all, vec!["One", "Three", "Two"]);
    }

    #[test]
    fn test_seeded_extraction_is_deterministic() {
        let mut runs = Vec::new();
        for _ in 0..2 {
            let mut frontier = Frontier::with_seed(99);
            for title in ["A", "B", "C", "D"] {
                frontier.insert(title);
            }
            let mut order = Vec::new();
            while let Ok(title) = frontier.extract() {
                order.push(title);
            }
            runs.push(order);
        }
        assert_eq!(runs[0], runs[1]);
    }
}
