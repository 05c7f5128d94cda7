//! Crawl run configuration.

use std::time::Duration;

use chrono::NaiveDateTime;

use crate::filter::DEFAULT_MIN_LENGTH;

/// Tunables for a crawl run.
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Initial page titles; the frontier starts as this set, shuffled.
    pub seeds: Vec<String>,
    /// Stop once this many paragraphs have been persisted.
    pub target: usize,
    /// Only revisions at or before this instant (UTC) are eligible.
    pub cutoff: NaiveDateTime,
    /// Paragraphs shorter than this many characters are discarded.
    pub min_paragraph_length: usize,
    /// At most this many paragraphs are persisted per page.
    pub max_records_per_page: usize,
    /// At most this many discovered links are enqueued per page.
    pub max_links_per_page: usize,
    /// Pause after every tick; a crude rate limit against the content source.
    pub page_delay: Duration,
    /// Longer pause after a tick that failed unexpectedly.
    pub failure_delay: Duration,
    /// Fixed RNG seed for reproducible runs.
    pub rng_seed: Option<u64>,
}

impl CrawlConfig {
    pub fn new(seeds: Vec<String>, cutoff: NaiveDateTime) -> Self {
        Self {
            seeds,
            target: 100,
            cutoff,
            min_paragraph_length: DEFAULT_MIN_LENGTH,
            max_records_per_page: 2,
            max_links_per_page: 2,
            page_delay: Duration::from_millis(500),
            failure_delay: Duration::from_secs(1),
            rng_seed: None,
        }
    }

    /// Set the global paragraph target.
    pub fn with_target(mut self, target: usize) -> Self {
        self.target = target;
        self
    }

    /// Set the minimum paragraph length, in characters.
    pub fn with_min_paragraph_length(mut self, length: usize) -> Self {
        self.min_paragraph_length = length;
        self
    }

    /// Set the per-page cap on persisted paragraphs.
    pub fn with_max_records_per_page(mut self, cap: usize) -> Self {
        self.max_records_per_page = cap;
        self
    }

    /// Set the per-page cap on enqueued links.
    pub fn with_max_links_per_page(mut self, cap: usize) -> Self {
        self.max_links_per_page = cap;
        self
    }

    /// Set the mandatory inter-page delay.
    pub fn with_page_delay(mut self, delay: Duration) -> Self {
        self.page_delay = delay;
        self
    }

    /// Set the post-failure cooldown.
    pub fn with_failure_delay(mut self, delay: Duration) -> Self {
        self.failure_delay = delay;
        self
    }

    /// Fix the RNG seed for reproducible frontier order and sampling.
    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cutoff() -> NaiveDateTime {
        NaiveDateTime::parse_from_str("20220101000000", "%Y%m%d%H%M%S").unwrap()
    }

    #[test]
    fn test_config_defaults() {
        let config = CrawlConfig::new(vec!["Earth".to_string()], cutoff());

        assert_eq!(config.target, 100);
        assert_eq!(config.min_paragraph_length, 150);
        assert_eq!(config.max_records_per_page, 2);
        assert_eq!(config.max_links_per_page, 2);
        assert_eq!(config.page_delay, Duration::from_millis(500));
        assert!(config.rng_seed.is_none());
    }

    #[test]
    fn test_config_builder() {
        let config = CrawlConfig::new(vec!["Earth".to_string()], cutoff())
            .with_target(10)
            .with_min_paragraph_length(80)
            .with_max_records_per_page(3)
            .with_max_links_per_page(5)
            .with_page_delay(Duration::ZERO)
            .with_failure_delay(Duration::ZERO)
            .with_rng_seed(11);

        assert_eq!(config.target, 10);
        assert_eq!(config.min_paragraph_length, 80);
        assert_eq!(config.max_records_per_page, 3);
        assert_eq!(config.max_links_per_page, 5);
        assert_eq!(config.rng_seed, Some(11));
    }
}
