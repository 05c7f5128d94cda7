//! The crawl orchestrator: pop, resolve, expand, extract, filter, sample,
//! persist. One page is fully processed per tick, until the paragraph
//! target is reached or the frontier runs dry.

use std::collections::HashSet;

use tracing::{debug, error, info, warn};

use crate::config::CrawlConfig;
use crate::error::SinkError;
use crate::filter::filter_paragraphs;
use crate::frontier::Frontier;
use crate::html::ParagraphExtractor;
use crate::sink::RecordSink;
use crate::source::ContentSource;
use crate::types::{CorpusRecord, CrawlStats};

/// Drives a crawl against a content source.
///
/// All network calls are awaited sequentially; nothing in a tick overlaps
/// with another tick. A single page's failure never aborts the run.
pub struct Crawler<S> {
    source: S,
    config: CrawlConfig,
    extractor: ParagraphExtractor,
}

/// Mutable state threaded through the loop. `seen` holds every title ever
/// enqueued, visited or not, and only ever grows; a title is added the
/// moment it is enqueued, so nothing is ever enqueued twice.
struct CrawlState {
    frontier: Frontier,
    seen: HashSet<String>,
    rng: fastrand::Rng,
}

impl CrawlState {
    fn new(config: &CrawlConfig) -> Self {
        let mut rng = match config.rng_seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        };
        let mut frontier = match config.rng_seed {
            Some(seed) => Frontier::with_seed(seed.wrapping_add(1)),
            None => Frontier::new(),
        };

        let mut seeds = config.seeds.clone();
        rng.shuffle(&mut seeds);
        let mut seen = HashSet::new();
        for seed in seeds {
            if seen.insert(seed.clone()) {
                frontier.insert(seed);
            }
        }

        Self {
            frontier,
            seen,
            rng,
        }
    }
}

impl<S: ContentSource> Crawler<S> {
    pub fn new(source: S, config: CrawlConfig) -> Self {
        Self {
            source,
            config,
            extractor: ParagraphExtractor::new(),
        }
    }

    /// Run the crawl to completion and report totals.
    ///
    /// The only exits are target-reached and frontier-exhausted. Failed
    /// sub-operations are logged and converted to skips; a tick that fails
    /// at the persistence boundary gets the longer cooldown before the loop
    /// continues.
    pub async fn run(&self, sink: &mut impl RecordSink) -> CrawlStats {
        let mut state = CrawlState::new(&self.config);
        let mut stats = CrawlStats::default();

        info!(
            target = self.config.target,
            seeds = state.frontier.len(),
            cutoff = %self.config.cutoff,
            "Starting crawl"
        );

        while stats.collected < self.config.target && !state.frontier.is_empty() {
            let Ok(title) = state.frontier.extract() else {
                break;
            };
            stats.pages_visited += 1;

            match self.tick(&title, &mut state, sink).await {
                Ok(sampled) => {
                    stats.collected += sampled;
                    if sampled > 0 {
                        info!(
                            page = %title,
                            sampled = sampled,
                            collected = stats.collected,
                            target = self.config.target,
                            "Persisted page sample"
                        );
                    }
                    tokio::time::sleep(self.config.page_delay).await;
                }
                Err(err) => {
                    stats.pages_failed += 1;
                    error!(page = %title, error = %err, "Tick failed; continuing");
                    tokio::time::sleep(self.config.failure_delay).await;
                }
            }
        }

        if stats.collected >= self.config.target {
            info!(collected = stats.collected, "Crawl complete: target reached");
        } else {
            info!(collected = stats.collected, "Crawl complete: frontier exhausted");
        }
        stats
    }

    /// Process one page. Returns the number of paragraphs persisted; only a
    /// persistence failure escapes as an error.
    async fn tick(
        &self,
        title: &str,
        state: &mut CrawlState,
        sink: &mut impl RecordSink,
    ) -> Result<usize, SinkError> {
        let revision = match self.source.revision_before(title, self.config.cutoff).await {
            Ok(Some(revision)) => revision,
            Ok(None) => {
                warn!(page = %title, "No revision at or before the cutoff; skipping");
                return Ok(0);
            }
            Err(err) => {
                error!(page = %title, error = %err, "Revision lookup failed; skipping");
                return Ok(0);
            }
        };

        info!(page = %title, revision = %revision, "Processing page");

        // Frontier expansion happens before extraction: a page that yields
        // no usable paragraphs still contributes its links.
        let mut links = match self.source.outbound_links(title).await {
            Ok(links) => links,
            Err(err) => {
                error!(page = %title, error = %err, "Link discovery failed");
                Vec::new()
            }
        };
        state.rng.shuffle(&mut links);
        for link in links.into_iter().take(self.config.max_links_per_page) {
            if state.seen.insert(link.clone()) {
                state.frontier.insert(link);
            }
        }

        let raw = match self.source.rendered_html(revision).await {
            Ok(html) => self.extractor.paragraphs(&html),
            Err(err) => {
                error!(revision = %revision, error = %err, "Content fetch failed");
                Vec::new()
            }
        };
        let filtered = filter_paragraphs(&raw, self.config.min_paragraph_length);
        debug!(
            page = %title,
            raw = raw.len(),
            kept = filtered.len(),
            "Filtered paragraphs"
        );

        if filtered.is_empty() {
            return Ok(0);
        }

        let cap = self.config.max_records_per_page.min(filtered.len());
        let sampled = state.rng.choose_multiple(filtered.into_iter(), cap);
        let count = sampled.len();
        for text in sampled {
            sink.append(&CorpusRecord::human(title, text))?;
        }
        sink.flush()?;
        Ok(count)
    }
}
