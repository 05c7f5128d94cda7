//! Frontier-driven encyclopedia crawler for pre-cutoff human prose.
//!
//! Builds the human-written half of a text-classifier corpus: starting from
//! a seed set of page titles, the crawler discovers pages through outbound
//! links, pins each page to its most recent revision at or before a fixed
//! cutoff timestamp, extracts and filters clean prose paragraphs, and
//! persists a bounded random sample per page as line-delimited JSON.
//!
//! # Design
//!
//! - One page is fully processed per tick; network calls are sequential and
//!   attempted exactly once. A fixed inter-page delay rate-limits the source.
//! - The frontier is an unordered random-pop worklist, so discovery order
//!   does not favor link-dense hub pages.
//! - Every sub-operation surfaces failures as values; the orchestrator
//!   converts them to skips. Nothing short of target-reached or
//!   frontier-exhausted ends a run.
//!
//! # Usage
//!
//! ```rust,ignore
//! use corpus_crawler::{CrawlConfig, Crawler, JsonlSink, WikiClient, DEFAULT_API_URL};
//!
//! let cutoff = chrono::NaiveDateTime::parse_from_str("20220101000000", "%Y%m%d%H%M%S")?;
//! let config = CrawlConfig::new(seeds, cutoff).with_target(100);
//! let client = WikiClient::new(DEFAULT_API_URL, "MyCrawler/1.0 (contact@example.com)");
//! let mut sink = JsonlSink::create("human_text.jsonl")?;
//!
//! let crawler = Crawler::new(client, config);
//! let stats = crawler.run(&mut sink).await;
//! println!("collected {}", stats.collected);
//! ```

pub mod config;
pub mod crawl;
pub mod error;
pub mod filter;
pub mod frontier;
pub mod html;
pub mod sink;
pub mod source;
pub mod testing;
pub mod types;

pub use config::CrawlConfig;
pub use crawl::Crawler;
pub use error::{EmptyFrontierError, SinkError, SourceError};
pub use filter::{filter_paragraphs, DEFAULT_MIN_LENGTH, END_SECTIONS};
pub use frontier::Frontier;
pub use html::ParagraphExtractor;
pub use sink::{JsonlSink, RecordSink};
pub use source::{ContentSource, WikiClient, DEFAULT_API_URL};
pub use types::{CorpusRecord, CrawlStats, RevisionId};
