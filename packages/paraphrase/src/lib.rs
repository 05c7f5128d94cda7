//! Two-stage AI paraphrase generation for crawled corpus records.
//!
//! Consumes the crawl stage's line-delimited `{page, text}` records and
//! derives an AI-written counterpart of each paragraph by summarizing it to
//! a couple of sentences and expanding the summary back into a paragraph.
//! Emits `{human_text, ai_text, source, model}` pairs, one JSON object per
//! line.

pub mod client;
pub mod error;
pub mod records;
pub mod rewrite;

pub use client::{ChatRequest, Message, OpenAiClient};
pub use error::{Result, RewriteError};
pub use records::{
    read_human_records, rewrite_corpus, HumanRecord, RewriteRecord, RewriteStats,
};
pub use rewrite::{ChatCompleter, Rewriter};
